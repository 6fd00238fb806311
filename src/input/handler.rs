use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let steer = |direction: Direction| KeyAction::Command(Command::SetDirection(direction));

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => steer(Direction::Up),
            KeyCode::Down => steer(Direction::Down),
            KeyCode::Left => steer(Direction::Left),
            KeyCode::Right => steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                KeyAction::Command(Command::TogglePause)
            }
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Command(Command::Start)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn steer(direction: Direction) -> KeyAction {
        KeyAction::Command(Command::SetDirection(direction))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Up), steer(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Down), steer(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Left), steer(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Right), steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('w')), steer(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Char('a')), steer(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Char('s')), steer(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Char('d')), steer(Direction::Right));

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), steer(Direction::Up));
    }

    #[test]
    fn test_pause_keys() {
        let handler = InputHandler::new();
        let pause = KeyAction::Command(Command::TogglePause);

        assert_eq!(press(&handler, KeyCode::Char('p')), pause);
        assert_eq!(press(&handler, KeyCode::Char('P')), pause);
        assert_eq!(press(&handler, KeyCode::Char(' ')), pause);
    }

    #[test]
    fn test_start_keys() {
        let handler = InputHandler::new();
        let start = KeyAction::Command(Command::Start);

        assert_eq!(press(&handler, KeyCode::Enter), start);
        assert_eq!(press(&handler, KeyCode::Char('r')), start);
        assert_eq!(press(&handler, KeyCode::Char('R')), start);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }
}

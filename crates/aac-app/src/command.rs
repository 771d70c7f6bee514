//! Terminal Commands
//!
//! One command per input line. Single letters stand in for the physical
//! keys and switch of a real board.

use aac_scan::{Key, ScanAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keyboard key, mapped by the current scan method
    Key(Key),
    /// Explicit scan action
    Action(ScanAction),
    SwitchDown,
    SwitchUp,
    Start,
    Stop,
    Restart,
    /// Speak the current message
    Speak,
    History,
    Quit,
}

impl Command {
    /// Parse a line; `None` for unknown input
    pub fn parse(line: &str) -> Option<Self> {
        // A bare newline is the Enter key
        if line.trim_end_matches(['\r', '\n']).is_empty() {
            return Some(Command::Key(Key::Enter));
        }
        let command = match line.trim().to_lowercase().as_str() {
            "" | "space" => Command::Key(Key::Space),
            "enter" => Command::Key(Key::Enter),
            "esc" | "escape" => Command::Key(Key::Escape),
            "n" | "next" => Command::Action(ScanAction::MoveNext),
            "s" | "select" => Command::Action(ScanAction::SelectCurrent),
            "b" | "back" => Command::Action(ScanAction::GoBack),
            "d" | "down" => Command::SwitchDown,
            "u" | "up" => Command::SwitchUp,
            "start" => Command::Start,
            "stop" => Command::Stop,
            "restart" => Command::Restart,
            "speak" => Command::Speak,
            "h" | "history" => Command::History,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse(""), Some(Command::Key(Key::Enter)));
        assert_eq!(Command::parse(" "), Some(Command::Key(Key::Space)));
        assert_eq!(Command::parse("n"), Some(Command::Action(ScanAction::MoveNext)));
        assert_eq!(Command::parse("S\n"), Some(Command::Action(ScanAction::SelectCurrent)));
        assert_eq!(Command::parse("esc"), Some(Command::Key(Key::Escape)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("jump"), None);
    }
}

//! Scanning State
//!
//! Phase machine state and the event queue the controller reports through.

use crate::config::ScanningConfig;
use std::collections::VecDeque;

/// Labels for fixed scan items
pub mod labels {
    pub const SPEAK: &str = "말하기";
    pub const SITUATION: &str = "상황";
    pub const BACK: &str = "돌아가기";
    pub const CLOSE: &str = "닫기";
}

/// Where in the menu → category → card → modal hierarchy the scan is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Menu,
    Category,
    Card,
    Modal,
}

impl ScanPhase {
    /// Phases that leave by themselves after two full passes
    pub fn auto_returns(self) -> bool {
        matches!(self, Self::Category | Self::Card)
    }
}

/// Top-level menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Category board
    Speak,
    /// Situation board
    Situation,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 2] = [MenuChoice::Speak, MenuChoice::Situation];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board slide for this choice
    pub fn slide(self) -> usize {
        match self {
            Self::Speak => 0,
            Self::Situation => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Speak => labels::SPEAK,
            Self::Situation => labels::SITUATION,
        }
    }
}

/// Scan position and session flags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanningState {
    pub is_active: bool,
    pub phase: ScanPhase,
    pub current_index: usize,
    /// Set when the scan has wrapped to index 0 once in this phase
    pub has_looped: bool,
    pub selected_menu: Option<MenuChoice>,
    /// Items in the current phase, including the back item in Card
    pub item_count: usize,
    pub config: ScanningConfig,
}

impl ScanningState {
    pub fn new(config: ScanningConfig) -> Self {
        Self { config, ..Default::default() }
    }

    /// Back to an inactive menu scan, keeping the configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Position at the start of `phase`
    pub fn enter(&mut self, phase: ScanPhase) {
        self.phase = phase;
        self.current_index = 0;
        self.has_looped = false;
    }
}

/// Something observable the controller did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Started,
    Stopped,
    PhaseEntered(ScanPhase),
    Highlighted { phase: ScanPhase, index: usize, label: String },
    /// Left a phase after two full passes without a selection
    AutoReturned { from: ScanPhase, to: ScanPhase },
    MessageComposed(String),
    ConfirmationClosed,
}

/// Bounded FIFO of scan events; oldest entries drop first
#[derive(Debug)]
pub struct EventQueue {
    queue: VecDeque<ScanEvent>,
    max_size: usize,
}

impl EventQueue {
    pub const DEFAULT_SIZE: usize = 256;

    pub fn new(max_size: usize) -> Self {
        Self { queue: VecDeque::new(), max_size: max_size.max(1) }
    }

    pub fn push(&mut self, event: ScanEvent) {
        self.queue.push_back(event);
        while self.queue.len() > self.max_size {
            self.queue.pop_front();
        }
    }

    pub fn drain(&mut self) -> Vec<ScanEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize { self.queue.len() }
    pub fn is_empty(&self) -> bool { self.queue.is_empty() }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_config() {
        let config = ScanningConfig { speed_ms: 4000, ..Default::default() };
        let mut state = ScanningState::new(config.clone());
        state.is_active = true;
        state.enter(ScanPhase::Card);
        state.current_index = 3;
        state.reset();
        assert_eq!(state, ScanningState::new(config));
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let mut queue = EventQueue::new(2);
        queue.push(ScanEvent::Started);
        queue.push(ScanEvent::ConfirmationClosed);
        queue.push(ScanEvent::Stopped);
        assert_eq!(queue.drain(), vec![ScanEvent::ConfirmationClosed, ScanEvent::Stopped]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_menu_choice() {
        assert_eq!(MenuChoice::from_index(1), Some(MenuChoice::Situation));
        assert_eq!(MenuChoice::from_index(2), None);
        assert!(!ScanPhase::Menu.auto_returns());
        assert!(ScanPhase::Card.auto_returns());
    }
}

//! Switch and Key Input
//!
//! Maps keyboard keys and physical switch gestures onto the three scan
//! actions.

use crate::config::ScanMethod;
use crate::timer::TimerId;

/// The three things a user can do while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    MoveNext,
    SelectCurrent,
    GoBack,
}

/// Keys the scanner listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
}

impl Key {
    /// Action for this key under `method`
    pub fn action(self, method: ScanMethod) -> ScanAction {
        match (self, method) {
            (Key::Escape, _) => ScanAction::GoBack,
            (Key::Space, ScanMethod::Step) => ScanAction::MoveNext,
            (Key::Enter, ScanMethod::Step) => ScanAction::SelectCurrent,
            (_, ScanMethod::Auto) => ScanAction::SelectCurrent,
        }
    }
}

/// Press/release tracking for a single switch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SwitchGesture {
    pub pressed: bool,
    /// The hold timer already turned this press into a selection
    pub long_press_fired: bool,
    pub timer: Option<TimerId>,
}

impl SwitchGesture {
    /// Register a press; `false` if the switch was already down
    pub fn press(&mut self) -> bool {
        if self.pressed {
            return false;
        }
        *self = Self { pressed: true, ..Default::default() };
        true
    }

    /// Register a release; returns the pending hold timer and whether the
    /// press already fired, or `None` if the switch was not down
    pub fn release(&mut self) -> Option<(Option<TimerId>, bool)> {
        if !self.pressed {
            return None;
        }
        let outcome = (self.timer.take(), self.long_press_fired);
        *self = Self::default();
        Some(outcome)
    }
}

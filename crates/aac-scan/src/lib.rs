//! Hanmadi Switch Scanning
//!
//! Single-switch access for the AAC board.
//!
//! Features:
//! - Menu → category → card → confirmation scan hierarchy
//! - Auto (timer) and step (short/long press) methods
//! - Deterministic timers behind a clock abstraction
//! - Screen and speech collaborators as traits

pub mod config;
pub mod controller;
pub mod input;
pub mod output;
pub mod state;
pub mod timer;

pub use config::{ScanMethod, ScanningConfig};
pub use controller::ScanningController;
pub use input::{Key, ScanAction, SwitchGesture};
pub use output::{
    NavCall, NullNavigator, NullSpeech, RecordingNavigator, RecordingSpeech, SpeechCall,
    SpeechOutput, View, ViewNavigator, VoiceStyle,
};
pub use state::{labels, EventQueue, MenuChoice, ScanEvent, ScanPhase, ScanningState};
pub use timer::{Clock, ManualClock, MonotonicClock, TimerId, TimerKind, TimerQueue};

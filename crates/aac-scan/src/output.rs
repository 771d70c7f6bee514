//! Controller Outputs
//!
//! The scanning controller never touches a screen or a speech engine
//! directly. It drives two collaborators:
//! - [`ViewNavigator`]: top-level view, board slide, confirmation display
//! - [`SpeechOutput`]: scan labels and composed messages
//!
//! Null implementations ignore everything; recording implementations keep a
//! shared log that tests and headless drivers can read back.

use aac_board::SpeechSettings;
use aac_grammar::Card;
use std::cell::RefCell;
use std::rc::Rc;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Splash,
    Menu,
    App,
}

/// Voice used for an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceStyle {
    /// Short label for the highlighted item
    ScanLabel,
    /// Composed message
    Message,
    /// Emergency card; louder and slower
    Emergency,
}

impl VoiceStyle {
    /// Speaking rate for emergency messages, whatever the settings say
    pub const EMERGENCY_RATE: f32 = 0.9;

    /// Effective speaking rate under `settings`
    pub fn rate(self, settings: &SpeechSettings) -> f32 {
        match self {
            Self::Emergency => Self::EMERGENCY_RATE,
            Self::ScanLabel | Self::Message => settings.rate,
        }
    }

    /// Effective volume under `settings`
    pub fn volume(self, settings: &SpeechSettings) -> f32 {
        match self {
            Self::Emergency => 1.0,
            Self::ScanLabel | Self::Message => settings.volume,
        }
    }
}

/// Screen side of the board
pub trait ViewNavigator {
    /// Switch the top-level view
    fn set_view(&mut self, view: View);

    /// Show a board slide (0 = speak board, 1 = situation board)
    fn set_slide(&mut self, index: usize);

    /// Show the composed message full screen
    fn open_confirmation(&mut self, message: &str, cards: &[Card], emergency: bool);

    fn close_confirmation(&mut self);
}

/// Speech side of the board
pub trait SpeechOutput {
    /// Speak `text`, replacing anything already playing
    fn speak(&mut self, text: &str, style: VoiceStyle);

    fn cancel(&mut self);

    /// Apply voice parameters to every later utterance
    fn configure(&mut self, _settings: &SpeechSettings) {}
}

/// Navigator that ignores every call
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl ViewNavigator for NullNavigator {
    fn set_view(&mut self, _view: View) {}
    fn set_slide(&mut self, _index: usize) {}
    fn open_confirmation(&mut self, _message: &str, _cards: &[Card], _emergency: bool) {}
    fn close_confirmation(&mut self) {}
}

/// Speech output that stays silent
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechOutput for NullSpeech {
    fn speak(&mut self, _text: &str, _style: VoiceStyle) {}
    fn cancel(&mut self) {}
}

/// One navigator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCall {
    SetView(View),
    SetSlide(usize),
    OpenConfirmation { message: String, emergency: bool },
    CloseConfirmation,
}

/// Navigator that logs calls; clones share the log
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    log: Rc<RefCell<Vec<NavCall>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> Vec<NavCall> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Whether the confirmation display is currently open
    pub fn confirmation_open(&self) -> bool {
        self.log
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                NavCall::OpenConfirmation { .. } => Some(true),
                NavCall::CloseConfirmation => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Last view set
    pub fn view(&self) -> Option<View> {
        self.log.borrow().iter().rev().find_map(|call| match call {
            NavCall::SetView(view) => Some(*view),
            _ => None,
        })
    }
}

impl ViewNavigator for RecordingNavigator {
    fn set_view(&mut self, view: View) {
        self.log.borrow_mut().push(NavCall::SetView(view));
    }

    fn set_slide(&mut self, index: usize) {
        self.log.borrow_mut().push(NavCall::SetSlide(index));
    }

    fn open_confirmation(&mut self, message: &str, _cards: &[Card], emergency: bool) {
        self.log
            .borrow_mut()
            .push(NavCall::OpenConfirmation { message: message.to_string(), emergency });
    }

    fn close_confirmation(&mut self) {
        self.log.borrow_mut().push(NavCall::CloseConfirmation);
    }
}

/// One speech call
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCall {
    Speak { text: String, style: VoiceStyle },
    Cancel,
    Configure(SpeechSettings),
}

/// Speech output that logs calls; clones share the log
#[derive(Debug, Default, Clone)]
pub struct RecordingSpeech {
    log: Rc<RefCell<Vec<SpeechCall>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> Vec<SpeechCall> {
        self.log.borrow().clone()
    }

    /// Texts spoken, in order
    pub fn spoken(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SpeechCall::Speak { text, .. } => Some(text.clone()),
                SpeechCall::Cancel | SpeechCall::Configure(_) => None,
            })
            .collect()
    }

    /// Settings from the last `configure` call
    pub fn settings(&self) -> Option<SpeechSettings> {
        self.log.borrow().iter().rev().find_map(|call| match call {
            SpeechCall::Configure(settings) => Some(settings.clone()),
            _ => None,
        })
    }

    pub fn last_spoken(&self) -> Option<String> {
        self.spoken().pop()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&mut self, text: &str, style: VoiceStyle) {
        self.log.borrow_mut().push(SpeechCall::Speak { text: text.to_string(), style });
    }

    fn cancel(&mut self) {
        self.log.borrow_mut().push(SpeechCall::Cancel);
    }

    fn configure(&mut self, settings: &SpeechSettings) {
        self.log.borrow_mut().push(SpeechCall::Configure(settings.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_tracks_confirmation() {
        let nav = RecordingNavigator::new();
        let mut handle = nav.clone();
        assert!(!nav.confirmation_open());
        handle.open_confirmation("물 줘요", &[], false);
        assert!(nav.confirmation_open());
        handle.close_confirmation();
        assert!(!nav.confirmation_open());
    }

    #[test]
    fn test_recording_speech() {
        let speech = RecordingSpeech::new();
        let mut handle = speech.clone();
        handle.speak("말하기", VoiceStyle::ScanLabel);
        handle.cancel();
        handle.speak("상황", VoiceStyle::ScanLabel);
        assert_eq!(speech.spoken(), vec!["말하기", "상황"]);
        assert_eq!(speech.calls().len(), 3);
    }

    #[test]
    fn test_recording_speech_keeps_last_settings() {
        let speech = RecordingSpeech::new();
        let mut handle = speech.clone();
        assert_eq!(speech.settings(), None);
        handle.configure(&SpeechSettings { rate: 0.5, ..Default::default() });
        handle.configure(&SpeechSettings { rate: 1.5, ..Default::default() });
        assert_eq!(speech.settings().map(|s| s.rate), Some(1.5));
    }

    #[test]
    fn test_emergency_voice_ignores_user_rate() {
        let settings = SpeechSettings { rate: 2.0, volume: 0.2, ..Default::default() };
        assert_eq!(VoiceStyle::Message.rate(&settings), 2.0);
        assert_eq!(VoiceStyle::Emergency.rate(&settings), VoiceStyle::EMERGENCY_RATE);
        assert_eq!(VoiceStyle::Emergency.volume(&settings), 1.0);
        assert_eq!(VoiceStyle::ScanLabel.volume(&settings), 0.2);
    }
}

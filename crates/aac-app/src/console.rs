//! Terminal outputs
//!
//! Stand-ins for the screen and the speech engine: both print to stdout.

use aac_board::SpeechSettings;
use aac_grammar::Card;
use aac_scan::{SpeechOutput, View, ViewNavigator, VoiceStyle};

#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    view: Option<View>,
}

impl ViewNavigator for ConsoleNavigator {
    fn set_view(&mut self, view: View) {
        if self.view != Some(view) {
            println!("[view] {:?}", view);
            self.view = Some(view);
        }
    }

    fn set_slide(&mut self, index: usize) {
        let name = if index == 0 { "speak" } else { "situation" };
        println!("[slide] {}", name);
    }

    fn open_confirmation(&mut self, message: &str, cards: &[Card], emergency: bool) {
        let marker = if emergency { "!!" } else { "==" };
        println!("{marker} {message} {marker}  ({} cards)", cards.len());
    }

    fn close_confirmation(&mut self) {
        println!("[closed]");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleSpeech {
    settings: SpeechSettings,
}

impl SpeechOutput for ConsoleSpeech {
    fn speak(&mut self, text: &str, style: VoiceStyle) {
        tracing::trace!(
            "Voice {:?}: rate {:.1}, pitch {:.1}, volume {:.1}",
            style,
            style.rate(&self.settings),
            self.settings.pitch,
            style.volume(&self.settings)
        );
        match style {
            VoiceStyle::ScanLabel => println!("  > {text}"),
            VoiceStyle::Message => println!("  (say) {text}"),
            VoiceStyle::Emergency => println!("  (SAY) {text}"),
        }
    }

    fn configure(&mut self, settings: &SpeechSettings) {
        let voice = if settings.voice_name.is_empty() { "default" } else { settings.voice_name.as_str() };
        tracing::debug!(
            "Voice {} at rate {:.1}, pitch {:.1}, volume {:.1}",
            voice,
            settings.rate,
            settings.pitch,
            settings.volume
        );
        self.settings = settings.clone();
    }

    fn cancel(&mut self) {
        tracing::trace!("Speech cancelled");
    }
}

//! Speech Settings

use serde::{Deserialize, Serialize};

/// Voice parameters for spoken messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeechSettings {
    /// Speaking rate (0.5 - 2.0)
    pub rate: f32,
    /// Pitch (0.5 - 2.0)
    pub pitch: f32,
    /// Volume (0.0 - 1.0)
    pub volume: f32,
    /// Preferred voice; empty picks the first Korean voice
    pub voice_name: String,
    /// Speak each card as it is tapped
    pub card_speak: bool,
    /// Speak the message again when the confirmation display opens
    pub repeat_on_show: bool,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            voice_name: String::new(),
            card_speak: true,
            repeat_on_show: true,
        }
    }
}

impl SpeechSettings {
    /// Clamp values into their supported ranges
    pub fn normalized(mut self) -> Self {
        self.rate = self.rate.clamp(0.5, 2.0);
        self.pitch = self.pitch.clamp(0.5, 2.0);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}

//! Scanning Configuration

use serde::{Deserialize, Serialize};

/// How the highlight advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMethod {
    /// Timer advances; every switch input selects
    #[default]
    Auto,
    /// Short input advances; held input selects
    Step,
}

/// Scanning configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanningConfig {
    /// Auto-advance interval (ms)
    #[serde(rename = "speed")]
    pub speed_ms: u64,

    pub method: ScanMethod,

    /// Highlight color; cosmetic only
    pub highlight_color: String,

    /// Hold time that turns a step input into a selection (ms)
    pub long_press_ms: u64,
}

impl ScanningConfig {
    pub const MIN_SPEED_MS: u64 = 500;
    pub const MAX_SPEED_MS: u64 = 10_000;

    /// Clamp timings into their supported ranges
    pub fn normalized(mut self) -> Self {
        self.speed_ms = self.speed_ms.clamp(Self::MIN_SPEED_MS, Self::MAX_SPEED_MS);
        self.long_press_ms = self.long_press_ms.clamp(300, 3_000);
        self
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            speed_ms: 2000,
            method: ScanMethod::Auto,
            highlight_color: "#FF6B00".to_string(),
            long_press_ms: 1000,
        }
    }
}

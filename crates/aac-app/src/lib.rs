//! Hanmadi Board Application
//!
//! Session wiring and the terminal driver for the AAC board.

pub mod command;
pub mod config;
pub mod console;
pub mod session;

pub use command::Command;
pub use config::AppConfig;
pub use console::{ConsoleNavigator, ConsoleSpeech};
pub use session::Session;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

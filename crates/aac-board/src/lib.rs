//! Hanmadi Board
//!
//! Everything the AAC board keeps between taps.
//!
//! Features:
//! - Card catalog (categories, emergency cards, situations, suggestions)
//! - User-added cards and saved card order
//! - Selection store with derived message and subscriptions
//! - Message history
//! - Failure-tolerant key/value persistence

pub mod catalog;
pub mod data;
pub mod history;
pub mod selection;
pub mod settings;
pub mod storage;

pub use catalog::{
    BoardCatalog, CardCatalog, CardOrder, Category, SituationBoard, UserCards, VerbSuggestions,
};
pub use history::{MessageHistory, HISTORY_LIMIT};
pub use selection::{SelectionSnapshot, SelectionStore, SubscriptionId, DEFAULT_CATEGORY};
pub use settings::SpeechSettings;
pub use storage::{keys, FileStorage, MemoryStorage, Persistence, SafeStorage};

pub use aac_grammar::{Card, CardTextError, GrammarType};

/// Catalog editing error
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Card id already in use: {0}")]
    DuplicateCard(String),

    #[error("Index {index} out of range for {len} cards")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid card text: {0}")]
    InvalidText(#[from] CardTextError),
}

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Quota exceeded writing {key}: {needed} of {quota} bytes")]
    QuotaExceeded { key: String, needed: usize, quota: usize },
}

//! Hanmadi Grammar
//!
//! Card model and sentence composition for the Hanmadi AAC board.
//!
//! Features:
//! - Cards tagged with an explicit grammatical role
//! - Single predicate slot (verb-class exclusivity)
//! - Predicate-final ordering independent of tap order
//! - Korean particle (조사) attachment without spacing
//! - User card text sanitizing

pub mod card;
pub mod grammar;
pub mod sanitize;

pub use card::{Card, GrammarType, PictogramRef, EMERGENCY_CATEGORY};
pub use grammar::{
    apply_exclusivity, build_message, compose, is_verb_class, sort_for_composition,
    PARTICLE_MARKER,
};
pub use sanitize::{sanitize_keyword, sanitize_text, validate_card_text, MAX_CARD_TEXT_CHARS};

/// Card text error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardTextError {
    #[error("Card text is empty after sanitizing")]
    Empty,

    #[error("Card text too long: {0} characters (max 50)")]
    TooLong(usize),
}

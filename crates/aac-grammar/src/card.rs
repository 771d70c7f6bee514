//! Cards
//!
//! A card is one selectable symbol: a word or phrase plus its grammatical role.

use serde::{Deserialize, Serialize};

/// Category id used by the always-visible emergency cards
pub const EMERGENCY_CATEGORY: &str = "emergency";

/// Grammatical role of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarType {
    Verb,
    Particle,
    #[default]
    Noun,
    Pronoun,
    Adjective,
    Adverb,
    Question,
    Request,
    Social,
}

impl GrammarType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Verb => "verb",
            Self::Particle => "particle",
            Self::Noun => "noun",
            Self::Pronoun => "pronoun",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Question => "question",
            Self::Request => "request",
            Self::Social => "social",
        }
    }

    /// Roles that occupy the predicate slot of a sentence
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Verb | Self::Question | Self::Request)
    }
}

/// Where the card's pictogram comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PictogramRef {
    /// Search keyword for the pictogram service
    Keyword(String),
    /// Pictogram id pinned directly
    Id(u32),
    /// External image URL or data URI
    Url(String),
}

/// A selectable symbol card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub grammar_type: GrammarType,
    #[serde(default)]
    pub emergency: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictogram: Option<PictogramRef>,
}

impl Card {
    pub fn new(id: &str, text: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category: category.to_string(),
            grammar_type: GrammarType::default(),
            emergency: false,
            pictogram: None,
        }
    }

    /// Emergency card (completes an utterance on its own)
    pub fn emergency(id: &str, text: &str) -> Self {
        let mut card = Self::new(id, text, EMERGENCY_CATEGORY);
        card.emergency = true;
        card
    }

    pub fn with_grammar(mut self, grammar_type: GrammarType) -> Self {
        self.grammar_type = grammar_type;
        self
    }

    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.pictogram = Some(PictogramRef::Keyword(keyword.to_string()));
        self
    }

    pub fn with_pictogram(mut self, pictogram: PictogramRef) -> Self {
        self.pictogram = Some(pictogram);
        self
    }

    pub fn is_particle(&self) -> bool {
        self.grammar_type == GrammarType::Particle
    }

    /// User-added cards carry a generated `user_` id
    pub fn is_user_card(&self) -> bool {
        self.id.starts_with("user_")
    }
}

//! Card Catalog
//!
//! Categories, cards per category, emergency cards, verb suggestions and
//! situation boards. The scanning controller and the selection store only
//! read through [`CardCatalog`]; user card editing goes through
//! [`BoardCatalog`] directly.

use crate::data;
use crate::CatalogError;
use aac_grammar::{validate_card_text, Card, PictogramRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Card category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string() }
    }
}

/// Named, ordered card list for one real-world context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationBoard {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub cards: Vec<Card>,
}

/// Verb card id → suggested follow-up card ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbSuggestions {
    map: HashMap<String, Vec<String>>,
}

impl VerbSuggestions {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, verb_id: &str, card_ids: Vec<String>) {
        self.map.insert(verb_id.to_string(), card_ids);
    }

    pub fn get(&self, verb_id: &str) -> Option<&[String]> {
        self.map.get(verb_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}

/// Saved card order: category id → card ids
pub type CardOrder = HashMap<String, Vec<String>>;

/// User-added cards per category
pub type UserCards = HashMap<String, Vec<Card>>;

/// Read-only card source
pub trait CardCatalog {
    /// Categories in display order
    fn categories(&self) -> &[Category];

    /// Cards of a category; unknown ids yield an empty list
    fn cards_for(&self, category_id: &str) -> &[Card];

    /// Always-visible emergency cards
    fn emergency_cards(&self) -> &[Card];

    /// Full verb suggestion table
    fn verb_suggestions(&self) -> &VerbSuggestions;

    /// Situation boards in display order
    fn situation_boards(&self) -> &[SituationBoard];

    fn suggestions_for(&self, card_id: &str) -> Option<&[String]> {
        self.verb_suggestions().get(card_id)
    }

    /// Situation board by id
    fn situation(&self, situation_id: &str) -> Option<&SituationBoard> {
        self.situation_boards().iter().find(|s| s.id == situation_id)
    }

    /// Look a card up by id across categories, emergency cards and situations
    fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.categories()
            .iter()
            .flat_map(|cat| self.cards_for(&cat.id))
            .chain(self.emergency_cards())
            .chain(self.situation_boards().iter().flat_map(|s| s.cards.iter()))
            .find(|c| c.id == card_id)
    }
}

/// In-memory catalog with user card editing
#[derive(Debug, Clone, Default)]
pub struct BoardCatalog {
    categories: Vec<Category>,
    cards: HashMap<String, Vec<Card>>,
    user_cards: UserCards,
    emergency: Vec<Card>,
    suggestions: VerbSuggestions,
    situations: Vec<SituationBoard>,
}

impl BoardCatalog {
    /// Empty catalog
    pub fn new() -> Self { Self::default() }

    /// Catalog with the default Korean vocabulary
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        let mut cards = data::default_cards().into_iter().collect::<HashMap<_, _>>();
        for category in data::default_categories() {
            let list = cards.remove(&category.id).unwrap_or_default();
            catalog = catalog.with_category(category, list);
        }
        catalog.emergency = data::emergency_cards();
        catalog.suggestions = data::verb_suggestions();
        catalog.situations = data::situation_boards();
        catalog
    }

    pub fn with_category(mut self, category: Category, cards: Vec<Card>) -> Self {
        self.cards.insert(category.id.clone(), cards);
        self.categories.push(category);
        self
    }

    pub fn with_emergency(mut self, cards: Vec<Card>) -> Self {
        self.emergency = cards;
        self
    }

    pub fn with_suggestions(mut self, suggestions: VerbSuggestions) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_situation(mut self, board: SituationBoard) -> Self {
        self.situations.push(board);
        self
    }

    fn has_category(&self, category_id: &str) -> bool {
        self.cards.contains_key(category_id)
    }

    fn generate_user_card_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let base = format!("user_{}", to_base36(millis));
        let mut id = base.clone();
        let mut n = 2;
        while self.find_card(&id).is_some() {
            id = format!("{base}_{n}");
            n += 1;
        }
        id
    }

    /// Add a user card with sanitized text, appended to the category
    pub fn add_user_card(&mut self, category_id: &str, text: &str) -> Result<Card, CatalogError> {
        if !self.has_category(category_id) {
            return Err(CatalogError::UnknownCategory(category_id.to_string()));
        }
        let text = validate_card_text(text)?;
        let id = self.generate_user_card_id();
        let card = Card::new(&id, &text, category_id)
            .with_pictogram(PictogramRef::Keyword(aac_grammar::sanitize_keyword(&text)));
        self.insert_user_card(card.clone())?;
        tracing::debug!("Added user card {} to {}", card.id, category_id);
        Ok(card)
    }

    /// Insert an already-built user card (restored from storage)
    pub fn insert_user_card(&mut self, card: Card) -> Result<(), CatalogError> {
        if self.find_card(&card.id).is_some() {
            return Err(CatalogError::DuplicateCard(card.id));
        }
        let Some(list) = self.cards.get_mut(&card.category) else {
            return Err(CatalogError::UnknownCategory(card.category));
        };
        list.push(card.clone());
        self.user_cards.entry(card.category.clone()).or_default().push(card);
        Ok(())
    }

    /// Remove a user card; default cards are never removed
    pub fn delete_user_card(&mut self, category_id: &str, card_id: &str) -> bool {
        let Some(user) = self.user_cards.get_mut(category_id) else {
            return false;
        };
        let before = user.len();
        user.retain(|c| c.id != card_id);
        if user.len() == before {
            return false;
        }
        if let Some(list) = self.cards.get_mut(category_id) {
            list.retain(|c| c.id != card_id);
        }
        true
    }

    pub fn user_cards(&self) -> &UserCards {
        &self.user_cards
    }

    /// Merge saved user cards after the defaults, skipping invalid entries
    pub fn restore_user_cards(&mut self, saved: UserCards) {
        for (category_id, cards) in saved {
            for card in cards {
                if card.category != category_id {
                    tracing::warn!("User card {} filed under {}, skipping", card.id, category_id);
                    continue;
                }
                if let Err(e) = self.insert_user_card(card) {
                    tracing::warn!("Skipping saved user card: {}", e);
                }
            }
        }
    }

    /// Move a card within its category
    pub fn reorder(&mut self, category_id: &str, from: usize, to: usize) -> Result<(), CatalogError> {
        let list = self
            .cards
            .get_mut(category_id)
            .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))?;
        let len = list.len();
        if from >= len || to >= len {
            return Err(CatalogError::IndexOutOfRange { index: from.max(to), len });
        }
        let card = list.remove(from);
        list.insert(to, card);
        Ok(())
    }

    /// Current order of every category
    pub fn card_order(&self) -> CardOrder {
        self.cards
            .iter()
            .map(|(cat, cards)| (cat.clone(), cards.iter().map(|c| c.id.clone()).collect()))
            .collect()
    }

    /// Restore a saved order; ids missing from it keep their relative order at the end
    pub fn apply_card_order(&mut self, order: &CardOrder) {
        for (category_id, ids) in order {
            let Some(list) = self.cards.get_mut(category_id) else {
                continue;
            };
            let rank: HashMap<&str, usize> =
                ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
            list.sort_by_key(|c| rank.get(c.id.as_str()).copied().unwrap_or(usize::MAX));
        }
    }
}

impl CardCatalog for BoardCatalog {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn cards_for(&self, category_id: &str) -> &[Card] {
        self.cards.get(category_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn emergency_cards(&self) -> &[Card] {
        &self.emergency
    }

    fn verb_suggestions(&self) -> &VerbSuggestions {
        &self.suggestions
    }

    fn situation_boards(&self) -> &[SituationBoard] {
        &self.situations
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

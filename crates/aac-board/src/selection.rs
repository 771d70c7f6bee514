//! Selection Store
//!
//! Owns the live card selection and everything derived from it: the
//! composed message and the active verb suggestions. Every mutation runs the
//! grammar functions again, so the message can never drift from the
//! selection. Views observe changes through [`SelectionStore::subscribe`].

use crate::catalog::VerbSuggestions;
use aac_grammar::{build_message, compose, is_verb_class, Card};
use std::fmt;

/// Default category shown when a session starts
pub const DEFAULT_CATEGORY: &str = "action";

/// Subscription handle
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&SelectionSnapshot)>;

/// Copy of the observable selection state handed to listeners
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSnapshot {
    pub cards: Vec<Card>,
    pub message: String,
    pub suggestions: Option<Vec<String>>,
}

/// Live selection with derived message and suggestions
pub struct SelectionStore {
    selection: Vec<Card>,
    message: String,
    active_suggestions: Option<Vec<String>>,
    suggestions: VerbSuggestions,
    active_category: String,
    active_situation: Option<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl SelectionStore {
    pub fn new(suggestions: VerbSuggestions) -> Self {
        Self {
            selection: Vec::new(),
            message: String::new(),
            active_suggestions: None,
            suggestions,
            active_category: DEFAULT_CATEGORY.to_string(),
            active_situation: None,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Select a card under the single-predicate rule
    pub fn select_card(&mut self, card: Card) {
        let verb_class = is_verb_class(&card);
        let suggestions = if verb_class {
            self.suggestions.get(&card.id).map(<[String]>::to_vec)
        } else {
            self.active_suggestions.clone()
        };
        tracing::debug!("Select card {} (predicate: {})", card.id, verb_class);

        let (ordered, message) = compose(card, &self.selection);
        self.selection = ordered;
        self.message = message;
        self.active_suggestions = suggestions;
        self.notify();
    }

    /// Append without exclusivity; no-op if the card is already selected
    pub fn select_card_direct(&mut self, card: Card) -> bool {
        if self.is_selected(&card.id) {
            return false;
        }
        tracing::debug!("Select card {} directly", card.id);
        self.selection.push(card);
        self.recompute();
        true
    }

    /// Remove a card by id; no-op if absent
    pub fn deselect_card(&mut self, card_id: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|c| c.id != card_id);
        if self.selection.len() == before {
            return false;
        }
        self.recompute();
        true
    }

    /// Reset selection, message and suggestions
    pub fn clear_selection(&mut self) {
        let changed = !self.selection.is_empty() || self.active_suggestions.is_some();
        self.selection.clear();
        self.message.clear();
        self.active_suggestions = None;
        if changed {
            self.notify();
        }
    }

    fn recompute(&mut self) {
        self.message = build_message(&self.selection);
        self.notify();
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.selection.iter().any(|c| c.id == card_id)
    }

    pub fn selected(&self) -> &[Card] {
        &self.selection
    }

    /// Composed sentence; always `build_message(selected())`
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn active_suggestions(&self) -> Option<&[String]> {
        self.active_suggestions.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            cards: self.selection.clone(),
            message: self.message.clone(),
            suggestions: self.active_suggestions.clone(),
        }
    }

    // === Navigation context ===

    pub fn set_active_category(&mut self, category_id: &str) {
        self.active_category = category_id.to_string();
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn set_active_situation(&mut self, situation_id: Option<&str>) {
        self.active_situation = situation_id.map(str::to_string);
    }

    pub fn active_situation(&self) -> Option<&str> {
        self.active_situation.as_deref()
    }

    // === Subscriptions ===

    /// Register a listener called after every selection change
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionSnapshot) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(VerbSuggestions::new())
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selection", &self.selection)
            .field("message", &self.message)
            .field("active_suggestions", &self.active_suggestions)
            .field("active_category", &self.active_category)
            .field("active_situation", &self.active_situation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//! Sentence Composition
//!
//! Pure functions that turn a card selection into a Korean sentence.
//!
//! A sentence has a single predicate slot. Verb, question and request cards
//! (and emergency cards, which stand alone as predicates) compete for it, and
//! the predicate always lands at the end. Particles such as `~한테` bind to the
//! word before them without a space.

use crate::card::Card;

/// Marker prefix on particle card text (`~을/를`)
pub const PARTICLE_MARKER: char = '~';

/// Check whether a card occupies the predicate slot
pub fn is_verb_class(card: &Card) -> bool {
    card.emergency || card.grammar_type.is_predicate()
}

/// Add a card to a selection, evicting the previous predicate if needed.
///
/// Non-predicate cards are appended unconditionally; toggling a card that
/// is already selected is the caller's job.
pub fn apply_exclusivity(new_card: Card, selection: &[Card]) -> Vec<Card> {
    let mut next: Vec<Card> = if is_verb_class(&new_card) {
        selection.iter().filter(|c| !is_verb_class(c)).cloned().collect()
    } else {
        selection.to_vec()
    };
    next.push(new_card);
    next
}

/// Stable partition: non-predicate cards in selection order, then predicates
pub fn sort_for_composition(selection: Vec<Card>) -> Vec<Card> {
    if selection.len() <= 1 {
        return selection;
    }

    let (mut ordered, predicates): (Vec<Card>, Vec<Card>) =
        selection.into_iter().partition(|c| !is_verb_class(c));
    ordered.extend(predicates);
    ordered
}

/// Render an ordered selection as a sentence
pub fn build_message(ordered: &[Card]) -> String {
    let mut message = String::new();

    for card in ordered {
        if card.is_particle() && !message.is_empty() {
            let suffix = card.text.strip_prefix(PARTICLE_MARKER).unwrap_or(&card.text);
            message.push_str(suffix);
        } else {
            // A leading particle has nothing to attach to and reads as a word
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&card.text);
        }
    }

    message
}

/// Exclusivity, ordering and rendering in one step
pub fn compose(new_card: Card, selection: &[Card]) -> (Vec<Card>, String) {
    let ordered = sort_for_composition(apply_exclusivity(new_card, selection));
    let message = build_message(&ordered);
    (ordered, message)
}

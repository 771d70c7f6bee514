//! Input Sanitizing
//!
//! Cleans user-entered card text and pictogram keywords before they reach
//! the catalog.

use crate::CardTextError;

/// Longest accepted card text (in characters)
pub const MAX_CARD_TEXT_CHARS: usize = 50;

const MAX_TEXT_CHARS: usize = 100;
const MAX_KEYWORD_CHARS: usize = 50;

/// Strip markup characters, trim and cap at 100 characters
pub fn sanitize_text(text: &str) -> String {
    strip_markup(text).trim().chars().take(MAX_TEXT_CHARS).collect()
}

fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\'')).collect()
}

/// Keep Hangul, ASCII letters, digits and whitespace only
pub fn sanitize_keyword(keyword: &str) -> String {
    let kept: String = keyword
        .chars()
        .filter(|&c| is_hangul(c) || c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.trim().chars().take(MAX_KEYWORD_CHARS).collect()
}

/// Sanitize and validate text for a new card
pub fn validate_card_text(text: &str) -> Result<String, CardTextError> {
    // Length before the 100 character cap
    let stripped = strip_markup(text);
    let len = stripped.trim().chars().count();
    if len == 0 {
        return Err(CardTextError::Empty);
    }
    if len > MAX_CARD_TEXT_CHARS {
        return Err(CardTextError::TooLong(len));
    }
    Ok(sanitize_text(text))
}

fn is_hangul(c: char) -> bool {
    // Syllables plus compatibility jamo
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{3131}'..='\u{3163}')
}

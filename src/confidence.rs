// Lexical confidence scoring for recognized text

use crate::consts::{CURRENCY_SYMBOLS, RECEIPT_WORDS};

const DATE_SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Score how receipt-like a piece of recognized text is, in [0, 1].
///
/// Additive point system; each satisfied condition contributes
/// independently and the sum is capped at 1.0. Empty text is 0.0.
pub fn score_text(text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }

    let mut confidence = 0.0f32;

    if text.chars().count() > 10 {
        confidence += 0.2;
    }

    if text.chars().any(|c| c.is_ascii_digit()) {
        confidence += 0.3;
    }

    if text
        .chars()
        .any(|c| CURRENCY_SYMBOLS.iter().any(|&(symbol, _)| c == symbol))
    {
        confidence += 0.2;
    }

    if text.chars().any(|c| DATE_SEPARATORS.contains(&c)) {
        confidence += 0.1;
    }

    let lower = text.to_lowercase();
    if RECEIPT_WORDS.iter().any(|word| lower.contains(word)) {
        confidence += 0.2;
    }

    confidence.min(1.0)
}

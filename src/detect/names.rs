// src/detect/names.rs
//! "Looks like a personal name" heuristic, used right after the assistant
//! asked for a full name. It never votes for a language; it only lets the
//! resolver skip detection for that one reply.

use crate::lexicon::Lexicon;
use crate::normalize::clean;

fn is_name_token(tok: &str) -> bool {
    let chars: Vec<char> = tok.chars().collect();
    let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
        return false;
    };
    if !first.is_alphabetic() || !last.is_alphabetic() {
        return false;
    }
    chars
        .iter()
        .all(|&c| c.is_alphabetic() || c == '-' || c == '\'' || c == '’')
}

fn is_capitalized(tok: &str) -> bool {
    tok.chars().next().is_some_and(char::is_uppercase)
}

/// True iff the cleaned text is 1..=`max_tokens` purely alphabetic tokens
/// (inner hyphens/apostrophes allowed), has no digits, and contains no word
/// that makes it read as a sentence. Tokens must be capitalized unless the
/// whole reply is lower-case or the token is a name particle ("de", "el").
pub fn looks_like_full_name_with(text: &str, lex: &Lexicon) -> bool {
    let cleaned = clean(text);
    if cleaned.is_empty() || cleaned.chars().any(|c| c.is_numeric()) {
        return false;
    }

    let tokens: Vec<&str> = cleaned.split(' ').collect();
    if tokens.len() > lex.names.max_tokens || !tokens.iter().all(|t| is_name_token(t)) {
        return false;
    }

    let all_lower = !cleaned.chars().any(char::is_uppercase);
    for tok in &tokens {
        let lower = tok.to_lowercase();
        if lex.names.sentence_words.contains(&lower) {
            return false;
        }
        // a real Arabizi word ("kifak") is a message, not a name
        if lex.arabizi.weight(&lower).is_some_and(|w| w >= 1.0) {
            return false;
        }
        if !all_lower && !is_capitalized(tok) && !lex.names.particles.contains(&lower) {
            return false;
        }
    }
    true
}

/// [`looks_like_full_name_with`] over the embedded tables.
pub fn looks_like_full_name(text: &str) -> bool {
    looks_like_full_name_with(text, Lexicon::embedded_ref())
}

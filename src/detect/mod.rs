// src/detect/mod.rs
//! Per-message detectors. Each one is a pure function of a single message
//! and the loaded [`Lexicon`]; conversation state lives in the resolver.

pub mod arabizi;
pub mod latin;
pub mod names;
pub mod script;

use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::normalize::{alpha_len, is_url_like, tokenize};

pub use arabizi::{arabizi_score, is_arabizi};
pub use latin::{compare_curated, english_features, french_features, CuratedOutcome};
pub use names::{looks_like_full_name, looks_like_full_name_with};
pub use script::contains_arabic_script;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Script,
    Arabizi,
    French,
    English,
    Auxiliary,
}

/// One detector's verdict on one message.
///
/// `extra` is detector specific: the French scorer reports diacritics, the
/// Arabizi scorer reports "above threshold", the script test reports a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationSignal {
    pub kind: SignalKind,
    pub score: f32,
    pub hits: usize,
    pub extra: bool,
}

impl ClassificationSignal {
    pub fn script(text: &str) -> Self {
        let hits = script::arabic_char_count(text);
        Self {
            kind: SignalKind::Script,
            score: if hits > 0 { 1.0 } else { 0.0 },
            hits,
            extra: hits > 0,
        }
    }
}

/// Too little evidence to touch the conversation lock: empty, letter-free
/// (numbers, punctuation, emoji), a bare URL, or one neutral word.
///
/// Any Arabic code point is evidence, even a lone "؟" or Arabic-Indic digits.
pub fn is_low_signal(cleaned: &str, lex: &Lexicon) -> bool {
    if cleaned.trim().is_empty() {
        return true;
    }
    if contains_arabic_script(cleaned) {
        return false;
    }
    if alpha_len(cleaned) == 0 || is_url_like(cleaned) {
        return true;
    }

    let neutral = &lex.neutral.words;
    let whole = cleaned
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if neutral.contains(&whole) {
        return true;
    }

    let tokens = tokenize(cleaned);
    tokens.len() == 1 && neutral.contains(&tokens[0])
}

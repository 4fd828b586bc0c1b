// src/detect/latin.rs
//! French / English curated feature scorers and their comparison.
//!
//! Marker weights encode how grammatical a hit is: a first-person pronoun or
//! a conjugated verb counts 2.0, a generic greeting 0.5. That keeps short
//! mixed messages ("Hello, je veux un rdv") on the grammatically stronger side
//! instead of following raw word counts.

use crate::detect::{ClassificationSignal, SignalKind};
use crate::language::LanguageCode;
use crate::lexicon::{Lexicon, MarkerTable};
use crate::normalize::tokenize;

fn marker_score(tokens: &[String], table: &MarkerTable) -> (f32, usize) {
    tokens
        .iter()
        .filter_map(|t| table.weight(t))
        .fold((0.0, 0), |(s, n), w| (s + w, n + 1))
}

/// French-specific accents anywhere in `text`.
pub fn has_french_diacritics(text: &str, lex: &Lexicon) -> bool {
    let accents = &lex.french.diacritics;
    text.chars()
        .flat_map(char::to_lowercase)
        .any(|c| accents.contains(c))
}

/// `(score, hits, has_diacritics)` packed into a signal; `extra` carries the
/// diacritics flag and the score already includes the diacritic bonus.
pub fn french_features(text: &str, lex: &Lexicon) -> ClassificationSignal {
    let tokens = tokenize(text);
    let (mut score, hits) = marker_score(&tokens, &lex.french);
    let diacritics = has_french_diacritics(text, lex);
    if diacritics {
        score += lex.latin.diacritic_bonus;
    }
    ClassificationSignal {
        kind: SignalKind::French,
        score,
        hits,
        extra: diacritics,
    }
}

pub fn english_features(text: &str, lex: &Lexicon) -> ClassificationSignal {
    let tokens = tokenize(text);
    let (score, hits) = marker_score(&tokens, &lex.english);
    ClassificationSignal {
        kind: SignalKind::English,
        score,
        hits,
        extra: false,
    }
}

/// Outcome of comparing the curated French and English scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CuratedOutcome {
    /// One side leads by at least the tie margin.
    Winner { language: LanguageCode, score: f32 },
    /// Scores within the tie margin of each other (including both zero).
    Tie { score: f32 },
}

impl CuratedOutcome {
    /// Leading score, used to decide whether curated evidence is "low".
    pub fn top_score(&self) -> f32 {
        match *self {
            CuratedOutcome::Winner { score, .. } | CuratedOutcome::Tie { score } => score,
        }
    }
}

pub fn compare_curated(
    fr: &ClassificationSignal,
    en: &ClassificationSignal,
    lex: &Lexicon,
) -> CuratedOutcome {
    let top = fr.score.max(en.score);
    if (fr.score - en.score).abs() < lex.latin.tie_margin {
        return CuratedOutcome::Tie { score: top };
    }
    let language = if fr.score > en.score {
        LanguageCode::Fr
    } else {
        LanguageCode::En
    };
    CuratedOutcome::Winner {
        language,
        score: top,
    }
}

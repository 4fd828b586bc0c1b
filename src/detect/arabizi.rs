// src/detect/arabizi.rs
//! Lebanese Arabizi ("Franco") scorer over masked, lower-cased tokens.
//!
//! Score = sum of curated marker weights + `digit_weight` for every
//! substitution digit glued inside an otherwise alphabetic token. Bare
//! numbers, ordinals ("2nd", "3ème"), listed non-Arabizi tokens ("mp3",
//! "b2b") and the time placeholder never contribute. A token that is itself
//! a marker is scored once, by its marker weight.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::detect::{ClassificationSignal, SignalKind};
use crate::lexicon::Lexicon;
use crate::normalize::TIME_PLACEHOLDER;

// "2nd", "3rd", "7th", "2e", "3ème", "9ieme", "1er", "1ère"
static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:st|nd|rd|th|e|er|re|ère|eme|ème|ieme|ième)$").expect("valid ordinal regex")
});

/// Number of substitution digits in `token`, or 0 when the token is not a
/// letters-plus-substitution-digits word ("7abibi" → 1, "mp4" → 0, "2" → 0).
fn substitution_digits_in(token: &str, lex: &Lexicon) -> usize {
    if ORDINAL_RE.is_match(token) || lex.arabizi.ignored_tokens.contains(token) {
        return 0;
    }
    let mut letters = 0usize;
    let mut subs = 0usize;
    for c in token.chars() {
        if c.is_alphabetic() {
            letters += 1;
        } else if lex.substitution_digits().any(|d| d == c) {
            subs += 1;
        } else {
            return 0;
        }
    }
    if letters >= 2 && subs > 0 {
        subs
    } else {
        0
    }
}

/// Additive Arabizi confidence for masked, lower-cased `tokens`.
pub fn arabizi_score(tokens: &[String], lex: &Lexicon) -> ClassificationSignal {
    let table = &lex.arabizi;
    let placeholder = TIME_PLACEHOLDER.to_lowercase();

    let mut score = 0.0f32;
    let mut hits = 0usize;
    for tok in tokens {
        if *tok == placeholder {
            continue;
        }
        if let Some(w) = table.weight(tok) {
            score += w;
            hits += 1;
            continue;
        }
        let subs = substitution_digits_in(tok, lex);
        if subs > 0 {
            score += table.digit_weight * subs as f32;
            hits += 1;
        }
    }

    ClassificationSignal {
        kind: SignalKind::Arabizi,
        score,
        hits,
        extra: score > table.threshold,
    }
}

/// Score strictly above the configured threshold.
pub fn is_arabizi(tokens: &[String], lex: &Lexicon) -> bool {
    arabizi_score(tokens, lex).extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{mask_times, tokenize};

    fn toks(s: &str) -> Vec<String> {
        tokenize(&mask_times(s))
    }

    #[test]
    fn markers_alone_are_arabizi() {
        let lex = Lexicon::embedded();
        assert!(is_arabizi(&toks("kifak"), &lex));
        assert!(is_arabizi(&toks("shu akhbarak"), &lex));
        assert!(is_arabizi(&toks("ana bade maw3ad"), &lex));
    }

    #[test]
    fn digit_substitutions_add_up() {
        let lex = Lexicon::embedded();
        let one = arabizi_score(&toks("7ilo"), &lex);
        assert!((one.score - 0.5).abs() < 1e-6);
        assert!(!one.extra);
        let two = arabizi_score(&toks("7ilo 2ahwe"), &lex);
        assert!((two.score - 1.0).abs() < 1e-6);
        assert!(two.extra);
    }

    #[test]
    fn bare_digits_placeholder_and_other_digits_ignored() {
        let lex = Lexicon::embedded();
        assert_eq!(arabizi_score(&toks("2 3 7 9"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("mp4 h1n1 covid19"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("see you at 7pm"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("rendez-vous à 7h"), &lex).score, 0.0);
    }

    #[test]
    fn ordinals_and_listed_tokens_are_not_substitutions() {
        let lex = Lexicon::embedded();
        assert_eq!(arabizi_score(&toks("the 2nd or 3rd of May"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("le 2ème ou 3ème étage"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("7th floor, 9th room"), &lex).score, 0.0);
        assert_eq!(arabizi_score(&toks("mp3 b2b"), &lex).score, 0.0);
    }

    #[test]
    fn marker_with_digit_counts_once() {
        let lex = Lexicon::embedded();
        let sig = arabizi_score(&toks("3am works for me"), &lex);
        assert!((sig.score - 0.6).abs() < 1e-6);
        assert_eq!(sig.hits, 1);
        assert!(!sig.extra);
        assert!((arabizi_score(&toks("ma3"), &lex).score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn english_sentence_scores_nothing() {
        let lex = Lexicon::embedded();
        let sig = arabizi_score(&toks("I want appointment at 7"), &lex);
        assert_eq!(sig.hits, 0);
        assert!(!sig.extra);
    }
}

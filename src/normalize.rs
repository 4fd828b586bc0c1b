// src/normalize.rs
//! Text preparation shared by every detector: cleaning, tokenization,
//! letter counting and clock-time masking.
//!
//! Masking exists because Arabizi writes Arabic phonemes with the digits
//! 2/3/7/9 glued to letters ("7abibi", "se3er"), while clock times glue digits
//! to letters as well ("7pm", "15h30"). Every recognized time expression is
//! replaced by [`TIME_PLACEHOLDER`] before Arabizi scoring so its digits never
//! count as substitutions. Prepositions and day words are kept in place, so
//! French/English marker counts are not reduced by masking.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Opaque token substituted for every recognized time expression.
pub const TIME_PLACEHOLDER: &str = "TIMEX";

/// Hour/minute/meridiem tail shared by the prepositional and day patterns.
const CLOCK_TAIL: &str = r"\d{1,2}(?:[:.h]\d{2}|h)?(?:\s*(?:am|pm))?\b";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}").expect("valid email regex")
});
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://\S+|www\.\S+|[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.(?:com|net|org|lb|fr|io|me)(?:/\S*)?)$")
        .expect("valid url regex")
});

// "at 7", "around 5", "from 9 to 5", "à 7h", "vers 15h30", "at 3am"
static PREPOSITION_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b(at|around|about|from|to|until|till|by|before|after|between|and|vers|à|a|de|dès|entre|et|jusqu'à|avant|après)\s+{CLOCK_TAIL}"
    );
    Regex::new(&pattern).expect("valid prepositional time regex")
});

// "tomorrow 5", "demain 14h", "monday 10:30"
static DAY_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b(today|tonight|tomorrow|monday|tuesday|wednesday|thursday|friday|saturday|sunday|demain|aujourd'hui|soir|lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche|bukra|bokra)\s+{CLOCK_TAIL}"
    );
    Regex::new(&pattern).expect("valid day time regex")
});

static COLON_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}(?:\s*(?:am|pm))?\b").expect("valid colon time regex")
});

// "15h30", "7h"
static HOUR_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}h(?:\d{2})?\b").expect("valid hour separator regex"));

static MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)\b").expect("valid meridiem regex")
});

/// Collapse whitespace, trim, and drop email-shaped substrings and
/// zero-width marks (byte-order mark, zero-width space) entirely.
pub fn clean(text: &str) -> String {
    let visible: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{FEFF}' | '\u{200B}'))
        .collect();
    let without_emails = EMAIL_RE.replace_all(&visible, " ");
    WHITESPACE_RE
        .replace_all(&without_emails, " ")
        .trim()
        .to_string()
}

/// Number of letters in any script. Digits, punctuation and emoji don't count.
pub fn alpha_len(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

/// Lower-cased alphanumeric tokens. Digits stay inside their token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when the whole (cleaned) text is a single URL or bare domain.
pub fn is_url_like(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty() && !t.contains(char::is_whitespace) && URL_RE.is_match(t)
}

/// Replace every recognized clock/relative time with [`TIME_PLACEHOLDER`].
pub fn mask_times(text: &str) -> String {
    let s = PREPOSITION_TIME_RE.replace_all(text, keep_lead);
    let s = DAY_TIME_RE.replace_all(&s, keep_lead);
    let s = COLON_TIME_RE.replace_all(&s, TIME_PLACEHOLDER);
    let s = HOUR_SEPARATOR_RE.replace_all(&s, TIME_PLACEHOLDER);
    let s = MERIDIEM_RE.replace_all(&s, |caps: &Captures| {
        let m = &caps[0];
        // a glued "3am" with no preposition is the Arabizi progressive ("ana 3am ektob")
        if m.eq_ignore_ascii_case("3am") {
            m.to_string()
        } else {
            TIME_PLACEHOLDER.to_string()
        }
    });
    s.into_owned()
}

/// Keeps the leading preposition/day word and masks the clock part.
fn keep_lead(caps: &Captures) -> String {
    format!("{} {}", &caps[1], TIME_PLACEHOLDER)
}

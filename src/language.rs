// src/language.rs
//! The four language categories a conversation can be locked to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolved language of a conversation.
///
/// `Franco` is Lebanese colloquial Arabic written in Latin letters with digit
/// substitutions ("Arabizi"); `Ar` is anything written in Arabic script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Ar,
    #[default]
    En,
    Fr,
    Franco,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 4] = [
        LanguageCode::Ar,
        LanguageCode::En,
        LanguageCode::Fr,
        LanguageCode::Franco,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::Ar => "ar",
            LanguageCode::En => "en",
            LanguageCode::Fr => "fr",
            LanguageCode::Franco => "franco",
        }
    }

    /// Latin-script outcomes of the curated French/English comparison.
    pub fn is_latin_curated(self) -> bool {
        matches!(self, LanguageCode::En | LanguageCode::Fr)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = anyhow::Error;

    /// Accepts the canonical codes plus a few header-style spellings
    /// (`en-US`, `fr_FR`, `arabizi`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let primary = lower.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "ar" | "ara" | "arabic" => Ok(LanguageCode::Ar),
            "en" | "eng" | "english" => Ok(LanguageCode::En),
            "fr" | "fra" | "fre" | "french" => Ok(LanguageCode::Fr),
            "franco" | "arabizi" => Ok(LanguageCode::Franco),
            _ => anyhow::bail!("unsupported language code `{s}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_header_forms() {
        assert_eq!("ar".parse::<LanguageCode>().unwrap(), LanguageCode::Ar);
        assert_eq!("en-US".parse::<LanguageCode>().unwrap(), LanguageCode::En);
        assert_eq!("fr_FR".parse::<LanguageCode>().unwrap(), LanguageCode::Fr);
        assert_eq!(" Franco ".parse::<LanguageCode>().unwrap(), LanguageCode::Franco);
        assert!("de".parse::<LanguageCode>().is_err());
        assert!("".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        let s = serde_json::to_string(&LanguageCode::Franco).unwrap();
        assert_eq!(s, "\"franco\"");
        let back: LanguageCode = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(back, LanguageCode::Fr);
    }
}

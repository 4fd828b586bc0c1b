// src/lexicon.rs
//! Weighted marker tables and tuning constants, loaded once from TOML.
//!
//! The default tables are embedded from `config/lexicon.toml`. A different
//! file can be supplied with `LANG_LEXICON_PATH` (see [`Lexicon::from_env`])
//! or passed directly to [`Lexicon::from_path`] / [`Lexicon::from_toml_str`].
//!
//! Loading sanitizes the tables: keys are lower-cased, non-finite or
//! non-positive weights are dropped, odd tunables fall back to defaults, and
//! neutral entries written in Arabic script are removed (an Arabic message
//! must always reach the script test).

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::detect::script::contains_arabic_script;

pub const ENV_LEXICON_PATH: &str = "LANG_LEXICON_PATH";
pub const DEFAULT_LEXICON_TOML: &str = include_str!("../config/lexicon.toml");

/// Schema version understood by this build.
pub const LEXICON_VERSION: u32 = 1;

const DEFAULT_ARABIZI_THRESHOLD: f32 = 0.9;
const DEFAULT_DIGIT_WEIGHT: f32 = 0.5;
const DEFAULT_TIE_MARGIN: f32 = 0.25;
const DEFAULT_DIACRITIC_BONUS: f32 = 1.5;
const DEFAULT_LOW_SCORE: f32 = 1.0;
const DEFAULT_AUX_MIN_CONFIDENCE: f32 = 0.8;
const DEFAULT_NAME_MAX_TOKENS: usize = 4;

static EMBEDDED: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_toml_str(DEFAULT_LEXICON_TOML).expect("embedded lexicon is valid")
});

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub version: u32,
    pub arabizi: ArabiziTable,
    pub latin: LatinTuning,
    pub french: MarkerTable,
    pub english: MarkerTable,
    #[serde(default)]
    pub names: NameRules,
    #[serde(default)]
    pub neutral: NeutralList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArabiziTable {
    pub threshold: f32,
    pub digit_weight: f32,
    #[serde(default = "default_substitution_digits")]
    pub substitution_digits: String,
    /// Letter+digit tokens that are never substitutions ("mp3", "b2b").
    #[serde(default)]
    pub ignored_tokens: HashSet<String>,
    #[serde(default)]
    pub markers: HashMap<String, f32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatinTuning {
    pub tie_margin: f32,
    pub diacritic_bonus: f32,
    #[serde(default = "default_low_score")]
    pub low_score: f32,
    #[serde(default = "default_aux_min_confidence")]
    pub aux_min_confidence: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkerTable {
    /// Characters that count as language-specific accents (French only).
    #[serde(default)]
    pub diacritics: String,
    #[serde(default)]
    pub markers: HashMap<String, f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameRules {
    pub max_tokens: usize,
    #[serde(default)]
    pub particles: HashSet<String>,
    #[serde(default)]
    pub sentence_words: HashSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeutralList {
    #[serde(default)]
    pub words: HashSet<String>,
}

fn default_substitution_digits() -> String {
    "2379".to_string()
}
fn default_low_score() -> f32 {
    DEFAULT_LOW_SCORE
}
fn default_aux_min_confidence() -> f32 {
    DEFAULT_AUX_MIN_CONFIDENCE
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_NAME_MAX_TOKENS,
            particles: HashSet::new(),
            sentence_words: HashSet::new(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Lexicon {
    /// The tables compiled into the crate.
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    /// Shared view of the embedded tables, without cloning.
    pub(crate) fn embedded_ref() -> &'static Lexicon {
        &EMBEDDED
    }

    /// Parse, version-check and sanitize a TOML document.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut lex: Lexicon = toml::from_str(toml_str)
            .map_err(|e| anyhow::anyhow!("invalid lexicon TOML: {e}"))?;
        if lex.version != LEXICON_VERSION {
            anyhow::bail!(
                "unsupported lexicon version {} (expected {})",
                lex.version,
                LEXICON_VERSION
            );
        }
        lex.sanitize();
        Ok(lex)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon at {}: {}", path.display(), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// Use `LANG_LEXICON_PATH` when set, the embedded tables otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(ENV_LEXICON_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::from_path(&PathBuf::from(p.trim())),
            _ => Ok(Self::embedded()),
        }
    }

    /// Characters counted as Arabizi digit substitutions.
    pub fn substitution_digits(&self) -> impl Iterator<Item = char> + '_ {
        self.arabizi.substitution_digits.chars().filter(char::is_ascii_digit)
    }

    fn sanitize(&mut self) {
        let a = &mut self.arabizi;
        a.threshold = finite_non_negative(a.threshold, DEFAULT_ARABIZI_THRESHOLD, "arabizi.threshold");
        a.digit_weight =
            finite_non_negative(a.digit_weight, DEFAULT_DIGIT_WEIGHT, "arabizi.digit_weight");
        a.markers = sanitize_markers(std::mem::take(&mut a.markers), "arabizi");
        a.ignored_tokens = lowercase_set(std::mem::take(&mut a.ignored_tokens));

        let l = &mut self.latin;
        l.tie_margin = finite_non_negative(l.tie_margin, DEFAULT_TIE_MARGIN, "latin.tie_margin");
        l.diacritic_bonus =
            finite_non_negative(l.diacritic_bonus, DEFAULT_DIACRITIC_BONUS, "latin.diacritic_bonus");
        l.low_score = finite_non_negative(l.low_score, DEFAULT_LOW_SCORE, "latin.low_score");
        l.aux_min_confidence = finite_non_negative(
            l.aux_min_confidence,
            DEFAULT_AUX_MIN_CONFIDENCE,
            "latin.aux_min_confidence",
        )
        .min(1.0);

        self.french.markers = sanitize_markers(std::mem::take(&mut self.french.markers), "french");
        self.french.diacritics = self.french.diacritics.to_lowercase();
        self.english.markers =
            sanitize_markers(std::mem::take(&mut self.english.markers), "english");

        if self.names.max_tokens == 0 {
            self.names.max_tokens = DEFAULT_NAME_MAX_TOKENS;
        }
        self.names.particles = lowercase_set(std::mem::take(&mut self.names.particles));
        self.names.sentence_words = lowercase_set(std::mem::take(&mut self.names.sentence_words));

        let before = self.neutral.words.len();
        self.neutral.words = lowercase_set(std::mem::take(&mut self.neutral.words))
            .into_iter()
            .filter(|w| !contains_arabic_script(w))
            .collect();
        if self.neutral.words.len() < before {
            warn!(
                target: "lang_resolver",
                dropped = before - self.neutral.words.len(),
                "neutral entries in Arabic script ignored"
            );
        }
    }
}

fn finite_non_negative(v: f32, default: f32, name: &str) -> f32 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        warn!(target: "lang_resolver", %name, value = %v, "tunable out of range, using default");
        default
    }
}

fn sanitize_markers(raw: HashMap<String, f32>, table: &str) -> HashMap<String, f32> {
    let mut out = HashMap::with_capacity(raw.len());
    for (k, w) in raw {
        let key = k.trim().to_lowercase();
        if key.is_empty() || !w.is_finite() || w <= 0.0 {
            warn!(target: "lang_resolver", %table, marker = %key, "dropping invalid marker");
            continue;
        }
        out.insert(key, w);
    }
    out
}

fn lowercase_set(raw: HashSet<String>) -> HashSet<String> {
    raw.into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl MarkerTable {
    pub fn weight(&self, token: &str) -> Option<f32> {
        self.markers.get(token).copied()
    }
}

impl ArabiziTable {
    pub fn weight(&self, token: &str) -> Option<f32> {
        self.markers.get(token).copied()
    }
}

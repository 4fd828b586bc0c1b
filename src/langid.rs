// src/langid.rs
//! Auxiliary statistical language identification.
//!
//! The resolver only consults this when the curated French/English scores are
//! tied or weak. Implementations must be local and synchronous. Errors and
//! `None` are treated the same way by the caller: fall back to curated scores.
//!
//! Backends:
//! * [`DisabledIdentifier`] (default): never answers.
//! * `WhatlangIdentifier` (cargo feature `whatlang`): trigram detector.
//!
//! [`build_identifier_from_env`] picks one from `LANG_LANGID_BACKEND`.

use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::language::LanguageCode;

pub const ENV_LANGID_BACKEND: &str = "LANG_LANGID_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageGuess {
    pub language: LanguageCode,
    /// In [0,1].
    pub confidence: f32,
}

/// Narrow capability: text in, optional `(language, confidence)` out.
pub trait LanguageIdentifier: Send + Sync {
    fn identify(&self, text: &str) -> anyhow::Result<Option<LanguageGuess>>;
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}

pub type DynIdentifier = Arc<dyn LanguageIdentifier>;

/// Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledIdentifier;

impl LanguageIdentifier for DisabledIdentifier {
    fn identify(&self, _text: &str) -> anyhow::Result<Option<LanguageGuess>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(feature = "whatlang")]
pub use whatlang_backend::WhatlangIdentifier;

#[cfg(feature = "whatlang")]
mod whatlang_backend {
    use super::{LanguageGuess, LanguageIdentifier};
    use crate::language::LanguageCode;
    use whatlang::Lang;

    /// Trigram-based detector from the `whatlang` crate.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct WhatlangIdentifier;

    impl LanguageIdentifier for WhatlangIdentifier {
        fn identify(&self, text: &str) -> anyhow::Result<Option<LanguageGuess>> {
            let Some(info) = whatlang::detect(text) else {
                return Ok(None);
            };
            let language = match info.lang() {
                Lang::Eng => LanguageCode::En,
                Lang::Fra => LanguageCode::Fr,
                Lang::Ara => LanguageCode::Ar,
                _ => return Ok(None),
            };
            Ok(Some(LanguageGuess {
                language,
                confidence: (info.confidence() as f32).clamp(0.0, 1.0),
            }))
        }

        fn name(&self) -> &'static str {
            "whatlang"
        }
    }
}

/// Factory driven by `LANG_LANGID_BACKEND`:
/// * `whatlang` → trigram backend (needs the `whatlang` feature),
/// * anything else or unset → disabled.
pub fn build_identifier_from_env() -> DynIdentifier {
    let wanted = std::env::var(ENV_LANGID_BACKEND)
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match wanted.as_str() {
        "whatlang" => whatlang_or_disabled(),
        "" | "off" | "disabled" | "none" => Arc::new(DisabledIdentifier),
        other => {
            warn!(target: "lang_resolver", backend = %other, "unknown langid backend, disabled");
            Arc::new(DisabledIdentifier)
        }
    }
}

#[cfg(feature = "whatlang")]
fn whatlang_or_disabled() -> DynIdentifier {
    Arc::new(WhatlangIdentifier)
}

#[cfg(not(feature = "whatlang"))]
fn whatlang_or_disabled() -> DynIdentifier {
    warn!(target: "lang_resolver", "whatlang backend requested but feature is off");
    Arc::new(DisabledIdentifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn disabled_never_answers() {
        let id = DisabledIdentifier;
        assert!(id.identify("Bonjour tout le monde").unwrap().is_none());
        assert_eq!(id.name(), "disabled");
    }

    #[test]
    #[serial]
    fn env_factory_defaults_to_disabled() {
        std::env::remove_var(ENV_LANGID_BACKEND);
        assert_eq!(build_identifier_from_env().name(), "disabled");
        std::env::set_var(ENV_LANGID_BACKEND, "nonsense");
        assert_eq!(build_identifier_from_env().name(), "disabled");
        std::env::remove_var(ENV_LANGID_BACKEND);
    }

    #[cfg(feature = "whatlang")]
    #[test]
    fn whatlang_maps_french() {
        let guess = WhatlangIdentifier
            .identify("Bonjour, je voudrais réserver une table pour ce soir s'il vous plaît")
            .unwrap()
            .expect("a guess");
        assert_eq!(guess.language, LanguageCode::Fr);
    }
}

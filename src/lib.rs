// src/lib.rs
// Public library surface for integration tests and host services.

pub mod detect;
pub mod instruction;
pub mod langid;
pub mod language;
pub mod lexicon;
pub mod normalize;
pub mod resolver;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::detect::{looks_like_full_name, ClassificationSignal, SignalKind};
pub use crate::instruction::{instruction_for_code, system_language_instruction};
pub use crate::langid::{DisabledIdentifier, DynIdentifier, LanguageGuess, LanguageIdentifier};
pub use crate::language::LanguageCode;
pub use crate::lexicon::Lexicon;
pub use crate::normalize::{alpha_len, clean, mask_times, tokenize};
pub use crate::resolver::{
    ConversationLanguageState, LanguageResolver, Resolution, ResolutionPath, ResolveHints,
};

#[cfg(feature = "whatlang")]
pub use crate::langid::WhatlangIdentifier;

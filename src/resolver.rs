// src/resolver.rs
//! # Conversation State Resolver
//! Holds one language lock and one one-shot "expecting full name" flag per
//! conversation id, and runs the per-message decision pipeline:
//!
//! 1. load or lazily create the conversation state,
//! 2. consume the full-name flag (a name or low-signal reply keeps the lock),
//! 3. low-signal input keeps the lock untouched,
//! 4. Arabic script in the original text → `ar`,
//! 5. Arabizi score above threshold on time-masked tokens → `franco`,
//! 6. curated French/English comparison, optionally refined by the auxiliary
//!    identifier and weak hints; an undecided tie is `en`.
//!
//! Steps 2–6 for one id run under that id's mutex, so duplicate deliveries of
//! the same message see the flag read-then-clear and the decision as a unit.
//! Distinct ids never contend beyond the brief map lookup.

use serde::Serialize;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::detect::{
    arabizi_score, compare_curated, english_features, french_features, is_low_signal,
    looks_like_full_name_with, ClassificationSignal, CuratedOutcome,
};
use crate::language::LanguageCode;
use crate::langid::{DisabledIdentifier, DynIdentifier, LanguageGuess};
use crate::lexicon::Lexicon;
use crate::normalize::{clean, mask_times, tokenize};
use crate::telemetry;

/// Per-conversation state. `locked_language == None` means nothing
/// language-bearing has been seen yet; callers then get `en`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationLanguageState {
    pub locked_language: Option<LanguageCode>,
    pub expecting_full_name: bool,
}

/// Weak caller hints. They only break a French/English tie and are ignored
/// unless they name `en` or `fr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveHints {
    /// e.g. a transport `Accept-Language` / locale header.
    pub transport: Option<LanguageCode>,
    /// Explicit caller preference; outranks everything else inside a tie.
    pub override_language: Option<LanguageCode>,
}

impl ResolveHints {
    pub fn transport(code: LanguageCode) -> Self {
        Self {
            transport: Some(code),
            ..Self::default()
        }
    }

    pub fn override_language(code: LanguageCode) -> Self {
        Self {
            override_language: Some(code),
            ..Self::default()
        }
    }
}

/// Which pipeline step produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    LowSignal,
    NameSuppressed,
    Script,
    Arabizi,
    Curated,
    Auxiliary,
    Hint,
    TieDefault,
}

impl ResolutionPath {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionPath::LowSignal => "low_signal",
            ResolutionPath::NameSuppressed => "name_suppressed",
            ResolutionPath::Script => "script",
            ResolutionPath::Arabizi => "arabizi",
            ResolutionPath::Curated => "curated",
            ResolutionPath::Auxiliary => "auxiliary",
            ResolutionPath::Hint => "hint",
            ResolutionPath::TieDefault => "tie_default",
        }
    }

    /// Paths that leave the lock untouched.
    pub fn keeps_lock(self) -> bool {
        matches!(
            self,
            ResolutionPath::LowSignal | ResolutionPath::NameSuppressed
        )
    }
}

/// Full result of one `resolve` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub language: LanguageCode,
    pub previous: Option<LanguageCode>,
    pub changed: bool,
    pub path: ResolutionPath,
    pub signals: Vec<ClassificationSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<LanguageGuess>,
}

type Slot = Arc<Mutex<ConversationLanguageState>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The engine. Owns its lexicon, its auxiliary identifier and the
/// per-conversation state map for the lifetime of the hosting process.
pub struct LanguageResolver {
    lexicon: Lexicon,
    identifier: DynIdentifier,
    states: Mutex<HashMap<String, Slot>>,
}

#[derive(Default)]
pub struct LanguageResolverBuilder {
    lexicon: Option<Lexicon>,
    identifier: Option<DynIdentifier>,
}

impl LanguageResolverBuilder {
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn identifier(mut self, identifier: DynIdentifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn build(self) -> LanguageResolver {
        LanguageResolver {
            lexicon: self.lexicon.unwrap_or_default(),
            identifier: self
                .identifier
                .unwrap_or_else(|| Arc::new(DisabledIdentifier)),
            states: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageResolver {
    /// Embedded tables, no auxiliary identifier.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LanguageResolverBuilder {
        LanguageResolverBuilder::default()
    }

    /// Tables from `LANG_LEXICON_PATH` (or embedded) and the identifier
    /// selected by `LANG_LANGID_BACKEND`.
    pub fn from_env() -> anyhow::Result<Self> {
        let lexicon = Lexicon::from_env()?;
        Ok(Self::builder()
            .lexicon(lexicon)
            .identifier(crate::langid::build_identifier_from_env())
            .build())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn slot(&self, conversation_id: &str) -> Slot {
        let mut map = lock(&self.states);
        map.entry(conversation_id.to_string())
            .or_default()
            .clone()
    }

    /// Resolve without hints.
    pub fn resolve(&self, conversation_id: &str, text: &str) -> LanguageCode {
        self.resolve_detailed(conversation_id, text, ResolveHints::default())
            .language
    }

    pub fn resolve_with(
        &self,
        conversation_id: &str,
        text: &str,
        hints: ResolveHints,
    ) -> LanguageCode {
        self.resolve_detailed(conversation_id, text, hints).language
    }

    /// Run the pipeline and report how the answer was reached.
    pub fn resolve_detailed(
        &self,
        conversation_id: &str,
        text: &str,
        hints: ResolveHints,
    ) -> Resolution {
        let slot = self.slot(conversation_id);
        let mut state = lock(&slot);
        let previous = state.locked_language;

        let mut res = self.decide(&mut state, text, hints);
        res.previous = previous;
        if !res.path.keeps_lock() {
            state.locked_language = Some(res.language);
        }
        res.changed = state.locked_language != previous;
        drop(state);

        telemetry::dev_log_signals(conversation_id, &res.signals);
        telemetry::record_resolution(res.language.as_str(), res.path.as_str());
        debug!(
            target: "lang_resolver",
            id = %telemetry::anon_hash(conversation_id),
            language = %res.language,
            path = res.path.as_str(),
            changed = res.changed,
            "resolved"
        );
        res
    }

    fn decide(
        &self,
        state: &mut ConversationLanguageState,
        text: &str,
        hints: ResolveHints,
    ) -> Resolution {
        let lex = &self.lexicon;
        let current = state.locked_language.unwrap_or_default();
        let keep = |path| Resolution {
            language: current,
            previous: None,
            changed: false,
            path,
            signals: Vec::new(),
            auxiliary: None,
        };

        let cleaned = clean(text);

        // one-shot: cleared whether or not this reply turns out to be a name
        if std::mem::take(&mut state.expecting_full_name)
            && (looks_like_full_name_with(&cleaned, lex) || is_low_signal(&cleaned, lex))
        {
            return keep(ResolutionPath::NameSuppressed);
        }

        if is_low_signal(&cleaned, lex) {
            return keep(ResolutionPath::LowSignal);
        }

        let script = ClassificationSignal::script(text);
        let mut signals = vec![script];
        let decided = |language, path, signals, auxiliary| Resolution {
            language,
            previous: None,
            changed: false,
            path,
            signals,
            auxiliary,
        };
        if script.extra {
            return decided(LanguageCode::Ar, ResolutionPath::Script, signals, None);
        }

        let masked = mask_times(&cleaned);
        let arabizi = arabizi_score(&tokenize(&masked), lex);
        signals.push(arabizi);
        if arabizi.extra {
            return decided(LanguageCode::Franco, ResolutionPath::Arabizi, signals, None);
        }

        let fr = french_features(&masked, lex);
        let en = english_features(&masked, lex);
        signals.push(fr);
        signals.push(en);
        let outcome = compare_curated(&fr, &en, lex);

        let weak = matches!(outcome, CuratedOutcome::Tie { .. })
            || outcome.top_score() < lex.latin.low_score;
        let aux = if weak { self.consult_identifier(&cleaned) } else { None };

        let (language, path) = match outcome {
            CuratedOutcome::Winner { language, .. } => match aux {
                Some(g) => (g.language, ResolutionPath::Auxiliary),
                None => (language, ResolutionPath::Curated),
            },
            CuratedOutcome::Tie { .. } => {
                let latin = |c: &LanguageCode| c.is_latin_curated();
                if let Some(code) = hints.override_language.filter(latin) {
                    (code, ResolutionPath::Hint)
                } else if let Some(g) = aux {
                    (g.language, ResolutionPath::Auxiliary)
                } else if let Some(code) = hints.transport.filter(latin) {
                    (code, ResolutionPath::Hint)
                } else {
                    (LanguageCode::En, ResolutionPath::TieDefault)
                }
            }
        };
        decided(language, path, signals, aux)
    }

    /// Ask the auxiliary identifier; keep only confident `en`/`fr` guesses.
    /// Errors and panics inside the backend degrade to "no opinion".
    fn consult_identifier(&self, text: &str) -> Option<LanguageGuess> {
        let backend = self.identifier.as_ref();
        let outcome = catch_unwind(AssertUnwindSafe(|| backend.identify(text)));
        let guess = match outcome {
            Ok(Ok(g)) => g,
            Ok(Err(e)) => {
                telemetry::record_langid_failure();
                warn!(target: "lang_resolver", backend = backend.name(), error = %e, "langid failed");
                None
            }
            Err(_) => {
                telemetry::record_langid_failure();
                warn!(target: "lang_resolver", backend = backend.name(), "langid panicked");
                None
            }
        };
        guess.filter(|g| {
            g.language.is_latin_curated()
                && g.confidence.is_finite()
                && g.confidence >= self.lexicon.latin.aux_min_confidence
        })
    }

    /// Arm (or disarm) the one-shot full-name flag for the next message.
    pub fn set_expecting_full_name(&self, conversation_id: &str, expecting: bool) {
        let slot = self.slot(conversation_id);
        lock(&slot).expecting_full_name = expecting;
    }

    /// Current lock, `None` for unknown or not-yet-locked conversations.
    pub fn locked_language(&self, conversation_id: &str) -> Option<LanguageCode> {
        let slot = lock(&self.states).get(conversation_id).cloned()?;
        let locked = lock(&slot).locked_language;
        locked
    }

    pub fn expecting_full_name(&self, conversation_id: &str) -> bool {
        let Some(slot) = lock(&self.states).get(conversation_id).cloned() else {
            return false;
        };
        let flag = lock(&slot).expecting_full_name;
        flag
    }

    /// Snapshot of one conversation's state.
    pub fn state(&self, conversation_id: &str) -> Option<ConversationLanguageState> {
        let slot = lock(&self.states).get(conversation_id).cloned()?;
        let snapshot = lock(&slot).clone();
        Some(snapshot)
    }

    /// Drop a conversation's state. Returns whether it existed.
    pub fn forget(&self, conversation_id: &str) -> bool {
        lock(&self.states).remove(conversation_id).is_some()
    }

    pub fn conversation_count(&self) -> usize {
        lock(&self.states).len()
    }
}

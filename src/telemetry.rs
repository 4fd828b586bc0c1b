// src/telemetry.rs
//! Logging and metric helpers. Raw message text is never logged; conversation
//! ids are reduced to a short SHA-256 prefix.

use metrics::counter;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::detect::ClassificationSignal;

pub const METRIC_RESOLUTIONS: &str = "lang_resolver_resolutions_total";
pub const METRIC_LANGID_FAILURES: &str = "lang_resolver_langid_failures_total";

// Dev logging gate: LANG_DEV_LOG=1 AND dev env (debug build or APP_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("LANG_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("APP_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Per-detector breakdown, only when dev logging is on.
pub(crate) fn dev_log_signals(conversation_id: &str, signals: &[ClassificationSignal]) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(conversation_id);
    for s in signals {
        debug!(
            target: "lang_resolver",
            %id,
            kind = ?s.kind,
            score = s.score,
            hits = s.hits,
            extra = s.extra,
            "signal"
        );
    }
}

pub(crate) fn record_resolution(language: &'static str, path: &'static str) {
    counter!(METRIC_RESOLUTIONS, "language" => language, "path" => path).increment(1);
}

pub(crate) fn record_langid_failure() {
    counter!(METRIC_LANGID_FAILURES).increment(1);
}

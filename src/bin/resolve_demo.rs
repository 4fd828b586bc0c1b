//! Demo driver: one message per stdin line, one JSON resolution per stdout line.
//!
//! Line formats:
//!   `conversation_id<TAB>text`  resolve `text` for that conversation
//!   `text`                      resolve for conversation `demo`
//!   `!name conversation_id`     arm the full-name flag for the next message
//!
//! `RUST_LOG=lang_resolver=debug` shows decisions on stderr.

use std::io::{self, BufRead, Write};

use convo_language_resolver::{system_language_instruction, LanguageResolver, ResolveHints};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env in local/dev (LANG_LEXICON_PATH, LANG_LANGID_BACKEND, RUST_LOG).
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();

    let resolver = LanguageResolver::from_env()?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if let Some(rest) = line.strip_prefix("!name") {
            let id = rest.trim();
            resolver.set_expecting_full_name(if id.is_empty() { "demo" } else { id }, true);
            continue;
        }
        let (id, text) = line.split_once('\t').unwrap_or(("demo", line.as_str()));

        let res = resolver.resolve_detailed(id, text, ResolveHints::default());
        let row = serde_json::json!({
            "conversation": id,
            "resolution": res,
            "instruction": system_language_instruction(res.language),
        });
        writeln!(out, "{row}")?;
    }

    Ok(())
}

// tests/lexicon_config.rs
//
// Loading marker tables from a file / LANG_LEXICON_PATH and feeding them to
// the resolver. Env-touching tests are serialized.

use std::fs;
use std::path::PathBuf;

use convo_language_resolver::lexicon::{ENV_LEXICON_PATH, DEFAULT_LEXICON_TOML};
use convo_language_resolver::{LanguageCode, LanguageResolver, Lexicon};
use serial_test::serial;

/// Create a unique temporary directory in std::env::temp_dir().
fn unique_tmp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("lexicon_test_{}", nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Embedded tables with "bonjour" moved to the neutral list.
fn tuned_toml() -> String {
    DEFAULT_LEXICON_TOML.replace(
        "words = [\n    \"ok\",",
        "words = [\n    \"bonjour\", \"ok\",",
    )
}

#[test]
fn custom_neutral_list_changes_low_signal_boundary() {
    let lex = Lexicon::from_toml_str(&tuned_toml()).unwrap();
    assert!(lex.neutral.words.contains("bonjour"));

    let tuned = LanguageResolver::builder().lexicon(lex).build();
    tuned.resolve("c", "Hello, I would like to book an appointment please");
    assert_eq!(tuned.resolve("c", "Bonjour"), LanguageCode::En);

    let stock = LanguageResolver::new();
    stock.resolve("c", "Hello, I would like to book an appointment please");
    assert_eq!(stock.resolve("c", "Bonjour"), LanguageCode::Fr);
}

#[test]
fn raising_the_arabizi_threshold_needs_more_markers() {
    let doc = DEFAULT_LEXICON_TOML.replace("threshold = 0.9", "threshold = 1.5");
    let r = LanguageResolver::builder()
        .lexicon(Lexicon::from_toml_str(&doc).unwrap())
        .build();
    assert_ne!(r.resolve("a", "kifak"), LanguageCode::Franco);
    assert_eq!(r.resolve("b", "shu akhbarak"), LanguageCode::Franco);
}

#[test]
#[serial]
fn env_path_is_honoured() {
    let dir = unique_tmp_dir();
    let path = dir.join("lexicon.toml");
    fs::write(&path, tuned_toml()).unwrap();

    std::env::set_var(ENV_LEXICON_PATH, &path);
    let lex = Lexicon::from_env().unwrap();
    assert!(lex.neutral.words.contains("bonjour"));
    let r = LanguageResolver::from_env().unwrap();
    assert!(r.lexicon().neutral.words.contains("bonjour"));
    std::env::remove_var(ENV_LEXICON_PATH);

    // Cleanup (best-effort)
    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn missing_env_path_is_an_error_and_unset_is_embedded() {
    std::env::set_var(ENV_LEXICON_PATH, "__lexicon_should_not_exist__.toml");
    let err = Lexicon::from_env().unwrap_err();
    assert!(err.to_string().contains("Failed to read lexicon"));
    assert!(LanguageResolver::from_env().is_err());

    std::env::remove_var(ENV_LEXICON_PATH);
    let lex = Lexicon::from_env().unwrap();
    assert!(!lex.neutral.words.contains("bonjour"));
}

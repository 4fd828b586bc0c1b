// tests/concurrency.rs
//
// Duplicate deliveries on one conversation id must consume the full-name flag
// exactly once; distinct ids are independent.

use std::sync::{Arc, Barrier};
use std::thread;

use convo_language_resolver::{LanguageCode, LanguageResolver, ResolutionPath, ResolveHints};

#[test]
fn duplicate_deliveries_consume_the_flag_once() {
    const N: usize = 16;
    let r = Arc::new(LanguageResolver::new());
    r.resolve("dup", "مرحبا");
    r.set_expecting_full_name("dup", true);

    let barrier = Arc::new(Barrier::new(N));
    let handles: Vec<_> = (0..N)
        .map(|_| {
            let r = Arc::clone(&r);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                r.resolve_detailed("dup", "Rami Haddad", ResolveHints::default())
                    .path
            })
        })
        .collect();

    let paths: Vec<ResolutionPath> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    let suppressed = paths
        .iter()
        .filter(|p| **p == ResolutionPath::NameSuppressed)
        .count();
    assert_eq!(suppressed, 1, "paths: {paths:?}");
    assert!(!r.expecting_full_name("dup"));
}

#[test]
fn distinct_conversations_do_not_interfere() {
    let r = Arc::new(LanguageResolver::new());
    let openers = [
        ("c-ar", "مرحبا كيفك", LanguageCode::Ar),
        ("c-en", "Hello, I would like to book an appointment please", LanguageCode::En),
        ("c-fr", "Bonjour, je voudrais un rendez-vous", LanguageCode::Fr),
        ("c-franco", "shu akhbarak", LanguageCode::Franco),
    ];

    let handles: Vec<_> = openers
        .into_iter()
        .map(|(id, text, _)| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                r.resolve(id, text);
                for _ in 0..200 {
                    r.resolve(id, "ok");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked");
    }

    for (id, _, expected) in openers {
        assert_eq!(r.locked_language(id), Some(expected), "{id}");
    }
    assert_eq!(r.conversation_count(), 4);
}

// tests/metrics_emission.rs
//
// Resolution counters are emitted through the `metrics` facade with the
// language and decision path as labels.

use convo_language_resolver::telemetry::{METRIC_LANGID_FAILURES, METRIC_RESOLUTIONS};
use convo_language_resolver::{LanguageGuess, LanguageIdentifier, LanguageResolver};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use std::sync::Arc;

struct Failing;

impl LanguageIdentifier for Failing {
    fn identify(&self, _text: &str) -> anyhow::Result<Option<LanguageGuess>> {
        anyhow::bail!("offline")
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

type Row = (String, Vec<(String, String)>, u64);

fn counter_value(rows: &[Row], name: &str, label: Option<(&str, &str)>) -> u64 {
    rows.iter()
        .filter(|(n, _, _)| n == name)
        .filter(|(_, labels, _)| match label {
            Some((lk, lv)) => labels.iter().any(|(k, v)| k == lk && v == lv),
            None => true,
        })
        .map(|(_, _, c)| *c)
        .sum()
}

#[test]
fn counts_resolutions_by_path_and_langid_failures() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let r = LanguageResolver::builder()
            .identifier(Arc::new(Failing))
            .build();
        r.resolve("m", "kifak");
        r.resolve("m", "ok");
        r.resolve("m", "مرحبا");
        r.resolve("m", "Hola amigo");
    });

    let snap: Vec<Row> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(c) => {
                let labels = key
                    .key()
                    .labels()
                    .map(|l| (l.key().to_string(), l.value().to_string()))
                    .collect();
                Some((key.key().name().to_string(), labels, c))
            }
            _ => None,
        })
        .collect();
    assert_eq!(counter_value(&snap, METRIC_RESOLUTIONS, None), 4);
    assert_eq!(
        counter_value(&snap, METRIC_RESOLUTIONS, Some(("path", "arabizi"))),
        1
    );
    assert_eq!(
        counter_value(&snap, METRIC_RESOLUTIONS, Some(("path", "low_signal"))),
        1
    );
    assert_eq!(
        counter_value(&snap, METRIC_RESOLUTIONS, Some(("language", "ar"))),
        1
    );
    assert_eq!(counter_value(&snap, METRIC_LANGID_FAILURES, None), 1);
}

use proptest::prelude::*;
use serde_json::json;

use telemetry_relay::experiments::{derive_flags, split_random, BucketSplitter};
use telemetry_relay::telemetry::{anonymize, flatten_keys, flatten_values};

proptest! {
    #[test]
    fn split_residual_stays_in_range(seed in 0.0f64..1.0) {
        let (residual, decision) = split_random(seed);
        prop_assert!((0.0..1.0).contains(&residual), "residual {} from {}", residual, seed);
        prop_assert_eq!(decision, seed >= 0.5);
        prop_assert_eq!(split_random(seed), (residual, decision));
    }

    #[test]
    fn splitter_is_reproducible(seed in 0.0f64..1.0) {
        let a: Vec<bool> = BucketSplitter::new(seed).take(16).collect();
        let b: Vec<bool> = BucketSplitter::new(seed).take(16).collect();
        prop_assert_eq!(a, b);
        prop_assert_eq!(derive_flags(seed), derive_flags(seed));
    }

    #[test]
    fn anonymize_preserves_shape(input in "\\PC{0,64}") {
        let out = anonymize(&input);
        prop_assert_eq!(out.chars().count(), input.chars().count());
        for (before, after) in input.chars().zip(out.chars()) {
            if before.is_ascii_alphanumeric() {
                prop_assert!(matches!(after, '0' | 'a' | 'A'));
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn anonymize_is_idempotent(input in "[a-zA-Z0-9/._-]{0,40}") {
        let once = anonymize(&input);
        prop_assert_eq!(anonymize(&once), once.clone());
    }
}

#[test]
fn test_flatten_examples() {
    let value = json!({"a": {"b": 1, "c": 2}});
    assert_eq!(flatten_keys(&value), vec!["a.b", "a.c"]);
    let expected = json!({"a.b": 1}).as_object().cloned().unwrap();
    assert_eq!(flatten_values(&value, &["a.b"]), vec![expected]);
    assert!(flatten_values(&value, &["a.d", "x.y"]).is_empty());
    assert!(flatten_keys(&serde_json::Value::Null).is_empty());
}

//! Property tests for encode/decode invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use wordtok::{SegmenterKind, Tokenizer, UNKNOWN_TOKEN};

fn whitespace_tokenizer() -> Tokenizer {
    Tokenizer::builder()
        .segmenter(SegmenterKind::Whitespace)
        .build()
        .unwrap()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,6}",
            "[a-z]{1,3}[!?.,]",
            Just("the".to_string()),
            Just("Ünïcödé".to_string()),
        ],
        0..24,
    )
    .prop_flat_map(|words| {
        let n = words.len();
        (
            Just(words),
            prop::collection::vec(prop_oneof![Just(" "), Just("  "), Just("\t"), Just("\n ")], n),
        )
    })
    .prop_map(|(words, seps)| {
        words
            .iter()
            .zip(seps)
            .map(|(w, s)| format!("{}{}", w, s))
            .collect::<String>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_roundtrip_after_encode(text in "\\PC{0,80}") {
        let mut tokenizer = Tokenizer::new();
        let result = tokenizer.encode(&text).unwrap();
        let decoded = tokenizer.decode(&result.token_ids).unwrap();
        prop_assert_eq!(decoded, result.words.join(" "));
    }

    #[test]
    fn prop_vocab_size_is_distinct_words(text in text_strategy()) {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode(&text).unwrap();
        let distinct: HashSet<&String> = result.words.iter().collect();
        prop_assert_eq!(result.vocabulary_size, distinct.len());
        prop_assert_eq!(tokenizer.vocab_size(), distinct.len());
    }

    #[test]
    fn prop_ids_in_range_and_dense(text in "\\PC{0,80}") {
        let mut tokenizer = Tokenizer::new();
        let result = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(result.token_ids.len(), result.words.len());
        prop_assert_eq!(result.token_count, result.words.len());

        // Ids appear in first-occurrence order: each new id is exactly one
        // more than the largest seen so far.
        let mut next = 0i64;
        for &id in &result.token_ids {
            prop_assert!(id >= 0 && (id as usize) < result.vocabulary_size);
            prop_assert!(id <= next);
            if id == next {
                next += 1;
            }
        }
        prop_assert_eq!(next as usize, result.vocabulary_size);
    }

    #[test]
    fn prop_cleaned_text_is_canonical(text in text_strategy()) {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(result.cleaned_text.trim(), result.cleaned_text.as_str());
        prop_assert!(!result.cleaned_text.contains("  "));
        prop_assert_eq!(result.words.join(" "), result.cleaned_text);
    }

    #[test]
    fn prop_ids_beyond_vocab_are_unknown(text in text_strategy(), extra in 0i64..50) {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode(&text).unwrap();
        let id = result.vocabulary_size as i64 + extra;
        prop_assert_eq!(tokenizer.decode(&[id]).unwrap(), UNKNOWN_TOKEN);
    }
}

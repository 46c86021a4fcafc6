#![no_main]

use libfuzzer_sys::fuzz_target;
use lipsync_phoneme::text_to_phonemes;

fuzz_target!(|text: &str| {
    let phonemes = text_to_phonemes(text);

    let words = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .count();
    let expected = if words == 0 && !text.is_empty() { 1 } else { words };
    assert_eq!(phonemes.iter().filter(|p| p.is_pause()).count(), expected);
    if !phonemes.is_empty() {
        assert!(phonemes.last().is_some_and(|p| p.is_pause()));
    }
});

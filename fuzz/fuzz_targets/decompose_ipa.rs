#![no_main]

use libfuzzer_sys::fuzz_target;
use lipsync_phoneme::{ipa_entry, ipa_to_phonemes};

fuzz_target!(|ipa: &str| {
    for phoneme in ipa_to_phonemes(ipa) {
        assert!(phoneme.is_pause() || ipa_entry(phoneme.as_str()).is_some());
    }
});

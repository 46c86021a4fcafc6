#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lipsync_morph::{find_best_match, TargetIndex};

#[derive(Arbitrary, Debug)]
struct Input {
    candidates: Vec<String>,
    available: Vec<String>,
}

fuzz_target!(|input: Input| {
    let found = find_best_match(&input.candidates, &input.available);
    if let Some(name) = found {
        assert!(input.available.iter().any(|a| a == name));
    }

    let index = TargetIndex::new(input.available.clone());
    assert_eq!(index.resolve(&input.candidates), found);
});

//! Text and IPA decomposition into phoneme sequences
//!
//! Both decomposers are pure functions of their input and never fail.

use tracing::debug;

use crate::{ipa_entry, latin_entry, Alphabet, Phoneme};

/// Stress and syllable-boundary marks, dropped before scanning
pub const IPA_STRESS_MARKS: &[char] = &['ˈ', 'ˌ', '.'];

/// Transcription delimiters (`/.../`, `[...]`), dropped before scanning
pub const IPA_DELIMITERS: &[char] = &['/', '[', ']'];

/// Length marks, consumed without producing a phoneme
pub const IPA_LENGTH_MARKS: &[char] = &['ː', ':'];

/// Multi-character IPA clusters, matched before single symbols
pub const IPA_CLUSTERS: &[&str] = &[
    "tʃ", "dʒ", "aɪ", "aʊ", "ɔɪ", "eɪ", "oʊ", "aː", "iː", "uː", "oː", "eː",
];

/// Decompose `input` with the decomposer matching `alphabet`
pub fn decompose(alphabet: Alphabet, input: &str) -> Vec<Phoneme> {
    match alphabet {
        Alphabet::Latin => text_to_phonemes(input),
        Alphabet::Ipa => ipa_to_phonemes(input),
    }
}

/// Split free text into Latin phoneme symbols.
///
/// Lower-cases, keeps only letters and whitespace, and scans each word left
/// to right preferring a two-letter digraph from the Latin table. A pause
/// follows every word, including the last. Non-empty input with no letters
/// at all becomes a single pause.
pub fn text_to_phonemes(text: &str) -> Vec<Phoneme> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    let mut phonemes = Vec::new();
    let mut pair = String::with_capacity(8);

    for word in cleaned.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if i + 1 < chars.len() {
                pair.clear();
                pair.push(chars[i]);
                pair.push(chars[i + 1]);
                if let Some((key, _)) = latin_entry(&pair) {
                    phonemes.push(Phoneme::from_static(key));
                    i += 2;
                    continue;
                }
            }

            let single = chars[i].to_string();
            match latin_entry(&single) {
                Some((key, _)) => phonemes.push(Phoneme::from_static(key)),
                // Letters outside the table still occupy a step; the driver
                // gives them the fallback pose.
                None => phonemes.push(Phoneme::new(single)),
            }
            i += 1;
        }

        phonemes.push(Phoneme::PAUSE);
    }

    if phonemes.is_empty() && !text.is_empty() {
        phonemes.push(Phoneme::PAUSE);
    }

    phonemes
}

/// Split an IPA transcription into IPA phoneme symbols.
///
/// Stress marks and delimiters are dropped, known clusters win over single
/// symbols (longest match), bare length marks are consumed, whitespace and
/// hyphens become pauses, and anything unknown becomes schwa.
pub fn ipa_to_phonemes(ipa: &str) -> Vec<Phoneme> {
    let chars: Vec<char> = ipa
        .chars()
        .filter(|c| !IPA_STRESS_MARKS.contains(c) && !IPA_DELIMITERS.contains(c))
        .collect();

    let mut phonemes = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == '-' {
            phonemes.push(Phoneme::PAUSE);
            i += 1;
            continue;
        }

        if IPA_LENGTH_MARKS.contains(&c) {
            i += 1;
            continue;
        }

        if let Some((cluster, len)) = longest_cluster(&chars[i..]) {
            phonemes.push(Phoneme::from_static(cluster));
            i += len;
            continue;
        }

        let mut buf = [0u8; 4];
        let single: &str = c.encode_utf8(&mut buf);
        match ipa_entry(single) {
            Some((key, _)) => phonemes.push(Phoneme::from_static(key)),
            None => {
                debug!(symbol = %c, "unknown IPA symbol, falling back to schwa");
                phonemes.push(Phoneme::SCHWA);
            }
        }
        i += 1;
    }

    phonemes
}

/// Longest known cluster at the start of `chars`, with its length in chars
fn longest_cluster(chars: &[char]) -> Option<(&'static str, usize)> {
    IPA_CLUSTERS
        .iter()
        .filter_map(|cluster| {
            let len = cluster.chars().count();
            let matches = chars.len() >= len && cluster.chars().zip(chars).all(|(a, b)| a == *b);
            matches.then_some((*cluster, len))
        })
        .max_by_key(|(_, len)| *len)
}

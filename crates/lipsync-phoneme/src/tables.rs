//! Phoneme -> viseme tables
//!
//! Static, read-only data. Target names are *candidates* in preference
//! order; which one a given 3D rig actually exposes is decided later by the
//! morph target resolver.

use std::time::Duration;

/// Mouth pose for one phoneme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisemeDescriptor {
    /// Candidate shape names for the main pose, in preference order
    pub primary_targets: &'static [&'static str],
    /// Candidate shape names for a co-articulation detail (may be empty)
    pub secondary_targets: &'static [&'static str],
    /// Intensity of the primary shape [0.0 - 1.0]
    pub primary_weight: f32,
    /// Intensity of the secondary shape, `None` means the default
    pub secondary_weight: Option<f32>,
    /// Suggested on-screen duration in ms, `None` means the default
    pub duration_ms: Option<u32>,
}

impl VisemeDescriptor {
    pub const DEFAULT_SECONDARY_WEIGHT: f32 = 0.3;
    pub const DEFAULT_DURATION_MS: u32 = 120;

    pub const fn new(primary_targets: &'static [&'static str], primary_weight: f32) -> Self {
        VisemeDescriptor {
            primary_targets,
            secondary_targets: &[],
            primary_weight,
            secondary_weight: None,
            duration_ms: None,
        }
    }

    pub const fn with_secondary(
        mut self,
        targets: &'static [&'static str],
        weight: Option<f32>,
    ) -> Self {
        self.secondary_targets = targets;
        self.secondary_weight = weight;
        self
    }

    pub const fn with_duration(mut self, ms: u32) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Primary weight clamped to [0.0 - 1.0]
    pub fn primary_weight(&self) -> f32 {
        self.primary_weight.clamp(0.0, 1.0)
    }

    /// Secondary weight clamped to [0.0 - 1.0], 0.3 when unset
    pub fn secondary_weight(&self) -> f32 {
        self.secondary_weight
            .unwrap_or(Self::DEFAULT_SECONDARY_WEIGHT)
            .clamp(0.0, 1.0)
    }

    /// Suggested duration, 120ms when unset
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms.unwrap_or(Self::DEFAULT_DURATION_MS) as u64)
    }
}

/// Which table a symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// Letters and digraphs (approximate)
    Latin,
    /// IPA symbols and clusters (exact)
    Ipa,
}

/// Look up a symbol in the table for `alphabet`
pub fn lookup(alphabet: Alphabet, symbol: &str) -> Option<&'static VisemeDescriptor> {
    match alphabet {
        Alphabet::Latin => lookup_latin(symbol),
        Alphabet::Ipa => lookup_ipa(symbol),
    }
}

pub fn lookup_latin(symbol: &str) -> Option<&'static VisemeDescriptor> {
    latin_entry(symbol).map(|(_, v)| v)
}

pub fn lookup_ipa(symbol: &str) -> Option<&'static VisemeDescriptor> {
    ipa_entry(symbol).map(|(_, v)| v)
}

/// Table entry for a Latin symbol, with the table's own key
pub fn latin_entry(symbol: &str) -> Option<(&'static str, &'static VisemeDescriptor)> {
    LATIN_TABLE
        .iter()
        .find(|(key, _)| *key == symbol)
        .map(|(key, v)| (*key, v))
}

/// Table entry for an IPA symbol, with the table's own key
pub fn ipa_entry(symbol: &str) -> Option<(&'static str, &'static VisemeDescriptor)> {
    IPA_TABLE
        .iter()
        .find(|(key, _)| *key == symbol)
        .map(|(key, v)| (*key, v))
}

// Candidate name groups shared by both tables
const A_SHAPE: &[&str] = &["A", "aa", "mouthOpen", "jawOpen"];
const E_SHAPE: &[&str] = &["E", "eh", "mouthSmile"];
const I_SHAPE: &[&str] = &["I", "ee", "ih", "mouthSmile"];
const O_SHAPE: &[&str] = &["O", "oh", "mouthRound", "mouthFunnel"];
const U_SHAPE: &[&str] = &["U", "ou", "mouthPucker", "mouthFunnel"];
const SCHWA_SHAPE: &[&str] = &["mouthOpen", "jawOpen", "A"];
const CLOSED: &[&str] = &["mouthClose", "M", "PP", "mouthPress"];
const LIP_TEETH: &[&str] = &["F", "FF", "mouthRollLower"];
const DENTAL: &[&str] = &["TH", "th", "mouthOpen"];
const ALVEOLAR: &[&str] = &["DD", "D", "T", "mouthOpen"];
const VELAR: &[&str] = &["K", "kk", "mouthOpen"];
const NASAL: &[&str] = &["N", "nn", "mouthOpen"];
const SIBILANT: &[&str] = &["S", "SS", "mouthSmile"];
const POSTALVEOLAR: &[&str] = &["SH", "CH", "ch", "mouthFunnel"];
const RHOTIC: &[&str] = &["R", "rr", "mouthPucker"];
const LATERAL: &[&str] = &["L", "nn", "mouthOpen"];
const GLIDE_W: &[&str] = &["W", "U", "ou", "mouthPucker"];
const BREATH: &[&str] = &["mouthOpen", "A"];
const JAW: &[&str] = &["jawOpen", "mouthOpen"];
const OPEN: &[&str] = &["mouthOpen"];

type Entry = (&'static str, VisemeDescriptor);

/// Letters and digraphs
pub static LATIN_TABLE: &[Entry] = &[
    // digraphs
    ("th", VisemeDescriptor::new(DENTAL, 0.5).with_duration(110)),
    ("sh", VisemeDescriptor::new(POSTALVEOLAR, 0.7).with_duration(120)),
    ("ch", VisemeDescriptor::new(POSTALVEOLAR, 0.7).with_duration(120)),
    ("ph", VisemeDescriptor::new(LIP_TEETH, 0.7).with_duration(100)),
    ("ng", VisemeDescriptor::new(NASAL, 0.35).with_duration(100)),
    ("wh", VisemeDescriptor::new(GLIDE_W, 0.75).with_duration(110)),
    ("ck", VisemeDescriptor::new(VELAR, 0.45).with_duration(90)),
    ("ee", VisemeDescriptor::new(I_SHAPE, 0.9).with_secondary(OPEN, Some(0.2)).with_duration(160)),
    ("oo", VisemeDescriptor::new(U_SHAPE, 0.85).with_duration(160)),
    // vowels
    ("a", VisemeDescriptor::new(A_SHAPE, 0.9).with_secondary(JAW, None).with_duration(140)),
    ("e", VisemeDescriptor::new(E_SHAPE, 0.75).with_secondary(OPEN, Some(0.25)).with_duration(120)),
    ("i", VisemeDescriptor::new(I_SHAPE, 0.85).with_secondary(OPEN, Some(0.2)).with_duration(120)),
    ("o", VisemeDescriptor::new(O_SHAPE, 0.85).with_secondary(JAW, None).with_duration(140)),
    ("u", VisemeDescriptor::new(U_SHAPE, 0.8).with_duration(130)),
    ("y", VisemeDescriptor::new(I_SHAPE, 0.6).with_duration(100)),
    // consonants
    ("b", VisemeDescriptor::new(CLOSED, 0.9).with_duration(90)),
    ("c", VisemeDescriptor::new(VELAR, 0.4).with_duration(90)),
    ("d", VisemeDescriptor::new(ALVEOLAR, 0.4).with_duration(90)),
    ("f", VisemeDescriptor::new(LIP_TEETH, 0.7).with_duration(100)),
    ("g", VisemeDescriptor::new(VELAR, 0.4).with_duration(90)),
    ("h", VisemeDescriptor::new(BREATH, 0.25).with_duration(80)),
    ("j", VisemeDescriptor::new(POSTALVEOLAR, 0.6).with_duration(110)),
    ("k", VisemeDescriptor::new(VELAR, 0.45).with_duration(90)),
    ("l", VisemeDescriptor::new(LATERAL, 0.45).with_duration(90)),
    ("m", VisemeDescriptor::new(CLOSED, 0.9).with_duration(100)),
    ("n", VisemeDescriptor::new(NASAL, 0.4).with_duration(90)),
    ("p", VisemeDescriptor::new(CLOSED, 0.95).with_duration(80)),
    ("q", VisemeDescriptor::new(VELAR, 0.45).with_secondary(U_SHAPE, None).with_duration(90)),
    ("r", VisemeDescriptor::new(RHOTIC, 0.5).with_duration(100)),
    ("s", VisemeDescriptor::new(SIBILANT, 0.55).with_duration(100)),
    ("t", VisemeDescriptor::new(ALVEOLAR, 0.4).with_duration(80)),
    ("v", VisemeDescriptor::new(LIP_TEETH, 0.65).with_duration(100)),
    ("w", VisemeDescriptor::new(GLIDE_W, 0.75).with_duration(100)),
    ("x", VisemeDescriptor::new(VELAR, 0.45).with_secondary(SIBILANT, None).with_duration(110)),
    ("z", VisemeDescriptor::new(SIBILANT, 0.5).with_duration(100)),
];

/// IPA symbols, including the multi-character clusters
pub static IPA_TABLE: &[Entry] = &[
    // affricates
    ("tʃ", VisemeDescriptor::new(POSTALVEOLAR, 0.8).with_duration(130)),
    ("dʒ", VisemeDescriptor::new(POSTALVEOLAR, 0.75).with_duration(130)),
    // diphthongs
    ("aɪ", VisemeDescriptor::new(A_SHAPE, 0.9).with_secondary(I_SHAPE, Some(0.4)).with_duration(200)),
    ("aʊ", VisemeDescriptor::new(A_SHAPE, 0.9).with_secondary(U_SHAPE, Some(0.4)).with_duration(200)),
    ("ɔɪ", VisemeDescriptor::new(O_SHAPE, 0.85).with_secondary(I_SHAPE, Some(0.4)).with_duration(200)),
    ("eɪ", VisemeDescriptor::new(E_SHAPE, 0.8).with_secondary(I_SHAPE, Some(0.4)).with_duration(180)),
    ("oʊ", VisemeDescriptor::new(O_SHAPE, 0.85).with_secondary(U_SHAPE, Some(0.4)).with_duration(180)),
    // long vowels
    ("aː", VisemeDescriptor::new(A_SHAPE, 0.95).with_secondary(JAW, None).with_duration(180)),
    ("iː", VisemeDescriptor::new(I_SHAPE, 0.9).with_duration(170)),
    ("uː", VisemeDescriptor::new(U_SHAPE, 0.9).with_duration(170)),
    ("oː", VisemeDescriptor::new(O_SHAPE, 0.9).with_duration(180)),
    ("eː", VisemeDescriptor::new(E_SHAPE, 0.8).with_duration(170)),
    // vowels
    ("i", VisemeDescriptor::new(I_SHAPE, 0.85).with_duration(110)),
    ("ɪ", VisemeDescriptor::new(I_SHAPE, 0.7).with_secondary(OPEN, Some(0.2)).with_duration(100)),
    ("e", VisemeDescriptor::new(E_SHAPE, 0.75).with_duration(120)),
    ("ɛ", VisemeDescriptor::new(E_SHAPE, 0.7).with_secondary(OPEN, None).with_duration(120)),
    ("æ", VisemeDescriptor::new(A_SHAPE, 0.8).with_secondary(E_SHAPE, None).with_duration(130)),
    ("a", VisemeDescriptor::new(A_SHAPE, 0.9).with_secondary(JAW, None).with_duration(130)),
    ("ɑ", VisemeDescriptor::new(A_SHAPE, 0.9).with_secondary(JAW, Some(0.4)).with_duration(140)),
    ("ɒ", VisemeDescriptor::new(O_SHAPE, 0.8).with_secondary(JAW, None).with_duration(130)),
    ("ɔ", VisemeDescriptor::new(O_SHAPE, 0.8).with_duration(130)),
    ("o", VisemeDescriptor::new(O_SHAPE, 0.85).with_duration(130)),
    ("ʊ", VisemeDescriptor::new(U_SHAPE, 0.7).with_duration(110)),
    ("u", VisemeDescriptor::new(U_SHAPE, 0.85).with_duration(120)),
    ("y", VisemeDescriptor::new(U_SHAPE, 0.75).with_secondary(I_SHAPE, None).with_duration(120)),
    ("ʌ", VisemeDescriptor::new(A_SHAPE, 0.7).with_duration(110)),
    ("ə", VisemeDescriptor::new(SCHWA_SHAPE, 0.3).with_duration(90)),
    ("ɜ", VisemeDescriptor::new(E_SHAPE, 0.6).with_duration(140)),
    ("ɐ", VisemeDescriptor::new(A_SHAPE, 0.6).with_duration(100)),
    // consonants
    ("p", VisemeDescriptor::new(CLOSED, 0.95).with_duration(80)),
    ("b", VisemeDescriptor::new(CLOSED, 0.9).with_duration(80)),
    ("m", VisemeDescriptor::new(CLOSED, 0.9).with_duration(100)),
    ("f", VisemeDescriptor::new(LIP_TEETH, 0.75).with_duration(100)),
    ("v", VisemeDescriptor::new(LIP_TEETH, 0.7).with_duration(100)),
    ("θ", VisemeDescriptor::new(DENTAL, 0.55).with_duration(110)),
    ("ð", VisemeDescriptor::new(DENTAL, 0.5).with_duration(100)),
    ("t", VisemeDescriptor::new(ALVEOLAR, 0.4).with_duration(80)),
    ("d", VisemeDescriptor::new(ALVEOLAR, 0.4).with_duration(80)),
    ("n", VisemeDescriptor::new(NASAL, 0.4).with_duration(90)),
    ("s", VisemeDescriptor::new(SIBILANT, 0.55).with_duration(100)),
    ("z", VisemeDescriptor::new(SIBILANT, 0.5).with_duration(100)),
    ("ʃ", VisemeDescriptor::new(POSTALVEOLAR, 0.75).with_duration(120)),
    ("ʒ", VisemeDescriptor::new(POSTALVEOLAR, 0.7).with_duration(120)),
    ("k", VisemeDescriptor::new(VELAR, 0.45).with_duration(90)),
    ("g", VisemeDescriptor::new(VELAR, 0.45).with_duration(90)),
    ("ɡ", VisemeDescriptor::new(VELAR, 0.45).with_duration(90)),
    ("ŋ", VisemeDescriptor::new(NASAL, 0.35).with_duration(100)),
    ("h", VisemeDescriptor::new(BREATH, 0.25).with_duration(80)),
    ("l", VisemeDescriptor::new(LATERAL, 0.45).with_duration(90)),
    ("r", VisemeDescriptor::new(RHOTIC, 0.55).with_duration(100)),
    ("ɹ", VisemeDescriptor::new(RHOTIC, 0.55).with_duration(100)),
    ("ɾ", VisemeDescriptor::new(ALVEOLAR, 0.35).with_duration(60)),
    ("w", VisemeDescriptor::new(GLIDE_W, 0.8).with_duration(100)),
    ("j", VisemeDescriptor::new(I_SHAPE, 0.6).with_duration(80)),
];

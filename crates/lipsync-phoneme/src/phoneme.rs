//! Phoneme symbols

use std::borrow::Cow;
use std::fmt;

/// Sentinel symbol marking a word or segment boundary
pub const PAUSE_SYMBOL: &str = "_pause";

/// Neutral IPA vowel used for anything the IPA table does not know
pub const SCHWA_SYMBOL: &str = "ə";

/// An opaque phoneme key: a letter/digraph, an IPA symbol or cluster, or
/// the pause sentinel
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Phoneme(Cow<'static, str>);

impl Phoneme {
    pub const PAUSE: Phoneme = Phoneme(Cow::Borrowed(PAUSE_SYMBOL));
    pub const SCHWA: Phoneme = Phoneme(Cow::Borrowed(SCHWA_SYMBOL));

    /// Phoneme backed by a table key
    #[inline]
    pub const fn from_static(symbol: &'static str) -> Self {
        Phoneme(Cow::Borrowed(symbol))
    }

    #[inline]
    pub fn new(symbol: impl Into<String>) -> Self {
        Phoneme(Cow::Owned(symbol.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_pause(&self) -> bool {
        self.0 == PAUSE_SYMBOL
    }
}

impl fmt::Debug for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0)
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Phoneme {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Phoneme {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AsRef<str> for Phoneme {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

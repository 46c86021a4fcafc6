//! Identity types for playback sessions and utterances
//!
//! Both identifiers are generation counters: a newer value always
//! supersedes an older one, and anything tagged with a stale value is inert.

use std::fmt;

/// Playback session token - one per animate/speak call
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionToken(pub u64);

impl SessionToken {
    /// Token that no live session ever carries
    pub const NONE: SessionToken = SessionToken(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        SessionToken(id)
    }

    /// The token that supersedes this one
    #[inline]
    pub fn next(self) -> Self {
        SessionToken(self.0.wrapping_add(1).max(1))
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(#{})", self.0)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Utterance identity - tags speech engine lifecycle notifications
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtteranceId(pub u64);

impl UtteranceId {
    pub const ZERO: UtteranceId = UtteranceId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        UtteranceId(id)
    }

    #[inline]
    pub fn next(self) -> Self {
        UtteranceId(self.0.wrapping_add(1).max(1))
    }
}

impl fmt::Debug for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Utterance(#{})", self.0)
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_next_skips_none() {
        assert_eq!(SessionToken::NONE.next(), SessionToken::new(1));
        assert_eq!(SessionToken::new(u64::MAX).next(), SessionToken::new(1));
        assert!(!SessionToken::NONE.next().is_none());
    }

    #[test]
    fn test_tokens_are_ordered() {
        let a = SessionToken::new(3);
        assert!(a.next() > a);
        assert!(UtteranceId::new(7).next() > UtteranceId::new(7));
    }
}

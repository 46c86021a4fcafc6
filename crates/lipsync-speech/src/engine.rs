//! Speech engine seam
//!
//! The text-to-speech engine is an external collaborator. It receives an
//! [`Utterance`] and reports its lifecycle through the utterance's
//! [`UtteranceHandle`], possibly from another thread. Notifications land in
//! a shared [`SpeechMonitor`] and are picked up by the synchronizer on its
//! next poll.

use std::collections::VecDeque;
use std::sync::Arc;

use lipsync_core::{LipSyncError, LipSyncResult, UtteranceId};
use parking_lot::Mutex;
use tracing::trace;

/// Text-to-speech engine
pub trait SpeechEngine {
    /// Begin speaking. Lifecycle is reported through `utterance.handle()`.
    fn speak(&mut self, utterance: &Utterance) -> LipSyncResult<()>;

    /// Stop whatever is being spoken. Safe when silent.
    fn cancel(&mut self);

    /// Point-in-time liveness query
    fn is_speaking(&self) -> bool;

    /// Configured speaking rate, 1.0 is normal
    fn rate(&self) -> f32 {
        1.0
    }
}

/// Engine for environments without speech synthesis
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechEngine for NoSpeech {
    fn speak(&mut self, _utterance: &Utterance) -> LipSyncResult<()> {
        Err(LipSyncError::SpeechUnavailable)
    }

    fn cancel(&mut self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

/// Lifecycle notification of one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Failed(String),
}

/// One request to speak
#[derive(Debug, Clone)]
pub struct Utterance {
    id: UtteranceId,
    text: String,
    monitor: SpeechMonitor,
}

impl Utterance {
    /// Notifications are only accepted once `monitor` has been told to
    /// expect `id`, which the synchronizer does before calling the engine.
    pub fn new(id: UtteranceId, text: impl Into<String>, monitor: SpeechMonitor) -> Self {
        Utterance {
            id,
            text: text.into(),
            monitor,
        }
    }

    pub fn id(&self) -> UtteranceId {
        self.id
    }

    /// What the engine should say
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Notifier the engine keeps for its lifecycle callbacks
    pub fn handle(&self) -> UtteranceHandle {
        UtteranceHandle {
            id: self.id,
            monitor: self.monitor.clone(),
        }
    }
}

/// Cloneable, `Send` notifier bound to one utterance.
///
/// Once a newer utterance has been issued every notification through an
/// older handle is dropped.
#[derive(Debug, Clone)]
pub struct UtteranceHandle {
    id: UtteranceId,
    monitor: SpeechMonitor,
}

impl UtteranceHandle {
    pub fn id(&self) -> UtteranceId {
        self.id
    }

    pub fn started(&self) {
        self.monitor.push(self.id, SpeechEvent::Started);
    }

    pub fn ended(&self) {
        self.monitor.push(self.id, SpeechEvent::Ended);
    }

    pub fn failed(&self, message: impl Into<String>) {
        self.monitor.push(self.id, SpeechEvent::Failed(message.into()));
    }

    /// False once a newer utterance has been issued
    pub fn is_current(&self) -> bool {
        self.monitor.current() == self.id
    }
}

#[derive(Debug, Default)]
struct MonitorInner {
    current: UtteranceId,
    events: VecDeque<SpeechEvent>,
    dropped: u64,
}

/// Shared sink for engine notifications
#[derive(Debug, Clone, Default)]
pub struct SpeechMonitor {
    inner: Arc<Mutex<MonitorInner>>,
}

impl SpeechMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Utterance whose notifications are currently accepted
    pub fn current(&self) -> UtteranceId {
        self.inner.lock().current
    }

    /// Notifications dropped because they belonged to a superseded utterance
    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }

    /// Accept notifications for `id` only, discarding anything queued
    pub(crate) fn begin(&self, id: UtteranceId) {
        let mut inner = self.inner.lock();
        inner.current = id;
        inner.events.clear();
    }

    /// Take every queued notification of the current utterance
    pub(crate) fn drain(&self) -> Vec<SpeechEvent> {
        self.inner.lock().events.drain(..).collect()
    }

    fn push(&self, id: UtteranceId, event: SpeechEvent) {
        let mut inner = self.inner.lock();
        if inner.current != id {
            inner.dropped += 1;
            trace!(utterance = ?id, current = ?inner.current, ?event, "stale speech event dropped");
            return;
        }
        inner.events.push_back(event);
    }
}

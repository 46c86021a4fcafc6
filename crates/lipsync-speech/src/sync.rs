//! Speech synchronizer
//!
//! Wraps the animation driver with an externally paced clock. A speak call
//! cancels whatever came before, hands the utterance to the engine and arms
//! a session. The driver session itself starts when the engine reports the
//! utterance has started; from then on every [`SpeechSync::poll`] maps the
//! elapsed time to a phoneme index and pushes it to the driver.

use std::time::Duration;

use lipsync_anim::{AnimationDriver, FinishReason, Pacing, StepCallback};
use lipsync_core::{LipSyncError, LipSyncResult, PlaybackTime, SessionToken, UtteranceId};
use lipsync_morph::MorphMesh;
use lipsync_phoneme::{decompose, Alphabet, Phoneme};
use tracing::{debug, warn};

use crate::{PhonemeTimeline, SpeechEngine, SpeechEvent, SpeechMonitor, SyncConfig, Utterance};

/// How elapsed time is turned into a phoneme index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Uniform per-phoneme estimate, liveness polled from the engine
    Estimated,
    /// Table-driven timeline, end taken from the engine lifecycle
    Timeline,
}

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing in flight
    Idle,
    /// Utterance handed to the engine, start not reported yet
    AwaitingStart,
    /// Speaking, showing phoneme `index`
    Speaking { index: usize },
    /// The utterance closed during this poll
    Finished,
}

enum Pacer {
    Estimated {
        per_phoneme: Duration,
        expected: Duration,
    },
    Timeline(PhonemeTimeline),
}

enum Phase {
    Armed,
    Running {
        started_at: PlaybackTime,
        last_speaking_at: PlaybackTime,
        ended_at: Option<PlaybackTime>,
        session: Option<SessionToken>,
        index: Option<usize>,
    },
}

struct ActiveUtterance {
    id: UtteranceId,
    alphabet: Alphabet,
    phonemes: Vec<Phoneme>,
    pacer: Pacer,
    phase: Phase,
    on_step: Option<StepCallback>,
}

impl ActiveUtterance {
    fn session(&self) -> Option<SessionToken> {
        match self.phase {
            Phase::Armed => None,
            Phase::Running { session, .. } => session,
        }
    }
}

/// Keeps the driver aligned to one utterance at a time
pub struct SpeechSync {
    config: SyncConfig,
    monitor: SpeechMonitor,
    last_id: UtteranceId,
    active: Option<ActiveUtterance>,
}

impl SpeechSync {
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    pub fn with_config(config: SyncConfig) -> Self {
        SpeechSync {
            config,
            monitor: SpeechMonitor::new(),
            last_id: UtteranceId::ZERO,
            active: None,
        }
    }

    /// Speak `text`, animating the Latin decomposition on the estimated clock
    pub fn speak_text<E: SpeechEngine + ?Sized>(
        &mut self,
        text: &str,
        on_step: Option<StepCallback>,
        engine: &mut E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
    ) -> LipSyncResult<UtteranceId> {
        let phonemes = decompose(Alphabet::Latin, text);
        let rate = engine.rate();
        let pacer = Pacer::Estimated {
            per_phoneme: self.config.per_phoneme_estimate(rate),
            expected: self.config.expected_duration(phonemes.len(), rate),
        };
        self.speak(text, Alphabet::Latin, phonemes, pacer, on_step, engine, driver, now)
    }

    /// Speak `text`, animating the `ipa` transcription on a precomputed timeline
    pub fn speak_ipa<E: SpeechEngine + ?Sized>(
        &mut self,
        text: &str,
        ipa: &str,
        on_step: Option<StepCallback>,
        engine: &mut E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
    ) -> LipSyncResult<UtteranceId> {
        let phonemes = decompose(Alphabet::Ipa, ipa);
        let timeline =
            PhonemeTimeline::build(Alphabet::Ipa, &phonemes, driver.config(), driver.speed());
        let pacer = Pacer::Timeline(timeline);
        self.speak(text, Alphabet::Ipa, phonemes, pacer, on_step, engine, driver, now)
    }

    /// Cancel the utterance in flight, if any, and stop the driver
    pub fn stop<E: SpeechEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
    ) {
        let armed = match self.active.take() {
            Some(active) => {
                debug!(utterance = ?active.id, "utterance cancelled");
                true
            }
            None => false,
        };
        // an armed utterance may not have started yet, so liveness alone misses it
        if armed || engine.is_speaking() {
            engine.cancel();
        }
        driver.stop(now);
    }

    /// Pick up engine notifications and push the current phoneme to the driver.
    ///
    /// Call every frame while an utterance is in flight. An engine failure is
    /// returned as [`LipSyncError::SpeechEngine`] after the session has been
    /// closed with the fast decay.
    pub fn poll<E: SpeechEngine + ?Sized, M: MorphMesh>(
        &mut self,
        engine: &E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
        meshes: &[M],
    ) -> LipSyncResult<SyncStatus> {
        if self.active.is_none() {
            return Ok(SyncStatus::Idle);
        }

        for event in self.monitor.drain() {
            match event {
                SpeechEvent::Started => self.on_started(driver, now, meshes),
                SpeechEvent::Ended => {
                    if self.on_ended(driver, now) {
                        return Ok(SyncStatus::Finished);
                    }
                }
                SpeechEvent::Failed(message) => {
                    self.fail(driver, now, &message);
                    return Err(LipSyncError::SpeechEngine(message));
                }
            }
        }

        Ok(self.follow(engine, driver, now))
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Shared notification sink
    pub fn monitor(&self) -> &SpeechMonitor {
        &self.monitor
    }

    /// Utterance in flight
    pub fn current(&self) -> Option<UtteranceId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn mode(&self) -> Option<SyncMode> {
        self.active.as_ref().map(|a| match a.pacer {
            Pacer::Estimated { .. } => SyncMode::Estimated,
            Pacer::Timeline(_) => SyncMode::Timeline,
        })
    }

    /// Timeline of the utterance in flight, timeline mode only
    pub fn timeline(&self) -> Option<&PhonemeTimeline> {
        match self.active.as_ref().map(|a| &a.pacer) {
            Some(Pacer::Timeline(timeline)) => Some(timeline),
            _ => None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn speak<E: SpeechEngine + ?Sized>(
        &mut self,
        text: &str,
        alphabet: Alphabet,
        phonemes: Vec<Phoneme>,
        pacer: Pacer,
        on_step: Option<StepCallback>,
        engine: &mut E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
    ) -> LipSyncResult<UtteranceId> {
        if let Some(prior) = self.active.take() {
            debug!(utterance = ?prior.id, "utterance superseded");
            engine.cancel();
        } else if engine.is_speaking() {
            engine.cancel();
        }
        driver.stop(now);

        let id = self.last_id.next();
        self.last_id = id;
        self.monitor.begin(id);

        let utterance = Utterance::new(id, text, self.monitor.clone());
        if let Err(err) = engine.speak(&utterance) {
            warn!(utterance = ?id, error = %err, "speech engine refused utterance");
            return Err(err);
        }

        debug!(utterance = ?id, phonemes = phonemes.len(), ?alphabet, "utterance armed");
        self.active = Some(ActiveUtterance {
            id,
            alphabet,
            phonemes,
            pacer,
            phase: Phase::Armed,
            on_step,
        });
        Ok(id)
    }

    fn on_started<M: MorphMesh>(
        &mut self,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
        meshes: &[M],
    ) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if !matches!(active.phase, Phase::Armed) {
            return;
        }

        let session = driver.start(
            active.alphabet,
            active.phonemes.clone(),
            Pacing::External,
            active.on_step.take(),
            now,
            meshes,
        );
        debug!(utterance = ?active.id, ?session, "utterance started");
        active.phase = Phase::Running {
            started_at: now,
            last_speaking_at: now,
            ended_at: None,
            session,
            index: None,
        };
    }

    /// Returns true if the utterance closed
    fn on_ended(&mut self, driver: &mut AnimationDriver, now: PlaybackTime) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        match &mut active.phase {
            Phase::Armed => {
                debug!(utterance = ?active.id, "utterance ended before it started");
                self.active = None;
                true
            }
            Phase::Running { ended_at, session, .. } => {
                ended_at.get_or_insert(now);
                if owns(driver, *session) {
                    driver.mark_speech_ended(now);
                }
                false
            }
        }
    }

    fn fail(&mut self, driver: &mut AnimationDriver, now: PlaybackTime, message: &str) {
        if let Some(active) = self.active.take() {
            warn!(utterance = ?active.id, error = message, "speech engine error");
            if owns(driver, active.session()) {
                driver.finish(now, FinishReason::EngineError);
            }
        }
    }

    fn complete(&mut self, driver: &mut AnimationDriver, now: PlaybackTime, why: &str) -> SyncStatus {
        if let Some(active) = self.active.take() {
            debug!(utterance = ?active.id, why, "utterance closed");
            if owns(driver, active.session()) {
                driver.finish(now, FinishReason::Completed);
            }
        }
        SyncStatus::Finished
    }

    fn follow<E: SpeechEngine + ?Sized>(
        &mut self,
        engine: &E,
        driver: &mut AnimationDriver,
        now: PlaybackTime,
    ) -> SyncStatus {
        let grace = self.config.end_grace;
        let Some(active) = self.active.as_mut() else {
            return SyncStatus::Idle;
        };
        let Phase::Running {
            started_at,
            last_speaking_at,
            ended_at,
            session,
            index,
        } = &mut active.phase
        else {
            return SyncStatus::AwaitingStart;
        };

        let quiet_since = match active.pacer {
            Pacer::Estimated { .. } => {
                if ended_at.is_none() && engine.is_speaking() {
                    *last_speaking_at = now;
                    None
                } else {
                    Some(*last_speaking_at)
                }
            }
            Pacer::Timeline(_) => *ended_at,
        };
        if quiet_since.is_some_and(|since| now - since > grace) {
            return self.complete(driver, now, "speech ended");
        }

        let elapsed = now - *started_at;
        let next = match &active.pacer {
            Pacer::Estimated {
                per_phoneme,
                expected,
            } => {
                if elapsed >= *expected {
                    return self.complete(driver, now, "expected duration reached");
                }
                (elapsed.as_micros() / per_phoneme.as_micros().max(1)) as usize
            }
            Pacer::Timeline(timeline) => match timeline.index_at(elapsed) {
                Some(i) => i,
                None => return self.complete(driver, now, "timeline exhausted"),
            },
        };

        if *index != Some(next) {
            *index = Some(next);
            if owns(driver, *session) {
                driver.step_to(next, now);
            }
        }
        SyncStatus::Speaking { index: next }
    }
}

impl Default for SpeechSync {
    fn default() -> Self {
        Self::new()
    }
}

/// True if the driver's live session is the one this utterance started
fn owns(driver: &AnimationDriver, session: Option<SessionToken>) -> bool {
    session.is_some() && driver.session().map(|s| s.token()) == session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoSpeech, UtteranceHandle};
    use lipsync_anim::DriverState;
    use lipsync_morph::MeshHandle;

    struct FakeEngine {
        handle: Option<UtteranceHandle>,
        speaking: bool,
        rate: f32,
        cancelled: usize,
        said: Vec<String>,
    }

    impl FakeEngine {
        fn new() -> Self {
            FakeEngine {
                handle: None,
                speaking: false,
                rate: 1.0,
                cancelled: 0,
                said: Vec::new(),
            }
        }

        fn start(&mut self) {
            self.speaking = true;
            self.handle.as_ref().unwrap().started();
        }

        fn end(&mut self) {
            self.speaking = false;
            self.handle.as_ref().unwrap().ended();
        }
    }

    impl SpeechEngine for FakeEngine {
        fn speak(&mut self, utterance: &Utterance) -> LipSyncResult<()> {
            self.said.push(utterance.text().to_string());
            self.handle = Some(utterance.handle());
            Ok(())
        }

        fn cancel(&mut self) {
            self.speaking = false;
            self.cancelled += 1;
        }

        fn is_speaking(&self) -> bool {
            self.speaking
        }

        fn rate(&self) -> f32 {
            self.rate
        }
    }

    fn ms(v: u64) -> PlaybackTime {
        PlaybackTime::from_millis(v)
    }

    fn rig() -> Vec<MeshHandle> {
        vec![MeshHandle::with_targets(["mouthOpen", "A", "I", "ee"])]
    }

    #[test]
    fn test_estimated_mode_uniform_steps() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hi", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        assert_eq!(engine.said, vec!["hi"]);
        assert_eq!(sync.mode(), Some(SyncMode::Estimated));

        let status = sync.poll(&engine, &mut driver, ms(50), &meshes).unwrap();
        assert_eq!(status, SyncStatus::AwaitingStart);
        assert_eq!(driver.state(), DriverState::Idle);

        engine.start();
        let poll = |sync: &mut SpeechSync, driver: &mut AnimationDriver, t| {
            sync.poll(&engine, driver, ms(t), &meshes).unwrap()
        };
        assert_eq!(poll(&mut sync, &mut driver, 100), SyncStatus::Speaking { index: 0 });
        assert!(driver.is_animating());
        assert_eq!(driver.session().unwrap().pacing(), Pacing::External);

        // 80ms per phoneme: 100ms x 0.8 at rate 1.0
        assert_eq!(poll(&mut sync, &mut driver, 179), SyncStatus::Speaking { index: 0 });
        assert_eq!(poll(&mut sync, &mut driver, 180), SyncStatus::Speaking { index: 1 });
        assert_eq!(driver.session().unwrap().current_phoneme().unwrap(), &"i");
        assert_eq!(poll(&mut sync, &mut driver, 260), SyncStatus::Speaking { index: 2 });
        assert_eq!(poll(&mut sync, &mut driver, 340), SyncStatus::Finished);
        assert!(!driver.is_animating());
        assert!(!sync.is_active());
    }

    #[test]
    fn test_estimated_mode_scales_with_engine_rate() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        engine.rate = 2.0;
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hi", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();
        let status = sync.poll(&engine, &mut driver, ms(40), &meshes).unwrap();
        assert_eq!(status, SyncStatus::Speaking { index: 1 });
    }

    #[test]
    fn test_estimated_mode_closes_when_engine_goes_quiet() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hello there everyone", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();
        sync.poll(&engine, &mut driver, ms(50), &meshes).unwrap();

        // liveness drops without an end notification
        engine.speaking = false;
        let status = sync.poll(&engine, &mut driver, ms(90), &meshes).unwrap();
        assert!(matches!(status, SyncStatus::Speaking { .. }));
        let steps = driver.stats().steps;

        let status = sync.poll(&engine, &mut driver, ms(101), &meshes).unwrap();
        assert_eq!(status, SyncStatus::Finished);
        assert!(!driver.is_animating());

        sync.poll(&engine, &mut driver, ms(400), &meshes).unwrap();
        assert_eq!(driver.stats().steps, steps);
    }

    #[test]
    fn test_timeline_mode_uses_table_durations() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_ipa("hi", "haɪ", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        assert_eq!(engine.said, vec!["hi"]);
        let timeline = sync.timeline().unwrap().clone();
        assert_eq!(timeline.len(), 2);
        let first = timeline.entries()[0].duration.as_millis() as u64;

        engine.start();
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(10), &meshes).unwrap(),
            SyncStatus::Speaking { index: 0 }
        );
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(10 + first), &meshes).unwrap(),
            SyncStatus::Speaking { index: 1 }
        );
        assert_eq!(driver.session().unwrap().current_phoneme().unwrap(), &"aɪ");

        let end = 10 + timeline.total().as_millis() as u64;
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(end), &meshes).unwrap(),
            SyncStatus::Finished
        );
        assert_eq!(driver.state(), DriverState::StoppingTransition);
    }

    #[test]
    fn test_timeline_mode_honours_speed() {
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_ipa("hi", "haɪ", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        let normal = sync.timeline().unwrap().total();

        driver.set_speed(2.0);
        sync.speak_ipa("hi", "haɪ", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        assert_eq!(sync.timeline().unwrap().total(), normal / 2);
    }

    #[test]
    fn test_timeline_mode_end_grace() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_ipa("millennium", "mɪˈliːniəm", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        assert!(sync.timeline().unwrap().total() > Duration::from_millis(300));
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();

        engine.end();
        let status = sync.poll(&engine, &mut driver, ms(100), &meshes).unwrap();
        assert!(matches!(status, SyncStatus::Speaking { .. }));
        assert_eq!(driver.session().unwrap().speech_ended_at(), Some(ms(100)));

        let status = sync.poll(&engine, &mut driver, ms(150), &meshes).unwrap();
        assert!(matches!(status, SyncStatus::Speaking { .. }));

        let status = sync.poll(&engine, &mut driver, ms(151), &meshes).unwrap();
        assert_eq!(status, SyncStatus::Finished);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_engine_error_closes_fast() {
        let mut meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("aaaa", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();
        driver.tick(ms(40), &mut meshes);
        assert!(meshes[0].influence("A").unwrap() > 0.0);

        engine.handle.as_ref().unwrap().failed("synthesis-failed");
        let err = sync.poll(&engine, &mut driver, ms(40), &meshes).unwrap_err();
        assert_eq!(err, LipSyncError::SpeechEngine("synthesis-failed".into()));
        assert!(!sync.is_active());
        assert_eq!(driver.state(), DriverState::StoppingTransition);

        driver.tick(ms(140), &mut meshes);
        assert_eq!(driver.state(), DriverState::Idle);
        assert!(meshes[0].influences().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_speak_again_cancels_prior() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        let first = sync
            .speak_text("first words", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();
        let old_handle = engine.handle.clone().unwrap();
        let old_session = driver.session().unwrap().token();

        let second = sync
            .speak_text("second", None, &mut engine, &mut driver, ms(30))
            .unwrap();
        assert!(second > first);
        assert_eq!(engine.cancelled, 1);
        assert!(!driver.is_animating());

        // late notifications from the cancelled utterance change nothing
        old_handle.ended();
        old_handle.failed("interrupted");
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(40), &meshes).unwrap(),
            SyncStatus::AwaitingStart
        );
        assert_eq!(sync.monitor().dropped(), 2);

        engine.start();
        sync.poll(&engine, &mut driver, ms(50), &meshes).unwrap();
        assert!(driver.session().unwrap().token() > old_session);
        assert_eq!(sync.current(), Some(second));
    }

    #[test]
    fn test_unavailable_engine() {
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        let err = sync
            .speak_text("hi", None, &mut NoSpeech, &mut driver, ms(0))
            .unwrap_err();
        assert_eq!(err, LipSyncError::SpeechUnavailable);
        assert!(!sync.is_active());
    }

    #[test]
    fn test_stop_cancels_engine() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hello", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap();

        sync.stop(&mut engine, &mut driver, ms(20));
        assert_eq!(engine.cancelled, 1);
        assert!(!driver.is_animating());
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(30), &meshes).unwrap(),
            SyncStatus::Idle
        );
    }

    #[test]
    fn test_stop_before_start_cancels_engine() {
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hello", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        sync.stop(&mut engine, &mut driver, ms(5));
        assert_eq!(engine.cancelled, 1);
        assert!(!sync.is_active());
    }

    #[test]
    fn test_ended_before_start() {
        let meshes = rig();
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_ipa("hi", "haɪ", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.end();
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(10), &meshes).unwrap(),
            SyncStatus::Finished
        );
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn test_inert_meshes_still_track_speech() {
        let meshes: Vec<MeshHandle> = vec![];
        let mut engine = FakeEngine::new();
        let mut driver = AnimationDriver::new();
        let mut sync = SpeechSync::new();

        sync.speak_text("hi", None, &mut engine, &mut driver, ms(0))
            .unwrap();
        engine.start();
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(0), &meshes).unwrap(),
            SyncStatus::Speaking { index: 0 }
        );
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(
            sync.poll(&engine, &mut driver, ms(500), &meshes).unwrap(),
            SyncStatus::Finished
        );
    }
}

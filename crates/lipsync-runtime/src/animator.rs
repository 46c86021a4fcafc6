//! Animator - one handle over driver, synchronizer, clock and engine

use std::time::Duration;

use lipsync_anim::{AnimationConfig, AnimationDriver, DriverState, DriverStats, StepCallback};
use lipsync_core::{LipSyncError, LipSyncResult, PlaybackTime, SessionToken, UtteranceId};
use lipsync_morph::{is_inert, set_influence, MorphMesh};
use lipsync_speech::{NoSpeech, SpeechEngine, SpeechMonitor, SpeechSync, SyncConfig, SyncStatus};
use lipsync_time::{Clock, MonotonicClock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Animator configuration
#[derive(Clone, Debug)]
pub struct AnimatorConfig {
    pub animation: AnimationConfig,
    pub sync: SyncConfig,
    /// Frame period of [`Animator::run_until_idle`]
    pub frame_interval: Duration,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            animation: AnimationConfig::default(),
            sync: SyncConfig::default(),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl AnimatorConfig {
    pub fn validate(&self) -> LipSyncResult<()> {
        self.animation.validate()?;
        self.sync.validate()?;
        if self.frame_interval.is_zero() {
            return Err(LipSyncError::InvalidConfig(
                "frame_interval must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Clock following tokio's notion of time, so paused test runtimes work
#[derive(Debug, Clone)]
pub struct TokioClock {
    reference: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        TokioClock {
            reference: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> PlaybackTime {
        PlaybackTime::from_micros(self.reference.elapsed().as_micros() as u64)
    }
}

/// Animator counters
#[derive(Clone, Debug, Default)]
pub struct AnimatorStats {
    pub ticks: u64,
    pub utterances: u64,
    pub speech_errors: u64,
    pub last_tick_at: PlaybackTime,
}

/// Lip-sync animator for one viewer
pub struct Animator<C: Clock = MonotonicClock, E: SpeechEngine = NoSpeech> {
    clock: C,
    engine: E,
    driver: AnimationDriver,
    sync: SpeechSync,
    frame_interval: Duration,
    stats: AnimatorStats,
}

impl Animator<MonotonicClock, NoSpeech> {
    /// Silent animator on the wall clock
    pub fn new() -> Self {
        Animator::from_parts(AnimatorConfig::default(), MonotonicClock::new(), NoSpeech)
    }
}

impl Default for Animator<MonotonicClock, NoSpeech> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, E: SpeechEngine> Animator<C, E> {
    /// Validate `config` and build an animator
    pub fn with_config(config: AnimatorConfig, clock: C, engine: E) -> LipSyncResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, clock, engine))
    }

    fn from_parts(config: AnimatorConfig, clock: C, engine: E) -> Self {
        Animator {
            clock,
            engine,
            driver: AnimationDriver::with_config(config.animation),
            sync: SpeechSync::with_config(config.sync),
            frame_interval: config.frame_interval,
            stats: AnimatorStats::default(),
        }
    }

    /// Animate `text` without speaking it.
    ///
    /// With no morph targets loaded this is a no-op and speech keeps playing.
    pub fn animate_text<M: MorphMesh>(
        &mut self,
        text: &str,
        on_step: Option<StepCallback>,
        meshes: &[M],
    ) -> Option<SessionToken> {
        if is_inert(meshes) {
            return None;
        }
        let now = self.clock.now();
        self.cancel_speech(now);
        self.driver.animate_text(text, on_step, now, meshes)
    }

    /// Animate an IPA transcription without speaking it
    pub fn animate_ipa<M: MorphMesh>(
        &mut self,
        ipa: &str,
        on_step: Option<StepCallback>,
        meshes: &[M],
    ) -> Option<SessionToken> {
        if is_inert(meshes) {
            return None;
        }
        let now = self.clock.now();
        self.cancel_speech(now);
        self.driver.animate_ipa(ipa, on_step, now, meshes)
    }

    /// Speak `text` and animate it on the estimated clock
    pub fn speak_text(
        &mut self,
        text: &str,
        on_step: Option<StepCallback>,
    ) -> LipSyncResult<UtteranceId> {
        let now = self.clock.now();
        let id = self
            .sync
            .speak_text(text, on_step, &mut self.engine, &mut self.driver, now)?;
        self.stats.utterances += 1;
        Ok(id)
    }

    /// Speak `text` and animate its `ipa` transcription on a timeline
    pub fn speak_ipa(
        &mut self,
        text: &str,
        ipa: &str,
        on_step: Option<StepCallback>,
    ) -> LipSyncResult<UtteranceId> {
        let now = self.clock.now();
        let id = self
            .sync
            .speak_ipa(text, ipa, on_step, &mut self.engine, &mut self.driver, now)?;
        self.stats.utterances += 1;
        Ok(id)
    }

    /// Cancel speech and animation. No-op when idle.
    pub fn stop_animation(&mut self) {
        let now = self.clock.now();
        self.sync.stop(&mut self.engine, &mut self.driver, now);
    }

    /// Cancel everything and zero every influence immediately
    pub fn reset_morph_targets<M: MorphMesh>(&mut self, meshes: &mut [M]) {
        let now = self.clock.now();
        self.cancel_speech(now);
        self.driver.reset_morph_targets(meshes);
    }

    /// Write one target directly, outside any session.
    ///
    /// A live session overwrites the target again on its next tick.
    pub fn update_morph_target<M: MorphMesh>(&self, meshes: &mut [M], name: &str, value: f32) -> usize {
        set_influence(meshes, name, value)
    }

    /// Advance one frame and pose `meshes`.
    ///
    /// A speech engine failure is returned after the frame has been applied;
    /// the session is already closing with the fast decay.
    pub fn tick<M: MorphMesh>(&mut self, meshes: &mut [M]) -> LipSyncResult<DriverState> {
        let now = self.clock.now();
        self.stats.ticks += 1;
        self.stats.last_tick_at = now;

        let polled = self.sync.poll(&self.engine, &mut self.driver, now, meshes);
        let state = self.driver.tick(now, meshes);

        match polled {
            Ok(SyncStatus::Finished) => debug!("utterance finished"),
            Ok(_) => {}
            Err(err) => {
                self.stats.speech_errors += 1;
                return Err(err);
            }
        }
        Ok(state)
    }

    /// Tick every `frame_interval` until nothing is playing or speaking.
    ///
    /// Missed frames are skipped, not replayed. Engine failures end the loop.
    pub async fn run_until_idle<M: MorphMesh>(&mut self, meshes: &mut [M]) -> LipSyncResult<()> {
        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            match self.tick(meshes) {
                Ok(DriverState::Idle) if !self.sync.is_active() => return Ok(()),
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "frame loop stopped by speech engine failure");
                    return Err(err);
                }
            }
        }
    }

    /// True only while phonemes are advancing
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// True while an utterance is in flight, started or not
    pub fn is_speaking(&self) -> bool {
        self.sync.is_active()
    }

    pub fn state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn speed(&self) -> f32 {
        self.driver.speed()
    }

    /// Set the animation speed multiplier, clamped to 0.1 - 3.0
    pub fn set_speed(&mut self, speed: f32) {
        self.driver.set_speed(speed);
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn speech(&self) -> &SpeechSync {
        &self.sync
    }

    pub fn speech_monitor(&self) -> &SpeechMonitor {
        self.sync.monitor()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stats(&self) -> &AnimatorStats {
        &self.stats
    }

    pub fn driver_stats(&self) -> &DriverStats {
        self.driver.stats()
    }

    fn cancel_speech(&mut self, now: PlaybackTime) {
        if self.sync.is_active() || self.engine.is_speaking() {
            self.sync.stop(&mut self.engine, &mut self.driver, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipsync_core::WeightVector;
    use lipsync_morph::MeshHandle;
    use lipsync_speech::{Utterance, UtteranceHandle};
    use lipsync_time::ManualClock;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct InstantEngine {
        handle: Option<UtteranceHandle>,
        speaking: bool,
    }

    impl SpeechEngine for InstantEngine {
        fn speak(&mut self, utterance: &Utterance) -> LipSyncResult<()> {
            let handle = utterance.handle();
            handle.started();
            self.handle = Some(handle);
            self.speaking = true;
            Ok(())
        }

        fn cancel(&mut self) {
            self.speaking = false;
        }

        fn is_speaking(&self) -> bool {
            self.speaking
        }
    }

    fn rig() -> Vec<MeshHandle> {
        vec![MeshHandle::with_targets(["mouthOpen", "A", "I", "ee"])]
    }

    fn manual() -> (ManualClock, Animator<ManualClock, InstantEngine>) {
        let clock = ManualClock::new();
        let animator = Animator::with_config(
            AnimatorConfig::default(),
            clock.clone(),
            InstantEngine::default(),
        )
        .unwrap();
        (clock, animator)
    }

    fn frames(
        clock: &ManualClock,
        animator: &mut Animator<ManualClock, InstantEngine>,
        meshes: &mut [MeshHandle],
        count: usize,
    ) {
        for _ in 0..count {
            clock.advance(Duration::from_millis(10));
            animator.tick(meshes).unwrap();
        }
    }

    #[test]
    fn test_silent_animator_refuses_speech() {
        let mut animator = Animator::new();
        assert_eq!(
            animator.speak_text("hi", None),
            Err(LipSyncError::SpeechUnavailable)
        );
        assert!(!animator.is_speaking());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnimatorConfig {
            frame_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(Animator::with_config(config, ManualClock::new(), NoSpeech).is_err());
    }

    #[test]
    fn test_animate_text_runs_to_idle() {
        let (clock, mut animator) = manual();
        let mut meshes = rig();
        let steps = Arc::new(Mutex::new(Vec::new()));
        let sink = steps.clone();

        animator.animate_text(
            "hi",
            Some(Box::new(move |w: &WeightVector| sink.lock().unwrap().push(w.clone()))),
            &meshes,
        );
        assert!(animator.is_animating());

        frames(&clock, &mut animator, &mut meshes, 60);
        assert_eq!(animator.state(), DriverState::Idle);
        assert!(meshes[0].influences().iter().all(|v| *v == 0.0));
        assert_eq!(steps.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_speak_text_follows_engine() {
        let (clock, mut animator) = manual();
        let mut meshes = rig();

        animator.speak_text("hi", None).unwrap();
        assert!(animator.is_speaking());
        animator.tick(&mut meshes).unwrap();
        assert!(animator.is_animating());

        // engine finishes speaking; grace then decay
        animator.engine_mut().speaking = false;
        frames(&clock, &mut animator, &mut meshes, 6);
        assert!(!animator.is_animating());
        assert!(!animator.is_speaking());

        frames(&clock, &mut animator, &mut meshes, 20);
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_engine_error_surfaces_from_tick() {
        let (_clock, mut animator) = manual();
        let mut meshes = rig();

        animator.speak_ipa("hi", "haɪ", None).unwrap();
        animator.tick(&mut meshes).unwrap();
        animator.engine().handle.as_ref().unwrap().failed("audio device lost");

        let err = animator.tick(&mut meshes).unwrap_err();
        assert_eq!(err, LipSyncError::SpeechEngine("audio device lost".into()));
        assert_eq!(animator.stats().speech_errors, 1);
        assert_eq!(animator.state(), DriverState::StoppingTransition);
    }

    #[test]
    fn test_animate_cancels_speech() {
        let (_clock, mut animator) = manual();
        let mut meshes = rig();

        animator.speak_text("hello", None).unwrap();
        animator.tick(&mut meshes).unwrap();
        animator.animate_text("ok", None, &meshes);

        assert!(!animator.is_speaking());
        assert!(!animator.engine().speaking);
        assert!(animator.is_animating());
    }

    #[test]
    fn test_animate_on_unloaded_model_keeps_speech() {
        let (clock, mut animator) = manual();
        let mut meshes = rig();
        animator.speak_text("hello there", None).unwrap();
        frames(&clock, &mut animator, &mut meshes, 2);
        assert!(animator.is_speaking());

        let unloaded: Vec<MeshHandle> = vec![];
        assert!(animator.animate_text("ok", None, &unloaded).is_none());
        assert!(animator.animate_ipa("oʊ", None, &unloaded).is_none());

        assert!(animator.is_speaking());
        assert!(animator.engine().speaking);
        assert!(animator.is_animating());
    }

    #[test]
    fn test_update_morph_target_passthrough() {
        let (_clock, animator) = manual();
        let mut meshes = rig();
        assert_eq!(animator.update_morph_target(&mut meshes, "A", 0.6), 1);
        assert_eq!(meshes[0].influence("A"), Some(0.6));
        assert_eq!(animator.update_morph_target(&mut meshes, "zzz", 0.6), 0);
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_reset_zeroes_immediately() {
        let (clock, mut animator) = manual();
        let mut meshes = rig();
        animator.speak_text("aaaa", None).unwrap();
        frames(&clock, &mut animator, &mut meshes, 5);
        assert!(meshes[0].influences().iter().any(|v| *v > 0.0));

        animator.reset_morph_targets(&mut meshes);
        assert!(meshes[0].influences().iter().all(|v| *v == 0.0));
        assert!(!animator.is_speaking());
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_set_speed_clamped() {
        let (_clock, mut animator) = manual();
        animator.set_speed(10.0);
        assert_eq!(animator.speed(), 3.0);
        animator.set_speed(0.0);
        assert!((animator.speed() - 0.1).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_idle() {
        let mut animator =
            Animator::with_config(AnimatorConfig::default(), TokioClock::new(), NoSpeech).unwrap();
        let mut meshes = rig();

        animator.animate_text("hi", None, &meshes);
        animator.run_until_idle(&mut meshes).await.unwrap();

        assert_eq!(animator.state(), DriverState::Idle);
        assert!(meshes[0].influences().iter().all(|v| *v == 0.0));
        assert!(animator.stats().ticks > 10);
        assert_eq!(animator.driver_stats().sessions_completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_idle_when_nothing_plays() {
        let mut animator =
            Animator::with_config(AnimatorConfig::default(), TokioClock::new(), NoSpeech).unwrap();
        let mut meshes = rig();
        animator.run_until_idle(&mut meshes).await.unwrap();
        assert_eq!(animator.stats().ticks, 1);
    }
}

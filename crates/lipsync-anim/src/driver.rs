//! Animation driver - the session state machine

use std::fmt;
use std::time::Duration;

use lipsync_core::{PlaybackTime, SessionToken, WeightVector};
use lipsync_morph::{apply_weights, is_inert, reset_all, MorphMesh, TargetIndex};
use lipsync_phoneme::{decompose, Alphabet, Phoneme};
use lipsync_time::TimerQueue;
use tracing::{debug, trace};

use crate::{clamp_speed, step_delay, target_pose, AnimationConfig};

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Playing,
    /// Decaying to neutral before going idle
    StoppingTransition,
}

/// Who decides when the next phoneme is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Each step schedules the next after the phoneme's own duration
    SelfPaced,
    /// Steps are pushed by the caller (speech synchronization)
    External,
}

/// Why a session is ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Sequence exhausted or utterance over
    Completed,
    /// Explicit stop
    Stopped,
    /// Speech engine failure, fast decay
    EngineError,
}

/// Receives each step's target weight vector
pub type StepCallback = Box<dyn FnMut(&WeightVector) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Advance,
}

/// Runtime state of one playback
pub struct AnimationSession {
    token: SessionToken,
    alphabet: Alphabet,
    sequence: Vec<Phoneme>,
    index: Option<usize>,
    pacing: Pacing,
    speech_ended_at: Option<PlaybackTime>,
    targets: TargetIndex,
    on_step: Option<StepCallback>,
}

impl AnimationSession {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.sequence
    }

    /// Index of the phoneme currently shown
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current_phoneme(&self) -> Option<&Phoneme> {
        self.index.and_then(|i| self.sequence.get(i))
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn speech_ended_at(&self) -> Option<PlaybackTime> {
        self.speech_ended_at
    }
}

impl fmt::Debug for AnimationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationSession")
            .field("token", &self.token)
            .field("alphabet", &self.alphabet)
            .field("phonemes", &self.sequence.len())
            .field("index", &self.index)
            .field("pacing", &self.pacing)
            .field("speech_ended_at", &self.speech_ended_at)
            .finish()
    }
}

struct Blend {
    from: WeightVector,
    to: WeightVector,
    started: PlaybackTime,
    window: Duration,
}

/// Driver counters
#[derive(Clone, Debug, Default)]
pub struct DriverStats {
    pub sessions_started: u64,
    pub sessions_superseded: u64,
    pub sessions_completed: u64,
    pub sessions_stopped: u64,
    pub steps: u64,
    pub stale_continuations: u64,
}

/// Walks phoneme sequences and poses a borrowed morph target set
pub struct AnimationDriver {
    config: AnimationConfig,
    speed: f32,
    state: DriverState,
    last_token: SessionToken,
    session: Option<AnimationSession>,
    timers: TimerQueue<Continuation>,
    /// Current interpolated weights (sparse)
    live: WeightVector,
    blend: Option<Blend>,
    stats: DriverStats,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::with_config(AnimationConfig::default())
    }

    pub fn with_config(config: AnimationConfig) -> Self {
        AnimationDriver {
            speed: clamp_speed(config.speed),
            config,
            state: DriverState::Idle,
            last_token: SessionToken::NONE,
            session: None,
            timers: TimerQueue::new(),
            live: WeightVector::neutral(),
            blend: None,
            stats: DriverStats::default(),
        }
    }

    /// Play free text using the Latin table, self-paced
    pub fn animate_text<M: MorphMesh>(
        &mut self,
        text: &str,
        on_step: Option<StepCallback>,
        now: PlaybackTime,
        meshes: &[M],
    ) -> Option<SessionToken> {
        let sequence = decompose(Alphabet::Latin, text);
        self.start(Alphabet::Latin, sequence, Pacing::SelfPaced, on_step, now, meshes)
    }

    /// Play an IPA transcription using the IPA table, self-paced
    pub fn animate_ipa<M: MorphMesh>(
        &mut self,
        ipa: &str,
        on_step: Option<StepCallback>,
        now: PlaybackTime,
        meshes: &[M],
    ) -> Option<SessionToken> {
        let sequence = decompose(Alphabet::Ipa, ipa);
        self.start(Alphabet::Ipa, sequence, Pacing::SelfPaced, on_step, now, meshes)
    }

    /// Start a session, superseding any live one.
    ///
    /// Returns `None` without touching anything when the mesh set has no
    /// morph targets (model not loaded).
    pub fn start<M: MorphMesh>(
        &mut self,
        alphabet: Alphabet,
        sequence: Vec<Phoneme>,
        pacing: Pacing,
        on_step: Option<StepCallback>,
        now: PlaybackTime,
        meshes: &[M],
    ) -> Option<SessionToken> {
        if is_inert(meshes) {
            debug!("no morph targets loaded, ignoring start");
            return None;
        }

        self.supersede();

        let token = self.last_token.next();
        self.last_token = token;
        debug!(
            session = %token,
            phonemes = sequence.len(),
            ?alphabet,
            ?pacing,
            "session started"
        );

        self.session = Some(AnimationSession {
            token,
            alphabet,
            sequence,
            index: None,
            pacing,
            speech_ended_at: None,
            targets: TargetIndex::from_meshes(meshes),
            on_step,
        });
        self.state = DriverState::Playing;
        self.stats.sessions_started += 1;

        if pacing == Pacing::SelfPaced {
            self.advance(now);
        }

        Some(token)
    }

    /// Show phoneme `index` of an externally paced session.
    ///
    /// Only moves forward. An index past the end completes the session.
    /// Returns true if a new phoneme is now shown.
    pub fn step_to(&mut self, index: usize, now: PlaybackTime) -> bool {
        if self.state != DriverState::Playing {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.pacing != Pacing::External {
            return false;
        }
        if session.index.is_some_and(|current| index <= current) {
            return false;
        }
        if index >= session.sequence.len() {
            self.finish(now, FinishReason::Completed);
            return false;
        }

        self.show(index, now);
        true
    }

    /// Explicit cancel. No-op unless playing.
    pub fn stop(&mut self, now: PlaybackTime) {
        self.finish(now, FinishReason::Stopped);
    }

    /// End the live session, decaying to neutral
    pub fn finish(&mut self, now: PlaybackTime, reason: FinishReason) {
        if self.state != DriverState::Playing {
            return;
        }
        let Some(token) = self.session.as_ref().map(|s| s.token) else {
            return;
        };

        let purged = self.timers.cancel_session(token);
        self.state = DriverState::StoppingTransition;
        match reason {
            FinishReason::Completed => self.stats.sessions_completed += 1,
            FinishReason::Stopped | FinishReason::EngineError => self.stats.sessions_stopped += 1,
        }
        debug!(session = %token, ?reason, purged, "session finishing");

        let window = match reason {
            FinishReason::EngineError => self.config.error_decay_window,
            FinishReason::Completed | FinishReason::Stopped => self.config.decay_window,
        };
        self.begin_blend(WeightVector::neutral(), window, now);
    }

    /// Record when the utterance behind the live session stopped being audible
    pub fn mark_speech_ended(&mut self, now: PlaybackTime) {
        if let Some(session) = self.session.as_mut() {
            session.speech_ended_at.get_or_insert(now);
        }
    }

    /// Run due continuations, sample the blend and pose `meshes`.
    ///
    /// Must be called every frame. Returns the state after the tick.
    pub fn tick<M: MorphMesh>(&mut self, now: PlaybackTime, meshes: &mut [M]) -> DriverState {
        while let Some(timer) = self.timers.pop_due(now) {
            let current = self.state == DriverState::Playing
                && self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.token == timer.session);
            if !current {
                self.stats.stale_continuations += 1;
                trace!(session = %timer.session, "stale continuation dropped");
                continue;
            }
            match timer.payload {
                Continuation::Advance => self.advance(now),
            }
        }

        if let Some(blend) = self.blend.as_ref() {
            let progress = if blend.window.is_zero() {
                1.0
            } else {
                (now - blend.started).as_secs_f32() / blend.window.as_secs_f32()
            };
            self.live = blend.from.lerp(&blend.to, self.config.easing.apply(progress));
            if progress >= 1.0 {
                self.blend = None;
            }
        }

        if !is_inert(meshes) {
            apply_weights(meshes, &self.live);
        }
        // mid-blend values near zero must still be written on the next tick
        if self.blend.is_none() {
            self.live.prune();
        }

        if self.state == DriverState::StoppingTransition && self.blend.is_none() {
            if let Some(session) = self.session.take() {
                debug!(session = %session.token, "session finished");
            }
            self.state = DriverState::Idle;
            self.live = WeightVector::neutral();
        }

        self.state
    }

    /// Hard reset: drop the session and zero every influence immediately
    pub fn reset_morph_targets<M: MorphMesh>(&mut self, meshes: &mut [M]) {
        if let Some(session) = self.session.take() {
            let purged = self.timers.cancel_session(session.token);
            debug!(session = %session.token, purged, "session discarded by reset");
        }
        self.state = DriverState::Idle;
        self.blend = None;
        self.live = WeightVector::neutral();
        reset_all(meshes);
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// True only while phonemes are still advancing
    pub fn is_animating(&self) -> bool {
        self.state == DriverState::Playing
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn live_weights(&self) -> &WeightVector {
        &self.live
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the speed multiplier, clamped. Applies from the next scheduled step.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_speed(speed);
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// When the next self-paced advance is due
    pub fn next_advance_at(&self) -> Option<PlaybackTime> {
        self.timers.next_deadline()
    }

    /// Pending continuations, across all sessions
    pub fn pending_continuations(&self) -> usize {
        self.timers.len()
    }

    /// Tear down the live session (if any) so a new one can start
    fn supersede(&mut self) {
        if let Some(old) = self.session.take() {
            let purged = self.timers.cancel_session(old.token);
            if self.state == DriverState::Playing {
                self.stats.sessions_superseded += 1;
            }
            debug!(session = %old.token, purged, "session superseded");
        }
        self.state = DriverState::Idle;
    }

    fn advance(&mut self, now: PlaybackTime) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let next = session.index.map_or(0, |i| i + 1);
        if next >= session.sequence.len() {
            self.finish(now, FinishReason::Completed);
            return;
        }

        let token = session.token;
        let delay = step_delay(
            session.alphabet,
            &session.sequence[next],
            &self.config,
            self.speed,
        );
        self.show(next, now);
        self.timers.schedule(now + delay, token, Continuation::Advance);
    }

    fn show(&mut self, index: usize, now: PlaybackTime) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(phoneme) = session.sequence.get(index) else {
            return;
        };

        let target = target_pose(session.alphabet, phoneme, &session.targets, &self.config);
        trace!(session = %session.token, index, phoneme = %phoneme, "phoneme advance");
        session.index = Some(index);
        if let Some(on_step) = session.on_step.as_mut() {
            on_step(&target);
        }
        self.stats.steps += 1;
        self.begin_blend(target, self.config.blend_window, now);
    }

    fn begin_blend(&mut self, to: WeightVector, window: Duration, now: PlaybackTime) {
        self.blend = Some(Blend {
            from: self.live.clone(),
            to,
            started: now,
            window,
        });
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

//! Harness: animator + simulated viewer + scripted engine on a manual clock

use std::time::Duration;

use lipsync_anim::{DriverState, StepCallback};
use lipsync_core::{LipSyncError, LipSyncResult, PlaybackTime, SessionToken, UtteranceId};
use lipsync_runtime::{Animator, AnimatorConfig};
use lipsync_time::{Clock, ManualClock};

use crate::{FrameJitter, FrameSchedule, RigKind, ScriptedSpeechEngine, SimulatedViewer, SpeechScript};

/// Harness configuration
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    pub animator: AnimatorConfig,
    pub rig: RigKind,
    pub script: SpeechScript,
    pub frames: FrameSchedule,
    pub seed: u64,
    /// Give up on `run_until_idle` after this much simulated time
    pub limit: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            animator: AnimatorConfig::default(),
            rig: RigKind::Basic,
            script: SpeechScript::default(),
            frames: FrameSchedule::Steady {
                interval: Duration::from_millis(10),
            },
            seed: 0,
            limit: Duration::from_secs(10),
        }
    }
}

impl HarnessConfig {
    pub fn with_rig(mut self, rig: RigKind) -> Self {
        self.rig = rig;
        self
    }

    pub fn with_script(mut self, script: SpeechScript) -> Self {
        self.script = script;
        self
    }

    pub fn with_frames(mut self, frames: FrameSchedule, seed: u64) -> Self {
        self.frames = frames;
        self.seed = seed;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.animator.animation = self.animator.animation.with_speed(speed);
        self
    }
}

/// Outcome of a harness run
#[derive(Clone, Debug, Default)]
pub struct HarnessReport {
    pub frames: u64,
    pub elapsed: Duration,
    /// Phoneme steps shown by the driver
    pub steps: u64,
    pub errors: Vec<LipSyncError>,
    /// Invariant violations observed
    pub violations: Vec<String>,
    pub final_neutral: bool,
    pub timed_out: bool,
    pub stalls: u64,
}

impl HarnessReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && !self.timed_out
    }
}

/// Drives an animator frame by frame against a simulated host
pub struct LipSyncHarness {
    clock: ManualClock,
    animator: Animator<ManualClock, ScriptedSpeechEngine>,
    viewer: SimulatedViewer,
    jitter: FrameJitter,
    limit: Duration,
    frames: u64,
    errors: Vec<LipSyncError>,
    violations: Vec<String>,
}

impl LipSyncHarness {
    pub fn new(config: HarnessConfig) -> LipSyncResult<Self> {
        let clock = ManualClock::new();
        let engine = ScriptedSpeechEngine::new(clock.clone(), config.script);
        let animator = Animator::with_config(config.animator, clock.clone(), engine)?;
        Ok(LipSyncHarness {
            clock,
            animator,
            viewer: SimulatedViewer::new(config.rig),
            jitter: FrameJitter::new(config.frames, config.seed),
            limit: config.limit,
            frames: 0,
            errors: Vec::new(),
            violations: Vec::new(),
        })
    }

    pub fn now(&self) -> PlaybackTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn animator(&self) -> &Animator<ManualClock, ScriptedSpeechEngine> {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator<ManualClock, ScriptedSpeechEngine> {
        &mut self.animator
    }

    pub fn viewer(&self) -> &SimulatedViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut SimulatedViewer {
        &mut self.viewer
    }

    pub fn engine(&self) -> &ScriptedSpeechEngine {
        self.animator.engine()
    }

    pub fn errors(&self) -> &[LipSyncError] {
        &self.errors
    }

    pub fn animate_text(&mut self, text: &str, on_step: Option<StepCallback>) -> Option<SessionToken> {
        self.animator.animate_text(text, on_step, self.viewer.meshes())
    }

    pub fn animate_ipa(&mut self, ipa: &str, on_step: Option<StepCallback>) -> Option<SessionToken> {
        self.animator.animate_ipa(ipa, on_step, self.viewer.meshes())
    }

    pub fn speak_text(&mut self, text: &str) -> LipSyncResult<UtteranceId> {
        self.animator.speak_text(text, None)
    }

    pub fn speak_ipa(&mut self, text: &str, ipa: &str) -> LipSyncResult<UtteranceId> {
        self.animator.speak_ipa(text, ipa, None)
    }

    pub fn stop(&mut self) {
        self.animator.stop_animation();
    }

    pub fn reset(&mut self) {
        self.animator.reset_morph_targets(self.viewer.meshes_mut());
    }

    /// Write one target directly, as a host slider would
    pub fn set_target(&mut self, name: &str, value: f32) -> usize {
        self.animator
            .update_morph_target(self.viewer.meshes_mut(), name, value)
    }

    /// Advance the clock by one host frame and tick
    pub fn frame(&mut self) -> DriverState {
        let dt = self.jitter.next_interval();
        self.clock.advance(dt);
        self.animator.engine_mut().pump();

        let state = match self.animator.tick(self.viewer.meshes_mut()) {
            Ok(state) => state,
            Err(err) => {
                self.errors.push(err);
                self.animator.state()
            }
        };
        self.frames += 1;
        self.viewer.record();
        self.check(state);
        state
    }

    /// Run frames until at least `duration` of simulated time has passed
    pub fn run_for(&mut self, duration: Duration) {
        let until = self.now() + duration;
        while self.now() < until {
            self.frame();
        }
    }

    /// Run frames until nothing is playing or speaking, or the limit is hit
    pub fn run_until_idle(&mut self) -> HarnessReport {
        let started = self.now();
        let steps_before = self.animator.driver_stats().steps;
        let errors_before = self.errors.len();
        let frames_before = self.frames;
        let mut timed_out = false;

        loop {
            let state = self.frame();
            if state == DriverState::Idle && !self.animator.is_speaking() {
                break;
            }
            if self.now() - started >= self.limit {
                timed_out = true;
                break;
            }
        }

        HarnessReport {
            frames: self.frames - frames_before,
            elapsed: self.now() - started,
            steps: self.animator.driver_stats().steps - steps_before,
            errors: self.errors[errors_before..].to_vec(),
            violations: self.violations.clone(),
            final_neutral: self.viewer.is_neutral(),
            timed_out,
            stalls: self.jitter.stalls(),
        }
    }

    fn check(&mut self, state: DriverState) {
        if !self.viewer.in_range() {
            self.violations
                .push(format!("influence out of [0, 1] at {:?}", self.now()));
        }
        if state == DriverState::Idle && !self.viewer.is_neutral() {
            self.violations
                .push(format!("idle but not neutral at {:?}", self.now()));
        }
        if self.animator.driver().pending_continuations() > 1 {
            self.violations.push(format!(
                "{} continuations pending at {:?}",
                self.animator.driver().pending_continuations(),
                self.now()
            ));
        }
    }
}

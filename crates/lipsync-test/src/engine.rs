//! Scripted speech engine
//!
//! Follows a timed lifecycle on a shared manual clock: start after a delay,
//! speak for a duration, then end, fail, or simply go quiet without
//! reporting the end. Notifications are delivered on [`ScriptedSpeechEngine::pump`],
//! which the harness calls before every frame.

use std::time::Duration;

use lipsync_core::{LipSyncError, LipSyncResult, PlaybackTime};
use lipsync_speech::{SpeechEngine, Utterance, UtteranceHandle};
use lipsync_time::{Clock, ManualClock};

/// How an utterance ends
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechOutcome {
    /// Reports the end when done
    Completes,
    /// Reports an error when done
    Fails(String),
    /// Stops speaking but never reports the end
    GoesQuiet,
}

/// Timed lifecycle applied to every utterance
#[derive(Debug, Clone)]
pub struct SpeechScript {
    /// Delay between the speak request and the start notification
    pub start_delay: Duration,
    /// How long the utterance is audible; `None` derives it from the text
    pub duration: Option<Duration>,
    pub outcome: SpeechOutcome,
    /// Refuse every speak request
    pub refuse: bool,
}

impl Default for SpeechScript {
    fn default() -> Self {
        SpeechScript {
            start_delay: Duration::from_millis(20),
            duration: None,
            outcome: SpeechOutcome::Completes,
            refuse: false,
        }
    }
}

impl SpeechScript {
    /// Audible for exactly `duration`
    pub fn lasting(duration: Duration) -> Self {
        SpeechScript {
            duration: Some(duration),
            ..Default::default()
        }
    }

    /// Fails `after` the start
    pub fn failing_after(after: Duration, message: &str) -> Self {
        SpeechScript {
            duration: Some(after),
            outcome: SpeechOutcome::Fails(message.to_string()),
            ..Default::default()
        }
    }

    /// Goes quiet after `duration` without an end notification
    pub fn going_quiet_after(duration: Duration) -> Self {
        SpeechScript {
            duration: Some(duration),
            outcome: SpeechOutcome::GoesQuiet,
            ..Default::default()
        }
    }

    pub fn refusing() -> Self {
        SpeechScript {
            refuse: true,
            ..Default::default()
        }
    }
}

#[derive(Debug)]
struct Playing {
    handle: UtteranceHandle,
    starts_at: PlaybackTime,
    ends_at: PlaybackTime,
    started: bool,
    finished: bool,
}

/// Record of what the engine was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Speak(String),
    Cancel,
}

/// Speech engine driven by a [`SpeechScript`]
#[derive(Debug)]
pub struct ScriptedSpeechEngine {
    clock: ManualClock,
    script: SpeechScript,
    rate: f32,
    /// Audible time per character at rate 1.0, when the script has no duration
    per_char: Duration,
    playing: Option<Playing>,
    calls: Vec<EngineCall>,
}

impl ScriptedSpeechEngine {
    pub fn new(clock: ManualClock, script: SpeechScript) -> Self {
        ScriptedSpeechEngine {
            clock,
            script,
            rate: 1.0,
            per_char: Duration::from_millis(70),
            playing: None,
            calls: Vec::new(),
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn set_script(&mut self, script: SpeechScript) {
        self.script = script;
    }

    /// Deliver every notification due by now
    pub fn pump(&mut self) {
        let now = self.clock.now();
        let Some(playing) = self.playing.as_mut() else {
            return;
        };

        if !playing.started && now >= playing.starts_at {
            playing.started = true;
            playing.handle.started();
        }
        if playing.started && !playing.finished && now >= playing.ends_at {
            playing.finished = true;
            match &self.script.outcome {
                SpeechOutcome::Completes => playing.handle.ended(),
                SpeechOutcome::Fails(message) => playing.handle.failed(message.clone()),
                SpeechOutcome::GoesQuiet => {}
            }
        }
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn cancel_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == EngineCall::Cancel)
            .count()
    }

    fn audible_duration(&self, text: &str) -> Duration {
        self.script.duration.unwrap_or_else(|| {
            let chars = text.chars().filter(|c| !c.is_whitespace()).count() as u32;
            self.per_char.mul_f32(chars as f32 / self.rate.max(0.1))
        })
    }
}

impl SpeechEngine for ScriptedSpeechEngine {
    fn speak(&mut self, utterance: &Utterance) -> LipSyncResult<()> {
        self.calls.push(EngineCall::Speak(utterance.text().to_string()));
        if self.script.refuse {
            return Err(LipSyncError::SpeechEngine("engine busy".into()));
        }

        let starts_at = self.clock.now() + self.script.start_delay;
        self.playing = Some(Playing {
            handle: utterance.handle(),
            starts_at,
            ends_at: starts_at + self.audible_duration(utterance.text()),
            started: false,
            finished: false,
        });
        Ok(())
    }

    fn cancel(&mut self) {
        self.calls.push(EngineCall::Cancel);
        self.playing = None;
    }

    fn is_speaking(&self) -> bool {
        let now = self.clock.now();
        self.playing
            .as_ref()
            .is_some_and(|p| p.started && now < p.ends_at)
    }

    fn rate(&self) -> f32 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipsync_core::UtteranceId;
    use lipsync_speech::SpeechMonitor;

    #[test]
    fn test_lifecycle_follows_clock() {
        let clock = ManualClock::new();
        let mut engine =
            ScriptedSpeechEngine::new(clock.clone(), SpeechScript::lasting(Duration::from_millis(100)));
        let monitor = SpeechMonitor::new();
        let utterance = test_utterance(&monitor);

        engine.speak(&utterance).unwrap();
        engine.pump();
        assert!(!engine.is_speaking());

        clock.advance(Duration::from_millis(20));
        engine.pump();
        assert!(engine.is_speaking());

        clock.advance(Duration::from_millis(100));
        engine.pump();
        assert!(!engine.is_speaking());
        assert_eq!(engine.calls(), &[EngineCall::Speak("hello".into())]);
    }

    #[test]
    fn test_refusing() {
        let mut engine = ScriptedSpeechEngine::new(ManualClock::new(), SpeechScript::refusing());
        let monitor = SpeechMonitor::new();
        assert!(engine.speak(&test_utterance(&monitor)).is_err());
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_cancel_silences() {
        let clock = ManualClock::new();
        let mut engine = ScriptedSpeechEngine::new(clock.clone(), SpeechScript::default());
        let monitor = SpeechMonitor::new();
        engine.speak(&test_utterance(&monitor)).unwrap();
        clock.advance(Duration::from_millis(50));
        engine.pump();
        assert!(engine.is_speaking());

        engine.cancel();
        assert!(!engine.is_speaking());
        assert_eq!(engine.cancel_count(), 1);
    }

    fn test_utterance(monitor: &SpeechMonitor) -> Utterance {
        Utterance::new(UtteranceId::new(1), "hello", monitor.clone())
    }
}

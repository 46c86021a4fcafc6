//! End-to-end scenarios
//!
//! Each scenario drives a harness through one observable property of the
//! engine and reports every check that failed.

use std::sync::mpsc;
use std::time::Duration;

use lipsync_anim::DriverState;
use lipsync_core::{LipSyncError, PlaybackTime, WeightVector};
use lipsync_morph::find_best_match;
use lipsync_phoneme::{ipa_to_phonemes, text_to_phonemes, Phoneme, PAUSE_SYMBOL};

use crate::{EngineCall, FrameSchedule, HarnessConfig, LipSyncHarness, RigKind, SpeechScript};

/// Result of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub passed: bool,
    pub failures: Vec<String>,
}

impl ScenarioReport {
    fn new(name: &'static str) -> Self {
        ScenarioReport {
            name,
            passed: true,
            failures: Vec::new(),
        }
    }

    fn check(&mut self, ok: bool, what: impl Into<String>) {
        if !ok {
            self.passed = false;
            self.failures.push(what.into());
        }
    }

    fn harness(&mut self, config: HarnessConfig) -> Option<LipSyncHarness> {
        match LipSyncHarness::new(config) {
            Ok(harness) => Some(harness),
            Err(err) => {
                self.check(false, format!("harness: {err}"));
                None
            }
        }
    }
}

fn symbols(phonemes: &[Phoneme]) -> Vec<&str> {
    phonemes.iter().map(Phoneme::as_str).collect()
}

/// Decoder and resolver contracts
pub fn scenario_decoding() -> ScenarioReport {
    let mut report = ScenarioReport::new("decoding");

    report.check(text_to_phonemes("").is_empty(), "empty text");
    report.check(ipa_to_phonemes("").is_empty(), "empty ipa");
    report.check(
        symbols(&text_to_phonemes("go now")) == ["g", "o", PAUSE_SYMBOL, "n", "o", "w", PAUSE_SYMBOL],
        "one pause per word",
    );
    report.check(
        symbols(&text_to_phonemes("the")).first() == Some(&"th"),
        "digraph preferred",
    );
    report.check(
        symbols(&ipa_to_phonemes("tʃeɪn")) == ["tʃ", "eɪ", "n"],
        "longest cluster match",
    );
    report.check(symbols(&ipa_to_phonemes("x")) == ["ə"], "schwa fallback");
    report.check(
        find_best_match(&["A", "Ah"], &["Ah", "A_open"]) == Some("Ah"),
        "exact match at later candidate wins",
    );
    report.check(
        find_best_match(&["zzz"], &["Ah", "A"]).is_none(),
        "no match is absent",
    );
    report
}

/// "hi" on a basic rig: three steps, then back to neutral
pub fn scenario_hi_end_to_end() -> ScenarioReport {
    let mut report = ScenarioReport::new("hi end to end");
    let Some(mut harness) = report.harness(HarnessConfig::default()) else {
        return report;
    };

    let (tx, rx) = mpsc::channel();
    let token = harness.animate_text(
        "hi",
        Some(Box::new(move |w: &WeightVector| {
            let _ = tx.send(w.clone());
        })),
    );
    report.check(token.is_some(), "session started");
    let phonemes = harness
        .animator()
        .driver()
        .session()
        .map(|s| symbols(s.phonemes()).join(" "))
        .unwrap_or_default();
    report.check(phonemes == "h i _pause", format!("phonemes were {phonemes}"));

    let run = harness.run_until_idle();
    report.check(run.is_clean(), format!("violations {:?}", run.violations));

    let steps: Vec<WeightVector> = rx.try_iter().collect();
    report.check(steps.len() == 3, format!("{} steps", steps.len()));
    if let [h, i, pause] = steps.as_slice() {
        report.check(
            h.get("mouthOpen") > 0.0 && h.get("mouthOpen") <= 0.3,
            "h is a low-weight open pose",
        );
        report.check((i.get("I") - 0.85).abs() < 1e-4, "i poses I at 0.85");
        report.check(
            pause.get("I") == 0.0 && pause.get("mouthOpen") > 0.0,
            "pause is a small open pose",
        );
    }
    report.check(harness.viewer().peak("I") > 0.8, "I reached the mesh");
    report.check(run.final_neutral, "ends neutral");
    report.check(!harness.animator().is_animating(), "not animating");
    report
}

/// A second session silences the first one's pending steps
pub fn scenario_session_exclusivity() -> ScenarioReport {
    let mut report = ScenarioReport::new("session exclusivity");
    let Some(mut harness) = report.harness(HarnessConfig::default()) else {
        return report;
    };

    let (tx, rx) = mpsc::channel();
    harness.animate_text(
        "aaaa",
        Some(Box::new(move |_: &WeightVector| {
            let _ = tx.send(());
        })),
    );
    harness.run_for(Duration::from_millis(60));
    let first_steps = rx.try_iter().count();
    report.check(first_steps == 1, format!("first session showed {first_steps} steps"));

    harness.animate_text("ii", None);
    // both sessions would have advanced by now
    harness.run_for(Duration::from_millis(100));
    report.check(rx.try_iter().count() == 0, "first session stepped after second started");
    report.check(harness.viewer().influence("A") == Some(0.0), "first session's pose is gone");
    report.check(
        harness.viewer().influence("I").unwrap_or(0.0) > 0.5,
        "second session's pose is shown",
    );
    report.check(
        harness.animator().driver_stats().sessions_superseded == 1,
        "one session superseded",
    );

    let run = harness.run_until_idle();
    report.check(run.is_clean(), format!("violations {:?}", run.violations));
    report
}

/// Doubling the speed halves the step delay, same sequence
pub fn scenario_speed_scaling() -> ScenarioReport {
    let mut report = ScenarioReport::new("speed scaling");
    let (Some(mut normal), Some(mut fast)) = (
        report.harness(HarnessConfig::default()),
        report.harness(HarnessConfig::default().with_speed(2.0)),
    ) else {
        return report;
    };

    normal.animate_text("a", None);
    fast.animate_text("a", None);

    let delay = |h: &LipSyncHarness| {
        h.animator()
            .driver()
            .next_advance_at()
            .map(|t| t - h.now())
    };
    let (n, f) = (delay(&normal), delay(&fast));
    report.check(n == Some(Duration::from_millis(140)), format!("normal delay {n:?}"));
    report.check(f == Some(Duration::from_millis(70)), format!("fast delay {f:?}"));

    let same = normal.animator().driver().session().map(|s| s.phonemes().to_vec())
        == fast.animator().driver().session().map(|s| s.phonemes().to_vec());
    report.check(same, "same phoneme sequence");
    report
}

/// Stop decays to neutral and halts stepping
pub fn scenario_stop_decay() -> ScenarioReport {
    let mut report = ScenarioReport::new("stop decay");
    let Some(mut harness) = report.harness(HarnessConfig::default()) else {
        return report;
    };

    harness.animate_text("aaaa aaaa", None);
    harness.run_for(Duration::from_millis(100));
    report.check(harness.viewer().influence("A").unwrap_or(0.0) > 0.5, "A is posed");

    harness.stop();
    report.check(!harness.animator().is_animating(), "stop clears is_animating");
    let steps = harness.animator().driver_stats().steps;

    harness.run_for(Duration::from_millis(230));
    report.check(harness.animator().state() == DriverState::Idle, "idle after decay");
    report.check(harness.viewer().is_neutral(), "neutral after decay");
    report.check(
        harness.animator().driver_stats().steps == steps,
        "no steps after stop",
    );

    // stop when idle is a no-op
    harness.stop();
    report.check(harness.animator().state() == DriverState::Idle, "idle stop is no-op");
    report
}

/// Engine goes quiet without reporting the end; the mouth follows
pub fn scenario_speech_ends_early() -> ScenarioReport {
    let mut report = ScenarioReport::new("speech ends early");
    let config = HarnessConfig::default()
        .with_script(SpeechScript::going_quiet_after(Duration::from_millis(300)));
    let Some(mut harness) = report.harness(config) else {
        return report;
    };

    if let Err(err) = harness.speak_text("hello there everyone") {
        report.check(false, format!("speak: {err}"));
        return report;
    }
    let run = harness.run_until_idle();

    report.check(run.is_clean(), format!("violations {:?}", run.violations));
    report.check(run.errors.is_empty(), "no errors");
    report.check(run.steps >= 3, format!("{} steps", run.steps));
    // start 20 + speech 300 + grace 50 + decay 180, plus frame slack
    report.check(
        run.elapsed <= Duration::from_millis(580),
        format!("closed after {:?}", run.elapsed),
    );
    report.check(run.final_neutral, "ends neutral");
    report
}

/// Timeline mode shows each entry once for its own duration
pub fn scenario_timeline_speech() -> ScenarioReport {
    let mut report = ScenarioReport::new("timeline speech");
    // m ɪ l iː n i ə m
    let audible = Duration::from_millis(100 + 100 + 90 + 170 + 90 + 110 + 90 + 100);
    let config = HarnessConfig::default().with_script(SpeechScript::lasting(audible));
    let Some(mut harness) = report.harness(config) else {
        return report;
    };

    if let Err(err) = harness.speak_ipa("millennium", "mɪˈliːniəm") {
        report.check(false, format!("speak: {err}"));
        return report;
    }
    let total = harness.animator().speech().timeline().map(|t| t.total());
    report.check(total == Some(audible), format!("timeline total {total:?}"));

    let run = harness.run_until_idle();
    report.check(run.is_clean(), format!("violations {:?}", run.violations));
    report.check(run.steps == 8, format!("{} steps", run.steps));
    report.check(run.errors.is_empty(), "no errors");
    report.check(run.final_neutral, "ends neutral");
    report
}

/// Engine failure surfaces as an error and decays fast
pub fn scenario_engine_failure() -> ScenarioReport {
    let mut report = ScenarioReport::new("engine failure");
    let config = HarnessConfig::default().with_script(SpeechScript::failing_after(
        Duration::from_millis(200),
        "synthesis failed",
    ));
    let Some(mut harness) = report.harness(config) else {
        return report;
    };

    if let Err(err) = harness.speak_text("hello there") {
        report.check(false, format!("speak: {err}"));
        return report;
    }
    let run = harness.run_until_idle();

    report.check(
        run.errors == [LipSyncError::SpeechEngine("synthesis failed".into())],
        format!("errors {:?}", run.errors),
    );
    // start 20 + speech 200 + fast decay 100, plus frame slack
    report.check(
        run.elapsed <= Duration::from_millis(340),
        format!("closed after {:?}", run.elapsed),
    );
    report.check(run.final_neutral, "ends neutral");
    report.check(!harness.animator().is_speaking(), "utterance closed");
    report
}

/// Speaking again cancels the utterance in flight
pub fn scenario_speak_supersedes() -> ScenarioReport {
    let mut report = ScenarioReport::new("speak supersedes");
    let Some(mut harness) = report.harness(HarnessConfig::default()) else {
        return report;
    };

    let first = harness.speak_text("first sentence here");
    harness.run_for(Duration::from_millis(200));
    let second = harness.speak_text("second");
    report.check(
        matches!((&first, &second), (Ok(a), Ok(b)) if b > a),
        "second utterance is newer",
    );
    report.check(
        harness.engine().calls()
            == [
                EngineCall::Speak("first sentence here".into()),
                EngineCall::Cancel,
                EngineCall::Speak("second".into()),
            ],
        format!("engine calls {:?}", harness.engine().calls()),
    );
    report.check(!harness.animator().is_animating(), "old session stopped");

    let run = harness.run_until_idle();
    report.check(run.is_clean(), format!("violations {:?}", run.violations));
    report.check(run.errors.is_empty(), "no errors");
    report.check(run.final_neutral, "ends neutral");
    report
}

/// A stalling host skips ahead instead of replaying missed steps
pub fn scenario_backgrounded_host() -> ScenarioReport {
    let mut report = ScenarioReport::new("backgrounded host");
    let sentence = "the quick brown fox jumps over the lazy dog";
    let phoneme_count = text_to_phonemes(sentence).len() as u64;

    for seed in [1, 2, 3] {
        let config = HarnessConfig::default().with_frames(FrameSchedule::backgrounded(), seed);
        let Some(mut harness) = report.harness(config) else {
            return report;
        };

        harness.animate_text(sentence, None);
        let silent = harness.run_until_idle();
        report.check(silent.is_clean(), format!("seed {seed}: {:?}", silent.violations));
        report.check(
            silent.steps <= phoneme_count,
            format!("seed {seed}: {} steps for {phoneme_count} phonemes", silent.steps),
        );
        report.check(silent.final_neutral, format!("seed {seed}: silent run not neutral"));

        if harness.speak_text(sentence).is_ok() {
            let spoken = harness.run_until_idle();
            report.check(spoken.is_clean(), format!("seed {seed}: {:?}", spoken.violations));
            report.check(
                spoken.steps <= phoneme_count,
                format!("seed {seed}: {} spoken steps", spoken.steps),
            );
            report.check(spoken.final_neutral, format!("seed {seed}: spoken run not neutral"));
        }
    }
    report
}

/// Visemes land on rigs with other naming schemes
pub fn scenario_cross_rig() -> ScenarioReport {
    let mut report = ScenarioReport::new("cross rig");
    let expectations: [(RigKind, &[&str]); 2] = [
        (RigKind::ArKit, &["jawOpen", "mouthSmile_L"]),
        (RigKind::Vrm, &["Fcl_MTH_A", "Fcl_MTH_I"]),
    ];

    for (rig, targets) in expectations {
        let Some(mut harness) = report.harness(HarnessConfig::default().with_rig(rig)) else {
            return report;
        };
        harness.animate_text("hi", None);
        let run = harness.run_until_idle();

        for target in targets {
            report.check(
                harness.viewer().peak(target) > 0.0,
                format!("{rig:?}: {target} never moved"),
            );
        }
        report.check(run.is_clean(), format!("{rig:?}: {:?}", run.violations));
        report.check(run.final_neutral, format!("{rig:?}: not neutral"));
    }
    report
}

/// Before the model loads everything is inert
pub fn scenario_unloaded_model() -> ScenarioReport {
    let mut report = ScenarioReport::new("unloaded model");
    let Some(mut harness) = report.harness(HarnessConfig::default().with_rig(RigKind::Unloaded))
    else {
        return report;
    };

    report.check(harness.animate_text("hello", None).is_none(), "animate is a no-op");
    report.check(harness.speak_text("hello").is_ok(), "speech still works");
    let run = harness.run_until_idle();
    report.check(run.is_clean(), format!("violations {:?}", run.violations));
    report.check(run.steps == 0, "no steps shown");

    harness.reset();
    report.check(harness.set_target("A", 1.0) == 0, "manual write is a no-op");
    report
}

/// Hard reset zeroes immediately, even mid-utterance
pub fn scenario_hard_reset() -> ScenarioReport {
    let mut report = ScenarioReport::new("hard reset");
    let Some(mut harness) = report.harness(HarnessConfig::default()) else {
        return report;
    };

    if harness.speak_text("aaaa aaaa").is_err() {
        report.check(false, "speak failed");
        return report;
    }
    harness.run_for(Duration::from_millis(150));
    report.check(!harness.viewer().is_neutral(), "posed before reset");

    harness.reset();
    report.check(harness.viewer().is_neutral(), "neutral right after reset");
    report.check(!harness.animator().is_speaking(), "utterance cancelled");
    report.check(harness.engine().cancel_count() == 1, "engine cancelled");

    harness.run_for(Duration::from_millis(200));
    report.check(harness.viewer().is_neutral(), "stays neutral");
    report.check(harness.now() > PlaybackTime::ZERO, "clock moved");
    report
}

/// Run every scenario
pub fn run_all_scenarios() -> Vec<ScenarioReport> {
    vec![
        scenario_decoding(),
        scenario_hi_end_to_end(),
        scenario_session_exclusivity(),
        scenario_speed_scaling(),
        scenario_stop_decay(),
        scenario_speech_ends_early(),
        scenario_timeline_speech(),
        scenario_engine_failure(),
        scenario_speak_supersedes(),
        scenario_backgrounded_host(),
        scenario_cross_rig(),
        scenario_unloaded_model(),
        scenario_hard_reset(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_passed(report: ScenarioReport) {
        assert!(report.passed, "{}: {:?}", report.name, report.failures);
    }

    #[test]
    fn test_decoding() {
        assert_passed(scenario_decoding());
    }

    #[test]
    fn test_hi_end_to_end() {
        assert_passed(scenario_hi_end_to_end());
    }

    #[test]
    fn test_session_exclusivity() {
        assert_passed(scenario_session_exclusivity());
    }

    #[test]
    fn test_speed_scaling() {
        assert_passed(scenario_speed_scaling());
    }

    #[test]
    fn test_stop_decay() {
        assert_passed(scenario_stop_decay());
    }

    #[test]
    fn test_speech_ends_early() {
        assert_passed(scenario_speech_ends_early());
    }

    #[test]
    fn test_timeline_speech() {
        assert_passed(scenario_timeline_speech());
    }

    #[test]
    fn test_engine_failure() {
        assert_passed(scenario_engine_failure());
    }

    #[test]
    fn test_speak_supersedes() {
        assert_passed(scenario_speak_supersedes());
    }

    #[test]
    fn test_backgrounded_host() {
        assert_passed(scenario_backgrounded_host());
    }

    #[test]
    fn test_cross_rig() {
        assert_passed(scenario_cross_rig());
    }

    #[test]
    fn test_unloaded_model() {
        assert_passed(scenario_unloaded_model());
    }

    #[test]
    fn test_hard_reset() {
        assert_passed(scenario_hard_reset());
    }

    #[test]
    fn test_run_all() {
        let reports = run_all_scenarios();
        assert_eq!(reports.len(), 13);
        let failed: Vec<_> = reports.iter().filter(|r| !r.passed).collect();
        assert!(failed.is_empty(), "{failed:?}");
    }
}

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lipsync_anim::{AnimationDriver, DriverState};
use lipsync_core::PlaybackTime;
use lipsync_morph::{MeshHandle, MorphMesh};

#[derive(Arbitrary, Debug)]
enum Op {
    AnimateText(String),
    AnimateIpa(String),
    Stop,
    Reset,
    Speed(f32),
    Tick(u16),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut meshes = vec![MeshHandle::with_targets(["mouthOpen", "A", "I", "O", "jawOpen"])];
    let mut driver = AnimationDriver::new();
    let mut now = PlaybackTime::ZERO;

    for op in ops {
        match op {
            Op::AnimateText(text) => {
                driver.animate_text(&text, None, now, &meshes);
            }
            Op::AnimateIpa(ipa) => {
                driver.animate_ipa(&ipa, None, now, &meshes);
            }
            Op::Stop => driver.stop(now),
            Op::Reset => driver.reset_morph_targets(&mut meshes),
            Op::Speed(speed) => driver.set_speed(speed),
            Op::Tick(ms) => {
                now = now + Duration::from_millis(u64::from(ms));
                let state = driver.tick(now, &mut meshes);
                for mesh in &meshes {
                    assert!(mesh.influences().iter().all(|v| (0.0..=1.0).contains(v)));
                }
                if state == DriverState::Idle {
                    assert!(meshes[0].influences().iter().all(|v| *v <= 1e-4));
                }
            }
        }
        assert!(driver.pending_continuations() <= 1);
    }
});

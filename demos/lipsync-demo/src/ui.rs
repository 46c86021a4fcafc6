//! Demo UI - one console mesh, redrawn as bars

use std::io::{self, Write};
use std::time::Duration;

use lipsync_anim::DriverState;
use lipsync_morph::MeshHandle;
use lipsync_runtime::{Animator, TokioClock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::voice::SimulatedVoice;

const TARGETS: &[&str] = &["mouthOpen", "mouthClose", "A", "I", "U", "E", "O"];
const BAR_WIDTH: usize = 5;

/// Demo UI handler
pub struct DemoUI {
    animator: Animator<TokioClock, SimulatedVoice>,
    meshes: Vec<MeshHandle>,
}

impl DemoUI {
    pub fn new(animator: Animator<TokioClock, SimulatedVoice>) -> Self {
        DemoUI {
            animator,
            meshes: vec![MeshHandle::with_targets(TARGETS.iter().copied())],
        }
    }

    /// Read commands until /quit or end of input
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
            let arg = arg.trim();

            match command {
                "/say" => {
                    if self.animator.animate_text(arg, None, &self.meshes).is_some() {
                        self.play().await;
                    }
                }
                "/ipa" => {
                    if self.animator.animate_ipa(arg, None, &self.meshes).is_some() {
                        self.play().await;
                    }
                }
                "/speak" => match self.animator.speak_text(arg, None) {
                    Ok(_) => self.play().await,
                    Err(e) => println!("❌ {e}"),
                },
                "/speakipa" => {
                    let Some((text, ipa)) = arg.split_once('|') else {
                        println!("usage: /speakipa <text>|<ipa>");
                        continue;
                    };
                    match self.animator.speak_ipa(text.trim(), ipa.trim(), None) {
                        Ok(_) => self.play().await,
                        Err(e) => println!("❌ {e}"),
                    }
                }
                "/speed" => match arg.parse::<f32>() {
                    Ok(speed) => {
                        self.animator.set_speed(speed);
                        println!("speed is now {:.2}", self.animator.speed());
                    }
                    Err(_) => println!("usage: /speed <number>"),
                },
                "/stop" => {
                    self.animator.stop_animation();
                    self.play().await;
                }
                "/reset" => {
                    self.animator.reset_morph_targets(&mut self.meshes);
                    self.draw(self.animator.state());
                    println!();
                }
                "/quit" => break,
                "" => {}
                other => println!("unknown command {other}"),
            }
        }

        self.animator.reset_morph_targets(&mut self.meshes);
        Ok(())
    }

    /// Tick at display rate until idle, redrawing the bars in place
    async fn play(&mut self) {
        let mut frames = tokio::time::interval(Duration::from_millis(16));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frames.tick().await;
            let state = match self.animator.tick(&mut self.meshes) {
                Ok(state) => state,
                Err(e) => {
                    println!("\n❌ {e}");
                    self.animator.state()
                }
            };
            self.draw(state);
            if state == DriverState::Idle && !self.animator.is_speaking() {
                break;
            }
        }
        println!();
    }

    fn draw(&self, state: DriverState) {
        let mut line = format!("\r{:<9}", format!("{state:?}"));
        for name in TARGETS {
            let value = self
                .meshes
                .iter()
                .find_map(|m| m.influence(name))
                .unwrap_or(0.0);
            let filled = ((value * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
            line.push_str(&format!(
                " {name}[{}{}]",
                "█".repeat(filled),
                " ".repeat(BAR_WIDTH - filled)
            ));
        }
        print!("{line}");
        let _ = io::stdout().flush();
    }
}

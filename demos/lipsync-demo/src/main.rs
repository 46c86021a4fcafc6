//! Lip-sync demo
//!
//! Drives a console "model" with the animator:
//! - silent text and IPA animation
//! - spoken text and IPA through a simulated voice
//! - stop, hard reset and speed changes

mod ui;
mod voice;

use lipsync_runtime::{init_tracing, Animator, AnimatorConfig, LogConfig, TokioClock};

use ui::DemoUI;
use voice::SimulatedVoice;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let log = if verbose {
        LogConfig::verbose()
    } else {
        LogConfig {
            filter: "warn".into(),
            ..Default::default()
        }
    };
    init_tracing(&log)?;

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              Lip-sync Demo - Console Viewer                ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("  /say <text>            animate text silently");
    println!("  /ipa <ipa>             animate an IPA transcription");
    println!("  /speak <text>          speak and animate text");
    println!("  /speakipa <text>|<ipa> speak text, animate its transcription");
    println!("  /speed <x>             set animation speed (0.1 - 3.0)");
    println!("  /stop                  stop with decay");
    println!("  /reset                 zero every target now");
    println!("  /quit                  exit");
    println!();

    let animator = Animator::with_config(
        AnimatorConfig::default(),
        TokioClock::new(),
        SimulatedVoice::new(),
    )?;

    let mut ui = DemoUI::new(animator);
    ui.run().await?;

    println!("Goodbye!");
    Ok(())
}

//! A voice that only keeps time
//!
//! Each utterance is a tokio task that reports start, waits as long as the
//! text would take to say, then reports the end.

use std::time::Duration;

use lipsync_core::LipSyncResult;
use lipsync_speech::{SpeechEngine, Utterance};
use tokio::task::JoinHandle;
use tracing::debug;

const START_LATENCY: Duration = Duration::from_millis(30);
const PER_CHAR: Duration = Duration::from_millis(65);

pub struct SimulatedVoice {
    playing: Option<JoinHandle<()>>,
    rate: f32,
}

impl SimulatedVoice {
    pub fn new() -> Self {
        SimulatedVoice {
            playing: None,
            rate: 1.0,
        }
    }
}

impl SpeechEngine for SimulatedVoice {
    fn speak(&mut self, utterance: &Utterance) -> LipSyncResult<()> {
        self.cancel();

        let chars = utterance.text().chars().filter(|c| !c.is_whitespace()).count() as u32;
        let audible = (PER_CHAR * chars).div_f32(self.rate);
        let handle = utterance.handle();
        debug!(id = %handle.id(), ?audible, "voice started");

        self.playing = Some(tokio::spawn(async move {
            tokio::time::sleep(START_LATENCY).await;
            handle.started();
            tokio::time::sleep(audible).await;
            handle.ended();
        }));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(task) = self.playing.take() {
            task.abort();
        }
    }

    fn is_speaking(&self) -> bool {
        self.playing.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn rate(&self) -> f32 {
        self.rate
    }
}

//! Per-utterance phoneme timeline

use std::time::Duration;

use lipsync_anim::{phoneme_duration, viseme_for, AnimationConfig};
use lipsync_core::scale_by_speed;
use lipsync_phoneme::{Alphabet, Phoneme, VisemeDescriptor};

/// One phoneme's slot on the timeline
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub phoneme: Phoneme,
    pub viseme: Option<&'static VisemeDescriptor>,
    /// Cumulative duration of every earlier entry
    pub start_offset: Duration,
    pub duration: Duration,
}

impl TimelineEntry {
    pub fn end_offset(&self) -> Duration {
        self.start_offset + self.duration
    }

    pub fn contains(&self, elapsed: Duration) -> bool {
        elapsed >= self.start_offset && elapsed < self.end_offset()
    }
}

/// Phoneme sequence laid out in time using each entry's own table duration,
/// divided by the animation speed
#[derive(Debug, Clone, Default)]
pub struct PhonemeTimeline {
    entries: Vec<TimelineEntry>,
}

impl PhonemeTimeline {
    pub fn build(
        alphabet: Alphabet,
        phonemes: &[Phoneme],
        config: &AnimationConfig,
        speed: f32,
    ) -> Self {
        let mut offset = Duration::ZERO;
        let entries = phonemes
            .iter()
            .map(|phoneme| {
                let duration = scale_by_speed(phoneme_duration(alphabet, phoneme, config), speed);
                let entry = TimelineEntry {
                    phoneme: phoneme.clone(),
                    viseme: viseme_for(alphabet, phoneme),
                    start_offset: offset,
                    duration,
                };
                offset += duration;
                entry
            })
            .collect();
        PhonemeTimeline { entries }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of the last entry
    pub fn total(&self) -> Duration {
        self.entries
            .last()
            .map(TimelineEntry::end_offset)
            .unwrap_or(Duration::ZERO)
    }

    /// Index of the entry whose interval contains `elapsed`.
    ///
    /// `None` once the timeline is exhausted.
    pub fn index_at(&self, elapsed: Duration) -> Option<usize> {
        let index = self.entries.partition_point(|e| e.end_offset() <= elapsed);
        (index < self.entries.len()).then_some(index)
    }
}

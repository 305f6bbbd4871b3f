//! Voice pools
//!
//! One growable pool of playback voices per category. Acquisition scans
//! once for an idle voice and falls back to creating a new one; the pool
//! never shrinks for the lifetime of the process.

use crate::catalog::Category;
use crate::output::OutputDevice;
use crate::voice::VoiceChannel;

/// Growable collection of voices for one category
pub struct VoicePool {
    category: Category,
    voices: Vec<VoiceChannel>,
    /// Current category volume, applied to every voice on change and used
    /// as the default for voices created afterwards.
    volume: f32,
}

impl VoicePool {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            voices: Vec::new(),
            volume: 1.0,
        }
    }

    /// Find an idle voice or create a new one
    ///
    /// Exactly one scan per request. A reused voice is returned as-is, not
    /// reset; callers reassign clip, loop flag, and volume before playing.
    /// Returns `None` only when the device cannot open another output.
    pub fn acquire(&mut self, device: &dyn OutputDevice) -> Option<&mut VoiceChannel> {
        let index = match self.voices.iter().position(|voice| !voice.is_playing()) {
            Some(index) => index,
            None => {
                let output = match device.open_output() {
                    Ok(output) => output,
                    Err(e) => {
                        tracing::warn!(
                            "Could not grow {} voice pool past {}: {e}",
                            self.category,
                            self.voices.len()
                        );
                        return None;
                    }
                };
                let mut voice = VoiceChannel::new(output);
                voice.set_volume(self.volume);
                self.voices.push(voice);
                tracing::debug!(
                    "Created {} voice #{}",
                    self.category,
                    self.voices.len()
                );
                self.voices.len() - 1
            }
        };
        Some(&mut self.voices[index])
    }

    /// Stop every voice in the pool, playing or not
    pub fn stop_all(&mut self) {
        for voice in &mut self.voices {
            voice.stop();
        }
    }

    pub fn pause_all(&mut self) {
        for voice in &mut self.voices {
            voice.pause();
        }
    }

    pub fn resume_all(&mut self) {
        for voice in &mut self.voices {
            voice.resume();
        }
    }

    /// Apply a uniform volume to every voice and record it as the default
    /// for voices created later
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        for voice in &mut self.voices {
            voice.set_volume(self.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of voices created so far (monotonically non-decreasing)
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// How many voices are currently audible
    pub fn playing_count(&self) -> usize {
        self.voices.iter().filter(|voice| voice.is_playing()).count()
    }

    pub fn any_playing(&self) -> bool {
        self.voices.iter().any(|voice| voice.is_playing())
    }
}

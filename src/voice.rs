//! Playback voice
//!
//! One reusable channel bound to a single output unit. A voice is either
//! idle or occupied by exactly one clip; reuse always reassigns clip, loop
//! flag, and volume together.

use crate::catalog::ClipHandle;
use crate::output::AudioOutput;

/// One playback channel
pub struct VoiceChannel {
    output: Box<dyn AudioOutput>,
    clip: Option<String>,
    looped: bool,
    volume: f32,
}

impl VoiceChannel {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            clip: None,
            looped: false,
            volume: 1.0,
        }
    }

    /// Whether the underlying output is currently occupied
    ///
    /// Queried live from the output sink, so a one-shot clip that ran to
    /// completion reports idle without any bookkeeping here.
    pub fn is_playing(&self) -> bool {
        self.output.is_playing()
    }

    /// Assign a clip and start playback, replacing whatever was assigned
    /// before. Resets clip, loop flag, and volume in one step.
    pub fn begin(&mut self, clip: &ClipHandle, looped: bool, volume: f32) {
        self.clip = Some(clip.name().to_string());
        self.looped = looped;
        self.volume = volume;

        self.output.set_clip(clip);
        self.output.set_loop(looped);
        self.output.set_volume(volume);
        self.output.play();
    }

    pub fn stop(&mut self) {
        self.output.stop();
    }

    pub fn pause(&mut self) {
        self.output.pause();
    }

    pub fn resume(&mut self) {
        self.output.resume();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.output.set_volume(volume);
    }

    /// Name of the most recently assigned clip
    pub fn clip_name(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

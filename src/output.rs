//! Audio output abstraction
//!
//! The core never mixes or emits samples itself; each voice drives one
//! opaque output unit behind [`AudioOutput`]. Outputs are minted by an
//! [`OutputDevice`], so pools can grow without knowing the backend.

use crate::catalog::ClipHandle;
use crate::error::SoundError;

/// One playback unit: holds at most one clip, plays it to completion or
/// until stopped, and reports whether it is currently audible.
///
/// All methods are synchronous. Playback-time failures (e.g. a clip that
/// no longer decodes) are logged by the implementation and degrade to
/// silence; they are never surfaced to callers.
pub trait AudioOutput: Send {
    /// Assign the clip this output will play next
    fn set_clip(&mut self, clip: &ClipHandle);

    /// Whether playback restarts when the clip ends
    fn set_loop(&mut self, looped: bool);

    /// Set output gain (0.0-1.0), effective immediately
    fn set_volume(&mut self, volume: f32);

    /// Start playing the assigned clip from the beginning
    fn play(&mut self);

    /// Stop playback and discard any queued audio
    fn stop(&mut self);

    /// Suspend playback, resumable via [`AudioOutput::resume`]
    fn pause(&mut self);

    /// Resume paused playback
    fn resume(&mut self);

    /// Whether this output is currently occupied by a playing clip
    fn is_playing(&self) -> bool;
}

/// Factory for playback outputs, one call per voice created.
pub trait OutputDevice: Send {
    fn open_output(&self) -> Result<Box<dyn AudioOutput>, SoundError>;
}

/// Output device that emits nothing
///
/// Fallback when no audio host is available: every voice accepts commands
/// and reports idle, so playback requests degrade to silent no-ops.
#[derive(Debug, Default)]
pub struct NullDevice;

struct NullOutput;

impl AudioOutput for NullOutput {
    fn set_clip(&mut self, _clip: &ClipHandle) {}
    fn set_loop(&mut self, _looped: bool) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn play(&mut self) {}
    fn stop(&mut self) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }
}

impl OutputDevice for NullDevice {
    fn open_output(&self) -> Result<Box<dyn AudioOutput>, SoundError> {
        Ok(Box::new(NullOutput))
    }
}

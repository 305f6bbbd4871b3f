//! Rodio output backend
//!
//! Implements [`AudioOutput`] on top of a rodio `Sink`, one sink per voice,
//! all fed from a single shared output stream.

use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::catalog::{ClipData, ClipHandle};
use crate::error::SoundError;
use crate::output::{AudioOutput, OutputDevice};

/// Output device backed by the system's default rodio stream
pub struct RodioDevice {
    stream_handle: OutputStreamHandle,
}

impl RodioDevice {
    /// Open the default output stream
    ///
    /// The returned `OutputStream` must be kept alive for as long as any
    /// voice plays; dropping it silences every sink.
    pub fn try_default() -> Result<(OutputStream, Self), SoundError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| SoundError::DeviceInit(Box::new(e)))?;
        Ok((stream, Self { stream_handle }))
    }

    /// Open the default output stream and leak it
    ///
    /// Used by the process-wide manager: voices are never destroyed for the
    /// lifetime of the process, so the stream is intentionally kept alive
    /// until exit rather than owned by a `!Send` field.
    pub fn leaked() -> Result<Self, SoundError> {
        let (stream, device) = Self::try_default()?;
        std::mem::forget(stream);
        Ok(device)
    }
}

impl OutputDevice for RodioDevice {
    fn open_output(&self) -> Result<Box<dyn AudioOutput>, SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::DeviceInit(Box::new(e)))?;
        Ok(Box::new(RodioVoice {
            stream_handle: self.stream_handle.clone(),
            sink,
            clip: None,
            looped: false,
            volume: 1.0,
        }))
    }
}

/// One rodio-backed playback voice
struct RodioVoice {
    stream_handle: OutputStreamHandle,
    sink: Sink,
    clip: Option<(String, ClipData)>,
    looped: bool,
    volume: f32,
}

impl RodioVoice {
    /// Drop the current sink and queued audio, replacing it with a fresh one.
    /// A stopped rodio sink cannot be reused for new sources.
    fn reset_sink(&mut self) {
        self.sink.stop();
        if let Ok(new_sink) = Sink::try_new(&self.stream_handle) {
            self.sink = new_sink;
        }
    }
}

impl AudioOutput for RodioVoice {
    fn set_clip(&mut self, clip: &ClipHandle) {
        self.clip = Some((clip.name().to_string(), clip.data()));
    }

    fn set_loop(&mut self, looped: bool) {
        self.looped = looped;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }

    fn play(&mut self) {
        let Some((name, data)) = self.clip.clone() else {
            tracing::warn!("Voice started with no clip assigned");
            return;
        };

        self.reset_sink();

        // Note: We must clone here as rodio's Decoder requires owned data
        // with 'static lifetime
        let cursor = std::io::Cursor::new((*data).clone());
        let decoder = match Decoder::new(cursor) {
            Ok(decoder) => decoder,
            Err(e) => {
                tracing::warn!("Failed to decode clip {name:?}, playing nothing: {e}");
                return;
            }
        };

        self.sink.set_volume(self.volume);
        if self.looped {
            self.sink.append(decoder.repeat_infinite());
        } else {
            self.sink.append(decoder);
        }
        self.sink.play();

        tracing::debug!("Playing clip {name:?} (loop={})", self.looped);
    }

    fn stop(&mut self) {
        self.reset_sink();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty()
    }
}

/// Verify a clip payload decodes and report its length when known
///
/// Called once per clip at catalog load time, so a corrupt file surfaces as
/// a load warning instead of silence at play time.
pub fn probe_clip(name: &str, data: &ClipData) -> Result<Option<Duration>, SoundError> {
    let cursor = std::io::Cursor::new((**data).clone());
    let decoder = Decoder::new(cursor).map_err(|e| SoundError::Decode {
        name: name.to_string(),
        source: Box::new(e),
    })?;
    Ok(decoder.total_duration())
}

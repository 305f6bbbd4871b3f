//! Playback controller
//!
//! Public request surface: resolves clip names through the catalog and
//! drives the two voice pools. Music keeps at most one audible track;
//! effects are polyphonic.

use crate::catalog::{AssetSource, Category, ClipCatalog};
use crate::output::OutputDevice;
use crate::pool::VoicePool;

/// Synchronous result of a playback request
///
/// A miss is not an error: the request was ignored and a diagnostic was
/// logged. Callers that do not care can drop the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a playback request may have missed the catalog"]
pub enum PlayOutcome {
    /// The clip was found and handed to a voice
    Played,

    /// No clip with that name in the category; nothing happened
    UnknownClip,

    /// The clip resolved but the output device could not supply a voice;
    /// nothing is playing
    NoVoice,
}

impl PlayOutcome {
    pub fn was_played(&self) -> bool {
        matches!(self, PlayOutcome::Played)
    }
}

/// Name-based playback front end over the catalog and voice pools
pub struct PlaybackController {
    catalog: ClipCatalog,
    device: Box<dyn OutputDevice>,
    music: VoicePool,
    effects: VoicePool,
}

impl PlaybackController {
    /// Create a controller with an empty catalog
    ///
    /// Until [`PlaybackController::load_catalog`] runs, every request is a
    /// warned no-op.
    pub fn new(device: Box<dyn OutputDevice>) -> Self {
        Self {
            catalog: ClipCatalog::new(),
            device,
            music: VoicePool::new(Category::Music),
            effects: VoicePool::new(Category::Effect),
        }
    }

    /// Populate the catalog from an asset source, replacing the empty one
    pub fn load_catalog(&mut self, source: &dyn AssetSource) {
        self.catalog = ClipCatalog::load(source);
    }

    /// Start a music track by name, looped
    ///
    /// Every currently playing music voice is stopped first, so at most one
    /// track is audible once this returns.
    pub fn play_music(&mut self, name: &str) -> PlayOutcome {
        let Some(clip) = self.catalog.lookup(name, Category::Music) else {
            tracing::warn!("Unknown music clip {name:?}, ignoring request");
            return PlayOutcome::UnknownClip;
        };

        // Single-audible-track invariant: silence the whole pool before
        // reassigning, idle or not
        self.music.stop_all();

        let volume = self.music.volume();
        match self.music.acquire(self.device.as_ref()) {
            Some(voice) => {
                voice.begin(clip, clip.loop_default(), volume);
                tracing::info!("Music {name:?} started");
                PlayOutcome::Played
            }
            None => PlayOutcome::NoVoice,
        }
    }

    /// Fire a one-shot effect by name
    ///
    /// No pre-stop: effects overlap freely, growing the pool as needed.
    pub fn play_effect(&mut self, name: &str) -> PlayOutcome {
        let Some(clip) = self.catalog.lookup(name, Category::Effect) else {
            tracing::warn!("Unknown effect clip {name:?}, ignoring request");
            return PlayOutcome::UnknownClip;
        };

        let volume = self.effects.volume();
        match self.effects.acquire(self.device.as_ref()) {
            Some(voice) => {
                voice.begin(clip, clip.loop_default(), volume);
                tracing::debug!("Effect {name:?} started");
                PlayOutcome::Played
            }
            None => PlayOutcome::NoVoice,
        }
    }

    /// Stop every music voice
    pub fn stop_music(&mut self) {
        self.music.stop_all();
    }

    /// Stop every voice in both categories
    pub fn stop_all(&mut self) {
        self.music.stop_all();
        self.effects.stop_all();
    }

    pub fn pause_music(&mut self) {
        self.music.pause_all();
    }

    pub fn resume_music(&mut self) {
        self.music.resume_all();
    }

    /// Set a uniform volume (0.0-1.0) across the music pool
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music.set_volume(volume);
    }

    /// Set a uniform volume (0.0-1.0) across the effect pool
    pub fn set_effect_volume(&mut self, volume: f32) {
        self.effects.set_volume(volume);
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.any_playing()
    }

    /// Voices created so far for music
    pub fn music_voice_count(&self) -> usize {
        self.music.len()
    }

    /// Voices created so far for effects
    pub fn effect_voice_count(&self) -> usize {
        self.effects.len()
    }

    pub fn catalog(&self) -> &ClipCatalog {
        &self.catalog
    }

    #[cfg(test)]
    pub(crate) fn music_pool(&self) -> &VoicePool {
        &self.music
    }

    #[cfg(test)]
    pub(crate) fn effect_pool(&self) -> &VoicePool {
        &self.effects
    }
}

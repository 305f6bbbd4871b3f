//! Sound manager lifecycle
//!
//! Exactly one manager per process: a guarded factory deduplicates
//! competing bootstraps, and catalog initialization runs once on the
//! surviving instance only, after deduplication resolves. Hosts that
//! prefer an explicitly owned context can construct [`SoundManager`]
//! directly and skip the global accessor.

use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::catalog::AssetSource;
use crate::config::SoundConfig;
use crate::controller::{PlayOutcome, PlaybackController};
use crate::output::{NullDevice, OutputDevice};
use crate::rodio_backend::RodioDevice;

static INSTANCE: OnceLock<SoundManager> = OnceLock::new();

struct Inner {
    controller: PlaybackController,
    initialized: bool,
}

/// Process-wide playback manager
///
/// All operations are synchronous and non-blocking. The interior mutex
/// serializes entry points for multi-threaded hosts; single-threaded hosts
/// pay an uncontended lock.
pub struct SoundManager {
    inner: Mutex<Inner>,
}

impl SoundManager {
    /// Construct an uninitialized manager over an output device
    ///
    /// The catalog stays empty until [`SoundManager::init`] runs; until
    /// then every playback request is a warned no-op.
    pub fn new(device: Box<dyn OutputDevice>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                controller: PlaybackController::new(device),
                initialized: false,
            }),
        }
    }

    /// Load the catalog, exactly once
    ///
    /// Idempotent: repeat calls are no-ops. Returns whether this call
    /// performed the initialization.
    pub fn init(&self, source: &dyn AssetSource) -> bool {
        let mut inner = self.inner.lock();
        if inner.initialized {
            return false;
        }
        inner.controller.load_catalog(source);
        inner.initialized = true;
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }

    /// Install the process-wide instance, constructing at most one manager
    ///
    /// The device factory runs only when this call installs the instance,
    /// so a losing bootstrap never opens (or leaks) an output it will not
    /// use. Returns whether this call performed the installation.
    fn get_or_install<F>(make_device: F) -> (&'static SoundManager, bool)
    where
        F: FnOnce() -> Box<dyn OutputDevice>,
    {
        let mut installed = false;
        let manager = INSTANCE.get_or_init(|| {
            installed = true;
            SoundManager::new(make_device())
        });
        (manager, installed)
    }

    /// Install the process-wide instance, or return the existing one
    ///
    /// When two bootstraps race, one constructed manager wins; the loser's
    /// is dropped before it ever touches the catalog, and the source is
    /// consulted only by the surviving instance.
    pub fn bootstrap(
        source: &dyn AssetSource,
        device: Box<dyn OutputDevice>,
    ) -> &'static SoundManager {
        let (manager, installed) = Self::get_or_install(move || device);
        if !installed {
            tracing::debug!("Sound manager already bootstrapped, duplicate discarded");
        }
        manager.init(source);
        manager
    }

    /// Return the process-wide instance, bootstrapping on first use
    ///
    /// Deferred bootstrap reads the platform manifest and opens the default
    /// output device; the device is opened only by the call that installs
    /// the instance. Without an audio host the manager still comes up on
    /// the null device: requests are accepted, nothing is audible.
    pub fn instance() -> &'static SoundManager {
        if let Some(manager) = INSTANCE.get() {
            return manager;
        }

        let config = SoundConfig::load_or_default();
        let (manager, installed) =
            Self::get_or_install(|| -> Box<dyn OutputDevice> {
                match RodioDevice::leaked() {
                    Ok(device) => Box::new(device),
                    Err(e) => {
                        tracing::warn!(
                            "Audio device unavailable, playback will be silent: {e}"
                        );
                        Box::new(NullDevice)
                    }
                }
            });
        if manager.init(&config) {
            manager.set_music_volume(config.music_volume);
            manager.set_effect_volume(config.effect_volume);
            tracing::info!("Sound manager bootstrapped");
        } else if !installed {
            tracing::debug!("Sound manager already bootstrapped, duplicate discarded");
        }
        manager
    }

    /// Start a looping music track; any playing track is stopped first
    pub fn play_music(&self, name: &str) -> PlayOutcome {
        self.inner.lock().controller.play_music(name)
    }

    /// Fire a one-shot effect; overlapping effects play together
    pub fn play_effect(&self, name: &str) -> PlayOutcome {
        self.inner.lock().controller.play_effect(name)
    }

    pub fn stop_music(&self) {
        self.inner.lock().controller.stop_music();
    }

    pub fn pause_music(&self) {
        self.inner.lock().controller.pause_music();
    }

    pub fn resume_music(&self) {
        self.inner.lock().controller.resume_music();
    }

    pub fn set_music_volume(&self, volume: f32) {
        self.inner.lock().controller.set_music_volume(volume);
    }

    pub fn set_effect_volume(&self, volume: f32) {
        self.inner.lock().controller.set_effect_volume(volume);
    }

    pub fn is_music_playing(&self) -> bool {
        self.inner.lock().controller.is_music_playing()
    }

    pub fn music_voice_count(&self) -> usize {
        self.inner.lock().controller.music_voice_count()
    }

    pub fn effect_voice_count(&self) -> usize {
        self.inner.lock().controller.effect_voice_count()
    }

    /// Teardown hook for process exit: silences every voice
    ///
    /// Voices and catalog stay allocated (they live for the process), so
    /// the manager remains usable afterwards.
    pub fn shutdown(&self) {
        self.inner.lock().controller.stop_all();
        tracing::info!("Sound manager shut down, all voices stopped");
    }
}

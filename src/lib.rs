//! voicedeck: runtime sound manager
//!
//! Maps name-based playback requests onto pools of reusable voices:
//! - Looping music tracks, at most one audible at a time
//! - One-shot polyphonic effects
//! - Idle-voice reuse with on-demand pool growth (pools never shrink)
//! - A guarded process-wide singleton with deferred, exactly-once
//!   catalog initialization
//!
//! ## Architecture
//!
//! ```text
//! SoundManager (process-wide, deduplicated)
//!   └── PlaybackController
//!         ├── ClipCatalog            name -> ClipHandle, per category
//!         ├── VoicePool (music)     ─┐ find idle voice or grow,
//!         └── VoicePool (effects)   ─┘ one AudioOutput per voice
//!
//! AudioOutput / OutputDevice: opaque backend seam
//!   ├── RodioDevice  (system audio via rodio sinks)
//!   └── NullDevice   (silent fallback, headless hosts)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voicedeck::SoundManager;
//!
//! let sound = SoundManager::instance();
//! sound.play_music("track_a");
//! sound.play_effect("click");
//! sound.set_music_volume(0.5);
//! sound.stop_music();
//! ```
//!
//! Hosts that avoid globals construct the manager themselves:
//!
//! ```rust,ignore
//! use voicedeck::{RodioDevice, SoundConfig, SoundManager};
//!
//! let (_stream, device) = RodioDevice::try_default()?;
//! let manager = SoundManager::new(Box::new(device));
//! manager.init(&SoundConfig::load_or_default());
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod manager;
pub mod output;
pub mod pool;
pub mod rodio_backend;
pub mod voice;

// Re-export commonly used types
pub use catalog::{AssetManifest, AssetSource, Category, ClipCatalog, ClipDescriptor, ClipHandle};
pub use config::{ClipEntry, SoundConfig};
pub use controller::{PlayOutcome, PlaybackController};
pub use error::{AppResult, SoundError};
pub use manager::SoundManager;
pub use output::{AudioOutput, NullDevice, OutputDevice};
pub use pool::VoicePool;
pub use rodio_backend::RodioDevice;
pub use voice::VoiceChannel;

//! Sound manifest configuration
//!
//! The external asset source in file form: two ordered clip lists (music,
//! effects) naming audio files on disk, serialized as JSON in the platform
//! config directory.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::catalog::{AssetManifest, AssetSource, ClipDescriptor};
use crate::error::SoundError;
use crate::rodio_backend::probe_clip;

fn default_volume() -> f32 {
    1.0
}

/// One clip declaration: catalog name plus the file that backs it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Looping background tracks, in manifest order
    #[serde(default)]
    pub music: Vec<ClipEntry>,

    /// One-shot effects, in manifest order
    #[serde(default)]
    pub effects: Vec<ClipEntry>,

    /// Initial music volume (0.0-1.0), applied at bootstrap
    #[serde(default = "default_volume")]
    pub music_volume: f32,

    /// Initial effect volume (0.0-1.0), applied at bootstrap
    #[serde(default = "default_volume")]
    pub effect_volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            music: Vec::new(),
            effects: Vec::new(),
            music_volume: 1.0,
            effect_volume: 1.0,
        }
    }
}

impl SoundConfig {
    /// Platform-specific manifest location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voicedeck").join("sounds.json"))
    }

    /// Load the manifest from the platform config directory
    ///
    /// An absent manifest is the empty-catalog case, not a failure: logs a
    /// warning and returns the default (empty) config.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("No config directory on this platform, sound manifest empty");
            return Self::default();
        };

        if !path.exists() {
            tracing::warn!(
                "Sound manifest {} not found, no clips will be registered",
                path.display()
            );
            return Self::default();
        }

        let loaded = Self::load_from(&path)
            .with_context(|| format!("reading sound manifest {}", path.display()));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to read sound manifest: {e:#}");
                Self::default()
            }
        }
    }

    /// Load the manifest from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self, SoundError> {
        let contents = fs::read_to_string(path).map_err(|e| SoundError::ManifestLoad {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| SoundError::ManifestLoad {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        Ok(config)
    }

    /// Write the manifest as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SoundError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SoundError::ManifestLoad {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        }
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| SoundError::ManifestLoad {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        fs::write(path, contents).map_err(|e| SoundError::ManifestLoad {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    }
}

/// Read one declared clip into memory, verifying it decodes
fn read_entry(entry: &ClipEntry) -> Result<ClipDescriptor, SoundError> {
    let data = fs::read(&entry.path).map_err(|e| SoundError::ClipLoad {
        path: entry.path.clone(),
        source: e,
    })?;
    let data = Arc::new(data);
    let duration = probe_clip(&entry.name, &data)?;

    tracing::info!(
        "Loaded clip {:?}: {} ({} bytes)",
        entry.name,
        entry.path,
        data.len()
    );

    Ok(ClipDescriptor {
        name: entry.name.clone(),
        data,
        duration,
    })
}

impl AssetSource for SoundConfig {
    fn load(&self) -> Result<AssetManifest, SoundError> {
        // A bad entry is skipped with a warning so it never blocks the
        // rest of the manifest
        let mut manifest = AssetManifest::default();
        for entry in &self.music {
            match read_entry(entry) {
                Ok(descriptor) => manifest.music.push(descriptor),
                Err(e) => tracing::warn!("Skipping clip {:?}: {e}", entry.name),
            }
        }
        for entry in &self.effects {
            match read_entry(entry) {
                Ok(descriptor) => manifest.effects.push(descriptor),
                Err(e) => tracing::warn!("Skipping clip {:?}: {e}", entry.name),
            }
        }
        Ok(manifest)
    }
}

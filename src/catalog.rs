//! Clip catalog
//!
//! Immutable name-to-clip mapping built once from an asset source.
//! Lookups are exact-match and case-sensitive; a missing source is a
//! warning, not a failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::SoundError;

/// Playback categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Background music: looping, one audible track at a time
    Music,

    /// Sound effect: one-shot, polyphonic
    Effect,
}

impl Category {
    /// Whether clips of this category loop unless told otherwise
    pub fn loops_by_default(&self) -> bool {
        matches!(self, Category::Music)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Music => write!(f, "music"),
            Category::Effect => write!(f, "effect"),
        }
    }
}

/// Raw encoded clip payload, shared between the catalog and any voice
/// currently playing the clip.
pub type ClipData = Arc<Vec<u8>>;

/// One clip as delivered by an asset source, before categorization.
#[derive(Debug, Clone)]
pub struct ClipDescriptor {
    pub name: String,
    pub data: ClipData,
    pub duration: Option<Duration>,
}

/// The two ordered descriptor lists an asset source must supply.
#[derive(Debug, Default)]
pub struct AssetManifest {
    pub music: Vec<ClipDescriptor>,
    pub effects: Vec<ClipDescriptor>,
}

/// External asset source consumed by [`ClipCatalog::load`].
pub trait AssetSource {
    fn load(&self) -> Result<AssetManifest, SoundError>;
}

/// Immutable reference to a loaded clip
#[derive(Debug, Clone)]
pub struct ClipHandle {
    name: String,
    category: Category,
    data: ClipData,
    duration: Option<Duration>,
    loop_default: bool,
}

impl ClipHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn data(&self) -> ClipData {
        Arc::clone(&self.data)
    }

    /// Decoded length, when the backend could determine it at load time
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn loop_default(&self) -> bool {
        self.loop_default
    }
}

/// Name-to-clip mapping for both categories
///
/// Populated once via [`ClipCatalog::load`], immutable afterward. An absent
/// or unreadable source leaves the catalog empty; every subsequent lookup
/// misses and playback degrades to a no-op with a diagnostic.
#[derive(Debug, Default)]
pub struct ClipCatalog {
    music: HashMap<String, ClipHandle>,
    effects: HashMap<String, ClipHandle>,
}

impl ClipCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from an asset source
    ///
    /// Never fails: if the source cannot be loaded, logs a warning and
    /// returns an empty catalog.
    pub fn load(source: &dyn AssetSource) -> Self {
        let manifest = match source.load() {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("Sound asset source unavailable, catalog left empty: {e}");
                return Self::new();
            }
        };

        let mut catalog = Self::new();
        for descriptor in manifest.music {
            catalog.insert(Category::Music, descriptor);
        }
        for descriptor in manifest.effects {
            catalog.insert(Category::Effect, descriptor);
        }

        tracing::info!(
            "Clip catalog loaded: {} music, {} effect clips",
            catalog.music.len(),
            catalog.effects.len()
        );
        catalog
    }

    fn insert(&mut self, category: Category, descriptor: ClipDescriptor) {
        let map = match category {
            Category::Music => &mut self.music,
            Category::Effect => &mut self.effects,
        };

        if map.contains_key(&descriptor.name) {
            tracing::warn!(
                "Duplicate {} clip name {:?}, keeping the first",
                category,
                descriptor.name
            );
            return;
        }

        let handle = ClipHandle {
            name: descriptor.name.clone(),
            category,
            data: descriptor.data,
            duration: descriptor.duration,
            loop_default: category.loops_by_default(),
        };
        map.insert(descriptor.name, handle);
    }

    /// Look up a clip by exact name within one category
    pub fn lookup(&self, name: &str, category: Category) -> Option<&ClipHandle> {
        let map = match category {
            Category::Music => &self.music,
            Category::Effect => &self.effects,
        };
        map.get(name)
    }

    /// Number of clips registered for a category
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Music => self.music.len(),
            Category::Effect => self.effects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.music.is_empty() && self.effects.is_empty()
    }
}

/// Build a handle outside of catalog loading, for tests that exercise
/// voices and pools directly.
#[cfg(test)]
pub(crate) fn test_handle(category: Category, descriptor: ClipDescriptor) -> ClipHandle {
    ClipHandle {
        name: descriptor.name,
        category,
        data: descriptor.data,
        duration: descriptor.duration,
        loop_default: category.loops_by_default(),
    }
}

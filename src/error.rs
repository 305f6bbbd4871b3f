use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// These cover the load pipeline (manifest, clip files, decoding) and the
/// output backend. Playback-time failures never propagate past the
/// controller boundary; they degrade to silence plus a diagnostic.

#[derive(Error, Debug)]
pub enum SoundError {
    #[error("Failed to load sound manifest from {path}")]
    ManifestLoad {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to load clip file: {path}")]
    ClipLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode clip: {name}")]
    Decode {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to initialize audio output device")]
    DeviceInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid clip manifest: {0}")]
    InvalidManifest(String),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

use std::path::PathBuf;

/// Errors raised while building or loading a [`SpriteAtlas`](super::SpriteAtlas).
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("failed to read atlas metadata {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid atlas metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("animation '{animation}' references unknown frame '{frame}'")]
    UnknownFrame { animation: String, frame: String },

    #[error("animation '{0}' has no frames")]
    EmptyAnimation(String),
}

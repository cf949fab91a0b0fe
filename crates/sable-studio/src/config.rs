use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runner settings: `sable-studio [ATLAS_JSON]`, frame count from `SABLE_FRAMES`.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub frames: u64,
    /// Atlas metadata to load instead of the built-in demo atlas.
    pub atlas_path: Option<PathBuf>,
    /// Fixed simulation step in seconds.
    pub step: f32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            atlas_path: None,
            step: 1.0 / 60.0,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_parts(std::env::args().skip(1), std::env::var("SABLE_FRAMES").ok())
    }

    pub fn from_parts(
        mut args: impl Iterator<Item = String>,
        frames_var: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = frames_var {
            config.frames = raw
                .trim()
                .parse()
                .with_context(|| format!("SABLE_FRAMES must be a frame count, got {raw:?}"))?;
        }

        config.atlas_path = args.next().map(PathBuf::from);

        if let Some(extra) = args.next() {
            anyhow::bail!("unexpected argument {extra:?}; usage: sable-studio [ATLAS_JSON]");
        }

        Ok(config)
    }
}

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::render::{SpriteDrawData, TextureId};

use super::metadata::AtlasFile;
use super::{AnimationData, AtlasError, SpriteFrame};

/// Name → frame and name → animation tables for one atlas texture.
///
/// Animations are stored behind `Arc` so controllers can hold on to the sequence they
/// are playing without borrowing the atlas. An atlas is typically built once at load
/// time and then shared read-only (`Arc<SpriteAtlas>`).
#[derive(Debug, Default, Clone)]
pub struct SpriteAtlas {
    texture: TextureId,
    texture_size: (u32, u32),
    frames: HashMap<String, SpriteFrame>,
    animations: HashMap<String, Arc<AnimationData>>,
}

impl SpriteAtlas {
    pub fn new(texture: TextureId) -> Self {
        Self { texture, ..Self::default() }
    }

    /// Texture size in texels, used to normalize UVs. `(0, 0)` = unknown.
    pub fn with_texture_size(mut self, width: u32, height: u32) -> Self {
        self.texture_size = (width, height);
        self
    }

    // ── loading ───────────────────────────────────────────────────────────

    /// Parses atlas metadata. See [`super::metadata`] for the schema.
    ///
    /// Malformed JSON is an error. Animations that reference unknown frames are skipped
    /// with a warning; the rest of the atlas still loads.
    pub fn from_json_str(json: &str, texture: TextureId) -> Result<Self, AtlasError> {
        let file: AtlasFile = serde_json::from_str(json)?;

        let mut atlas = SpriteAtlas::new(texture);
        if let Some(meta) = file.texture {
            atlas.texture_size = (meta.width, meta.height);
        }

        for frame in file.frames {
            atlas.add_frame(frame.into());
        }

        for anim in file.animations {
            // Rejections are already logged by `add_animation`.
            let _ = atlas.add_animation(anim.into());
        }

        log::debug!(
            "atlas loaded: {} frames, {} animations",
            atlas.frame_count(),
            atlas.animation_count()
        );

        Ok(atlas)
    }

    /// Reads and parses a metadata file from disk.
    pub fn load_metadata(path: impl AsRef<Path>, texture: TextureId) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, texture)
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Registers a frame, replacing any frame with the same name.
    pub fn add_frame(&mut self, frame: SpriteFrame) {
        self.frames.insert(frame.name.clone(), frame);
    }

    /// Registers an animation after checking that it has frames and that every frame
    /// exists. On error the atlas is left unchanged.
    pub fn add_animation(&mut self, animation: AnimationData) -> Result<(), AtlasError> {
        if animation.frames.is_empty() {
            log::warn!("animation '{}' has no frames, skipping", animation.name);
            return Err(AtlasError::EmptyAnimation(animation.name));
        }

        if let Some(missing) = animation.frames.iter().find(|f| !self.frames.contains_key(*f)) {
            log::warn!(
                "animation '{}' references missing frame '{}', skipping",
                animation.name,
                missing
            );
            return Err(AtlasError::UnknownFrame {
                animation: animation.name.clone(),
                frame: missing.clone(),
            });
        }

        self.animations.insert(animation.name.clone(), Arc::new(animation));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.animations.clear();
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    #[inline]
    pub fn texture_size(&self) -> (u32, u32) {
        self.texture_size
    }

    pub fn frame(&self, name: &str) -> Option<&SpriteFrame> {
        self.frames.get(name)
    }

    pub fn animation(&self, name: &str) -> Option<Arc<AnimationData>> {
        self.animations.get(name).cloned()
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Sorted for stable output.
    pub fn frame_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted for stable output.
    pub fn animation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.animations.keys().cloned().collect();
        names.sort();
        names
    }

    /// Draw data (texture, size, UVs, pivot) for a frame, ready for submission.
    pub fn sprite(&self, frame_name: &str) -> Option<SpriteDrawData> {
        self.frame(frame_name).map(|frame| self.sprite_for(frame))
    }

    pub(crate) fn sprite_for(&self, frame: &SpriteFrame) -> SpriteDrawData {
        let (tw, th) = self.texture_size;
        SpriteDrawData {
            texture: self.texture,
            size: frame.size(),
            uv_rect: frame.uv_rect(tw, th),
            origin: frame.origin,
            ..SpriteDrawData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use std::io::Write;

    const METADATA: &str = r#"{
        "texture": { "width": 128, "height": 64 },
        "frames": [
            { "name": "idle_0", "x": 0,  "y": 0, "w": 32, "h": 32 },
            { "name": "idle_1", "x": 32, "y": 0, "w": 32, "h": 32, "originX": 4, "origin_y": 8 }
        ],
        "animations": [
            { "name": "idle", "frames": ["idle_0", "idle_1"], "frameDuration": 0.2 },
            { "name": "hit", "frames": ["idle_1"], "frameDurations": [0.05], "loop": false },
            { "name": "broken", "frames": ["idle_0", "nope"] }
        ]
    }"#;

    fn atlas_with_frames(names: &[&str]) -> SpriteAtlas {
        let mut atlas = SpriteAtlas::new(TextureId(1));
        for (i, n) in names.iter().enumerate() {
            atlas.add_frame(SpriteFrame::new(*n, i as u32 * 16, 0, 16, 16));
        }
        atlas
    }

    // ── add_animation ─────────────────────────────────────────────────────

    #[test]
    fn rejects_animation_with_unknown_frame() {
        let mut atlas = atlas_with_frames(&["a"]);
        let err = atlas
            .add_animation(AnimationData::new("walk", ["a", "b"], 0.1, true))
            .unwrap_err();

        assert!(matches!(err, AtlasError::UnknownFrame { ref frame, .. } if frame == "b"));
        assert!(!atlas.has_animation("walk"));
        assert_eq!(atlas.animation_count(), 0);
    }

    #[test]
    fn rejects_empty_animation() {
        let mut atlas = atlas_with_frames(&["a"]);
        let empty: [&str; 0] = [];
        let err = atlas.add_animation(AnimationData::new("none", empty, 0.1, true)).unwrap_err();
        assert!(matches!(err, AtlasError::EmptyAnimation(_)));
    }

    #[test]
    fn add_animation_overwrites_by_name() {
        let mut atlas = atlas_with_frames(&["a", "b"]);
        atlas.add_animation(AnimationData::new("x", ["a"], 0.1, true)).unwrap();
        atlas.add_animation(AnimationData::new("x", ["a", "b"], 0.1, true)).unwrap();

        assert_eq!(atlas.animation_count(), 1);
        assert_eq!(atlas.animation("x").unwrap().frame_count(), 2);
    }

    // ── JSON ──────────────────────────────────────────────────────────────

    #[test]
    fn parses_metadata_and_skips_invalid_animations() {
        let atlas = SpriteAtlas::from_json_str(METADATA, TextureId(7)).unwrap();

        assert_eq!(atlas.texture_size(), (128, 64));
        assert_eq!(atlas.frame_names(), vec!["idle_0", "idle_1"]);
        assert_eq!(atlas.animation_names(), vec!["hit", "idle"]);

        let idle = atlas.animation("idle").unwrap();
        assert_eq!(idle.frame_duration, 0.2);
        assert!(idle.looping);

        let hit = atlas.animation("hit").unwrap();
        assert!(!hit.looping);
        assert_eq!(hit.duration(0), 0.05);
        assert_eq!(hit.frame_duration, AnimationData::DEFAULT_FRAME_DURATION);
    }

    #[test]
    fn origin_defaults_and_aliases() {
        let atlas = SpriteAtlas::from_json_str(METADATA, TextureId(7)).unwrap();
        assert_eq!(atlas.frame("idle_0").unwrap().origin, Vec2::new(16.0, 32.0));
        assert_eq!(atlas.frame("idle_1").unwrap().origin, Vec2::new(4.0, 8.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SpriteAtlas::from_json_str("{ \"frames\": [", TextureId(0)).unwrap_err();
        assert!(matches!(err, AtlasError::Json(_)));
    }

    #[test]
    fn loads_metadata_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(METADATA.as_bytes()).unwrap();

        let atlas = SpriteAtlas::load_metadata(file.path(), TextureId(2)).unwrap();
        assert_eq!(atlas.animation_count(), 2);
        assert_eq!(atlas.texture(), TextureId(2));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = SpriteAtlas::load_metadata(&path, TextureId(0)).unwrap_err();
        assert!(matches!(err, AtlasError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    // ── sprite draw data ──────────────────────────────────────────────────

    #[test]
    fn sprite_builds_draw_data() {
        let atlas = SpriteAtlas::from_json_str(METADATA, TextureId(7)).unwrap();
        let s = atlas.sprite("idle_1").unwrap();

        assert_eq!(s.texture, TextureId(7));
        assert_eq!(s.size, Vec2::new(32.0, 32.0));
        assert_eq!(s.uv_rect, Rect::new(0.25, 0.0, 0.25, 0.5));
        assert_eq!(s.origin, Vec2::new(4.0, 8.0));
        assert!(atlas.sprite("nope").is_none());
    }
}

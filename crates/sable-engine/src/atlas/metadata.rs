//! JSON metadata schema produced by the atlas packing tools.
//!
//! ```json
//! {
//!   "texture": { "width": 256, "height": 128 },
//!   "frames": [ { "name": "idle_0", "x": 0, "y": 0, "w": 32, "h": 32, "originX": 16, "originY": 32 } ],
//!   "animations": [ { "name": "idle", "frames": ["idle_0"], "frameDuration": 0.1, "loop": true } ]
//! }
//! ```
//!
//! Every section is optional. Frame origins default to bottom-center.

use serde::Deserialize;

use super::{AnimationData, SpriteFrame};
use crate::coords::Vec2;

#[derive(Debug, Deserialize)]
pub(super) struct AtlasFile {
    #[serde(default)]
    pub texture: Option<TextureMeta>,
    #[serde(default)]
    pub frames: Vec<FrameMeta>,
    #[serde(default)]
    pub animations: Vec<AnimationMeta>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TextureMeta {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct FrameMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: u32,
    #[serde(default)]
    y: u32,
    #[serde(default)]
    w: u32,
    #[serde(default)]
    h: u32,
    #[serde(default, rename = "originX", alias = "origin_x")]
    origin_x: Option<f32>,
    #[serde(default, rename = "originY", alias = "origin_y")]
    origin_y: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnimationMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    frames: Vec<String>,
    #[serde(default = "default_frame_duration", rename = "frameDuration")]
    frame_duration: f32,
    #[serde(default, rename = "frameDurations")]
    frame_durations: Vec<f32>,
    #[serde(default = "default_loop", rename = "loop")]
    looping: bool,
}

fn default_frame_duration() -> f32 {
    AnimationData::DEFAULT_FRAME_DURATION
}

fn default_loop() -> bool {
    true
}

impl From<FrameMeta> for SpriteFrame {
    fn from(m: FrameMeta) -> Self {
        let frame = SpriteFrame::new(m.name, m.x, m.y, m.w, m.h);
        let origin = Vec2::new(
            m.origin_x.unwrap_or(frame.origin.x),
            m.origin_y.unwrap_or(frame.origin.y),
        );
        frame.with_origin(origin)
    }
}

impl From<AnimationMeta> for AnimationData {
    fn from(m: AnimationMeta) -> Self {
        AnimationData::new(m.name, m.frames, m.frame_duration, m.looping)
            .with_frame_durations(m.frame_durations)
    }
}

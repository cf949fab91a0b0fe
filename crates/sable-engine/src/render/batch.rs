//! Batch sink contract and a CPU-side instance packer for GPU backends.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::{SpriteDrawData, TextureId};

/// Destination for the sprites streamed out of a [`RenderQueue`](super::RenderQueue).
///
/// GPU submission lives behind this trait; the engine core only calls
/// `begin` once, `draw` per surviving sprite in paint order, then `end`.
pub trait BatchSink {
    fn begin(&mut self, view_proj: Mat4);
    fn draw(&mut self, sprite: &SpriteDrawData);
    fn end(&mut self);
}

// ── GPU-facing layouts ────────────────────────────────────────────────────

/// Per-frame uniform holding the view-projection matrix (column-major).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// One sprite quad as uploaded to an instance buffer.
///
/// 48 bytes, no padding; every field is 4-byte aligned.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Normalized `[u, v, w, h]`.
    pub uv_rect: [f32; 4],
    pub origin: [f32; 2],
    /// Radians.
    pub rotation: f32,
    /// `0xRRGGBBAA`.
    pub color: u32,
}

impl From<&SpriteDrawData> for SpriteInstance {
    fn from(s: &SpriteDrawData) -> Self {
        Self {
            position: [s.position.x, s.position.y],
            size: [s.size.x, s.size.y],
            uv_rect: [s.uv_rect.origin.x, s.uv_rect.origin.y, s.uv_rect.size.x, s.uv_rect.size.y],
            origin: [s.origin.x, s.origin.y],
            rotation: s.rotation.to_radians(),
            color: s.color.pack_rgba(),
        }
    }
}

/// Contiguous instances sharing one texture; maps to one instanced draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InstanceRun {
    pub texture: TextureId,
    pub start: u32,
    pub count: u32,
}

// ── InstanceBatch ─────────────────────────────────────────────────────────

/// [`BatchSink`] that packs sprites into an instance buffer, split into runs whenever
/// the texture changes. Paint order is preserved across runs.
///
/// Buffers are reused across frames; `begin` clears them without freeing capacity.
#[derive(Debug, Default)]
pub struct InstanceBatch {
    uniform: Option<ViewUniform>,
    instances: Vec<SpriteInstance>,
    runs: Vec<InstanceRun>,
    in_frame: bool,
    frames_completed: u64,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// View uniform of the current/last frame; `None` before the first `begin`.
    pub fn uniform(&self) -> Option<&ViewUniform> {
        self.uniform.as_ref()
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Raw bytes ready for an instance-buffer upload.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn runs(&self) -> &[InstanceRun] {
        &self.runs
    }

    /// Number of `begin`/`end` pairs completed.
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }
}

impl BatchSink for InstanceBatch {
    fn begin(&mut self, view_proj: Mat4) {
        debug_assert!(!self.in_frame, "InstanceBatch::begin called twice without end");
        self.uniform = Some(ViewUniform { view_proj: view_proj.to_cols_array_2d() });
        self.instances.clear();
        self.runs.clear();
        self.in_frame = true;
    }

    fn draw(&mut self, sprite: &SpriteDrawData) {
        debug_assert!(self.in_frame, "InstanceBatch::draw called outside begin/end");

        let index = self.instances.len() as u32;
        self.instances.push(SpriteInstance::from(sprite));

        match self.runs.last_mut() {
            Some(run) if run.texture == sprite.texture => run.count += 1,
            _ => self.runs.push(InstanceRun { texture: sprite.texture, start: index, count: 1 }),
        }
    }

    fn end(&mut self) {
        self.in_frame = false;
        self.frames_completed += 1;
    }
}

use glam::Mat4;

use crate::camera::CameraView;
use crate::coords::{Color, Rect, Transform, Vec2};

use super::{BatchSink, DepthKey, RenderItem, SpriteDrawData};

#[derive(Debug, Clone)]
struct Entry {
    key: DepthKey,
    item: RenderItem,
}

/// Per-frame, depth-sorted sprite stream (painter's algorithm).
///
/// Frame usage:
/// 1. `clear()` at the start of the frame
/// 2. `submit(..)` any number of sprites in any order
/// 3. `sort()` then `render(batch, view_proj)`
///
/// Positions are world-space on submission. At render time each item is offset by the
/// camera transform's position only; rotation and zoom belong to the view-projection
/// matrix handed to the batch.
///
/// Performance characteristics:
/// - `submit()` is O(1)
/// - `clear()` keeps allocated capacity for reuse
#[derive(Debug)]
pub struct RenderQueue {
    entries: Vec<Entry>,
    next_order: u32,
    sorted_dirty: bool,

    /// Screen-space quads drawn after all sorted items (fades, flashes).
    overlays: Vec<Color>,

    camera_transform: Transform,
    culling_bounds: Rect,
    culling_enabled: bool,
    culled_count: usize,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_order: 0,
            sorted_dirty: false,
            overlays: Vec::new(),
            camera_transform: Transform::default(),
            culling_bounds: Rect::from_center(Vec2::zero(), Vec2::new(800.0, 600.0)),
            culling_enabled: false,
            culled_count: 0,
        }
    }

    // ── submission ────────────────────────────────────────────────────────

    /// Queues a sprite. No validation of the depth range is performed.
    #[inline]
    pub fn submit(&mut self, depth: f32, sprite: SpriteDrawData, transform: Transform) {
        self.submit_item(RenderItem::new(depth, sprite, transform));
    }

    #[inline]
    pub fn submit_item(&mut self, item: RenderItem) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.entries.push(Entry { key: DepthKey::new(item.depth, order), item });
        self.sorted_dirty = true;
    }

    /// Queues a quad of `color` covering the culling bounds, drawn after every sorted
    /// item regardless of depth. Overlays are never culled.
    pub fn push_overlay(&mut self, color: Color) {
        self.overlays.push(color);
    }

    /// Drops all items and overlays. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.overlays.clear();
        self.next_order = 0;
        self.sorted_dirty = false;
        self.culled_count = 0;
    }

    /// Orders items back-to-front. Equal depths keep submission order, so sorting an
    /// already sorted queue is a no-op.
    pub fn sort(&mut self) {
        self.entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        self.sorted_dirty = false;
    }

    // ── camera integration ────────────────────────────────────────────────

    pub fn set_camera_transform(&mut self, camera: Transform) {
        self.camera_transform = camera;
    }

    /// Culling rectangle in camera-relative space (world position minus camera position).
    pub fn set_culling_bounds(&mut self, bounds: Rect) {
        self.culling_bounds = bounds;
    }

    pub fn enable_culling(&mut self, enabled: bool) {
        self.culling_enabled = enabled;
    }

    /// Points the queue at a camera view: items are offset by the view center and culled
    /// against the visible extent around it. A rotated view culls against the
    /// axis-aligned box enclosing its rotated extent.
    pub fn set_camera(&mut self, view: &CameraView) {
        self.camera_transform = Transform::from_position(view.center).with_rotation(view.rotation);

        let extent = view.extent();
        let (sin, cos) = view.rotation.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let covered = Vec2::new(
            extent.x * cos + extent.y * sin,
            extent.x * sin + extent.y * cos,
        );
        self.culling_bounds = Rect::from_center(Vec2::zero(), covered);
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Streams surviving items, then overlays, to `batch` between `begin`/`end`.
    ///
    /// Sorts first if anything was submitted since the last `sort()`.
    /// Cull statistics are reset at the start of every call.
    pub fn render<B: BatchSink + ?Sized>(&mut self, batch: &mut B, view_proj: Mat4) {
        if self.sorted_dirty {
            log::debug!("RenderQueue::render called on an unsorted queue; sorting");
            self.sort();
        }

        let mut culled = 0;
        batch.begin(view_proj);

        for entry in &self.entries {
            if self.culling_enabled && self.should_cull(&entry.item) {
                culled += 1;
                continue;
            }

            batch.draw(&self.build_draw_data(&entry.item));
        }
        self.culled_count = culled;

        for &color in &self.overlays {
            let bounds = self.culling_bounds.normalized();
            batch.draw(&SpriteDrawData {
                position: bounds.origin,
                ..SpriteDrawData::solid(bounds.size, color)
            });
        }

        batch.end();
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items in their current order (paint order once sorted).
    pub fn items(&self) -> impl Iterator<Item = &RenderItem> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Items skipped by culling during the most recent `render()`.
    #[inline]
    pub fn culled_count(&self) -> usize {
        self.culled_count
    }

    pub fn reset_stats(&mut self) {
        self.culled_count = 0;
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera_transform.position
    }

    fn should_cull(&self, item: &RenderItem) -> bool {
        let screen = self.world_to_screen(item.transform.position);
        let scale = item.transform.scale;

        // Mirrored sprites (negative scale) normalize to a positive extent.
        let rect = Rect::from_origin_size(
            screen - item.sprite.origin.mul_elem(scale),
            item.sprite.size.mul_elem(scale),
        )
        .normalized();

        if rect.is_empty() {
            return !self.culling_bounds.contains(screen);
        }

        !self.culling_bounds.intersects(rect)
    }

    fn build_draw_data(&self, item: &RenderItem) -> SpriteDrawData {
        let scale = item.transform.scale;
        SpriteDrawData {
            position: self.world_to_screen(item.transform.position),
            rotation: item.transform.rotation,
            size: item.sprite.size.mul_elem(scale),
            origin: item.sprite.origin.mul_elem(scale),
            ..item.sprite
        }
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records everything the queue streams out.
    #[derive(Default)]
    struct RecordingBatch {
        began: usize,
        ended: usize,
        drawn: Vec<SpriteDrawData>,
    }

    impl BatchSink for RecordingBatch {
        fn begin(&mut self, _view_proj: Mat4) {
            self.began += 1;
        }

        fn draw(&mut self, sprite: &SpriteDrawData) {
            self.drawn.push(*sprite);
        }

        fn end(&mut self) {
            self.ended += 1;
        }
    }

    fn sprite(size: f32) -> SpriteDrawData {
        SpriteDrawData::solid(Vec2::new(size, size), Color::WHITE)
    }

    fn at(x: f32, y: f32) -> Transform {
        Transform::from_position(Vec2::new(x, y))
    }

    fn depth_tagged(depth: f32) -> SpriteDrawData {
        // Encode depth in the red channel so draw order is observable.
        SpriteDrawData::solid(Vec2::new(1.0, 1.0), Color::rgb(depth as u8, 0, 0))
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn renders_back_to_front() {
        let mut queue = RenderQueue::new();
        for d in [30.0, 10.0, 50.0, 20.0] {
            queue.submit(d, depth_tagged(d), at(0.0, 0.0));
        }

        queue.sort();
        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);

        let order: Vec<u8> = batch.drawn.iter().map(|s| s.color.r).collect();
        assert_eq!(order, vec![50, 30, 20, 10]);
        assert_eq!((batch.began, batch.ended), (1, 1));
    }

    #[test]
    fn sort_is_idempotent() {
        let mut queue = RenderQueue::new();
        for d in [3.0, 1.0, 3.0, 2.0, 1.0] {
            queue.submit(d, sprite(1.0), at(0.0, 0.0));
        }

        queue.sort();
        let first: Vec<f32> = queue.items().map(|i| i.depth).collect();
        queue.sort();
        let second: Vec<f32> = queue.items().map(|i| i.depth).collect();

        assert_eq!(first, vec![3.0, 3.0, 2.0, 1.0, 1.0]);
        assert_eq!(first, second);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn equal_depths_keep_submission_order() {
        let mut queue = RenderQueue::new();
        queue.submit(1.0, depth_tagged(7.0), at(0.0, 0.0));
        queue.submit(1.0, depth_tagged(8.0), at(0.0, 0.0));
        queue.sort();

        let reds: Vec<u8> = queue.items().map(|i| i.sprite.color.r).collect();
        assert_eq!(reds, vec![7, 8]);
    }

    #[test]
    fn render_sorts_dirty_queue() {
        let mut queue = RenderQueue::new();
        queue.submit(1.0, depth_tagged(1.0), at(0.0, 0.0));
        queue.submit(9.0, depth_tagged(9.0), at(0.0, 0.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);

        assert_eq!(batch.drawn[0].color.r, 9);
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = RenderQueue::new();
        queue.submit(1.0, sprite(1.0), at(0.0, 0.0));
        queue.push_overlay(Color::BLACK);
        queue.clear();

        assert!(queue.is_empty());
        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert!(batch.drawn.is_empty());
    }

    // ── draw data ─────────────────────────────────────────────────────────

    #[test]
    fn draw_data_is_camera_relative_and_scaled() {
        let mut queue = RenderQueue::new();
        queue.set_camera_transform(at(100.0, 50.0));
        let t = at(130.0, 70.0).with_scale(Vec2::new(2.0, 3.0)).with_rotation(45.0);
        let s = SpriteDrawData { origin: Vec2::new(5.0, 10.0), ..sprite(10.0) };
        queue.submit(0.0, s, t);

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);

        let d = batch.drawn[0];
        assert_eq!(d.position, Vec2::new(30.0, 20.0));
        assert_eq!(d.size, Vec2::new(20.0, 30.0));
        assert_eq!(d.origin, Vec2::new(10.0, 30.0));
        assert_eq!(d.rotation, 45.0);
    }

    // ── culling ───────────────────────────────────────────────────────────

    #[test]
    fn culls_items_outside_bounds() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        queue.enable_culling(true);

        queue.submit(1.0, sprite(10.0), at(50.0, 50.0));
        queue.submit(2.0, sprite(10.0), at(500.0, 50.0));
        queue.submit(3.0, sprite(10.0), at(-300.0, -300.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);

        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 2);

        // Stats reset per render rather than accumulating.
        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(queue.culled_count(), 2);

        queue.reset_stats();
        assert_eq!(queue.culled_count(), 0);
    }

    #[test]
    fn partially_visible_item_is_kept() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        queue.enable_culling(true);

        // Position outside, but the 20x20 sprite pokes into the bounds.
        queue.submit(0.0, sprite(20.0), at(-10.0, 50.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 0);
    }

    #[test]
    fn origin_shifts_culling_rect() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        queue.enable_culling(true);

        // Positioned inside, but a large origin pushes the quad entirely left of the bounds.
        let s = SpriteDrawData { origin: Vec2::new(30.0, 0.0), ..sprite(20.0) };
        queue.submit(0.0, s, at(5.0, 50.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(queue.culled_count(), 1);
    }

    #[test]
    fn zero_size_falls_back_to_point_test() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        queue.enable_culling(true);

        queue.submit(0.0, sprite(0.0), at(50.0, 50.0));
        queue.submit(0.0, sprite(0.0), at(150.0, 50.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 1);
    }

    #[test]
    fn culling_disabled_draws_everything() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        queue.submit(0.0, sprite(1.0), at(1000.0, 1000.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 0);
    }

    #[test]
    fn culling_respects_camera_offset() {
        let mut queue = RenderQueue::new();
        queue.set_camera_transform(at(1000.0, 1000.0));
        queue.set_culling_bounds(Rect::from_center(Vec2::zero(), Vec2::new(100.0, 100.0)));
        queue.enable_culling(true);

        queue.submit(0.0, sprite(4.0), at(1010.0, 990.0));
        queue.submit(0.0, sprite(4.0), at(10.0, 10.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 1);
    }

    #[test]
    fn camera_view_sets_culling_extent() {
        let view = CameraView { center: Vec2::new(100.0, 0.0), size: Vec2::new(800.0, 600.0), zoom: 1.0, rotation: 0.0 };
        let mut queue = RenderQueue::new();
        queue.set_camera(&view);
        queue.enable_culling(true);

        queue.submit(0.0, sprite(4.0), at(450.0, 0.0));
        queue.submit(0.0, sprite(4.0), at(100.0, 350.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 1);
    }

    #[test]
    fn rotated_camera_keeps_corner_sprites() {
        let view = CameraView { center: Vec2::zero(), size: Vec2::new(800.0, 600.0), zoom: 1.0, rotation: 45.0 };
        let mut queue = RenderQueue::new();
        queue.set_camera(&view);
        queue.enable_culling(true);

        // Outside the unrotated 800x600 box, but on screen once the view turns 45°.
        queue.submit(0.0, sprite(4.0), at(0.0, 350.0));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);
        assert_eq!(batch.drawn.len(), 1);
        assert_eq!(queue.culled_count(), 0);

        let screen = view.world_to_screen(Vec2::new(0.0, 350.0), crate::coords::Viewport::new(800.0, 600.0));
        assert!((0.0..=800.0).contains(&screen.x) && (0.0..=600.0).contains(&screen.y));
    }

    // ── overlays ──────────────────────────────────────────────────────────

    #[test]
    fn overlays_draw_last_over_bounds() {
        let mut queue = RenderQueue::new();
        queue.set_culling_bounds(Rect::new(-50.0, -50.0, 100.0, 100.0));
        queue.submit(0.0, sprite(1.0), at(0.0, 0.0));
        queue.push_overlay(Color::BLACK.with_alpha(128));

        let mut batch = RecordingBatch::default();
        queue.render(&mut batch, Mat4::IDENTITY);

        assert_eq!(batch.drawn.len(), 2);
        let overlay = batch.drawn[1];
        assert_eq!(overlay.position, Vec2::new(-50.0, -50.0));
        assert_eq!(overlay.size, Vec2::new(100.0, 100.0));
        assert_eq!(overlay.color.a, 128);
    }
}

use glam::{Mat4, Vec3};

use crate::coords::{Rect, Vec2, Viewport};

/// Snapshot of a camera for one frame, shake already applied.
///
/// World space is +Y down. The projection maps the view's `size` (in world units at
/// zoom 1) onto clip space with `center` at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraView {
    pub center: Vec2,
    pub size: Vec2,
    pub zoom: f32,
    /// Degrees.
    pub rotation: f32,
}

impl CameraView {
    /// World-space extent actually visible: `size * zoom`.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.size * self.zoom
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.extent())
    }

    /// World → view space: translate to the center, undo rotation, undo zoom.
    pub fn view_matrix(&self) -> Mat4 {
        self.relative_view_matrix()
            * Mat4::from_translation(Vec3::new(-self.center.x, -self.center.y, 0.0))
    }

    /// Like [`view_matrix`](Self::view_matrix) for coordinates that are already
    /// relative to the camera center, as a [`RenderQueue`](crate::render::RenderQueue)
    /// emits them.
    pub fn relative_view_matrix(&self) -> Mat4 {
        let inv_zoom = 1.0 / self.zoom;
        Mat4::from_scale(Vec3::new(inv_zoom, inv_zoom, 1.0))
            * Mat4::from_rotation_z(-self.rotation.to_radians())
    }

    pub fn projection(&self) -> Mat4 {
        let half = self.size * 0.5;
        // Top edge maps to +1 so +Y points down the screen.
        Mat4::orthographic_rh(-half.x, half.x, half.y, -half.y, -1.0, 1.0)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view_matrix()
    }

    /// Matrix to hand to [`RenderQueue::render`](crate::render::RenderQueue::render).
    #[inline]
    pub fn relative_view_projection(&self) -> Mat4 {
        self.projection() * self.relative_view_matrix()
    }

    /// World point → pixel coordinates (top-left origin) in `viewport`.
    pub fn world_to_screen(&self, world: Vec2, viewport: Viewport) -> Vec2 {
        let ndc = self.view_projection().project_point3(Vec3::new(world.x, world.y, 0.0));
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }

    /// Pixel coordinates in `viewport` → world point.
    pub fn screen_to_world(&self, screen: Vec2, viewport: Viewport) -> Vec2 {
        if !viewport.is_valid() {
            return self.center;
        }
        let ndc = Vec3::new(
            screen.x / viewport.width * 2.0 - 1.0,
            1.0 - screen.y / viewport.height * 2.0,
            0.0,
        );
        let world = self.view_projection().inverse().project_point3(ndc);
        Vec2::new(world.x, world.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn view() -> CameraView {
        CameraView { center: Vec2::new(100.0, 50.0), size: Vec2::new(800.0, 600.0), zoom: 1.0, rotation: 0.0 }
    }

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn center_maps_to_screen_center() {
        let s = view().world_to_screen(Vec2::new(100.0, 50.0), VIEWPORT);
        assert_abs_diff_eq!(s.x, 400.0, epsilon = 1e-3);
        assert_abs_diff_eq!(s.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn top_left_of_view_maps_to_origin() {
        let v = view();
        let corner = v.bounds().origin;
        let s = v.world_to_screen(corner, VIEWPORT);
        assert_abs_diff_eq!(s.x, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(s.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn zoom_widens_visible_area() {
        let v = CameraView { zoom: 2.0, ..view() };
        assert_eq!(v.extent(), Vec2::new(1600.0, 1200.0));

        let s = v.world_to_screen(Vec2::new(300.0, 50.0), VIEWPORT);
        assert_abs_diff_eq!(s.x, 500.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_round_trip_with_rotation() {
        let v = CameraView { rotation: 30.0, zoom: 1.5, ..view() };
        let world = Vec2::new(-20.0, 240.0);
        let back = v.screen_to_world(v.world_to_screen(world, VIEWPORT), VIEWPORT);
        assert_abs_diff_eq!(back.x, world.x, epsilon = 1e-2);
        assert_abs_diff_eq!(back.y, world.y, epsilon = 1e-2);
    }

    #[test]
    fn relative_matrix_ignores_center() {
        let v = view();
        let rel = v.relative_view_projection().project_point3(Vec3::new(0.0, 0.0, 0.0));
        let abs = v.view_projection().project_point3(Vec3::new(100.0, 50.0, 0.0));
        assert_abs_diff_eq!(rel.x, abs.x, epsilon = 1e-5);
        assert_abs_diff_eq!(rel.y, abs.y, epsilon = 1e-5);
    }
}

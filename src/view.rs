//! Camera over the complex plane.

use glam::{DMat4, DVec2, DVec3, Mat4};

use crate::screen;

pub const MIN_VERTICAL_FOV: f64 = 1e-5;
pub const MAX_VERTICAL_FOV: f64 = 10.0;

const ZOOM_RATE: f64 = 0.1;
const NEAR: f64 = 0.1;
const FAR: f64 = 100.0;

/// What part of the complex plane is on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Plane coordinate at the centre of the viewport.
    pub origin: DVec2,
    /// Height of the visible region in plane units. Always within
    /// [`MIN_VERTICAL_FOV`]`..=`[`MAX_VERTICAL_FOV`].
    pub vertical_fov: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            origin: DVec2::new(-0.5, 0.0),
            vertical_fov: 2.5,
        }
    }
}

/// Edges of the orthographic box, in plane units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl ViewState {
    pub fn pan(&mut self, delta_world: DVec2) {
        self.origin -= delta_world;
    }

    /// Positive `scroll_y` zooms in.
    pub fn zoom(&mut self, scroll_y: f64) {
        self.vertical_fov = (self.vertical_fov * (-ZOOM_RATE * scroll_y).exp())
            .clamp(MIN_VERTICAL_FOV, MAX_VERTICAL_FOV);
    }

    /// Convert a pointer movement in physical pixels to plane units.
    ///
    /// Returns `None` for a zero-height viewport.
    pub fn screen_to_world(&self, delta: DVec2, viewport: screen::Size) -> Option<DVec2> {
        if viewport.height == 0 {
            return None;
        }
        Some(delta * self.vertical_fov / viewport.height as f64)
    }

    /// `bottom` lies above `origin` and `top` below it. Pointer coordinates grow
    /// downwards, so this keeps the plane oriented the way the pointer moves.
    pub fn bounds(&self, viewport: screen::Size) -> Bounds {
        let half_height = 0.5 * self.vertical_fov;
        let half_width = half_height * viewport.aspect_ratio();
        Bounds {
            left: self.origin.x - half_width,
            right: self.origin.x + half_width,
            bottom: self.origin.y + half_height,
            top: self.origin.y - half_height,
        }
    }

    /// Model-view-projection matrix for the quad: the model is pushed to
    /// `z = -1` and then orthographically projected onto [`Self::bounds`].
    pub fn projection(&self, viewport: screen::Size) -> Mat4 {
        let Bounds {
            left,
            right,
            bottom,
            top,
        } = self.bounds(viewport);
        let mvp = DMat4::orthographic_rh(left, right, bottom, top, NEAR, FAR)
            * DMat4::from_translation(DVec3::new(0.0, 0.0, -1.0));
        Mat4::from_cols_array(&mvp.to_cols_array().map(|value| value as f32))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    const VIEWPORT: screen::Size = screen::Size {
        width: 800,
        height: 450,
    };

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.origin, DVec2::new(-0.5, 0.0));
        assert_eq!(view.vertical_fov, 2.5);
    }

    #[test]
    fn test_default_bounds() {
        let bounds = ViewState::default().bounds(VIEWPORT);
        let aspect = 800.0 / 450.0;
        assert_eq!(bounds.left, -0.5 - 0.5 * 2.5 * aspect);
        assert_eq!(bounds.right, -0.5 + 0.5 * 2.5 * aspect);
        assert_close(bounds.left, -2.7222, 1e-4);
        assert_close(bounds.right, 1.7222, 1e-4);
        assert_eq!(bounds.bottom, 1.25);
        assert_eq!(bounds.top, -1.25);
    }

    #[test]
    fn test_zoom_in_one_step() {
        let mut view = ViewState::default();
        view.zoom(1.0);
        assert_close(view.vertical_fov, 2.5 * (-0.1f64).exp(), 1e-15);
        assert_close(view.vertical_fov, 2.262, 1e-3);
    }

    #[test]
    fn test_zoom_then_inverse_restores_fov() {
        let mut view = ViewState::default();
        view.zoom(3.5);
        view.zoom(-3.5);
        assert_close(view.vertical_fov, 2.5, 1e-12);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = ViewState::default();
        view.zoom(-1000.0);
        assert_eq!(view.vertical_fov, MAX_VERTICAL_FOV);
        view.zoom(10_000.0);
        assert_eq!(view.vertical_fov, MIN_VERTICAL_FOV);

        // Clamping loses information, so the inverse no longer restores.
        let mut view = ViewState::default();
        view.zoom(-100.0);
        view.zoom(100.0);
        assert!(view.vertical_fov < 2.5);
    }

    #[test]
    fn test_pan_is_additive() {
        let a = DVec2::new(0.25, -0.125);
        let b = DVec2::new(-0.5, 0.75);

        let mut separately = ViewState::default();
        separately.pan(a);
        separately.pan(b);

        let mut together = ViewState::default();
        together.pan(a + b);

        assert_eq!(separately, together);
        assert_eq!(together.origin, DVec2::new(-0.25, -0.625));
    }

    #[test]
    fn test_drag_in_pixels_to_world() {
        let mut view = ViewState::default();
        let delta = view
            .screen_to_world(DVec2::new(10.0, 0.0), VIEWPORT)
            .unwrap();
        assert_close(delta.x, 10.0 * 2.5 / 450.0, 1e-15);
        assert_close(delta.x, 0.0556, 1e-4);
        assert_eq!(delta.y, 0.0);

        view.pan(delta);
        assert_close(view.origin.x, -0.5 - 0.0556, 1e-4);
    }

    #[test]
    fn test_zero_height_viewport_has_no_world_delta() {
        let view = ViewState::default();
        let viewport = screen::Size {
            width: 800,
            height: 0,
        };
        assert_eq!(view.screen_to_world(DVec2::new(10.0, 5.0), viewport), None);
    }

    #[test]
    fn test_projection_is_pure() {
        let view = ViewState {
            origin: DVec2::new(0.3, -0.7),
            vertical_fov: 0.01,
        };
        let first = view.projection(VIEWPORT).to_cols_array();
        let second = view.projection(VIEWPORT).to_cols_array();
        assert_eq!(
            first.map(f32::to_bits),
            second.map(f32::to_bits)
        );
    }

    #[test]
    fn test_projection_maps_bounds_to_clip_space() {
        let view = ViewState::default();
        let bounds = view.bounds(VIEWPORT);
        let mvp = view.projection(VIEWPORT);

        let corner = mvp * Vec4::new(bounds.left as f32, bounds.bottom as f32, 0.0, 1.0);
        assert!((corner.x + 1.0).abs() < 1e-5);
        assert!((corner.y + 1.0).abs() < 1e-5);

        let corner = mvp * Vec4::new(bounds.right as f32, bounds.top as f32, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);

        let centre = mvp * Vec4::new(-0.5, 0.0, 0.0, 1.0);
        assert!(centre.x.abs() < 1e-6);
        assert!(centre.y.abs() < 1e-6);
        assert!(centre.z > 0.0 && centre.z < 1.0);
        assert_eq!(centre.w, 1.0);
    }

    #[test]
    fn test_projection_flips_vertically() {
        let view = ViewState::default();
        let mvp = view.projection(VIEWPORT);
        let above = mvp * Vec4::new(-0.5, 1.0, 0.0, 1.0);
        assert!(above.y < 0.0);
    }
}

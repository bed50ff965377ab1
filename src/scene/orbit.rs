//! Orbit camera control: drag to rotate around a focus point, wheel to zoom
//!
//! Pure state + math; input polling stays in the application layer so this
//! can be driven (and tested) with plain deltas. Writes only the camera pose
//! fields, never the derived matrices.

use std::f32::consts::FRAC_PI_2;

use crate::rasterizer::{Camera, Vec3};

/// Drag deltas are given as fractions of the viewport, scaled up to radians.
const ROT_MULTIPLIER: f32 = 8.0;
/// Keep a little margin before the poles so the look-at basis stays valid.
const ELEVATION_LIMIT: f32 = FRAC_PI_2 * 0.9;
const ZOOM_STEP: f32 = 0.1;
const MIN_ZOOM: f32 = 0.05;

pub struct OrbitControl {
    pub focus: Vec3,
    pub distance: f32,
    azimuth: f32,
    elevation: f32,
    zoom: f32,
}

impl OrbitControl {
    pub fn new(focus: Vec3, distance: f32) -> Self {
        Self {
            focus,
            distance,
            azimuth: -FRAC_PI_2 / 2.0,
            elevation: FRAC_PI_2 / 4.0,
            zoom: 1.0,
        }
    }

    /// Apply a mouse drag, with `dx`/`dy` normalized by the viewport size.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.azimuth += dx * ROT_MULTIPLIER;
        self.elevation =
            (self.elevation + dy * ROT_MULTIPLIER).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// One wheel notch; positive zooms out.
    pub fn apply_scroll(&mut self, direction: f32) {
        if direction != 0.0 {
            self.set_zoom(self.zoom + direction.signum() * ZOOM_STEP);
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Place the camera on a sphere of radius `distance * zoom` around the
    /// focus and aim it there.
    pub fn update_camera(&self, cam: &mut Camera) {
        cam.use_direction = false;
        cam.target = self.focus;

        let radius = self.distance * self.zoom;
        let y = self.elevation.sin() * radius;
        let horizontal = self.elevation.cos() * radius;
        cam.position = self.focus
            + Vec3::new(
                (self.azimuth + FRAC_PI_2).cos() * horizontal,
                y,
                (self.azimuth + FRAC_PI_2).sin() * horizontal,
            );
    }
}

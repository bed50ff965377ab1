//! Application state: scene setup, input handling, model selection
//!
//! All mutation of the camera pose and model transforms happens here, before
//! the pipeline runs; during a frame's render nothing touches them.

use macroquad::prelude::*;

use crate::config::AppConfig;
use crate::rasterizer::{Camera, FaceEncoding, GeometryError, Model, RenderSettings, Vec3};
use crate::scene::{cube, octahedron, pyramid, OrbitControl, Tween};

/// Vertical travel of the idle bobbing animation, world units
const BOB_AMPLITUDE: f32 = 0.4;

pub struct AppState {
    pub camera: Camera,
    /// Model library; geometry is allocated once, selection just swaps the
    /// active index
    pub models: Vec<Model>,
    pub model_names: Vec<&'static str>,
    pub active_model: usize,
    pub orbit: OrbitControl,
    pub bob: Tween,
    pub settings: RenderSettings,
    last_mouse: Option<(f32, f32)>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, GeometryError> {
        let mut camera = Camera::new();
        camera.set_perspective(
            config.fov_degrees.to_radians(),
            camera.aspect_ratio,
            config.near,
            config.far,
        );

        let models = vec![
            Model::new(cube(2.0), FaceEncoding::FaceNormals)?,
            Model::new(pyramid(2.4), FaceEncoding::FaceNormals)?,
            Model::new(octahedron(2.6), FaceEncoding::FaceNormals)?,
        ];

        let mut bob = Tween::ease_in_out(32);
        bob.start(2.0, 0.25);

        Ok(Self {
            camera,
            models,
            model_names: vec!["cube", "pyramid", "octahedron"],
            active_model: 0,
            orbit: OrbitControl::new(Vec3::ZERO, config.orbit_distance),
            bob,
            settings: RenderSettings {
                background: config.background,
                wire: config.wire,
                backface_cull: config.backface_cull,
            },
            last_mouse: None,
        })
    }

    /// Poll macroquad input and feed it to the scene controls.
    pub fn handle_input(&mut self, viewport: (f32, f32)) {
        for (i, key) in [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3]
            .into_iter()
            .enumerate()
        {
            if i < self.models.len() && is_key_pressed(key) && self.active_model != i {
                self.active_model = i;
                log::info!("model: {}", self.model_names[i]);
            }
        }

        if is_key_pressed(KeyCode::B) {
            self.settings.backface_cull = !self.settings.backface_cull;
            log::info!("backface culling: {}", self.settings.backface_cull);
        }

        let (mx, my) = mouse_position();
        if is_mouse_button_down(MouseButton::Left) {
            if let Some((lx, ly)) = self.last_mouse {
                self.orbit
                    .apply_drag((mx - lx) / viewport.0, (my - ly) / viewport.1);
            }
        }
        self.last_mouse = Some((mx, my));

        // wheel up zooms in
        let wheel = mouse_wheel().1;
        if wheel != 0.0 {
            self.orbit.apply_scroll(-wheel);
        }
    }

    /// Advance the scene: tween the active model's position, re-derive its
    /// world matrix, then let the orbit control write the camera pose.
    pub fn update(&mut self, elapsed: f32) {
        self.bob.update(elapsed);
        let bob_y = (self.bob.value() - 0.5) * BOB_AMPLITUDE;
        self.models[self.active_model].set_position(Vec3::new(0.0, bob_y, 0.0));

        self.orbit.update_camera(&mut self.camera);
    }
}

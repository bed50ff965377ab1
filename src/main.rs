//! Wiresterizer: real-time software wireframe renderer
//!
//! The geometry stage runs entirely on the CPU: camera and projection
//! transforms, near-plane and viewport clipping, integer Bresenham lines
//! into a packed pixel buffer. The GPU's only job is to show that buffer as
//! a textured quad. Drag to orbit, scroll to zoom, 1-3 to switch models,
//! B to toggle back-face culling.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod rasterizer;
mod scene;
mod surface;

use app::AppState;
use macroquad::prelude::*;
use rasterizer::{render_scene, Framebuffer, MAX_HEIGHT, MAX_WIDTH};
use surface::create_surface;

/// The buffer never gets wider than 4:3; a narrower window letterboxes.
const MIN_ASPECT: f32 = 4.0 / 3.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Wiresterizer v{}", VERSION),
        window_width: MAX_WIDTH as i32,
        window_height: MAX_HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Render-buffer size for the current window: clamped to the renderer
/// maximum with a 4:3 aspect floor.
fn target_buffer_size(screen_w: f32, screen_h: f32) -> (usize, usize) {
    let w = screen_w.min(MAX_WIDTH as f32).max(1.0);
    let mut h = screen_h.min(MAX_HEIGHT as f32).max(1.0);
    if w / h < MIN_ASPECT {
        h = w / MIN_ASPECT;
    }
    (w as usize, (h as usize).max(1))
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let config = config::load_or_default("assets/config.ron");

    let mut app = match AppState::new(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("scene geometry failed to decode: {e}");
            return;
        }
    };
    let mut fb = Framebuffer::new(MAX_WIDTH, MAX_HEIGHT);
    let mut surface = create_surface(config.presentation);

    log::info!(
        "wiresterizer v{} ready: {} models, {}x{} max buffer",
        VERSION,
        app.models.len(),
        MAX_WIDTH,
        MAX_HEIGHT
    );

    loop {
        let elapsed = get_frame_time();

        // the window may have resized; the buffer and the projection's
        // aspect ratio follow it every frame
        let (tw, th) = target_buffer_size(screen_width(), screen_height());
        fb.resize(tw, th);

        app.handle_input((tw as f32, th as f32));
        app.update(elapsed);

        let AppState {
            camera,
            models,
            active_model,
            settings,
            ..
        } = &mut app;
        let active = [&models[*active_model]];
        render_scene(&mut fb, camera, &active, settings);

        surface.present(&fb);
        next_frame().await;
    }
}

//! Presentation surfaces: hand the finished framebuffer to the display
//!
//! The pipeline only ever writes into the `Framebuffer`; which of these
//! surfaces carries it to the screen is invisible to it. Both scale the
//! buffer to fit the window with nearest-neighbour filtering.

use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rasterizer::Framebuffer;

/// Which present strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentMode {
    /// Recreate the texture from the buffer every frame
    Blit,
    /// Keep one texture alive and stream pixel updates into it
    #[default]
    Stream,
}

pub trait PresentSurface {
    /// Capability check; callers pick a fallback when unsupported.
    fn is_supported(&self) -> bool {
        true
    }

    fn present(&mut self, fb: &Framebuffer);
}

/// Builds a fresh texture from the buffer each frame. Always available.
pub struct BlitSurface;

impl PresentSurface for BlitSurface {
    fn present(&mut self, fb: &Framebuffer) {
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_fitted(&texture, fb);
    }
}

/// Keeps a persistent texture and uploads the buffer into it in place,
/// recreating only when the buffer size changes.
pub struct StreamSurface {
    image: Image,
    texture: Option<Texture2D>,
}

impl StreamSurface {
    pub fn new() -> Self {
        Self {
            image: Image {
                bytes: Vec::new(),
                width: 0,
                height: 0,
            },
            texture: None,
        }
    }
}

impl Default for StreamSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentSurface for StreamSurface {
    fn present(&mut self, fb: &Framebuffer) {
        let (w, h) = (fb.width as u16, fb.height as u16);
        if self.texture.is_none() || self.image.width != w || self.image.height != h {
            self.image = Image {
                bytes: fb.pixels.clone(),
                width: w,
                height: h,
            };
            let texture = Texture2D::from_rgba8(w, h, &fb.pixels);
            texture.set_filter(FilterMode::Nearest);
            self.texture = Some(texture);
        } else {
            self.image.bytes.copy_from_slice(&fb.pixels);
            if let Some(texture) = &self.texture {
                texture.update(&self.image);
            }
        }

        if let Some(texture) = &self.texture {
            draw_fitted(texture, fb);
        }
    }
}

/// Scale to fit the window, preserving the buffer's aspect ratio, centered.
fn draw_fitted(texture: &Texture2D, fb: &Framebuffer) {
    let sw = screen_width();
    let sh = screen_height();
    let scale = (sw / fb.width as f32).min(sh / fb.height as f32);
    let dw = fb.width as f32 * scale;
    let dh = fb.height as f32 * scale;
    draw_texture_ex(
        texture,
        (sw - dw) / 2.0,
        (sh - dh) / 2.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(dw, dh)),
            ..Default::default()
        },
    );
}

/// Pick the surface for the requested mode, falling back to the plain blit
/// when the streamed path is unavailable.
pub fn create_surface(mode: PresentMode) -> Box<dyn PresentSurface> {
    match mode {
        PresentMode::Blit => Box::new(BlitSurface),
        PresentMode::Stream => {
            let surface = StreamSurface::new();
            if surface.is_supported() {
                Box::new(surface)
            } else {
                log::warn!("streamed presentation unavailable, falling back to per-frame blit");
                Box::new(BlitSurface)
            }
        }
    }
}

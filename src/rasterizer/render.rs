//! Per-frame wireframe pipeline: transform, clip, rasterize
//!
//! Models are drawn in array order with no depth sorting; hidden-surface
//! removal is limited to the optional back-face rejection.

use super::camera::Camera;
use super::clip::{clip_near, clip_viewport};
use super::framebuffer::{Color, Framebuffer};
use super::math::{Vec2, Vec3};
use super::model::{Face, Model};

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub background: Color,
    pub wire: Color,
    /// Skip faces whose normal points away from the camera
    pub backface_cull: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            wire: Color::WHITE,
            backface_cull: true,
        }
    }
}

/// Render one frame: clear, re-derive the camera matrices against the
/// buffer's current aspect ratio, then draw every model. Pure side effect on
/// the framebuffer; the pipeline keeps no state across invocations.
pub fn render_scene(
    fb: &mut Framebuffer,
    camera: &mut Camera,
    models: &[&Model],
    settings: &RenderSettings,
) {
    fb.clear(settings.background);
    if fb.width > 0 && fb.height > 0 {
        camera.set_aspect_ratio(fb.width as f32 / fb.height as f32);
    }
    camera.update_matrices();
    draw_models(fb, camera, models, settings);
}

/// Transform, clip and rasterize the models with the camera's current
/// matrices. Split from `render_scene` so callers that manage the projection
/// themselves can drive the geometry stage directly.
pub fn draw_models(fb: &mut Framebuffer, camera: &Camera, models: &[&Model], settings: &RenderSettings) {
    let width = fb.width as f32;
    let height = fb.height as f32;
    // per-face scratch, reused across the whole frame
    let mut face_verts: Vec<Vec3> = Vec::with_capacity(8);

    for model in models {
        let mvp = camera.view_projection_mat * model.world_mat;

        for face in model.faces() {
            if settings.backface_cull && faces_away(camera, model, &face) {
                continue;
            }

            face_verts.clear();
            face_verts.extend(face.vertices().map(|v| mvp.transform_point(v)));

            // consecutive vertex pairs, closing the polygon back to the
            // first vertex; quads are just the n = 4 case of the walk
            let n = face_verts.len();
            for i in 0..n {
                let v1 = face_verts[i];
                let v2 = face_verts[(i + 1) % n];

                let Some((v1, v2)) = clip_near(v1, v2, camera.near) else {
                    continue;
                };
                let a = to_screen(v1, width, height);
                let b = to_screen(v2, width, height);
                let Some((a, b)) = clip_viewport(a, b, width, height) else {
                    continue;
                };
                fb.draw_line(a.x, a.y, b.x, b.y, settings.wire);
            }
        }
    }
}

/// Approximate visibility test: the face is rejected when its world-space
/// normal does not point back toward the camera. The normal comes from the
/// buffer when authored, otherwise from the first three world-space
/// vertices of the face.
fn faces_away(camera: &Camera, model: &Model, face: &Face<'_>) -> bool {
    let first = model.world_mat.transform_point(face.vertex(0));
    let normal = match face.normal {
        Some(n) => model.world_mat.transform_direction(n),
        None => {
            if face.vertex_count() < 3 {
                return false;
            }
            let b = model.world_mat.transform_point(face.vertex(1));
            let c = model.world_mat.transform_point(face.vertex(2));
            (b - first).cross(c - first)
        }
    };
    (first - camera.position).dot(normal) >= 0.0
}

/// Perspective divide and viewport mapping. `x / z` in `[-1, 1]` covers
/// `[0, width]`; y is flipped because screen space grows downward.
fn to_screen(v: Vec3, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (v.x / v.z * width + width) / 2.0,
        height - (v.y / v.z * height + height) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::model::FaceEncoding;
    use crate::scene::cube;
    use approx::assert_relative_eq;

    /// The end-to-end scenario camera: at (0, 0, 3) looking at the origin.
    fn scenario_camera() -> Camera {
        let mut cam = Camera::new();
        cam.set_perspective(45.0_f32.to_radians(), 1.0, 0.01, 1000.0);
        cam.use_direction = false;
        cam.position = Vec3::new(0.0, 0.0, 3.0);
        cam.target = Vec3::ZERO;
        cam.update_matrices();
        cam
    }

    fn wire_pixel_count(fb: &Framebuffer) -> usize {
        let mut count = 0;
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.pixel(x, y) == Color::WHITE {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_projection_round_trip_hits_screen_center() {
        let cam = scenario_camera();
        // a point on the near plane straight ahead of the camera
        let p = cam
            .view_projection_mat
            .transform_point(Vec3::new(0.0, 0.0, 3.0 - cam.near));
        assert_relative_eq!(p.z, cam.near, epsilon = 1e-6);
        let s = to_screen(p, 640.0, 480.0);
        assert_relative_eq!(s.x, 320.0, epsilon = 1e-3);
        assert_relative_eq!(s.y, 240.0, epsilon = 1e-3);
    }

    #[test]
    fn test_screen_mapping_flips_y() {
        // view space y grows upward, screen y downward
        let above = to_screen(Vec3::new(0.0, 1.0, 2.0), 640.0, 480.0);
        assert!(above.y < 240.0);
        let below = to_screen(Vec3::new(0.0, -1.0, 2.0), 640.0, 480.0);
        assert!(below.y > 240.0);
    }

    #[test]
    fn test_end_to_end_unit_cube_scenario() {
        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        let cam = scenario_camera();
        let model = Model::new(cube(1.0), FaceEncoding::FaceNormals).unwrap();

        draw_models(&mut fb, &cam, &[&model], &RenderSettings::default());

        let wire = wire_pixel_count(&fb);
        // a non-empty, bounded set of pixels: some edges drawn, background
        // still dominant
        assert!(wire > 0);
        assert!(wire < 640 * 480 / 2);
    }

    #[test]
    fn test_render_scene_tracks_buffer_aspect() {
        let mut fb = Framebuffer::new(640, 480);
        let mut cam = scenario_camera();
        let model = Model::new(cube(1.0), FaceEncoding::FaceNormals).unwrap();
        render_scene(&mut fb, &mut cam, &[&model], &RenderSettings::default());
        assert_relative_eq!(cam.aspect_ratio, 640.0 / 480.0);
        assert!(wire_pixel_count(&fb) > 0);
    }

    #[test]
    fn test_edge_straddling_camera_is_near_clipped_not_garbled() {
        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        let cam = scenario_camera();
        // a long beam passing through the camera position
        let buf = vec![
            2.0, //
            0.0, 0.0, -10.0, //
            0.0, 0.0, 10.0,
        ];
        let model = Model::new(buf, FaceEncoding::Flat).unwrap();
        let settings = RenderSettings {
            backface_cull: false,
            ..RenderSettings::default()
        };
        draw_models(&mut fb, &cam, &[&model], &settings);
        // the visible part survives, nothing explodes behind the camera
        assert!(wire_pixel_count(&fb) > 0);
    }

    fn single_quad(normal_z: f32) -> Model {
        let buf = vec![
            4.0, //
            0.0, 0.0, normal_z, // normal
            -0.5, -0.5, 0.0, //
            0.5, -0.5, 0.0, //
            0.5, 0.5, 0.0, //
            -0.5, 0.5, 0.0,
        ];
        Model::new(buf, FaceEncoding::FaceNormals).unwrap()
    }

    #[test]
    fn test_backface_rejection_follows_normal() {
        let cam = scenario_camera();
        let settings = RenderSettings::default();

        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        draw_models(&mut fb, &cam, &[&single_quad(-1.0)], &settings);
        assert_eq!(wire_pixel_count(&fb), 0);

        fb.clear(Color::BLACK);
        draw_models(&mut fb, &cam, &[&single_quad(1.0)], &settings);
        assert!(wire_pixel_count(&fb) > 0);
    }

    #[test]
    fn test_backface_rejection_computes_missing_normals() {
        let cam = scenario_camera();
        let settings = RenderSettings::default();
        // counter-clockwise seen from +z: faces the camera
        let facing = vec![
            3.0, //
            -0.5, -0.5, 0.0, //
            0.5, -0.5, 0.0, //
            0.0, 0.5, 0.0,
        ];
        // clockwise: faces away
        let away = vec![
            3.0, //
            -0.5, -0.5, 0.0, //
            0.0, 0.5, 0.0, //
            0.5, -0.5, 0.0,
        ];

        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        let model = Model::new(facing, FaceEncoding::Flat).unwrap();
        draw_models(&mut fb, &cam, &[&model], &settings);
        assert!(wire_pixel_count(&fb) > 0);

        fb.clear(Color::BLACK);
        let model = Model::new(away, FaceEncoding::Flat).unwrap();
        draw_models(&mut fb, &cam, &[&model], &settings);
        assert_eq!(wire_pixel_count(&fb), 0);
    }

    #[test]
    fn test_culling_disabled_draws_both_orientations() {
        let cam = scenario_camera();
        let settings = RenderSettings {
            backface_cull: false,
            ..RenderSettings::default()
        };
        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        draw_models(&mut fb, &cam, &[&single_quad(-1.0)], &settings);
        assert!(wire_pixel_count(&fb) > 0);
    }

    #[test]
    fn test_world_matrix_moves_model_on_screen() {
        let cam = scenario_camera();
        let settings = RenderSettings::default();
        let mut model = Model::new(cube(0.5), FaceEncoding::FaceNormals).unwrap();
        model.set_position(Vec3::new(0.8, 0.0, 0.0));

        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        draw_models(&mut fb, &cam, &[&model], &settings);

        let mut left = 0;
        let mut right = 0;
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.pixel(x, y) == Color::WHITE {
                    if x < 320 {
                        left += 1;
                    } else {
                        right += 1;
                    }
                }
            }
        }
        assert!(right > 0);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_offscreen_model_plots_nothing() {
        let cam = scenario_camera();
        let settings = RenderSettings::default();
        let mut model = Model::new(cube(0.5), FaceEncoding::FaceNormals).unwrap();
        // far outside the frustum to the left
        model.set_position(Vec3::new(-50.0, 0.0, 0.0));

        let mut fb = Framebuffer::new(640, 480);
        fb.clear(Color::BLACK);
        draw_models(&mut fb, &cam, &[&model], &settings);
        assert_eq!(wire_pixel_count(&fb), 0);
    }
}

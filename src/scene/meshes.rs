//! Built-in face-buffer meshes
//!
//! Faces are authored counter-clockwise as seen from outside, in the
//! `FaceNormals` encoding: `[count, nx,ny,nz, verts...]` per record.

use crate::rasterizer::Vec3;

fn push_face(buf: &mut Vec<f32>, normal: Vec3, verts: &[Vec3]) {
    buf.push(verts.len() as f32);
    buf.extend_from_slice(&[normal.x, normal.y, normal.z]);
    for v in verts {
        buf.extend_from_slice(&[v.x, v.y, v.z]);
    }
}

/// Face normal from the winding of the first three vertices.
fn winding_normal(verts: &[Vec3]) -> Vec3 {
    (verts[1] - verts[0]).cross(verts[2] - verts[0]).normalize()
}

fn push_face_auto(buf: &mut Vec<f32>, verts: &[Vec3]) {
    push_face(buf, winding_normal(verts), verts);
}

/// Axis-aligned cube of the given edge length, centered at the origin.
/// Six quad faces.
pub fn cube(size: f32) -> Vec<f32> {
    let h = size / 2.0;
    let mut buf = Vec::new();

    // front (+z)
    push_face(
        &mut buf,
        Vec3::new(0.0, 0.0, 1.0),
        &[
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ],
    );
    // back (-z)
    push_face(
        &mut buf,
        Vec3::new(0.0, 0.0, -1.0),
        &[
            Vec3::new(h, -h, -h),
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(h, h, -h),
        ],
    );
    // top (+y)
    push_face(
        &mut buf,
        Vec3::new(0.0, 1.0, 0.0),
        &[
            Vec3::new(-h, h, h),
            Vec3::new(h, h, h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
        ],
    );
    // bottom (-y)
    push_face(
        &mut buf,
        Vec3::new(0.0, -1.0, 0.0),
        &[
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, -h, h),
            Vec3::new(-h, -h, h),
        ],
    );
    // right (+x)
    push_face(
        &mut buf,
        Vec3::new(1.0, 0.0, 0.0),
        &[
            Vec3::new(h, -h, h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(h, h, h),
        ],
    );
    // left (-x)
    push_face(
        &mut buf,
        Vec3::new(-1.0, 0.0, 0.0),
        &[
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(-h, h, h),
            Vec3::new(-h, h, -h),
        ],
    );

    buf
}

/// Square pyramid: quad base at the bottom, four triangle sides meeting at
/// the apex. Exercises the mixed-arity n-gon walk.
pub fn pyramid(size: f32) -> Vec<f32> {
    let h = size / 2.0;
    let apex = Vec3::new(0.0, h, 0.0);
    let mut buf = Vec::new();

    // base (-y), seen from below
    push_face(
        &mut buf,
        Vec3::new(0.0, -1.0, 0.0),
        &[
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, -h, h),
            Vec3::new(-h, -h, h),
        ],
    );
    // sides
    push_face_auto(&mut buf, &[Vec3::new(-h, -h, h), Vec3::new(h, -h, h), apex]);
    push_face_auto(&mut buf, &[Vec3::new(h, -h, h), Vec3::new(h, -h, -h), apex]);
    push_face_auto(&mut buf, &[Vec3::new(h, -h, -h), Vec3::new(-h, -h, -h), apex]);
    push_face_auto(&mut buf, &[Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h), apex]);

    buf
}

/// Octahedron: one vertex on each axis, eight triangle faces.
pub fn octahedron(size: f32) -> Vec<f32> {
    let h = size / 2.0;
    let px = Vec3::new(h, 0.0, 0.0);
    let nx = Vec3::new(-h, 0.0, 0.0);
    let py = Vec3::new(0.0, h, 0.0);
    let ny = Vec3::new(0.0, -h, 0.0);
    let pz = Vec3::new(0.0, 0.0, h);
    let nz = Vec3::new(0.0, 0.0, -h);

    let mut buf = Vec::new();
    for tri in [
        [px, py, pz],
        [py, nx, pz],
        [nx, ny, pz],
        [ny, px, pz],
        [py, px, nz],
        [px, ny, nz],
        [ny, nx, nz],
        [nx, py, nz],
    ] {
        push_face_auto(&mut buf, &tri);
    }

    buf
}

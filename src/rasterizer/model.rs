//! Wireframe model: immutable flat face buffer plus a mutable world transform

use thiserror::Error;

use super::math::{Mat4, Vec3};

/// Layout of one face record in the flat geometry buffer.
///
/// The encoding is fixed per pipeline build: the application constructs every
/// model with the same variant, it is never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEncoding {
    /// `[count, x1,y1,z1, ..., xn,yn,zn]`
    Flat,
    /// `[count, nx,ny,nz, x1,y1,z1, ..., xn,yn,zn]`
    FaceNormals,
}

impl FaceEncoding {
    fn normal_floats(self) -> usize {
        match self {
            FaceEncoding::Flat => 0,
            FaceEncoding::FaceNormals => 3,
        }
    }
}

/// A face buffer that cannot be decoded safely.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("face {face}: vertex count {count} is not a positive integer")]
    InvalidVertexCount { face: usize, count: f32 },
    #[error("face {face}: record needs {needed} floats but only {available} remain")]
    TruncatedFace {
        face: usize,
        needed: usize,
        available: usize,
    },
}

/// A renderable model.
///
/// Geometry is validated once at construction and immutable afterwards, so a
/// model can be shared by reference across scene slots. `world_mat` is only
/// consistent with `position` after `update_world_matrix`; the pipeline never
/// assumes staleness is auto-corrected.
#[derive(Debug)]
pub struct Model {
    verts: Vec<f32>,
    encoding: FaceEncoding,
    face_count: usize,
    pub position: Vec3,
    pub world_mat: Mat4,
}

impl Model {
    /// Decode a flat face buffer. A vertex count that is non-finite,
    /// fractional, below one, or that would read past the end of the buffer
    /// is a construction-time error.
    pub fn new(verts: Vec<f32>, encoding: FaceEncoding) -> Result<Self, GeometryError> {
        let face_count = scan_faces(&verts, encoding)?;
        Ok(Self {
            verts,
            encoding,
            face_count,
            position: Vec3::ZERO,
            world_mat: Mat4::IDENTITY,
        })
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn encoding(&self) -> FaceEncoding {
        self.encoding
    }

    /// Move the model and re-derive its world matrix.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_world_matrix();
    }

    /// Re-derive `world_mat` from `position`. Translation-only today; the
    /// full matrix representation leaves room for rotation and scale.
    pub fn update_world_matrix(&mut self) {
        self.world_mat = Mat4::translation(self.position);
    }

    pub fn faces(&self) -> Faces<'_> {
        Faces {
            verts: &self.verts,
            offset: 0,
            encoding: self.encoding,
        }
    }
}

fn scan_faces(verts: &[f32], encoding: FaceEncoding) -> Result<usize, GeometryError> {
    let mut offset = 0;
    let mut face = 0;
    while offset < verts.len() {
        let count = verts[offset];
        if !count.is_finite() || count < 1.0 || count.fract() != 0.0 {
            return Err(GeometryError::InvalidVertexCount { face, count });
        }
        let needed = 1 + encoding.normal_floats() + count as usize * 3;
        let available = verts.len() - offset;
        if needed > available {
            return Err(GeometryError::TruncatedFace {
                face,
                needed,
                available,
            });
        }
        offset += needed;
        face += 1;
    }
    Ok(face)
}

/// Borrowed view of one face record.
#[derive(Debug, Clone, Copy)]
pub struct Face<'a> {
    /// Authored face normal, present only in the `FaceNormals` encoding
    pub normal: Option<Vec3>,
    verts: &'a [f32],
}

impl<'a> Face<'a> {
    pub fn vertex_count(&self) -> usize {
        self.verts.len() / 3
    }

    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(self.verts[i * 3], self.verts[i * 3 + 1], self.verts[i * 3 + 2])
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + 'a {
        self.verts
            .chunks_exact(3)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }
}

/// Iterator over the face records of a validated buffer.
pub struct Faces<'a> {
    verts: &'a [f32],
    offset: usize,
    encoding: FaceEncoding,
}

impl<'a> Iterator for Faces<'a> {
    type Item = Face<'a>;

    fn next(&mut self) -> Option<Face<'a>> {
        if self.offset >= self.verts.len() {
            return None;
        }
        // counts and extents were validated at construction
        let count = self.verts[self.offset] as usize;
        let mut offset = self.offset + 1;
        let normal = match self.encoding {
            FaceEncoding::Flat => None,
            FaceEncoding::FaceNormals => {
                let n = Vec3::new(
                    self.verts[offset],
                    self.verts[offset + 1],
                    self.verts[offset + 2],
                );
                offset += 3;
                Some(n)
            }
        };
        let end = offset + count * 3;
        let face = Face {
            normal,
            verts: &self.verts[offset..end],
        };
        self.offset = end;
        Some(face)
    }
}

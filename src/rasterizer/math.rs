//! Vector and matrix math for the wireframe pipeline

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (screen-space points)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Homogeneous 4-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Position: w = 1, participates in translation
    pub fn from_point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Direction: w = 0, translation has no effect
    pub fn from_direction(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

/// 4x4 row-major matrix; vertices are column vectors (`v' = M * v`).
///
/// Model and view matrices keep the bottom row at `(0, 0, 0, 1)`; only the
/// projection matrix replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Pure translation; the rotation/scale block stays at identity.
    pub fn translation(offset: Vec3) -> Mat4 {
        Mat4 {
            m: [
                [1.0, 0.0, 0.0, offset.x],
                [0.0, 1.0, 0.0, offset.y],
                [0.0, 0.0, 1.0, offset.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Symmetric-frustum perspective projection.
    ///
    /// x and y are scaled by `cot(fov / 2)` (divided by `aspect`
    /// horizontally); the z row passes view depth through unchanged, so the
    /// near-plane comparison and the screen-space `x / z` divide downstream
    /// both operate on true view depth. A transformed point lands on-screen
    /// when `x / z` and `y / z` are within `[-1, 1]`.
    pub fn perspective(fov: f32, aspect: f32) -> Mat4 {
        let f = 1.0 / (fov * 0.5).tan();
        Mat4 {
            m: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// View matrix looking from `eye` toward `target`.
    ///
    /// View space is x-right, y-up, with z carrying the distance in front of
    /// the camera. Returns `None` when the basis is degenerate (`eye` on
    /// `target`, or the view direction parallel to `up`).
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Mat4> {
        const EPSILON: f32 = 1e-12;

        let forward = target - eye;
        if forward.dot(forward) < EPSILON {
            return None;
        }
        let forward = forward.normalize();

        let right = forward.cross(up);
        if right.dot(right) < EPSILON {
            return None;
        }
        let right = right.normalize();
        let true_up = right.cross(forward);

        Some(Mat4 {
            m: [
                [right.x, right.y, right.z, -right.dot(eye)],
                [true_up.x, true_up.y, true_up.z, -true_up.dot(eye)],
                [forward.x, forward.y, forward.z, -forward.dot(eye)],
                [0.0, 0.0, 0.0, 1.0],
            ],
        })
    }

    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[i][0], self.m[i][1], self.m[i][2], self.m[i][3])
    }

    /// Full homogeneous transform.
    pub fn transform(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }

    /// Transform a position (w = 1). The perspective divide is deferred to
    /// the screen mapping, where x and y are divided by the view depth the
    /// projection leaves in z.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        self.transform(Vec4::from_point(v)).xyz()
    }

    /// Transform a direction (w = 0); translation is ignored.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        self.transform(Vec4::from_direction(v)).xyz()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = [[0.0f32; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j]
                    + self.m[i][3] * rhs.m[3][j];
            }
        }
        Mat4 { m }
    }
}

//! Scene collaborators: camera control, scalar animation, built-in meshes
//!
//! Everything here sits outside the rendering pipeline and talks to it only
//! through the camera pose and model transforms.

mod meshes;
mod orbit;
mod tween;

pub use meshes::*;
pub use orbit::*;
pub use tween::*;

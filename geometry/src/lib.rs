//! 2D geometry vocabulary shared by the sprite engine's crates.

mod color;
mod point;
mod projection;
mod rect;
mod size;

pub use color::*;
pub use point::*;
pub use projection::*;
pub use rect::*;
pub use size::*;

pub type Matrix4 = glam::DMat4;
pub type Vector3 = glam::DVec3;
pub type Vector4 = glam::DVec4;

pub trait Contains<Other> {
    fn contains(&self, other: Other) -> bool;
}

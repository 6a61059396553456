pub use nalgebra::{matrix, vector};
pub use num_traits::Num;

mod aabb;
mod axis;
pub mod indexing;
pub use aabb::*;
pub use axis::*;

/// Scalar types the parallel slice helpers accept.
pub trait NumTrait: Num + Copy + Send + Sync {}
impl<T: Num + Copy + Send + Sync> NumTrait for T {}

/// Integer grid coordinate stored as (x, y).
pub type Coord = nalgebra::Vector2<i32>;

/// One row per axis, columns are the inclusive (min, max) corners.
pub type Bounds = nalgebra::Matrix2<i32>;

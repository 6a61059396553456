use crate::util::*;

/// Number of cells covered by an exclusive (width, height) extent.
pub fn real_buffer_size(exclusive_bound: &Coord) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        debug_assert!(*d >= 0);
        accumulator *= *d as usize;
    }
    accumulator
}

/// Row-major linear index, x varies fastest.
pub fn coord_to_linear(coord: &Coord, exclusive_bounds: &Coord) -> usize {
    debug_assert!(coord[0] >= 0 && coord[0] < exclusive_bounds[0]);
    debug_assert!(coord[1] >= 0 && coord[1] < exclusive_bounds[1]);
    coord[1] as usize * exclusive_bounds[0] as usize + coord[0] as usize
}

pub fn linear_to_coord(linear_index: usize, exclusive_bounds: &Coord) -> Coord {
    let width = exclusive_bounds[0] as usize;
    vector![(linear_index % width) as i32, (linear_index / width) as i32]
}

/// Linear index into storage with an explicit row stride (in elements).
#[inline]
pub fn strided_index(x: usize, y: usize, stride: usize) -> usize {
    y * stride + x
}

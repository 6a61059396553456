//! Per cell conserved quantities.

use crate::util::*;

/// (h, hu, hv): depth and the two momentum components.
pub type ConservedState = nalgebra::Vector3<f64>;

/// Component of a `ConservedState` holding the momentum along `axis`.
#[inline]
pub fn momentum_index(axis: Axis) -> usize {
    1 + axis.index()
}

/// Lake at rest of the given depth.
#[inline]
pub fn still_water(depth: f64) -> ConservedState {
    ConservedState::new(depth, 0.0, 0.0)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn momentum_index_test() {
        let q = ConservedState::new(1.0, 2.0, 3.0);
        assert_eq!(q[momentum_index(Axis::X)], 2.0);
        assert_eq!(q[momentum_index(Axis::Y)], 3.0);
        assert_eq!(still_water(4.0), ConservedState::new(4.0, 0.0, 0.0));
    }
}

use crate::util::indexing::*;
use crate::util::*;

/// Axis Aligned Bounding Box over grid coordinates.
/// Each instance is inclusive of both corners.
/// Used for the domain interior, tile extents, and the clamp policy
/// applied to every read of backing storage.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AABB {
    pub bounds: Bounds,
}

impl std::fmt::Display for AABB {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "[{}..={}] x [{}..={}]",
            self.bounds[(0, 0)],
            self.bounds[(0, 1)],
            self.bounds[(1, 0)],
            self.bounds[(1, 1)]
        )
    }
}

impl AABB {
    /// Create AABB from raw bounds.
    #[inline]
    pub fn new(bounds: Bounds) -> Self {
        AABB { bounds }
    }

    /// Create AABB from corners.
    pub fn from_mm(min: Coord, max: Coord) -> Self {
        let result = AABB {
            bounds: Bounds::from_columns(&[min, max]),
        };
        debug_assert!(result.check_validity());
        result
    }

    /// Box of an `nx` by `ny` interior starting at the origin.
    pub fn from_extent(nx: usize, ny: usize) -> Self {
        debug_assert!(nx > 0 && ny > 0);
        AABB::new(matrix![0, nx as i32 - 1; 0, ny as i32 - 1])
    }

    /// Moving min to the origin, returns the exclusive size in each direction
    /// i.e. [0, 9] would have exclusive size of 10.
    pub fn exclusive_bounds(&self) -> Coord {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    /// Return the number of coordinates contained in the instance.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    /// Return the linear index for a coord in the instance
    pub fn coord_to_linear(&self, coord: &Coord) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    /// Return the coordinate in the instance for a given linear index.
    pub fn linear_to_coord(&self, index: usize) -> Coord {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Check whether the instance contains a coordinate.
    pub fn contains(&self, coord: &Coord) -> bool {
        for d in 0..2 {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Clamp each component independently into the box.
    /// Out of range reads become reads of the nearest edge cell.
    pub fn clamp(&self, coord: &Coord) -> Coord {
        let mut result = *coord;
        for d in 0..2 {
            result[d] = result[d].clamp(self.bounds[(d, 0)], self.bounds[(d, 1)]);
        }
        result
    }

    /// Return min corner.
    pub fn min(&self) -> Coord {
        self.bounds.column(0).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        for d in 0..2 {
            if self.bounds[(d, 0)] > self.bounds[(d, 1)] {
                return false;
            }
        }
        true
    }

    /// Return iterator over contained coords in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.buffer_size()).map(|i| self.linear_to_coord(i))
    }
}

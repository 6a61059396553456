use crate::state::*;
use crate::util::indexing::*;
use crate::util::*;

/// Read only strided view of one field.
/// `interior` is the box of valid interior coordinates, storage
/// is offset by `halo` in both directions.
#[derive(Copy, Clone, Debug)]
pub struct FieldView<'a> {
    data: &'a [f64],
    interior: AABB,
    halo: usize,
    stride: usize,
}

impl<'a> FieldView<'a> {
    pub fn new(
        data: &'a [f64],
        interior: AABB,
        halo: usize,
        stride: usize,
    ) -> Self {
        debug_assert_eq!(interior.min(), Coord::zeros());
        FieldView {
            data,
            interior,
            halo,
            stride,
        }
    }

    pub fn interior(&self) -> &AABB {
        &self.interior
    }

    /// Bounds checked interior read.
    #[track_caller]
    #[inline]
    pub fn get(&self, coord: &Coord) -> f64 {
        assert!(
            self.interior.contains(coord),
            "{} does not contain {:?}",
            self.interior,
            coord
        );
        self.data[strided_index(
            coord[0] as usize + self.halo,
            coord[1] as usize + self.halo,
            self.stride,
        )]
    }

    /// Edge clamped read, coordinates outside the interior
    /// read the nearest interior cell.
    #[inline]
    pub fn get_clamped(&self, coord: &Coord) -> f64 {
        self.get(&self.interior.clamp(coord))
    }
}

/// Views of the three conserved fields of one time level.
#[derive(Copy, Clone, Debug)]
pub struct StateView<'a> {
    pub h: FieldView<'a>,
    pub hu: FieldView<'a>,
    pub hv: FieldView<'a>,
}

impl<'a> StateView<'a> {
    pub fn interior(&self) -> &AABB {
        self.h.interior()
    }

    pub fn get(&self, coord: &Coord) -> ConservedState {
        ConservedState::new(
            self.h.get(coord),
            self.hu.get(coord),
            self.hv.get(coord),
        )
    }

    /// Clamp once, read all three fields at the same cell.
    pub fn get_clamped(&self, coord: &Coord) -> ConservedState {
        self.get(&self.interior().clamp(coord))
    }
}

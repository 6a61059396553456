use super::*;
use crate::state::*;

/// The three conserved fields of one time level.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferSet {
    pub h: Field,
    pub hu: Field,
    pub hv: Field,
}

impl BufferSet {
    /// Zeroed fields with packed rows.
    pub fn new(nx: usize, ny: usize, halo: usize) -> SweResult<Self> {
        Ok(BufferSet {
            h: Field::new(nx, ny, halo)?,
            hu: Field::new(nx, ny, halo)?,
            hv: Field::new(nx, ny, halo)?,
        })
    }

    /// Fields may use different strides, but must agree on
    /// interior extent and ghost width.
    pub fn from_fields(h: Field, hu: Field, hv: Field) -> SweResult<Self> {
        let expected = h.shape();
        for f in [&hu, &hv] {
            if f.shape() != expected {
                return Err(SweError::ShapeMismatch {
                    expected,
                    actual: f.shape(),
                });
            }
        }
        Ok(BufferSet { h, hu, hv })
    }

    /// (nx, ny, halo)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.h.shape()
    }

    pub fn interior(&self) -> AABB {
        self.h.interior()
    }

    pub fn view(&self) -> StateView<'_> {
        StateView {
            h: self.h.view(),
            hu: self.hu.view(),
            hv: self.hv.view(),
        }
    }

    pub fn state(&self, coord: &Coord) -> ConservedState {
        ConservedState::new(
            self.h.get(coord),
            self.hu.get(coord),
            self.hv.get(coord),
        )
    }

    pub fn set_state(&mut self, coord: &Coord, q: &ConservedState) {
        self.h.set(coord, q[0]);
        self.hu.set(coord, q[1]);
        self.hv.set(coord, q[2]);
    }

    /// Set every interior cell from a function of its coordinate.
    pub fn par_set_states<F>(&mut self, f: F)
    where
        F: Fn(Coord) -> ConservedState + Send + Sync,
    {
        self.h.par_set_values(|c| f(c)[0]);
        self.hu.par_set_values(|c| f(c)[1]);
        self.hv.par_set_values(|c| f(c)[2]);
    }

    /// Sum of depth over the interior, i.e. total water volume per
    /// unit cell area.
    pub fn total_mass(&self) -> f64 {
        self.h.interior_sum()
    }

    /// Largest absolute difference over interior cells and all three
    /// fields. Interiors must match, ghost widths and strides may differ.
    pub fn max_abs_diff(&self, other: &BufferSet) -> f64 {
        debug_assert_eq!(self.interior(), other.interior());
        self.interior()
            .coord_iter()
            .map(|c| (self.state(&c) - other.state(&c)).amax())
            .fold(0.0, f64::max)
    }
}

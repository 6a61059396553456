//! Backing storage for the conserved fields.
//! Each field is a row-major scalar grid with a ghost frame and a
//! caller chosen row stride. Kernel reads go through `FieldView`,
//! kernel writes through `FieldStripMut`, and neither ever touches
//! the ghost frame.

mod buffer_set;
mod double_buffer;
mod strip;
mod view;

pub use buffer_set::*;
pub use double_buffer::*;
pub use strip::*;
pub use view::*;

use crate::error::*;
use crate::par_slice;
use crate::util::indexing::*;
use crate::util::*;
use rayon::prelude::*;

const FILL_CHUNK: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    nx: usize,
    ny: usize,
    halo: usize,
    stride: usize,
    data: Vec<f64>,
}

impl Field {
    /// Zeroed field with rows packed back to back.
    pub fn new(nx: usize, ny: usize, halo: usize) -> SweResult<Self> {
        Self::with_stride(nx, ny, halo, nx + 2 * halo)
    }

    /// Zeroed field with a row stride counted in elements.
    pub fn with_stride(
        nx: usize,
        ny: usize,
        halo: usize,
        stride: usize,
    ) -> SweResult<Self> {
        let len = Self::required_len(nx, ny, halo, stride)?;
        Ok(Field {
            nx,
            ny,
            halo,
            stride,
            data: vec![0.0; len],
        })
    }

    /// Zeroed field with a row stride counted in bytes.
    pub fn with_byte_stride(
        nx: usize,
        ny: usize,
        halo: usize,
        bytes: usize,
    ) -> SweResult<Self> {
        let elem = std::mem::size_of::<f64>();
        if bytes % elem != 0 {
            return Err(SweError::MisalignedStride { bytes, elem });
        }
        Self::with_stride(nx, ny, halo, bytes / elem)
    }

    /// Wrap existing storage, `data` must cover every row including
    /// the ghost frame.
    pub fn from_vec(
        nx: usize,
        ny: usize,
        halo: usize,
        stride: usize,
        data: Vec<f64>,
    ) -> SweResult<Self> {
        let needed = Self::required_len(nx, ny, halo, stride)?;
        if data.len() < needed {
            log::warn!(
                "field storage of {} elements is short of {}",
                data.len(),
                needed
            );
            return Err(SweError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Field {
            nx,
            ny,
            halo,
            stride,
            data,
        })
    }

    fn required_len(
        nx: usize,
        ny: usize,
        halo: usize,
        stride: usize,
    ) -> SweResult<usize> {
        if nx == 0 || ny == 0 {
            return Err(SweError::InvalidExtent { nx, ny });
        }
        let width = nx + 2 * halo;
        if stride < width {
            return Err(SweError::StrideTooSmall { stride, width });
        }
        Ok((ny + 2 * halo) * stride)
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn halo(&self) -> usize {
        self.halo
    }

    /// Row stride in elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// (nx, ny, halo)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.halo)
    }

    pub fn interior(&self) -> AABB {
        AABB::from_extent(self.nx, self.ny)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn storage_index(&self, coord: &Coord) -> usize {
        debug_assert!(
            self.interior().contains(coord),
            "{} does not contain {:?}",
            self.interior(),
            coord
        );
        strided_index(
            coord[0] as usize + self.halo,
            coord[1] as usize + self.halo,
            self.stride,
        )
    }

    /// Interior value, `coord` is relative to the first interior cell.
    #[track_caller]
    pub fn get(&self, coord: &Coord) -> f64 {
        self.data[self.storage_index(coord)]
    }

    #[track_caller]
    pub fn set(&mut self, coord: &Coord, value: f64) {
        let index = self.storage_index(coord);
        self.data[index] = value;
    }

    pub fn view(&self) -> FieldView<'_> {
        FieldView::new(&self.data, self.interior(), self.halo, self.stride)
    }

    /// Set every element, ghost frame included.
    pub fn fill(&mut self, value: f64) {
        par_slice::set_value(&mut self.data, value, FILL_CHUNK);
    }

    /// Set interior cells from a function of their coordinate.
    pub fn par_set_values<F: Fn(Coord) -> f64 + Send + Sync>(&mut self, f: F) {
        let nx = self.nx;
        self.par_strips_mut(1).for_each(|mut strip| {
            let y = strip.y0();
            for x in 0..nx {
                strip.set(x, y, f(vector![x as i32, y as i32]));
            }
        });
    }

    /// Sum over interior cells.
    pub fn interior_sum(&self) -> f64 {
        let rows = self.interior_rows();
        par_slice::strided_row_sum(
            &self.data[rows],
            self.stride,
            self.halo,
            self.nx,
        )
    }

    fn interior_rows(&self) -> std::ops::Range<usize> {
        self.halo * self.stride..(self.halo + self.ny) * self.stride
    }

    /// Split the interior rows into disjoint strips of `strip_height`
    /// rows, the last one possibly shorter.
    pub fn par_strips_mut(
        &mut self,
        strip_height: usize,
    ) -> impl IndexedParallelIterator<Item = FieldStripMut<'_>> {
        let rows = self.interior_rows();
        let (halo, stride, nx) = (self.halo, self.stride, self.nx);
        self.data[rows]
            .par_chunks_mut(strip_height * stride)
            .enumerate()
            .map(move |(i, chunk)| {
                FieldStripMut::new(chunk, i * strip_height, nx, halo, stride)
            })
    }

    /// Sequential counterpart of `par_strips_mut`.
    pub fn strips_mut(
        &mut self,
        strip_height: usize,
    ) -> impl Iterator<Item = FieldStripMut<'_>> {
        let rows = self.interior_rows();
        let (halo, stride, nx) = (self.halo, self.stride, self.nx);
        self.data[rows]
            .chunks_mut(strip_height * stride)
            .enumerate()
            .map(move |(i, chunk)| {
                FieldStripMut::new(chunk, i * strip_height, nx, halo, stride)
            })
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn layout_test() {
        let f = Field::new(4, 3, 1).unwrap();
        assert_eq!(f.stride(), 6);
        assert_eq!(f.as_slice().len(), 5 * 6);

        let f = Field::with_byte_stride(4, 3, 2, 80).unwrap();
        assert_eq!(f.stride(), 10);
        assert_eq!(f.as_slice().len(), 7 * 10);
    }

    #[test]
    fn layout_errors_test() {
        assert!(matches!(
            Field::with_stride(4, 3, 1, 5),
            Err(SweError::StrideTooSmall {
                stride: 5,
                width: 6
            })
        ));
        assert!(matches!(
            Field::with_byte_stride(4, 3, 1, 50),
            Err(SweError::MisalignedStride { bytes: 50, elem: 8 })
        ));
        assert!(matches!(
            Field::from_vec(4, 3, 1, 6, vec![0.0; 29]),
            Err(SweError::BufferTooSmall {
                needed: 30,
                actual: 29
            })
        ));
        assert!(matches!(
            Field::new(0, 3, 1),
            Err(SweError::InvalidExtent { nx: 0, ny: 3 })
        ));
    }

    #[test]
    fn get_set_skips_ghosts_test() {
        let mut f = Field::with_stride(3, 2, 1, 8).unwrap();
        f.set(&vector![0, 0], 1.0);
        f.set(&vector![2, 1], 2.0);
        // First interior cell sits one row and one column in.
        assert_eq!(f.as_slice()[8 + 1], 1.0);
        assert_eq!(f.as_slice()[2 * 8 + 3], 2.0);
        assert_eq!(f.get(&vector![2, 1]), 2.0);
    }

    #[test]
    fn par_set_values_test() {
        let mut f = Field::with_stride(5, 7, 2, 12).unwrap();
        f.fill(-1.0);
        f.par_set_values(|c| (c[0] + 10 * c[1]) as f64);
        for c in f.interior().coord_iter() {
            assert_eq!(f.get(&c), (c[0] + 10 * c[1]) as f64);
        }
        // Ghost frame untouched
        assert_eq!(f.as_slice()[0], -1.0);
        assert_eq!(f.as_slice()[2 * 12 + 1], -1.0);
        assert_eq!(f.as_slice()[2 * 12 + 7], -1.0);
    }

    #[test]
    fn interior_sum_test() {
        let mut f = Field::with_stride(4, 4, 1, 9).unwrap();
        f.fill(100.0);
        f.par_set_values(|_| 0.5);
        assert_eq!(f.interior_sum(), 8.0);
    }

    #[test]
    fn strips_test() {
        let mut f = Field::new(3, 5, 1).unwrap();
        let starts: Vec<(usize, usize)> = f
            .strips_mut(2)
            .map(|strip| (strip.y0(), strip.rows()))
            .collect();
        assert_eq!(starts, vec![(0, 2), (2, 2), (4, 1)]);
        let par_count = f.par_strips_mut(2).count();
        assert_eq!(par_count, 3);
    }
}

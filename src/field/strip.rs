use crate::util::indexing::*;

/// Exclusive mutable access to a band of consecutive interior rows.
/// Coordinates are interior coordinates of the whole field.
pub struct FieldStripMut<'a> {
    rows: &'a mut [f64],
    y0: usize,
    nx: usize,
    halo: usize,
    stride: usize,
}

impl<'a> FieldStripMut<'a> {
    pub fn new(
        rows: &'a mut [f64],
        y0: usize,
        nx: usize,
        halo: usize,
        stride: usize,
    ) -> Self {
        debug_assert_eq!(rows.len() % stride, 0);
        FieldStripMut {
            rows,
            y0,
            nx,
            halo,
            stride,
        }
    }

    /// First interior row covered.
    pub fn y0(&self) -> usize {
        self.y0
    }

    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.rows.len() / self.stride
    }

    pub fn owns_row(&self, y: usize) -> bool {
        y >= self.y0 && y < self.y0 + self.rows()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.nx);
        debug_assert!(self.owns_row(y), "row {y} outside strip");
        strided_index(x + self.halo, y - self.y0, self.stride)
    }

    #[track_caller]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.index(x, y);
        self.rows[i] = value;
    }
}

use thiserror::Error;

/// Failures of host side setup and output.
/// The kernel itself never produces one of these.
#[derive(Debug, Error)]
pub enum SweError {
    #[error("grid must have at least one interior cell, got {nx}x{ny}")]
    InvalidExtent { nx: usize, ny: usize },

    #[error("tile interior must be non-empty, got {width}x{height}")]
    InvalidBlock { width: usize, height: usize },

    #[error("halo width {0} is not supported, expected 1 or 2")]
    UnsupportedHalo(usize),

    #[error("row stride {stride} is smaller than the row width {width}")]
    StrideTooSmall { stride: usize, width: usize },

    #[error("byte stride {bytes} is not a multiple of the element size {elem}")]
    MisalignedStride { bytes: usize, elem: usize },

    #[error("buffer holds {actual} elements, layout needs {needed}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("field shape {actual:?} does not match {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("parameter {name} has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("vtk export failed: {0}")]
    Vtk(String),
}

pub type SweResult<T> = Result<T, SweError>;

//! Tunables for the tiled kernel and the per-invocation scalars.

use crate::error::*;
use crate::util::*;
use clap::ValueEnum;

/// Number of ghost layers around each tile.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum HaloWidth {
    #[default]
    Single,
    Double,
}

impl HaloWidth {
    pub fn from_cells(cells: usize) -> SweResult<Self> {
        match cells {
            1 => Ok(HaloWidth::Single),
            2 => Ok(HaloWidth::Double),
            n => Err(SweError::UnsupportedHalo(n)),
        }
    }

    #[inline]
    pub fn cells(self) -> usize {
        match self {
            HaloWidth::Single => 1,
            HaloWidth::Double => 2,
        }
    }
}

/// Order of the two one dimensional sweeps within a step.
#[derive(Copy, Clone, Debug, ValueEnum, Default, Eq, PartialEq)]
pub enum SweepOrder {
    #[default]
    XThenY,
    YThenX,
    /// x first on even steps, y first on odd steps.
    Alternating,
}

impl SweepOrder {
    pub fn axes_for_step(self, step: usize) -> [Axis; 2] {
        match self {
            SweepOrder::XThenY => [Axis::X, Axis::Y],
            SweepOrder::YThenX => [Axis::Y, Axis::X],
            SweepOrder::Alternating => {
                if step % 2 == 0 {
                    [Axis::X, Axis::Y]
                } else {
                    [Axis::Y, Axis::X]
                }
            }
        }
    }
}

/// Layout and policy of the tiled kernel, fixed across invocations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KernelConfig {
    /// Owned interior of one tile, (width, height).
    pub block: [usize; 2],
    pub halo: HaloWidth,
    /// Depths at or below this are treated as motionless when
    /// evaluating velocities in the physical flux.
    pub dry_depth: f64,
    /// Dispatch tile strips on the rayon pool.
    pub parallel: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            block: [16, 16],
            halo: HaloWidth::Single,
            dry_depth: 1e-6,
            parallel: true,
        }
    }
}

impl KernelConfig {
    pub fn with_block(mut self, width: usize, height: usize) -> Self {
        self.block = [width, height];
        self
    }

    pub fn with_halo(mut self, halo: HaloWidth) -> Self {
        self.halo = halo;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_dry_depth(mut self, dry_depth: f64) -> Self {
        self.dry_depth = dry_depth;
        self
    }

    pub fn validate(&self) -> SweResult<()> {
        let [width, height] = self.block;
        if width == 0 || height == 0 {
            return Err(SweError::InvalidBlock { width, height });
        }
        if !(self.dry_depth >= 0.0 && self.dry_depth.is_finite()) {
            return Err(SweError::InvalidParameter {
                name: "dry_depth",
                value: self.dry_depth,
            });
        }
        Ok(())
    }
}

/// Scalars of one kernel invocation, constant over the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepParams {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
    pub g: f64,
}

impl StepParams {
    /// Spacing along a sweep axis.
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }

    pub fn interior(&self) -> AABB {
        AABB::from_extent(self.nx, self.ny)
    }

    pub fn validate(&self) -> SweResult<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(SweError::InvalidExtent {
                nx: self.nx,
                ny: self.ny,
            });
        }
        for (name, value) in [("dx", self.dx), ("dy", self.dy), ("g", self.g)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SweError::InvalidParameter { name, value });
            }
        }
        if !(self.dt >= 0.0 && self.dt.is_finite()) {
            return Err(SweError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn sweep_order_test() {
        assert_eq!(SweepOrder::XThenY.axes_for_step(3), [Axis::X, Axis::Y]);
        assert_eq!(SweepOrder::YThenX.axes_for_step(0), [Axis::Y, Axis::X]);
        assert_eq!(
            SweepOrder::Alternating.axes_for_step(0),
            [Axis::X, Axis::Y]
        );
        assert_eq!(
            SweepOrder::Alternating.axes_for_step(1),
            [Axis::Y, Axis::X]
        );
    }

    #[test]
    fn halo_test() {
        assert_eq!(HaloWidth::from_cells(2).unwrap(), HaloWidth::Double);
        assert_eq!(HaloWidth::Double.cells(), 2);
        assert!(matches!(
            HaloWidth::from_cells(3),
            Err(SweError::UnsupportedHalo(3))
        ));
    }

    #[test]
    fn validate_test() {
        assert!(KernelConfig::default().validate().is_ok());
        assert!(matches!(
            KernelConfig::default().with_block(0, 4).validate(),
            Err(SweError::InvalidBlock { .. })
        ));
        assert!(KernelConfig::default()
            .with_dry_depth(-1.0)
            .validate()
            .is_err());

        let params = StepParams {
            nx: 4,
            ny: 4,
            dx: 1.0,
            dy: 1.0,
            dt: 0.0,
            g: 9.81,
        };
        assert!(params.validate().is_ok());
        assert!(StepParams { dy: 0.0, ..params }.validate().is_err());
        assert!(StepParams { dt: f64::NAN, ..params }.validate().is_err());
        assert!(matches!(
            StepParams { nx: 0, ..params }.validate(),
            Err(SweError::InvalidExtent { nx: 0, ny: 4 })
        ));
    }
}

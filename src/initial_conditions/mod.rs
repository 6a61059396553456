mod gaussian;
mod generate_ic;
mod random;
use clap::ValueEnum;
pub use gaussian::*;
pub use generate_ic::*;
pub use random::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ICType {
    /// Lake at rest.
    Still { depth: f64 },
    /// Lake at rest with one raised cell at the origin corner.
    CornerBump { depth: f64, bump: f64 },
    /// Left half at `left`, right half at `right`, no motion.
    DamBreak { left: f64, right: f64 },
    /// Smooth hump in the middle of the domain.
    Gaussian {
        depth: f64,
        amplitude: f64,
        variance: f64,
    },
    /// Uniformly random depth in `depth..depth + amplitude`.
    Rand { depth: f64, amplitude: f64, seed: u64 },
}

impl Default for ICType {
    fn default() -> Self {
        ICType::Still { depth: 1.0 }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, Default)]
pub enum ClapICType {
    Still,
    CornerBump,
    #[default]
    DamBreak,
    Gaussian,
    Rand,
}

impl ClapICType {
    /// `dial` is the one free knob of each initial condition,
    /// measured against a unit base depth.
    pub fn to_ic_type(&self, dial: f64) -> ICType {
        match self {
            ClapICType::Still => ICType::Still { depth: dial },
            ClapICType::CornerBump => ICType::CornerBump {
                depth: 1.0,
                bump: dial,
            },
            ClapICType::DamBreak => ICType::DamBreak {
                left: 1.0 + dial,
                right: 1.0,
            },
            ClapICType::Gaussian => ICType::Gaussian {
                depth: 1.0,
                amplitude: dial,
                variance: 10.0,
            },
            ClapICType::Rand => ICType::Rand {
                depth: 1.0,
                amplitude: dial,
                seed: 0,
            },
        }
    }
}

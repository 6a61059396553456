use crate::field::*;
use crate::initial_conditions::*;
use crate::state::*;
use crate::util::*;

/// Overwrite the interior of `buffers` with `ic_type`.
pub fn generate_ic(buffers: &mut BufferSet, ic_type: ICType) {
    profiling::scope!("generate_ic");
    log::debug!("generate_ic: {:?}", ic_type);
    match ic_type {
        ICType::Still { depth } => {
            buffers.par_set_states(|_| still_water(depth));
        }
        ICType::CornerBump { depth, bump } => {
            buffers.par_set_states(|c: Coord| {
                if c == Coord::zeros() {
                    still_water(depth + bump)
                } else {
                    still_water(depth)
                }
            });
        }
        ICType::DamBreak { left, right } => {
            let split = buffers.interior().exclusive_bounds()[0] / 2;
            buffers.par_set_states(|c: Coord| {
                if c[0] < split {
                    still_water(left)
                } else {
                    still_water(right)
                }
            });
        }
        ICType::Gaussian {
            depth,
            amplitude,
            variance,
        } => {
            gaussian_ic(buffers, depth, amplitude, variance);
        }
        ICType::Rand {
            depth,
            amplitude,
            seed,
        } => {
            rand_ic(buffers, depth, amplitude, seed);
        }
    }
}

use crate::field::*;
use crate::state::*;
use crate::util::*;

/// Still water of `depth` plus a normal like hump of `amplitude`
/// centred on the domain. Larger `variance` gives a narrower hump.
pub fn gaussian_ic(
    buffers: &mut BufferSet,
    depth: f64,
    amplitude: f64,
    variance: f64,
) {
    let exclusive_bounds = buffers.interior().exclusive_bounds();
    let width_f = exclusive_bounds[0] as f64;
    let height_f = exclusive_bounds[1] as f64;
    let sigma_sq: f64 = (width_f / variance) * (width_f / variance);
    buffers.par_set_states(|coord: Coord| {
        let x = (coord[0] as f64) + 0.5 - (width_f / 2.0);
        let y = (coord[1] as f64) + 0.5 - (height_f / 2.0);
        let r_sq = x * x + y * y;
        still_water(depth + amplitude * (-r_sq / (2.0 * sigma_sq)).exp())
    });
}

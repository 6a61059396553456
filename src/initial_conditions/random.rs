use crate::field::*;
use crate::state::*;
use rand::prelude::*;
use rayon::prelude::*;

/// Still water with depth drawn uniformly from `depth..depth + amplitude`.
/// Each row has its own generator seeded from `seed`, so the result
/// does not depend on the thread count.
pub fn rand_ic(buffers: &mut BufferSet, depth: f64, amplitude: f64, seed: u64) {
    let nx = buffers.h.nx();
    buffers.h.par_strips_mut(1).for_each(|mut row| {
        let y = row.y0();
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(y as u64));
        for x in 0..nx {
            row.set(x, y, depth + amplitude * rng.gen::<f64>());
        }
    });
    buffers.hu.par_set_values(|_| 0.0);
    buffers.hv.par_set_values(|_| 0.0);
}

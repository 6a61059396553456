//! Flux divergence update of one sweep.

use crate::kernel::tile::*;
use crate::util::*;

/// Apply `q += ratio * (flux_in - flux_out)` to every cell of the tile
/// inside `domain` whose position along the sweep axis is owned.
/// Across the sweep axis the halo lines are updated as well, so the
/// following sweep sees this sweep's result in its halo.
///
/// `ratio` is `dt / spacing`. Applying this twice for the same sweep
/// applies the update twice. A zero ratio leaves the tile untouched.
pub fn apply_update(tile: &mut Tile, fluxes: &FluxArray, ratio: f64, domain: &AABB) {
    profiling::scope!("kernel::apply_update");
    if ratio == 0.0 {
        return;
    }
    let axis = fluxes.axis();
    let halo = tile.halo() as i32;
    for line in 0..fluxes.lines() {
        for k in 0..fluxes.faces() - 1 {
            let local = axis.compose(halo + k as i32, line as i32);
            if !domain.contains(&tile.to_global(&local)) {
                continue;
            }
            let divergence = fluxes.get(k, line) - fluxes.get(k + 1, line);
            *tile.get_mut(&local) += ratio * divergence;
        }
    }
}

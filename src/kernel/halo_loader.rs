//! Stage the tile and its halo from the current time level.

use crate::field::*;
use crate::kernel::tile::*;

/// Fill every local position of `tile` with the current state at the
/// matching global coordinate, clamped to the domain interior.
/// Reads only, the backing storage is never written.
pub fn load_halo(tile: &mut Tile, current: &StateView) {
    profiling::scope!("kernel::load_halo");
    for local in tile.local_aabb().coord_iter() {
        let global = tile.to_global(&local);
        tile.set(&local, current.get_clamped(&global));
    }
}

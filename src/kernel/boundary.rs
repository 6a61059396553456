//! Reflective no-flow walls on the four domain edges.
//!
//! A ghost cell copies depth and tangential momentum from its mirror
//! cell and negates the momentum normal to the wall. Ghost layer `k`
//! (counting outward from 1) mirrors interior layer `k - 1` counting
//! inward from the wall, so with two ghost layers the outer ghost
//! reflects the second interior layer, not the first ghost.

use crate::kernel::tile::*;
use crate::state::*;
use crate::util::*;

/// Mirror image of `q` across a wall normal to `axis`.
#[inline]
pub fn mirror_state(q: &ConservedState, axis: Axis) -> ConservedState {
    let mut m = *q;
    m[momentum_index(axis)] = -m[momentum_index(axis)];
    m
}

/// Overwrite the ghost cells of every domain wall that falls inside
/// the owned span of `tile`. Tiles away from the walls are untouched,
/// so this is safe to call unconditionally.
pub fn reflect_boundaries(tile: &mut Tile, domain: &AABB) {
    profiling::scope!("kernel::reflect_boundaries");
    for axis in Axis::ALL {
        reflect_axis(tile, domain, axis);
    }
}

fn reflect_axis(tile: &mut Tile, domain: &AABB, axis: Axis) {
    let a = axis.index();
    let halo = tile.halo() as i32;
    let owned = halo..halo + tile.block(axis) as i32;
    let origin = tile.origin()[a];

    // Local positions of the first and last interior index.
    let first = domain.bounds[(a, 0)] - origin + halo;
    let last = domain.bounds[(a, 1)] - origin + halo;

    for line in 0..tile.extent(axis.other()) as i32 {
        if owned.contains(&first) {
            for k in 1..=halo {
                let ghost = axis.compose(first - k, line);
                let mirror = axis.compose(first + k - 1, line);
                let q = mirror_state(&tile.get(&mirror), axis);
                tile.set(&ghost, q);
            }
        }
        if owned.contains(&last) {
            for k in 1..=halo {
                let ghost = axis.compose(last + k, line);
                let mirror = axis.compose(last - k + 1, line);
                let q = mirror_state(&tile.get(&mirror), axis);
                tile.set(&ghost, q);
            }
        }
    }
}

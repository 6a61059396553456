//! Central FORCE numerical flux for the shallow water equations.
//!
//! FORCE is the average of the Lax-Friedrichs flux and a two step
//! Lax-Wendroff (Richtmyer) flux. Only the x direction formula is
//! written out, the y direction reuses it by rotating states into
//! the face normal basis, which for axis aligned faces is a swap of
//! the two momentum components.

use crate::kernel::tile::*;
use crate::state::*;
use crate::util::*;

/// Scalars shared by every face of one sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceParams {
    pub g: f64,
    /// Cell spacing along the sweep axis.
    pub spacing: f64,
    pub dt: f64,
    pub dry_depth: f64,
}

/// Velocity of a momentum component, zero on a dry cell.
#[inline]
fn velocity(momentum: f64, h: f64, dry_depth: f64) -> f64 {
    if h > dry_depth {
        momentum / h
    } else {
        0.0
    }
}

/// Physical flux along x: (hu, hu^2/h + g h^2/2, hu hv/h).
pub fn physical_flux(q: &ConservedState, g: f64, dry_depth: f64) -> ConservedState {
    let (h, hu, hv) = (q[0], q[1], q[2]);
    let u = velocity(hu, h, dry_depth);
    let v = velocity(hv, h, dry_depth);
    ConservedState::new(hu, hu * u + 0.5 * g * h * h, hu * v)
}

/// Physical flux along y: (hv, hu hv/h, hv^2/h + g h^2/2).
pub fn physical_flux_y(q: &ConservedState, g: f64, dry_depth: f64) -> ConservedState {
    let (h, hu, hv) = (q[0], q[1], q[2]);
    let u = velocity(hu, h, dry_depth);
    let v = velocity(hv, h, dry_depth);
    ConservedState::new(hv, hv * u, hv * v + 0.5 * g * h * h)
}

/// FORCE flux between `qm` and `qp` for an arbitrary physical flux.
pub fn force_flux_with<F>(
    qm: &ConservedState,
    qp: &ConservedState,
    p: &FaceParams,
    flux: F,
) -> ConservedState
where
    F: Fn(&ConservedState, f64, f64) -> ConservedState,
{
    let fm = flux(qm, p.g, p.dry_depth);
    let fp = flux(qp, p.g, p.dry_depth);

    let lax_friedrichs = 0.5 * (fm + fp) - 0.5 * (p.spacing / p.dt) * (qp - qm);

    let mid = 0.5 * (qm + qp) - 0.5 * (p.dt / p.spacing) * (fp - fm);
    let lax_wendroff = flux(&mid, p.g, p.dry_depth);

    0.5 * (lax_friedrichs + lax_wendroff)
}

/// FORCE flux along x.
#[inline]
pub fn force_flux(
    qm: &ConservedState,
    qp: &ConservedState,
    p: &FaceParams,
) -> ConservedState {
    force_flux_with(qm, qp, p, physical_flux)
}

/// Express `q` in the (normal, tangential) basis of a face normal to
/// `axis`. The transform is its own inverse.
#[inline]
pub fn rotate_to_axis(q: &ConservedState, axis: Axis) -> ConservedState {
    match axis {
        Axis::X => *q,
        Axis::Y => ConservedState::new(q[0], q[2], q[1]),
    }
}

/// FORCE flux through a face normal to `axis`.
#[inline]
pub fn axis_flux(
    qm: &ConservedState,
    qp: &ConservedState,
    axis: Axis,
    p: &FaceParams,
) -> ConservedState {
    let flux = force_flux(&rotate_to_axis(qm, axis), &rotate_to_axis(qp, axis), p);
    rotate_to_axis(&flux, axis)
}

/// Evaluate every face of the tile along `fluxes.axis()`.
/// Reads the tile, writes only `fluxes`.
pub fn compute_fluxes(tile: &Tile, fluxes: &mut FluxArray, p: &FaceParams) {
    profiling::scope!("kernel::compute_fluxes");
    let axis = fluxes.axis();
    let halo = tile.halo() as i32;
    for line in 0..fluxes.lines() {
        for face in 0..fluxes.faces() {
            let lower = halo - 1 + face as i32;
            let qm = tile.get(&axis.compose(lower, line as i32));
            let qp = tile.get(&axis.compose(lower + 1, line as i32));
            fluxes.set(face, line, axis_flux(&qm, &qp, axis, p));
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rand::prelude::*;

    const G: f64 = 9.81;

    fn params() -> FaceParams {
        FaceParams {
            g: G,
            spacing: 0.5,
            dt: 0.01,
            dry_depth: 1e-6,
        }
    }

    fn random_state(rng: &mut StdRng) -> ConservedState {
        ConservedState::new(
            rng.gen_range(0.1..3.0),
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
        )
    }

    #[test]
    fn physical_flux_test() {
        let q = ConservedState::new(2.0, 4.0, -1.0);
        let f = physical_flux(&q, G, 1e-6);
        assert_approx_eq!(f64, f[0], 4.0);
        assert_approx_eq!(f64, f[1], 8.0 + 0.5 * G * 4.0);
        assert_approx_eq!(f64, f[2], -2.0);

        let g = physical_flux_y(&q, G, 1e-6);
        assert_approx_eq!(f64, g[0], -1.0);
        assert_approx_eq!(f64, g[1], -2.0);
        assert_approx_eq!(f64, g[2], 0.5 + 0.5 * G * 4.0);
    }

    #[test]
    fn dry_cell_test() {
        let q = ConservedState::new(1e-9, 1e-7, -1e-7);
        let f = physical_flux(&q, G, 1e-6);
        assert_eq!(f[0], 1e-7);
        assert_approx_eq!(f64, f[1], 0.5 * G * 1e-18);
        assert_eq!(f[2], 0.0);

        let zero = ConservedState::zeros();
        let f = force_flux(&zero, &zero, &params());
        assert_eq!(f, ConservedState::zeros());
        assert!(f.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn consistency_test() {
        // Equal states give the physical flux.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let q = random_state(&mut rng);
            assert_eq!(force_flux(&q, &q, &params()), physical_flux(&q, G, 1e-6));
        }
    }

    #[test]
    fn distinct_states_test() {
        // g = 10, spacing 1, dt 0.1:
        // LF  = (0, 12.5, 0) - 5 (qp - qm)           = (5, 12.5, 2)
        // mid = (1.5, 0, 0.2) - 0.05 (F(qp) - F(qm)) = (1.5, 0.75, 0.2)
        // LW  = F(mid)                               = (0.75, 11.625, 0.1)
        let p = FaceParams {
            g: 10.0,
            spacing: 1.0,
            dt: 0.1,
            dry_depth: 1e-6,
        };
        let qm = ConservedState::new(2.0, 0.0, 0.4);
        let qp = ConservedState::new(1.0, 0.0, 0.0);
        let f = force_flux(&qm, &qp, &p);
        assert_approx_eq!(f64, f[0], 2.875, epsilon = 1e-12);
        assert_approx_eq!(f64, f[1], 12.0625, epsilon = 1e-12);
        assert_approx_eq!(f64, f[2], 1.05, epsilon = 1e-12);

        // Same face turned to y.
        let qm = ConservedState::new(2.0, 0.4, 0.0);
        let f = axis_flux(&qm, &qp, Axis::Y, &p);
        assert_approx_eq!(f64, f[0], 2.875, epsilon = 1e-12);
        assert_approx_eq!(f64, f[1], 1.05, epsilon = 1e-12);
        assert_approx_eq!(f64, f[2], 12.0625, epsilon = 1e-12);

        // Halving dt doubles the Lax-Friedrichs diffusion.
        let half = FaceParams { dt: 0.05, ..p };
        let qm = ConservedState::new(2.0, 0.0, 0.0);
        let f = force_flux(&qm, &qp, &half);
        // LF = (10, 12.5, 0), mid = (1.5, 0.375, 0), LW = (0.375, 11.34375, 0)
        assert_approx_eq!(f64, f[0], 5.1875, epsilon = 1e-12);
        assert_approx_eq!(f64, f[1], 11.921875, epsilon = 1e-12);
        assert_eq!(f[2], 0.0);
    }

    #[test]
    fn still_water_test() {
        let q = still_water(1.5);
        let f = force_flux(&q, &q, &params());
        assert_eq!(f[0], 0.0);
        assert_eq!(f[1], 0.5 * G * 1.5 * 1.5);
        assert_eq!(f[2], 0.0);
        for axis in Axis::ALL {
            let f = axis_flux(&q, &q, axis, &params());
            assert_eq!(f[0], 0.0);
            assert_eq!(f[momentum_index(axis.other())], 0.0);
        }
    }

    #[test]
    fn rotation_equivalence_test() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..1000 {
            let qm = random_state(&mut rng);
            let qp = random_state(&mut rng);
            let p = FaceParams {
                spacing: rng.gen_range(0.1..10.0),
                dt: rng.gen_range(1e-4..1e-1),
                ..params()
            };
            let rotated = axis_flux(&qm, &qp, Axis::Y, &p);
            let direct = force_flux_with(&qm, &qp, &p, physical_flux_y);
            assert_eq!(rotated, direct);

            assert_eq!(axis_flux(&qm, &qp, Axis::X, &p), force_flux(&qm, &qp, &p));
            let q = random_state(&mut rng);
            assert_eq!(rotate_to_axis(&rotate_to_axis(&q, Axis::Y), Axis::Y), q);
        }
    }

    #[test]
    fn compute_fluxes_test() {
        let mut tile = Tile::new([3, 2], 1);
        for c in tile.local_aabb().coord_iter() {
            tile.set(&c, ConservedState::new(1.0 + 0.1 * c[0] as f64, 0.2, -0.1 * c[1] as f64));
        }
        let p = params();
        for axis in Axis::ALL {
            let mut fluxes = FluxArray::new(&tile, axis);
            compute_fluxes(&tile, &mut fluxes, &p);
            for line in 0..fluxes.lines() {
                for face in 0..fluxes.faces() {
                    let lo = axis.compose(face as i32, line as i32);
                    let hi = lo + axis.unit();
                    let e = axis_flux(&tile.get(&lo), &tile.get(&hi), axis, &p);
                    assert_eq!(fluxes.get(face, line), e);
                }
            }
        }
    }
}

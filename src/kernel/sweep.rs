//! One explicit time step of the tiled FORCE scheme.
//!
//! The domain is covered by tiles of `config.block` owned cells. Each
//! tile is processed by a `WorkerGroup` that runs
//!
//! ```text
//! LOAD_HALO -> REFLECT -> FLUX(a0) -> UPDATE(a0)
//!           -> REFLECT -> FLUX(a1) -> UPDATE(a1) -> WRITE_BACK
//! ```
//!
//! with a `StageBarrier` between stages. Tiles are grouped into strips
//! of whole tile rows; every strip exclusively owns its rows of the
//! three output fields, so strips run concurrently without sharing
//! any writable state. Groups only ever read the current time level.

use crate::config::*;
use crate::error::*;
use crate::field::*;
use crate::kernel::barrier::*;
use crate::kernel::boundary::*;
use crate::kernel::flux::*;
use crate::kernel::halo_loader::*;
use crate::kernel::tile::*;
use crate::kernel::update::*;
use crate::util::*;
use rayon::prelude::*;

/// Read only state shared by every tile of one invocation.
struct SweepContext<'a> {
    params: &'a StepParams,
    config: &'a KernelConfig,
    axes: [Axis; 2],
    input: StateView<'a>,
    domain: AABB,
}

impl SweepContext<'_> {
    fn face_params(&self, axis: Axis) -> FaceParams {
        FaceParams {
            g: self.params.g,
            spacing: self.params.spacing(axis),
            dt: self.params.dt,
            dry_depth: self.config.dry_depth,
        }
    }
}

/// Rows of the three output fields owned by one strip of tiles.
pub struct OutputStrip<'a> {
    pub h: FieldStripMut<'a>,
    pub hu: FieldStripMut<'a>,
    pub hv: FieldStripMut<'a>,
}

/// Tile and flux scratch for one group, reused by every tile of a strip.
/// The tile is fully reloaded for each tile position.
struct WorkerGroup<'a> {
    ctx: &'a SweepContext<'a>,
    tile: Tile,
    fluxes: [FluxArray; 2],
    barrier: StageBarrier,
}

impl<'a> WorkerGroup<'a> {
    fn new(ctx: &'a SweepContext<'a>) -> Self {
        let tile = Tile::new(ctx.config.block, ctx.config.halo.cells());
        let fluxes = [
            FluxArray::new(&tile, Axis::X),
            FluxArray::new(&tile, Axis::Y),
        ];
        WorkerGroup {
            ctx,
            tile,
            fluxes,
            barrier: StageBarrier::new(ctx.axes),
        }
    }

    fn run(&mut self, origin: Coord, out: &mut OutputStrip) {
        self.barrier.reset();
        self.tile.set_origin(origin);

        let [first, second] = self.ctx.axes;
        self.load();
        self.reflect();
        self.flux(first);
        self.update(first);
        self.reflect();
        self.flux(second);
        self.update(second);
        self.write_back(out);

        debug_assert!(self.barrier.is_complete());
    }

    fn load(&mut self) {
        self.barrier.enter(Stage::LoadHalo);
        load_halo(&mut self.tile, &self.ctx.input);
        self.barrier.wait();
    }

    fn reflect(&mut self) {
        self.barrier.enter(Stage::Reflect);
        reflect_boundaries(&mut self.tile, &self.ctx.domain);
        self.barrier.wait();
    }

    fn flux(&mut self, axis: Axis) {
        self.barrier.enter(Stage::Flux(axis));
        let p = self.ctx.face_params(axis);
        compute_fluxes(&self.tile, &mut self.fluxes[axis.index()], &p);
        self.barrier.wait();
    }

    fn update(&mut self, axis: Axis) {
        self.barrier.enter(Stage::Update(axis));
        let ratio = self.ctx.params.dt / self.ctx.params.spacing(axis);
        apply_update(
            &mut self.tile,
            &self.fluxes[axis.index()],
            ratio,
            &self.ctx.domain,
        );
        self.barrier.wait();
    }

    /// Commit owned cells inside the domain, ghosts and halo are dropped.
    fn write_back(&mut self, out: &mut OutputStrip) {
        profiling::scope!("kernel::write_back");
        self.barrier.enter(Stage::WriteBack);
        for local in self.tile.owned_aabb().coord_iter() {
            let global = self.tile.to_global(&local);
            if !self.ctx.domain.contains(&global) {
                continue;
            }
            let q = self.tile.get(&local);
            let (x, y) = (global[0] as usize, global[1] as usize);
            out.h.set(x, y, q[0]);
            out.hu.set(x, y, q[1]);
            out.hv.set(x, y, q[2]);
        }
        self.barrier.wait();
    }
}

fn run_strip(ctx: &SweepContext, mut out: OutputStrip) {
    let bw = ctx.config.block[0];
    let tiles_x = ctx.params.nx.div_ceil(bw);
    let y0 = out.h.y0() as i32;
    let mut group = WorkerGroup::new(ctx);
    for tx in 0..tiles_x {
        group.run(vector![(tx * bw) as i32, y0], &mut out);
    }
}

/// Advance `current` by `params.dt` into `next`, sweeping `axes[0]`
/// first. `current` is never written, and every interior cell of
/// `next` is written exactly once.
///
/// No validation is performed, see `checked_force_step`.
pub fn force_step(
    params: &StepParams,
    config: &KernelConfig,
    axes: [Axis; 2],
    current: &BufferSet,
    next: &mut BufferSet,
) {
    profiling::scope!("force_step");
    debug_assert_eq!(current.interior(), params.interior());
    debug_assert_eq!(next.interior(), params.interior());

    let ctx = SweepContext {
        params,
        config,
        axes,
        input: current.view(),
        domain: params.interior(),
    };
    let [bw, bh] = config.block;
    log::debug!(
        "force_step: {}x{} cells, {}x{} tiles of {}x{}, halo {}, sweeps {} then {}",
        params.nx,
        params.ny,
        params.nx.div_ceil(bw),
        params.ny.div_ceil(bh),
        bw,
        bh,
        config.halo.cells(),
        axes[0],
        axes[1]
    );

    let BufferSet { h, hu, hv } = next;
    if config.parallel {
        h.par_strips_mut(bh)
            .zip(hu.par_strips_mut(bh))
            .zip(hv.par_strips_mut(bh))
            .for_each(|((h, hu), hv)| {
                profiling::scope!("force_step: strip");
                run_strip(&ctx, OutputStrip { h, hu, hv })
            });
    } else {
        h.strips_mut(bh)
            .zip(hu.strips_mut(bh))
            .zip(hv.strips_mut(bh))
            .for_each(|((h, hu), hv)| run_strip(&ctx, OutputStrip { h, hu, hv }));
    }
}

/// `force_step` after checking parameters, configuration and that
/// both time levels match the grid.
pub fn checked_force_step(
    params: &StepParams,
    config: &KernelConfig,
    axes: [Axis; 2],
    current: &BufferSet,
    next: &mut BufferSet,
) -> SweResult<()> {
    params.validate()?;
    config.validate()?;
    let (nx, ny, halo) = current.shape();
    if (nx, ny) != (params.nx, params.ny) {
        return Err(SweError::ShapeMismatch {
            expected: (params.nx, params.ny, halo),
            actual: current.shape(),
        });
    }
    if next.shape() != current.shape() {
        return Err(SweError::ShapeMismatch {
            expected: current.shape(),
            actual: next.shape(),
        });
    }
    force_step(params, config, axes, current, next);
    Ok(())
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::state::*;
    use rand::prelude::*;

    fn random_buffers(nx: usize, ny: usize, seed: u64) -> BufferSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut buffers = BufferSet::new(nx, ny, 1).unwrap();
        for c in buffers.interior().coord_iter() {
            let q = ConservedState::new(
                rng.gen_range(0.5..1.5),
                rng.gen_range(-0.2..0.2),
                rng.gen_range(-0.2..0.2),
            );
            buffers.set_state(&c, &q);
        }
        buffers
    }

    fn params(nx: usize, ny: usize) -> StepParams {
        StepParams {
            nx,
            ny,
            dx: 1.0,
            dy: 0.5,
            dt: 0.02,
            g: 9.81,
        }
    }

    #[test]
    fn parallel_matches_sequential_test() {
        let (nx, ny) = (37, 21);
        let current = random_buffers(nx, ny, 3);
        let p = params(nx, ny);
        let axes = [Axis::X, Axis::Y];
        let config = KernelConfig::default().with_block(8, 4);

        let mut a = BufferSet::new(nx, ny, 1).unwrap();
        force_step(&p, &config, axes, &current, &mut a);
        let mut b = BufferSet::new(nx, ny, 1).unwrap();
        force_step(&p, &config.with_parallel(false), axes, &current, &mut b);
        assert_eq!(a.max_abs_diff(&b), 0.0);
    }

    #[test]
    fn input_untouched_test() {
        let (nx, ny) = (10, 10);
        let current = random_buffers(nx, ny, 11);
        let copy = current.clone();
        let mut next = BufferSet::new(nx, ny, 1).unwrap();
        force_step(
            &params(nx, ny),
            &KernelConfig::default(),
            [Axis::X, Axis::Y],
            &current,
            &mut next,
        );
        assert_eq!(current, copy);
        assert!(next.max_abs_diff(&current) > 0.0);
    }

    #[test]
    fn ghost_frame_untouched_test() {
        let (nx, ny) = (6, 5);
        let current = random_buffers(nx, ny, 5);
        let mut next = BufferSet::from_fields(
            Field::with_stride(nx, ny, 2, 13).unwrap(),
            Field::with_stride(nx, ny, 2, 11).unwrap(),
            Field::new(nx, ny, 2).unwrap(),
        )
        .unwrap();
        next.h.fill(-7.0);
        next.hu.fill(-7.0);
        next.hv.fill(-7.0);
        // Ghost widths of the two levels may differ for the raw entry point.
        force_step(
            &params(nx, ny),
            &KernelConfig::default().with_block(4, 4),
            [Axis::X, Axis::Y],
            &current,
            &mut next,
        );
        for f in [&next.h, &next.hu, &next.hv] {
            let written = f.as_slice().iter().filter(|v| **v != -7.0).count();
            assert!(written <= nx * ny);
            for c in f.interior().coord_iter() {
                assert_ne!(f.get(&c), -7.0);
            }
        }
    }

    #[test]
    fn checked_step_test() {
        let current = random_buffers(4, 4, 1);
        let mut next = BufferSet::new(4, 5, 1).unwrap();
        let config = KernelConfig::default();
        let axes = [Axis::X, Axis::Y];
        assert!(matches!(
            checked_force_step(&params(4, 4), &config, axes, &current, &mut next),
            Err(SweError::ShapeMismatch { .. })
        ));
        let mut next = BufferSet::new(4, 4, 1).unwrap();
        assert!(matches!(
            checked_force_step(&params(4, 5), &config, axes, &current, &mut next),
            Err(SweError::ShapeMismatch { .. })
        ));
        let bad = StepParams {
            g: -1.0,
            ..params(4, 4)
        };
        assert!(matches!(
            checked_force_step(&bad, &config, axes, &current, &mut next),
            Err(SweError::InvalidParameter { name: "g", .. })
        ));
        assert!(checked_force_step(&params(4, 4), &config, axes, &current, &mut next).is_ok());
    }
}

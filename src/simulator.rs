//! Host side time stepping around the kernel: ping-pong buffers,
//! simulated time, and sweep order selection per step.

use crate::config::*;
use crate::error::*;
use crate::field::*;
use crate::kernel::*;

/// Fraction of `dt` below which `simulate` treats the end time as reached.
pub const ARRIVAL_TOLERANCE: f64 = 1e-9;

pub struct Simulator {
    buffers: DoubleBuffer,
    params: StepParams,
    config: KernelConfig,
    order: SweepOrder,
    t: f64,
    steps: usize,
}

impl Simulator {
    /// `params.dt` is the step `simulate` takes, it is assumed to
    /// satisfy the CFL condition for the whole run.
    pub fn new(
        initial: BufferSet,
        params: StepParams,
        config: KernelConfig,
        order: SweepOrder,
    ) -> SweResult<Self> {
        params.validate()?;
        config.validate()?;
        let (nx, ny, halo) = initial.shape();
        if (nx, ny) != (params.nx, params.ny) {
            return Err(SweError::ShapeMismatch {
                expected: (params.nx, params.ny, halo),
                actual: initial.shape(),
            });
        }
        log::info!(
            "{}: {}x{} cells, dx {} dy {} dt {} g {}, {:?}",
            Self::name(),
            nx,
            ny,
            params.dx,
            params.dy,
            params.dt,
            params.g,
            order
        );
        Ok(Simulator {
            buffers: DoubleBuffer::new(initial),
            params,
            config,
            order,
            t: 0.0,
            steps: 0,
        })
    }

    pub fn name() -> &'static str {
        "FORCE"
    }

    /// Current time level.
    pub fn state(&self) -> &BufferSet {
        self.buffers.current()
    }

    pub fn into_state(self) -> BufferSet {
        self.buffers.into_current()
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Advance by `dt`, which may differ from the configured step.
    pub fn step(&mut self, dt: f64) {
        profiling::scope!("simulator::step");
        let params = StepParams { dt, ..self.params };
        let axes = self.order.axes_for_step(self.steps);
        let (current, next) = self.buffers.split();
        force_step(&params, &self.config, axes, current, next);
        self.buffers.swap();
        self.t += dt;
        self.steps += 1;
        log::trace!("step {} t {} ({} then {})", self.steps, self.t, axes[0], axes[1]);
    }

    /// Step with the configured `dt` until `t_end`, shortening the last
    /// step to land on it. Returns the number of steps taken.
    ///
    /// Times within `ARRIVAL_TOLERANCE * dt` of `t_end` count as arrived,
    /// so rounding in the accumulated time never produces an extra
    /// near-zero step, and a remainder that is `dt` up to rounding is
    /// taken as a full `dt` step.
    pub fn simulate(&mut self, t_end: f64) -> usize {
        let dt = self.params.dt;
        if dt <= 0.0 {
            log::warn!("simulate called with dt {}, nothing to do", dt);
            return 0;
        }
        let tolerance = ARRIVAL_TOLERANCE * dt;
        let start = self.steps;
        log::info!("simulate from t {} to t {}", self.t, t_end);
        while t_end - self.t > tolerance {
            let remaining = t_end - self.t;
            if remaining < dt - tolerance {
                self.step(remaining);
            } else {
                self.step(dt);
            }
        }
        if (t_end - self.t).abs() <= tolerance {
            self.t = t_end;
        }
        let taken = self.steps - start;
        log::info!("reached t {} after {} steps", self.t, taken);
        taken
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::state::*;
    use crate::util::*;
    use float_cmp::assert_approx_eq;

    fn params() -> StepParams {
        StepParams {
            nx: 8,
            ny: 6,
            dx: 1.0,
            dy: 1.0,
            dt: 0.03,
            g: 9.81,
        }
    }

    fn bump() -> BufferSet {
        let mut b = BufferSet::new(8, 6, 1).unwrap();
        b.par_set_states(|c| {
            if c == vector![3, 2] {
                still_water(1.5)
            } else {
                still_water(1.0)
            }
        });
        b
    }

    #[test]
    fn simulate_lands_on_end_test() {
        let mut sim =
            Simulator::new(bump(), params(), KernelConfig::default(), SweepOrder::XThenY)
                .unwrap();
        let steps = sim.simulate(0.1);
        assert_eq!(steps, 4);
        assert_eq!(sim.time(), 0.1);
        assert_eq!(sim.steps(), 4);
        assert_approx_eq!(f64, sim.state().total_mass(), 48.5, epsilon = 1e-10);

        // Already there
        assert_eq!(sim.simulate(0.1), 0);
    }

    #[test]
    fn whole_number_of_steps_test() {
        let p = StepParams { dt: 0.1, ..params() };
        let config = KernelConfig::default().with_block(4, 4);
        let mut sim = Simulator::new(bump(), p, config, SweepOrder::XThenY).unwrap();
        assert_eq!(sim.simulate(1.0), 10);
        assert_eq!(sim.time(), 1.0);

        let mut buffers = DoubleBuffer::new(bump());
        for _ in 0..10 {
            let (current, next) = buffers.split();
            force_step(&p, &config, [Axis::X, Axis::Y], current, next);
            buffers.swap();
        }
        assert_eq!(sim.state().max_abs_diff(buffers.current()), 0.0);

        // Frames of a whole number of steps each, as the demos run them
        let mut sim = Simulator::new(bump(), p, config, SweepOrder::XThenY).unwrap();
        for frame in 1..=7 {
            let t_end = sim.time() + 3.0 * p.dt;
            assert_eq!(sim.simulate(t_end), 3);
            assert_eq!(sim.steps(), 3 * frame);
        }
    }

    #[test]
    fn step_matches_kernel_test() {
        let initial = bump();
        let mut sim = Simulator::new(
            initial.clone(),
            params(),
            KernelConfig::default(),
            SweepOrder::Alternating,
        )
        .unwrap();
        sim.step(0.03);
        sim.step(0.03);

        let mut a = initial.clone();
        let mut b = initial.clone();
        let config = KernelConfig::default();
        force_step(&params(), &config, [Axis::X, Axis::Y], &a, &mut b);
        force_step(&params(), &config, [Axis::Y, Axis::X], &b, &mut a);
        assert_eq!(sim.state().max_abs_diff(&a), 0.0);
        assert_eq!(sim.into_state(), a);
    }

    #[test]
    fn rejects_bad_setup_test() {
        let wrong = BufferSet::new(8, 7, 1).unwrap();
        assert!(matches!(
            Simulator::new(wrong, params(), KernelConfig::default(), SweepOrder::XThenY),
            Err(SweError::ShapeMismatch { .. })
        ));
        let zero_dx = StepParams { dx: 0.0, ..params() };
        assert!(Simulator::new(bump(), zero_dx, KernelConfig::default(), SweepOrder::XThenY)
            .is_err());
    }

    #[test]
    fn zero_dt_simulate_test() {
        let mut sim = Simulator::new(
            bump(),
            StepParams { dt: 0.0, ..params() },
            KernelConfig::default(),
            SweepOrder::XThenY,
        )
        .unwrap();
        assert_eq!(sim.simulate(1.0), 0);
        assert_eq!(sim.time(), 0.0);
    }
}

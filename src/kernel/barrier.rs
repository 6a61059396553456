//! Stage ordering for one tile.
//!
//! Every worker of a tile group must finish a stage before any worker
//! starts the next one. `StageBarrier` tracks which stages have
//! completed and panics on a stage that is out of order, which also
//! rules out applying an update twice within a sweep. The checks are
//! active in release builds too.

use crate::util::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Stage {
    LoadHalo,
    Reflect,
    Flux(Axis),
    Update(Axis),
    WriteBack,
}

pub const STAGES_PER_STEP: usize = 8;

/// Stages of one invocation sweeping `axes[0]` then `axes[1]`.
pub fn stage_sequence(axes: [Axis; 2]) -> [Stage; STAGES_PER_STEP] {
    [
        Stage::LoadHalo,
        Stage::Reflect,
        Stage::Flux(axes[0]),
        Stage::Update(axes[0]),
        Stage::Reflect,
        Stage::Flux(axes[1]),
        Stage::Update(axes[1]),
        Stage::WriteBack,
    ]
}

#[derive(Debug)]
pub struct StageBarrier {
    plan: [Stage; STAGES_PER_STEP],
    completed: usize,
    in_flight: Option<Stage>,
}

impl StageBarrier {
    pub fn new(axes: [Axis; 2]) -> Self {
        StageBarrier {
            plan: stage_sequence(axes),
            completed: 0,
            in_flight: None,
        }
    }

    /// Next stage allowed to start.
    pub fn expected(&self) -> Option<Stage> {
        self.plan.get(self.completed).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.completed == STAGES_PER_STEP
    }

    /// Admit `stage`. Panics unless every earlier stage has
    /// completed and `stage` is the next one in the plan.
    #[track_caller]
    pub fn enter(&mut self, stage: Stage) {
        assert!(
            self.in_flight.is_none(),
            "{:?} entered while {:?} is in flight",
            stage,
            self.in_flight
        );
        assert_eq!(
            Some(stage),
            self.expected(),
            "stage out of order after {} completed",
            self.completed
        );
        self.in_flight = Some(stage);
    }

    /// All workers have finished the stage in flight.
    /// Panics if no stage was entered.
    #[track_caller]
    pub fn wait(&mut self) {
        assert!(self.in_flight.take().is_some(), "wait without a stage");
        self.completed += 1;
    }

    /// Start over for the next tile.
    pub fn reset(&mut self) {
        self.completed = 0;
        self.in_flight = None;
    }
}

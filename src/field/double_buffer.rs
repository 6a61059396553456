use super::*;

/// Current and next time levels. The kernel reads `current` and
/// writes `next`, the host swaps them after every step.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    current: BufferSet,
    next: BufferSet,
}

impl DoubleBuffer {
    /// `next` starts as a copy of `initial`, so its layout and
    /// ghost frame match.
    pub fn new(initial: BufferSet) -> Self {
        let next = initial.clone();
        DoubleBuffer {
            current: initial,
            next,
        }
    }

    pub fn current(&self) -> &BufferSet {
        &self.current
    }

    /// Borrow both levels with their roles for one invocation.
    pub fn split(&mut self) -> (&BufferSet, &mut BufferSet) {
        (&self.current, &mut self.next)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> BufferSet {
        self.current
    }
}

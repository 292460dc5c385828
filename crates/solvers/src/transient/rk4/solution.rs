use swing_core::Snapshot;

/// How an RK4 run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Complete,
    StoppedByObserver,
}

/// Output of [`solve`](super::solve).
///
/// `history` holds the initial snapshot followed by one snapshot per accepted
/// step, so its length is always `steps + 1`.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub history: Vec<Snapshot<I, O>>,
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    /// Final accepted snapshot, or the initial one if no step was taken.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }
}

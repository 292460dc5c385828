use swing_core::Snapshot;

/// An accepted RK4 step, as seen by an observer.
///
/// `step` is 0 for the initial snapshot and counts up by one per step.
/// Intermediate stages are never reported.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}

/// What an observer can ask the RK4 solver to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run, keeping every snapshot accepted so far.
    StopEarly,
}

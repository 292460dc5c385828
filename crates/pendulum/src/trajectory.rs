use std::iter::FusedIterator;

use swing_core::constraint::{ConstraintError, NonNegative};
use tracing::debug;

use crate::{ConfigError, Parameters, State, StepSize, TrajectoryPoint, step};

/// A lazy sequence of bob positions, one per RK4 step.
///
/// The first point is the position *after* the first step; the initial state
/// itself is not emitted. Cloning a trajectory clones its progress, so a clone
/// taken mid-way yields exactly the remaining points of the original.
#[derive(Debug, Clone)]
pub struct Trajectory {
    params: Parameters,
    step_size: StepSize,
    initial: State,
    state: State,
    steps: usize,
    remaining: usize,
}

impl Trajectory {
    /// State after the most recently emitted point.
    ///
    /// Equal to the initial state before the first call to `next`.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Total number of points this trajectory produces from the start.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns a fresh trajectory from the same initial state.
    ///
    /// The restarted sequence is identical to the original one.
    #[must_use]
    pub fn restart(&self) -> Self {
        run(&self.params, self.step_size, self.initial, self.steps)
    }

    /// Adapts the trajectory to also yield the state behind each point.
    #[must_use]
    pub fn with_states(self) -> WithStates {
        WithStates { trajectory: self }
    }
}

/// A [`Trajectory`] that pairs each point with the state it was projected
/// from. Created by [`Trajectory::with_states`].
#[derive(Debug, Clone)]
pub struct WithStates {
    trajectory: Trajectory,
}

impl Iterator for WithStates {
    type Item = (State, TrajectoryPoint);

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.trajectory.next()?;
        Some((self.trajectory.state, point))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.trajectory.size_hint()
    }
}

impl ExactSizeIterator for WithStates {}

impl FusedIterator for WithStates {}

impl Iterator for Trajectory {
    type Item = TrajectoryPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.state = step(&self.params, self.step_size, self.state);
        self.remaining -= 1;

        Some(TrajectoryPoint::from_state(&self.params, &self.state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Trajectory {}

impl FusedIterator for Trajectory {}

/// Returns the trajectory of `steps` points starting from `initial`.
///
/// `steps == 0` yields an empty trajectory.
#[must_use]
pub fn run(params: &Parameters, h: StepSize, initial: State, steps: usize) -> Trajectory {
    debug!(
        steps,
        step_size = h.seconds(),
        "creating double pendulum trajectory"
    );

    Trajectory {
        params: *params,
        step_size: h,
        initial,
        state: initial,
        steps,
        remaining: steps,
    }
}

/// Number of whole steps of length `h` that fit in `duration` seconds.
///
/// A trailing partial step is dropped rather than rounded.
///
/// # Errors
///
/// Returns [`ConfigError::Duration`] if `duration` is negative, not finite,
/// or needs more steps than a `usize` can count.
pub fn step_count(duration: f64, h: StepSize) -> Result<usize, ConfigError> {
    let duration = NonNegative::new(duration)
        .map_err(ConfigError::Duration)?
        .into_inner();

    let steps = (duration / h.seconds()).floor();

    // Rounds up to 2^64 on 64-bit targets, so equality already overflows.
    #[allow(clippy::cast_precision_loss)]
    let limit = usize::MAX as f64;
    if steps >= limit {
        return Err(ConfigError::Duration(ConstraintError::AboveMaximum));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as usize;

    Ok(steps)
}

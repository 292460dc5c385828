use swing_core::Observer;
use swing_solvers::transient::rk4;
use tracing::info;

use crate::{
    ConfigError, Derivative, DoublePendulum, Input, Parameters, PendulumProblem, State, StepSize,
    Trajectory, run, step_count,
};

/// A validated simulation setup: physical parameters, step size and duration.
///
/// The number of steps is derived once as `floor(duration / step_size)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    parameters: Parameters,
    step_size: StepSize,
    duration: f64,
    steps: usize,
}

impl Simulation {
    /// Creates a simulation lasting `duration` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Duration`] if `duration` is negative, not
    /// finite, or too long to count in steps of `step_size`.
    pub fn new(
        parameters: Parameters,
        step_size: StepSize,
        duration: f64,
    ) -> Result<Self, ConfigError> {
        let steps = step_count(duration, step_size)?;

        Ok(Self {
            parameters,
            step_size,
            duration,
            steps,
        })
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[must_use]
    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    /// Requested duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of whole steps that fit in the duration.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lazy trajectory of bob positions from `initial`.
    #[must_use]
    pub fn trajectory(&self, initial: State) -> Trajectory {
        info!(
            steps = self.steps,
            duration = self.duration,
            "simulating double pendulum"
        );
        run(&self.parameters, self.step_size, initial, self.steps)
    }

    /// Integrates from `initial` through [`rk4::solve`], keeping the full
    /// history of inputs and derivatives.
    ///
    /// The observer sees every accepted step and may stop the run early.
    ///
    /// # Errors
    ///
    /// The pendulum model cannot fail, so an error here means the solver
    /// itself rejected the run.
    pub fn solve<Obs>(
        &self,
        initial: State,
        observer: Obs,
    ) -> Result<rk4::Solution<Input, Derivative>, rk4::Error>
    where
        Obs: Observer<rk4::Event<Input, Derivative>, rk4::Action>,
    {
        rk4::solve(
            &DoublePendulum::new(self.parameters),
            &PendulumProblem,
            Input::at_start(initial),
            self.step_size.seconds(),
            self.steps,
            observer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use swing_core::constraint::ConstraintError;

    #[test]
    fn derives_truncated_step_count() {
        let simulation = Simulation::new(Parameters::default(), StepSize::default(), 1.23).unwrap();

        assert_eq!(simulation.steps(), 24);
        assert_eq!(simulation.trajectory(State::default()).len(), 24);
    }

    #[test]
    fn rejects_negative_duration() {
        let result = Simulation::new(Parameters::default(), StepSize::default(), -0.5);

        assert_eq!(result, Err(ConfigError::Duration(ConstraintError::Negative)));
    }

    #[test]
    fn long_run_can_stop_at_the_first_event() {
        let simulation = Simulation::new(Parameters::default(), StepSize::default(), 1e9).unwrap();
        assert_eq!(simulation.steps(), 20_000_000_000);

        let solution = simulation
            .solve(State::default(), |_: &rk4::Event<Input, Derivative>| {
                Some(rk4::Action::StopEarly)
            })
            .unwrap();

        assert_eq!(solution.status, rk4::Status::StoppedByObserver);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history.len(), 1);
    }

    #[test]
    fn rejects_duration_beyond_countable_steps() {
        let result = Simulation::new(Parameters::default(), StepSize::default(), 1e300);

        assert_eq!(
            result,
            Err(ConfigError::Duration(ConstraintError::AboveMaximum))
        );
    }

    #[test]
    fn solve_can_stop_early() {
        let simulation = Simulation::new(Parameters::default(), StepSize::default(), 5.0).unwrap();
        let initial = State::from_degrees(90.0, 0.0, 90.0, 0.0);

        // Stop once the upper rod first swings back through vertical.
        let solution = simulation
            .solve(initial, |event: &rk4::Event<Input, Derivative>| {
                (event.snapshot.input.state.theta1 <= 0.0).then_some(rk4::Action::StopEarly)
            })
            .unwrap();

        assert_eq!(solution.status, rk4::Status::StoppedByObserver);
        assert!(solution.steps > 0 && solution.steps < simulation.steps());
        assert!(solution.last().unwrap().input.state.theta1 <= 0.0);
    }
}

//! Classical fixed-step Runge-Kutta solver for ODE problems.
//!
//! Each step evaluates the derivative four times and combines the stages with
//! the classical weights:
//!
//! ```text
//! k1 = f(y_n)
//! k2 = f(y_n + k1 * dt/2)
//! k3 = f(y_n + k2 * dt/2)
//! k4 = f(y_n + k3 * dt)
//! y_{n+1} = y_n + (k1 + 2*k2 + 2*k3 + k4) * dt/6
//! ```
//!
//! [`advance`] performs a single step for any [`StepIntegrable`] state and is
//! usable without a [`Model`]. [`solve`] drives a [`Model`] through an
//! [`OdeProblem`] for a fixed number of steps, recording every accepted
//! snapshot and reporting it to an [`Observer`].
//!
//! # Example
//!
//! ```ignore
//! use swing_solvers::transient::rk4;
//!
//! let solution = rk4::solve_unobserved(&model, &problem, initial_input, dt, steps)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod error;
mod event;
mod solution;

pub use error::Error;
pub use event::{Action, Event};
pub use solution::{Solution, Status};

use std::ops::{Add, Mul};

use swing_core::{DerivativeOf, Model, Observer, OdeProblem, Snapshot, StepIntegrable};
use tracing::{debug, trace};

/// Upper bound on the history reserved before the first step.
///
/// Longer runs grow the history as steps are accepted, so a run that stops
/// early never pays for the steps it skipped.
const PREALLOCATED_STEPS: usize = 4096;

/// Advances `state` by one RK4 step of size `delta`.
///
/// `k1` is the derivative at `state`. The `eval` callback returns the
/// derivative at an intermediate trial state; its second argument is the
/// stage's offset from the start of the step (`delta/2`, `delta/2`, then
/// `delta`), which time-dependent systems use to place the stage in time.
///
/// `state` is never modified, and the returned value is independent of it.
///
/// # Errors
///
/// Returns the first error produced by `eval`.
pub fn advance<S, Delta, E, F>(
    state: &S,
    k1: DerivativeOf<S, Delta>,
    delta: Delta,
    mut eval: F,
) -> Result<S, E>
where
    S: StepIntegrable<Delta>,
    DerivativeOf<S, Delta>: Clone
        + Add<Output = DerivativeOf<S, Delta>>
        + Mul<f64, Output = DerivativeOf<S, Delta>>,
    Delta: Copy + Mul<f64, Output = Delta>,
    F: FnMut(&S, Delta) -> Result<DerivativeOf<S, Delta>, E>,
{
    let half = delta * 0.5;

    let k2 = eval(&state.step(k1.clone(), half), half)?;
    let k3 = eval(&state.step(k2.clone(), half), half)?;
    let k4 = eval(&state.step(k3.clone(), delta), delta)?;

    let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);
    Ok(state.step(slope, delta))
}

/// Integrates an ODE problem for `steps` fixed steps of size `dt`.
///
/// The model is called once at `initial` and then after every accepted step;
/// the three intermediate stages of each step call it as well but are not
/// recorded. Each accepted step passes through
/// [`OdeProblem::finalize_step`] before the model sees it.
///
/// The observer receives an [`Event`] for step 0 (the initial snapshot) and
/// for every accepted step after it. Returning [`Action::StopEarly`] ends the
/// run with [`Status::StoppedByObserver`], keeping the history so far.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any stage.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Copy + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    debug!(steps, "starting RK4 integration");

    let initial_output = model.call(&initial).map_err(Error::model)?;
    let mut current = Snapshot::new(initial, initial_output);
    let mut history = Vec::with_capacity(steps.min(PREALLOCATED_STEPS) + 1);

    for step in 0..=steps {
        if step > 0 {
            current = accept_step(model, problem, &current, dt)?;
            trace!(step, "accepted RK4 step");
        }
        history.push(current.clone());

        let event = Event {
            step,
            snapshot: current.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(step, "RK4 integration stopped by observer");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    debug!(steps, "RK4 integration complete");

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Takes one RK4 step from `current` and evaluates the model at the result.
fn accept_step<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: P::Delta,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Copy + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    let Snapshot { input, output } = current;

    let state = problem.state(input).map_err(Error::problem)?;
    let k1 = problem.derivative(input, output).map_err(Error::problem)?;

    let stepped = advance(&state, k1, dt, |trial, offset| {
        let stage = problem
            .build_input(input, trial, &offset)
            .map_err(Error::problem)?;
        let rate = model.call(&stage).map_err(Error::model)?;
        problem.derivative(&stage, &rate).map_err(Error::problem)
    })?;

    let next = problem
        .build_input(input, &stepped, &dt)
        .and_then(|next| problem.finalize_step(next, input, output, &dt))
        .map_err(Error::problem)?;
    let next_output = model.call(&next).map_err(Error::model)?;

    Ok(Snapshot::new(next, next_output))
}

/// Same as [`solve`] with every event ignored.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any stage.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Copy + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    solve(model, problem, initial, dt, steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // --- Test fixtures ---

    /// Scalar state.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Scalar(f64);

    /// Rate of change of a `Scalar`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Rate(f64);

    impl Add for Rate {
        type Output = Rate;

        fn add(self, rhs: Rate) -> Rate {
            Rate(self.0 + rhs.0)
        }
    }

    impl Mul<f64> for Rate {
        type Output = Rate;

        fn mul(self, rhs: f64) -> Rate {
            Rate(self.0 * rhs)
        }
    }

    impl StepIntegrable<f64> for Scalar {
        type Derivative = Rate;

        fn step(&self, derivative: Rate, dt: f64) -> Self {
            Scalar(self.0 + derivative.0 * dt)
        }
    }

    /// Model input: current value and time.
    #[derive(Debug, Clone)]
    struct Input {
        value: Scalar,
        time: f64,
    }

    /// Model that reports `rate = 3 t²`, independent of the value.
    ///
    /// RK4 reduces to Simpson's rule here, which is exact for cubics, so the
    /// integrated value must equal `t³` whenever stage offsets are placed
    /// correctly in time.
    struct CubicModel;

    impl Model for CubicModel {
        type Input = Input;
        type Output = Rate;
        type Error = Infallible;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(Rate(3.0 * input.time * input.time))
        }
    }

    /// Model with constant rate.
    struct ConstantRateModel {
        rate: f64,
    }

    impl Model for ConstantRateModel {
        type Input = Input;
        type Output = Rate;
        type Error = Infallible;

        fn call(&self, _input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(Rate(self.rate))
        }
    }

    /// Problem that tracks the value and advances time by the stage offset.
    struct TimedProblem;

    impl OdeProblem for TimedProblem {
        type Input = Input;
        type Output = Rate;
        type Delta = f64;
        type State = Scalar;
        type Error = Infallible;

        fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
            Ok(input.value)
        }

        fn derivative(
            &self,
            _input: &Self::Input,
            output: &Self::Output,
        ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
            Ok(*output)
        }

        fn build_input(
            &self,
            base: &Self::Input,
            state: &Self::State,
            delta: &Self::Delta,
        ) -> Result<Self::Input, Self::Error> {
            Ok(Input {
                value: *state,
                time: base.time + delta,
            })
        }
    }

    fn start() -> Input {
        Input {
            value: Scalar(0.0),
            time: 0.0,
        }
    }

    // --- advance ---

    #[test]
    fn advance_matches_exponential_decay() {
        // y' = -y, exact solution exp(-t). Local error is O(dt^5).
        let dt = 0.1;
        let y0 = Scalar(1.0);
        let decay = |s: &Scalar, _offset: f64| Ok::<_, Infallible>(Rate(-s.0));

        let y1 = advance(&y0, Rate(-y0.0), dt, decay).unwrap();

        assert_abs_diff_eq!(y1.0, (-dt).exp(), epsilon = 1e-7);
        assert_eq!(y0, Scalar(1.0));
    }

    #[test]
    fn advance_passes_stage_offsets() {
        let mut offsets = Vec::new();
        let _ = advance(&Scalar(0.0), Rate(0.0), 0.4, |_s, offset| {
            offsets.push(offset);
            Ok::<_, Infallible>(Rate(0.0))
        });

        assert_eq!(offsets, vec![0.2, 0.2, 0.4]);
    }

    #[test]
    fn advance_propagates_stage_error() {
        #[derive(Debug, PartialEq)]
        struct Boom;

        let mut calls = 0;
        let result = advance(&Scalar(0.0), Rate(1.0), 0.1, |_s, _offset| {
            calls += 1;
            if calls == 2 { Err(Boom) } else { Ok(Rate(1.0)) }
        });

        assert_eq!(result, Err(Boom));
        assert_eq!(calls, 2);
    }

    // --- solve ---

    #[test]
    fn constant_rate_is_exact() {
        let model = ConstantRateModel { rate: 2.0 };

        let solution =
            solve_unobserved(&model, &TimedProblem, start(), 0.1, 10).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11); // initial + 10 steps

        let last = solution.last().unwrap();
        assert_relative_eq!(last.input.value.0, 2.0, epsilon = 1e-12);
        assert_relative_eq!(last.input.time, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn time_dependent_rate_is_integrated_exactly() {
        let solution =
            solve_unobserved(&CubicModel, &TimedProblem, start(), 0.5, 4).expect("should solve");

        for snapshot in &solution.history {
            let t = snapshot.input.time;
            assert_relative_eq!(snapshot.input.value.0, t * t * t, epsilon = 1e-12);
        }
        assert_relative_eq!(solution.last().unwrap().input.time, 2.0);
    }

    #[test]
    fn observer_stops_after_the_requested_step() {
        let model = ConstantRateModel { rate: 1.0 };

        for stop_at in [0, 3, 7] {
            let observer = |event: &Event<Input, Rate>| {
                (event.step == stop_at).then_some(Action::StopEarly)
            };

            let solution = solve(&model, &TimedProblem, start(), 0.1, 10, observer).unwrap();

            assert_eq!(solution.status, Status::StoppedByObserver);
            assert_eq!(solution.steps, stop_at);
            assert_eq!(solution.history.len(), stop_at + 1);
        }
    }

    #[test]
    fn unbounded_step_count_allocates_lazily() {
        let model = ConstantRateModel { rate: 1.0 };

        for stop_at in [0, 2] {
            let observer = |event: &Event<Input, Rate>| {
                (event.step == stop_at).then_some(Action::StopEarly)
            };

            let solution =
                solve(&model, &TimedProblem, start(), 0.1, usize::MAX, observer).unwrap();

            assert_eq!(solution.status, Status::StoppedByObserver);
            assert_eq!(solution.history.len(), stop_at + 1);
            assert!(solution.history.capacity() <= PREALLOCATED_STEPS + 1);
        }
    }

    #[test]
    fn events_mirror_history() {
        let mut seen = Vec::new();
        let solution = solve(
            &CubicModel,
            &TimedProblem,
            start(),
            0.25,
            4,
            |event: &Event<Input, Rate>| {
                seen.push((event.step, event.snapshot.input.time));
                None
            },
        )
        .unwrap();

        let recorded: Vec<_> = solution
            .history
            .iter()
            .enumerate()
            .map(|(step, snapshot)| (step, snapshot.input.time))
            .collect();
        assert_eq!(seen, recorded);
        assert_eq!(seen.first(), Some(&(0, 0.0)));
    }

    #[test]
    fn zero_steps_keeps_only_the_initial_snapshot() {
        let initial = Input {
            value: Scalar(5.0),
            time: 0.0,
        };

        let solution =
            solve_unobserved(&ConstantRateModel { rate: 1.0 }, &TimedProblem, initial, 0.1, 0)
                .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.last().map(|s| s.input.value), Some(Scalar(5.0)));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("value left the valid range")]
    struct OutOfRange;

    /// Rate 1, failing once the value passes 0.3.
    struct BoundedModel;

    impl Model for BoundedModel {
        type Input = Input;
        type Output = Rate;
        type Error = OutOfRange;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            if input.value.0 > 0.3 {
                Err(OutOfRange)
            } else {
                Ok(Rate(1.0))
            }
        }
    }

    #[test]
    fn model_failure_ends_the_run() {
        let result = solve_unobserved(&BoundedModel, &TimedProblem, start(), 0.1, 10);

        let Err(error) = result else {
            panic!("expected the model to fail");
        };
        assert!(matches!(error, Error::Model(_)));
        assert_eq!(error.to_string(), "model failed: value left the valid range");
    }

    /// Wraps [`TimedProblem`] and caps accepted values at a ceiling.
    struct CappedProblem {
        ceiling: f64,
    }

    impl OdeProblem for CappedProblem {
        type Input = Input;
        type Output = Rate;
        type Delta = f64;
        type State = Scalar;
        type Error = Infallible;

        fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
            TimedProblem.state(input)
        }

        fn derivative(
            &self,
            input: &Self::Input,
            output: &Self::Output,
        ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
            TimedProblem.derivative(input, output)
        }

        fn build_input(
            &self,
            base: &Self::Input,
            state: &Self::State,
            delta: &Self::Delta,
        ) -> Result<Self::Input, Self::Error> {
            TimedProblem.build_input(base, state, delta)
        }

        fn finalize_step(
            &self,
            mut next_input: Self::Input,
            _prev_input: &Self::Input,
            _prev_output: &Self::Output,
            _step_delta: &Self::Delta,
        ) -> Result<Self::Input, Self::Error> {
            next_input.value = Scalar(next_input.value.0.min(self.ceiling));
            Ok(next_input)
        }
    }

    #[test]
    fn finalize_step_applies_to_accepted_steps() {
        let problem = CappedProblem { ceiling: 0.25 };
        let model = ConstantRateModel { rate: 1.0 };

        let solution = solve_unobserved(&model, &problem, start(), 0.1, 5).unwrap();

        let values: Vec<_> = solution.history.iter().map(|s| s.input.value.0).collect();
        assert_relative_eq!(values[1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(values[2], 0.2, epsilon = 1e-12);
        for value in &values[3..] {
            assert_relative_eq!(*value, 0.25);
        }
        assert_relative_eq!(solution.last().unwrap().input.time, 0.5, epsilon = 1e-12);
    }
}

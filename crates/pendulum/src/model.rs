//! Adapters that run the pendulum through the generic [`rk4::solve`] loop.
//!
//! [`rk4::solve`]: swing_solvers::transient::rk4::solve

use std::convert::Infallible;

use swing_core::{DerivativeOf, Model, OdeProblem};

use crate::{Derivative, Parameters, State, derivative};

/// Model input: elapsed time in seconds and the pendulum state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input {
    pub time: f64,
    pub state: State,
}

impl Input {
    /// Input at `time = 0` with the given state.
    #[must_use]
    pub fn at_start(state: State) -> Self {
        Self { time: 0.0, state }
    }
}

/// A double pendulum as a [`Model`] mapping an [`Input`] to its [`Derivative`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    parameters: Parameters,
}

impl DoublePendulum {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

impl Model for DoublePendulum {
    type Input = Input;
    type Output = Derivative;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(derivative(&self.parameters, &input.state))
    }
}

/// Integrates the pendulum state in seconds, advancing `time` with each stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendulumProblem;

impl OdeProblem for PendulumProblem {
    type Input = Input;
    type Output = Derivative;
    type Delta = f64;
    type State = State;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(input.state)
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
            time: base.time + delta,
            state: *state,
        })
    }
}

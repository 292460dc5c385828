use std::convert::Infallible;

use swing_core::constraint::{Constrained, StrictlyPositive};
use swing_solvers::transient::rk4;
use uom::si::{f64::Time, time::second};

use crate::{ConfigError, Parameters, State, derivative};

/// Fixed integration step length in seconds.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSize(Constrained<f64, StrictlyPositive>);

impl StepSize {
    /// Step length used by [`StepSize::default`], in seconds.
    pub const DEFAULT_SECONDS: f64 = 0.05;

    /// Creates a step size from a length in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StepSize`] if `seconds` is not finite and
    /// strictly positive.
    pub fn new(seconds: f64) -> Result<Self, ConfigError> {
        StrictlyPositive::new(seconds)
            .map(Self)
            .map_err(ConfigError::StepSize)
    }

    /// Creates a step size from a dimensioned time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StepSize`] if `time` is not finite and strictly
    /// positive.
    pub fn from_time(time: Time) -> Result<Self, ConfigError> {
        Self::new(time.get::<second>())
    }

    /// Returns the step length in seconds.
    #[must_use]
    pub fn seconds(self) -> f64 {
        *self.0.as_ref()
    }
}

impl Default for StepSize {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(Self::DEFAULT_SECONDS).unwrap()
    }
}

/// Advances `state` by one classical RK4 step of length `h`.
///
/// Pure: the input state is consumed and an independent next state returned.
#[must_use]
pub fn step(params: &Parameters, h: StepSize, state: State) -> State {
    let k1 = derivative(params, &state);

    rk4::advance(&state, k1, h.seconds(), |trial, _offset| {
        Ok::<_, Infallible>(derivative(params, trial))
    })
    .unwrap_or_else(|never| match never {})
}

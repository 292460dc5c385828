use crate::{DerivativeOf, StepIntegrable};

/// Glue between a [`Model`](crate::Model) and a time-stepping solver.
///
/// The model only knows how to map an input to an output. An `OdeProblem`
/// tells the solver which part of that input is the integrated state, how the
/// output turns into the state's rate of change, and how to rebuild an input
/// once the state has moved.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the integrated state out of a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input does not hold a usable state.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Rate of change of the state for one model call.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the rate cannot be derived from the call.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Model input for `state`, placed `delta` past `base`.
    ///
    /// Multi-stage solvers also call this for trial states inside a step, so
    /// `delta` may be a fraction of the step size.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no valid input exists for `state`.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;

    /// Adjusts the input of an accepted step before the model sees it.
    ///
    /// Never called for intermediate stages. Returns `next_input` unchanged
    /// unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the accepted input cannot be adjusted.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}

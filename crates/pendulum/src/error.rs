use swing_core::constraint::ConstraintError;
use thiserror::Error;

/// Errors raised when a simulation is configured with invalid values.
///
/// The numerical core itself cannot fail; every invalid input is rejected
/// here, before any state is integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid parameter `{name}`: {source}")]
    Parameter {
        name: &'static str,
        source: ConstraintError,
    },

    #[error("invalid step size: {0}")]
    StepSize(#[source] ConstraintError),

    #[error("invalid duration: {0}")]
    Duration(#[source] ConstraintError),

    #[error("invalid initial `{name}`: {source}")]
    InitialState {
        name: &'static str,
        source: ConstraintError,
    },
}

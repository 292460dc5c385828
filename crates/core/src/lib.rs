//! Traits shared by swing models and solvers.
//!
//! A physical system is written as a [`Model`] and paired with an
//! [`OdeProblem`] that names its integrated state. Solvers step that state
//! through [`StepIntegrable`] and report each accepted [`Snapshot`] to an
//! [`Observer`]. Numeric invariants on configuration values live in
//! [`constraint`].

pub mod constraint;

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};

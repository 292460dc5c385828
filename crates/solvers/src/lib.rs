//! Fixed-step ODE solvers for the swing crates.
//!
//! # Modules
//!
//! - [`transient`]: time-marching integrators for [`OdeProblem`]s
//!
//! [`OdeProblem`]: swing_core::OdeProblem

pub mod transient;

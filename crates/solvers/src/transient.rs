//! Time-marching solvers.

pub mod rk4;

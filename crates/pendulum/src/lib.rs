//! Double pendulum dynamics.
//!
//! Two massless rigid rods with point masses swing under gravity. This crate
//! provides the closed-form equations of motion, a classical RK4 step built on
//! [`swing_solvers::transient::rk4`], and the driving loop that turns an
//! initial [`State`] into a lazy sequence of Cartesian [`TrajectoryPoint`]s.
//!
//! The three core operations are pure functions of their inputs:
//!
//! - [`derivative`]: time derivative of a [`State`]
//! - [`step`]: one fixed RK4 step
//! - [`run`]: a [`Trajectory`] of `steps` bob positions
//!
//! ```
//! use swing_pendulum::{Parameters, State, StepSize, run};
//!
//! let params = Parameters::default();
//! let initial = State::from_degrees(30.0, 0.0, 30.0, 0.0);
//!
//! let points: Vec<_> = run(&params, StepSize::default(), initial, 3).collect();
//! assert_eq!(points.len(), 3);
//! ```
//!
//! # Features
//!
//! - `serde-derive` (default): `Serialize`/`Deserialize` for parameters,
//!   states and trajectory points. Deserialized parameters are validated.

mod dynamics;
mod error;
mod integrate;
mod kinematics;
mod model;
mod params;
mod simulation;
mod state;
mod trajectory;

pub use dynamics::{angular_acceleration_lower, angular_acceleration_upper, derivative};
pub use error::ConfigError;
pub use integrate::{StepSize, step};
pub use kinematics::TrajectoryPoint;
pub use model::{DoublePendulum, Input, PendulumProblem};
pub use params::Parameters;
pub use simulation::Simulation;
pub use state::{Derivative, State};
pub use trajectory::{Trajectory, WithStates, run, step_count};

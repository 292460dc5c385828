use std::ops::{Add, Mul};

use swing_core::{StepIntegrable, constraint::Finite};
use uom::si::{
    angle::{degree, radian},
    angular_velocity::{degree_per_second, radian_per_second},
    f64::{Angle, AngularVelocity},
};

use crate::ConfigError;

/// Complete state of a double pendulum at one instant.
///
/// Angles are in radians measured from the downward vertical and are never
/// wrapped; angular velocities are in rad/s. The state is Markovian: nothing
/// else is needed to compute the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// Upper rod angle.
    pub theta1: f64,
    /// Upper rod angular velocity.
    pub omega1: f64,
    /// Lower rod angle.
    pub theta2: f64,
    /// Lower rod angular velocity.
    pub omega2: f64,
}

/// Time derivative of a [`State`].
///
/// `theta1` and `theta2` hold the angular velocities, `omega1` and `omega2`
/// the angular accelerations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Derivative {
    pub theta1: f64,
    pub omega1: f64,
    pub theta2: f64,
    pub omega2: f64,
}

impl State {
    /// Creates a state in radians and radians per second.
    #[must_use]
    pub fn new(theta1: f64, omega1: f64, theta2: f64, omega2: f64) -> Self {
        Self {
            theta1,
            omega1,
            theta2,
            omega2,
        }
    }

    /// Creates a state from angles in degrees and angular velocities in
    /// degrees per second.
    #[must_use]
    pub fn from_degrees(theta1: f64, omega1: f64, theta2: f64, omega2: f64) -> Self {
        Self::from_quantities(
            Angle::new::<degree>(theta1),
            AngularVelocity::new::<degree_per_second>(omega1),
            Angle::new::<degree>(theta2),
            AngularVelocity::new::<degree_per_second>(omega2),
        )
    }

    /// Creates a state from dimensioned angles and angular velocities.
    #[must_use]
    pub fn from_quantities(
        theta1: Angle,
        omega1: AngularVelocity,
        theta2: Angle,
        omega2: AngularVelocity,
    ) -> Self {
        Self {
            theta1: theta1.get::<radian>(),
            omega1: omega1.get::<radian_per_second>(),
            theta2: theta2.get::<radian>(),
            omega2: omega2.get::<radian_per_second>(),
        }
    }

    /// Returns the state as `[θ1, ω1, θ2, ω2]`.
    #[must_use]
    pub fn to_array(self) -> [f64; 4] {
        [self.theta1, self.omega1, self.theta2, self.omega2]
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|value| value.is_finite())
    }

    /// Returns the state unchanged if it can start a simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InitialState`] naming the first component that
    /// is `NaN` or infinite.
    pub fn checked(self) -> Result<Self, ConfigError> {
        let names = ["theta1", "omega1", "theta2", "omega2"];

        for (name, value) in names.into_iter().zip(self.to_array()) {
            Finite::new(value).map_err(|source| ConfigError::InitialState { name, source })?;
        }

        Ok(self)
    }
}

impl From<[f64; 4]> for State {
    fn from([theta1, omega1, theta2, omega2]: [f64; 4]) -> Self {
        Self::new(theta1, omega1, theta2, omega2)
    }
}

impl Add for Derivative {
    type Output = Derivative;

    fn add(self, rhs: Derivative) -> Derivative {
        Derivative {
            theta1: self.theta1 + rhs.theta1,
            omega1: self.omega1 + rhs.omega1,
            theta2: self.theta2 + rhs.theta2,
            omega2: self.omega2 + rhs.omega2,
        }
    }
}

impl Mul<f64> for Derivative {
    type Output = Derivative;

    fn mul(self, rhs: f64) -> Derivative {
        Derivative {
            theta1: self.theta1 * rhs,
            omega1: self.omega1 * rhs,
            theta2: self.theta2 * rhs,
            omega2: self.omega2 * rhs,
        }
    }
}

/// Steps in seconds: `state + derivative * dt`.
impl StepIntegrable<f64> for State {
    type Derivative = Derivative;

    fn step(&self, derivative: Derivative, dt: f64) -> Self {
        Self {
            theta1: self.theta1 + derivative.theta1 * dt,
            omega1: self.omega1 + derivative.omega1 * dt,
            theta2: self.theta2 + derivative.theta2 * dt,
            omega2: self.omega2 + derivative.omega2 * dt,
        }
    }
}

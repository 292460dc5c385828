use swing_core::constraint::StrictlyPositive;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::ConfigError;

/// Physical parameters of a double pendulum, fixed for a whole run.
///
/// Lengths are in meters, masses in kilograms and gravity in m/s². Every
/// value is finite and strictly positive, which is checked on construction.
/// Because both masses are positive, the equations of motion never divide by
/// zero (see [`crate::derivative`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Unchecked")
)]
pub struct Parameters {
    pub(crate) g: f64,
    pub(crate) l1: f64,
    pub(crate) l2: f64,
    pub(crate) m1: f64,
    pub(crate) m2: f64,
}

impl Parameters {
    /// Standard gravity used by [`Parameters::default`], in m/s².
    pub const STANDARD_GRAVITY: f64 = 9.81;

    /// Rod length used by [`Parameters::default`] for both rods, in meters.
    pub const DEFAULT_LENGTH: f64 = 1.0;

    /// Bob mass used by [`Parameters::default`] for both bobs, in kilograms.
    pub const DEFAULT_MASS: f64 = 1.0;

    /// Creates validated parameters from SI values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parameter`] naming the first value that is not
    /// finite and strictly positive.
    pub fn new(g: f64, l1: f64, l2: f64, m1: f64, m2: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            g: positive("g", g)?,
            l1: positive("l1", l1)?,
            l2: positive("l2", l2)?,
            m1: positive("m1", m1)?,
            m2: positive("m2", m2)?,
        })
    }

    /// Creates validated parameters from dimensioned quantities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parameter`] if any quantity is not finite and
    /// strictly positive.
    pub fn from_quantities(
        gravity: Acceleration,
        l1: Length,
        l2: Length,
        m1: Mass,
        m2: Mass,
    ) -> Result<Self, ConfigError> {
        Self::new(
            gravity.get::<meter_per_second_squared>(),
            l1.get::<meter>(),
            l2.get::<meter>(),
            m1.get::<kilogram>(),
            m2.get::<kilogram>(),
        )
    }

    /// Gravitational acceleration in m/s².
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Upper rod length in meters.
    #[must_use]
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Lower rod length in meters.
    #[must_use]
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Upper bob mass in kilograms.
    #[must_use]
    pub fn m1(&self) -> f64 {
        self.m1
    }

    /// Lower bob mass in kilograms.
    #[must_use]
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Combined mass of both bobs.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.m1 + self.m2
    }
}

impl Default for Parameters {
    /// Unit rods and unit masses under standard gravity.
    fn default() -> Self {
        Self {
            g: Self::STANDARD_GRAVITY,
            l1: Self::DEFAULT_LENGTH,
            l2: Self::DEFAULT_LENGTH,
            m1: Self::DEFAULT_MASS,
            m2: Self::DEFAULT_MASS,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    StrictlyPositive::new(value)
        .map(|value| value.into_inner())
        .map_err(|source| ConfigError::Parameter { name, source })
}

/// Deserialization mirror of [`Parameters`] that has not been validated.
#[cfg(feature = "serde-derive")]
#[derive(serde::Deserialize)]
struct Unchecked {
    g: f64,
    l1: f64,
    l2: f64,
    m1: f64,
    m2: f64,
}

#[cfg(feature = "serde-derive")]
impl TryFrom<Unchecked> for Parameters {
    type Error = ConfigError;

    fn try_from(raw: Unchecked) -> Result<Self, Self::Error> {
        Self::new(raw.g, raw.l1, raw.l2, raw.m1, raw.m2)
    }
}

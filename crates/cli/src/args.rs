use std::path::PathBuf;

use clap::Parser;
use swing_pendulum::{ConfigError, Parameters, Simulation, State, StepSize};

/// Simulate a double pendulum and print bob positions as CSV.
///
/// Each positional argument falls back to an environment variable when it is
/// not given on the command line.
#[derive(Debug, Parser)]
#[command(name = "swing", version, about, allow_negative_numbers = true)]
pub(crate) struct Args {
    /// Simulated time in seconds
    #[arg(value_name = "T", env = "VISUALIZATION_TIME_IN_S")]
    pub(crate) duration: f64,

    /// Initial upper rod angle in degrees
    #[arg(value_name = "TH1", env = "PENDULUM_LOAD_ANGLES_IN_DEG_1")]
    pub(crate) theta1: f64,

    /// Initial lower rod angle in degrees
    #[arg(value_name = "TH2", env = "PENDULUM_LOAD_ANGLES_IN_DEG_2")]
    pub(crate) theta2: f64,

    /// Initial upper rod angular velocity in degrees per second
    #[arg(value_name = "W1", env = "PENDULUM_LOAD_ANGLES_VELOCITY_IN_DEG_1")]
    pub(crate) omega1: f64,

    /// Initial lower rod angular velocity in degrees per second
    #[arg(value_name = "W2", env = "PENDULUM_LOAD_ANGLES_VELOCITY_IN_DEG_2")]
    pub(crate) omega2: f64,

    /// Integration step in seconds
    #[arg(long, default_value_t = StepSize::DEFAULT_SECONDS)]
    pub(crate) step: f64,

    /// Gravitational acceleration in m/s²
    #[arg(long, default_value_t = Parameters::STANDARD_GRAVITY)]
    pub(crate) gravity: f64,

    /// Upper rod length in meters
    #[arg(long, default_value_t = Parameters::DEFAULT_LENGTH)]
    pub(crate) length1: f64,

    /// Lower rod length in meters
    #[arg(long, default_value_t = Parameters::DEFAULT_LENGTH)]
    pub(crate) length2: f64,

    /// Upper bob mass in kilograms
    #[arg(long, default_value_t = Parameters::DEFAULT_MASS)]
    pub(crate) mass1: f64,

    /// Lower bob mass in kilograms
    #[arg(long, default_value_t = Parameters::DEFAULT_MASS)]
    pub(crate) mass2: f64,

    /// Write CSV to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,
}

impl Args {
    /// Validates the physical setup and derives the step count.
    pub(crate) fn simulation(&self) -> Result<Simulation, ConfigError> {
        let parameters = Parameters::new(
            self.gravity,
            self.length1,
            self.length2,
            self.mass1,
            self.mass2,
        )?;
        let step_size = StepSize::new(self.step)?;

        Simulation::new(parameters, step_size, self.duration)
    }

    /// Initial state in radians, rejecting `NaN` and infinite inputs.
    pub(crate) fn initial_state(&self) -> Result<State, ConfigError> {
        State::from_degrees(self.theta1, self.omega1, self.theta2, self.omega2).checked()
    }
}

//! Equations of motion for a double pendulum with massless rods.
//!
//! Both accelerations share the denominator factor
//! `(m1 + m2) - m2·cos²(δ)` with `δ = θ2 - θ1`. Since `cos²(δ) <= 1` and
//! `m1 > 0`, it is bounded below by `m1`, so validated [`Parameters`] can
//! never produce a division by zero. No runtime guard is applied.

use crate::{Derivative, Parameters, State};

/// Angular acceleration of the upper rod, `ω1'`, in rad/s².
#[must_use]
pub fn angular_acceleration_upper(
    params: &Parameters,
    theta1: f64,
    theta2: f64,
    omega1: f64,
    omega2: f64,
) -> f64 {
    let Parameters { g, l1, l2, m1, m2 } = *params;

    let delta = theta2 - theta1;
    let (sin_delta, cos_delta) = delta.sin_cos();

    let numerator = m2 * l1 * omega1.powi(2) * sin_delta * cos_delta
        + m2 * g * theta2.sin() * cos_delta
        + m2 * l2 * omega2.powi(2) * sin_delta
        - (m1 + m2) * g * theta1.sin();
    let denominator = (m1 + m2) * l1 - m2 * l1 * cos_delta.powi(2);

    numerator / denominator
}

/// Angular acceleration of the lower rod, `ω2'`, in rad/s².
#[must_use]
pub fn angular_acceleration_lower(
    params: &Parameters,
    theta1: f64,
    theta2: f64,
    omega1: f64,
    omega2: f64,
) -> f64 {
    let Parameters { g, l1, l2, m1, m2 } = *params;

    let delta = theta2 - theta1;
    let (sin_delta, cos_delta) = delta.sin_cos();

    let numerator = -m2 * l2 * omega2.powi(2) * sin_delta * cos_delta
        + (m1 + m2)
            * (g * theta1.sin() * cos_delta - l1 * omega1.powi(2) * sin_delta - g * theta2.sin());
    let denominator = (m1 + m2) * l2 - m2 * l2 * cos_delta.powi(2);

    numerator / denominator
}

/// Time derivative of `state`: `(ω1, ω1', ω2, ω2')`.
#[must_use]
pub fn derivative(params: &Parameters, state: &State) -> Derivative {
    let State {
        theta1,
        omega1,
        theta2,
        omega2,
    } = *state;

    Derivative {
        theta1: omega1,
        omega1: angular_acceleration_upper(params, theta1, theta2, omega1, omega2),
        theta2: omega2,
        omega2: angular_acceleration_lower(params, theta1, theta2, omega1, omega2),
    }
}

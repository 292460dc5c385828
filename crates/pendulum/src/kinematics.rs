use crate::{Parameters, State};

/// Cartesian positions of both bobs, in meters, with the pivot at the origin
/// and `y` pointing up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl TrajectoryPoint {
    /// Projects a state to bob positions by forward kinematics.
    #[must_use]
    pub fn from_state(params: &Parameters, state: &State) -> Self {
        let (sin1, cos1) = state.theta1.sin_cos();
        let (sin2, cos2) = state.theta2.sin_cos();

        let x1 = params.l1 * sin1;
        let y1 = -params.l1 * cos1;

        Self {
            x1,
            y1,
            x2: x1 + params.l2 * sin2,
            y2: y1 - params.l2 * cos2,
        }
    }

    /// Distance from the pivot to the upper bob.
    #[must_use]
    pub fn upper_rod_length(&self) -> f64 {
        self.x1.hypot(self.y1)
    }

    /// Distance from the upper bob to the lower bob.
    #[must_use]
    pub fn lower_rod_length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// A state that moves along a straight line in its derivative's direction.
///
/// `step` returns `self + derivative * delta`. Solvers only ever combine
/// states through this method, so RK4 stages and the final update all go
/// through the same arithmetic. `Delta` is usually seconds as `f64`.
pub trait StepIntegrable<Delta> {
    type Derivative;

    /// New state after moving by `derivative * delta`. `self` is untouched.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for `<T as StepIntegrable<Delta>>::Derivative`.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

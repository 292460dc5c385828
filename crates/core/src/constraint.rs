//! Numeric constraints checked once at construction time.
//!
//! A [`Constrained<T, C>`] value can only be built through
//! [`Constrained::new`], which runs the marker's [`Constraint::check`]. After
//! that the value is trusted everywhere it flows, so hot numerical loops never
//! re-check their inputs.
//!
//! # Provided Constraints
//!
//! - [`Finite`]: any value except `NaN` and infinities
//! - [`NonNegative`]: zero or greater
//! - [`StrictlyPositive`]: greater than zero
//!
//! All of them reject `NaN` and infinite values.
//!
//! # Extending
//!
//! Custom invariants are defined by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

use std::marker::PhantomData;

use thiserror::Error;

/// An invariant on values of type `T`, implemented by a marker type.
pub trait Constraint<T> {
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing how `value` falls short.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Why a value was rejected by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    Infinite,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value of type `T` known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use swing_core::constraint::{Constrained, StrictlyPositive};
///
/// let length = Constrained::<f64, StrictlyPositive>::new(1.5).unwrap();
/// assert_eq!(length.into_inner(), 1.5);
///
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the violation reported by `C`.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker for values that are neither `NaN` nor infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finite;

impl Constraint<f64> for Finite {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        check_finite(*value)
    }
}

impl Finite {
    /// Constructs a finite `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is `NaN` or infinite.
    pub fn new(value: f64) -> Result<Constrained<f64, Finite>, ConstraintError> {
        Constrained::new(value)
    }
}

/// Marker for values that are finite and zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl Constraint<f64> for NonNegative {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        check_finite(*value)?;
        if *value < 0.0 {
            return Err(ConstraintError::Negative);
        }
        Ok(())
    }
}

impl NonNegative {
    /// Constructs a non-negative `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is negative, `NaN`, or infinite.
    pub fn new(value: f64) -> Result<Constrained<f64, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

/// Marker for values that are finite and greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl Constraint<f64> for StrictlyPositive {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        NonNegative::check(value)?;
        #[allow(clippy::float_cmp)]
        if *value == 0.0 {
            return Err(ConstraintError::Zero);
        }
        Ok(())
    }
}

impl StrictlyPositive {
    /// Constructs a strictly positive `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is zero, negative, `NaN`, or infinite.
    pub fn new(value: f64) -> Result<Constrained<f64, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
    }
}

fn check_finite(value: f64) -> Result<(), ConstraintError> {
    if value.is_nan() {
        Err(ConstraintError::NotANumber)
    } else if value.is_infinite() {
        Err(ConstraintError::Infinite)
    } else {
        Ok(())
    }
}

use std::{
    fmt::{self, Debug, Display},
    ops::{Add, AddAssign, Mul, Sub, SubAssign},
};

use num_complex::Complex64;

use crate::{
    error::{OptimizerErr, Result},
    optimization::Moments,
};

/// The two representations a parameter vector can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Real,
    Complex,
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Real => f.write_str("real"),
            ScalarKind::Complex => f.write_str("complex"),
        }
    }
}

/// An element of a parameter or gradient vector.
///
/// Implemented for `f64` and `Complex64`. Every update rule is written once against this trait,
/// reducing gradients to real statistics through `norm_sqr` and `modulus` where it accumulates
/// second moments.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Mul<f64, Output = Self>
{
    const KIND: ScalarKind;

    /// Squared magnitude, `g * g` for reals and `|g|²` for complex numbers.
    fn norm_sqr(self) -> f64;

    /// Magnitude, `|g|`.
    fn modulus(self) -> f64;

    /// Borrows the first-moment buffer as a slice of this scalar.
    ///
    /// # Errors
    /// `ScalarKindMismatch` if the buffer was allocated for the other representation.
    fn moments_mut(moments: &mut Moments) -> Result<&mut [Self]>;
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Real;

    fn norm_sqr(self) -> f64 {
        self * self
    }

    fn modulus(self) -> f64 {
        self.abs()
    }

    fn moments_mut(moments: &mut Moments) -> Result<&mut [Self]> {
        match moments {
            Moments::Real(m) => Ok(&mut m[..]),
            Moments::Complex(_) => Err(OptimizerErr::ScalarKindMismatch {
                expected: ScalarKind::Complex,
                got: ScalarKind::Real,
            }),
        }
    }
}

impl Scalar for Complex64 {
    const KIND: ScalarKind = ScalarKind::Complex;

    fn norm_sqr(self) -> f64 {
        Complex64::norm_sqr(&self)
    }

    fn modulus(self) -> f64 {
        self.norm()
    }

    fn moments_mut(moments: &mut Moments) -> Result<&mut [Self]> {
        match moments {
            Moments::Complex(m) => Ok(&mut m[..]),
            Moments::Real(_) => Err(OptimizerErr::ScalarKindMismatch {
                expected: ScalarKind::Real,
                got: ScalarKind::Complex,
            }),
        }
    }
}

/// A gradient whose representation is only known at runtime.
#[derive(Debug, Clone, Copy)]
pub enum Gradient<'a> {
    Real(&'a [f64]),
    Complex(&'a [Complex64]),
}

impl Gradient<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Gradient::Real(_) => ScalarKind::Real,
            Gradient::Complex(_) => ScalarKind::Complex,
        }
    }
}

/// Parameters whose representation is only known at runtime, borrowed mutably for one update.
#[derive(Debug)]
pub enum Parameters<'a> {
    Real(&'a mut [f64]),
    Complex(&'a mut [Complex64]),
}

impl Parameters<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Parameters::Real(_) => ScalarKind::Real,
            Parameters::Complex(_) => ScalarKind::Complex,
        }
    }
}

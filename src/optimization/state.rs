use num_complex::Complex64;

use crate::{
    error::{OptimizerErr, Result},
    scalar::{Scalar, ScalarKind},
};

/// The shape of the parameters an optimizer was initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub len: usize,
    pub kind: ScalarKind,
}

impl Layout {
    /// Builds the layout of the given parameters.
    pub fn of<S: Scalar>(params: &[S]) -> Self {
        Self {
            len: params.len(),
            kind: S::KIND,
        }
    }

    /// Checks that an update over `grad` and `params` agrees with the layout established at
    /// `init`.
    ///
    /// # Arguments
    /// * `layout` - The layout recorded by the last `init`, if any.
    /// * `grad` - The gradient of the update.
    /// * `params` - The parameters of the update.
    ///
    /// # Returns
    /// The checked layout, or the first violation found.
    pub fn check<S: Scalar>(layout: Option<Layout>, grad: &[S], params: &[S]) -> Result<Layout> {
        Self::check_lengths::<S>(layout, grad.len(), params.len())
    }

    /// Same as `check` from the lengths alone, for a gradient that still has to be converted to
    /// the parameters' representation `S`.
    pub fn check_lengths<S: Scalar>(
        layout: Option<Layout>,
        grad_len: usize,
        params_len: usize,
    ) -> Result<Layout> {
        let layout = layout.ok_or(OptimizerErr::NotInitialized)?;

        if layout.kind != S::KIND {
            return Err(OptimizerErr::ScalarKindMismatch {
                expected: layout.kind,
                got: S::KIND,
            });
        }

        if params_len != layout.len {
            return Err(OptimizerErr::SizeMismatch {
                a: "parameters",
                b: "optimizer state",
                got: params_len,
                expected: layout.len,
            });
        }

        if grad_len != layout.len {
            return Err(OptimizerErr::SizeMismatch {
                a: "gradient",
                b: "optimizer state",
                got: grad_len,
                expected: layout.len,
            });
        }

        Ok(layout)
    }
}

/// A first-moment buffer, kept in the same representation as the parameters so complex
/// parameters keep their phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Moments {
    Real(Box<[f64]>),
    Complex(Box<[Complex64]>),
}

impl Moments {
    /// Allocates a zeroed buffer for the given layout.
    pub fn zeroed(layout: Layout) -> Self {
        match layout.kind {
            ScalarKind::Real => Moments::Real(zeroed(layout.len)),
            ScalarKind::Complex => {
                Moments::Complex(vec![Complex64::new(0., 0.); layout.len].into_boxed_slice())
            }
        }
    }

    /// Zeroes the buffer in place, keeping its length.
    pub fn clear(&mut self) {
        match self {
            Moments::Real(m) => m.fill(0.),
            Moments::Complex(m) => m.fill(Complex64::new(0., 0.)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Moments::Real(m) => m.len(),
            Moments::Complex(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Moments {
    fn default() -> Self {
        Moments::Real(Box::default())
    }
}

/// Allocates a zeroed real statistic buffer.
pub fn zeroed(len: usize) -> Box<[f64]> {
    vec![0.; len].into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_uninitialized_state() {
        let res = Layout::check::<f64>(None, &[1.], &[1.]);
        assert!(matches!(res, Err(OptimizerErr::NotInitialized)));
    }

    #[test]
    fn check_rejects_mismatched_lengths() {
        let layout = Some(Layout::of(&[0.; 3]));

        let res = Layout::check::<f64>(layout, &[1.; 3], &[1.; 2]);
        assert!(matches!(
            res,
            Err(OptimizerErr::SizeMismatch {
                a: "parameters",
                got: 2,
                expected: 3,
                ..
            })
        ));

        let res = Layout::check::<f64>(layout, &[1.; 4], &[1.; 3]);
        assert!(matches!(
            res,
            Err(OptimizerErr::SizeMismatch {
                a: "gradient",
                got: 4,
                expected: 3,
                ..
            })
        ));
    }

    #[test]
    fn check_rejects_other_representation() {
        let layout = Some(Layout::of(&[Complex64::new(0., 0.); 2]));
        let res = Layout::check::<f64>(layout, &[1.; 2], &[1.; 2]);

        assert!(matches!(
            res,
            Err(OptimizerErr::ScalarKindMismatch {
                expected: ScalarKind::Complex,
                got: ScalarKind::Real,
            })
        ));
    }

    #[test]
    fn clear_keeps_length() {
        let mut m = Moments::zeroed(Layout {
            len: 4,
            kind: ScalarKind::Complex,
        });
        if let Moments::Complex(m) = &mut m {
            m[2] = Complex64::new(1., -1.);
        }

        m.clear();

        assert_eq!(m.len(), 4);
        assert_eq!(m, Moments::Complex(vec![Complex64::new(0., 0.); 4].into_boxed_slice()));
    }
}

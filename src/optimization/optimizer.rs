use num_complex::Complex64;

use super::Layout;
use crate::{error::Result, scalar::Scalar};

/// Defines the strategy for updating variational parameters based on an estimated gradient.
///
/// The `UpdateRule` trait is responsible for the mathematical transition of the parameters from
/// state `t` to `t+1`, keeping whatever per-parameter statistics the algorithm needs between calls.
pub trait UpdateRule {
    /// Sizes and zeroes the internal state for the given parameters.
    ///
    /// # Arguments
    /// * `params` - The initial parameters, only their length and representation are used.
    fn init<S: Scalar>(&mut self, params: &[S]);

    /// Updates the provided parameters in place using the given gradient.
    ///
    /// # Arguments
    /// * `grad` - The gradient estimate corresponding to `params`.
    /// * `params` - The current parameters.
    ///
    /// # Returns
    /// An error if the rule was not initialized, or if `grad` or `params` disagree with the
    /// layout established at `init`. Nothing is mutated when an error is returned.
    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()>;

    /// Clears the accumulated state without resizing it.
    fn reset(&mut self);

    /// The layout recorded by the last `init`, if any.
    fn layout(&self) -> Option<Layout>;

    /// Reduces one entry of a complex gradient to the real gradient applied to a real parameter.
    ///
    /// Defaults to the real part.
    fn project(&self, grad: Complex64) -> f64 {
        grad.re
    }
}

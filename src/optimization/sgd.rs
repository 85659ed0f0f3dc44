use super::{Layout, UpdateRule};
use crate::{error::Result, scalar::Scalar};

/// Plain stochastic gradient descent, with optional L2 regularization and learning rate decay.
///
/// A complex gradient driving real parameters contributes its real part.
#[derive(Debug)]
pub struct Sgd {
    initial_learning_rate: f64,
    learning_rate: f64,
    l2_reg: f64,
    decay_factor: f64,
    layout: Option<Layout>,
}

impl Sgd {
    /// Creates a new `Sgd` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `l2_reg` - The L2 regularization strength, `0` disables it.
    /// * `decay_factor` - Multiplies the learning rate after every update, `1` disables it.
    ///
    /// # Returns
    /// A new `Sgd` instance.
    pub fn new(learning_rate: f64, l2_reg: f64, decay_factor: f64) -> Self {
        Self {
            initial_learning_rate: learning_rate,
            learning_rate,
            l2_reg,
            decay_factor,
            layout: None,
        }
    }

    /// The learning rate the next update will use.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl UpdateRule for Sgd {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        self.layout = Some(Layout::of(params));
        self.learning_rate = self.initial_learning_rate;
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let lr = self.learning_rate;

        if self.l2_reg == 0. {
            for (p, &g) in params.iter_mut().zip(grad) {
                *p -= g * lr;
            }
        } else {
            let shrink = 1. - lr * self.l2_reg;
            for (p, &g) in params.iter_mut().zip(grad) {
                *p = *p * shrink - g * lr;
            }
        }

        self.learning_rate *= self.decay_factor;
        Ok(())
    }

    fn reset(&mut self) {
        self.learning_rate = self.initial_learning_rate;
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn decay_shrinks_learning_rate_until_reset() {
        let mut sgd = Sgd::new(1., 0., 0.5);
        let mut params = [0_f64];
        sgd.init(&params);

        sgd.update(&[1.], &mut params).unwrap();
        sgd.update(&[1.], &mut params).unwrap();
        assert_eq!(params, [-1.5]);
        assert_eq!(sgd.learning_rate(), 0.25);

        sgd.reset();
        assert_eq!(sgd.learning_rate(), 1.);
    }

    #[test]
    fn l2_reg_pulls_towards_origin() {
        let mut sgd = Sgd::new(0.1, 0.5, 1.);
        let mut params = [Complex64::new(2., -2.)];
        sgd.init(&params);

        sgd.update(&[Complex64::new(0., 0.)], &mut params).unwrap();

        let expected = Complex64::new(2., -2.) * 0.95;
        assert!((params[0] - expected).norm() < 1e-12);
    }
}

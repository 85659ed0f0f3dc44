use super::{Layout, UpdateRule, state};
use crate::{error::Result, scalar::Scalar};

/// RMSProp, normalizes every step by a running RMS of the gradients.
///
/// Complex gradients contribute their squared magnitude to the running average. A complex
/// gradient driving real parameters contributes its real part.
#[derive(Debug)]
pub struct RmsProp {
    learning_rate: f64,
    beta: f64,
    epscut: f64,
    mean_sq_grad: Box<[f64]>,
    layout: Option<Layout>,
}

impl RmsProp {
    /// Creates a new `RmsProp` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta` - The decay rate of the running average.
    /// * `epscut` - Added to the denominator to keep it away from zero.
    ///
    /// # Returns
    /// A new `RmsProp` instance.
    pub fn new(learning_rate: f64, beta: f64, epscut: f64) -> Self {
        Self {
            learning_rate,
            beta,
            epscut,
            mean_sq_grad: Box::default(),
            layout: None,
        }
    }
}

impl UpdateRule for RmsProp {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.mean_sq_grad = state::zeroed(layout.len);
        self.layout = Some(layout);
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let Self {
            learning_rate: lr,
            beta,
            epscut: eps,
            ..
        } = *self;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.mean_sq_grad.iter_mut())
            .for_each(|((p, &g), eg)| {
                *eg = beta * *eg + (1. - beta) * g.norm_sqr();
                *p -= g * (lr / (eg.sqrt() + eps));
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.mean_sq_grad.fill(0.);
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
    fn real_step_normalizes_by_running_mean_square() {
        let (lr, beta, eps) = (0.01, 0.9, 1e-6);
        let mut rms_prop = RmsProp::new(lr, beta, eps);
        let mut params = [1_f64, -1.];
        rms_prop.init(&params);

        rms_prop.update(&[2., 0.], &mut params).unwrap();

        let eg: f64 = (1. - beta) * 4.;
        assert!((params[0] - (1. - 2. * (lr / (eg.sqrt() + eps)))).abs() < 1e-12);
        assert_eq!(params[1], -1.);

        rms_prop.update(&[2., 0.], &mut params).unwrap();

        let first = 1. - 2. * (lr / (eg.sqrt() + eps));
        let eg = beta * eg + (1. - beta) * 4.;
        assert!((params[0] - (first - 2. * (lr / (eg.sqrt() + eps)))).abs() < 1e-12);
    }

    #[test]
    fn complex_gradient_averages_squared_magnitude() {
        let (lr, beta, eps) = (0.01, 0.9, 1e-6);
        let mut rms_prop = RmsProp::new(lr, beta, eps);
        let mut params = [Complex64::new(0., 0.)];
        rms_prop.init(&params);

        let g = Complex64::new(3., 4.);
        rms_prop.update(&[g], &mut params).unwrap();

        let eg: f64 = (1. - beta) * 25.;
        let expected = -(g * (lr / (eg.sqrt() + eps)));
        assert!((params[0] - expected).norm() < 1e-12);
    }
}

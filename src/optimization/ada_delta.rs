use super::{Layout, UpdateRule, state};
use crate::{error::Result, scalar::Scalar};

/// AdaDelta, a learning-rate-free method whose step is the ratio between the running RMS of
/// past updates and the running RMS of past gradients.
///
/// Both running averages are real, complex gradients and updates contribute their squared
/// magnitude. A complex gradient driving real parameters contributes its real part.
#[derive(Debug)]
pub struct AdaDelta {
    rho: f64,
    epscut: f64,
    mean_sq_grad: Box<[f64]>,
    mean_sq_delta: Box<[f64]>,
    layout: Option<Layout>,
}

impl AdaDelta {
    /// Creates a new `AdaDelta` optimizer.
    ///
    /// # Arguments
    /// * `rho` - The decay rate of both running averages.
    /// * `epscut` - Added under both square roots, it also sizes the very first steps.
    ///
    /// # Returns
    /// A new `AdaDelta` instance.
    pub fn new(rho: f64, epscut: f64) -> Self {
        Self {
            rho,
            epscut,
            mean_sq_grad: Box::default(),
            mean_sq_delta: Box::default(),
            layout: None,
        }
    }
}

impl UpdateRule for AdaDelta {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.mean_sq_grad = state::zeroed(layout.len);
        self.mean_sq_delta = state::zeroed(layout.len);
        self.layout = Some(layout);
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let Self {
            rho, epscut: eps, ..
        } = *self;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.mean_sq_grad.iter_mut())
            .zip(self.mean_sq_delta.iter_mut())
            .for_each(|(((p, &g), eg), edx)| {
                *eg = rho * *eg + (1. - rho) * g.norm_sqr();
                let delta = g * -((*edx + eps).sqrt() / (*eg + eps).sqrt());
                *edx = rho * *edx + (1. - rho) * delta.norm_sqr();
                *p += delta;
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.mean_sq_grad.fill(0.);
        self.mean_sq_delta.fill(0.);
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

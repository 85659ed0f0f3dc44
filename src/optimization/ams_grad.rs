use super::{Layout, Moments, UpdateRule, state};
use crate::{error::Result, scalar::Scalar};

/// AMSGrad, an Adam variant normalizing by the running maximum of the second moment so the
/// effective step never grows back.
///
/// The first moment is kept in the parameters' representation, second moments accumulate the
/// gradient's squared magnitude. A complex gradient driving real parameters contributes its real
/// part.
#[derive(Debug)]
pub struct AmsGrad {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epscut: f64,
    m: Moments,
    v: Box<[f64]>,
    v_hat: Box<[f64]>,
    layout: Option<Layout>,
}

impl AmsGrad {
    /// Creates a new `AmsGrad` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epscut` - Hyperparameters to the optimization algorithm.
    ///
    /// # Returns
    /// A new `AmsGrad` instance.
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epscut: f64) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epscut,
            m: Moments::default(),
            v: Box::default(),
            v_hat: Box::default(),
            layout: None,
        }
    }

    /// The running maximum of the second moment, empty before `init`.
    pub fn max_second_moment(&self) -> &[f64] {
        &self.v_hat
    }
}

impl UpdateRule for AmsGrad {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.m = Moments::zeroed(layout);
        self.v = state::zeroed(layout.len);
        self.v_hat = state::zeroed(layout.len);
        self.layout = Some(layout);
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epscut: eps,
            ..
        } = *self;

        let m = S::moments_mut(&mut self.m)?;

        params
            .iter_mut()
            .zip(grad)
            .zip(m.iter_mut())
            .zip(self.v.iter_mut().zip(self.v_hat.iter_mut()))
            .for_each(|(((p, &g), m), (v, v_hat))| {
                *m = *m * b1 + g * (1. - b1);
                *v = b2 * *v + (1. - b2) * g.norm_sqr();
                *v_hat = v_hat.max(*v);
                *p -= *m * (lr / (v_hat.sqrt() + eps));
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.fill(0.);
        self.v_hat.fill(0.);
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

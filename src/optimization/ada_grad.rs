use super::{Layout, UpdateRule, state};
use crate::{error::Result, scalar::Scalar};

/// AdaGrad, scales every step by the inverse root of the squared gradients accumulated so far.
///
/// Complex gradients accumulate their squared magnitude. A complex gradient driving real
/// parameters contributes its real part.
#[derive(Debug)]
pub struct AdaGrad {
    learning_rate: f64,
    epscut: f64,
    accum: Box<[f64]>,
    layout: Option<Layout>,
}

impl AdaGrad {
    /// Creates a new `AdaGrad` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `epscut` - Added to the denominator to keep it away from zero.
    ///
    /// # Returns
    /// A new `AdaGrad` instance.
    pub fn new(learning_rate: f64, epscut: f64) -> Self {
        Self {
            learning_rate,
            epscut,
            accum: Box::default(),
            layout: None,
        }
    }
}

impl UpdateRule for AdaGrad {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.accum = state::zeroed(layout.len);
        self.layout = Some(layout);
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let Self {
            learning_rate: lr,
            epscut: eps,
            ..
        } = *self;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.accum.iter_mut())
            .for_each(|((p, &g), acc)| {
                *acc += g.norm_sqr();
                *p -= g * (lr / (acc.sqrt() + eps));
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.accum.fill(0.);
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

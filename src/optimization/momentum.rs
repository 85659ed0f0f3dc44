use super::{Layout, Moments, UpdateRule};
use crate::{error::Result, scalar::Scalar};

/// Gradient descent with a momentum term.
///
/// The velocity is kept in the parameters' representation. A complex gradient driving real
/// parameters contributes its real part.
#[derive(Debug)]
pub struct Momentum {
    learning_rate: f64,
    beta: f64,
    velocity: Moments,
    layout: Option<Layout>,
}

impl Momentum {
    /// Creates a new `Momentum` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta` - The momentum coefficient, how much of the previous velocity is kept.
    ///
    /// # Returns
    /// A new `Momentum` instance.
    pub fn new(learning_rate: f64, beta: f64) -> Self {
        Self {
            learning_rate,
            beta,
            velocity: Moments::default(),
            layout: None,
        }
    }
}

impl UpdateRule for Momentum {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.velocity = Moments::zeroed(layout);
        self.layout = Some(layout);
    }

    fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        Layout::check(self.layout, grad, params)?;

        let Self {
            learning_rate: lr,
            beta,
            ..
        } = *self;

        let velocity = S::moments_mut(&mut self.velocity)?;

        params
            .iter_mut()
            .zip(grad)
            .zip(velocity.iter_mut())
            .for_each(|((p, &g), v)| {
                *v = *v * beta + g;
                *p -= *v * lr;
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.velocity.clear();
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

use super::{Layout, Moments, UpdateRule, state};
use crate::{error::Result, scalar::Scalar};

/// AdaMax, the infinity-norm variant of Adam.
///
/// The first moment is kept in the parameters' representation while the infinity norm tracks
/// the gradient's modulus. A complex gradient driving real parameters contributes its real part.
#[derive(Debug)]
pub struct AdaMax {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epscut: f64,
    beta1_t: f64,
    steps: u64,
    m: Moments,
    u: Box<[f64]>,
    layout: Option<Layout>,
}

impl AdaMax {
    /// Creates a new `AdaMax` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epscut` - Hyperparameters to the optimization algorithm.
    ///
    /// # Returns
    /// A new `AdaMax` instance.
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epscut: f64) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epscut,
            beta1_t: 1.,
            steps: 0,
            m: Moments::default(),
            u: Box::default(),
            layout: None,
        }
    }

    /// The amount of updates since the last `init` or `reset`.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl UpdateRule for AdaMax {
    fn init<S: Scalar>(&mut self, params: &[S]) {
        let layout = Layout::of(params);
        self.m = Moments::zeroed(layout);
        self.u = state::zeroed(layout.len);
        self.beta1_t = 1.;
        self.steps = 0;
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

        self.steps += 1;
        self.beta1_t *= b1;
        let step_size = lr / (1. - self.beta1_t);

        params
            .iter_mut()
            .zip(grad)
            .zip(m.iter_mut())
            .zip(self.u.iter_mut())
            .for_each(|(((p, &g), m), u)| {
                *m = *m * b1 + g * (1. - b1);
                *u = (b2 * *u).max(g.modulus());
                *p -= *m * (step_size / (*u + eps));
            });

        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.u.fill(0.);
        self.beta1_t = 1.;
        self.steps = 0;
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }
}

use log::{debug, trace};
use num_complex::Complex64;
use serde_json::Value;

use crate::{
    error::{OptimizerErr, Result},
    optimization::{
        AdaDelta, AdaGrad, AdaMax, AmsGrad, Layout, Momentum, RmsProp, Sgd, UpdateRule,
    },
    scalar::{Gradient, Parameters, Scalar, ScalarKind},
    specs::{ConfigWarning, OptimizerSpec},
};

/// Forwards a call to whichever update rule the `Optimizer` owns.
///
/// The rules' methods are generic over the scalar type, so they can't sit behind a trait object;
/// this macro expands the static dispatch match once per forwarded call instead.
///
/// # Arguments
/// * `target` - The `Rule` to match on, usually `&mut self.rule`.
/// * `rule` - The name bound to the concrete rule inside `body`.
/// * `body` - The expression evaluated with `rule` bound.
macro_rules! dispatch {
    ($target:expr, $rule:ident => $body:expr) => {
        match $target {
            Rule::Sgd($rule) => $body,
            Rule::Momentum($rule) => $body,
            Rule::AdaGrad($rule) => $body,
            Rule::AdaDelta($rule) => $body,
            Rule::AdaMax($rule) => $body,
            Rule::AmsGrad($rule) => $body,
            Rule::RmsProp($rule) => $body,
        }
    };
}

#[derive(Debug)]
enum Rule {
    Sgd(Sgd),
    Momentum(Momentum),
    AdaGrad(AdaGrad),
    AdaDelta(AdaDelta),
    AdaMax(AdaMax),
    AmsGrad(AmsGrad),
    RmsProp(RmsProp),
}

/// Owns exactly one update rule, selected at construction from a configuration descriptor, and
/// forwards every operation to it.
///
/// The lifecycle is `init` once with the starting parameters, `update` once per training step and
/// optionally `reset` between independent runs.
#[derive(Debug)]
pub struct Optimizer {
    spec: OptimizerSpec,
    rule: Rule,
    /// Scratch space for `update_projected`, reused across calls.
    projected: Vec<f64>,
}

impl Optimizer {
    /// Builds an optimizer from a configuration descriptor, logging any deprecation warning.
    ///
    /// # Arguments
    /// * `pars` - The configuration descriptor, see `OptimizerSpec::from_json`.
    ///
    /// # Returns
    /// A new `Optimizer`, or why the descriptor was rejected.
    pub fn new(pars: &Value) -> Result<Self> {
        let mut warnings = Vec::new();
        Self::with_diagnostics(pars, &mut warnings)
    }

    /// Builds an optimizer from a configuration descriptor, pushing any deprecation warning into
    /// `warnings`. Warnings are logged as they're found, so `new` doesn't lose them.
    ///
    /// # Arguments
    /// * `pars` - The configuration descriptor, see `OptimizerSpec::from_json`.
    /// * `warnings` - Receives the non-fatal findings of the resolution.
    ///
    /// # Returns
    /// A new `Optimizer`, or why the descriptor was rejected.
    pub fn with_diagnostics(pars: &Value, warnings: &mut Vec<ConfigWarning>) -> Result<Self> {
        let spec = OptimizerSpec::from_json(pars, warnings)?;
        Self::from_spec(spec)
    }

    /// Builds an optimizer from an already resolved specification.
    ///
    /// # Arguments
    /// * `spec` - The family and hyperparameters of the optimizer.
    ///
    /// # Returns
    /// A new `Optimizer`, or the first invalid hyperparameter.
    pub fn from_spec(spec: OptimizerSpec) -> Result<Self> {
        spec.validate()?;

        let rule = match spec {
            OptimizerSpec::Sgd(s) => {
                Rule::Sgd(Sgd::new(s.learning_rate, s.l2_reg, s.decay_factor))
            }
            OptimizerSpec::Momentum(s) => Rule::Momentum(Momentum::new(s.learning_rate, s.beta)),
            OptimizerSpec::AdaGrad(s) => Rule::AdaGrad(AdaGrad::new(s.learning_rate, s.epscut)),
            OptimizerSpec::AdaDelta(s) => Rule::AdaDelta(AdaDelta::new(s.rho, s.epscut)),
            OptimizerSpec::AdaMax(s) => {
                Rule::AdaMax(AdaMax::new(s.learning_rate, s.beta1, s.beta2, s.epscut))
            }
            OptimizerSpec::AmsGrad(s) => {
                Rule::AmsGrad(AmsGrad::new(s.learning_rate, s.beta1, s.beta2, s.epscut))
            }
            OptimizerSpec::RmsProp(s) => {
                Rule::RmsProp(RmsProp::new(s.learning_rate, s.beta, s.epscut))
            }
        };

        debug!(optimizer = spec.name(); "built optimizer");
        Ok(Self {
            spec,
            rule,
            projected: Vec::new(),
        })
    }

    /// The configuration name of the owned family.
    pub fn name(&self) -> &'static str {
        self.spec.name()
    }

    /// The specification this optimizer was built from.
    pub fn spec(&self) -> &OptimizerSpec {
        &self.spec
    }

    /// Sizes and zeroes the state of the owned rule for the given parameters.
    pub fn init<S: Scalar>(&mut self, params: &[S]) {
        debug!(
            optimizer = self.name(),
            len = params.len(),
            kind:% = S::KIND;
            "initializing optimizer state"
        );
        dispatch!(&mut self.rule, rule => rule.init(params))
    }

    /// Updates `params` in place, gradient and parameters sharing one representation.
    ///
    /// # Arguments
    /// * `grad` - The gradient estimate.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if `init` wasn't called, if `init` was called with the other representation, or if
    /// the lengths disagree with the ones `init` saw.
    pub fn update<S: Scalar>(&mut self, grad: &[S], params: &mut [S]) -> Result<()> {
        trace!(optimizer = self.name(), len = params.len(); "updating parameters");
        dispatch!(&mut self.rule, rule => rule.update(grad, params))
    }

    /// Updates real `params` in place from a complex gradient.
    ///
    /// Every gradient entry is first reduced to a real one by the owned rule's projection. The
    /// layout is checked before anything is projected, and the projected gradient lives in a
    /// buffer owned by the optimizer, so steady-state calls don't allocate.
    pub fn update_projected(&mut self, grad: &[Complex64], params: &mut [f64]) -> Result<()> {
        let Self {
            spec,
            rule,
            projected,
        } = self;

        dispatch!(rule, rule => {
            Layout::check_lengths::<f64>(rule.layout(), grad.len(), params.len())?;

            projected.clear();
            projected.extend(grad.iter().map(|&g| rule.project(g)));

            trace!(
                optimizer = spec.name(),
                len = params.len();
                "updating projected parameters"
            );
            rule.update(projected.as_slice(), params)
        })
    }

    /// Updates `params` in place when the representations are only known at runtime.
    ///
    /// # Returns
    /// `UnsupportedCombination` for a real gradient with complex parameters, otherwise whatever
    /// the matching typed update returns.
    pub fn update_dyn(&mut self, grad: Gradient<'_>, params: Parameters<'_>) -> Result<()> {
        match (grad, params) {
            (Gradient::Real(grad), Parameters::Real(params)) => self.update(grad, params),
            (Gradient::Complex(grad), Parameters::Real(params)) => {
                self.update_projected(grad, params)
            }
            (Gradient::Complex(grad), Parameters::Complex(params)) => self.update(grad, params),
            (Gradient::Real(_), Parameters::Complex(_)) => {
                Err(OptimizerErr::UnsupportedCombination {
                    grad: ScalarKind::Real,
                    params: ScalarKind::Complex,
                })
            }
        }
    }

    /// Clears the accumulated state of the owned rule, keeping its size.
    pub fn reset(&mut self) {
        debug!(optimizer = self.name(); "resetting optimizer state");
        dispatch!(&mut self.rule, rule => rule.reset())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_dyn_rejects_real_gradient_for_complex_parameters() {
        let pars = json!({ "Optimizer": { "Name": "Sgd", "LearningRate": 0.1 } });
        let mut optimizer = Optimizer::new(&pars).unwrap();
        let mut params = [Complex64::new(1., 1.)];
        optimizer.init(&params);

        let err = optimizer
            .update_dyn(Gradient::Real(&[1.]), Parameters::Complex(&mut params))
            .unwrap_err();

        assert!(matches!(
            err,
            OptimizerErr::UnsupportedCombination {
                grad: ScalarKind::Real,
                params: ScalarKind::Complex,
            }
        ));
        assert_eq!(params, [Complex64::new(1., 1.)]);
    }

    #[test]
    fn update_projected_uses_real_part() {
        let pars = json!({ "Optimizer": { "Name": "Sgd", "LearningRate": 0.5 } });
        let mut optimizer = Optimizer::new(&pars).unwrap();
        let mut params = [1_f64, 1.];
        optimizer.init(&params);

        let grad = [Complex64::new(0.2, 7.), Complex64::new(-0.4, -3.)];
        optimizer.update_projected(&grad, &mut params).unwrap();

        assert_eq!(params, [1. - 0.5 * 0.2, 1. + 0.5 * 0.4]);
    }

    #[test]
    fn update_projected_checks_layout_before_projecting() {
        let pars = json!({ "Optimizer": { "Name": "AdaGrad", "LearningRate": 0.1 } });
        let mut optimizer = Optimizer::new(&pars).unwrap();
        let grad = [Complex64::new(0.2, 7.); 3];
        let mut params = [1_f64; 3];

        let err = optimizer.update_projected(&grad, &mut params).unwrap_err();
        assert!(matches!(err, OptimizerErr::NotInitialized));

        optimizer.init(&params);
        let err = optimizer
            .update_projected(&grad[..2], &mut params)
            .unwrap_err();
        assert!(matches!(
            err,
            OptimizerErr::SizeMismatch {
                got: 2,
                expected: 3,
                ..
            }
        ));

        optimizer.init(&[Complex64::new(0., 0.); 3]);
        let err = optimizer.update_projected(&grad, &mut params).unwrap_err();
        assert!(matches!(err, OptimizerErr::ScalarKindMismatch { .. }));

        assert_eq!(params, [1.; 3]);
        assert_eq!(optimizer.projected.capacity(), 0);
    }

    #[test]
    fn update_projected_reuses_its_buffer() {
        let pars = json!({ "Optimizer": { "Name": "RMSProp", "LearningRate": 0.01 } });
        let mut optimizer = Optimizer::new(&pars).unwrap();
        let grad = [Complex64::new(0.5, -1.), Complex64::new(-2., 3.)];
        let mut params = [0_f64; 2];
        optimizer.init(&params);

        optimizer.update_projected(&grad, &mut params).unwrap();
        let buffer = optimizer.projected.as_ptr();

        for _ in 0..10 {
            optimizer.update_projected(&grad, &mut params).unwrap();
            assert_eq!(optimizer.projected.as_ptr(), buffer);
        }
        assert_eq!(optimizer.projected, [0.5, -2.]);
    }

    #[test]
    fn update_dyn_forwards_supported_combinations() {
        let pars = json!({ "Optimizer": { "Name": "Momentum", "LearningRate": 0.1 } });
        let mut optimizer = Optimizer::new(&pars).unwrap();

        let mut real = [1_f64];
        optimizer.init(&real);
        optimizer
            .update_dyn(Gradient::Real(&[1.]), Parameters::Real(&mut real))
            .unwrap();
        optimizer
            .update_dyn(
                Gradient::Complex(&[Complex64::new(1., 5.)]),
                Parameters::Real(&mut real),
            )
            .unwrap();
        assert!(real[0] < 1.);

        let mut complex = [Complex64::new(1., 1.)];
        optimizer.init(&complex);
        optimizer
            .update_dyn(
                Gradient::Complex(&[Complex64::new(1., 1.)]),
                Parameters::Complex(&mut complex),
            )
            .unwrap();
        assert!((complex[0] - Complex64::new(0.9, 0.9)).norm() < 1e-12);
    }
}

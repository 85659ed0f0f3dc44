//! First-order stochastic optimizers for real and complex variational parameters.
//!
//! An [`Optimizer`] is built from a configuration descriptor naming one of the supported families
//! (`Sgd`, `Momentum`, `AdaGrad`, `AdaDelta`, `AdaMax`, `AMSGrad`, `RMSProp`) and owns the
//! per-parameter state that family needs.
//!
//! ```
//! use serde_json::json;
//! use vmc_optim::Optimizer;
//!
//! let pars = json!({ "Optimizer": { "Name": "AdaGrad", "LearningRate": 0.1 } });
//! let mut optimizer = Optimizer::new(&pars)?;
//!
//! let mut params = [1.0_f64, 2.0];
//! optimizer.init(&params);
//! optimizer.update(&[0.1, 0.0], &mut params)?;
//!
//! assert!((params[0] - 0.9).abs() < 1e-5);
//! assert_eq!(params[1], 2.0);
//! # Ok::<(), vmc_optim::OptimizerErr>(())
//! ```

pub mod error;
pub mod optimization;
mod optimizer;
pub mod scalar;
pub mod specs;

pub use error::{OptimizerErr, Result};
pub use num_complex::Complex64;
pub use optimizer::Optimizer;
pub use scalar::{Gradient, Parameters, Scalar, ScalarKind};
pub use specs::{ConfigWarning, OptimizerSpec};

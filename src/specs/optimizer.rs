use serde::{Deserialize, Serialize};

use crate::error::{OptimizerErr, Result};

mod defaults {
    pub fn beta() -> f64 {
        0.9
    }

    pub fn beta1() -> f64 {
        0.9
    }

    pub fn beta2() -> f64 {
        0.999
    }

    pub fn rho() -> f64 {
        0.95
    }

    pub fn learning_rate() -> f64 {
        0.001
    }

    pub fn decay_factor() -> f64 {
        1.
    }

    pub fn ada_grad_epscut() -> f64 {
        1e-7
    }

    pub fn ada_delta_epscut() -> f64 {
        1e-6
    }

    pub fn ada_max_epscut() -> f64 {
        1e-8
    }

    pub fn ams_grad_epscut() -> f64 {
        1e-7
    }

    pub fn rms_prop_epscut() -> f64 {
        1e-6
    }
}

/// The specification for the `Sgd` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SgdSpec {
    pub learning_rate: f64,
    #[serde(default)]
    pub l2_reg: f64,
    #[serde(default = "defaults::decay_factor")]
    pub decay_factor: f64,
}

/// The specification for the `Momentum` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MomentumSpec {
    pub learning_rate: f64,
    #[serde(default = "defaults::beta")]
    pub beta: f64,
}

/// The specification for the `AdaGrad` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdaGradSpec {
    pub learning_rate: f64,
    #[serde(default = "defaults::ada_grad_epscut")]
    pub epscut: f64,
}

/// The specification for the `AdaDelta` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdaDeltaSpec {
    #[serde(default = "defaults::rho")]
    pub rho: f64,
    #[serde(default = "defaults::ada_delta_epscut")]
    pub epscut: f64,
}

impl Default for AdaDeltaSpec {
    fn default() -> Self {
        Self {
            rho: defaults::rho(),
            epscut: defaults::ada_delta_epscut(),
        }
    }
}

/// The specification for the `AdaMax` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdaMaxSpec {
    #[serde(default = "defaults::learning_rate", alias = "Alpha")]
    pub learning_rate: f64,
    #[serde(default = "defaults::beta1")]
    pub beta1: f64,
    #[serde(default = "defaults::beta2")]
    pub beta2: f64,
    #[serde(default = "defaults::ada_max_epscut")]
    pub epscut: f64,
}

impl Default for AdaMaxSpec {
    fn default() -> Self {
        Self {
            learning_rate: defaults::learning_rate(),
            beta1: defaults::beta1(),
            beta2: defaults::beta2(),
            epscut: defaults::ada_max_epscut(),
        }
    }
}

/// The specification for the `AmsGrad` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmsGradSpec {
    #[serde(default = "defaults::learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "defaults::beta1")]
    pub beta1: f64,
    #[serde(default = "defaults::beta2")]
    pub beta2: f64,
    #[serde(default = "defaults::ams_grad_epscut")]
    pub epscut: f64,
}

impl Default for AmsGradSpec {
    fn default() -> Self {
        Self {
            learning_rate: defaults::learning_rate(),
            beta1: defaults::beta1(),
            beta2: defaults::beta2(),
            epscut: defaults::ams_grad_epscut(),
        }
    }
}

/// The specification for the `RmsProp` optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RmsPropSpec {
    #[serde(default = "defaults::learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "defaults::beta")]
    pub beta: f64,
    #[serde(default = "defaults::rms_prop_epscut")]
    pub epscut: f64,
}

impl Default for RmsPropSpec {
    fn default() -> Self {
        Self {
            learning_rate: defaults::learning_rate(),
            beta: defaults::beta(),
            epscut: defaults::rms_prop_epscut(),
        }
    }
}

/// The specification for the `Optimizer` dispatcher, one variant per supported family.
///
/// Serializes to the shape of the `Optimizer` configuration section, the family name under
/// `Name` next to its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Name")]
pub enum OptimizerSpec {
    Sgd(SgdSpec),
    Momentum(MomentumSpec),
    AdaGrad(AdaGradSpec),
    AdaDelta(AdaDeltaSpec),
    AdaMax(AdaMaxSpec),
    #[serde(rename = "AMSGrad")]
    AmsGrad(AmsGradSpec),
    #[serde(rename = "RMSProp")]
    RmsProp(RmsPropSpec),
}

impl OptimizerSpec {
    /// The configuration names of every supported family.
    pub const NAMES: [&'static str; 7] = [
        "Sgd", "Momentum", "AdaGrad", "AdaDelta", "AdaMax", "AMSGrad", "RMSProp",
    ];

    /// The configuration name of this family.
    pub fn name(&self) -> &'static str {
        match self {
            OptimizerSpec::Sgd(_) => "Sgd",
            OptimizerSpec::Momentum(_) => "Momentum",
            OptimizerSpec::AdaGrad(_) => "AdaGrad",
            OptimizerSpec::AdaDelta(_) => "AdaDelta",
            OptimizerSpec::AdaMax(_) => "AdaMax",
            OptimizerSpec::AmsGrad(_) => "AMSGrad",
            OptimizerSpec::RmsProp(_) => "RMSProp",
        }
    }

    /// Checks every hyperparameter against the range its algorithm is defined for.
    ///
    /// # Returns
    /// The first invalid hyperparameter found, if any.
    pub fn validate(&self) -> Result<()> {
        match *self {
            OptimizerSpec::Sgd(SgdSpec {
                learning_rate,
                l2_reg,
                decay_factor,
            }) => {
                positive("LearningRate", learning_rate)?;
                non_negative("L2Reg", l2_reg)?;
                if !(decay_factor > 0. && decay_factor <= 1.) {
                    return Err(OptimizerErr::InvalidHyperparameter {
                        name: "DecayFactor",
                        value: decay_factor,
                        reason: "must be in (0, 1]",
                    });
                }
                Ok(())
            }
            OptimizerSpec::Momentum(MomentumSpec {
                learning_rate,
                beta,
            }) => {
                positive("LearningRate", learning_rate)?;
                decay("Beta", beta)
            }
            OptimizerSpec::AdaGrad(AdaGradSpec {
                learning_rate,
                epscut,
            }) => {
                positive("LearningRate", learning_rate)?;
                positive("Epscut", epscut)
            }
            OptimizerSpec::AdaDelta(AdaDeltaSpec { rho, epscut }) => {
                decay("Rho", rho)?;
                positive("Epscut", epscut)
            }
            OptimizerSpec::AdaMax(AdaMaxSpec {
                learning_rate,
                beta1,
                beta2,
                epscut,
            })
            | OptimizerSpec::AmsGrad(AmsGradSpec {
                learning_rate,
                beta1,
                beta2,
                epscut,
            }) => {
                positive("LearningRate", learning_rate)?;
                decay("Beta1", beta1)?;
                decay("Beta2", beta2)?;
                positive("Epscut", epscut)
            }
            OptimizerSpec::RmsProp(RmsPropSpec {
                learning_rate,
                beta,
                epscut,
            }) => {
                positive("LearningRate", learning_rate)?;
                decay("Beta", beta)?;
                positive("Epscut", epscut)
            }
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        return Ok(());
    }

    Err(OptimizerErr::InvalidHyperparameter {
        name,
        value,
        reason: "must be finite and positive",
    })
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0. {
        return Ok(());
    }

    Err(OptimizerErr::InvalidHyperparameter {
        name,
        value,
        reason: "must be finite and non-negative",
    })
}

fn decay(name: &'static str, value: f64) -> Result<()> {
    if (0. ..1.).contains(&value) {
        return Ok(());
    }

    Err(OptimizerErr::InvalidHyperparameter {
        name,
        value,
        reason: "must be in [0, 1)",
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_to_section_shape() {
        let spec = OptimizerSpec::AmsGrad(AmsGradSpec::default());
        let value = serde_json::to_value(spec).unwrap();

        assert_eq!(
            value,
            json!({
                "Name": "AMSGrad",
                "LearningRate": 0.001,
                "Beta1": 0.9,
                "Beta2": 0.999,
                "Epscut": 1e-7,
            })
        );
    }

    #[test]
    fn names_match_variants() {
        let specs = [
            OptimizerSpec::Sgd(SgdSpec {
                learning_rate: 0.1,
                l2_reg: 0.,
                decay_factor: 1.,
            }),
            OptimizerSpec::Momentum(MomentumSpec {
                learning_rate: 0.1,
                beta: 0.9,
            }),
            OptimizerSpec::AdaGrad(AdaGradSpec {
                learning_rate: 0.1,
                epscut: 1e-7,
            }),
            OptimizerSpec::AdaDelta(AdaDeltaSpec::default()),
            OptimizerSpec::AdaMax(AdaMaxSpec::default()),
            OptimizerSpec::AmsGrad(AmsGradSpec::default()),
            OptimizerSpec::RmsProp(RmsPropSpec::default()),
        ];

        for (spec, name) in specs.iter().zip(OptimizerSpec::NAMES) {
            assert_eq!(spec.name(), name);
            assert_eq!(serde_json::to_value(spec).unwrap()["Name"], name);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let spec = OptimizerSpec::RmsProp(RmsPropSpec {
            beta: 1.,
            ..Default::default()
        });
        assert!(matches!(
            spec.validate(),
            Err(OptimizerErr::InvalidHyperparameter { name: "Beta", .. })
        ));

        let spec = OptimizerSpec::AdaGrad(AdaGradSpec {
            learning_rate: -0.1,
            epscut: 1e-7,
        });
        assert!(matches!(
            spec.validate(),
            Err(OptimizerErr::InvalidHyperparameter {
                name: "LearningRate",
                ..
            })
        ));

        let spec = OptimizerSpec::AdaDelta(AdaDeltaSpec {
            epscut: 0.,
            ..Default::default()
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_epscut() {
        let specs = [
            OptimizerSpec::AdaGrad(AdaGradSpec {
                learning_rate: 0.1,
                epscut: 0.,
            }),
            OptimizerSpec::AdaDelta(AdaDeltaSpec {
                epscut: 0.,
                ..Default::default()
            }),
            OptimizerSpec::AdaMax(AdaMaxSpec {
                epscut: 0.,
                ..Default::default()
            }),
            OptimizerSpec::AmsGrad(AmsGradSpec {
                epscut: 0.,
                ..Default::default()
            }),
            OptimizerSpec::RmsProp(RmsPropSpec {
                epscut: 0.,
                ..Default::default()
            }),
        ];

        for spec in specs {
            assert!(
                matches!(
                    spec.validate(),
                    Err(OptimizerErr::InvalidHyperparameter { name: "Epscut", value, .. })
                        if value == 0.
                ),
                "{} accepted a zero Epscut",
                spec.name()
            );
        }
    }

    #[test]
    fn validate_accepts_zero_momentum() {
        let spec = OptimizerSpec::Momentum(MomentumSpec {
            learning_rate: 0.1,
            beta: 0.,
        });
        assert!(spec.validate().is_ok());
    }
}

use std::fmt::{self, Display};

use log::warn;
use serde_json::Value;

use super::OptimizerSpec;
use crate::error::{OptimizerErr, Result};

const SECTION: &str = "Optimizer";
const NAME_FIELD: &str = "Name";
const LEGACY_SECTION: &str = "Learning";
const LEGACY_NAME_FIELD: &str = "StepperType";

/// Non-fatal findings collected while resolving a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The optimizer was declared inside the `Learning` section.
    DeprecatedLearningSection,
}

impl Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::DeprecatedLearningSection => f.write_str(
                "Declaring optimizers within the Learning section is deprecated, please use the dedicated Optimizer section",
            ),
        }
    }
}

impl OptimizerSpec {
    /// Resolves the optimizer family and its hyperparameters from a configuration descriptor.
    ///
    /// The dedicated `Optimizer` section is read first, the family name under `Name`. When it's
    /// absent, the deprecated `Learning` section is read instead, the family name under
    /// `StepperType`, and a warning is logged and pushed before anything else in the section is
    /// looked at.
    ///
    /// # Arguments
    /// * `pars` - The configuration descriptor.
    /// * `warnings` - Where non-fatal findings are pushed.
    ///
    /// # Returns
    /// The validated spec, or the reason the descriptor couldn't be resolved.
    pub fn from_json(pars: &Value, warnings: &mut Vec<ConfigWarning>) -> Result<Self> {
        let (section, key, name_field) = if let Some(section) = pars.get(SECTION) {
            (section, SECTION, NAME_FIELD)
        } else if let Some(section) = pars.get(LEGACY_SECTION) {
            let warning = ConfigWarning::DeprecatedLearningSection;
            warn!("{warning}");
            warnings.push(warning);
            (section, LEGACY_SECTION, LEGACY_NAME_FIELD)
        } else {
            return Err(OptimizerErr::MissingSection);
        };

        let Some(fields) = section.as_object() else {
            return Err(invalid_config(key, "expected an object"));
        };

        let name = match fields.get(name_field) {
            Some(Value::String(name)) => name,
            Some(_) => return Err(invalid_config(key, "the optimizer name must be a string")),
            None => {
                return Err(OptimizerErr::MissingField {
                    section: key,
                    field: name_field,
                });
            }
        };

        if !Self::NAMES.contains(&name.as_str()) {
            return Err(OptimizerErr::UnknownOptimizer(name.clone()));
        }

        let mut fields = fields.clone();
        fields.remove(name_field);
        fields.insert(NAME_FIELD.to_string(), Value::String(name.clone()));

        let spec: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|source| OptimizerErr::InvalidConfig {
                section: key,
                source,
            })?;

        spec.validate()?;
        Ok(spec)
    }
}

fn invalid_config(section: &'static str, msg: &str) -> OptimizerErr {
    OptimizerErr::InvalidConfig {
        section,
        source: serde::de::Error::custom(msg),
    }
}

use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::scalar::ScalarKind;

/// The result type used in the entire optimization crate.
pub type Result<T> = std::result::Result<T, OptimizerErr>;

/// The optimization crate's error type.
#[derive(Debug)]
pub enum OptimizerErr {
    UnknownOptimizer(String),
    MissingSection,
    MissingField {
        section: &'static str,
        field: &'static str,
    },
    InvalidConfig {
        section: &'static str,
        source: serde_json::Error,
    },
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    NotInitialized,
    UnsupportedCombination {
        grad: ScalarKind,
        params: ScalarKind,
    },
    ScalarKindMismatch {
        expected: ScalarKind,
        got: ScalarKind,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
}

impl Display for OptimizerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerErr::UnknownOptimizer(name) => write!(f, "Unknown optimizer name: {name}"),
            OptimizerErr::MissingSection => f.write_str(
                "No optimizer configured, expected an `Optimizer` section (or the deprecated `Learning` section)",
            ),
            OptimizerErr::MissingField { section, field } => {
                write!(f, "Missing field `{field}` in the `{section}` section")
            }
            OptimizerErr::InvalidConfig { section, source } => {
                write!(f, "Invalid `{section}` section: {source}")
            }
            OptimizerErr::InvalidHyperparameter {
                name,
                value,
                reason,
            } => write!(f, "Invalid hyperparameter {name} = {value}: {reason}"),
            OptimizerErr::NotInitialized => {
                f.write_str("The optimizer is not initialized, call `init` before `update`")
            }
            OptimizerErr::UnsupportedCombination { grad, params } => write!(
                f,
                "Unsupported gradient/parameter type combination: {grad} gradient with {params} parameters"
            ),
            OptimizerErr::ScalarKindMismatch { expected, got } => write!(
                f,
                "The optimizer was initialized for {expected} parameters but got {got} parameters"
            ),
            OptimizerErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
        }
    }
}

impl Error for OptimizerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OptimizerErr::InvalidConfig { source, .. } => Some(source),
            _ => None,
        }
    }
}

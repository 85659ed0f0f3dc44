mod descriptor;
mod optimizer;

pub use descriptor::ConfigWarning;
pub use optimizer::{
    AdaDeltaSpec, AdaGradSpec, AdaMaxSpec, AmsGradSpec, MomentumSpec, OptimizerSpec, RmsPropSpec,
    SgdSpec,
};

mod ada_delta;
mod ada_grad;
mod ada_max;
mod ams_grad;
mod momentum;
mod optimizer;
mod rms_prop;
mod sgd;
mod state;

pub use ada_delta::AdaDelta;
pub use ada_grad::AdaGrad;
pub use ada_max::AdaMax;
pub use ams_grad::AmsGrad;
pub use momentum::Momentum;
pub use optimizer::UpdateRule;
pub use rms_prop::RmsProp;
pub use sgd::Sgd;
pub use state::{Layout, Moments};

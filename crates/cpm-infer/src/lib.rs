pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;

pub use pose::{
    detect_peaks, locate_parts, prepare_pose_input, Center, EstimatorConfig, Estimation, PartIndex,
    PartLocation, Person, TwoStageEstimator, LIMBS, LIMB_COLORS,
};

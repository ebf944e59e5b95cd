mod config;
mod crop;
mod estimator;
mod parts;
mod peaks;
mod resize;
mod types;

pub use config::{CropConfig, EstimatorConfig};
pub use crop::{gaussian_kernel, prepare_pose_input};
pub use estimator::{normalize_image, Estimation, TwoStageEstimator, PERSON_NET_FILE, POSE_NET_FILE};
pub use parts::locate_parts;
pub use peaks::detect_peaks;
pub use resize::{resize_bilinear, Sampling};
pub use types::{
    parts_to_tensor, Center, PartIndex, PartLocation, Person, PoseInput, LEEDS_PART_COUNT, LIMBS,
    LIMB_COLORS,
};

use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ShapeMismatch { expected: String, got: String },
    BackendError(String),
    ModelLoad(String),
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDtype(String),
    UnsupportedDevice(Device),
    /// More detected people than the pose network batch holds
    TooManyPeople { count: usize, max: usize },
    Tensor(cpm_base::TensorError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of {expected_names:?}"
            ),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::TooManyPeople { count, max } => write!(
                f,
                "detected {count} people, the pose batch holds fewer than {max}"
            ),
            InferError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<cpm_base::TensorError> for InferError {
    fn from(err: cpm_base::TensorError) -> Self {
        InferError::Tensor(err)
    }
}

use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Io(String),
    Decode(String),
    Encode(String),
    /// Pixel tensor is not `[H, W, 3]`
    Layout(Vec<usize>),
    Tensor(cpm_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(msg) => write!(f, "io error: {msg}"),
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Layout(shape) => write!(f, "expected [H, W, 3] pixels, got {shape:?}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => ImageError::Io(e.to_string()),
            image::ImageError::Encoding(e) => ImageError::Encode(e.to_string()),
            other => ImageError::Decode(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err.to_string())
    }
}

impl From<cpm_base::TensorError> for ImageError {
    fn from(err: cpm_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}

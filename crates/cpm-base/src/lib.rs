pub mod logging;
pub mod tensor;

pub use logging::{
    init_file_logger, init_logger, init_stdout_logger, FileLogger, LogTarget, StdoutLogger,
};
pub use tensor::{Tensor, TensorError};

// Re-export log crate so downstream crates can use cpm_base::log::*
pub use log;

use cpm_base::LogTarget;
use cpm_infer::Device;
use std::path::PathBuf;

/// Settings for one evaluation run: positional arguments plus `CPM_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    /// Directory holding `person_net.onnx` and `pose_net.onnx`
    pub model_dir: PathBuf,
    pub image_path: PathBuf,
    pub device: Device,
    pub log_target: LogTarget,
    /// Where to write the annotated image, if anywhere
    pub save_path: Option<PathBuf>,
    /// Skip the display window
    pub headless: bool,
}

impl EvalConfig {
    /// Build from the process environment
    pub fn from_env(model_dir: impl Into<PathBuf>, image_path: impl Into<PathBuf>) -> Result<Self, String> {
        Self::from_lookup(model_dir, image_path, |key| std::env::var(key).ok())
    }

    /// Build using `lookup` to resolve environment variables
    pub fn from_lookup(
        model_dir: impl Into<PathBuf>,
        image_path: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let device = match non_empty("CPM_DEVICE") {
            Some(value) => value.parse::<Device>()?,
            None => Device::Cpu,
        };
        let log_target = match non_empty("CPM_LOG_DIR") {
            Some(dir) => LogTarget::Directory(dir.into()),
            None => LogTarget::Stdout,
        };
        let headless = non_empty("CPM_HEADLESS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(false);

        Ok(Self {
            model_dir: model_dir.into(),
            image_path: image_path.into(),
            device,
            log_target,
            save_path: non_empty("CPM_SAVE_PATH").map(PathBuf::from),
            headless,
        })
    }
}

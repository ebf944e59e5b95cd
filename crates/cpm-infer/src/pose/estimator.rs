use crate::{Backend, InferError, ModelSource, Session};
use cpm_base::Tensor;
use std::collections::HashMap;
use std::path::Path;

use super::config::EstimatorConfig;
use super::crop::prepare_pose_input;
use super::parts::locate_parts;
use super::peaks::{detect_peaks, plane_dims};
use super::resize::{resize_bilinear, Sampling};
use super::types::{Center, Person};

/// File name of the person detector inside a model directory
pub const PERSON_NET_FILE: &str = "person_net.onnx";
/// File name of the pose network inside a model directory
pub const POSE_NET_FILE: &str = "pose_net.onnx";

/// Result of one two-stage run
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    /// Person centers in the person-network input frame
    pub centers: Vec<Center>,
    /// Part locations, one entry per center
    pub people: Vec<Person>,
    /// Person heatmap upsampled to the person-network input size, `[H, W]`
    pub person_heatmap: Tensor<f32>,
    /// Raw shape of the pose network output (empty when no one was found)
    pub pose_heatmap_shape: Vec<usize>,
}

/// Convolutional pose machine pipeline: person detector, then per-person pose network.
///
/// Each stage loads its model, runs one forward pass and drops the session
/// before the next stage starts.
pub struct TwoStageEstimator {
    backend: Box<dyn Backend>,
    person_model: ModelSource,
    pose_model: ModelSource,
    config: EstimatorConfig,
}

impl TwoStageEstimator {
    /// Create an estimator with the default configuration
    pub fn new(person_model: ModelSource, pose_model: ModelSource, backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            person_model,
            pose_model,
            config: EstimatorConfig::default(),
        }
    }

    /// Use `person_net.onnx` and `pose_net.onnx` from `dir`
    pub fn from_model_dir(dir: impl AsRef<Path>, backend: Box<dyn Backend>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            ModelSource::File(dir.join(PERSON_NET_FILE)),
            ModelSource::File(dir.join(POSE_NET_FILE)),
            backend,
        )
    }

    /// Replace the configuration (builder pattern)
    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Run both stages on an RGB image already resized to the person-network size.
    ///
    /// # Arguments
    /// * `pixels` - `[H, W, 3]` u8 image where (H, W) is `config.person_size()`
    ///
    /// Finding nobody is not an error: the pose stage is skipped and `people` is empty.
    pub fn estimate(&self, pixels: &Tensor<u8>) -> Result<Estimation, InferError> {
        let (ph, pw) = self.config.person_size();
        if pixels.shape != [ph, pw, 3] {
            return Err(InferError::ShapeMismatch {
                expected: format!("[{ph}, {pw}, 3]"),
                got: format!("{:?}", pixels.shape),
            });
        }

        let image = normalize_image(pixels);
        let person_heatmap = self.run_person_stage(&image)?;

        let centers = detect_peaks(&person_heatmap)?;
        log::info!("detected {} people at {:?}", centers.len(), centers);
        if centers.is_empty() {
            log::warn!("no person found, skipping the pose network");
            return Ok(Estimation {
                centers,
                people: Vec::new(),
                person_heatmap,
                pose_heatmap_shape: Vec::new(),
            });
        }

        let heatmaps = self.run_pose_stage(&image, &centers)?;
        log::info!("pose heatmaps {:?}", heatmaps.shape);

        let people = locate_parts(
            &heatmaps,
            &centers,
            self.config.crop().size,
            self.config.num_parts(),
        )?;

        Ok(Estimation {
            centers,
            people,
            person_heatmap,
            pose_heatmap_shape: heatmaps.shape,
        })
    }

    /// Person network on the whole image; returns the heatmap at input resolution
    fn run_person_stage(&self, image: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        let (ph, pw) = self.config.person_size();
        let batch = image.clone().reshape(vec![1, ph, pw, 3])?;

        let raw = {
            log::debug!("[{}] loading person model {}", self.backend.name(), self.person_model);
            let mut session = self.backend.load_model(&self.person_model)?;
            let input = resolve_input(&*session, self.config.person_input(), 0)?;
            let outputs = session.run(&[(input.as_str(), batch)])?;
            take_output(outputs, &*session, self.config.person_output())?
        };
        log::debug!("person heatmap {:?}", raw.shape);

        let (h, w) = plane_dims(&raw)?;
        let data = resize_bilinear(&raw.data, h, w, 1, ph, pw, Sampling::Corner);
        Ok(Tensor::new(vec![ph, pw], data)?)
    }

    /// Pose network on per-person crops; returns the raw `[N, h, w, P]` heatmaps
    fn run_pose_stage(&self, image: &Tensor<f32>, centers: &[Center]) -> Result<Tensor<f32>, InferError> {
        let input = prepare_pose_input(image, centers, self.config.crop())?;

        log::debug!("[{}] loading pose model {}", self.backend.name(), self.pose_model);
        let mut session = self.backend.load_model(&self.pose_model)?;
        let image_name = resolve_input(&*session, self.config.pose_image_input(), 0)?;
        let center_map_name = resolve_input(&*session, self.config.pose_center_map_input(), 1)?;
        let outputs = session.run(&[
            (image_name.as_str(), input.images),
            (center_map_name.as_str(), input.center_maps),
        ])?;
        take_output(outputs, &*session, self.config.pose_output())
    }
}

/// Map u8 RGB to `v / 255 - 0.5`
pub fn normalize_image(pixels: &Tensor<u8>) -> Tensor<f32> {
    pixels.map(|&v| v as f32 / 255.0 - 0.5)
}

fn resolve_input(
    session: &dyn Session,
    configured: Option<&str>,
    position: usize,
) -> Result<String, InferError> {
    let declared = session.input_names();
    match configured {
        Some(name) if declared.iter().any(|n| n == name) => Ok(name.to_string()),
        Some(name) => Err(InferError::InvalidInput {
            name: name.to_string(),
            expected_names: declared.to_vec(),
        }),
        None => declared.get(position).cloned().ok_or_else(|| {
            InferError::BackendError(format!(
                "model declares {} inputs, input #{} is required",
                declared.len(),
                position
            ))
        }),
    }
}

fn take_output(
    mut outputs: HashMap<String, Tensor<f32>>,
    session: &dyn Session,
    configured: Option<&str>,
) -> Result<Tensor<f32>, InferError> {
    let name = match configured {
        Some(name) => name.to_string(),
        None => session
            .output_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::BackendError("model has no outputs".to_string()))?,
    };
    outputs
        .remove(&name)
        .ok_or_else(|| InferError::BackendError(format!("model produced no output '{name}'")))
}

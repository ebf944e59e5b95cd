use super::types::LEEDS_PART_COUNT;

/// Settings for building pose-network input batches.
#[derive(Clone, Debug, PartialEq)]
pub struct CropConfig {
    /// (height, width) of each person crop
    pub size: (usize, usize),
    /// Gaussian center map sigma, in pixels
    pub sigma: f32,
    /// Batch capacity; the number of people must stay below it
    pub max_people: usize,
    /// Total zero padding per axis, split evenly between both sides
    pub border: usize,
    /// Emit `max_people` slots instead of one per person
    pub pad_batch: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            size: (376, 376),
            sigma: 25.0,
            max_people: 16,
            border: 400,
            pad_batch: true,
        }
    }
}

/// Configuration for [`TwoStageEstimator`](super::TwoStageEstimator).
///
/// Defaults match the CPM person/pose networks trained on MPI and LEEDS.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatorConfig {
    person_size: (usize, usize),
    crop: CropConfig,
    num_parts: usize,
    person_input: Option<String>,
    person_output: Option<String>,
    pose_image_input: Option<String>,
    pose_center_map_input: Option<String>,
    pose_output: Option<String>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            person_size: (376, 656),
            crop: CropConfig::default(),
            num_parts: LEEDS_PART_COUNT,
            person_input: None,
            person_output: None,
            pose_image_input: None,
            pose_center_map_input: None,
            pose_output: None,
        }
    }
}

impl EstimatorConfig {
    /// Set the (height, width) the person network expects.
    pub fn with_person_size(mut self, height: usize, width: usize) -> Self {
        self.person_size = (height, width);
        self
    }

    /// Set the (height, width) of each person crop fed to the pose network.
    pub fn with_crop_size(mut self, height: usize, width: usize) -> Self {
        self.crop.size = (height, width);
        self
    }

    /// Set the Gaussian center map sigma.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.crop.sigma = sigma;
        self
    }

    /// Set the pose network batch size.
    pub fn with_max_people(mut self, max_people: usize) -> Self {
        self.crop.max_people = max_people;
        self
    }

    /// Set the total zero padding per axis around the image before cropping.
    pub fn with_border(mut self, border: usize) -> Self {
        self.crop.border = border;
        self
    }

    /// Pad the pose batch to `max_people` slots (fixed-batch models) or not.
    pub fn with_pad_batch(mut self, pad_batch: bool) -> Self {
        self.crop.pad_batch = pad_batch;
        self
    }

    /// Set how many leading heatmap channels are body parts.
    pub fn with_num_parts(mut self, num_parts: usize) -> Self {
        self.num_parts = num_parts;
        self
    }

    /// Name the person network's image input (default: its first input).
    pub fn with_person_input(mut self, name: impl Into<String>) -> Self {
        self.person_input = Some(name.into());
        self
    }

    /// Name the person network's heatmap output (default: its first output).
    pub fn with_person_output(mut self, name: impl Into<String>) -> Self {
        self.person_output = Some(name.into());
        self
    }

    /// Name the pose network's image and center map inputs
    /// (default: its first and second inputs).
    pub fn with_pose_inputs(
        mut self,
        image: impl Into<String>,
        center_map: impl Into<String>,
    ) -> Self {
        self.pose_image_input = Some(image.into());
        self.pose_center_map_input = Some(center_map.into());
        self
    }

    /// Name the pose network's heatmap output (default: its first output).
    pub fn with_pose_output(mut self, name: impl Into<String>) -> Self {
        self.pose_output = Some(name.into());
        self
    }

    // Getters
    pub fn person_size(&self) -> (usize, usize) {
        self.person_size
    }

    pub fn crop(&self) -> &CropConfig {
        &self.crop
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    pub fn person_input(&self) -> Option<&str> {
        self.person_input.as_deref()
    }

    pub fn person_output(&self) -> Option<&str> {
        self.person_output.as_deref()
    }

    pub fn pose_image_input(&self) -> Option<&str> {
        self.pose_image_input.as_deref()
    }

    pub fn pose_center_map_input(&self) -> Option<&str> {
        self.pose_center_map_input.as_deref()
    }

    pub fn pose_output(&self) -> Option<&str> {
        self.pose_output.as_deref()
    }
}

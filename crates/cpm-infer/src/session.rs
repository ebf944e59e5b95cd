use crate::InferError;
use cpm_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to run forward passes.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    /// Input names in the model's declared order
    fn input_names(&self) -> &[String];
    /// Output names in the model's declared order
    fn output_names(&self) -> &[String];
}

use crate::{Backend, Device, InferError, ModelSource, Session};
use cpm_base::Tensor;
use ndarray::ArrayD;
use ort::session::Session as OrtSession;
use std::collections::HashMap;

/// ONNX Runtime backend bound to one execution device.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: &ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::BackendError(format!("failed to create session builder: {}", e))
        })?;

        builder = match device {
            Device::Cpu => {
                log::debug!("[onnx] Using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!(
                    "[onnx] CUDA EP requested (device_id={}), available: {}",
                    device_id,
                    available
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {}", path.display(), e))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();
        log::debug!("[onnx] loaded {model}: inputs {input_names:?}, outputs {output_names:?}");

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let mut values = Vec::with_capacity(inputs.len());
        for (name, tensor) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
            let array = tensor_to_ndarray(tensor.clone())?;
            let value = ort::value::Tensor::from_array(array).map_err(|e| {
                InferError::BackendError(format!("failed to create input '{}': {}", name, e))
            })?;
            values.push((*name, value));
        }

        let outputs = self
            .session
            .run(values)
            .map_err(|e| InferError::BackendError(format!("inference failed: {}", e)))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::UnsupportedDtype(format!(
                        "output '{}' is not f32: {}",
                        output_name, e
                    ))
                })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data).map_err(|e| {
        InferError::BackendError(format!("failed to create ndarray from tensor: {}", e))
    })
}

pub fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    // iter() walks in logical order regardless of the view's memory layout
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_ndarray_conversion_keeps_layout() {
        let tensor = Tensor::new(vec![2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let array = tensor_to_ndarray(tensor.clone()).unwrap();
        assert_eq!(array[[1, 0]], 3.0);

        let back = ndarray_to_tensor(array.view()).unwrap();
        assert_eq!(back, tensor);
    }

    #[test]
    fn test_ndarray_to_tensor_transposed_view() {
        let tensor = Tensor::new(vec![2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let array = tensor_to_ndarray(tensor).unwrap();
        let transposed = array.t();

        let result = ndarray_to_tensor(transposed.view()).unwrap();
        assert_eq!(result.shape, vec![3, 2]);
        assert_eq!(result.data, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_garbage_model_bytes_are_rejected() {
        let backend = OnnxBackend::new(Device::Cpu);
        assert_eq!(backend.name(), "onnx");
        let result = backend.load_model(&ModelSource::Memory(b"not an onnx graph".to_vec()));
        assert!(matches!(result, Err(InferError::ModelLoad(_)) | Err(InferError::BackendError(_))));
    }

    #[test]
    fn test_missing_model_file_is_model_load_error() {
        let backend = OnnxBackend::new(Device::Cpu);
        let result = backend.load_model(&ModelSource::File("/nonexistent/person_net.onnx".into()));
        assert!(matches!(result, Err(InferError::ModelLoad(_)) | Err(InferError::BackendError(_))));
    }
}

use cpm_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.len(), 6);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch { expected: 6, got: 3 }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<f32>::zeros(vec![2, 3]).unwrap();
    assert_eq!(tensor.data, vec![0.0; 6]);
}

#[test]
fn test_tensor_is_empty() {
    assert!(Tensor::<f32>::new(vec![0], vec![]).unwrap().is_empty());
    assert!(!Tensor::new(vec![2], vec![1.0, 2.0]).unwrap().is_empty());
}

#[test]
fn test_tensor_strides_row_major() {
    let tensor = Tensor::<u8>::zeros(vec![4, 3, 2]).unwrap();
    assert_eq!(tensor.strides(), vec![6, 2, 1]);
}

#[test]
fn test_tensor_get_and_get_mut() {
    let mut tensor = Tensor::new(vec![2, 3], (0..6).collect::<Vec<i32>>()).unwrap();
    assert_eq!(tensor.get(&[1, 2]), Some(&5));
    assert_eq!(tensor.get(&[0, 1]), Some(&1));

    *tensor.get_mut(&[1, 0]).unwrap() = 40;
    assert_eq!(tensor.data[3], 40);
}

#[test]
fn test_tensor_get_out_of_range() {
    let tensor = Tensor::new(vec![2, 3], vec![0u8; 6]).unwrap();
    assert_eq!(tensor.get(&[2, 0]), None);
    assert_eq!(tensor.get(&[0, 3]), None);
    assert_eq!(tensor.get(&[0]), None);
}

#[test]
fn test_tensor_reshape_checks_count() {
    let tensor = Tensor::new(vec![2, 3], vec![0.0f32; 6]).unwrap();
    assert_eq!(tensor.clone().reshape(vec![3, 2]).unwrap().shape, vec![3, 2]);
    assert!(tensor.reshape(vec![4, 2]).is_err());
}

#[test]
fn test_tensor_map_keeps_shape() {
    let tensor = Tensor::new(vec![1, 3], vec![0u8, 128, 255]).unwrap();
    let mapped = tensor.map(|&v| v as f32 / 255.0);
    assert_eq!(mapped.shape, vec![1, 3]);
    assert_eq!(mapped.data[0], 0.0);
    assert_eq!(mapped.data[2], 1.0);
}

#[test]
fn test_tensor_debug_truncates_data() {
    let tensor = Tensor::new(vec![100], vec![0.0f32; 100]).unwrap();
    let debug_str = format!("{:?}", tensor);
    assert!(debug_str.contains("shape"));
    assert!(debug_str.contains("len: 100"));
}

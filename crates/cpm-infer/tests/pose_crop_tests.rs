use cpm_base::Tensor;
use cpm_infer::pose::{gaussian_kernel, prepare_pose_input, Center, CropConfig};
use cpm_infer::InferError;

/// `[h, w, 3]` image where pixel (y, x) holds (y, x, 1.0)
fn coordinate_image(h: usize, w: usize) -> Tensor<f32> {
    let mut data = Vec::with_capacity(h * w * 3);
    for y in 0..h {
        for x in 0..w {
            data.extend([y as f32, x as f32, 1.0]);
        }
    }
    Tensor::new(vec![h, w, 3], data).unwrap()
}

fn small_config() -> CropConfig {
    CropConfig {
        size: (8, 10),
        sigma: 3.0,
        max_people: 4,
        border: 12,
        pad_batch: true,
    }
}

fn pixel(t: &Tensor<f32>, slot: usize, y: usize, x: usize) -> [f32; 3] {
    let i = t.offset(&[slot, y, x, 0]).unwrap();
    [t.data[i], t.data[i + 1], t.data[i + 2]]
}

#[test]
fn test_gaussian_kernel_peaks_at_center() {
    let kernel = gaussian_kernel(376, 376, 25.0, 25.0);
    assert_eq!(kernel.shape, vec![376, 376]);
    assert_eq!(kernel.get(&[188, 188]), Some(&1.0));

    let max = kernel.data.iter().cloned().fold(f32::MIN, f32::max);
    assert_eq!(max, 1.0);
}

#[test]
fn test_gaussian_kernel_falls_off_by_sigma() {
    let kernel = gaussian_kernel(40, 60, 5.0, 10.0);
    let at_sigma_y = *kernel.get(&[20 + 5, 30]).unwrap();
    let at_sigma_x = *kernel.get(&[20, 30 + 10]).unwrap();
    assert!((at_sigma_y - (-1.0f32).exp()).abs() < 1e-6);
    assert!((at_sigma_x - (-1.0f32).exp()).abs() < 1e-6);
    // symmetric around the peak
    assert_eq!(kernel.get(&[15, 30]), kernel.get(&[25, 30]));
}

#[test]
fn test_gaussian_kernel_odd_size_peak_index() {
    let kernel = gaussian_kernel(5, 5, 1.0, 1.0);
    assert_eq!(kernel.get(&[3, 3]), Some(&1.0));
}

#[test]
fn test_center_maps_identical_across_people() {
    let image = coordinate_image(20, 30);
    let centers = [Center::new(5, 6), Center::new(14, 22), Center::new(10, 15)];
    let config = small_config();

    let input = prepare_pose_input(&image, &centers, &config).unwrap();

    let kernel = gaussian_kernel(8, 10, 3.0, 3.0);
    let slot_len = 8 * 10;
    for slot in 0..centers.len() {
        assert_eq!(
            &input.center_maps.data[slot * slot_len..(slot + 1) * slot_len],
            kernel.data.as_slice()
        );
    }
    // the map peaks at the crop center
    assert_eq!(input.center_maps.get(&[1, 4, 5, 0]), Some(&1.0));
}

#[test]
fn test_batch_padded_to_capacity_with_zeros() {
    let image = coordinate_image(20, 30);
    let input = prepare_pose_input(&image, &[Center::new(10, 15)], &small_config()).unwrap();

    assert_eq!(input.people, 1);
    assert_eq!(input.images.shape, vec![4, 8, 10, 3]);
    assert_eq!(input.center_maps.shape, vec![4, 8, 10, 1]);

    let slot_len = 8 * 10;
    assert!(input.center_maps.data[slot_len..].iter().all(|&v| v == 0.0));
    assert!(input.images.data[slot_len * 3..].iter().all(|&v| v == 0.0));
}

#[test]
fn test_unpadded_batch_has_one_slot_per_person() {
    let image = coordinate_image(20, 30);
    let config = CropConfig {
        pad_batch: false,
        ..small_config()
    };
    let input = prepare_pose_input(&image, &[Center::new(10, 15), Center::new(3, 3)], &config).unwrap();
    assert_eq!(input.images.shape, vec![2, 8, 10, 3]);
    assert_eq!(input.center_maps.shape, vec![2, 8, 10, 1]);
}

#[test]
fn test_crop_is_centered_on_person() {
    let image = coordinate_image(20, 30);
    let input = prepare_pose_input(&image, &[Center::new(10, 15)], &small_config()).unwrap();

    // crop center (4, 5) is the person's pixel
    assert_eq!(pixel(&input.images, 0, 4, 5), [10.0, 15.0, 1.0]);
    // crop origin is center - half size
    assert_eq!(pixel(&input.images, 0, 0, 0), [6.0, 10.0, 1.0]);
    assert_eq!(pixel(&input.images, 0, 7, 9), [13.0, 19.0, 1.0]);
}

#[test]
fn test_crop_near_edge_reads_zero_padding() {
    let image = coordinate_image(20, 30);
    let input = prepare_pose_input(&image, &[Center::new(1, 2)], &small_config()).unwrap();

    // rows/cols before the image are padding
    assert_eq!(pixel(&input.images, 0, 0, 0), [0.0, 0.0, 0.0]);
    assert_eq!(pixel(&input.images, 0, 2, 2), [0.0, 0.0, 0.0]);
    // crop (3, 3) -> image (0, 0)
    assert_eq!(pixel(&input.images, 0, 3, 3), [0.0, 0.0, 1.0]);
    assert_eq!(pixel(&input.images, 0, 4, 5), [1.0, 2.0, 1.0]);
}

#[test]
fn test_crop_past_padded_canvas_is_zero_filled() {
    let image = coordinate_image(20, 30);
    // no border at all: the crop sticks out of the image on the right/bottom
    let config = CropConfig {
        border: 0,
        ..small_config()
    };
    let input = prepare_pose_input(&image, &[Center::new(19, 29)], &config).unwrap();

    assert_eq!(pixel(&input.images, 0, 4, 5), [19.0, 29.0, 1.0]);
    assert_eq!(pixel(&input.images, 0, 5, 6), [0.0, 0.0, 0.0]);
    assert_eq!(pixel(&input.images, 0, 7, 9), [0.0, 0.0, 0.0]);
}

#[test]
fn test_too_many_people_is_rejected() {
    let image = coordinate_image(20, 30);
    let centers = [Center::new(1, 1), Center::new(2, 2), Center::new(3, 3), Center::new(4, 4)];

    let result = prepare_pose_input(&image, &centers, &small_config());
    assert!(matches!(
        result,
        Err(InferError::TooManyPeople { count: 4, max: 4 })
    ));

    // one below capacity fits
    assert!(prepare_pose_input(&image, &centers[..3], &small_config()).is_ok());
}

#[test]
fn test_non_rgb_image_is_rejected() {
    let image = Tensor::new(vec![4, 4, 1], vec![0.0; 16]).unwrap();
    let result = prepare_pose_input(&image, &[], &small_config());
    assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
}

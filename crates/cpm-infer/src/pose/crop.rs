use crate::InferError;
use cpm_base::Tensor;

use super::config::CropConfig;
use super::types::{Center, PoseInput};

/// Separable Gaussian over an `h` x `w` grid, 1.0 at index `((h+1)/2, (w+1)/2)`.
///
/// Offsets run from `-ceil(h/2)` upward, so for even sizes the peak sits at
/// the exact center `(h/2, w/2)`. Note the exponent is `d²/σ²`, not `d²/2σ²`.
pub fn gaussian_kernel(h: usize, w: usize, sigma_h: f32, sigma_w: f32) -> Tensor<f32> {
    let start_y = -(h.div_ceil(2) as f32);
    let start_x = -(w.div_ceil(2) as f32);
    let col_terms: Vec<f32> = (0..w)
        .map(|x| {
            let d = start_x + x as f32;
            d * d / (sigma_w * sigma_w)
        })
        .collect();

    let mut data = Vec::with_capacity(h * w);
    for y in 0..h {
        let d = start_y + y as f32;
        let row_term = d * d / (sigma_h * sigma_h);
        data.extend(col_terms.iter().map(|c| (-row_term - c).exp()));
    }

    Tensor {
        shape: vec![h, w],
        data,
    }
}

/// Build the pose network's batched inputs from a normalized image and centers.
///
/// `image` is `[H, W, 3]`. Each person gets a crop of `config.size` centered on
/// its center, taken from the image surrounded by `config.border / 2` zero
/// pixels per side, plus the same Gaussian center map. Pixels past the padded
/// canvas are zero as well, with a warning.
///
/// Fails with [`InferError::TooManyPeople`] when `centers.len() >= config.max_people`.
pub fn prepare_pose_input(
    image: &Tensor<f32>,
    centers: &[Center],
    config: &CropConfig,
) -> Result<PoseInput, InferError> {
    if image.shape.len() != 3 || image.shape[2] != 3 {
        return Err(InferError::ShapeMismatch {
            expected: "[H, W, 3]".to_string(),
            got: format!("{:?}", image.shape),
        });
    }
    if centers.len() >= config.max_people {
        return Err(InferError::TooManyPeople {
            count: centers.len(),
            max: config.max_people,
        });
    }

    let (img_h, img_w) = (image.shape[0] as isize, image.shape[1] as isize);
    let (crop_h, crop_w) = config.size;
    let (half_h, half_w) = ((crop_h / 2) as isize, (crop_w / 2) as isize);
    let pad = (config.border / 2) as isize;
    // padded canvas in source coordinates: [-pad, len + border - pad)
    let far_y = img_h + config.border as isize - pad;
    let far_x = img_w + config.border as isize - pad;

    let slots = if config.pad_batch {
        config.max_people
    } else {
        centers.len()
    };
    let crop_len = crop_h * crop_w;
    let mut images = Tensor::<f32>::zeros(vec![slots, crop_h, crop_w, 3])?;
    let mut center_maps = Tensor::<f32>::zeros(vec![slots, crop_h, crop_w, 1])?;
    let kernel = gaussian_kernel(crop_h, crop_w, config.sigma, config.sigma);

    for (slot, center) in centers.iter().enumerate() {
        let top = center.row as isize - half_h;
        let left = center.col as isize - half_w;
        let outside = top < -pad
            || left < -pad
            || top + crop_h as isize > far_y
            || left + crop_w as isize > far_x;
        if outside {
            log::warn!(
                "crop around {:?} leaves the padded image (border {}), zero-filling",
                center,
                config.border
            );
        }

        let slot_pixels = &mut images.data[slot * crop_len * 3..(slot + 1) * crop_len * 3];
        for cy in 0..crop_h {
            let sy = top + cy as isize;
            if sy < 0 || sy >= img_h {
                continue;
            }
            // copy the in-image run of this crop row in one go
            let x_from = (-left).clamp(0, crop_w as isize) as usize;
            let x_to = (img_w - left).clamp(0, crop_w as isize) as usize;
            if x_from >= x_to {
                continue;
            }
            let src_x = (left + x_from as isize) as usize;
            let src = (sy as usize * img_w as usize + src_x) * 3;
            let dst = (cy * crop_w + x_from) * 3;
            let run = (x_to - x_from) * 3;
            slot_pixels[dst..dst + run].copy_from_slice(&image.data[src..src + run]);
        }

        center_maps.data[slot * crop_len..(slot + 1) * crop_len].copy_from_slice(&kernel.data);
    }

    log::debug!(
        "pose input: {} people, images {:?}, center maps {:?}",
        centers.len(),
        images.shape,
        center_maps.shape
    );

    Ok(PoseInput {
        images,
        center_maps,
        people: centers.len(),
    })
}

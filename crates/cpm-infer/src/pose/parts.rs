use crate::InferError;
use cpm_base::Tensor;

use super::resize::{resize_bilinear, Sampling};
use super::types::{Center, PartLocation, Person};

/// Locate body parts for each person from the pose network's heatmaps.
///
/// `heatmaps` is `[N, h, w, P]` with one slot per center (extra padded slots
/// are ignored) and at least `num_parts` channels. Each slot is clipped to
/// [-1, 1], resized to `size` and searched for the first maximum per part.
/// The location is then shifted by `center - size / 2` into image coordinates.
pub fn locate_parts(
    heatmaps: &Tensor<f32>,
    centers: &[Center],
    size: (usize, usize),
    num_parts: usize,
) -> Result<Vec<Person>, InferError> {
    if heatmaps.shape.len() != 4 {
        return Err(InferError::ShapeMismatch {
            expected: "[N, H, W, P]".to_string(),
            got: format!("{:?}", heatmaps.shape),
        });
    }
    let [slots, h, w, channels] = [
        heatmaps.shape[0],
        heatmaps.shape[1],
        heatmaps.shape[2],
        heatmaps.shape[3],
    ];
    if slots < centers.len() {
        return Err(InferError::ShapeMismatch {
            expected: format!("at least {} heatmap slots", centers.len()),
            got: format!("{:?}", heatmaps.shape),
        });
    }
    if channels < num_parts {
        return Err(InferError::ShapeMismatch {
            expected: format!("at least {} part channels", num_parts),
            got: format!("{:?}", heatmaps.shape),
        });
    }

    let (out_h, out_w) = size;
    if out_h == 0 || out_w == 0 || h == 0 || w == 0 {
        return Err(InferError::ShapeMismatch {
            expected: format!("non-empty heatmaps and target size, target {out_h}x{out_w}"),
            got: format!("{:?}", heatmaps.shape),
        });
    }
    let (half_h, half_w) = ((out_h / 2) as i32, (out_w / 2) as i32);
    let slot_len = h * w * channels;

    let mut people = Vec::with_capacity(centers.len());
    for (slot, center) in centers.iter().enumerate() {
        let clipped: Vec<f32> = heatmaps.data[slot * slot_len..(slot + 1) * slot_len]
            .iter()
            .map(|v| v.clamp(-1.0, 1.0))
            .collect();
        let resized = resize_bilinear(&clipped, h, w, channels, out_h, out_w, Sampling::HalfPixel);

        let parts = (0..num_parts)
            .map(|part| {
                let (y, x) = argmax_channel(&resized, out_w, channels, part);
                PartLocation {
                    row: y as i32 + center.row as i32 - half_h,
                    col: x as i32 + center.col as i32 - half_w,
                }
            })
            .collect();

        people.push(Person {
            center: *center,
            parts,
        });
    }

    Ok(people)
}

/// Row-major first (y, x) of the maximum of one channel in an HWC buffer
fn argmax_channel(data: &[f32], width: usize, channels: usize, channel: usize) -> (usize, usize) {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in data.iter().skip(channel).step_by(channels).enumerate() {
        // strict comparison keeps the first maximum
        if v > best_value {
            best_value = v;
            best = i;
        }
    }
    (best / width, best % width)
}

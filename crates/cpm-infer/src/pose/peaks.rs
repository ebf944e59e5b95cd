use crate::InferError;
use cpm_base::Tensor;

use super::types::Center;

/// Heatmap values are scaled by this before thresholding
const HEATMAP_SCALE: f32 = 256.0;
/// Minimum (local max - local min) in scaled units for a peak to survive
const PEAK_MARGIN: f32 = 0.3;

/// Find person centers in a single-channel heatmap.
///
/// A pixel is a peak when it equals the maximum of its 3x3 neighbourhood and
/// that neighbourhood's max - min exceeds the margin (after scaling by 256).
/// Neighbourhoods at the border reflect the edge row/column. Surviving pixels
/// are grouped into 4-connected components; each component yields the
/// midpoint of its bounding box.
///
/// Components are returned in raster order of their first pixel. The heatmap
/// may be `[h, w]` or carry singleton dimensions (`[1, h, w, 1]`, ...).
pub fn detect_peaks(heatmap: &Tensor<f32>) -> Result<Vec<Center>, InferError> {
    let (h, w) = plane_dims(heatmap)?;
    if h == 0 || w == 0 {
        return Ok(Vec::new());
    }
    let data = &heatmap.data;

    let mut mask = vec![false; h * w];
    for y in 0..h {
        for x in 0..w {
            let value = data[y * w + x] * HEATMAP_SCALE;
            let (lo, hi) = window_min_max(data, h, w, y, x);
            let (lo, hi) = (lo * HEATMAP_SCALE, hi * HEATMAP_SCALE);
            mask[y * w + x] = value == hi && hi - lo > PEAK_MARGIN;
        }
    }

    Ok(label_components(&mask, h, w)
        .into_iter()
        .map(|b| Center::new((b.top + b.bottom) / 2, (b.left + b.right) / 2))
        .collect())
}

/// Height and width of a heatmap that is `[h, w]` once unit batch and channel axes are dropped.
///
/// Trailing unit axes go first, so `[h, 1, 1]` reads as an `h` x 1 column.
pub(crate) fn plane_dims(heatmap: &Tensor<f32>) -> Result<(usize, usize), InferError> {
    let mut dims = heatmap.shape.as_slice();
    while let [rest @ .., 1] = dims {
        if rest.len() < 2 {
            break;
        }
        dims = rest;
    }
    while let [1, rest @ ..] = dims {
        if rest.len() < 2 {
            break;
        }
        dims = rest;
    }
    match dims {
        [h, w] => Ok((*h, *w)),
        _ => Err(InferError::ShapeMismatch {
            expected: "single-channel [H, W] heatmap".to_string(),
            got: format!("{:?}", heatmap.shape),
        }),
    }
}

/// Min and max over the 3x3 window around (y, x).
///
/// Out-of-range neighbours mirror back onto the edge pixel, which for a
/// radius-1 window is the same as clamping the index.
fn window_min_max(data: &[f32], h: usize, w: usize, y: usize, x: usize) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for ny in [y.saturating_sub(1), y, (y + 1).min(h - 1)] {
        for nx in [x.saturating_sub(1), x, (x + 1).min(w - 1)] {
            let v = data[ny * w + nx];
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo, hi)
}

/// Inclusive bounding box of one connected component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

/// 4-connected component bounding boxes, in raster order of first pixel
pub(crate) fn label_components(mask: &[bool], h: usize, w: usize) -> Vec<Bounds> {
    let mut visited = vec![false; h * w];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..h * w {
        if !mask[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut bounds = Bounds {
            top: start / w,
            left: start % w,
            bottom: start / w,
            right: start % w,
        };

        while let Some(idx) = stack.pop() {
            let (y, x) = (idx / w, idx % w);
            bounds.top = bounds.top.min(y);
            bounds.bottom = bounds.bottom.max(y);
            bounds.left = bounds.left.min(x);
            bounds.right = bounds.right.max(x);

            let mut visit = |n: usize| {
                if mask[n] && !visited[n] {
                    visited[n] = true;
                    stack.push(n);
                }
            };
            if y > 0 {
                visit(idx - w);
            }
            if y + 1 < h {
                visit(idx + w);
            }
            if x > 0 {
                visit(idx - 1);
            }
            if x + 1 < w {
                visit(idx + 1);
            }
        }

        components.push(bounds);
    }

    components
}

/// How output pixels map back onto the source grid during bilinear resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// `src = dst * scale`, neighbours clamped at the far edge.
    /// Matches the legacy TensorFlow `resize_bilinear` used after the person network.
    Corner,
    /// `src = (dst + 0.5) * scale - 0.5`, out-of-range neighbours mirrored
    /// (`c b | a b c | b a`). Pixel centers line up at both edges.
    HalfPixel,
}

/// Bilinear resize of an HWC map with `channels` interleaved channels.
///
/// Returns `out_h * out_w * channels` values in HWC order.
pub fn resize_bilinear(
    src: &[f32],
    height: usize,
    width: usize,
    channels: usize,
    out_h: usize,
    out_w: usize,
    sampling: Sampling,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), height * width * channels);
    let mut out = vec![0.0; out_h * out_w * channels];
    if height == 0 || width == 0 || channels == 0 {
        return out;
    }

    // per-axis taps are the same for every row/column, compute them once
    let rows = axis_taps(height, out_h, sampling);
    let cols = axis_taps(width, out_w, sampling);

    for (oy, &(y0, y1, fy)) in rows.iter().enumerate() {
        for (ox, &(x0, x1, fx)) in cols.iter().enumerate() {
            let dst = (oy * out_w + ox) * channels;
            for c in 0..channels {
                let at = |y: usize, x: usize| src[(y * width + x) * channels + c];
                let top = at(y0, x0) * (1.0 - fx) + at(y0, x1) * fx;
                let bottom = at(y1, x0) * (1.0 - fx) + at(y1, x1) * fx;
                out[dst + c] = top * (1.0 - fy) + bottom * fy;
            }
        }
    }

    out
}

/// (lower index, upper index, weight of upper) for each output coordinate
fn axis_taps(len: usize, out_len: usize, sampling: Sampling) -> Vec<(usize, usize, f32)> {
    let scale = len as f32 / out_len.max(1) as f32;
    (0..out_len)
        .map(|o| match sampling {
            Sampling::Corner => {
                let pos = o as f32 * scale;
                let i0 = (pos.floor() as usize).min(len - 1);
                let i1 = (i0 + 1).min(len - 1);
                (i0, i1, pos - i0 as f32)
            }
            Sampling::HalfPixel => {
                let pos = (o as f32 + 0.5) * scale - 0.5;
                let base = pos.floor();
                let frac = pos - base;
                let base = base as isize;
                (mirror(base, len), mirror(base + 1, len), frac)
            }
        })
        .collect()
}

/// Mirror an index into `[0, len)` without repeating the edge sample
fn mirror(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let mut i = index.rem_euclid(period);
    if i >= len as isize {
        i = period - i;
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_indices() {
        assert_eq!(mirror(-1, 4), 1);
        assert_eq!(mirror(0, 4), 0);
        assert_eq!(mirror(3, 4), 3);
        assert_eq!(mirror(4, 4), 2);
        assert_eq!(mirror(5, 1), 0);
    }

    #[test]
    fn test_resize_identity_size_is_noop() {
        let src: Vec<f32> = (0..12).map(|v| v as f32).collect();
        for sampling in [Sampling::Corner, Sampling::HalfPixel] {
            assert_eq!(resize_bilinear(&src, 3, 2, 2, 3, 2, sampling), src);
        }
    }

    #[test]
    fn test_corner_upsample_interpolates_and_clamps() {
        // 1x2 -> 1x4: positions 0, 0.5, 1, 1.5
        let out = resize_bilinear(&[0.0, 4.0], 1, 2, 1, 1, 4, Sampling::Corner);
        assert_eq!(out, vec![0.0, 2.0, 4.0, 4.0]);
    }

    #[test]
    fn test_half_pixel_upsample_mirrors_edges() {
        // 1x2 -> 1x4: positions -0.25, 0.25, 0.75, 1.25
        let out = resize_bilinear(&[0.0, 4.0], 1, 2, 1, 1, 4, Sampling::HalfPixel);
        assert_eq!(out, vec![1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn test_channels_are_independent() {
        let src = [1.0, -1.0, 1.0, -1.0];
        let out = resize_bilinear(&src, 1, 2, 2, 2, 3, Sampling::HalfPixel);
        for px in out.chunks(2) {
            assert!((px[0] - 1.0).abs() < 1e-6);
            assert!((px[1] + 1.0).abs() < 1e-6);
        }
    }
}

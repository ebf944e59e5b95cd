//! Image loading and resizing for the cpm pipeline.
//!
//! Wraps the `image` crate so the rest of the workspace only sees
//! `Tensor<u8>` pixels in HWC layout: `[height, width, 3]`, RGB order.

pub mod error;

pub use error::ImageError;

use cpm_base::Tensor;
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;

/// Decode an encoded image (format auto-detected) into RGB pixels.
///
/// Gray, gray+alpha and RGBA sources are converted to RGB; alpha is dropped.
/// 16-bit and float sources are scaled down to 8 bits.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let img = image::load_from_memory(data)?;
    from_rgb_image(img.to_rgb8())
}

/// Read and decode the image at `path` into RGB pixels.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<Tensor<u8>, ImageError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_rgb(&bytes)
}

/// Resize RGB pixels to `height` x `width` with a triangle (bilinear) filter.
///
/// When shrinking, the filter widens with the scale factor, so every source
/// pixel contributes to the result.
pub fn resize_rgb(
    pixels: &Tensor<u8>,
    height: usize,
    width: usize,
) -> Result<Tensor<u8>, ImageError> {
    let rgb = to_rgb_image(pixels)?;
    if rgb.height() as usize == height && rgb.width() as usize == width {
        return Ok(pixels.clone());
    }
    let resized = image::imageops::resize(&rgb, width as u32, height as u32, FilterType::Triangle);
    from_rgb_image(resized)
}

/// Encode RGB pixels to `path`; the format follows the file extension.
pub fn save_rgb(path: impl AsRef<Path>, pixels: &Tensor<u8>) -> Result<(), ImageError> {
    to_rgb_image(pixels)?.save(path.as_ref())?;
    Ok(())
}

/// Convert RGB pixels to packed `0x00RRGGBB` words, as expected by framebuffer windows.
pub fn rgb_to_argb(pixels: &Tensor<u8>) -> Result<Vec<u32>, ImageError> {
    check_layout(pixels)?;
    Ok(pixels
        .data
        .chunks_exact(3)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect())
}

/// Return `(height, width)` of an `[H, W, 3]` tensor.
pub fn dimensions(pixels: &Tensor<u8>) -> Result<(usize, usize), ImageError> {
    check_layout(pixels)?;
    Ok((pixels.shape[0], pixels.shape[1]))
}

fn check_layout(pixels: &Tensor<u8>) -> Result<(), ImageError> {
    if pixels.shape.len() != 3 || pixels.shape[2] != 3 {
        return Err(ImageError::Layout(pixels.shape.clone()));
    }
    Ok(())
}

fn to_rgb_image(pixels: &Tensor<u8>) -> Result<RgbImage, ImageError> {
    let (height, width) = dimensions(pixels)?;
    RgbImage::from_raw(width as u32, height as u32, pixels.data.clone())
        .ok_or_else(|| ImageError::Layout(pixels.shape.clone()))
}

fn from_rgb_image(img: RgbImage) -> Result<Tensor<u8>, ImageError> {
    let (width, height) = img.dimensions();
    let shape = vec![height as usize, width as usize, 3];
    Ok(Tensor::new(shape, img.into_raw())?)
}

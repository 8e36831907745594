//! Image Codec
//!
//! Turns an arbitrary user-supplied image into a bounded, self-contained
//! `data:image/jpeg;base64,...` string that can be stored in local storage
//! and rendered without any further fetch.
//!
//! Decoding and encoding run on tokio's blocking pool so large photos never
//! stall the async executor.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Maximum accepted input size (20MB)
pub const MAX_INPUT_BYTES: usize = 20 * 1024 * 1024;

/// MIME type of every encoded photo
pub const OUTPUT_MIME: &str = "image/jpeg";

/// Resize parameters for stored photos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCodec {
    pub max_dimension: u32,
    pub quality: f32,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self {
            max_dimension: 800,
            quality: 0.7,
        }
    }
}

impl ImageCodec {
    pub fn new(max_dimension: u32, quality: f32) -> Self {
        Self {
            max_dimension,
            quality,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_image_dimension, config.image_quality)
    }

    /// Resize and encode `input` with this codec's parameters
    pub async fn encode(&self, input: Vec<u8>) -> AppResult<String> {
        resize(input, self.max_dimension, self.quality).await
    }
}

/// Decode `input`, shrink it so neither side exceeds `max_dimension`, and
/// re-encode it as a JPEG data URL at `quality` (0.0 to 1.0).
pub async fn resize(input: Vec<u8>, max_dimension: u32, quality: f32) -> AppResult<String> {
    if max_dimension == 0 {
        return Err(AppError::validation("max_dimension must be at least 1"));
    }
    if !(0.0..=1.0).contains(&quality) {
        return Err(AppError::validation(format!(
            "quality must be between 0.0 and 1.0, got {}",
            quality
        )));
    }
    if input.len() > MAX_INPUT_BYTES {
        return Err(AppError::validation(format!(
            "Image too large: {} bytes (max {} bytes)",
            input.len(),
            MAX_INPUT_BYTES
        )));
    }

    tokio::task::spawn_blocking(move || resize_blocking(&input, max_dimension, quality))
        .await
        .map_err(|e| AppError::internal(format!("Image worker failed: {}", e)))?
}

fn resize_blocking(input: &[u8], max_dimension: u32, quality: f32) -> AppResult<String> {
    let decoded = image::load_from_memory(input)
        .map_err(|e| AppError::decode(format!("Unable to decode image: {}", e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_width, target_height) = target_dimensions(width, height, max_dimension);
    let resized = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    let rgb = resized.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, jpeg_quality(quality))
        .encode_image(&rgb)
        .map_err(|e| AppError::internal(format!("Failed to encode image: {}", e)))?;

    tracing::debug!(
        "Encoded photo {}x{} -> {}x{} ({} bytes)",
        width,
        height,
        target_width,
        target_height,
        jpeg.len()
    );

    let b64 = base64::engine::general_purpose::STANDARD.encode(&jpeg);
    Ok(format!("data:{};base64,{}", OUTPUT_MIME, b64))
}

/// Output size for a `width`x`height` image bounded by `max_dimension`.
///
/// The longer side is clamped to `max_dimension` and the other side scales
/// with it. Images already within bounds are left alone; nothing is upscaled.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let scale = |side: u32, long_side: u32| -> u32 {
        let scaled = f64::from(side) * f64::from(max_dimension) / f64::from(long_side);
        scaled.round().max(1.0) as u32
    };

    if width > height {
        if width > max_dimension {
            return (max_dimension, scale(height, width));
        }
    } else if height > max_dimension {
        return (scale(width, height), max_dimension);
    }
    (width, height)
}

fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Decode a stored `data:` URL back into pixels.
pub fn decode_data_url(data_url: &str) -> AppResult<DynamicImage> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::decode("Not a data URL"))?;
    let (_mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::decode("Data URL is not base64-encoded"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AppError::decode(format!("Invalid base64 payload: {}", e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| AppError::decode(format!("Unable to decode image: {}", e)))
}

/// Width and height of the image embedded in a stored `data:` URL.
pub fn embedded_dimensions(data_url: &str) -> AppResult<(u32, u32)> {
    let image = decode_data_url(data_url)?;
    Ok((image.width(), image.height()))
}

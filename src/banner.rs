//! Banner image ingest
//!
//! Uploaded images must be roughly 2:1. Accepted images are recoloured into
//! the editor's two-tone palette by per-pixel luminance and stored as a PNG
//! data URL for preview. A separate downscale pass shrinks the raw upload
//! before it is sent to the device.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::consts::{BRIGHTNESS_THRESHOLD, RATIO_TOLERANCE, TARGET_RATIO};

/// Colour for luminance 0
pub const DARK_ANCHOR: [u8; 3] = [178, 172, 162];
/// Colour for luminance 1
pub const LIGHT_ANCHOR: [u8; 3] = [81, 83, 90];

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Afbeelding kon niet gelezen worden: {0}")]
    Decode(String),
    #[error("De afbeelding moet een 2:1 verhouding hebben (nu {width}x{height}).")]
    Ratio { width: u32, height: u32 },
    #[error("Afbeelding kon niet omgezet worden: {0}")]
    Encode(String),
}

/// Encoded banner image, as a `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset(String);

impl ImageAsset {
    /// Wrap a data URL received from the device or an import file
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Width:height within 5% of 2:1
pub fn ratio_ok(width: u32, height: u32) -> bool {
    if height == 0 {
        return false;
    }
    let ratio = width as f64 / height as f64;
    (ratio - TARGET_RATIO).abs() / TARGET_RATIO <= RATIO_TOLERANCE
}

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Average luminance over all pixels, 0..=255
pub fn mean_luminance(img: &RgbaImage) -> f64 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let total: f64 = img
        .pixels()
        .map(|p| luminance(p[0], p[1], p[2]))
        .sum();
    total / count as f64
}

/// Remap every pixel between the two anchors by its luminance. Images whose
/// mean luminance is at or below the threshold are left alone.
/// Returns whether the image was changed.
pub fn recolor(img: &mut RgbaImage) -> bool {
    let mean = mean_luminance(img);
    log::debug!("Banner mean luminance: {:.1}", mean);
    if mean <= BRIGHTNESS_THRESHOLD {
        return false;
    }
    for pixel in img.pixels_mut() {
        let factor = luminance(pixel[0], pixel[1], pixel[2]) / 255.0;
        for c in 0..3 {
            let dark = DARK_ANCHOR[c] as f64;
            let light = LIGHT_ANCHOR[c] as f64;
            pixel[c] = (dark + factor * (light - dark)).round().clamp(0.0, 255.0) as u8;
        }
    }
    true
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, IngestError> {
    image::load_from_memory(bytes).map_err(|e| IngestError::Decode(e.to_string()))
}

/// Encode as PNG and wrap in a data URL
pub fn encode_png(img: &DynamicImage) -> Result<ImageAsset, IngestError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| IngestError::Encode(e.to_string()))?;
    let encoded = general_purpose::STANDARD.encode(&buf);
    Ok(ImageAsset(format!("{PNG_DATA_URL_PREFIX}{encoded}")))
}

/// Validate, recolour and encode an uploaded image
pub fn ingest(bytes: &[u8]) -> Result<ImageAsset, IngestError> {
    let img = decode(bytes)?;
    let (width, height) = (img.width(), img.height());
    if !ratio_ok(width, height) {
        log::warn!("Rejected banner with ratio {}x{}", width, height);
        return Err(IngestError::Ratio { width, height });
    }

    let mut rgba = img.to_rgba8();
    if recolor(&mut rgba) {
        log::info!("Banner recoloured ({}x{})", width, height);
    }
    encode_png(&DynamicImage::ImageRgba8(rgba))
}

/// Target size after fitting `width * height` into `max_pixels`
pub fn fit_to_budget(width: u32, height: u32, max_pixels: u64) -> (u32, u32) {
    let total = width as u64 * height as u64;
    if total <= max_pixels || total == 0 {
        return (width, height);
    }
    let scale = (max_pixels as f64 / total as f64).sqrt();
    let w = (width as f64 * scale).round().max(1.0) as u32;
    let h = (height as f64 * scale).round().max(1.0) as u32;
    (w, h)
}

/// Shrink an image to at most `max_pixels` (aspect kept) and encode as PNG
pub fn downscale(bytes: &[u8], max_pixels: u64) -> Result<ImageAsset, IngestError> {
    let img = decode(bytes)?;
    let (w, h) = fit_to_budget(img.width(), img.height(), max_pixels);
    let img = if (w, h) == (img.width(), img.height()) {
        img
    } else {
        log::debug!(
            "Downscaling banner {}x{} -> {}x{}",
            img.width(),
            img.height(),
            w,
            h
        );
        img.resize_exact(w, h, FilterType::Triangle)
    };
    encode_png(&img)
}

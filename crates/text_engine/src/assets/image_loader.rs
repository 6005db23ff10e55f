//! Image loading utilities for texture data
//!
//! PNG encode/decode between in-memory RGBA buffers and the bytes handed to
//! the texture system.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (typically 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load image from memory (e.g. an encoded atlas handed to the backend)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        let data = Self::from_rgba(img.to_rgba8());
        log::debug!("Loaded image {}x{} from memory", data.width, data.height);
        Ok(data)
    }

    /// Wrap an RGBA8 buffer
    pub fn from_rgba(rgba_img: RgbaImage) -> Self {
        let (width, height) = rgba_img.dimensions();
        Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4, // RGBA
        }
    }

    /// Encode an RGBA8 buffer as PNG in memory
    pub fn encode_png(rgba_img: &RgbaImage) -> Result<Vec<u8>, AssetError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(rgba_img.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| AssetError::EncodeFailed(format!("PNG encode failed: {}", e)))?;
        log::debug!(
            "Encoded {}x{} image as PNG ({} bytes)",
            rgba_img.width(),
            rgba_img.height(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// RGBA value of one pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height || self.channels != 4 {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

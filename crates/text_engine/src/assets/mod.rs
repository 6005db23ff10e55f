//! Asset loading and encoding

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset could not be decoded or read
    #[error("Asset load failed: {0}")]
    LoadFailed(String),

    /// Asset could not be encoded
    #[error("Asset encode failed: {0}")]
    EncodeFailed(String),
}

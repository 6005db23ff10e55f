//! Errors raised while building atlases and text meshes

use crate::render::resources::BackendError;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load font from file or data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// No installed font matches the requested descriptor
    #[error("No font matches '{0}'")]
    FontNotFound(String),

    /// The encoding label is not known to the registry
    #[error("Unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    /// The encoding (after filtering) leaves no character to put in the atlas
    #[error("Encoding '{0}' has no representable characters for this font")]
    EmptyAlphabet(String),

    /// Failed to draw, encode or upload the atlas image
    #[error("Failed to rasterize atlas: {0}")]
    RasterizationError(String),

    /// Requested character was not found in the font atlas
    #[error("Character {0:?} not found in atlas")]
    UnknownCharacter(char),

    /// Text is too long to lay out in 32-bit pixel or index space
    #[error("Text layout overflow: {0}")]
    LayoutOverflow(String),

    /// GPU buffers for a text mesh could not be created
    #[error("Text mesh upload failed: {0}")]
    Backend(#[from] BackendError),
}

//! Text rendering system
//!
//! Text is drawn from a single-row glyph atlas: every character an encoding
//! can represent is rasterized once, left to right, into one image. Strings
//! then become one textured quad per character.
//!
//! # Architecture
//!
//! - [`EncodingRegistry`]: resolves encoding labels and decides which
//!   characters an atlas covers
//! - [`FontLibrary`] / [`FontFace`]: font lookup, metrics and rasterization
//! - [`GlyphAtlasBuilder`]: measures, packs, draws and uploads the atlas
//! - [`TextMeshBuilder`]: converts strings to quads sampling the atlas
//!
//! # Example
//!
//! ```no_run
//! use text_engine::render::HeadlessBackend;
//! use text_engine::render::text::{FontdueFace, FontDescriptor, FontStyle, GlyphAtlasBuilder, TextMeshBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backend = HeadlessBackend::new();
//! let font_data = std::fs::read("resources/fonts/default.ttf")?;
//! let face = FontdueFace::from_bytes(&font_data, 0, FontDescriptor::new("Default", FontStyle::PLAIN, 32.0))?;
//!
//! let atlas = GlyphAtlasBuilder::new().build(&face, "windows-1252", &mut backend)?;
//! let text_mesh = TextMeshBuilder::new(&atlas).build("Hello World")?;
//! assert_eq!(text_mesh.indices().len(), 6 * 11);
//! # Ok(())
//! # }
//! ```

mod encoding;
mod error;
mod font;
mod font_atlas;
mod text_layout;

pub use encoding::{
    representable_chars, CharacterEncoding, CharacterSet, EncodingRegistry, RegisteredEncoding,
    CODE_POINT_LIMIT,
};
pub use error::{FontError, FontResult};
pub use font::{FontDescriptor, FontFace, FontLibrary, FontStyle, FontdueFace, LineMetrics};
pub use font_atlas::{GlyphAtlas, GlyphAtlasBuilder, GlyphInfo};
pub use text_layout::{TextBounds, TextMesh, TextMeshBuilder, TEXT_DEPTH};

#[cfg(test)]
pub(crate) mod test_support;

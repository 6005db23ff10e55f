//! # Text Engine
//!
//! Text rendering for 3D scenes built around a single-row glyph atlas.
//!
//! ## Features
//!
//! - **Glyph Atlas**: every character of an encoding rasterized into one PNG row
//! - **Text Meshes**: one textured quad per character, laid out left to right
//! - **Text Items**: scene entities that own and swap their text mesh
//! - **Headless Backend**: CPU-side texture and buffer store for tools and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use text_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut backend = HeadlessBackend::new();
//!     let library = FontLibrary::with_system_fonts();
//!     let face = library.resolve(&FontDescriptor::new("DejaVu Sans", FontStyle::PLAIN, 24.0))?;
//!
//!     let atlas = GlyphAtlasBuilder::new().build(&face, "windows-1252", &mut backend)?;
//!     let mut item = TextItem::new("Hello", Arc::new(atlas), &mut backend)?;
//!     item.set_text("Hello World", &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AtlasConfig, Config, ConfigError, FontConfig, TextConfig},
        foundation::math::{Transform, Vec3},
        render::{
            GraphicsBackend, HeadlessBackend, BackendError,
            Material, Mesh, MeshBufferHandle, TextureHandle,
        },
        render::text::{
            CharacterEncoding, EncodingRegistry, FontDescriptor, FontError, FontFace,
            FontLibrary, FontResult, FontStyle, FontdueFace, GlyphAtlas, GlyphAtlasBuilder,
            GlyphInfo, LineMetrics, TextMesh, TextMeshBuilder,
        },
        scene::{SceneEntity, TextItem},
    };
}

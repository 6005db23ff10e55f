//! Font atlas system for text rendering
//!
//! Builds a single-row glyph atlas: every character the chosen encoding can
//! represent is measured, packed left to right with no gaps, drawn in one
//! pass onto a transparent RGBA canvas, encoded as PNG and uploaded as one
//! texture. The atlas is immutable afterwards and meant to be shared
//! (`Arc<GlyphAtlas>`) by every text item using the same font and encoding.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use super::encoding::{representable_chars, CharacterEncoding, EncodingRegistry};
use super::error::{FontError, FontResult};
use super::font::{FontDescriptor, FontFace};
use crate::assets::ImageData;
use crate::config::AtlasConfig;
use crate::render::resources::{GraphicsBackend, TextureHandle};

/// Horizontal slice of the atlas occupied by one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInfo {
    /// Pixel offset of the slice's left edge
    pub start_x: u32,
    /// Pixel width of the slice (the character's advance width)
    pub width: u32,
}

impl GlyphInfo {
    /// Pixel offset of the slice's right edge (exclusive)
    pub fn end_x(&self) -> u32 {
        self.start_x + self.width
    }
}

/// Atlas texture plus the per-character lookup table
#[derive(Debug)]
pub struct GlyphAtlas {
    font: FontDescriptor,
    encoding_name: String,
    /// Glyphs in left-to-right order
    glyphs: Vec<(char, GlyphInfo)>,
    /// Character to position in `glyphs`
    lookup: HashMap<char, usize>,
    width: u32,
    height: u32,
    ascent: u32,
    image: ImageData,
    png: Vec<u8>,
    texture: TextureHandle,
}

impl GlyphAtlas {
    /// Get glyph information for a character
    pub fn glyph(&self, ch: char) -> FontResult<GlyphInfo> {
        self.lookup
            .get(&ch)
            .map(|&i| self.glyphs[i].1)
            .ok_or(FontError::UnknownCharacter(ch))
    }

    /// Whether the atlas has a slot for `ch`
    pub fn contains(&self, ch: char) -> bool {
        self.lookup.contains_key(&ch)
    }

    /// All glyphs, left to right (ascending code point)
    pub fn glyphs(&self) -> impl Iterator<Item = (char, GlyphInfo)> + '_ {
        self.glyphs.iter().copied()
    }

    /// Number of glyph slots
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: construction fails rather than produce an empty atlas
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Atlas width in pixels (sum of all glyph widths)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels (the font's line height)
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Baseline position measured from the top edge
    pub fn ascent(&self) -> u32 {
        self.ascent
    }

    /// Rasterized atlas pixels
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// PNG encoding of the atlas as it was uploaded
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Handle of the uploaded atlas texture
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Font the atlas was built from
    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    /// Name of the encoding that selected the characters
    pub fn encoding_name(&self) -> &str {
        &self.encoding_name
    }
}

/// Builds [`GlyphAtlas`]es
///
/// # Example
///
/// ```no_run
/// # use text_engine::render::HeadlessBackend;
/// # use text_engine::render::text::{FontLibrary, FontDescriptor, FontStyle, GlyphAtlasBuilder};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let mut backend = HeadlessBackend::new();
/// let face = FontLibrary::with_system_fonts()
///     .resolve(&FontDescriptor::new("monospace", FontStyle::PLAIN, 16.0))?;
/// let atlas = GlyphAtlasBuilder::new()
///     .with_foreground([255, 255, 0, 255])
///     .build(&face, "koi8-r", &mut backend)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GlyphAtlasBuilder {
    foreground: Rgba<u8>,
    skip_missing_glyphs: bool,
}

impl Default for GlyphAtlasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphAtlasBuilder {
    /// White glyphs, every representable character gets a slot
    pub fn new() -> Self {
        Self {
            foreground: Rgba([255, 255, 255, 255]),
            skip_missing_glyphs: false,
        }
    }

    /// Builder matching an [`AtlasConfig`] (the encoding is passed to `build`)
    pub fn from_config(config: &AtlasConfig) -> Self {
        Self::new()
            .with_foreground(config.foreground)
            .skip_missing_glyphs(config.skip_missing_glyphs)
    }

    /// Colour glyphs are drawn in
    pub fn with_foreground(mut self, rgba: [u8; 4]) -> Self {
        self.foreground = Rgba(rgba);
        self
    }

    /// Leave out characters the face would draw as its missing-glyph box
    pub fn skip_missing_glyphs(mut self, skip: bool) -> Self {
        self.skip_missing_glyphs = skip;
        self
    }

    /// Build an atlas for the encoding registered under `encoding_name`
    pub fn build(
        &self,
        face: &dyn FontFace,
        encoding_name: &str,
        backend: &mut dyn GraphicsBackend,
    ) -> FontResult<GlyphAtlas> {
        let encoding = EncodingRegistry::resolve(encoding_name)?;
        self.build_with_encoding(face, &encoding, backend)
    }

    /// Build an atlas covering every character `encoding` can represent
    pub fn build_with_encoding(
        &self,
        face: &dyn FontFace,
        encoding: &dyn CharacterEncoding,
        backend: &mut dyn GraphicsBackend,
    ) -> FontResult<GlyphAtlas> {
        let candidates = representable_chars(encoding);
        log::debug!("Encoding {} represents {} characters", encoding.name(), candidates.len());

        let metrics = face.line_metrics();
        let height = metrics.height();

        // Pack left to right in ascending code point order
        let mut glyphs = Vec::with_capacity(candidates.len());
        let mut current_x = 0u32;
        let mut missing = 0usize;
        let mut zero_width = 0usize;

        for ch in candidates {
            if self.skip_missing_glyphs && !face.has_glyph(ch) {
                missing += 1;
                continue;
            }
            let width = face.char_width(ch);
            if width == 0 {
                zero_width += 1;
                continue;
            }
            glyphs.push((ch, GlyphInfo { start_x: current_x, width }));
            current_x = current_x.checked_add(width).ok_or_else(|| {
                FontError::RasterizationError(format!("atlas wider than {} pixels", u32::MAX))
            })?;
        }

        if missing + zero_width > 0 {
            log::debug!(
                "Skipped {} characters without glyphs and {} zero-width characters",
                missing,
                zero_width
            );
        }
        if glyphs.is_empty() {
            return Err(FontError::EmptyAlphabet(encoding.name().to_string()));
        }
        if height == 0 {
            return Err(FontError::RasterizationError(format!("font {} has zero line height", face.descriptor())));
        }

        let width = current_x;
        let alphabet: String = glyphs.iter().map(|&(ch, _)| ch).collect();

        // Transparent background; one draw call for the whole alphabet
        let mut canvas = RgbaImage::new(width, height);
        face.draw_string(&mut canvas, &alphabet, 0, metrics.ascent as i32, self.foreground);

        let png = ImageData::encode_png(&canvas).map_err(|e| FontError::RasterizationError(e.to_string()))?;
        let texture = backend
            .upload_texture(&png)
            .map_err(|e| FontError::RasterizationError(e.to_string()))?;

        let lookup = glyphs.iter().enumerate().map(|(i, &(ch, _))| (ch, i)).collect();

        log::info!(
            "Font atlas built: {} ({}), {} glyphs, {}x{}",
            face.descriptor(),
            encoding.name(),
            glyphs.len(),
            width,
            height
        );

        Ok(GlyphAtlas {
            font: face.descriptor().clone(),
            encoding_name: encoding.name().to_string(),
            glyphs,
            lookup,
            width,
            height,
            ascent: metrics.ascent,
            image: ImageData::from_rgba(canvas),
            png,
            texture,
        })
    }
}

//! Font lookup, metrics and rasterization
//!
//! Faces are located with `fontdb` (system fonts or explicitly loaded data)
//! and rasterized with `fontdue`. Atlas construction only talks to the
//! [`FontFace`] trait, so any metrics source can stand in for a real font.

use std::fmt;
use std::path::Path;

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use super::error::{FontError, FontResult};

bitflags::bitflags! {
    /// Face style flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        /// Bold weight
        const BOLD = 0b01;
        /// Italic or oblique slant
        const ITALIC = 0b10;
    }
}

impl FontStyle {
    /// Regular weight, upright
    pub const PLAIN: Self = Self::empty();
}

/// Family, style and pixel size of a font
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Family name, or one of the generic families `serif`, `sans-serif`, `monospace`
    pub family: String,
    /// Style flags
    pub style: FontStyle,
    /// Size in pixels
    pub size: f32,
}

impl FontDescriptor {
    /// Create a descriptor
    pub fn new(family: impl Into<String>, style: FontStyle, size: f32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if self.style.contains(FontStyle::BOLD) {
            write!(f, " bold")?;
        }
        if self.style.contains(FontStyle::ITALIC) {
            write!(f, " italic")?;
        }
        write!(f, " {}px", self.size)
    }
}

/// Vertical metrics of a face, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMetrics {
    /// Distance from the top of the line to the baseline
    pub ascent: u32,
    /// Distance from the baseline to the bottom of the line
    pub descent: u32,
    /// Extra spacing below the descent
    pub leading: u32,
}

impl LineMetrics {
    /// Full line height
    pub fn height(&self) -> u32 {
        self.ascent + self.descent + self.leading
    }
}

/// Metrics and rasterization for one face at one size
pub trait FontFace {
    /// Descriptor this face was created for
    fn descriptor(&self) -> &FontDescriptor;

    /// Vertical line metrics
    fn line_metrics(&self) -> LineMetrics;

    /// Advance width of `ch` in whole pixels
    fn char_width(&self, ch: char) -> u32;

    /// Whether the face has a real glyph for `ch` rather than its missing-glyph box
    fn has_glyph(&self, _ch: char) -> bool {
        true
    }

    /// Draw `text` in `color` with the pen starting at `origin_x` on `baseline_y`
    ///
    /// The pen advances by [`Self::char_width`] after every character, so the
    /// column each character lands in matches its measured width exactly.
    /// Pixels outside the canvas are clipped.
    fn draw_string(&self, canvas: &mut RgbaImage, text: &str, origin_x: i32, baseline_y: i32, color: Rgba<u8>);
}

/// Face rasterized with `fontdue`
pub struct FontdueFace {
    font: Font,
    descriptor: FontDescriptor,
}

impl FontdueFace {
    /// Create a face from TrueType/OpenType data
    ///
    /// `collection_index` selects the face within a font collection (0 for
    /// single-face files).
    pub fn from_bytes(font_data: &[u8], collection_index: u32, descriptor: FontDescriptor) -> FontResult<Self> {
        let settings = FontSettings {
            collection_index,
            scale: descriptor.size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(font_data, settings)
            .map_err(|e| FontError::LoadError(format!("fontdue error: {}", e)))?;

        log::info!("Loaded font {}", descriptor);
        Ok(Self { font, descriptor })
    }

    /// Load a face from a font file
    pub fn from_file<P: AsRef<Path>>(path: P, descriptor: FontDescriptor) -> FontResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| FontError::LoadError(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&data, 0, descriptor)
    }

    fn px(&self) -> f32 {
        self.descriptor.size
    }
}

impl FontFace for FontdueFace {
    fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    fn line_metrics(&self) -> LineMetrics {
        match self.font.horizontal_line_metrics(self.px()) {
            Some(m) => LineMetrics {
                ascent: m.ascent.ceil().max(0.0) as u32,
                descent: (-m.descent).ceil().max(0.0) as u32,
                leading: m.line_gap.round().max(0.0) as u32,
            },
            None => {
                log::warn!("Font {} has no horizontal line metrics, using its pixel size", self.descriptor);
                LineMetrics {
                    ascent: self.px().ceil() as u32,
                    descent: 0,
                    leading: 0,
                }
            }
        }
    }

    fn char_width(&self, ch: char) -> u32 {
        self.font.metrics(ch, self.px()).advance_width.round().max(0.0) as u32
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn draw_string(&self, canvas: &mut RgbaImage, text: &str, origin_x: i32, baseline_y: i32, color: Rgba<u8>) {
        let (canvas_w, canvas_h) = (canvas.width() as i32, canvas.height() as i32);
        let mut pen_x = origin_x;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.px());
            let left = pen_x + metrics.xmin;
            let top = baseline_y - (metrics.height as i32 + metrics.ymin);

            for (row, line) in bitmap.chunks(metrics.width.max(1)).enumerate() {
                let y = top + row as i32;
                if y < 0 || y >= canvas_h {
                    continue;
                }
                for (col, &coverage) in line.iter().enumerate() {
                    let x = left + col as i32;
                    if coverage == 0 || x < 0 || x >= canvas_w {
                        continue;
                    }
                    blend_coverage(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
                }
            }

            pen_x += self.char_width(ch) as i32;
        }
    }
}

/// Composite a single-colour coverage sample over a pixel (straight alpha)
pub(crate) fn blend_coverage(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: u8) {
    let src_a = u32::from(coverage) * u32::from(color[3]) / 255;
    let dst_a = u32::from(dst[3]);
    let out_a = src_a + dst_a * (255 - src_a) / 255;
    *dst = Rgba([color[0], color[1], color[2], out_a as u8]);
}

/// Font database used to turn descriptors into faces
pub struct FontLibrary {
    db: fontdb::Database,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Create a library populated with the fonts installed on this system
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::info!("Font library loaded {} system faces", db.len());
        Self { db }
    }

    /// Add font data (TTF, OTF or a collection)
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Add a font file
    pub fn load_font_file<P: AsRef<Path>>(&mut self, path: P) -> FontResult<()> {
        let path = path.as_ref();
        self.db
            .load_font_file(path)
            .map_err(|e| FontError::LoadError(format!("{}: {}", path.display(), e)))
    }

    /// Number of faces known to the library
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Find the best matching face for a descriptor and load it
    pub fn resolve(&self, descriptor: &FontDescriptor) -> FontResult<FontdueFace> {
        let family = match descriptor.family.to_ascii_lowercase().as_str() {
            "serif" => fontdb::Family::Serif,
            "sans-serif" | "sansserif" => fontdb::Family::SansSerif,
            "monospace" | "monospaced" => fontdb::Family::Monospace,
            _ => fontdb::Family::Name(&descriptor.family),
        };
        let query = fontdb::Query {
            families: &[family],
            weight: if descriptor.style.contains(FontStyle::BOLD) {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if descriptor.style.contains(FontStyle::ITALIC) {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = self
            .db
            .query(&query)
            .ok_or_else(|| FontError::FontNotFound(descriptor.to_string()))?;

        self.db
            .with_face_data(id, |data, index| FontdueFace::from_bytes(data, index, descriptor.clone()))
            .ok_or_else(|| FontError::FontNotFound(descriptor.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_display() {
        let d = FontDescriptor::new("Serif", FontStyle::BOLD | FontStyle::ITALIC, 18.0);
        assert_eq!(d.to_string(), "Serif bold italic 18px");
        assert_eq!(FontDescriptor::new("Mono", FontStyle::PLAIN, 12.5).to_string(), "Mono 12.5px");
    }

    #[test]
    fn test_line_height_sums_metrics() {
        let m = LineMetrics { ascent: 15, descent: 4, leading: 1 };
        assert_eq!(m.height(), 20);
    }

    #[test]
    fn test_blend_coverage_over_transparent_and_opaque() {
        let white = Rgba([255, 255, 255, 255]);

        let mut px = Rgba([0, 0, 0, 0]);
        blend_coverage(&mut px, white, 128);
        assert_eq!(px, Rgba([255, 255, 255, 128]));

        blend_coverage(&mut px, white, 255);
        assert_eq!(px[3], 255);

        let mut untouched = Rgba([0, 0, 0, 0]);
        blend_coverage(&mut untouched, Rgba([255, 0, 0, 0]), 255);
        assert_eq!(untouched[3], 0);
    }

    #[test]
    fn test_invalid_font_data_fails_to_load() {
        let result = FontdueFace::from_bytes(b"definitely not a font", 0, FontDescriptor::new("x", FontStyle::PLAIN, 12.0));
        assert!(matches!(result, Err(FontError::LoadError(_))));
    }

    #[test]
    fn test_empty_library_finds_nothing() {
        let library = FontLibrary::new();
        assert_eq!(library.face_count(), 0);
        let err = library
            .resolve(&FontDescriptor::new("Nonexistent Sans", FontStyle::PLAIN, 12.0))
            .err()
            .unwrap();
        assert!(matches!(err, FontError::FontNotFound(name) if name == "Nonexistent Sans 12px"));
    }

    fn has_ink(canvas: &RgbaImage, columns: std::ops::Range<u32>, rows: std::ops::Range<u32>) -> bool {
        rows.flat_map(|y| columns.clone().map(move |x| (x, y)))
            .any(|(x, y)| canvas.get_pixel(x, y)[3] > 0)
    }

    #[test]
    fn test_system_face_draws_within_measured_columns() {
        let library = FontLibrary::with_system_fonts();
        let face = match library.resolve(&FontDescriptor::new("sans-serif", FontStyle::PLAIN, 24.0)) {
            Ok(face) => face,
            Err(e) => {
                eprintln!("skipping, no system sans-serif face: {}", e);
                return;
            }
        };
        if !face.has_glyph('A') || !face.has_glyph('H') {
            eprintln!("skipping, {} lacks Latin capitals", face.descriptor());
            return;
        }

        let metrics = face.line_metrics();
        assert!(metrics.ascent > 0);
        assert!(metrics.height() >= metrics.ascent);

        let (width_a, width_h) = (face.char_width('A'), face.char_width('H'));
        assert!(width_a > 0 && width_h > 0);

        let white = Rgba([255, 255, 255, 255]);
        let mut canvas = RgbaImage::new(width_a + width_h, metrics.height());
        face.draw_string(&mut canvas, "AH", 0, metrics.ascent as i32, white);

        // Each character inks its own column range above the baseline
        assert!(has_ink(&canvas, 0..width_a, 0..metrics.ascent));
        assert!(has_ink(&canvas, width_a..width_a + width_h, 0..metrics.ascent));

        // Neither capital has a descender; allow one row of antialiasing
        assert!(!has_ink(&canvas, 0..canvas.width(), (metrics.ascent + 2).min(metrics.height())..metrics.height()));

        // Drawing off the canvas clips instead of panicking
        let mut small = RgbaImage::new(4, 4);
        face.draw_string(&mut small, "AH", -(width_a as i32), 2, white);
    }

    #[test]
    fn test_missing_font_file() {
        let mut library = FontLibrary::new();
        assert!(matches!(
            library.load_font_file("/nonexistent/font.ttf"),
            Err(FontError::LoadError(_))
        ));
    }
}

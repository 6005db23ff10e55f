//! Deterministic stand-ins for fonts and backends

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use super::font::{blend_coverage, FontDescriptor, FontFace, FontStyle, LineMetrics};
use crate::render::primitives::Mesh;
use crate::render::resources::{BackendError, GraphicsBackend, HeadlessBackend, MeshBufferHandle, TextureHandle};

/// Face with hand-picked advance widths
///
/// Each character is drawn as a one pixel wide, fully covered stroke down
/// the left edge of its cell, from the top of the line to the baseline.
pub struct FixedMetricsFace {
    descriptor: FontDescriptor,
    metrics: LineMetrics,
    widths: HashMap<char, u32>,
    default_width: u32,
    missing: Vec<char>,
}

impl FixedMetricsFace {
    pub fn new(metrics: LineMetrics, default_width: u32) -> Self {
        Self {
            descriptor: FontDescriptor::new("Fixed", FontStyle::PLAIN, metrics.height() as f32),
            metrics,
            widths: HashMap::new(),
            default_width,
            missing: Vec::new(),
        }
    }

    pub fn with_width(mut self, ch: char, width: u32) -> Self {
        self.widths.insert(ch, width);
        self
    }

    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }
}

impl FontFace for FixedMetricsFace {
    fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    fn line_metrics(&self) -> LineMetrics {
        self.metrics
    }

    fn char_width(&self, ch: char) -> u32 {
        self.widths.get(&ch).copied().unwrap_or(self.default_width)
    }

    fn has_glyph(&self, ch: char) -> bool {
        !self.missing.contains(&ch)
    }

    fn draw_string(&self, canvas: &mut RgbaImage, text: &str, origin_x: i32, baseline_y: i32, color: Rgba<u8>) {
        let mut pen_x = origin_x;
        for ch in text.chars() {
            if pen_x >= 0 && (pen_x as u32) < canvas.width() {
                let top = baseline_y - self.metrics.ascent as i32;
                for y in top.max(0)..baseline_y.min(canvas.height() as i32) {
                    blend_coverage(canvas.get_pixel_mut(pen_x as u32, y as u32), color, 255);
                }
            }
            pen_x += self.char_width(ch) as i32;
        }
    }
}

/// The 'A' = 10px, 'B' = 14px, 20px line face used by the worked example
pub fn ab_face() -> FixedMetricsFace {
    FixedMetricsFace::new(LineMetrics { ascent: 15, descent: 4, leading: 1 }, 8)
        .with_width('A', 10)
        .with_width('B', 14)
}

/// Backend that accepts meshes but refuses every texture upload
#[derive(Default)]
pub struct RejectingTextureBackend {
    inner: HeadlessBackend,
}

impl GraphicsBackend for RejectingTextureBackend {
    fn upload_texture(&mut self, _encoded_image: &[u8]) -> Result<TextureHandle, BackendError> {
        Err(BackendError::TextureUpload("device lost".to_string()))
    }

    fn create_mesh_buffers(&mut self, mesh: &Mesh) -> Result<MeshBufferHandle, BackendError> {
        self.inner.create_mesh_buffers(mesh)
    }

    fn delete_mesh_buffers(&mut self, handle: MeshBufferHandle) {
        self.inner.delete_mesh_buffers(handle);
    }
}

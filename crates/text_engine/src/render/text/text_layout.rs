//! Text layout engine
//!
//! Converts text strings into one quad per character, laid out on a single
//! row. Quads are placed at cumulative glyph widths and sample the glyph's
//! horizontal slice of the atlas.
//!
//! # Layout Coordinate System
//!
//! - Origin (0, 0) is the top-left corner of the first character
//! - +X points right, +Y points down (matching the atlas image rows)
//! - All vertices sit at z = [`TEXT_DEPTH`]

use super::error::{FontError, FontResult};
use super::font_atlas::{GlyphAtlas, GlyphInfo};
use crate::foundation::math::Vec3;
use crate::render::material::create_text_material;
use crate::render::primitives::Mesh;

/// Depth of every text vertex
pub const TEXT_DEPTH: f32 = 0.0;

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;

/// Bounding box for text layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    /// Total advance of all characters
    pub width: u32,
    /// Line height of the atlas
    pub height: u32,
}

/// Geometry of one string over one atlas
///
/// Buffers are parallel: vertex `n` has position `positions[3n..3n + 3]` and
/// texture coordinate `tex_coords[2n..2n + 2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMesh {
    positions: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
    bounds: TextBounds,
}

impl TextMesh {
    /// Vertex positions, xyz per vertex
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Texture coordinates, uv per vertex
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Triangle indices, six per character
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of characters laid out
    pub fn char_count(&self) -> usize {
        self.indices.len() / INDICES_PER_QUAD
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.char_count() * VERTICES_PER_QUAD
    }

    /// Extent of the laid out row
    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    /// Convert into a renderable mesh drawing from `atlas` in `color`
    ///
    /// The normals buffer is left empty; text is not lit.
    pub fn into_mesh(self, atlas: &GlyphAtlas, color: Vec3) -> Mesh {
        let mut mesh = Mesh::new(self.positions, self.tex_coords, Vec::new(), self.indices);
        mesh.set_material(create_text_material(atlas.texture(), color));
        mesh
    }
}

/// Text layout engine that converts strings to mesh geometry
pub struct TextMeshBuilder<'a> {
    atlas: &'a GlyphAtlas,
}

impl<'a> TextMeshBuilder<'a> {
    /// Create a builder laying out against `atlas`
    pub fn new(atlas: &'a GlyphAtlas) -> Self {
        Self { atlas }
    }

    /// Convert a text string into positioned quads
    ///
    /// Each character generates 4 vertices (top-left, bottom-left,
    /// bottom-right, top-right) and 6 indices (two triangles split along the
    /// top-left to bottom-right diagonal). Fails with
    /// [`FontError::UnknownCharacter`](super::FontError::UnknownCharacter) on
    /// the first character the atlas has no slot for; no partial mesh is
    /// returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use text_engine::render::text::{GlyphAtlas, TextMeshBuilder};
    /// # fn demo(atlas: &GlyphAtlas) -> text_engine::render::text::FontResult<()> {
    /// let mesh = TextMeshBuilder::new(atlas).build("Hello")?;
    /// assert_eq!(mesh.vertex_count(), 20); // 5 chars × 4 vertices
    /// assert_eq!(mesh.indices().len(), 30); // 5 chars × 6 indices
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(&self, text: &str) -> FontResult<TextMesh> {
        let glyphs = text
            .chars()
            .map(|ch| self.atlas.glyph(ch))
            .collect::<FontResult<Vec<_>>>()?;

        let mut positions = Vec::with_capacity(glyphs.len() * VERTICES_PER_QUAD * 3);
        let mut tex_coords = Vec::with_capacity(glyphs.len() * VERTICES_PER_QUAD * 2);
        let mut indices = Vec::with_capacity(glyphs.len() * INDICES_PER_QUAD);

        let mut cursor_x = 0u32;
        for (i, glyph) in glyphs.iter().enumerate() {
            let next_x = advance(cursor_x, glyph.width)?;
            self.push_quad(cursor_x, next_x, glyph, &mut positions, &mut tex_coords);

            let base = quad_base(i)?;
            indices.extend_from_slice(&[
                base, base + 1, base + 2, // top-left, bottom-left, bottom-right
                base, base + 2, base + 3, // top-left, bottom-right, top-right
            ]);

            cursor_x = next_x;
        }

        log::trace!("Laid out {} characters, {}px wide", glyphs.len(), cursor_x);

        Ok(TextMesh {
            positions,
            tex_coords,
            indices,
            bounds: TextBounds {
                width: cursor_x,
                height: self.atlas.height(),
            },
        })
    }

    /// Extent of `text` without building geometry
    pub fn measure(&self, text: &str) -> FontResult<TextBounds> {
        let mut width = 0u32;
        for ch in text.chars() {
            width = advance(width, self.atlas.glyph(ch)?.width)?;
        }
        Ok(TextBounds {
            width,
            height: self.atlas.height(),
        })
    }

    fn push_quad(
        &self,
        cursor_x: u32,
        next_x: u32,
        glyph: &GlyphInfo,
        positions: &mut Vec<f32>,
        tex_coords: &mut Vec<f32>,
    ) {
        let atlas_width = self.atlas.width() as f32;
        let x_min = cursor_x as f32;
        let x_max = next_x as f32;
        let y_max = self.atlas.height() as f32;
        let u_min = glyph.start_x as f32 / atlas_width;
        let u_max = glyph.end_x() as f32 / atlas_width;

        positions.extend_from_slice(&[
            x_min, 0.0, TEXT_DEPTH, // top-left
            x_min, y_max, TEXT_DEPTH, // bottom-left
            x_max, y_max, TEXT_DEPTH, // bottom-right
            x_max, 0.0, TEXT_DEPTH, // top-right
        ]);
        tex_coords.extend_from_slice(&[
            u_min, 0.0, //
            u_min, 1.0, //
            u_max, 1.0, //
            u_max, 0.0, //
        ]);
    }
}

/// Pen position after a glyph of `width` pixels
fn advance(cursor_x: u32, width: u32) -> FontResult<u32> {
    cursor_x
        .checked_add(width)
        .ok_or_else(|| FontError::LayoutOverflow(format!("row wider than {} pixels", u32::MAX)))
}

/// First vertex index of the `i`th quad; the last vertex is `base + 3`
fn quad_base(i: usize) -> FontResult<u32> {
    i.checked_mul(VERTICES_PER_QUAD)
        .and_then(|base| u32::try_from(base).ok())
        .filter(|base| base.checked_add(VERTICES_PER_QUAD as u32 - 1).is_some())
        .ok_or_else(|| FontError::LayoutOverflow(format!("character {} exceeds 32-bit vertex indices", i)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::resources::HeadlessBackend;
    use crate::render::text::encoding::CharacterSet;
    use crate::render::text::test_support::ab_face;
    use crate::render::text::GlyphAtlasBuilder;
    use approx::assert_relative_eq;

    fn ab_atlas() -> GlyphAtlas {
        let mut backend = HeadlessBackend::new();
        GlyphAtlasBuilder::new()
            .build_with_encoding(&ab_face(), &CharacterSet::new("ab", "AB"), &mut backend)
            .unwrap()
    }

    fn vertex(mesh: &TextMesh, n: usize) -> ([f32; 3], [f32; 2]) {
        let p = &mesh.positions()[n * 3..n * 3 + 3];
        let t = &mesh.tex_coords()[n * 2..n * 2 + 2];
        ([p[0], p[1], p[2]], [t[0], t[1]])
    }

    #[test]
    fn test_ab_mesh_geometry() {
        let atlas = ab_atlas();
        let mesh = TextMeshBuilder::new(&atlas).build("AB").unwrap();

        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

        let (p0, t0) = vertex(&mesh, 0);
        assert_eq!(p0, [0.0, 0.0, 0.0]);
        assert_eq!(t0, [0.0, 0.0]);

        let (p2, t2) = vertex(&mesh, 2);
        assert_eq!(p2, [10.0, 20.0, 0.0]);
        assert_relative_eq!(t2[0], 10.0 / 24.0);
        assert_relative_eq!(t2[1], 1.0);

        let (p4, t4) = vertex(&mesh, 4);
        assert_eq!(p4, [10.0, 0.0, 0.0]);
        assert_relative_eq!(t4[0], 0.416_666_7, epsilon = 1e-4);
        assert_relative_eq!(t4[1], 0.0);

        let (p6, t6) = vertex(&mesh, 6);
        assert_eq!(p6, [24.0, 20.0, 0.0]);
        assert_relative_eq!(t6[0], 1.0);
        assert_relative_eq!(t6[1], 1.0);

        assert_eq!(mesh.bounds(), TextBounds { width: 24, height: 20 });
    }

    #[test]
    fn test_corner_order_within_quad() {
        let atlas = ab_atlas();
        let mesh = TextMeshBuilder::new(&atlas).build("B").unwrap();

        let corners: Vec<_> = (0..4).map(|n| vertex(&mesh, n).0).collect();
        assert_eq!(
            corners,
            vec![[0.0, 0.0, 0.0], [0.0, 20.0, 0.0], [14.0, 20.0, 0.0], [14.0, 0.0, 0.0]]
        );
        let vs: Vec<_> = (0..4).map(|n| vertex(&mesh, n).1[1]).collect();
        assert_eq!(vs, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_buffer_sizes_scale_with_length() {
        let atlas = ab_atlas();
        let builder = TextMeshBuilder::new(&atlas);
        for text in ["", "A", "ABBA", "BABABABABA"] {
            let mesh = builder.build(text).unwrap();
            let n = text.chars().count();
            assert_eq!(mesh.indices().len(), 6 * n);
            assert_eq!(mesh.positions().len(), 12 * n);
            assert_eq!(mesh.tex_coords().len(), 8 * n);
            assert_eq!(mesh.char_count(), n);
        }
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let atlas = ab_atlas();
        let builder = TextMeshBuilder::new(&atlas);
        let first = builder.build("ABAB").unwrap();
        let second = builder.build("ABAB").unwrap();

        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(first.positions()), bits(second.positions()));
        assert_eq!(bits(first.tex_coords()), bits(second.tex_coords()));
        assert_eq!(first.indices(), second.indices());
    }

    #[test]
    fn test_unknown_character_fails_whole_build() {
        let atlas = ab_atlas();
        let err = TextMeshBuilder::new(&atlas).build("ABC").unwrap_err();
        assert!(matches!(err, FontError::UnknownCharacter('C')));
    }

    #[test]
    fn test_characters_outside_enumerated_range_are_unknown() {
        let atlas = ab_atlas();
        assert!(matches!(
            TextMeshBuilder::new(&atlas).build("A😀"),
            Err(FontError::UnknownCharacter('😀'))
        ));
    }

    #[test]
    fn test_measure_matches_build() {
        let atlas = ab_atlas();
        let builder = TextMeshBuilder::new(&atlas);
        assert_eq!(builder.measure("BAB").unwrap(), builder.build("BAB").unwrap().bounds());
        assert_eq!(builder.measure("BAB").unwrap().width, 38);
        assert!(builder.measure("?").is_err());
    }

    #[test]
    fn test_advance_rejects_overflowing_row() {
        assert_eq!(advance(10, 14).unwrap(), 24);
        assert_eq!(advance(u32::MAX - 5, 5).unwrap(), u32::MAX);
        assert!(matches!(advance(u32::MAX - 5, 6), Err(FontError::LayoutOverflow(_))));
    }

    #[test]
    fn test_quad_base_rejects_unindexable_character() {
        assert_eq!(quad_base(0).unwrap(), 0);
        assert_eq!(quad_base(2).unwrap(), 8);

        // Last quad whose four vertices all fit in u32
        let last = (u32::MAX as usize - 3) / VERTICES_PER_QUAD;
        assert_eq!(quad_base(last).unwrap(), u32::MAX - 3);
        assert!(matches!(quad_base(last + 1), Err(FontError::LayoutOverflow(_))));
        assert!(matches!(quad_base(usize::MAX), Err(FontError::LayoutOverflow(_))));
    }

    #[test]
    fn test_into_mesh_attaches_atlas_material() {
        let atlas = ab_atlas();
        let mesh = TextMeshBuilder::new(&atlas)
            .build("AB")
            .unwrap()
            .into_mesh(&atlas, Vec3::new(1.0, 1.0, 1.0));

        assert_eq!(mesh.vertex_count(), 8);
        assert!(mesh.normals().is_empty());
        assert_eq!(mesh.material().unwrap().base_color_texture, atlas.texture());
        assert!(!mesh.is_uploaded());
    }
}

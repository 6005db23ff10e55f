//! Text placed in the scene
//!
//! A [`TextItem`] wraps a [`SceneEntity`] whose mesh is the current string
//! laid out over a shared [`GlyphAtlas`]. Changing the text rebuilds the mesh
//! from scratch; the atlas itself is never touched.

use std::sync::Arc;

use super::entity::SceneEntity;
use crate::foundation::math::Vec3;
use crate::render::primitives::Mesh;
use crate::render::resources::GraphicsBackend;
use crate::render::text::{FontResult, GlyphAtlas, TextBounds, TextMeshBuilder};

/// String rendered as a row of atlas quads
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use text_engine::render::HeadlessBackend;
/// # use text_engine::render::text::{GlyphAtlas, FontResult};
/// # use text_engine::scene::TextItem;
/// # fn demo(atlas: Arc<GlyphAtlas>, backend: &mut HeadlessBackend) -> FontResult<()> {
/// let mut score = TextItem::new("Score: 0", atlas, backend)?;
/// score.set_text("Score: 10", backend)?;
/// score.release(backend);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TextItem {
    entity: SceneEntity,
    text: String,
    color: Vec3,
    atlas: Arc<GlyphAtlas>,
}

impl TextItem {
    /// Lay out `text` and upload its mesh
    pub fn new(text: impl Into<String>, atlas: Arc<GlyphAtlas>, backend: &mut dyn GraphicsBackend) -> FontResult<Self> {
        let text = text.into();
        let color = Vec3::new(1.0, 1.0, 1.0);
        let mut mesh = Self::build_mesh(&text, &atlas, color)?;
        mesh.upload(backend)?;

        let mut entity = SceneEntity::new();
        entity.replace_mesh(mesh, backend);

        log::debug!("Text item created: {:?}", text);
        Ok(Self {
            entity,
            text,
            color,
            atlas,
        })
    }

    fn build_mesh(text: &str, atlas: &GlyphAtlas, color: Vec3) -> FontResult<Mesh> {
        Ok(TextMeshBuilder::new(atlas).build(text)?.into_mesh(atlas, color))
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and rebuild the mesh
    ///
    /// The new string is laid out first, so an unknown character leaves the
    /// item exactly as it was. Otherwise the old mesh's GPU buffers are
    /// released, then the new mesh is uploaded and attached. If that upload
    /// fails the item is left without a mesh and keeps its previous text.
    pub fn set_text(&mut self, text: impl Into<String>, backend: &mut dyn GraphicsBackend) -> FontResult<()> {
        let text = text.into();
        let mut mesh = Self::build_mesh(&text, &self.atlas, self.color)?;

        self.entity.release_mesh(backend);
        mesh.upload(backend)?;
        self.entity.replace_mesh(mesh, backend);

        log::trace!("Text changed: {:?} -> {:?}", self.text, text);
        self.text = text;
        Ok(())
    }

    /// Tint colour
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Change the tint colour of the current and future meshes
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
        if let Some(material) = self.entity.mesh_mut().and_then(Mesh::material_mut) {
            material.color = color;
        }
    }

    /// Extent of the current text in atlas pixels
    pub fn bounds(&self) -> FontResult<TextBounds> {
        TextMeshBuilder::new(&self.atlas).measure(&self.text)
    }

    /// Atlas the text is drawn from
    pub fn atlas(&self) -> &Arc<GlyphAtlas> {
        &self.atlas
    }

    /// Current mesh
    pub fn mesh(&self) -> Option<&Mesh> {
        self.entity.mesh()
    }

    /// Underlying scene entity
    pub fn entity(&self) -> &SceneEntity {
        &self.entity
    }

    /// Underlying scene entity, for moving or hiding the text
    pub fn entity_mut(&mut self) -> &mut SceneEntity {
        &mut self.entity
    }

    /// Release the mesh's GPU buffers; call before dropping the item
    pub fn release(mut self, backend: &mut dyn GraphicsBackend) {
        self.entity.release_mesh(backend);
    }
}

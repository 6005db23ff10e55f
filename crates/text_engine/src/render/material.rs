//! Text material utilities
//!
//! Text is drawn flat: the atlas alpha channel carries glyph coverage and the
//! material tint colours it. No lighting parameters are carried because text
//! meshes have no normals.

use crate::foundation::math::Vec3;
use crate::render::resources::TextureHandle;

/// Unlit, alpha-blended material sampling a single texture
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Texture sampled for colour and coverage
    pub base_color_texture: TextureHandle,
    /// RGB tint multiplied with the texture (0.0-1.0 range)
    pub color: Vec3,
    /// Overall opacity
    pub alpha: f32,
}

impl Material {
    /// Whether the material needs alpha blending
    pub fn is_transparent(&self) -> bool {
        // Atlas background is transparent, so text always blends
        true
    }
}

/// Create an unlit text material for a font atlas texture
///
/// # Example
///
/// ```no_run
/// # use text_engine::render::{create_text_material, TextureHandle};
/// # use text_engine::foundation::math::Vec3;
/// # let atlas_texture = TextureHandle::default();
/// let white = Vec3::new(1.0, 1.0, 1.0);
/// let material = create_text_material(atlas_texture, white);
/// ```
pub fn create_text_material(font_atlas_texture: TextureHandle, color: Vec3) -> Material {
    Material {
        base_color_texture: font_atlas_texture,
        color,
        alpha: 1.0,
    }
}

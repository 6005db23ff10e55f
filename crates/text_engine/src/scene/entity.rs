//! Scene entity with an exclusively owned, replaceable mesh

use crate::foundation::math::{Mat4, Transform};
use crate::render::primitives::Mesh;
use crate::render::resources::GraphicsBackend;

/// Placeable object in the scene
#[derive(Debug)]
pub struct SceneEntity {
    /// Placement in world space
    pub transform: Transform,

    /// Whether the entity should be drawn
    pub visible: bool,

    mesh: Option<Mesh>,
}

impl Default for SceneEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEntity {
    /// Create a visible entity with no mesh at the origin
    pub fn new() -> Self {
        Self {
            transform: Transform::identity(),
            visible: true,
            mesh: None,
        }
    }

    /// Create a visible entity with the given transform
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::new()
        }
    }

    /// Mesh currently attached
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Mutable access to the attached mesh (material changes)
    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.mesh.as_mut()
    }

    /// World matrix for drawing
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Whether there is anything to draw
    pub fn should_render(&self) -> bool {
        self.visible && self.mesh.as_ref().is_some_and(|m| m.triangle_count() > 0)
    }

    /// Release the current mesh's GPU buffers and detach it
    ///
    /// Returns the detached mesh with its CPU-side geometry intact.
    pub fn release_mesh(&mut self, backend: &mut dyn GraphicsBackend) -> Option<Mesh> {
        let mut old = self.mesh.take()?;
        old.delete_buffers(backend);
        Some(old)
    }

    /// Swap in a new mesh
    ///
    /// Two explicit steps: the old mesh's buffers are released first, then
    /// the new mesh is installed.
    pub fn replace_mesh(&mut self, mesh: Mesh, backend: &mut dyn GraphicsBackend) {
        self.release_mesh(backend);
        self.mesh = Some(mesh);
    }
}

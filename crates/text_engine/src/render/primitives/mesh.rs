//! Mesh representation for renderable geometry
//!
//! A [`Mesh`] keeps its vertex attributes in parallel, tightly packed
//! buffers (positions: 3 floats per vertex, texture coordinates: 2 floats
//! per vertex, normals: 3 floats per vertex or empty) plus a triangle index
//! buffer. This is the layout the text builders emit and the layout the
//! backend uploads, so no interleaving step sits in between.
//!
//! GPU-side storage is tracked by an optional [`MeshBufferHandle`]. Nothing
//! reclaims those buffers automatically: whoever replaces a mesh must call
//! [`Mesh::delete_buffers`] on the old one before dropping it.

use crate::render::material::Material;
use crate::render::resources::{BackendError, GraphicsBackend, MeshBufferHandle};

/// Geometry plus the material and GPU buffers that go with it
#[derive(Debug)]
pub struct Mesh {
    positions: Vec<f32>,
    tex_coords: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    material: Option<Material>,
    buffers: Option<MeshBufferHandle>,
}

impl Mesh {
    /// Floats per position
    pub const POSITION_COMPONENTS: usize = 3;
    /// Floats per texture coordinate
    pub const TEX_COORD_COMPONENTS: usize = 2;

    /// Create a new mesh from parallel attribute buffers
    ///
    /// `normals` may be empty for geometry that is not lit.
    pub fn new(positions: Vec<f32>, tex_coords: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len() % Self::POSITION_COMPONENTS, 0);
        debug_assert_eq!(
            tex_coords.len() / Self::TEX_COORD_COMPONENTS,
            positions.len() / Self::POSITION_COMPONENTS
        );
        Self {
            positions,
            tex_coords,
            normals,
            indices,
            material: None,
            buffers: None,
        }
    }

    /// Vertex positions, xyz per vertex
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Texture coordinates, uv per vertex
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Vertex normals (empty when lighting is not modelled)
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / Self::POSITION_COMPONENTS
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Attach the material used to draw this mesh
    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }

    /// Material used to draw this mesh, if any
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Mutable access to the material, for tint changes
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        self.material.as_mut()
    }

    /// GPU buffers currently backing this mesh
    pub fn buffers(&self) -> Option<MeshBufferHandle> {
        self.buffers
    }

    /// Whether GPU buffers are currently allocated
    pub fn is_uploaded(&self) -> bool {
        self.buffers.is_some()
    }

    /// Create GPU buffers for this mesh
    ///
    /// Uploading an already uploaded mesh returns the existing handle.
    pub fn upload(&mut self, backend: &mut dyn GraphicsBackend) -> Result<MeshBufferHandle, BackendError> {
        if let Some(handle) = self.buffers {
            return Ok(handle);
        }
        let handle = backend.create_mesh_buffers(self)?;
        log::trace!("Mesh uploaded: {} vertices, {} indices", self.vertex_count(), self.indices.len());
        self.buffers = Some(handle);
        Ok(handle)
    }

    /// Release the GPU buffers backing this mesh
    ///
    /// The CPU-side geometry stays intact. Calling this on a mesh without
    /// buffers does nothing.
    pub fn delete_buffers(&mut self, backend: &mut dyn GraphicsBackend) {
        if let Some(handle) = self.buffers.take() {
            backend.delete_mesh_buffers(handle);
            log::trace!("Mesh buffers released: {:?}", handle);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        if let Some(handle) = self.buffers {
            log::warn!("Mesh dropped without releasing GPU buffers {:?}", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::resources::HeadlessBackend;

    fn quad() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            Vec::new(),
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.normals().is_empty());
        assert!(mesh.material().is_none());
    }

    #[test]
    fn test_upload_is_idempotent_and_delete_releases() {
        let mut backend = HeadlessBackend::new();
        let mut mesh = quad();

        let first = mesh.upload(&mut backend).unwrap();
        let second = mesh.upload(&mut backend).unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.live_mesh_count(), 1);

        mesh.delete_buffers(&mut backend);
        assert!(!mesh.is_uploaded());
        assert_eq!(backend.live_mesh_count(), 0);

        // Second release is a no-op
        mesh.delete_buffers(&mut backend);
        assert_eq!(backend.live_mesh_count(), 0);
        assert_eq!(mesh.vertex_count(), 4);
    }
}

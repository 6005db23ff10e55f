//! CPU-side backend
//!
//! Stores decoded textures and packed mesh buffers in slot maps so that
//! handles behave like real GPU handles: stale after release, never reused
//! for a different resource. Every create/delete is also appended to an
//! event log, which lets callers check release ordering.

use slotmap::SlotMap;

use super::backend::{BackendError, GraphicsBackend, MeshBufferHandle, TextureHandle};
use crate::assets::ImageData;
use crate::render::primitives::Mesh;

/// Packed copy of a mesh as it would sit in GPU memory
#[derive(Debug, Clone)]
pub struct StoredMeshBuffers {
    /// Positions then texture coordinates then normals, as raw bytes
    pub vertex_bytes: Vec<u8>,
    /// Index buffer as raw bytes
    pub index_bytes: Vec<u8>,
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of indices
    pub index_count: usize,
}

/// Resource lifecycle events, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    /// A texture was uploaded
    TextureUploaded(TextureHandle),
    /// Mesh buffers were allocated
    MeshCreated(MeshBufferHandle),
    /// Mesh buffers were released
    MeshDeleted(MeshBufferHandle),
}

/// Backend that keeps every resource in host memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    textures: SlotMap<TextureHandle, ImageData>,
    meshes: SlotMap<MeshBufferHandle, StoredMeshBuffers>,
    events: Vec<BackendEvent>,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded texture for a handle
    pub fn texture(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.textures.get(handle)
    }

    /// Stored buffers for a live mesh handle
    pub fn mesh_buffers(&self, handle: MeshBufferHandle) -> Option<&StoredMeshBuffers> {
        self.meshes.get(handle)
    }

    /// Number of mesh buffer sets not yet released
    pub fn live_mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of uploaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Lifecycle events so far
    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn upload_texture(&mut self, encoded_image: &[u8]) -> Result<TextureHandle, BackendError> {
        let image = ImageData::from_bytes(encoded_image)
            .map_err(|e| BackendError::TextureUpload(e.to_string()))?;
        log::debug!("Texture uploaded: {}x{}, {} bytes", image.width, image.height, image.size_bytes());

        let handle = self.textures.insert(image);
        self.events.push(BackendEvent::TextureUploaded(handle));
        Ok(handle)
    }

    fn create_mesh_buffers(&mut self, mesh: &Mesh) -> Result<MeshBufferHandle, BackendError> {
        let vertex_count = mesh.vertex_count();
        if let Some(&bad) = mesh.indices().iter().find(|&&i| i as usize >= vertex_count) {
            return Err(BackendError::MeshUpload(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }

        let mut vertex_bytes = Vec::with_capacity(
            (mesh.positions().len() + mesh.tex_coords().len() + mesh.normals().len()) * 4,
        );
        vertex_bytes.extend_from_slice(bytemuck::cast_slice(mesh.positions()));
        vertex_bytes.extend_from_slice(bytemuck::cast_slice(mesh.tex_coords()));
        vertex_bytes.extend_from_slice(bytemuck::cast_slice(mesh.normals()));

        let handle = self.meshes.insert(StoredMeshBuffers {
            vertex_bytes,
            index_bytes: bytemuck::cast_slice(mesh.indices()).to_vec(),
            vertex_count,
            index_count: mesh.indices().len(),
        });
        self.events.push(BackendEvent::MeshCreated(handle));
        Ok(handle)
    }

    fn delete_mesh_buffers(&mut self, handle: MeshBufferHandle) {
        if self.meshes.remove(handle).is_some() {
            self.events.push(BackendEvent::MeshDeleted(handle));
        } else {
            log::warn!("Release of unknown mesh buffers {:?}", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_texture_upload_decodes_png() {
        let mut backend = HeadlessBackend::new();
        let png = ImageData::encode_png(&RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 4]))).unwrap();

        let handle = backend.upload_texture(&png).unwrap();
        let texture = backend.texture(handle).unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.pixel(3, 1), Some([1, 2, 3, 4]));
        assert_eq!(backend.events(), &[BackendEvent::TextureUploaded(handle)]);
    }

    #[test]
    fn test_texture_upload_rejects_garbage() {
        let mut backend = HeadlessBackend::new();
        assert!(matches!(
            backend.upload_texture(&[0, 1, 2, 3]),
            Err(BackendError::TextureUpload(_))
        ));
        assert_eq!(backend.texture_count(), 0);
    }

    #[test]
    fn test_mesh_buffers_pack_attributes() {
        let mut backend = HeadlessBackend::new();
        let mesh = Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            Vec::new(),
            vec![0, 1, 2],
        );

        let handle = backend.create_mesh_buffers(&mesh).unwrap();
        let stored = backend.mesh_buffers(handle).unwrap();
        assert_eq!(stored.vertex_bytes.len(), (9 + 6) * 4);
        assert_eq!(stored.index_bytes.len(), 3 * 4);
        assert_eq!(stored.vertex_count, 3);

        backend.delete_mesh_buffers(handle);
        assert!(backend.mesh_buffers(handle).is_none());
        assert_eq!(
            backend.events(),
            &[BackendEvent::MeshCreated(handle), BackendEvent::MeshDeleted(handle)]
        );
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut backend = HeadlessBackend::new();
        let mesh = Mesh::new(vec![0.0; 3], vec![0.0; 2], Vec::new(), vec![0, 0, 5]);
        assert!(matches!(
            backend.create_mesh_buffers(&mesh),
            Err(BackendError::MeshUpload(_))
        ));
    }
}

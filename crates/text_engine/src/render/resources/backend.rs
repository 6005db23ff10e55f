//! Backend trait and opaque resource handles

use thiserror::Error;

use crate::render::primitives::Mesh;

slotmap::new_key_type! {
    /// Handle for a GPU texture resource
    pub struct TextureHandle;

    /// Handle for the vertex and index buffers of one uploaded mesh
    pub struct MeshBufferHandle;
}

/// Errors raised while creating GPU resources
#[derive(Error, Debug)]
pub enum BackendError {
    /// Texture bytes could not be decoded or uploaded
    #[error("Texture upload failed: {0}")]
    TextureUpload(String),

    /// Mesh buffers could not be allocated
    #[error("Mesh buffer creation failed: {0}")]
    MeshUpload(String),
}

/// Creates and releases GPU resources on behalf of text builders
pub trait GraphicsBackend {
    /// Upload an encoded image (PNG) and return its texture handle
    fn upload_texture(&mut self, encoded_image: &[u8]) -> Result<TextureHandle, BackendError>;

    /// Allocate vertex and index buffers for a mesh
    fn create_mesh_buffers(&mut self, mesh: &Mesh) -> Result<MeshBufferHandle, BackendError>;

    /// Release buffers previously returned by [`Self::create_mesh_buffers`]
    fn delete_mesh_buffers(&mut self, handle: MeshBufferHandle);
}

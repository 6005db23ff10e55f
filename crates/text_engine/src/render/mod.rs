//! Rendering-side resources for text
//!
//! The renderer proper (pipelines, swapchain, draw submission) lives outside
//! this crate. What lives here is the boundary it consumes: meshes with
//! parallel attribute buffers, text materials, opaque GPU handles, and the
//! [`GraphicsBackend`] trait that creates and releases them.

pub mod primitives;
pub mod material;
pub mod resources;
pub mod text;

pub use primitives::Mesh;
pub use material::{create_text_material, Material};
pub use resources::{
    BackendError, BackendEvent, GraphicsBackend, HeadlessBackend, MeshBufferHandle, TextureHandle,
};

//! GPU resource boundary
//!
//! [`GraphicsBackend`] is the seam between text construction and whatever
//! owns GPU memory. [`HeadlessBackend`] satisfies it on the CPU for tools and
//! tests.

mod backend;
mod headless;

pub use backend::{BackendError, GraphicsBackend, MeshBufferHandle, TextureHandle};
pub use headless::{BackendEvent, HeadlessBackend, StoredMeshBuffers};

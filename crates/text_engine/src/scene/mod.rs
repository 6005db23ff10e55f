//! Scene entities that carry renderable meshes
//!
//! Entities own their mesh outright. Anything that swaps meshes at runtime
//! (text items rebuilding on every text change) goes through
//! [`SceneEntity::replace_mesh`], which releases the old mesh's GPU buffers
//! before installing the new one.

mod entity;
mod text_item;

pub use entity::SceneEntity;
pub use text_item::TextItem;

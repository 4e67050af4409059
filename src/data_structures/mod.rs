//! Scene data structures: transforms, primitive meshes and textures.
//!
//! - `instance` holds the per-draw transformation of a primitive
//! - `mesh` generates the five primitive shapes and their GPU buffers
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod instance;
pub mod mesh;
pub mod texture;

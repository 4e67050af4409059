//! desk-scene
//!
//! A small wgpu renderer for a fixed 3D desk scene built from primitive
//! meshes: a desk against a brick wall, a shelf, a mug, a stack of books, a
//! lamp and a pen holder. Scene logic drives the renderer only through named
//! shader uniforms, so it runs the same against the GPU and against a
//! recording renderer in tests.
//!
//! High-level modules
//! - `camera`: fixed scene camera, projection and camera uniform
//! - `config`: start-up settings (asset directory, window size)
//! - `context`: window surface, device, queue and depth buffer
//! - `data_structures`: transforms, primitive meshes and GPU textures
//! - `error`: texture loading errors
//! - `flow`: window event loop
//! - `pipelines`: the scene render pipeline
//! - `render`: renderer traits, per-draw records, GPU and headless renderers
//! - `resources`: image file decoding
//! - `scene`: texture/material registries and the scene composer
//! - `shader`: uniform names and the uniform setter interface
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use error::TextureError;
pub use scene::SceneManager;

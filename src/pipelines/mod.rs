//! Render pipeline definitions.
//!
//! The scene needs a single pipeline: `basic`, which draws lit primitives with
//! an optional colour texture.

pub mod basic;

//! A renderer that records instead of drawing.
//!
//! Useful wherever a GPU is not available: every uniform write lands in a
//! [`UniformState`], textures only keep their dimensions, and each draw is
//! kept as a [`DrawCall`] for inspection.

use std::collections::{BTreeMap, BTreeSet};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::{
    data_structures::mesh::MeshKind,
    render::{DrawCall, LightsUniform, MeshLibrary, ObjectUniform, TextureDevice},
    resources::DecodedImage,
    shader::{ShaderUniforms, UniformState},
};

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub uniforms: UniformState,
    pub textures: BTreeMap<u32, RecordedTexture>,
    /// Texture unit -> handle.
    pub units: BTreeMap<usize, u32>,
    pub destroyed: Vec<u32>,
    pub loaded_meshes: BTreeSet<MeshKind>,
    pub draws: Vec<DrawCall>,
    next_handle: u32,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light array as the shader would currently see it.
    pub fn lights(&self) -> LightsUniform {
        LightsUniform::from_state(&self.uniforms)
    }

    /// Forget recorded draws, e.g. between frames.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl ShaderUniforms for HeadlessRenderer {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.uniforms.set_mat4(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.uniforms.set_vec2(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.uniforms.set_vec3(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.uniforms.set_vec4(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.uniforms.set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.uniforms.set_bool(name, value);
    }
}

impl TextureDevice for HeadlessRenderer {
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<u32> {
        // handle 0 is never handed out, as in GL
        self.next_handle += 1;
        self.textures.insert(
            self.next_handle,
            RecordedTexture {
                label: label.to_string(),
                width: image.width,
                height: image.height,
                channels: image.channels,
            },
        );
        Ok(self.next_handle)
    }

    fn bind_texture(&mut self, unit: usize, handle: u32) {
        self.units.insert(unit, handle);
    }

    fn destroy_texture(&mut self, handle: u32) {
        if self.textures.remove(&handle).is_some() {
            self.units.retain(|_, bound| *bound != handle);
            self.destroyed.push(handle);
        } else {
            log::warn!("Destroying unknown texture handle {handle}");
        }
    }
}

impl MeshLibrary for HeadlessRenderer {
    fn load_mesh(&mut self, kind: MeshKind) {
        self.loaded_meshes.insert(kind);
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        if !self.loaded_meshes.contains(&kind) {
            log::warn!("Drawing {} before it was loaded", kind.name());
        }
        self.draws.push(DrawCall {
            mesh: kind,
            object: ObjectUniform::from_state(&self.uniforms),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader;

    fn image() -> DecodedImage {
        DecodedImage {
            width: 2,
            height: 2,
            channels: 3,
            pixels: vec![0; 12],
        }
    }

    #[test]
    fn handles_start_at_one_and_increase() {
        let mut renderer = HeadlessRenderer::new();
        assert_eq!(renderer.create_texture(&image(), "a").unwrap(), 1);
        assert_eq!(renderer.create_texture(&image(), "b").unwrap(), 2);
    }

    #[test]
    fn destroying_a_texture_unbinds_it() {
        let mut renderer = HeadlessRenderer::new();
        let handle = renderer.create_texture(&image(), "a").unwrap();
        renderer.bind_texture(0, handle);
        renderer.destroy_texture(handle);
        assert!(renderer.units.is_empty());
        assert_eq!(renderer.destroyed, vec![handle]);
    }

    #[test]
    fn draws_snapshot_the_uniforms_at_draw_time() {
        let mut renderer = HeadlessRenderer::new();
        renderer.load_mesh(MeshKind::Box);
        renderer.set_vec2(shader::UV_SCALE, Vector2::new(2.0, 2.0));
        renderer.draw_mesh(MeshKind::Box);
        renderer.set_vec2(shader::UV_SCALE, Vector2::new(7.0, 3.0));
        renderer.draw_mesh(MeshKind::Box);
        assert_eq!(renderer.draws[0].object.uv_scale, [2.0, 2.0]);
        assert_eq!(renderer.draws[1].object.uv_scale, [7.0, 3.0]);
    }
}

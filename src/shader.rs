//! Shader uniform interface.
//!
//! The scene talks to the shader exclusively through named uniforms, the way a
//! GLSL program would be driven. [`ShaderUniforms`] is that contract and
//! [`UniformState`] is the in-memory store every renderer in this crate keeps
//! behind it. Values written here persist until they are overwritten, so a
//! draw sees whatever the previous draws left behind unless the caller resets
//! it.

use std::collections::HashMap;

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of light slots the shader declares.
pub const MAX_LIGHTS: usize = 2;

/// Uniform name of a field of `lightSources[index]`, e.g. `lightSources[1].position`.
pub fn light_uniform(index: usize, field: &str) -> String {
    format!("lightSources[{index}].{field}")
}

/// Setter side of a shader program's uniforms.
pub trait ShaderUniforms {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Float(f32),
    Int(i32),
    Bool(bool),
}

/// Last written value of every uniform, plus a count of writes.
#[derive(Clone, Debug, Default)]
pub struct UniformState {
    values: HashMap<String, UniformValue>,
    writes: usize,
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    /// Total number of setter calls received so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Mat4(m)) => Some(*m),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vector2<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<Vector4<f32>> {
        match self.values.get(name) {
            Some(UniformValue::Vec4(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(UniformValue::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.values.get(name) {
            Some(UniformValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Booleans may arrive either through `set_bool` or as a non-zero `set_int`,
    /// as GLSL treats both the same.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(UniformValue::Bool(b)) => Some(*b),
            Some(UniformValue::Int(i)) => Some(*i != 0),
            _ => None,
        }
    }

    fn insert(&mut self, name: &str, value: UniformValue) {
        self.writes += 1;
        self.values.insert(name.to_string(), value);
    }
}

impl ShaderUniforms for UniformState {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.insert(name, UniformValue::Mat4(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.insert(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.insert(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.insert(name, UniformValue::Vec4(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.insert(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.insert(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.insert(name, UniformValue::Bool(value));
    }
}

//! Renderer seams and per-draw records.
//!
//! The scene drives a renderer through three traits: [`ShaderUniforms`] for
//! uniform writes, [`TextureDevice`] for texture memory and units, and
//! [`MeshLibrary`] for primitive geometry. Anything implementing all three is
//! a [`Renderer`].
//!
//! Uniform writes persist across draws, so at every `draw_mesh` a renderer
//! takes a full snapshot of the uniform state into a [`DrawCall`]. That
//! snapshot is the only thing a draw consumes; nothing reads the live state
//! afterwards.
//!
//! # Key types
//!
//! - [`DrawCall`] is one primitive draw with everything it depends on
//! - [`ObjectUniform`] is the GPU layout of the per-draw uniform block
//! - [`LightsUniform`] is the GPU layout of the light array
//! - [`headless::HeadlessRenderer`] records instead of drawing
//! - [`gpu::GpuRenderer`] draws with wgpu

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::{
    data_structures::{instance::normal_matrix, mesh::MeshKind},
    resources::DecodedImage,
    shader::{self, ShaderUniforms, UniformState},
};

pub mod gpu;
pub mod headless;

/// Device-side texture memory and texture units.
pub trait TextureDevice {
    /// Upload an image and return the handle naming it.
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<u32>;
    /// Attach a texture to a unit for sampling.
    fn bind_texture(&mut self, unit: usize, handle: u32);
    fn destroy_texture(&mut self, handle: u32);
}

/// Primitive geometry, generated once per kind and drawn with the current uniforms.
pub trait MeshLibrary {
    fn load_mesh(&mut self, kind: MeshKind);
    fn draw_mesh(&mut self, kind: MeshKind);
}

pub trait Renderer: ShaderUniforms + TextureDevice + MeshLibrary {}

impl<T: ShaderUniforms + TextureDevice + MeshLibrary> Renderer for T {}

/// One draw of one primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub object: ObjectUniform,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: f32,
}

impl MaterialUniform {
    /// Reads `material.*`; fields never written stay zero, like an
    /// unassigned GLSL uniform.
    pub fn from_state(state: &UniformState) -> Self {
        let vec3 = |name: &str| -> [f32; 3] {
            state.vec3(name).map(Into::into).unwrap_or([0.0; 3])
        };
        Self {
            ambient_color: vec3(shader::MATERIAL_AMBIENT_COLOR),
            ambient_strength: state.float(shader::MATERIAL_AMBIENT_STRENGTH).unwrap_or(0.0),
            diffuse_color: vec3(shader::MATERIAL_DIFFUSE_COLOR),
            shininess: state.float(shader::MATERIAL_SHININESS).unwrap_or(0.0),
            specular_color: vec3(shader::MATERIAL_SPECULAR_COLOR),
            _padding: 0.0,
        }
    }
}

/// Per-draw uniform block, mirrored by `Object` in `basic.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub use_lighting: u32,
    pub material: MaterialUniform,
    /// Texture unit to sample, or -1.
    pub texture_unit: i32,
    _padding: [u32; 3],
}

impl ObjectUniform {
    /// Snapshot of everything a draw depends on.
    ///
    /// Texturing is only enabled when `bUseTexture` is set *and*
    /// `objectTexture` names a unit; a tag that failed to load (`-1`) renders
    /// in the flat `objectColor`. `UVscale` defaults to (1, 1).
    pub fn from_state(state: &UniformState) -> Self {
        let model = state.mat4(shader::MODEL).unwrap_or_else(Matrix4::identity);
        let texture_unit = state.int(shader::OBJECT_TEXTURE).unwrap_or(-1);
        let use_texture = state.flag(shader::USE_TEXTURE).unwrap_or(false) && texture_unit >= 0;
        Self {
            model: model.into(),
            normal: normal_matrix(model).into(),
            color: state
                .vec4(shader::OBJECT_COLOR)
                .unwrap_or(Vector4::new(1.0, 1.0, 1.0, 1.0))
                .into(),
            uv_scale: state
                .vec2(shader::UV_SCALE)
                .unwrap_or(Vector2::new(1.0, 1.0))
                .into(),
            use_texture: use_texture as u32,
            use_lighting: state.flag(shader::USE_LIGHTING).unwrap_or(false) as u32,
            material: MaterialUniform::from_state(state),
            texture_unit: if use_texture { texture_unit } else { -1 },
            _padding: [0; 3],
        }
    }

    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model.into()
    }
}

/// One entry of `lightSources[]`, mirrored by `Light` in `basic.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    _padding: f32,
    pub specular_color: [f32; 3],
    _padding2: f32,
}

impl LightUniform {
    pub fn from_state(state: &UniformState, index: usize) -> Self {
        let vec3 = |field: &str| -> [f32; 3] {
            state
                .vec3(&shader::light_uniform(index, field))
                .unwrap_or(Vector3::new(0.0, 0.0, 0.0))
                .into()
        };
        let float = |field: &str| -> f32 {
            state
                .float(&shader::light_uniform(index, field))
                .unwrap_or(0.0)
        };
        Self {
            position: vec3("position"),
            focal_strength: float("focalStrength"),
            ambient_color: vec3("ambientColor"),
            specular_intensity: float("specularIntensity"),
            diffuse_color: vec3("diffuseColor"),
            _padding: 0.0,
            specular_color: vec3("specularColor"),
            _padding2: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; shader::MAX_LIGHTS],
}

impl LightsUniform {
    pub fn from_state(state: &UniformState) -> Self {
        Self {
            lights: std::array::from_fn(|index| LightUniform::from_state(state, index)),
        }
    }
}

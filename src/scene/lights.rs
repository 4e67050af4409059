use cgmath::Vector3;

use crate::shader::{self, ShaderUniforms};

/// One entry of the shader's `lightSources[]` array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl LightSource {
    pub fn apply<U: ShaderUniforms + ?Sized>(&self, index: usize, uniforms: &mut U) {
        let name = |field: &str| shader::light_uniform(index, field);
        uniforms.set_vec3(&name("position"), self.position);
        uniforms.set_vec3(&name("ambientColor"), self.ambient_color);
        uniforms.set_vec3(&name("diffuseColor"), self.diffuse_color);
        uniforms.set_vec3(&name("specularColor"), self.specular_color);
        uniforms.set_float(&name("focalStrength"), self.focal_strength);
        uniforms.set_float(&name("specularIntensity"), self.specular_intensity);
    }
}

/// A dim white light above the desk and a warm orange light in front of it.
pub fn scene_lights() -> [LightSource; shader::MAX_LIGHTS] {
    [
        LightSource {
            position: Vector3::new(3.0, 6.0, 0.0),
            ambient_color: Vector3::new(0.01, 0.01, 0.01),
            diffuse_color: Vector3::new(0.01, 0.01, 0.01),
            specular_color: Vector3::new(0.1, 0.1, 0.1),
            focal_strength: 0.10,
            specular_intensity: 0.05,
        },
        LightSource {
            position: Vector3::new(0.0, 1.0, 3.0),
            ambient_color: Vector3::new(0.08, 0.08, 0.113),
            diffuse_color: Vector3::new(0.568, 0.388, 0.133),
            specular_color: Vector3::new(0.588, 0.408, 0.153),
            focal_strength: 20.1,
            specular_intensity: 1.01,
        },
    ]
}

/// Upload `lights` into consecutive slots and switch lighting on.
pub fn apply_lights<U: ShaderUniforms + ?Sized>(lights: &[LightSource], uniforms: &mut U) {
    if lights.len() > shader::MAX_LIGHTS {
        log::warn!(
            "{} lights configured, only the first {} are used",
            lights.len(),
            shader::MAX_LIGHTS
        );
    }
    for (index, light) in lights.iter().take(shader::MAX_LIGHTS).enumerate() {
        light.apply(index, uniforms);
    }
    uniforms.set_bool(shader::USE_LIGHTING, true);
}

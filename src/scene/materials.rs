use cgmath::Vector3;

use crate::shader::{self, ShaderUniforms};

/// Scales down the ambient strength of most scene materials.
pub const AMBIENT_MULTIPLIER: f32 = 0.25;

/// Named lighting preset.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Write the five `material.*` uniforms.
    pub fn apply<U: ShaderUniforms + ?Sized>(&self, uniforms: &mut U) {
        uniforms.set_vec3(shader::MATERIAL_AMBIENT_COLOR, self.ambient_color);
        uniforms.set_float(shader::MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        uniforms.set_vec3(shader::MATERIAL_DIFFUSE_COLOR, self.diffuse_color);
        uniforms.set_vec3(shader::MATERIAL_SPECULAR_COLOR, self.specular_color);
        uniforms.set_float(shader::MATERIAL_SHININESS, self.shininess);
    }
}

/// Materials in definition order. Tags may repeat; lookups return the first.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        if self.find(&material.tag).is_some() {
            log::warn!(
                "Material {} is already defined, the new definition is shadowed",
                material.tag
            );
        }
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

fn material(
    tag: &str,
    ambient_color: [f32; 3],
    ambient_strength: f32,
    diffuse_color: [f32; 3],
    specular_color: [f32; 3],
    shininess: f32,
) -> Material {
    Material {
        tag: tag.to_string(),
        ambient_color: ambient_color.into(),
        ambient_strength,
        diffuse_color: diffuse_color.into(),
        specular_color: specular_color.into(),
        shininess,
    }
}

/// The eight materials of the desk scene, in definition order.
pub fn scene_materials() -> Vec<Material> {
    let m = AMBIENT_MULTIPLIER;
    vec![
        material("wood", [0.38, 0.26, 0.1], 0.2 * m, [0.36, 0.24, 0.12], [0.12, 0.14, 0.08], 0.3),
        // plastic is the one preset without the multiplier
        material("plastic", [0.0005; 3], 0.3, [0.05, 0.05, 0.06], [0.06, 0.05, 0.05], 0.2),
        material("rubber", [0.92, 0.24, 0.90], 0.3 * m, [0.93, 0.28, 0.92], [0.94, 0.30, 0.93], 0.0),
        material("glass", [0.7; 3], 0.1 * m, [0.84; 3], [0.92; 3], 32.0),
        material("brick", [0.8; 3], 0.2 * m, [0.84; 3], [0.92; 3], 0.1),
        material("paper", [0.8; 3], 0.3 * m, [0.84; 3], [0.92; 3], 0.1),
        material("top_cover", [0.3; 3], 0.5 * m, [0.0, 0.3, 0.3], [0.3; 3], 0.4),
        material(
            "bottom_cover",
            [0.84, 0.726, 0.012],
            0.5 * m,
            [0.89, 0.73, 0.02],
            [0.895, 0.73, 0.03],
            0.4,
        ),
    ]
}

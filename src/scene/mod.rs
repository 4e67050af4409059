//! The desk scene.
//!
//! [`SceneManager`] owns the texture and material registries and drives a
//! [`Renderer`]: it loads everything once in [`SceneManager::prepare_scene`]
//! and replays the object tables of [`objects::SCENE`] on every
//! [`SceneManager::render_scene`].
//!
//! # Example
//!
//! ```
//! use desk_scene::{config::SceneConfig, render::headless::HeadlessRenderer, scene::SceneManager};
//!
//! let mut scene = SceneManager::new(HeadlessRenderer::new(), &SceneConfig::default());
//! scene.prepare_scene();
//! scene.render_scene();
//! assert_eq!(scene.renderer().draws.len(), 28);
//! ```

use cgmath::{Vector2, Vector4};

use crate::{
    config::SceneConfig,
    data_structures::{instance::Transform, mesh::MeshKind},
    render::Renderer,
    shader,
};

pub mod lights;
pub mod materials;
pub mod objects;
pub mod textures;

use lights::LightSource;
use materials::MaterialRegistry;
use objects::{SCENE, SCENE_TEXTURES, SceneObject, Step};
use textures::TextureRegistry;

#[derive(Debug)]
pub struct SceneManager<R: Renderer> {
    renderer: R,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: Vec<LightSource>,
    config: SceneConfig,
    prepared: bool,
}

impl<R: Renderer> SceneManager<R> {
    pub fn new(renderer: R, config: &SceneConfig) -> Self {
        Self {
            renderer,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: Vec::new(),
            config: config.clone(),
            prepared: false,
        }
    }

    /// Load textures, materials, lights and meshes.
    ///
    /// Textures that fail to load are logged and skipped; objects using them
    /// are drawn in flat colour. Only the first call has any effect.
    pub fn prepare_scene(&mut self) {
        if self.prepared {
            log::warn!("Scene is already prepared, ignoring");
            return;
        }

        for (file_name, tag) in SCENE_TEXTURES {
            let path = self.config.asset(file_name);
            if let Err(e) = self.textures.load_texture(&mut self.renderer, &path, tag) {
                log::error!("Could not load texture {tag}: {e}");
            }
        }
        self.textures.bind_all(&mut self.renderer);

        for material in materials::scene_materials() {
            self.materials.define(material);
        }

        self.lights = lights::scene_lights().to_vec();
        lights::apply_lights(&self.lights, &mut self.renderer);

        for kind in MeshKind::ALL {
            self.renderer.load_mesh(kind);
        }

        log::info!(
            "Scene prepared: {} textures, {} materials, {} lights",
            self.textures.len(),
            self.materials.len(),
            self.lights.len()
        );
        self.prepared = true;
    }

    /// Draw every object of the scene in order.
    pub fn render_scene(&mut self) {
        if !self.prepared {
            log::warn!("render_scene called before prepare_scene, nothing drawn");
            return;
        }
        for object in &SCENE {
            self.draw_object(object);
        }
    }

    fn draw_object(&mut self, object: &SceneObject) {
        log::trace!("Drawing {}", object.name);
        for step in object.steps {
            match *step {
                Step::Transform(transform) => self.set_transform(&transform),
                Step::Texture(tag) => self.set_texture(tag),
                Step::Color([r, g, b, a]) => self.set_color(r, g, b, a),
                Step::UvScale(u, v) => self.set_uv_scale(u, v),
                Step::Material(tag) => self.set_material(tag),
                Step::Draw(kind) => self.renderer.draw_mesh(kind),
            }
        }
    }

    /// Upload the model matrix of `transform`.
    pub fn set_transform(&mut self, transform: &Transform) {
        self.renderer.set_mat4(shader::MODEL, transform.to_matrix());
    }

    /// Draw the following meshes in a flat colour.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.renderer.set_bool(shader::USE_TEXTURE, false);
        self.renderer
            .set_vec4(shader::OBJECT_COLOR, Vector4::new(r, g, b, a));
    }

    /// Sample the texture registered as `tag`; an unknown tag uploads slot -1.
    pub fn set_texture(&mut self, tag: &str) {
        let slot = self.textures.find_slot(tag);
        if slot.is_none() {
            log::debug!("Texture {tag} is not loaded");
        }
        let slot = slot.and_then(|slot| i32::try_from(slot).ok()).unwrap_or(-1);
        self.renderer.set_bool(shader::USE_TEXTURE, true);
        self.renderer.set_int(shader::OBJECT_TEXTURE, slot);
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.renderer.set_vec2(shader::UV_SCALE, Vector2::new(u, v));
    }

    /// Upload the material registered as `tag`. Unknown tags write nothing.
    pub fn set_material(&mut self, tag: &str) {
        match self.materials.find(tag) {
            Some(material) => material.apply(&mut self.renderer),
            None => log::trace!("Material {tag} is not defined, keeping the current one"),
        }
    }

    /// Destroy all loaded textures.
    pub fn release_textures(&mut self) {
        self.textures.release_all(&mut self.renderer);
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

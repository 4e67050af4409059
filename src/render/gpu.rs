//! wgpu implementation of the renderer traits.
//!
//! Draws are collected while the scene runs and encoded afterwards: each
//! [`DrawCall`] gets its own object uniform buffer, so later uniform writes
//! never alter a draw that was already issued.

use std::collections::HashMap;

use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        mesh::{Mesh, MeshKind},
        texture::{Texture, create_repeat_sampler},
    },
    pipelines::basic::{
        self, CAMERA_GROUP, LIGHTS_GROUP, OBJECT_GROUP, TEXTURE_GROUP, texture_bind_group,
        texture_layout, uniform_bind_group, uniform_layout,
    },
    render::{DrawCall, LightsUniform, MeshLibrary, ObjectUniform, TextureDevice},
    resources::DecodedImage,
    shader::{ShaderUniforms, UniformState},
};

struct GpuTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    uniforms: UniformState,
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    /// Shared by every colour texture.
    sampler: wgpu::Sampler,
    object_layout: wgpu::BindGroupLayout,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    white: GpuTexture,
    textures: HashMap<u32, GpuTexture>,
    /// Texture unit -> handle.
    units: Vec<Option<u32>>,
    next_handle: u32,
    meshes: HashMap<MeshKind, Mesh>,
    draws: Vec<DrawCall>,
    object_slots: Vec<ObjectSlot>,
}

impl std::fmt::Debug for GpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuRenderer")
            .field("textures", &self.textures.len())
            .field("units", &self.units)
            .field("meshes", &self.meshes.keys().collect::<Vec<_>>())
            .field("draws", &self.draws.len())
            .finish()
    }
}

impl GpuRenderer {
    pub fn new(ctx: &Context) -> Self {
        let device = ctx.device.clone();
        let queue = ctx.queue.clone();

        let texture_layout = texture_layout(&device);
        let lights_layout = uniform_layout(&device, "lights_bind_group_layout");
        let object_layout = uniform_layout(&device, "object_bind_group_layout");
        let pipeline = basic::mk_basic_pipeline(
            &device,
            ctx.config.format,
            &texture_layout,
            &ctx.camera.bind_group_layout,
            &lights_layout,
            &object_layout,
        );

        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::from_state(&UniformState::new())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_bind_group =
            uniform_bind_group(&device, &lights_layout, &lights_buffer, "lights_bind_group");

        let sampler = create_repeat_sampler(&device);
        let white = Texture::create_white(&device, &queue);
        let white = GpuTexture {
            bind_group: texture_bind_group(
                &device,
                &texture_layout,
                &white,
                &sampler,
                "white_bind_group",
            ),
            texture: white,
        };

        Self {
            device,
            queue,
            uniforms: UniformState::new(),
            pipeline,
            texture_layout,
            sampler,
            object_layout,
            lights_buffer,
            lights_bind_group,
            white,
            textures: HashMap::new(),
            units: Vec::new(),
            next_handle: 0,
            meshes: HashMap::new(),
            draws: Vec::new(),
            object_slots: Vec::new(),
        }
    }

    /// Drop the draws of the previous frame. Uniform state is kept.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    /// Upload this frame's uniforms and record every collected draw into `render_pass`.
    pub fn encode(&mut self, render_pass: &mut wgpu::RenderPass<'_>, camera: &wgpu::BindGroup) {
        let lights = LightsUniform::from_state(&self.uniforms);
        self.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[lights]));

        while self.object_slots.len() < self.draws.len() {
            let slot = self.object_slot(self.object_slots.len());
            self.object_slots.push(slot);
        }
        for (draw, slot) in self.draws.iter().zip(&self.object_slots) {
            self.queue
                .write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&[draw.object]));
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(CAMERA_GROUP, camera, &[]);
        render_pass.set_bind_group(LIGHTS_GROUP, &self.lights_bind_group, &[]);

        for (draw, slot) in self.draws.iter().zip(&self.object_slots) {
            let Some(mesh) = self.meshes.get(&draw.mesh) else {
                log::warn!("Skipping draw of {}: mesh was never loaded", draw.mesh.name());
                continue;
            };
            render_pass.set_bind_group(TEXTURE_GROUP, self.texture_for(&draw.object), &[]);
            render_pass.set_bind_group(OBJECT_GROUP, &slot.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }

    fn texture_for(&self, object: &ObjectUniform) -> &wgpu::BindGroup {
        if !object.uses_texture() {
            return &self.white.bind_group;
        }
        usize::try_from(object.texture_unit)
            .ok()
            .and_then(|unit| self.units.get(unit).copied().flatten())
            .and_then(|handle| self.textures.get(&handle))
            .map_or(&self.white.bind_group, |texture| &texture.bind_group)
    }

    fn object_slot(&self, index: usize) -> ObjectSlot {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("Object Buffer {index}")),
            size: std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = uniform_bind_group(
            &self.device,
            &self.object_layout,
            &buffer,
            &format!("object_bind_group_{index}"),
        );
        ObjectSlot { buffer, bind_group }
    }
}

impl ShaderUniforms for GpuRenderer {
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

impl TextureDevice for GpuRenderer {
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<u32> {
        let texture = Texture::from_decoded(&self.device, &self.queue, image, label)?;
        let bind_group = texture_bind_group(
            &self.device,
            &self.texture_layout,
            &texture,
            &self.sampler,
            label,
        );
        self.next_handle += 1;
        self.textures
            .insert(self.next_handle, GpuTexture { texture, bind_group });
        log::debug!(
            "Uploaded texture {label} ({}x{}) as handle {}",
            image.width,
            image.height,
            self.next_handle
        );
        Ok(self.next_handle)
    }

    fn bind_texture(&mut self, unit: usize, handle: u32) {
        if !self.textures.contains_key(&handle) {
            log::warn!("Binding unknown texture handle {handle} to unit {unit}");
            return;
        }
        if self.units.len() <= unit {
            self.units.resize(unit + 1, None);
        }
        self.units[unit] = Some(handle);
    }

    fn destroy_texture(&mut self, handle: u32) {
        match self.textures.remove(&handle) {
            Some(gpu) => {
                for bound in self.units.iter_mut().filter(|bound| **bound == Some(handle)) {
                    *bound = None;
                }
                gpu.texture.texture.destroy();
            }
            None => log::warn!("Destroying unknown texture handle {handle}"),
        }
    }
}

impl MeshLibrary for GpuRenderer {
    fn load_mesh(&mut self, kind: MeshKind) {
        let device = &self.device;
        self.meshes
            .entry(kind)
            .or_insert_with(|| Mesh::new(device, kind));
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        self.draws.push(DrawCall {
            mesh: kind,
            object: ObjectUniform::from_state(&self.uniforms),
        });
    }
}

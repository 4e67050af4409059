//! Primitive meshes: vertex layout, geometry generation and GPU buffers.
//!
//! Every primitive is generated once in model space and reused for all draws
//! of that kind; the per-draw [`Transform`](super::instance::Transform) does
//! the placing. Conventions (sizes, which end of a cylinder sits on the
//! origin) are relied on by the scene tables, so changing them moves furniture.

use std::f32::consts::PI;

use wgpu::util::DeviceExt;

/// Number of segments around the circumference of round primitives.
pub const RADIAL_SEGMENTS: u32 = 36;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
}

impl MeshKind {
    pub const ALL: [MeshKind; 5] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::TaperedCylinder,
        MeshKind::Cone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Plane => "plane",
            MeshKind::Box => "box",
            MeshKind::Cylinder => "cylinder",
            MeshKind::TaperedCylinder => "tapered cylinder",
            MeshKind::Cone => "cone",
        }
    }

    pub fn generate(self) -> GeometryData {
        match self {
            MeshKind::Plane => generate_plane(),
            MeshKind::Box => generate_box(),
            MeshKind::Cylinder => generate_frustum(1.0, 1.0, RADIAL_SEGMENTS),
            MeshKind::TaperedCylinder => generate_frustum(1.0, 0.5, RADIAL_SEGMENTS),
            MeshKind::Cone => generate_frustum(1.0, 0.0, RADIAL_SEGMENTS),
        }
    }
}

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// CPU-side triangle list.
#[derive(Clone, Debug, Default)]
pub struct GeometryData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> u32 {
        self.vertices.push(ModelVertex {
            position,
            normal,
            tex_coords,
        });
        self.vertices.len() as u32 - 1
    }

    /// Two counter-clockwise triangles over `a b c d` (in winding order).
    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, c, d, a]);
    }
}

/// 2x2 plane in XZ centred on the origin, facing +Y.
pub fn generate_plane() -> GeometryData {
    let mut data = GeometryData::new();
    let up = [0.0, 1.0, 0.0];
    let a = data.push([-1.0, 0.0, 1.0], up, [0.0, 0.0]);
    let b = data.push([1.0, 0.0, 1.0], up, [1.0, 0.0]);
    let c = data.push([1.0, 0.0, -1.0], up, [1.0, 1.0]);
    let d = data.push([-1.0, 0.0, -1.0], up, [0.0, 1.0]);
    data.quad(a, b, c, d);
    data
}

/// Unit cube centred on the origin, one quad per face.
pub fn generate_box() -> GeometryData {
    // (normal, u axis, v axis) per face; corners are normal/2 +- u/2 +- v/2
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut data = GeometryData::new();
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            [
                0.5 * (n[0] + su * u[0] + sv * v[0]),
                0.5 * (n[1] + su * u[1] + sv * v[1]),
                0.5 * (n[2] + su * u[2] + sv * v[2]),
            ]
        };
        let a = data.push(corner(-1.0, -1.0), n, [0.0, 0.0]);
        let b = data.push(corner(1.0, -1.0), n, [1.0, 0.0]);
        let c = data.push(corner(1.0, 1.0), n, [1.0, 1.0]);
        let d = data.push(corner(-1.0, 1.0), n, [0.0, 1.0]);
        data.quad(a, b, c, d);
    }
    data
}

/// Capped frustum of height 1 standing on the origin along +Y.
///
/// `top_radius == bottom_radius` is a cylinder, `top_radius == 0` is a cone
/// (no top cap is emitted for it).
pub fn generate_frustum(bottom_radius: f32, top_radius: f32, segments: u32) -> GeometryData {
    let segments = segments.max(3);
    let mut data = GeometryData::new();

    // Side normals tilt upwards by the slope of the wall.
    let slope = bottom_radius - top_radius;
    let norm = (1.0 + slope * slope).sqrt();
    let (ny, nr) = (slope / norm, 1.0 / norm);

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let theta = u * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        let normal = [nr * cos, ny, -nr * sin];
        data.push(
            [bottom_radius * cos, 0.0, -bottom_radius * sin],
            normal,
            [u, 0.0],
        );
        data.push([top_radius * cos, 1.0, -top_radius * sin], normal, [u, 1.0]);
    }
    for i in 0..segments {
        let bottom = 2 * i;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        data.quad(bottom, next_bottom, next_top, top);
    }

    cap(&mut data, bottom_radius, 0.0, [0.0, -1.0, 0.0], segments);
    if top_radius > 0.0 {
        cap(&mut data, top_radius, 1.0, [0.0, 1.0, 0.0], segments);
    }
    data
}

fn cap(data: &mut GeometryData, radius: f32, y: f32, normal: [f32; 3], segments: u32) {
    let centre = data.push([0.0, y, 0.0], normal, [0.5, 0.5]);
    let first = centre + 1;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        data.push(
            [radius * cos, y, -radius * sin],
            normal,
            [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
        );
    }
    for i in 0..segments {
        let (a, b) = (first + i, first + i + 1);
        // counter-clockwise seen from the side the normal points to
        if normal[1] > 0.0 {
            data.indices.extend_from_slice(&[centre, a, b]);
        } else {
            data.indices.extend_from_slice(&[centre, b, a]);
        }
    }
}

/// Vertex and index buffers of one primitive.
#[derive(Debug)]
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, kind: MeshKind) -> Self {
        let data = kind.generate();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", kind.name())),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", kind.name())),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
        }
    }
}

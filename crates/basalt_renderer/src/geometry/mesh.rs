use wgpu::util::DeviceExt;

use super::vertex::Vertex;

/// CPU-authored mesh description: ordered vertices plus triangle indices.
///
/// This is the shape every geometry producer (procedural generators, the
/// OBJ importer) hands to the renderer.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// GPU-resident mesh: vertex/index buffers plus their view parameters.
///
/// Uploaded once at scene build and immutable thereafter, so any number of
/// draw calls across any number of frames may read it concurrently.  Shared
/// between render items via `Arc`.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl Mesh {
    /// Uploads `data` into fresh GPU buffers.
    ///
    /// `create_buffer_init` stages the bytes and the copy is ordered before
    /// any draw that references the buffers, so the populate-before-draw
    /// requirement holds without an explicit barrier on this API.
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }
}

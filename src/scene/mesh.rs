//! CPU mesh data and GPU mesh buffers.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::framing::Aabb;

/// A single mesh vertex: position, normal, and per-vertex color.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Surface normal, normalized.
    pub normal: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x3,
    ];

    /// Vertex buffer layout matching the mesh shader's inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex list.
    pub vertices: Vec<Vertex>,
    /// Triangle-list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Smallest axis-aligned box enclosing the mesh's vertices, or `None`
    /// when the mesh has no vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        let points: Vec<Vec3> = self
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect();
        Aabb::from_points(&points)
    }

    /// Axis-aligned cube of the given edge length centered at `center`,
    /// with flat-shaded faces in a single gray color. Handy as a stand-in
    /// model for smoke tests and capture verification.
    #[must_use]
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::colored_cube(center, edge, [0.7, 0.7, 0.7])
    }

    /// Axis-aligned cube with an explicit per-vertex color.
    #[must_use]
    pub fn colored_cube(center: Vec3, edge: f32, color: [f32; 3]) -> Self {
        let h = edge / 2.0;
        // One quad per face so normals stay flat.
        let faces: [([f32; 3], [Vec3; 4]); 6] = [
            // +Z
            (
                [0.0, 0.0, 1.0],
                [
                    Vec3::new(-h, -h, h),
                    Vec3::new(h, -h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(-h, h, h),
                ],
            ),
            // -Z
            (
                [0.0, 0.0, -1.0],
                [
                    Vec3::new(h, -h, -h),
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, h, -h),
                    Vec3::new(h, h, -h),
                ],
            ),
            // +X
            (
                [1.0, 0.0, 0.0],
                [
                    Vec3::new(h, -h, h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, h, -h),
                    Vec3::new(h, h, h),
                ],
            ),
            // -X
            (
                [-1.0, 0.0, 0.0],
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(-h, -h, h),
                    Vec3::new(-h, h, h),
                    Vec3::new(-h, h, -h),
                ],
            ),
            // +Y
            (
                [0.0, 1.0, 0.0],
                [
                    Vec3::new(-h, h, h),
                    Vec3::new(h, h, h),
                    Vec3::new(h, h, -h),
                    Vec3::new(-h, h, -h),
                ],
            ),
            // -Y
            (
                [0.0, -1.0, 0.0],
                [
                    Vec3::new(-h, -h, -h),
                    Vec3::new(h, -h, -h),
                    Vec3::new(h, -h, h),
                    Vec3::new(-h, -h, h),
                ],
            ),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in &faces {
            let base = vertices.len() as u32;
            for corner in corners {
                vertices.push(Vertex {
                    position: (center + *corner).to_array(),
                    normal: *normal,
                    color,
                });
            }
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base,
                base + 2,
                base + 3,
            ]);
        }
        Self { vertices, indices }
    }
}

/// A mesh uploaded to the GPU: vertex and index buffers plus the index
/// count.
pub struct GpuMesh {
    /// Vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer (`u32` indices).
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload CPU mesh data into GPU buffers.
    #[must_use]
    pub fn upload(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    /// Set buffers and draw the whole mesh. Caller must have set the
    /// pipeline and bind groups.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_bounds_match_edge_and_center() {
        let mesh = MeshData::cube(Vec3::new(1.0, 2.0, 3.0), 4.0);
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn cube_topology_is_consistent() {
        let mesh = MeshData::cube(Vec3::ZERO, 1.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let max_index = *mesh.indices.iter().max().unwrap();
        assert!((max_index as usize) < mesh.vertices.len());
    }

    #[test]
    fn cube_normals_are_unit_length() {
        let mesh = MeshData::cube(Vec3::ZERO, 2.0);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(MeshData::default().bounds().is_none());
    }
}

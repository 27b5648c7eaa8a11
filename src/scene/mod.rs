//! Scene contents: meshes and lighting.

/// GPU lighting uniform and bind group management.
pub mod lighting;
/// CPU mesh data and GPU mesh buffers.
pub mod mesh;

use crate::camera::framing::Aabb;
use crate::gpu::render_context::RenderContext;
use crate::scene::mesh::{GpuMesh, MeshData};

/// Holds every mesh to render plus their combined bounds.
///
/// Bounds are tracked per mesh on the CPU so a framing request never has to
/// read geometry back from the GPU.
#[derive(Default)]
pub struct Scene {
    meshes: Vec<GpuMesh>,
    bounds: Vec<Aabb>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a mesh to the GPU and add it to the scene. Meshes with no
    /// vertices are ignored.
    pub fn add_mesh(&mut self, context: &RenderContext, data: &MeshData) {
        let Some(bounds) = data.bounds() else {
            log::warn!("ignoring empty mesh");
            return;
        };
        self.meshes.push(GpuMesh::upload(&context.device, data));
        self.bounds.push(bounds);
    }

    /// Union bounding box of every mesh, or `None` for an empty scene.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.bounds.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }

    /// Number of meshes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the scene holds no meshes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Iterate over the uploaded meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &GpuMesh> {
        self.meshes.iter()
    }
}

//! Render items and the scene that owns them.
//!
//! A `RenderItem` ties together a shared mesh, an owned transform, a material
//! color, and the stable slot it occupies in the per-object constant region.
//! Slots are dense from 0, assigned at creation, and never reused — the
//! scene supports no removal.

use std::sync::Arc;

use basalt_core::Transform;
use glam::{Vec3, Vec4};

use crate::geometry::Mesh;

/// The geometry parameters the scene needs from a mesh, without requiring
/// GPU state.  Slot bookkeeping is therefore testable without a device.
pub trait MeshHandle {
    /// Number of indices a full-mesh draw consumes.
    fn index_count(&self) -> u32;
}

impl MeshHandle for Arc<Mesh> {
    fn index_count(&self) -> u32 {
        self.index_count
    }
}

pub struct RenderItem<M = Arc<Mesh>> {
    /// Shared, read-only geometry; several items may reference one mesh.
    pub mesh: M,
    pub transform: Transform,
    pub color: Vec4,
    pub topology: wgpu::PrimitiveTopology,

    /// Draw-call window into the mesh's index buffer.
    pub index_count: u32,
    pub start_index: u32,
    pub base_vertex: i32,

    slot: usize,
}

impl<M: MeshHandle> RenderItem<M> {
    fn new(mesh: M, slot: usize) -> Self {
        let index_count = mesh.index_count();
        Self {
            mesh,
            transform: Transform::identity(),
            color: Vec4::ZERO,
            topology: wgpu::PrimitiveTopology::TriangleList,
            index_count,
            start_index: 0,
            base_vertex: 0,
            slot,
        }
    }
}

impl<M> RenderItem<M> {
    /// Index of this item's element in the object constant region.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

pub struct Scene<M = Arc<Mesh>> {
    items: Vec<RenderItem<M>>,
}

impl<M> Default for Scene<M> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<M> Scene<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[RenderItem<M>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [RenderItem<M>] {
        &mut self.items
    }

    pub fn item_mut(&mut self, slot: usize) -> Option<&mut RenderItem<M>> {
        self.items.get_mut(slot)
    }
}

impl<M: MeshHandle> Scene<M> {
    /// Adds an item and returns its slot (`== items.len()` before the add).
    pub fn add_item(&mut self, mesh: M, position: Vec3, color: Vec4) -> usize {
        let slot = self.items.len();
        let mut item = RenderItem::new(mesh, slot);
        item.transform.set_position(position);
        item.color = color;
        self.items.push(item);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct StubMesh {
        indices: u32,
    }

    impl MeshHandle for StubMesh {
        fn index_count(&self) -> u32 {
            self.indices
        }
    }

    #[test]
    fn slots_are_dense_and_contiguous_from_zero() {
        let mut scene = Scene::new();
        for i in 0..5 {
            let slot = scene.add_item(StubMesh { indices: 36 }, Vec3::ZERO, Vec4::ONE);
            assert_eq!(slot, i);
            assert_eq!(scene.items()[i].slot(), i);
        }
        assert_eq!(scene.len(), 5);
    }

    #[test]
    fn slots_survive_updates() {
        let mut scene = Scene::new();
        for _ in 0..3 {
            scene.add_item(StubMesh { indices: 3 }, Vec3::ZERO, Vec4::ONE);
        }
        // Per-frame transform mutation never touches slot assignment.
        for frame in 0..100 {
            for item in scene.items_mut() {
                item.transform.set_position(Vec3::new(frame as f32, 0.0, 0.0));
                item.transform.update_matrix();
            }
            for (i, item) in scene.items().iter().enumerate() {
                assert_eq!(item.slot(), i);
            }
        }
    }

    #[test]
    fn new_item_draws_the_whole_mesh() {
        let mut scene = Scene::new();
        scene.add_item(StubMesh { indices: 36 }, Vec3::ONE, Vec4::ONE);
        let item = &scene.items()[0];
        assert_eq!(item.index_count, 36);
        assert_eq!(item.start_index, 0);
        assert_eq!(item.base_vertex, 0);
    }
}

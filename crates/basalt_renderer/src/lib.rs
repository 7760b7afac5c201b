//! `basalt_renderer` — the GPU frame driver.
//!
//! # Module layout
//!
//! | Module          | Responsibility                                        |
//! |-----------------|-------------------------------------------------------|
//! | `context`       | Instance/adapter/device bootstrap                     |
//! | `frame`         | Lifecycle state machine, fence + back-buffer tracking |
//! | `upload`        | Aligned constant regions (`UploadBuffer`)             |
//! | `uniforms`      | Per-pass and per-object constant records              |
//! | `geometry`      | `Vertex`, `Mesh`, procedural primitives, OBJ import   |
//! | `scene`         | `RenderItem` list with stable constant slots          |
//! | `pipeline`      | Bind-group layouts + compiled `WorldPipeline`         |
//! | `render_target` | Depth and MSAA attachments                            |

pub mod context;
pub mod frame;
pub mod geometry;
pub mod pipeline;
pub mod render_target;
pub mod scene;
pub mod uniforms;
pub mod upload;

// ── Public re-exports ─────────────────────────────────────────────────────

pub use basalt_core;
pub use glam;

pub use context::{ContextError, GpuContext};
pub use frame::{FrameState, FrameSync};
pub use geometry::{box_mesh, geosphere, grid, load_obj, quad, sphere, Mesh, MeshData, Vertex};
pub use scene::{MeshHandle, RenderItem, Scene};
pub use uniforms::{ObjectConstants, PassConstants};

// ── Internal imports ──────────────────────────────────────────────────────

use std::sync::Arc;

use basalt_core::{Camera, Projection, Time};
use glam::{Vec3, Vec4};

use frame::{DeviceWait, FrameLifecycle, GpuWait};
use pipeline::{BindingLayouts, WorldPipeline};
use render_target::RenderTarget;
use upload::UploadBuffer;

/// Swap-chain depth: matches the presentation engine's double buffering.
pub const BACK_BUFFER_COUNT: u32 = 2;

/// Per-object region and its bind group.  Rebuilt together whenever the
/// region has to grow, since the bind group pins the old buffer.
struct ObjectRegion {
    buffer: UploadBuffer<ObjectConstants>,
    bind_group: wgpu::BindGroup,
}

impl ObjectRegion {
    fn new(device: &wgpu::Device, layouts: &BindingLayouts, capacity: usize) -> Self {
        let buffer = UploadBuffer::new(device, "Object Constants", capacity);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Constants Bind Group"),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: buffer.buffer(),
                    offset: 0,
                    // One element; the dynamic offset selects the slot.
                    size: buffer.element_size(),
                }),
            }],
        });
        Self { buffer, bind_group }
    }
}

/// Top-level frame driver.
///
/// Owns the pipeline, the constant regions, the scene, and the camera, and
/// runs the fixed per-frame sequence: `update` (CPU state and constant
/// uploads), `begin_frame`, `render`, `submit_frame`, present, and
/// `finish_frame` (rotate the back buffer, stall until the GPU is idle).
/// The full stall means one constant region generation is always safe to
/// rewrite.
pub struct Renderer {
    pub context: GpuContext,

    lifecycle: FrameLifecycle,
    sync: FrameSync,

    target: RenderTarget,
    pipeline: WorldPipeline,
    layouts: BindingLayouts,

    pass_buffer: UploadBuffer<PassConstants>,
    pass_bind_group: wgpu::BindGroup,
    objects: Option<ObjectRegion>,

    scene: Scene,
    pub camera: Camera,
    pub projection: Projection,

    pub clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(
        context: GpuContext,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let mut lifecycle = FrameLifecycle::new();
        lifecycle.transition(FrameState::Initializing);

        let device = &context.device;
        let target = RenderTarget::new(device, width, height, format, sample_count);
        let layouts = BindingLayouts::new(device);
        let pipeline = WorldPipeline::new(device, format, sample_count, &layouts);

        let pass_buffer = UploadBuffer::new(device, "Pass Constants", 1);
        let pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Pass Constants Bind Group"),
            layout: &layouts.pass,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: pass_buffer.buffer(),
                    offset: 0,
                    size: pass_buffer.element_size(),
                }),
            }],
        });

        let projection = Projection::new(0.25 * std::f32::consts::PI, width, height, 0.1, 1000.0);

        lifecycle.transition(FrameState::Ready);
        log::info!("renderer up: {width}x{height}, {format:?}, {sample_count}x MSAA");

        Self {
            context,
            lifecycle,
            sync: FrameSync::new(BACK_BUFFER_COUNT),
            target,
            pipeline,
            layouts,
            pass_buffer,
            pass_bind_group,
            objects: None,
            scene: Scene::new(),
            camera: Camera::new(),
            projection,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            width,
            height,
        }
    }

    // ── Scene management ──────────────────────────────────────────────────

    /// Uploads CPU mesh data and returns a handle shareable between items.
    pub fn upload_mesh(&self, label: &str, data: &MeshData) -> Arc<Mesh> {
        Arc::new(Mesh::upload(&self.context.device, label, data))
    }

    /// Adds an item at `position` drawn in `color`; returns its slot.
    pub fn add_item(&mut self, mesh: Arc<Mesh>, position: Vec3, color: Vec4) -> usize {
        self.scene.add_item(mesh, position, color)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    // ── Frame API ─────────────────────────────────────────────────────────

    /// Refreshes every cached transform and uploads the frame's constants.
    /// Must run before [`render`](Self::render) each frame.
    pub fn update(&mut self, time: Time) {
        self.camera.update();
        let pass =
            PassConstants::build(&self.camera, &self.projection, self.width, self.height, time);
        self.pass_buffer.write(&self.context.queue, 0, &pass);

        if self.scene.is_empty() {
            return;
        }
        self.ensure_object_capacity(self.scene.len());

        for item in self.scene.items_mut() {
            item.transform.update_matrix();
        }
        if let Some(region) = &self.objects {
            for item in self.scene.items() {
                let record = ObjectConstants::new(item.transform.matrix(), item.color);
                region.buffer.write(&self.context.queue, item.slot(), &record);
            }
        }
    }

    /// Allocates the frame's command encoder.  `Ready → Rendering`.
    pub fn begin_frame(&mut self) -> wgpu::CommandEncoder {
        self.lifecycle.transition(FrameState::Rendering);
        self.context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Records the world pass into `view`: clear, bind, draw every item.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        assert_eq!(
            self.lifecycle.state(),
            FrameState::Rendering,
            "render outside an active frame"
        );

        let (color_view, resolve_target) = self.target.color_views(view);
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("World Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.target.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_viewport(0.0, 0.0, self.width as f32, self.height as f32, 0.0, 1.0);
        pass.set_scissor_rect(0, 0, self.width, self.height);
        pass.set_pipeline(&self.pipeline.inner);
        pass.set_bind_group(0, &self.pass_bind_group, &[]);

        let Some(region) = &self.objects else {
            return;
        };
        for item in self.scene.items() {
            let offset = region.buffer.offset(item.slot()) as u32;
            pass.set_bind_group(1, &region.bind_group, &[offset]);
            pass.set_vertex_buffer(0, item.mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(item.mesh.index_buffer.slice(..), item.mesh.index_format);
            pass.draw_indexed(
                item.start_index..item.start_index + item.index_count,
                item.base_vertex,
                0..1,
            );
        }
    }

    /// Submits the recorded frame.  The caller presents the swap-chain image
    /// next, then calls [`finish_frame`](Self::finish_frame).
    pub fn submit_frame(&mut self, encoder: wgpu::CommandEncoder) {
        assert_eq!(
            self.lifecycle.state(),
            FrameState::Rendering,
            "submit outside begin_frame"
        );
        self.context.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Rotates the back buffer and stalls until the GPU has drained.
    /// `Rendering → Ready`.
    pub fn finish_frame(&mut self) {
        self.sync
            .finish_frame(&mut DeviceWait(&self.context.device));
        self.lifecycle.transition(FrameState::Ready);
    }

    // ── Resize ────────────────────────────────────────────────────────────

    /// Rebuilds size-dependent resources.  Zero-area requests (minimize)
    /// are ignored; in-flight work is drained before the old attachments
    /// are dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        DeviceWait(&self.context.device).wait_idle();
        self.width = width;
        self.height = height;
        self.target.resize(&self.context.device, width, height);
        self.projection.resize(width, height);
        log::debug!("renderer resized to {width}x{height}");
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn frame_state(&self) -> FrameState {
        self.lifecycle.state()
    }

    pub fn back_buffer_index(&self) -> u32 {
        self.sync.back_buffer_index()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Grows the object region to hold at least `needed` slots.  Safe at any
    /// frame boundary: the end-of-frame stall guarantees no submitted work
    /// still references the old buffer.
    fn ensure_object_capacity(&mut self, needed: usize) {
        let current = self.objects.as_ref().map_or(0, |r| r.buffer.capacity());
        if needed <= current {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!("object constant region: {current} -> {capacity} slots");
        self.objects = Some(ObjectRegion::new(
            &self.context.device,
            &self.layouts,
            capacity,
        ));
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Orderly teardown only from the idle state; mid-frame drops come
        // from unwinding and must not wait on the device.
        if self.lifecycle.state() == FrameState::Ready {
            self.lifecycle.transition(FrameState::ShuttingDown);
            DeviceWait(&self.context.device).wait_idle();
            self.lifecycle.transition(FrameState::Terminated);
        }
    }
}

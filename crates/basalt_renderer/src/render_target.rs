//! Depth and MSAA attachments that accompany the swapchain image.
//!
//! The presentable color texture comes from the surface each frame, so this
//! owns only what must persist across frames: the depth buffer and, when
//! multisampling is on, the MSAA color texture that resolves into the
//! surface view.

use crate::pipeline::DEPTH_FORMAT;

pub struct RenderTarget {
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    format: wgpu::TextureFormat,
    sample_count: u32,
    width: u32,
    height: u32,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let depth_view = make_attachment(device, "Depth Texture", width, height, DEPTH_FORMAT, sample_count);
        let msaa_view = (sample_count > 1)
            .then(|| make_attachment(device, "MSAA Color Texture", width, height, format, sample_count));

        Self {
            depth_view,
            msaa_view,
            format,
            sample_count,
            width,
            height,
        }
    }

    /// Recreates the attachments when the resolution changes; identical
    /// dimensions allocate nothing.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.depth_view =
            make_attachment(device, "Depth Texture", width, height, DEPTH_FORMAT, self.sample_count);
        if self.sample_count > 1 {
            self.msaa_view = Some(make_attachment(
                device,
                "MSAA Color Texture",
                width,
                height,
                self.format,
                self.sample_count,
            ));
        }
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// The `(render_view, resolve_target)` pair for the color attachment.
    /// With MSAA the pass renders into the multisampled texture and resolves
    /// into the surface; without it the surface is rendered to directly.
    pub fn color_views<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa_view {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        }
    }
}

fn make_attachment(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

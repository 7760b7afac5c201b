//! GPU device bootstrap.
//!
//! `GpuContext` owns the wgpu instance, adapter, device and queue.  `Device`
//! and `Queue` are `Arc` so the application layer can clone handles without
//! threading the context everywhere.  Any creation failure here is fatal to
//! startup — there is no retry policy for GPU objects.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no suitable GPU adapter available")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(String),
}

pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

impl GpuContext {
    /// Creates a headless context (no surface).  Useful for tests and
    /// render-to-texture work.
    pub async fn new() -> Result<Self, ContextError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self::new_with_instance(instance, None).await
    }

    /// Creates a context from an existing instance, optionally constrained to
    /// an adapter compatible with `surface` — required when presenting to a
    /// window so the selected adapter can actually drive it.
    pub async fn new_with_instance(
        instance: wgpu::Instance,
        surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, ContextError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::info!("selected adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Basalt Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceRequest(e.to_string()))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}

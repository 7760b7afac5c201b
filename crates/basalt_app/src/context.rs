use basalt_core::{InputState, Time};
use basalt_renderer::Renderer;
use winit::window::Window;

/// Per-frame context passed to every [`BasaltApp`](crate::BasaltApp)
/// callback.  Bundles the read access a frame typically needs plus mutable
/// access to the renderer.
pub struct FrameContext<'a> {
    /// Keyboard and mouse state for this frame.
    pub input: &'a mut InputState,

    /// Frame timing snapshot.
    pub time: Time,

    /// Current client size in physical pixels.
    pub window_size: (u32, u32),

    /// The native window handle (cursor grab, titles, etc.).
    pub window: &'a Window,

    /// The frame driver: scene, camera, projection.
    pub renderer: &'a mut Renderer,

    pub(crate) exit_requested: bool,
}

impl FrameContext<'_> {
    /// Stops the event loop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.window_size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.window_size.1
    }
}

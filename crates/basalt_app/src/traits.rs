use crate::context::FrameContext;

/// The callbacks a Basalt application implements.
///
/// Every method has an empty default so an app overrides only what it needs.
/// The runner drives them in a fixed order each frame: `update`, then the
/// renderer's own constant upload, record, submit, and stall.
///
/// ```rust,ignore
/// struct Viewer;
///
/// impl BasaltApp for Viewer {
///     fn setup(&mut self, ctx: &mut FrameContext) {
///         let mesh = ctx.renderer.upload_mesh("Box", &box_mesh(2.0, 2.0, 2.0, 0));
///         ctx.renderer.add_item(mesh, Vec3::ZERO, Vec4::ONE);
///     }
///
///     fn update(&mut self, ctx: &mut FrameContext) {
///         if ctx.input.is_key_down(KeyCode::Escape) {
///             ctx.request_exit();
///         }
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait BasaltApp {
    /// Called once after the window and GPU are ready.  Build the scene and
    /// place the camera here.
    fn setup(&mut self, ctx: &mut FrameContext) {}

    /// Called every frame before constants are uploaded and the frame is
    /// recorded.  Scene and camera mutations go here.
    fn update(&mut self, ctx: &mut FrameContext) {}

    /// Called after the swap chain and projection have been rebuilt for a
    /// new client size.
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut FrameContext) {}

    /// Called for every raw winit window event, after the runner's own input
    /// bookkeeping has seen it.
    fn on_window_event(&mut self, event: &winit::event::WindowEvent, ctx: &mut FrameContext) {}
}

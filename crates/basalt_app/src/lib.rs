//! Windowing and application shell around `basalt_renderer`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use basalt_app::{App, BasaltApp, FrameContext, KeyCode, Vec3, Vec4};
//! use basalt_renderer::box_mesh;
//!
//! struct Demo;
//!
//! impl BasaltApp for Demo {
//!     fn setup(&mut self, ctx: &mut FrameContext) {
//!         let mesh = ctx.renderer.upload_mesh("Box", &box_mesh(2.0, 2.0, 2.0, 0));
//!         ctx.renderer.add_item(mesh, Vec3::ZERO, Vec4::ONE);
//!     }
//!
//!     fn update(&mut self, ctx: &mut FrameContext) {
//!         if ctx.input.is_key_down(KeyCode::Escape) {
//!             ctx.request_exit();
//!         }
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(Demo).with_title("Demo").run()
//! }
//! ```

pub mod builder;
pub mod context;
mod graphics;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::{App, AppConfig};
pub use context::FrameContext;
pub use traits::BasaltApp;

// Most-used core primitives, re-exported so simple apps depend on one crate.
pub use basalt_core::{
    Camera, FrameClock, InputState, KeyCode, MouseButton, Projection, Time, Transform,
};
pub use basalt_renderer::Renderer;

pub use basalt_core::glam::{Mat4, Quat, Vec2, Vec3, Vec4};

//! Leaf types shared across the Basalt harness: transforms, the camera and
//! projection, input state, and frame timing.  No GPU dependency — everything
//! here is plain CPU state that the renderer and application layers consume.

pub mod camera;
pub mod input;
pub mod time;
pub mod transform;

pub use camera::{Camera, Projection};
pub use input::{InputState, KeyCode, MouseButton};
pub use time::{FrameClock, Time};
pub use transform::Transform;

// Math re-export, so dependents use one glam version.
pub use glam;

//! Rendering module
//!
//! Draws the simulation onto any [`Surface`]. The browser build backs it with
//! a 2D canvas; headless runs and tests record into a [`CommandBuffer`].

pub mod commands;
pub mod scene;
pub mod shapes;
pub mod surface;

pub use commands::{CommandBuffer, DrawCommand};
pub use scene::{draw_entity, draw_particle, render_engine, render_session};
pub use surface::{Paint, Surface, SurfaceScope, TextAlign, TextStyle};

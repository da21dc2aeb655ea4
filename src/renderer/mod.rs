//! The renderer collaborator of the scene tree.
//!
//! The scene tree never draws anything. It drives an implementation of
//! [`Renderer`] through opaque [`RenderHandle`]s, one per leaf geometry and one
//! per frame-axes indicator.

pub use self::recording::{RecordingRenderer, RenderCall};
pub use self::renderer::{RenderHandle, Renderer};

mod recording;
mod renderer;

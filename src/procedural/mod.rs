//! Geometry descriptors handed to the renderer.
//!
//! A [`Geometry`] describes what a leaf looks like. The scene tree passes it to
//! [`Renderer::create_handle`](crate::renderer::Renderer::create_handle) and
//! derives the leaf kind from it; the renderer decides how to tessellate it.

pub use self::geometry::{Geometry, LineTopology, TriangleTopology};
pub use self::utils::{
    line_loop_to_line_list, line_strip_to_line_list, triangle_strip_to_triangle_list,
    MAX_GRID_CELLS,
};

mod geometry;
pub mod utils;

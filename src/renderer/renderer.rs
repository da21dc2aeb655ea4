use crate::color::Color;
use crate::procedural::Geometry;
use crate::resource::Texture;
use crate::scene::RenderMode;
use crate::transform::Transform;
use glamx::Vec3;

/// An opaque reference to an object owned by a [`Renderer`].
///
/// The scene tree holds handles, never the render objects themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

/// Trait implemented by rendering backends driven by the scene tree.
///
/// Every method is called on the thread owning the scene tree. Attribute values
/// are already clamped into their valid ranges when they reach the renderer.
pub trait Renderer {
    /// Creates a render object for the given geometry and returns its handle.
    ///
    /// The new object is visible, white, opaque, and placed at the identity.
    fn create_handle(&mut self, geometry: &Geometry) -> RenderHandle;

    /// Destroys a render object. The handle is not used again by the scene.
    fn destroy_handle(&mut self, handle: RenderHandle);

    /// Sets the world transform of a render object.
    fn set_transform(&mut self, handle: RenderHandle, transform: &Transform);

    /// Sets the mounting offset, applied before the world transform.
    fn set_offset(&mut self, handle: RenderHandle, offset: Vec3);

    /// Sets the mounting orientation as `(roll, pitch, yaw)` degrees, applied
    /// after the offset and before the world transform.
    fn set_orientation(&mut self, handle: RenderHandle, orientation: Vec3);

    /// Shows or hides a render object.
    fn set_visible(&mut self, handle: RenderHandle, visible: bool);

    /// Sets the opacity, in `[0, 1]`.
    fn set_opacity(&mut self, handle: RenderHandle, opacity: f32);

    /// Sets the size of drawn points.
    fn set_point_size(&mut self, handle: RenderHandle, size: f32);

    /// Sets the width of drawn lines.
    fn set_line_width(&mut self, handle: RenderHandle, width: f32);

    /// Sets the uniform scale.
    fn set_scale(&mut self, handle: RenderHandle, scale: f32);

    /// Sets the base color.
    fn set_color(&mut self, handle: RenderHandle, color: Color);

    /// Sets how surfaces are drawn.
    fn set_render_mode(&mut self, handle: RenderHandle, mode: RenderMode);

    /// Applies a texture, or removes the current one with `None`.
    fn set_texture(&mut self, handle: RenderHandle, texture: Option<&Texture>);

    /// Asks for the scene to be redrawn at the next opportunity.
    fn request_redraw(&mut self);
}

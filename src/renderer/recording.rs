//! A headless renderer recording every call it receives.

use crate::color::Color;
use crate::procedural::Geometry;
use crate::renderer::{RenderHandle, Renderer};
use crate::resource::Texture;
use crate::scene::RenderMode;
use crate::transform::Transform;
use glamx::Vec3;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One call received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    /// A render object was created from a geometry of the named kind.
    Create(RenderHandle, &'static str),
    Destroy(RenderHandle),
    SetTransform(RenderHandle, Transform),
    SetOffset(RenderHandle, Vec3),
    SetOrientation(RenderHandle, Vec3),
    SetVisible(RenderHandle, bool),
    SetOpacity(RenderHandle, f32),
    SetPointSize(RenderHandle, f32),
    SetLineWidth(RenderHandle, f32),
    SetScale(RenderHandle, f32),
    SetColor(RenderHandle, Color),
    SetRenderMode(RenderHandle, RenderMode),
    /// A texture was applied (with its source file, if any) or removed.
    SetTexture(RenderHandle, Option<Option<PathBuf>>),
    RequestRedraw,
}

impl RenderCall {
    /// The handle targeted by this call, if any.
    pub fn handle(&self) -> Option<RenderHandle> {
        match *self {
            RenderCall::Create(h, _)
            | RenderCall::Destroy(h)
            | RenderCall::SetTransform(h, _)
            | RenderCall::SetOffset(h, _)
            | RenderCall::SetOrientation(h, _)
            | RenderCall::SetVisible(h, _)
            | RenderCall::SetOpacity(h, _)
            | RenderCall::SetPointSize(h, _)
            | RenderCall::SetLineWidth(h, _)
            | RenderCall::SetScale(h, _)
            | RenderCall::SetColor(h, _)
            | RenderCall::SetRenderMode(h, _)
            | RenderCall::SetTexture(h, _) => Some(h),
            RenderCall::RequestRedraw => None,
        }
    }
}

/// The last known state of a render object.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject {
    /// Kind of the geometry it was created from.
    pub geometry: &'static str,
    /// World transform.
    pub transform: Transform,
    /// Visibility.
    pub visible: bool,
}

/// A renderer that draws nothing, records every call and tracks live handles.
///
/// It serves as the renderer of headless viewers, and as a spy in tests.
#[derive(Default, Debug)]
pub struct RecordingRenderer {
    next_handle: u64,
    objects: BTreeMap<RenderHandle, RenderObject>,
    calls: Vec<RenderCall>,
    redraws: usize,
}

impl RecordingRenderer {
    /// Creates a renderer with no live object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received since creation or the last [`Self::take_calls`].
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Returns and forgets the recorded calls.
    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    /// The recorded calls targeting `handle`.
    pub fn calls_for(&self, handle: RenderHandle) -> impl Iterator<Item = &RenderCall> + '_ {
        self.calls
            .iter()
            .filter(move |call| call.handle() == Some(handle))
    }

    /// Handles created and not destroyed yet.
    pub fn live_handles(&self) -> impl Iterator<Item = RenderHandle> + '_ {
        self.objects.keys().copied()
    }

    /// The number of live render objects.
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether `handle` is live.
    pub fn is_live(&self, handle: RenderHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    /// The state of a live render object.
    pub fn object(&self, handle: RenderHandle) -> Option<&RenderObject> {
        self.objects.get(&handle)
    }

    /// The number of redraw requests received.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    fn record(&mut self, call: RenderCall) {
        log::trace!("{:?}", call);
        self.calls.push(call);
    }
}

impl Renderer for RecordingRenderer {
    fn create_handle(&mut self, geometry: &Geometry) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        let _ = self.objects.insert(
            handle,
            RenderObject {
                geometry: geometry.label(),
                transform: Transform::IDENTITY,
                visible: true,
            },
        );
        self.record(RenderCall::Create(handle, geometry.label()));
        handle
    }

    fn destroy_handle(&mut self, handle: RenderHandle) {
        if self.objects.remove(&handle).is_none() {
            log::warn!("Destroying unknown render handle {:?}.", handle);
        }
        self.record(RenderCall::Destroy(handle));
    }

    fn set_transform(&mut self, handle: RenderHandle, transform: &Transform) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.transform = *transform;
        }
        self.record(RenderCall::SetTransform(handle, *transform));
    }

    fn set_offset(&mut self, handle: RenderHandle, offset: Vec3) {
        self.record(RenderCall::SetOffset(handle, offset));
    }

    fn set_orientation(&mut self, handle: RenderHandle, orientation: Vec3) {
        self.record(RenderCall::SetOrientation(handle, orientation));
    }

    fn set_visible(&mut self, handle: RenderHandle, visible: bool) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.visible = visible;
        }
        self.record(RenderCall::SetVisible(handle, visible));
    }

    fn set_opacity(&mut self, handle: RenderHandle, opacity: f32) {
        self.record(RenderCall::SetOpacity(handle, opacity));
    }

    fn set_point_size(&mut self, handle: RenderHandle, size: f32) {
        self.record(RenderCall::SetPointSize(handle, size));
    }

    fn set_line_width(&mut self, handle: RenderHandle, width: f32) {
        self.record(RenderCall::SetLineWidth(handle, width));
    }

    fn set_scale(&mut self, handle: RenderHandle, scale: f32) {
        self.record(RenderCall::SetScale(handle, scale));
    }

    fn set_color(&mut self, handle: RenderHandle, color: Color) {
        self.record(RenderCall::SetColor(handle, color));
    }

    fn set_render_mode(&mut self, handle: RenderHandle, mode: RenderMode) {
        self.record(RenderCall::SetRenderMode(handle, mode));
    }

    fn set_texture(&mut self, handle: RenderHandle, texture: Option<&Texture>) {
        let source = texture.map(|t| t.source().map(|p| p.to_path_buf()));
        self.record(RenderCall::SetTexture(handle, source));
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
        self.calls.push(RenderCall::RequestRedraw);
    }
}

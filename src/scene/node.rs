//! Nodes of the scene tree.

use crate::color::{self, Color};
use crate::renderer::RenderHandle;
use crate::scene::path::{Namespace, ScenePath};
use crate::transform::{euler_rotation, Transform};
use glamx::{Mat4, Vec3};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a node, stable across renames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// The two kinds of billboard leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BillboardKind {
    /// A camera-facing text label.
    Text,
    /// A camera-facing image sprite.
    Image,
}

/// What a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A pure grouping node, without renderable surface.
    Directory,
    /// A regular renderable leaf: primitive, mesh or point cloud.
    Actor,
    /// A camera-facing sprite leaf.
    Billboard(BillboardKind),
    /// A coordinate axes leaf.
    Axes,
}

impl NodeKind {
    /// Whether this is a renderable leaf kind.
    #[inline]
    pub fn is_leaf(self) -> bool {
        self != NodeKind::Directory
    }

    /// Whether this is one of the billboard kinds.
    #[inline]
    pub fn is_billboard(self) -> bool {
        matches!(self, NodeKind::Billboard(_))
    }

    /// The lookup namespace of nodes of this kind.
    #[inline]
    pub fn namespace(self) -> Namespace {
        match self {
            NodeKind::Directory => Namespace::Directory,
            _ => Namespace::Actor,
        }
    }

    /// Whether the scale setter affects leaves of this kind.
    #[inline]
    pub fn accepts_scale(self) -> bool {
        !self.is_billboard()
    }

    /// Whether the render-mode setter affects leaves of this kind.
    #[inline]
    pub fn accepts_mode(self) -> bool {
        !self.is_billboard()
    }

    /// Whether the offset setter affects leaves of this kind.
    #[inline]
    pub fn accepts_offset(self) -> bool {
        self != NodeKind::Billboard(BillboardKind::Image)
    }

    /// Whether the texture setters affect leaves of this kind.
    #[inline]
    pub fn accepts_texture(self) -> bool {
        self != NodeKind::Billboard(BillboardKind::Text)
    }
}

/// How the surface of an actor is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Filled faces.
    #[default]
    Surface,
    /// Edges only.
    Wireframe,
    /// Filled faces with their edges drawn on top.
    SurfaceAndEdges,
    /// Vertices only.
    Points,
}

impl RenderMode {
    /// Every render mode, in menu order.
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Surface,
        RenderMode::Wireframe,
        RenderMode::SurfaceAndEdges,
        RenderMode::Points,
    ];

    /// The user-facing name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Surface => "Surface",
            RenderMode::Wireframe => "Wireframe",
            RenderMode::SurfaceAndEdges => "Surface & Edges",
            RenderMode::Points => "Points",
        }
    }

    /// Looks a mode up by its user-facing name, falling back to `Surface`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown render-mode name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown render mode: {0:?}")]
pub struct ParseRenderModeError(pub String);

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ParseRenderModeError(s.to_string()))
    }
}

/// The visual attributes of a leaf.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorAttributes {
    /// Whether the leaf is drawn.
    pub visible: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Size of drawn points, at least 1.
    pub point_size: f32,
    /// Width of drawn lines, at least 1.
    pub line_width: f32,
    /// Uniform scale, at least 0.
    pub scale: f32,
    /// How surfaces are drawn.
    pub mode: RenderMode,
    /// Base color.
    pub color: Color,
    /// Mounting offset.
    pub offset: Vec3,
    /// Mounting orientation as `(roll, pitch, yaw)` degrees.
    pub orientation: Vec3,
    /// Source file of the applied texture, if any.
    pub texture: Option<PathBuf>,
}

impl Default for ActorAttributes {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            point_size: 1.0,
            line_width: 1.0,
            scale: 1.0,
            mode: RenderMode::Surface,
            color: color::WHITE,
            offset: Vec3::ZERO,
            orientation: Vec3::ZERO,
            texture: None,
        }
    }
}

impl ActorAttributes {
    /// The fixed mounting pose: offset, then orientation, then scale.
    ///
    /// This is applied before the world transform of the leaf.
    pub fn mount_transform(&self) -> Transform {
        Transform::from_matrix(Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            euler_rotation(self.orientation),
            self.offset,
        ))
    }
}

/// The per-leaf coordinate frame indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAxes {
    /// Renderer handle of the indicator.
    pub handle: RenderHandle,
    /// Whether the indicator is drawn. Hidden by default.
    pub visible: bool,
    /// Scale of the indicator.
    pub scale: f32,
}

impl FrameAxes {
    /// A hidden indicator of unit scale.
    pub fn new(handle: RenderHandle) -> Self {
        Self {
            handle,
            visible: false,
            scale: 1.0,
        }
    }
}

/// The renderable part of a leaf node.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    /// Renderer handle of the leaf geometry.
    pub handle: RenderHandle,
    /// Visual attributes.
    pub attributes: ActorAttributes,
    /// The frame indicator. The orientation axes overlay has none.
    pub frame_axes: Option<FrameAxes>,
}

/// A node of the scene tree.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub(crate) id: NodeId,
    pub(crate) path: ScenePath,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) local_transform: Transform,
    pub(crate) world_transform: Transform,
    pub(crate) actor: Option<Actor>,
}

impl SceneNode {
    pub(crate) fn new_directory(id: NodeId, path: ScenePath, parent: Option<NodeId>) -> Self {
        Self {
            id,
            path,
            kind: NodeKind::Directory,
            parent,
            children: Vec::new(),
            local_transform: Transform::IDENTITY,
            world_transform: Transform::IDENTITY,
            actor: None,
        }
    }

    pub(crate) fn new_leaf(
        id: NodeId,
        path: ScenePath,
        parent: Option<NodeId>,
        kind: NodeKind,
        actor: Actor,
    ) -> Self {
        Self {
            id,
            path,
            kind,
            parent,
            children: Vec::new(),
            local_transform: Transform::IDENTITY,
            world_transform: Transform::IDENTITY,
            actor: Some(actor),
        }
    }

    /// The identifier of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The display name, i.e. the last path segment.
    #[inline]
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// The full path from the root.
    #[inline]
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// What this node is.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The parent directory, `None` for top-level nodes.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of a directory, in insertion order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The transform relative to the parent.
    #[inline]
    pub fn local_transform(&self) -> &Transform {
        &self.local_transform
    }

    /// The composed transform from the root.
    #[inline]
    pub fn world_transform(&self) -> &Transform {
        &self.world_transform
    }

    /// The renderable part of a leaf, `None` for directories.
    #[inline]
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// The final placement of a leaf: the world transform applied after the mounting pose.
    pub fn world_pose(&self) -> Transform {
        match &self.actor {
            Some(actor) => self
                .world_transform
                .compose(&actor.attributes.mount_transform()),
            None => self.world_transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_render_mode_names() {
        for mode in RenderMode::ALL {
            assert_eq!(mode.name().parse::<RenderMode>(), Ok(mode));
        }

        assert_eq!(
            RenderMode::from_name("Surface & Edges"),
            RenderMode::SurfaceAndEdges
        );
        assert_eq!(RenderMode::from_name("Hologram"), RenderMode::Surface);
        assert!("points".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_default_attributes() {
        let attrs = ActorAttributes::default();
        assert!(attrs.visible);
        assert_eq!(attrs.opacity, 1.0);
        assert_eq!(attrs.point_size, 1.0);
        assert_eq!(attrs.line_width, 1.0);
        assert_eq!(attrs.scale, 1.0);
        assert_eq!(attrs.mode, RenderMode::Surface);
        assert_eq!(attrs.color, color::WHITE);
        assert!(attrs.mount_transform().is_identity(1.0e-6));
    }

    #[test]
    fn test_mount_transform_offsets_then_rotates() {
        let attrs = ActorAttributes {
            offset: Vec3::new(1.0, 0.0, 0.0),
            orientation: Vec3::new(0.0, 0.0, 90.0),
            ..Default::default()
        };

        // the local x axis is rotated onto y, then the offset is added
        let p = attrs.mount_transform().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1.0e-5);
    }

    #[test]
    fn test_billboard_exemptions() {
        let text = NodeKind::Billboard(BillboardKind::Text);
        let image = NodeKind::Billboard(BillboardKind::Image);

        assert!(!text.accepts_scale() && !image.accepts_scale());
        assert!(!text.accepts_mode() && !image.accepts_mode());
        assert!(text.accepts_offset() && !image.accepts_offset());
        assert!(!text.accepts_texture() && image.accepts_texture());
        assert!(NodeKind::Actor.accepts_scale());
        assert_eq!(NodeKind::Axes.namespace(), Namespace::Actor);
    }
}

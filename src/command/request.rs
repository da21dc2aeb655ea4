use crate::color::Color;
use crate::command::Status;
use crate::procedural::Geometry;
use crate::scene::{ActorAttributes, Namespace, NodeKind, RenderMode, ScenePath};
use crate::transform::{Transform, TransformOrder};
use glamx::Vec3;
use std::path::PathBuf;

/// A scene operation, with its path in raw segment form.
///
/// Paths are validated when the command is executed, so that a malformed path
/// is reported as [`Status::MalformedPath`] instead of failing on the caller side.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddDirectory {
        path: Vec<String>,
    },
    AddActor {
        path: Vec<String>,
        geometry: Geometry,
    },
    /// Replaces the geometry of an existing leaf.
    SetActor {
        path: Vec<String>,
        geometry: Geometry,
    },
    RemoveActor {
        path: Vec<String>,
    },
    RemoveDirectory {
        path: Vec<String>,
    },
    Rename {
        path: Vec<String>,
        name: String,
    },
    SetActorOffsetOrientation {
        path: Vec<String>,
        offset: Vec3,
        orientation: Vec3,
    },
    /// Sets the mounting pose of every leaf below a directory.
    SetDirectoryOffsetOrientation {
        path: Vec<String>,
        offset: Vec3,
        orientation: Vec3,
    },
    SetActorColor {
        path: Vec<String>,
        color: Color,
    },
    SetActorOpacity {
        path: Vec<String>,
        opacity: f32,
    },
    SetActorScale {
        path: Vec<String>,
        scale: f32,
    },
    SetActorPointSize {
        path: Vec<String>,
        size: f32,
    },
    SetActorVisibility {
        path: Vec<String>,
        visible: bool,
    },
    SetActorLineWidth {
        path: Vec<String>,
        width: f32,
    },
    SetActorMode {
        path: Vec<String>,
        mode: RenderMode,
    },
    SetActorTexture {
        path: Vec<String>,
        file: PathBuf,
    },
    RemoveActorTexture {
        path: Vec<String>,
    },
    SetFrameAxesVisibility {
        path: Vec<String>,
        visible: bool,
    },
    SetFrameAxesScale {
        path: Vec<String>,
        scale: f32,
    },
    /// Sets (`stacking == false`) or applies (`stacking == true`) a transform
    /// to an actor or a directory.
    Transform {
        path: Vec<String>,
        target: Namespace,
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
        stacking: bool,
    },
    ResetTransform {
        path: Vec<String>,
        target: Namespace,
    },
    QueryActor {
        path: Vec<String>,
    },
    QueryDirectory {
        path: Vec<String>,
    },
}

impl Command {
    /// The name of the operation, as used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddDirectory { .. } => "addDirectory",
            Command::AddActor { .. } => "addActor",
            Command::SetActor { .. } => "setActor",
            Command::RemoveActor { .. } => "removeActor",
            Command::RemoveDirectory { .. } => "removeDirectory",
            Command::Rename { .. } => "rename",
            Command::SetActorOffsetOrientation { .. } => "setActorOffsetOrientation",
            Command::SetDirectoryOffsetOrientation { .. } => "setDirectoryOffsetOrientation",
            Command::SetActorColor { .. } => "setActorColor",
            Command::SetActorOpacity { .. } => "setActorOpacity",
            Command::SetActorScale { .. } => "setActorScale",
            Command::SetActorPointSize { .. } => "setActorPointSize",
            Command::SetActorVisibility { .. } => "setActorVisibility",
            Command::SetActorLineWidth { .. } => "setActorLineWidth",
            Command::SetActorMode { .. } => "setActorMode",
            Command::SetActorTexture { .. } => "setActorTexture",
            Command::RemoveActorTexture { .. } => "removeActorTexture",
            Command::SetFrameAxesVisibility { .. } => "setFrameAxesVisibility",
            Command::SetFrameAxesScale { .. } => "setFrameAxesScale",
            Command::Transform {
                target: Namespace::Actor,
                stacking: false,
                ..
            } => "setActorTransform",
            Command::Transform {
                target: Namespace::Actor,
                stacking: true,
                ..
            } => "applyActorTransform",
            Command::Transform {
                target: Namespace::Directory,
                stacking: false,
                ..
            } => "setDirectoryTransform",
            Command::Transform {
                target: Namespace::Directory,
                stacking: true,
                ..
            } => "applyDirectoryTransform",
            Command::ResetTransform {
                target: Namespace::Actor,
                ..
            } => "resetActorTransform",
            Command::ResetTransform {
                target: Namespace::Directory,
                ..
            } => "resetDirectoryTransform",
            Command::QueryActor { .. } => "queryActor",
            Command::QueryDirectory { .. } => "queryDirectory",
        }
    }
}

/// A snapshot of a leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorInfo {
    pub path: ScenePath,
    pub kind: NodeKind,
    pub attributes: ActorAttributes,
    pub local_transform: Transform,
    pub world_transform: Transform,
    /// Visibility and scale of the frame-axes indicator, if the leaf has one.
    pub frame_axes: Option<(bool, f32)>,
}

/// A snapshot of a directory.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryInfo {
    pub path: ScenePath,
    /// Paths of the children, in insertion order.
    pub children: Vec<ScenePath>,
    pub local_transform: Transform,
    pub world_transform: Transform,
}

/// The answer to a [`Command`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// The status of a mutating command, or of a failed query.
    Status(Status),
    /// A resource failed to load. The scene is unchanged.
    Resource(String),
    Actor(ActorInfo),
    Directory(DirectoryInfo),
}

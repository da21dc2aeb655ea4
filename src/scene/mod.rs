//! The scene graph: nodes addressed by path, and their transform hierarchy.

pub use self::node::{
    Actor, ActorAttributes, BillboardKind, FrameAxes, NodeId, NodeKind, ParseRenderModeError,
    RenderMode, SceneNode,
};
pub use self::path::{Namespace, ScenePath, ORIENTATION_AXES, PATH_SEPARATOR};
pub use self::resolver::PathResolver;
pub use self::tree::SceneTree;

mod node;
mod path;
mod propagation;
mod resolver;
mod tree;

/*!
# LightField

Scene graph and transform-composition engine of a lightweight field robotics visualizer.

A LightField scene is a tree of **directories** (pure grouping nodes) and
**leaves** (primitives, meshes, point clouds, billboards and axes), each addressed
by its path: the ordered list of names from the root to the node, such as
`["robot", "arm", "gripper"]`. Every node carries a local transform, relative to
its parent, and the scene keeps the world transform of every node equal to the
composition of the local transforms along its ancestor chain, whatever the order
in which nodes are inserted, renamed, moved or removed.

## Features
* hierarchical paths with implicit creation of missing directories.
* recursive removal and subtree-wide renames.
* set or stacked transforms on leaves and whole directories, with a choice of
  rotate-then-translate or translate-then-rotate order.
* per-leaf visual attributes: visibility, opacity, point size, line width, scale,
  render mode, color, texture, mounting pose and a frame-axes indicator.
* a status-returning command surface, usable in-process or from any thread
  through a [`SceneClient`](command::SceneClient) with a bounded timeout.

Drawing is left to an implementation of the [`Renderer`](renderer::Renderer) trait.
The [`RecordingRenderer`](renderer::RecordingRenderer) is a headless one.

As an example, moving a robot and everything mounted on it is as simple as:

```
use lightfield::prelude::*;

let (mut viewer, client) = Viewer::new(RecordingRenderer::new(), ViewerConfig::empty()).unwrap();
let scene = viewer.scene_mut();

let torso = ScenePath::new(["robot", "torso"]).unwrap();
scene.add_actor(&torso, &Geometry::cuboid(0.5, 0.3, 0.8)).unwrap();
scene.set_color(&torso, BLUE).unwrap();

let robot = ScenePath::new(["robot"]).unwrap();
scene
    .apply_transform(&robot, Namespace::Directory, Vec3::X, Vec3::ZERO, None, true)
    .unwrap();

let world = scene.world_transform(&torso, Namespace::Actor).unwrap();
assert_eq!(world.translation(), Vec3::X);
# drop(client);
```

Other threads send the same operations through a [`SceneClient`](command::SceneClient),
and the owning thread executes them with [`Viewer::update`](viewer::Viewer::update).
*/
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod procedural;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod transform;
pub mod viewer;

pub mod prelude {
    pub use crate::color::*;
    pub use crate::command::*;
    pub use crate::config::*;
    pub use crate::error::SceneError;
    pub use crate::procedural::*;
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use crate::transform::{Transform, TransformOrder};
    pub use crate::viewer::Viewer;
    pub use glamx::{Mat4, Quat, Vec3};
}

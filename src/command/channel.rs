//! Cross-thread hand-off of commands to the thread owning the scene.

use crate::color::Color;
use crate::command::{ActorInfo, Command, CommandError, DirectoryInfo, Reply, Status};
use crate::procedural::Geometry;
use crate::renderer::Renderer;
use crate::scene::{Namespace, RenderMode, SceneTree};
use crate::transform::TransformOrder;
use flume::{Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use glamx::Vec3;
use std::path::PathBuf;
use web_time::{Duration, Instant};

struct Request {
    command: Command,
    reply: Sender<Reply>,
}

/// Creates a connected client and receiver.
///
/// # Arguments
/// * `capacity` - the number of requests that can be queued before senders block
/// * `timeout` - how long a client waits for each request to be answered
pub fn channel(capacity: usize, timeout: Duration) -> (SceneClient, CommandReceiver) {
    let (sender, receiver) = flume::bounded(capacity.max(1));

    (
        SceneClient { sender, timeout },
        CommandReceiver { receiver },
    )
}

/// The owning side of the hand-off. Executes queued commands on a scene tree.
pub struct CommandReceiver {
    receiver: Receiver<Request>,
}

impl CommandReceiver {
    /// Executes every command queued so far without blocking. Returns how many were executed.
    pub fn process_pending<R: Renderer>(&self, tree: &mut SceneTree<R>) -> usize {
        let mut processed = 0;

        for request in self.receiver.try_iter() {
            Self::answer(tree, request);
            processed += 1;
        }

        processed
    }

    /// Executes commands as they arrive, until every client is dropped.
    pub fn run<R: Renderer>(&self, tree: &mut SceneTree<R>) {
        while let Ok(request) = self.receiver.recv() {
            Self::answer(tree, request);
        }

        log::debug!("Every scene client disconnected.");
    }

    /// The number of queued requests.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no request is queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    fn answer<R: Renderer>(tree: &mut SceneTree<R>, request: Request) {
        let name = request.command.name();
        let reply = tree.execute(request.command);

        if request.reply.send(reply).is_err() {
            log::debug!("The caller of {} stopped waiting for its reply.", name);
        }
    }
}

/// A cloneable handle sending commands to the scene from any thread.
///
/// Each call blocks until the command is executed by the owning thread, or until
/// the timeout elapses. A timed-out command may still be executed afterwards.
#[derive(Clone)]
pub struct SceneClient {
    sender: Sender<Request>,
    timeout: Duration,
}

impl SceneClient {
    /// How long each call waits for its reply.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets how long each call waits for its reply.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sends a command and waits for its reply.
    pub fn request(&self, command: Command) -> Result<Reply, CommandError> {
        let start = Instant::now();
        let (reply, answer) = flume::bounded(1);

        self.sender
            .send_timeout(Request { command, reply }, self.timeout)
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => CommandError::Timeout(self.timeout),
                SendTimeoutError::Disconnected(_) => CommandError::Disconnected,
            })?;

        let remaining = self.timeout.saturating_sub(start.elapsed());

        answer.recv_timeout(remaining).map_err(|e| match e {
            RecvTimeoutError::Timeout => CommandError::Timeout(self.timeout),
            RecvTimeoutError::Disconnected => CommandError::Disconnected,
        })
    }

    /// Sends a mutating command and returns its status.
    pub fn call(&self, command: Command) -> Result<Status, CommandError> {
        match self.request(command)? {
            Reply::Status(status) => Ok(status),
            Reply::Resource(msg) => Err(CommandError::Resource(msg)),
            Reply::Actor(_) | Reply::Directory(_) => Err(CommandError::UnexpectedReply),
        }
    }

    /*
     *
     * Actors.
     *
     */
    /// Adds a leaf built from any geometry.
    pub fn add_actor(&self, path: &[&str], geometry: Geometry) -> Result<Status, CommandError> {
        self.call(Command::AddActor {
            path: raw(path),
            geometry,
        })
    }

    /// Replaces the geometry of an existing leaf.
    pub fn set_actor(&self, path: &[&str], geometry: Geometry) -> Result<Status, CommandError> {
        self.call(Command::SetActor {
            path: raw(path),
            geometry,
        })
    }

    /// Adds a grid of `full_length` side with `cell_length` cells.
    pub fn add_grid(
        &self,
        path: &[&str],
        full_length: f32,
        cell_length: f32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::grid(full_length, cell_length))
    }

    /// Adds a coordinate frame.
    pub fn add_axes(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::axes())
    }

    /// Adds an arrow with `resolution` facets.
    pub fn add_arrow(&self, path: &[&str], resolution: u32) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::arrow(resolution))
    }

    /// Adds a box with the given side lengths.
    pub fn add_box(
        &self,
        path: &[&str],
        x_length: f32,
        y_length: f32,
        z_length: f32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::cuboid(x_length, y_length, z_length))
    }

    /// Adds a sphere.
    pub fn add_sphere(
        &self,
        path: &[&str],
        radius: f32,
        theta_resolution: u32,
        phi_resolution: u32,
    ) -> Result<Status, CommandError> {
        self.add_actor(
            path,
            Geometry::sphere(radius, theta_resolution, phi_resolution),
        )
    }

    /// Adds a cylinder.
    pub fn add_cylinder(
        &self,
        path: &[&str],
        radius: f32,
        height: f32,
        resolution: u32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::cylinder(radius, height, resolution))
    }

    /// Adds an ellipsoid with the given radii.
    pub fn add_ellipsoid(
        &self,
        path: &[&str],
        x_radius: f32,
        y_radius: f32,
        z_radius: f32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::ellipsoid(x_radius, y_radius, z_radius))
    }

    /// Adds a cone.
    pub fn add_cone(
        &self,
        path: &[&str],
        radius: f32,
        height: f32,
        resolution: u32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::cone(radius, height, resolution))
    }

    /// Adds a torus.
    pub fn add_torus(
        &self,
        path: &[&str],
        ring_radius: f32,
        cross_section_radius: f32,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::torus(ring_radius, cross_section_radius))
    }

    /// Adds a mesh read from a model file, with an optional texture.
    pub fn add_mesh_file(
        &self,
        path: &[&str],
        file: impl Into<PathBuf>,
        texture: Option<PathBuf>,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::model(file, texture))
    }

    /// Adds a line strip, with one optional color per segment.
    pub fn add_line_strip(
        &self,
        path: &[&str],
        vertices: Vec<Vec3>,
        colors: Option<Vec<Color>>,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::line_strip(vertices, colors))
    }

    /// Adds a triangle strip, with one optional color per triangle.
    pub fn add_triangle_strip(
        &self,
        path: &[&str],
        vertices: Vec<Vec3>,
        colors: Option<Vec<Color>>,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::triangle_strip(vertices, colors))
    }

    /// Adds a point cloud, with one optional color per point.
    pub fn add_point_cloud(
        &self,
        path: &[&str],
        points: Vec<Vec3>,
        colors: Option<Vec<Color>>,
    ) -> Result<Status, CommandError> {
        self.add_actor(path, Geometry::point_cloud(points, colors))
    }

    /// Replaces the points of an existing leaf, keeping its attributes.
    pub fn set_point_cloud(
        &self,
        path: &[&str],
        points: Vec<Vec3>,
        colors: Option<Vec<Color>>,
    ) -> Result<Status, CommandError> {
        self.set_actor(path, Geometry::point_cloud(points, colors))
    }

    /// Removes a leaf.
    pub fn remove_actor(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::RemoveActor { path: raw(path) })
    }

    /*
     *
     * Directories.
     *
     */
    /// Adds a directory, creating its missing ancestors.
    pub fn add_directory(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::AddDirectory { path: raw(path) })
    }

    /// Removes a directory and everything below it.
    pub fn remove_directory(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::RemoveDirectory { path: raw(path) })
    }

    /// Renames the last segment of a directory or leaf path.
    pub fn rename(&self, path: &[&str], name: &str) -> Result<Status, CommandError> {
        self.call(Command::Rename {
            path: raw(path),
            name: name.to_string(),
        })
    }

    /*
     *
     * Attributes.
     *
     */
    /// Sets the mounting pose of a leaf. Angles are degrees.
    pub fn set_actor_offset_orientation(
        &self,
        path: &[&str],
        offset: Vec3,
        orientation: Vec3,
    ) -> Result<Status, CommandError> {
        self.call(Command::SetActorOffsetOrientation {
            path: raw(path),
            offset,
            orientation,
        })
    }

    /// Sets the mounting pose of every leaf below a directory.
    pub fn set_directory_offset_orientation(
        &self,
        path: &[&str],
        offset: Vec3,
        orientation: Vec3,
    ) -> Result<Status, CommandError> {
        self.call(Command::SetDirectoryOffsetOrientation {
            path: raw(path),
            offset,
            orientation,
        })
    }

    /// Sets the color of a leaf.
    pub fn set_actor_color(&self, path: &[&str], color: Color) -> Result<Status, CommandError> {
        self.call(Command::SetActorColor {
            path: raw(path),
            color,
        })
    }

    /// Sets the opacity of a leaf, clamped to `[0, 1]`.
    pub fn set_actor_opacity(&self, path: &[&str], opacity: f32) -> Result<Status, CommandError> {
        self.call(Command::SetActorOpacity {
            path: raw(path),
            opacity,
        })
    }

    /// Sets the uniform scale of a leaf. Ignored by billboards.
    pub fn set_actor_scale(&self, path: &[&str], scale: f32) -> Result<Status, CommandError> {
        self.call(Command::SetActorScale {
            path: raw(path),
            scale,
        })
    }

    /// Sets the point size of a leaf.
    pub fn set_actor_point_size(&self, path: &[&str], size: f32) -> Result<Status, CommandError> {
        self.call(Command::SetActorPointSize {
            path: raw(path),
            size,
        })
    }

    /// Shows or hides a leaf.
    pub fn set_actor_visibility(
        &self,
        path: &[&str],
        visible: bool,
    ) -> Result<Status, CommandError> {
        self.call(Command::SetActorVisibility {
            path: raw(path),
            visible,
        })
    }

    /// Sets the line width of a leaf.
    pub fn set_actor_line_width(&self, path: &[&str], width: f32) -> Result<Status, CommandError> {
        self.call(Command::SetActorLineWidth {
            path: raw(path),
            width,
        })
    }

    /// Sets the render mode by name. Unknown names select `Surface`.
    pub fn set_actor_mode(&self, path: &[&str], mode: &str) -> Result<Status, CommandError> {
        self.call(Command::SetActorMode {
            path: raw(path),
            mode: RenderMode::from_name(mode),
        })
    }

    /// Loads an image file and applies it to a leaf.
    pub fn set_actor_texture(
        &self,
        path: &[&str],
        file: impl Into<PathBuf>,
    ) -> Result<Status, CommandError> {
        self.call(Command::SetActorTexture {
            path: raw(path),
            file: file.into(),
        })
    }

    /// Removes the texture of a leaf.
    pub fn remove_actor_texture(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::RemoveActorTexture { path: raw(path) })
    }

    /// Shows or hides the frame-axes indicator of a leaf.
    pub fn set_frame_axes_visibility(
        &self,
        path: &[&str],
        visible: bool,
    ) -> Result<Status, CommandError> {
        self.call(Command::SetFrameAxesVisibility {
            path: raw(path),
            visible,
        })
    }

    /// Sets the scale of the frame-axes indicator of a leaf.
    pub fn set_frame_axes_scale(&self, path: &[&str], scale: f32) -> Result<Status, CommandError> {
        self.call(Command::SetFrameAxesScale {
            path: raw(path),
            scale,
        })
    }

    /*
     *
     * Transforms.
     *
     */
    fn transform(
        &self,
        path: &[&str],
        target: Namespace,
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
        stacking: bool,
    ) -> Result<Status, CommandError> {
        self.call(Command::Transform {
            path: raw(path),
            target,
            translation,
            rotation,
            order,
            stacking,
        })
    }

    /// Replaces the local transform of a leaf.
    pub fn set_actor_transform(
        &self,
        path: &[&str],
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
    ) -> Result<Status, CommandError> {
        self.transform(path, Namespace::Actor, translation, rotation, order, false)
    }

    /// Composes a transform onto the local transform of a leaf.
    pub fn apply_actor_transform(
        &self,
        path: &[&str],
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
    ) -> Result<Status, CommandError> {
        self.transform(path, Namespace::Actor, translation, rotation, order, true)
    }

    /// Resets the local transform of a leaf to identity.
    pub fn reset_actor_transform(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::ResetTransform {
            path: raw(path),
            target: Namespace::Actor,
        })
    }

    /// Replaces the local transform of a directory.
    pub fn set_directory_transform(
        &self,
        path: &[&str],
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
    ) -> Result<Status, CommandError> {
        self.transform(path, Namespace::Directory, translation, rotation, order, false)
    }

    /// Composes a transform onto the local transform of a directory.
    pub fn apply_directory_transform(
        &self,
        path: &[&str],
        translation: Vec3,
        rotation: Vec3,
        order: Option<TransformOrder>,
    ) -> Result<Status, CommandError> {
        self.transform(path, Namespace::Directory, translation, rotation, order, true)
    }

    /// Resets the local transform of a directory to identity.
    pub fn reset_directory_transform(&self, path: &[&str]) -> Result<Status, CommandError> {
        self.call(Command::ResetTransform {
            path: raw(path),
            target: Namespace::Directory,
        })
    }

    /*
     *
     * Queries.
     *
     */
    /// A snapshot of a leaf.
    pub fn query_actor(&self, path: &[&str]) -> Result<ActorInfo, CommandError> {
        match self.request(Command::QueryActor { path: raw(path) })? {
            Reply::Actor(info) => Ok(info),
            Reply::Status(status) => Err(CommandError::Rejected(status)),
            _ => Err(CommandError::UnexpectedReply),
        }
    }

    /// A snapshot of a directory.
    pub fn query_directory(&self, path: &[&str]) -> Result<DirectoryInfo, CommandError> {
        match self.request(Command::QueryDirectory { path: raw(path) })? {
            Reply::Directory(info) => Ok(info),
            Reply::Status(status) => Err(CommandError::Rejected(status)),
            _ => Err(CommandError::UnexpectedReply),
        }
    }
}

fn raw(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

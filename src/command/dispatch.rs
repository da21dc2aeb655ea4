use crate::command::{ActorInfo, Command, DirectoryInfo, Reply, Status};
use crate::error::{Result, SceneError};
use crate::renderer::Renderer;
use crate::scene::{Namespace, ScenePath, SceneTree};

impl<R: Renderer> SceneTree<R> {
    /// Executes a command and answers it.
    ///
    /// Mutating commands are answered with a [`Reply::Status`]. Queries are
    /// answered with the requested snapshot, or with a status on failure.
    pub fn execute(&mut self, command: Command) -> Reply {
        let name = command.name();

        match self.dispatch(command) {
            Ok(reply) => reply,
            Err(err) => {
                log::debug!("{} answered with: {}", name, err);
                match err.status() {
                    Some(status) => Reply::Status(status),
                    None => Reply::Resource(err.to_string()),
                }
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::AddDirectory { path } => {
                let _ = self.add_directory(&parse(path)?)?;
            }
            Command::AddActor { path, geometry } => {
                let _ = self.add_actor(&parse(path)?, &geometry)?;
            }
            Command::SetActor { path, geometry } => {
                self.replace_actor(&parse(path)?, &geometry)?;
            }
            Command::RemoveActor { path } => self.remove_actor(&parse(path)?)?,
            Command::RemoveDirectory { path } => self.remove_directory(&parse(path)?)?,
            Command::Rename { path, name } => {
                let _ = self.rename(&parse(path)?, &name)?;
            }
            Command::SetActorOffsetOrientation {
                path,
                offset,
                orientation,
            } => self.set_offset_orientation(&parse(path)?, offset, orientation)?,
            Command::SetDirectoryOffsetOrientation {
                path,
                offset,
                orientation,
            } => self.set_subtree_offset_orientation(&parse(path)?, offset, orientation)?,
            Command::SetActorColor { path, color } => self.set_color(&parse(path)?, color)?,
            Command::SetActorOpacity { path, opacity } => {
                self.set_opacity(&parse(path)?, opacity)?
            }
            Command::SetActorScale { path, scale } => self.set_scale(&parse(path)?, scale)?,
            Command::SetActorPointSize { path, size } => {
                self.set_point_size(&parse(path)?, size)?
            }
            Command::SetActorVisibility { path, visible } => {
                self.set_visibility(&parse(path)?, visible)?
            }
            Command::SetActorLineWidth { path, width } => {
                self.set_line_width(&parse(path)?, width)?
            }
            Command::SetActorMode { path, mode } => self.set_mode(&parse(path)?, mode)?,
            Command::SetActorTexture { path, file } => self.set_texture(&parse(path)?, &file)?,
            Command::RemoveActorTexture { path } => self.remove_texture(&parse(path)?)?,
            Command::SetFrameAxesVisibility { path, visible } => {
                self.set_frame_axes_visibility(&parse(path)?, visible)?
            }
            Command::SetFrameAxesScale { path, scale } => {
                self.set_frame_axes_scale(&parse(path)?, scale)?
            }
            Command::Transform {
                path,
                target,
                translation,
                rotation,
                order,
                stacking,
            } => self.apply_transform(&parse(path)?, target, translation, rotation, order, stacking)?,
            Command::ResetTransform { path, target } => {
                self.reset_transform(&parse(path)?, target)?
            }
            Command::QueryActor { path } => {
                return self.actor_info(&parse(path)?).map(Reply::Actor);
            }
            Command::QueryDirectory { path } => {
                return self.directory_info(&parse(path)?).map(Reply::Directory);
            }
        }

        Ok(Reply::Status(Status::Ok))
    }

    /// A snapshot of the leaf at `path`.
    pub fn actor_info(&self, path: &ScenePath) -> Result<ActorInfo> {
        let node = self.node(path, Namespace::Actor)?;
        let actor = node
            .actor()
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))?;

        Ok(ActorInfo {
            path: path.clone(),
            kind: node.kind(),
            attributes: actor.attributes.clone(),
            local_transform: *node.local_transform(),
            world_transform: *node.world_transform(),
            frame_axes: actor.frame_axes.as_ref().map(|a| (a.visible, a.scale)),
        })
    }

    /// A snapshot of the directory at `path`.
    pub fn directory_info(&self, path: &ScenePath) -> Result<DirectoryInfo> {
        let node = self.node(path, Namespace::Directory)?;

        Ok(DirectoryInfo {
            path: path.clone(),
            children: self.children(path)?,
            local_transform: *node.local_transform(),
            world_transform: *node.world_transform(),
        })
    }
}

fn parse(path: Vec<String>) -> Result<ScenePath> {
    ScenePath::new(path).inspect_err(|e| log::warn!("Rejected command: {}", e))
}

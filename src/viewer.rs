//! The process-wide owner of the scene.

use crate::command::{self, Command, CommandReceiver, Reply, SceneClient};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::procedural::Geometry;
use crate::renderer::Renderer;
use crate::scene::{ScenePath, SceneTree};

/// Owns the scene tree and executes the commands sent by its clients.
///
/// The viewer lives on the thread owning the renderer. Other threads talk to it
/// through the [`SceneClient`]s it hands out, and their commands are executed
/// whenever [`Viewer::update`] (or [`Viewer::run`]) is called.
///
/// # Example
/// ```
/// # use lightfield::prelude::*;
/// let (mut viewer, client) = Viewer::new(RecordingRenderer::new(), ViewerConfig::empty()).unwrap();
///
/// let producer = std::thread::spawn(move || client.add_axes(&["frames", "base"]));
///
/// while !producer.is_finished() {
///     let _ = viewer.update();
/// }
/// assert_eq!(producer.join().unwrap(), Ok(Status::Ok));
/// ```
pub struct Viewer<R: Renderer> {
    tree: SceneTree<R>,
    receiver: CommandReceiver,
    config: ViewerConfig,
}

impl<R: Renderer> Viewer<R> {
    /// Creates a viewer and a first client connected to it.
    ///
    /// The scene is populated with the orientation axes overlay and the base
    /// grid, as configured.
    ///
    /// # Errors
    /// Fails if the configured grid path is malformed.
    pub fn new(renderer: R, config: ViewerConfig) -> Result<(Self, SceneClient)> {
        let (client, receiver) = command::channel(config.queue_capacity, config.command_timeout);
        let mut tree = SceneTree::new(renderer);
        tree.set_default_order(config.default_order);

        if config.orientation_axes {
            let _ = tree.add_orientation_axes()?;
        }

        if let Some(grid) = &config.base_grid {
            let path = ScenePath::new(grid.path.iter().cloned())?;
            let _ = tree.add_actor(&path, &Geometry::grid(grid.full_length, grid.cell_length))?;
        }

        log::info!("Viewer started with {} scene nodes.", tree.len());

        Ok((
            Self {
                tree,
                receiver,
                config,
            },
            client,
        ))
    }

    /// Executes every pending command. Returns how many were executed.
    pub fn update(&mut self) -> usize {
        self.receiver.process_pending(&mut self.tree)
    }

    /// Executes commands as they arrive, until every client is dropped.
    pub fn run(&mut self) {
        self.receiver.run(&mut self.tree)
    }

    /// Executes a command issued on the owning thread, e.g. by the GUI.
    pub fn execute(&mut self, command: Command) -> Reply {
        self.tree.execute(command)
    }

    /// The scene tree.
    pub fn scene(&self) -> &SceneTree<R> {
        &self.tree
    }

    /// The scene tree, mutably.
    pub fn scene_mut(&mut self) -> &mut SceneTree<R> {
        &mut self.tree
    }

    /// The configuration the viewer was created with.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Stops the viewer and returns its scene. Pending commands are dropped.
    pub fn into_scene(self) -> SceneTree<R> {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Status;
    use crate::config::GridSetup;
    use crate::renderer::RecordingRenderer;
    use crate::scene::Namespace;

    #[test]
    fn test_startup_population() {
        let (viewer, _client) =
            Viewer::new(RecordingRenderer::new(), ViewerConfig::default()).unwrap();
        let scene = viewer.scene();

        assert!(scene.contains(&ScenePath::orientation_axes(), Namespace::Actor));
        assert!(scene.contains(&ScenePath::new(["grids"]).unwrap(), Namespace::Directory));
        assert!(scene.contains(
            &ScenePath::new(["grids", "1 km x 1 km, 10 m"]).unwrap(),
            Namespace::Actor
        ));
        // overlay, grids directory, grid leaf
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_malformed_grid_path() {
        let config = ViewerConfig::empty().with_base_grid(Some(GridSetup {
            path: vec![],
            ..Default::default()
        }));

        assert!(Viewer::new(RecordingRenderer::new(), config).is_err());
    }

    #[test]
    fn test_update_processes_pending_commands() {
        let (mut viewer, _client) =
            Viewer::new(RecordingRenderer::new(), ViewerConfig::empty()).unwrap();

        assert_eq!(viewer.update(), 0);
        assert_eq!(
            viewer.execute(Command::AddDirectory {
                path: vec!["robot".to_string()]
            }),
            Reply::Status(Status::Ok)
        );
        assert_eq!(viewer.scene().len(), 1);
    }
}

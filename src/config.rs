//! Viewer configuration.

use crate::transform::TransformOrder;
use web_time::Duration;

/// The grid added to the scene at start-up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSetup {
    /// Where the grid is inserted.
    pub path: Vec<String>,
    /// Side length of the grid.
    pub full_length: f32,
    /// Side length of one cell.
    pub cell_length: f32,
}

impl Default for GridSetup {
    fn default() -> Self {
        Self {
            path: vec!["grids".to_string(), "1 km x 1 km, 10 m".to_string()],
            full_length: 1000.0,
            cell_length: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Viewer options.
pub struct ViewerConfig {
    /// How long a client waits for a command to be answered.
    pub command_timeout: Duration,
    /// Number of commands that can be queued before clients block.
    pub queue_capacity: usize,
    /// Is the orientation axes overlay added at start-up?
    pub orientation_axes: bool,
    /// The grid added at start-up, if any.
    pub base_grid: Option<GridSetup>,
    /// Transform order used when a command does not give one.
    pub default_order: TransformOrder,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_millis(10_000),
            queue_capacity: 1024,
            orientation_axes: true,
            base_grid: Some(GridSetup::default()),
            default_order: TransformOrder::TranslateThenRotate,
        }
    }
}

impl ViewerConfig {
    /// A configuration with nothing added at start-up.
    pub fn empty() -> Self {
        Self {
            orientation_axes: false,
            base_grid: None,
            ..Self::default()
        }
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_orientation_axes(mut self, enabled: bool) -> Self {
        self.orientation_axes = enabled;
        self
    }

    pub fn with_base_grid(mut self, grid: Option<GridSetup>) -> Self {
        self.base_grid = grid;
        self
    }

    pub fn with_default_order(mut self, order: TransformOrder) -> Self {
        self.default_order = order;
        self
    }
}

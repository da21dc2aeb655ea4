//! Error types of the scene tree.

use crate::command::Status;
use crate::resource::TextureError;
use crate::scene::ScenePath;
use thiserror::Error;

/// An operation on the scene tree that was rejected.
///
/// Every rejection is detected before the tree is mutated, so the tree is
/// left exactly as it was when one of these is returned.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The path sequence is empty, or one of its segments is empty or contains the separator.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// The path is already occupied by a node.
    #[error("path already exists: {0}")]
    ExistingPath(ScenePath),

    /// No node of the requested kind lives at this path.
    #[error("path does not exist: {0}")]
    NonexistingPath(ScenePath),

    /// Loading a texture failed.
    #[error("texture error: {0}")]
    Texture(#[from] TextureError),
}

impl SceneError {
    /// The façade status reporting this error.
    ///
    /// Texture failures belong to the I/O category, which has no status of its own.
    pub fn status(&self) -> Option<Status> {
        match self {
            SceneError::MalformedPath(_) => Some(Status::MalformedPath),
            SceneError::ExistingPath(_) => Some(Status::ExistingPath),
            SceneError::NonexistingPath(_) => Some(Status::NonexistingPath),
            SceneError::Texture(_) => None,
        }
    }
}

/// Result type for scene tree operations.
pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let path = ScenePath::new(["a", "b"]).unwrap();

        assert_eq!(
            SceneError::MalformedPath(String::new()).status(),
            Some(Status::MalformedPath)
        );
        assert_eq!(
            SceneError::ExistingPath(path.clone()).status(),
            Some(Status::ExistingPath)
        );
        assert_eq!(
            SceneError::NonexistingPath(path).status(),
            Some(Status::NonexistingPath)
        );
        assert_eq!(
            SceneError::Texture(TextureError::UnsupportedFormat("bmp".to_string())).status(),
            None
        );
    }

    #[test]
    fn test_display() {
        let path = ScenePath::new(["robot", "torso"]).unwrap();
        assert_eq!(
            SceneError::NonexistingPath(path).to_string(),
            "path does not exist: robot/torso"
        );
    }
}

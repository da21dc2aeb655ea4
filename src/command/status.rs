use std::fmt;
use thiserror::Error;
use web_time::Duration;

/// Outcome of a mutating command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    /// The command fully completed.
    Ok,
    /// The path is empty, or has an empty segment or a segment containing the separator.
    MalformedPath,
    /// The path is already occupied.
    ExistingPath,
    /// Nothing of the targeted kind lives at the path.
    NonexistingPath,
}

impl Status {
    /// Whether this is [`Status::Ok`].
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// The wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::MalformedPath => "malformed_path",
            Status::ExistingPath => "existing_path",
            Status::NonexistingPath => "nonexisting_path",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a request sent through a [`SceneClient`](super::SceneClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No reply arrived in time. The command may still be executed later.
    #[error("no reply after {0:?}")]
    Timeout(Duration),

    /// The scene owner is gone.
    #[error("the scene is no longer running")]
    Disconnected,

    /// A resource (e.g. a texture file) could not be loaded.
    #[error("resource error: {0}")]
    Resource(String),

    /// A query was answered with a failure status.
    #[error("request rejected: {0}")]
    Rejected(Status),

    /// The reply does not match the request.
    #[error("unexpected reply")]
    UnexpectedReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(Status::Ok.to_string(), "ok");
        assert_eq!(Status::NonexistingPath.to_string(), "nonexisting_path");
        assert!(Status::Ok.is_ok());
        assert!(!Status::ExistingPath.is_ok());
    }
}

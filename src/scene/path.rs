//! Hierarchical scene paths.

use crate::error::SceneError;
use std::fmt;

/// The character separating path segments in the textual form of a path.
pub const PATH_SEPARATOR: char = '/';

/// The single-segment path of the orientation axes system overlay.
pub const ORIENTATION_AXES: &str = "orientation axes";

/// Which of the two disjoint namespaces a lookup targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Grouping nodes. Their keys carry a trailing separator.
    Directory,
    /// Renderable leaves (actors, billboards, axes).
    Actor,
}

/// An ordered, non-empty sequence of path segments from the root to a node.
///
/// Every segment is non-empty and free of [`PATH_SEPARATOR`]. A `ScenePath`
/// can only be built through [`ScenePath::new`] or [`ScenePath::parse`], so a
/// value of this type is always well-formed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenePath {
    segments: Vec<String>,
}

impl ScenePath {
    /// Validates a sequence of segments into a path.
    ///
    /// # Errors
    /// Returns [`SceneError::MalformedPath`] if the sequence is empty, or if a
    /// segment is empty or contains the path separator.
    ///
    /// # Example
    /// ```
    /// # use lightfield::scene::ScenePath;
    /// let path = ScenePath::new(["robot", "torso"]).unwrap();
    /// assert_eq!(path.name(), "torso");
    /// assert!(ScenePath::new(["robot", ""]).is_err());
    /// ```
    pub fn new<I, S>(segments: I) -> Result<Self, SceneError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(SceneError::MalformedPath("empty path".to_string()));
        }

        for segment in &segments {
            if segment.is_empty() {
                return Err(SceneError::MalformedPath(format!(
                    "empty segment in {:?}",
                    segments
                )));
            }

            if segment.contains(PATH_SEPARATOR) {
                return Err(SceneError::MalformedPath(format!(
                    "segment {:?} contains '{}'",
                    segment, PATH_SEPARATOR
                )));
            }
        }

        Ok(Self { segments })
    }

    /// Parses a `/`-separated path. Leading and trailing separators are ignored.
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let trimmed = text.trim_matches(PATH_SEPARATOR);
        if trimmed.is_empty() {
            return Err(SceneError::MalformedPath(format!("{:?}", text)));
        }

        Self::new(trimmed.split(PATH_SEPARATOR))
    }

    /// The path of the orientation axes overlay.
    pub fn orientation_axes() -> Self {
        Self {
            segments: vec![ORIENTATION_AXES.to_string()],
        }
    }

    /// The segments of this path.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments.
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The last segment, i.e. the display name of the node.
    #[inline]
    pub fn name(&self) -> &str {
        // A path always holds at least one segment.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The path of the parent directory, or `None` for a top-level node.
    pub fn parent(&self) -> Option<ScenePath> {
        if self.segments.len() <= 1 {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Every proper prefix of this path, from the top-level one down to the parent.
    pub fn ancestors(&self) -> impl Iterator<Item = ScenePath> + '_ {
        (1..self.segments.len()).map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// The path of a child named `name`.
    pub fn child(&self, name: &str) -> Result<ScenePath, SceneError> {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self::new(segments)
    }

    /// This path with its last segment replaced by `name`.
    pub fn with_name(&self, name: &str) -> Result<ScenePath, SceneError> {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = name.to_string();
        }
        Self::new(segments)
    }

    /// Checks whether `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &ScenePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Replaces the leading `from` prefix of this path by `to`.
    ///
    /// Returns `None` if `from` is not a prefix of this path.
    pub fn replace_prefix(&self, from: &ScenePath, to: &ScenePath) -> Option<ScenePath> {
        if !self.starts_with(from) {
            return None;
        }

        let mut segments = to.segments.clone();
        segments.extend_from_slice(&self.segments[from.segments.len()..]);
        Some(Self { segments })
    }

    /// Whether this is the path of the orientation axes overlay.
    pub fn is_orientation_axes(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == ORIENTATION_AXES
    }

    /// The lookup key of this path in the given namespace.
    ///
    /// Directory keys end with a trailing separator so that a directory
    /// address never equals a leaf address with the same segments.
    pub fn key(&self, namespace: Namespace) -> String {
        let mut key = self.segments.join("/");
        if namespace == Namespace::Directory {
            key.push(PATH_SEPARATOR);
        }
        key
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl fmt::Debug for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScenePath({:?})", self.segments)
    }
}

impl TryFrom<Vec<String>> for ScenePath {
    type Error = SceneError;

    fn try_from(segments: Vec<String>) -> Result<Self, SceneError> {
        Self::new(segments)
    }
}

impl TryFrom<&[&str]> for ScenePath {
    type Error = SceneError;

    fn try_from(segments: &[&str]) -> Result<Self, SceneError> {
        Self::new(segments.iter().copied())
    }
}

impl<const N: usize> TryFrom<[&str; N]> for ScenePath {
    type Error = SceneError;

    fn try_from(segments: [&str; N]) -> Result<Self, SceneError> {
        Self::new(segments)
    }
}

impl TryFrom<&str> for ScenePath {
    type Error = SceneError;

    fn try_from(text: &str) -> Result<Self, SceneError> {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> ScenePath {
        ScenePath::new(segments.iter().copied()).unwrap()
    }

    #[test]
    fn test_malformed_paths() {
        assert!(matches!(
            ScenePath::new(Vec::<String>::new()),
            Err(SceneError::MalformedPath(_))
        ));
        assert!(matches!(
            ScenePath::new(["a", ""]),
            Err(SceneError::MalformedPath(_))
        ));
        assert!(matches!(
            ScenePath::new(["a/b"]),
            Err(SceneError::MalformedPath(_))
        ));
        assert!(matches!(
            ScenePath::parse("//"),
            Err(SceneError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(ScenePath::parse("/robot/arm/").unwrap(), path(&["robot", "arm"]));
        assert!(ScenePath::parse("robot//arm").is_err());
    }

    #[test]
    fn test_parent_and_ancestors() {
        let p = path(&["a", "b", "c"]);
        assert_eq!(p.parent(), Some(path(&["a", "b"])));
        assert_eq!(path(&["a"]).parent(), None);

        let ancestors: Vec<_> = p.ancestors().collect();
        assert_eq!(ancestors, vec![path(&["a"]), path(&["a", "b"])]);
    }

    #[test]
    fn test_keys_are_namespace_disjoint() {
        let p = path(&["grids", "1 km x 1 km, 10 m"]);
        assert_eq!(p.key(Namespace::Actor), "grids/1 km x 1 km, 10 m");
        assert_eq!(p.key(Namespace::Directory), "grids/1 km x 1 km, 10 m/");
    }

    #[test]
    fn test_replace_prefix() {
        let p = path(&["robot", "arm", "hand"]);
        let renamed = p
            .replace_prefix(&path(&["robot", "arm"]), &path(&["robot", "left arm"]))
            .unwrap();
        assert_eq!(renamed, path(&["robot", "left arm", "hand"]));
        assert_eq!(p.replace_prefix(&path(&["other"]), &path(&["x"])), None);
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        assert!(path(&["robot", "arm"]).starts_with(&path(&["robot"])));
        assert!(!path(&["robots", "arm"]).starts_with(&path(&["robot"])));
    }

    #[test]
    fn test_with_name_validates() {
        let p = path(&["a", "b"]);
        assert_eq!(p.with_name("c").unwrap(), path(&["a", "c"]));
        assert!(p.with_name("").is_err());
        assert!(p.with_name("x/y").is_err());
    }

    #[test]
    fn test_orientation_axes() {
        assert!(ScenePath::orientation_axes().is_orientation_axes());
        assert!(!path(&["x", ORIENTATION_AXES]).is_orientation_axes());
    }
}

//! Exact-match index from full scene paths to nodes.

use crate::error::SceneError;
use crate::scene::node::NodeId;
use crate::scene::path::{Namespace, ScenePath};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Maps each occupied path to the node living there.
///
/// Directory and actor addresses are kept apart by their keys (see
/// [`ScenePath::key`]), but the resolver refuses to register two nodes at the
/// same segment sequence, whatever their namespaces.
#[derive(Default, Debug, Clone)]
pub struct PathResolver {
    index: HashMap<String, NodeId>,
}

impl PathResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node at `path` in the given namespace.
    pub fn resolve(&self, path: &ScenePath, namespace: Namespace) -> Option<NodeId> {
        self.index.get(&path.key(namespace)).copied()
    }

    /// The node occupying `path` in either namespace, with its namespace.
    pub fn occupant(&self, path: &ScenePath) -> Option<(NodeId, Namespace)> {
        self.resolve(path, Namespace::Directory)
            .map(|id| (id, Namespace::Directory))
            .or_else(|| {
                self.resolve(path, Namespace::Actor)
                    .map(|id| (id, Namespace::Actor))
            })
    }

    /// Fails with `ExistingPath` if any node already occupies `path`.
    pub fn ensure_vacant(&self, path: &ScenePath) -> Result<(), SceneError> {
        match self.occupant(path) {
            Some(_) => Err(SceneError::ExistingPath(path.clone())),
            None => Ok(()),
        }
    }

    /// Registers `id` at `path`.
    pub fn insert(
        &mut self,
        path: &ScenePath,
        namespace: Namespace,
        id: NodeId,
    ) -> Result<(), SceneError> {
        self.ensure_vacant(path)?;

        match self.index.entry(path.key(namespace)) {
            Entry::Occupied(_) => Err(SceneError::ExistingPath(path.clone())),
            Entry::Vacant(entry) => {
                let _ = entry.insert(id);
                Ok(())
            }
        }
    }

    /// Unregisters the node at `path`.
    pub fn remove(&mut self, path: &ScenePath, namespace: Namespace) -> Option<NodeId> {
        self.index.remove(&path.key(namespace))
    }

    /// Moves the registration of a node from `from` to `to`.
    pub fn rekey(&mut self, from: &ScenePath, to: &ScenePath, namespace: Namespace) {
        if let Some(id) = self.remove(from, namespace) {
            let _ = self.index.insert(to.key(namespace), id);
        }
    }

    /// The number of registered paths.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no path is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

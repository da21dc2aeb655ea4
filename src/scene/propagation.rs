//! Recomputation of world transforms after a transform edit.

use crate::renderer::Renderer;
use crate::scene::node::{NodeId, SceneNode};
use crate::transform::Transform;
use std::collections::HashMap;

/// Recomputes the world transform of `start` and of its whole subtree.
///
/// Every node reached gets `world = parent_world * local`, walking depth-first
/// from `start`. Leaves push their new world transform to their render handle
/// and to the handle of their frame-axes indicator. Returns the number of
/// nodes updated.
pub(crate) fn propagate_transforms<R: Renderer>(
    nodes: &mut HashMap<NodeId, SceneNode>,
    renderer: &mut R,
    start: NodeId,
) -> usize {
    let parent_world = nodes
        .get(&start)
        .and_then(|node| node.parent)
        .and_then(|parent| nodes.get(&parent))
        .map(|parent| parent.world_transform)
        .unwrap_or(Transform::IDENTITY);

    let mut stack = vec![(start, parent_world)];
    let mut updated = 0;

    while let Some((id, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(&id) else {
            log::warn!("Transform propagation reached unknown node {:?}.", id);
            continue;
        };

        node.world_transform = parent_world.compose(&node.local_transform);
        updated += 1;
        log::trace!("Propagated world transform to {}.", node.path);

        if let Some(actor) = &node.actor {
            renderer.set_transform(actor.handle, &node.world_transform);

            if let Some(axes) = &actor.frame_axes {
                renderer.set_transform(axes.handle, &node.world_transform);
            }
        }

        // Reversed so that children are visited in insertion order.
        for child in node.children.iter().rev() {
            stack.push((*child, node.world_transform));
        }
    }

    updated
}

/// The composition of the local transforms from the root down to `id`.
///
/// This walks the ancestor chain instead of reading cached world transforms.
pub(crate) fn composed_transform(nodes: &HashMap<NodeId, SceneNode>, id: NodeId) -> Transform {
    let mut chain = Vec::new();
    let mut curr = Some(id);

    while let Some(node) = curr.and_then(|id| nodes.get(&id)) {
        chain.push(node.local_transform);
        curr = node.parent;
    }

    chain
        .iter()
        .rev()
        .fold(Transform::IDENTITY, |acc, local| acc.compose(local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ScenePath;
    use crate::renderer::RecordingRenderer;
    use glamx::Vec3;

    fn chain() -> HashMap<NodeId, SceneNode> {
        let mut nodes = HashMap::new();
        let a = ScenePath::new(["a"]).unwrap();
        let b = a.child("b").unwrap();

        let mut root = SceneNode::new_directory(NodeId(1), a, None);
        root.children.push(NodeId(2));
        root.local_transform = Transform::from_translation(Vec3::X);

        let mut child = SceneNode::new_directory(NodeId(2), b, Some(NodeId(1)));
        child.local_transform = Transform::from_translation(Vec3::Y);

        let _ = nodes.insert(NodeId(1), root);
        let _ = nodes.insert(NodeId(2), child);
        nodes
    }

    #[test]
    fn test_propagation_composes_down_the_chain() {
        let mut nodes = chain();
        let mut renderer = RecordingRenderer::new();

        assert_eq!(propagate_transforms(&mut nodes, &mut renderer, NodeId(1)), 2);

        let world = nodes[&NodeId(2)].world_transform;
        assert!(world.translation().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1.0e-6));
        assert!(world.abs_diff_eq(&composed_transform(&nodes, NodeId(2)), 1.0e-6));
        // directories have no handle
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn test_propagation_from_inner_node_uses_cached_parent() {
        let mut nodes = chain();
        let mut renderer = RecordingRenderer::new();
        let _ = propagate_transforms(&mut nodes, &mut renderer, NodeId(1));

        if let Some(child) = nodes.get_mut(&NodeId(2)) {
            child.local_transform = Transform::IDENTITY;
        }
        assert_eq!(propagate_transforms(&mut nodes, &mut renderer, NodeId(2)), 1);
        assert!(nodes[&NodeId(2)]
            .world_transform
            .translation()
            .abs_diff_eq(Vec3::X, 1.0e-6));
    }
}

//! The scene tree: single owner of every node.

use crate::color::{self, Color};
use crate::error::{Result, SceneError};
use crate::procedural::Geometry;
use crate::renderer::{RenderHandle, Renderer};
use crate::resource::{Texture, TextureManager};
use crate::scene::node::{Actor, ActorAttributes, FrameAxes, NodeId, NodeKind, RenderMode, SceneNode};
use crate::scene::path::{Namespace, ScenePath};
use crate::scene::propagation::{composed_transform, propagate_transforms};
use crate::scene::resolver::PathResolver;
use crate::transform::{Transform, TransformOrder};
use glamx::Vec3;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// A hierarchy of directories and renderable leaves addressed by path.
///
/// The tree exclusively owns its nodes, and drives a [`Renderer`] through one
/// handle per leaf (plus one per frame-axes indicator). Every operation
/// validates its arguments before mutating anything: an `Err` always leaves the
/// tree and the renderer untouched.
///
/// After every successful operation, the world transform of each node equals the
/// world transform of its parent composed with its own local transform.
///
/// # Example
/// ```
/// # use lightfield::prelude::*;
/// let mut tree = SceneTree::new(RecordingRenderer::new());
/// let torso = ScenePath::new(["robot", "torso"]).unwrap();
///
/// tree.add_actor(&torso, &Geometry::cuboid(1.0, 1.0, 1.0)).unwrap();
/// tree.apply_transform(
///     &ScenePath::new(["robot"]).unwrap(),
///     Namespace::Directory,
///     Vec3::new(1.0, 0.0, 0.0),
///     Vec3::ZERO,
///     None,
///     true,
/// )
/// .unwrap();
///
/// let world = tree.world_transform(&torso, Namespace::Actor).unwrap();
/// assert_eq!(world.translation(), Vec3::new(1.0, 0.0, 0.0));
/// ```
pub struct SceneTree<R: Renderer> {
    nodes: HashMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
    resolver: PathResolver,
    next_id: u64,
    renderer: R,
    textures: TextureManager,
    default_order: TransformOrder,
}

impl<R: Renderer> SceneTree<R> {
    /// Creates an empty tree driving `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            resolver: PathResolver::new(),
            next_id: 0,
            renderer,
            textures: TextureManager::new(),
            default_order: TransformOrder::default(),
        }
    }

    /// The renderer driven by this tree.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer driven by this tree, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consumes the tree and returns its renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// The texture cache.
    pub fn textures_mut(&mut self) -> &mut TextureManager {
        &mut self.textures
    }

    /// The order used by [`Self::apply_transform`] when none is given.
    pub fn default_order(&self) -> TransformOrder {
        self.default_order
    }

    /// Sets the order used by [`Self::apply_transform`] when none is given.
    pub fn set_default_order(&mut self, order: TransformOrder) {
        self.default_order = order;
    }

    /*
     *
     * Insertion.
     *
     */
    /// Adds a directory, creating its missing ancestors.
    ///
    /// # Errors
    /// `ExistingPath` if a node already occupies `path` or if one of its
    /// ancestors is a leaf.
    pub fn add_directory(&mut self, path: &ScenePath) -> Result<NodeId> {
        self.check_insertion(path)
            .inspect_err(|e| log::warn!("addDirectory failed: {}", e))?;

        let parent = self.ensure_ancestors(path);
        let id = self.alloc_id();
        let node = SceneNode::new_directory(id, path.clone(), parent);
        self.attach(node)?;
        self.renderer.request_redraw();

        log::debug!("Added directory {}.", path);
        Ok(id)
    }

    /// Adds a leaf built from `geometry`, creating its missing ancestors.
    ///
    /// The leaf gets default attributes, an identity local transform, and a
    /// hidden frame-axes indicator. Its kind is derived from the geometry.
    ///
    /// # Errors
    /// `ExistingPath` if a node already occupies `path` or if one of its
    /// ancestors is a leaf. No render handle is created on failure.
    pub fn add_actor(&mut self, path: &ScenePath, geometry: &Geometry) -> Result<NodeId> {
        self.check_insertion(path)
            .inspect_err(|e| log::warn!("addActor failed: {}", e))?;

        let handle = self.renderer.create_handle(geometry);
        self.insert_leaf(path, handle, geometry.kind(), true)
    }

    /// Adds a leaf around a render handle created by the caller.
    ///
    /// The tree takes over the handle: it is destroyed when the leaf is removed.
    ///
    /// # Errors
    /// Same as [`Self::add_actor`]. `MalformedPath` if `kind` is not a leaf kind.
    pub fn add_actor_with_handle(
        &mut self,
        path: &ScenePath,
        handle: RenderHandle,
        kind: NodeKind,
    ) -> Result<NodeId> {
        if !kind.is_leaf() {
            let err = SceneError::MalformedPath(format!("{} cannot hold a directory handle", path));
            log::warn!("addActor failed: {}", err);
            return Err(err);
        }

        self.check_insertion(path)
            .inspect_err(|e| log::warn!("addActor failed: {}", e))?;

        self.insert_leaf(path, handle, kind, true)
    }

    /// Adds the orientation axes overlay at `["orientation axes"]`.
    ///
    /// The overlay has no frame-axes indicator, and only its visibility can be changed.
    pub fn add_orientation_axes(&mut self) -> Result<NodeId> {
        let path = ScenePath::orientation_axes();
        self.resolver.ensure_vacant(&path)?;

        let handle = self.renderer.create_handle(&Geometry::axes());
        self.insert_leaf(&path, handle, NodeKind::Axes, false)
    }

    /// Replaces the geometry of an existing leaf.
    ///
    /// The old render handle is destroyed, and every stored attribute and the
    /// current world transform are applied to the new one. The leaf keeps its
    /// path, local transform and frame-axes indicator; its kind is re-derived
    /// from the new geometry.
    pub fn replace_actor(&mut self, path: &ScenePath, geometry: &Geometry) -> Result<()> {
        if self.ignore_overlay("setActor", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Actor)
            .inspect_err(|e| log::warn!("setActor failed: {}", e))?;

        let new_handle = self.renderer.create_handle(geometry);
        let kind = geometry.kind();
        let texture = self.stored_texture(id).filter(|_| kind.accepts_texture());

        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))?;
        node.kind = kind;
        let world = node.world_transform;

        if let Some(actor) = node.actor.as_mut() {
            let old_handle = std::mem::replace(&mut actor.handle, new_handle);
            self.renderer.destroy_handle(old_handle);

            if !kind.accepts_texture() {
                actor.attributes.texture = None;
            }

            self.renderer.set_transform(new_handle, &world);
            apply_attributes(
                &mut self.renderer,
                new_handle,
                kind,
                &actor.attributes,
                texture.as_deref(),
            );
        }

        self.renderer.request_redraw();
        log::debug!("Replaced the geometry of {} with a {}.", path, geometry.label());
        Ok(())
    }

    /*
     *
     * Removal.
     *
     */
    /// Removes a leaf and its frame-axes indicator.
    pub fn remove_actor(&mut self, path: &ScenePath) -> Result<()> {
        if self.ignore_overlay("removeActor", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Actor)
            .inspect_err(|e| log::warn!("removeActor failed: {}", e))?;

        self.remove_subtree(id);
        self.renderer.request_redraw();
        log::debug!("Removed actor {}.", path);
        Ok(())
    }

    /// Removes a directory and everything below it.
    pub fn remove_directory(&mut self, path: &ScenePath) -> Result<()> {
        if self.ignore_overlay("removeDirectory", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Directory)
            .inspect_err(|e| log::warn!("removeDirectory failed: {}", e))?;

        let removed = self.remove_subtree(id);
        self.renderer.request_redraw();
        log::debug!("Removed directory {} ({} nodes).", path, removed);
        Ok(())
    }

    /*
     *
     * Rename.
     *
     */
    /// Renames the node at `path`, rewriting the paths of all its descendants.
    ///
    /// Transforms are left untouched. Returns the new path of the node.
    ///
    /// # Errors
    /// `MalformedPath` if `new_name` is empty or contains the separator,
    /// `NonexistingPath` if nothing lives at `path`, `ExistingPath` if the new
    /// path is already taken.
    pub fn rename(&mut self, path: &ScenePath, new_name: &str) -> Result<ScenePath> {
        if self.ignore_overlay("rename", path) {
            return Ok(path.clone());
        }

        let new_path = path
            .with_name(new_name)
            .inspect_err(|e| log::warn!("rename failed: {}", e))?;

        let (id, _) = self.resolver.occupant(path).ok_or_else(|| {
            let err = SceneError::NonexistingPath(path.clone());
            log::warn!("rename failed: {}", err);
            err
        })?;

        if new_path == *path {
            return Ok(new_path);
        }

        if new_path.is_orientation_axes() || self.resolver.occupant(&new_path).is_some() {
            let err = SceneError::ExistingPath(new_path);
            log::warn!("rename failed: {}", err);
            return Err(err);
        }

        for desc in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(&desc) {
                if let Some(renamed) = node.path.replace_prefix(path, &new_path) {
                    self.resolver
                        .rekey(&node.path, &renamed, node.kind.namespace());
                    node.path = renamed;
                }
            }
        }

        self.renderer.request_redraw();
        log::debug!("Renamed {} to {}.", path, new_path);
        Ok(new_path)
    }

    /*
     *
     * Transforms.
     *
     */
    /// Sets the local transform of a node and propagates it to its subtree.
    ///
    /// With `stacking`, `transform` is composed onto the current local
    /// transform. Otherwise it replaces it.
    pub fn set_transform(
        &mut self,
        path: &ScenePath,
        namespace: Namespace,
        transform: &Transform,
        stacking: bool,
    ) -> Result<()> {
        if self.ignore_overlay("setTransform", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, namespace)
            .inspect_err(|e| log::warn!("setTransform failed: {}", e))?;

        let node = self.node_mut(id, path)?;
        node.local_transform = if stacking {
            node.local_transform.compose(transform)
        } else {
            *transform
        };

        let _ = propagate_transforms(&mut self.nodes, &mut self.renderer, id);
        self.renderer.request_redraw();
        Ok(())
    }

    /// Applies a translation and an Euler rotation to the local transform of a node.
    ///
    /// # Arguments
    /// * `translation` - the translation vector
    /// * `euler` - `(roll, pitch, yaw)` in degrees
    /// * `order` - the combination order, or `None` for [`Self::default_order`]
    /// * `stacking` - whether to compose onto the current local transform or replace it
    pub fn apply_transform(
        &mut self,
        path: &ScenePath,
        namespace: Namespace,
        translation: Vec3,
        euler: Vec3,
        order: Option<TransformOrder>,
        stacking: bool,
    ) -> Result<()> {
        let order = order.unwrap_or(self.default_order);
        let increment = Transform::from_translation_euler(translation, euler, order);
        self.set_transform(path, namespace, &increment, stacking)
    }

    /// Resets the local transform of a node to the identity.
    pub fn reset_transform(&mut self, path: &ScenePath, namespace: Namespace) -> Result<()> {
        self.set_transform(path, namespace, &Transform::IDENTITY, false)
    }

    /*
     *
     * Leaf attributes.
     *
     */
    /// Shows or hides a leaf. This is the only mutation accepted by the orientation axes overlay.
    pub fn set_visibility(&mut self, path: &ScenePath, visible: bool) -> Result<()> {
        self.with_leaf("setActorVisibility", path, true, |renderer, _, actor| {
            actor.attributes.visible = visible;
            renderer.set_visible(actor.handle, visible);
        })
    }

    /// Sets the opacity of a leaf, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, path: &ScenePath, opacity: f32) -> Result<()> {
        let opacity = color::clamp_unit(opacity);
        self.with_leaf("setActorOpacity", path, false, |renderer, _, actor| {
            actor.attributes.opacity = opacity;
            renderer.set_opacity(actor.handle, opacity);
        })
    }

    /// Sets the point size of a leaf, at least 1.
    pub fn set_point_size(&mut self, path: &ScenePath, size: f32) -> Result<()> {
        let size = at_least(size, 1.0);
        self.with_leaf("setActorPointSize", path, false, |renderer, _, actor| {
            actor.attributes.point_size = size;
            renderer.set_point_size(actor.handle, size);
        })
    }

    /// Sets the line width of a leaf, at least 1.
    pub fn set_line_width(&mut self, path: &ScenePath, width: f32) -> Result<()> {
        let width = at_least(width, 1.0);
        self.with_leaf("setActorLineWidth", path, false, |renderer, _, actor| {
            actor.attributes.line_width = width;
            renderer.set_line_width(actor.handle, width);
        })
    }

    /// Sets the uniform scale of a leaf, at least 0. No-op on billboards.
    pub fn set_scale(&mut self, path: &ScenePath, scale: f32) -> Result<()> {
        let scale = at_least(scale, 0.0);
        self.with_leaf("setActorScale", path, false, |renderer, kind, actor| {
            if kind.accepts_scale() {
                actor.attributes.scale = scale;
                renderer.set_scale(actor.handle, scale);
            }
        })
    }

    /// Sets the color of a leaf, clamped into `[0, 1]`.
    pub fn set_color(&mut self, path: &ScenePath, color: Color) -> Result<()> {
        let color = color::clamp(color);
        self.with_leaf("setActorColor", path, false, |renderer, _, actor| {
            actor.attributes.color = color;
            renderer.set_color(actor.handle, color);
        })
    }

    /// Sets how a leaf is drawn. No-op on billboards.
    pub fn set_mode(&mut self, path: &ScenePath, mode: RenderMode) -> Result<()> {
        self.with_leaf("setActorMode", path, false, |renderer, kind, actor| {
            if kind.accepts_mode() {
                actor.attributes.mode = mode;
                renderer.set_render_mode(actor.handle, mode);
            }
        })
    }

    /// Sets the mounting offset of a leaf. No-op on image billboards.
    pub fn set_offset(&mut self, path: &ScenePath, offset: Vec3) -> Result<()> {
        self.with_leaf("setActorOffset", path, false, |renderer, kind, actor| {
            set_mount_offset(renderer, kind, actor, offset);
        })
    }

    /// Sets the mounting orientation of a leaf, as `(roll, pitch, yaw)` degrees.
    pub fn set_orientation(&mut self, path: &ScenePath, orientation: Vec3) -> Result<()> {
        self.with_leaf("setActorOrientation", path, false, |renderer, _, actor| {
            set_mount_orientation(renderer, actor, orientation);
        })
    }

    /// Sets both parts of the mounting pose of a leaf.
    pub fn set_offset_orientation(
        &mut self,
        path: &ScenePath,
        offset: Vec3,
        orientation: Vec3,
    ) -> Result<()> {
        self.with_leaf(
            "setActorOffsetOrientation",
            path,
            false,
            |renderer, kind, actor| {
                set_mount_offset(renderer, kind, actor, offset);
                set_mount_orientation(renderer, actor, orientation);
            },
        )
    }

    /// Sets the mounting pose of every leaf below a directory.
    pub fn set_subtree_offset_orientation(
        &mut self,
        path: &ScenePath,
        offset: Vec3,
        orientation: Vec3,
    ) -> Result<()> {
        if self.ignore_overlay("setDirectoryOffsetOrientation", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Directory)
            .inspect_err(|e| log::warn!("setDirectoryOffsetOrientation failed: {}", e))?;

        for desc in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(&desc) {
                let kind = node.kind;
                if let Some(actor) = node.actor.as_mut() {
                    set_mount_offset(&mut self.renderer, kind, actor, offset);
                    set_mount_orientation(&mut self.renderer, actor, orientation);
                }
            }
        }

        self.renderer.request_redraw();
        Ok(())
    }

    /// Loads an image file and applies it as the texture of a leaf.
    ///
    /// No-op on text billboards, which are not checked for the file either.
    ///
    /// # Errors
    /// `NonexistingPath` if there is no leaf at `path`, `Texture` if the file
    /// cannot be loaded. The leaf is unchanged on error.
    pub fn set_texture(&mut self, path: &ScenePath, file: &Path) -> Result<()> {
        if self.ignore_overlay("setActorTexture", path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Actor)
            .inspect_err(|e| log::warn!("setActorTexture failed: {}", e))?;

        if !self.node_mut(id, path)?.kind.accepts_texture() {
            return Ok(());
        }

        let texture = self
            .textures
            .load(file)
            .map_err(SceneError::from)
            .inspect_err(|e| log::warn!("setActorTexture failed: {}", e))?;

        if let Some(actor) = self.nodes.get_mut(&id).and_then(|n| n.actor.as_mut()) {
            actor.attributes.texture = Some(file.to_path_buf());
            self.renderer.set_texture(actor.handle, Some(&texture));
        }

        self.renderer.request_redraw();
        Ok(())
    }

    /// Removes the texture of a leaf. No-op on text billboards.
    pub fn remove_texture(&mut self, path: &ScenePath) -> Result<()> {
        self.with_leaf("removeActorTexture", path, false, |renderer, kind, actor| {
            if kind.accepts_texture() {
                actor.attributes.texture = None;
                renderer.set_texture(actor.handle, None);
            }
        })
    }

    /// Shows or hides the frame-axes indicator of a leaf.
    pub fn set_frame_axes_visibility(&mut self, path: &ScenePath, visible: bool) -> Result<()> {
        self.with_leaf("setFrameAxesVisibility", path, false, |renderer, _, actor| {
            if let Some(axes) = actor.frame_axes.as_mut() {
                axes.visible = visible;
                renderer.set_visible(axes.handle, visible);
            }
        })
    }

    /// Sets the scale of the frame-axes indicator of a leaf, at least 0.
    pub fn set_frame_axes_scale(&mut self, path: &ScenePath, scale: f32) -> Result<()> {
        let scale = at_least(scale, 0.0);
        self.with_leaf("setFrameAxesScale", path, false, |renderer, _, actor| {
            if let Some(axes) = actor.frame_axes.as_mut() {
                axes.scale = scale;
                renderer.set_scale(axes.handle, scale);
            }
        })
    }

    /*
     *
     * Queries.
     *
     */
    /// Whether a node lives at `path` in the given namespace.
    pub fn contains(&self, path: &ScenePath, namespace: Namespace) -> bool {
        self.resolver.resolve(path, namespace).is_some()
    }

    /// The node at `path` in the given namespace.
    pub fn node(&self, path: &ScenePath, namespace: Namespace) -> Result<&SceneNode> {
        self.resolver
            .resolve(path, namespace)
            .and_then(|id| self.nodes.get(&id))
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))
    }

    /// The node with the given identifier.
    pub fn node_by_id(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// The renderable part of the leaf at `path`.
    pub fn actor(&self, path: &ScenePath) -> Result<&Actor> {
        self.node(path, Namespace::Actor)?
            .actor()
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))
    }

    /// The attributes of the leaf at `path`.
    pub fn attributes(&self, path: &ScenePath) -> Result<&ActorAttributes> {
        Ok(&self.actor(path)?.attributes)
    }

    /// The local transform of a node.
    pub fn local_transform(&self, path: &ScenePath, namespace: Namespace) -> Result<Transform> {
        Ok(self.node(path, namespace)?.local_transform)
    }

    /// The cached world transform of a node.
    pub fn world_transform(&self, path: &ScenePath, namespace: Namespace) -> Result<Transform> {
        Ok(self.node(path, namespace)?.world_transform)
    }

    /// The world transform of a node recomputed from its ancestor chain.
    ///
    /// This always equals [`Self::world_transform`] up to rounding.
    pub fn composed_transform(&self, path: &ScenePath, namespace: Namespace) -> Result<Transform> {
        let id = self.resolve(path, namespace)?;
        Ok(composed_transform(&self.nodes, id))
    }

    /// The paths of the children of a directory, in insertion order.
    pub fn children(&self, path: &ScenePath) -> Result<Vec<ScenePath>> {
        let node = self.node(path, Namespace::Directory)?;
        Ok(self.paths_of(&node.children))
    }

    /// The paths of the top-level nodes, in insertion order.
    pub fn roots(&self) -> Vec<ScenePath> {
        self.paths_of(&self.roots)
    }

    /// Iterates over every node, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.values()
    }

    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every render handle held by the tree, frame-axes indicators included.
    pub fn handles(&self) -> Vec<RenderHandle> {
        let mut handles = Vec::new();

        for actor in self.nodes.values().filter_map(|n| n.actor.as_ref()) {
            handles.push(actor.handle);
            if let Some(axes) = &actor.frame_axes {
                handles.push(axes.handle);
            }
        }

        handles
    }

    /*
     *
     * Internals.
     *
     */
    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn resolve(&self, path: &ScenePath, namespace: Namespace) -> Result<NodeId> {
        self.resolver
            .resolve(path, namespace)
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))
    }

    fn node_mut(&mut self, id: NodeId, path: &ScenePath) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))
    }

    fn paths_of(&self, ids: &[NodeId]) -> Vec<ScenePath> {
        ids.iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.path.clone())
            .collect()
    }

    /// Logs and reports mutations targeting the orientation axes overlay.
    ///
    /// Without an overlay node, the path is looked up like any other.
    fn ignore_overlay(&self, op: &str, path: &ScenePath) -> bool {
        if path.is_orientation_axes() && self.contains(path, Namespace::Actor) {
            log::warn!("{} ignored: the orientation axes only accept visibility changes.", op);
            true
        } else {
            false
        }
    }

    fn check_insertion(&self, path: &ScenePath) -> Result<()> {
        if path.is_orientation_axes() {
            return Err(SceneError::ExistingPath(path.clone()));
        }

        self.resolver.ensure_vacant(path)?;

        for ancestor in path.ancestors() {
            if self.resolver.resolve(&ancestor, Namespace::Actor).is_some() {
                return Err(SceneError::ExistingPath(ancestor));
            }
        }

        Ok(())
    }

    /// Finds or creates every ancestor directory of `path`, returning the parent.
    ///
    /// Must only be called after [`Self::check_insertion`] succeeded.
    fn ensure_ancestors(&mut self, path: &ScenePath) -> Option<NodeId> {
        let mut parent = None;

        for ancestor in path.ancestors() {
            let id = match self.resolver.resolve(&ancestor, Namespace::Directory) {
                Some(id) => id,
                None => {
                    let id = self.alloc_id();
                    let node = SceneNode::new_directory(id, ancestor.clone(), parent);
                    if self.attach(node).is_err() {
                        return parent;
                    }
                    log::debug!("Created intermediate directory {}.", ancestor);
                    id
                }
            };

            parent = Some(id);
        }

        parent
    }

    /// Registers a new node under its parent, computing its world transform once.
    fn attach(&mut self, mut node: SceneNode) -> Result<()> {
        self.resolver
            .insert(&node.path, node.kind.namespace(), node.id)?;

        node.world_transform = match node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent) => {
                parent.children.push(node.id);
                parent.world_transform.compose(&node.local_transform)
            }
            None => {
                self.roots.push(node.id);
                node.local_transform
            }
        };

        let _ = self.nodes.insert(node.id, node);
        Ok(())
    }

    fn insert_leaf(
        &mut self,
        path: &ScenePath,
        handle: RenderHandle,
        kind: NodeKind,
        with_frame_axes: bool,
    ) -> Result<NodeId> {
        let frame_axes = if with_frame_axes {
            let axes = FrameAxes::new(self.renderer.create_handle(&Geometry::axes()));
            self.renderer.set_visible(axes.handle, axes.visible);
            Some(axes)
        } else {
            None
        };

        let parent = self.ensure_ancestors(path);
        let id = self.alloc_id();
        let actor = Actor {
            handle,
            attributes: ActorAttributes::default(),
            frame_axes,
        };
        self.attach(SceneNode::new_leaf(id, path.clone(), parent, kind, actor))?;

        if let Some(node) = self.nodes.get(&id) {
            if let Some(actor) = &node.actor {
                self.renderer.set_transform(actor.handle, &node.world_transform);
                if let Some(axes) = &actor.frame_axes {
                    self.renderer.set_transform(axes.handle, &node.world_transform);
                }
            }
        }

        self.renderer.request_redraw();
        log::debug!("Added {:?} leaf {}.", kind, path);
        Ok(id)
    }

    /// The node ids of the subtree rooted at `id`, parents before children.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];

        while let Some(curr) = stack.pop() {
            if let Some(node) = self.nodes.get(&curr) {
                out.push(curr);
                stack.extend(node.children.iter().rev());
            }
        }

        out
    }

    /// Detaches and destroys the subtree rooted at `id`. Returns the number of removed nodes.
    fn remove_subtree(&mut self, id: NodeId) -> usize {
        let parent = self.nodes.get(&id).and_then(|node| node.parent);
        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let ids = self.subtree(id);

        // Children first.
        for desc in ids.iter().rev() {
            if let Some(node) = self.nodes.remove(desc) {
                let _ = self.resolver.remove(&node.path, node.kind.namespace());

                if let Some(actor) = node.actor {
                    if let Some(axes) = actor.frame_axes {
                        self.renderer.destroy_handle(axes.handle);
                    }
                    self.renderer.destroy_handle(actor.handle);
                }
            }
        }

        ids.len()
    }

    fn stored_texture(&self, id: NodeId) -> Option<Arc<Texture>> {
        let file = self
            .nodes
            .get(&id)?
            .actor
            .as_ref()?
            .attributes
            .texture
            .as_ref()?;

        self.textures.get(&file.to_string_lossy())
    }

    /// Runs a leaf mutation after the usual lookup, then asks for a redraw.
    fn with_leaf<F>(&mut self, op: &str, path: &ScenePath, overlay_allowed: bool, f: F) -> Result<()>
    where
        F: FnOnce(&mut R, NodeKind, &mut Actor),
    {
        if !overlay_allowed && self.ignore_overlay(op, path) {
            return Ok(());
        }

        let id = self
            .resolve(path, Namespace::Actor)
            .inspect_err(|e| log::warn!("{} failed: {}", op, e))?;

        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))?;
        let kind = node.kind;
        let actor = node
            .actor
            .as_mut()
            .ok_or_else(|| SceneError::NonexistingPath(path.clone()))?;

        f(&mut self.renderer, kind, actor);
        self.renderer.request_redraw();
        Ok(())
    }
}

fn at_least(value: f32, min: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.max(min)
    }
}

fn set_mount_offset<R: Renderer>(renderer: &mut R, kind: NodeKind, actor: &mut Actor, offset: Vec3) {
    if kind.accepts_offset() {
        actor.attributes.offset = offset;
        renderer.set_offset(actor.handle, offset);
    }
}

fn set_mount_orientation<R: Renderer>(renderer: &mut R, actor: &mut Actor, orientation: Vec3) {
    actor.attributes.orientation = orientation;
    renderer.set_orientation(actor.handle, orientation);
}

/// Pushes every stored attribute to a freshly created handle.
fn apply_attributes<R: Renderer>(
    renderer: &mut R,
    handle: RenderHandle,
    kind: NodeKind,
    attributes: &ActorAttributes,
    texture: Option<&Texture>,
) {
    renderer.set_visible(handle, attributes.visible);
    renderer.set_opacity(handle, attributes.opacity);
    renderer.set_point_size(handle, attributes.point_size);
    renderer.set_line_width(handle, attributes.line_width);
    renderer.set_color(handle, attributes.color);
    renderer.set_orientation(handle, attributes.orientation);

    if kind.accepts_scale() {
        renderer.set_scale(handle, attributes.scale);
    }
    if kind.accepts_mode() {
        renderer.set_render_mode(handle, attributes.mode);
    }
    if kind.accepts_offset() {
        renderer.set_offset(handle, attributes.offset);
    }
    if kind.accepts_texture() {
        if let Some(texture) = texture {
            renderer.set_texture(handle, Some(texture));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RecordingRenderer, RenderCall};
    use crate::scene::BillboardKind;

    const EPS: f32 = 1.0e-5;

    fn path(segments: &[&str]) -> ScenePath {
        ScenePath::new(segments.iter().copied()).unwrap()
    }

    fn tree() -> SceneTree<RecordingRenderer> {
        SceneTree::new(RecordingRenderer::new())
    }

    #[test]
    fn test_add_directory_creates_ancestors() {
        let mut tree = tree();
        tree.add_directory(&path(&["a", "b", "c"])).unwrap();

        assert_eq!(tree.len(), 3);
        assert!(tree.contains(&path(&["a"]), Namespace::Directory));
        assert!(tree.contains(&path(&["a", "b"]), Namespace::Directory));
        assert_eq!(tree.children(&path(&["a"])).unwrap(), vec![path(&["a", "b"])]);
        assert_eq!(tree.roots(), vec![path(&["a"])]);
    }

    #[test]
    fn test_add_directory_twice_fails() {
        let mut tree = tree();
        tree.add_directory(&path(&["a"])).unwrap();

        assert!(matches!(
            tree.add_directory(&path(&["a"])),
            Err(SceneError::ExistingPath(_))
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_actor_defaults() {
        let mut tree = tree();
        let torso = path(&["robot", "torso"]);
        tree.add_actor(&torso, &Geometry::cuboid(1.0, 2.0, 3.0)).unwrap();

        let actor = tree.actor(&torso).unwrap();
        assert_eq!(actor.attributes, ActorAttributes::default());

        let axes = actor.frame_axes.as_ref().unwrap();
        assert!(!axes.visible);
        assert_eq!(axes.scale, 1.0);
        assert!(!tree.renderer().object(axes.handle).unwrap().visible);
        assert!(tree.renderer().is_live(actor.handle));
    }

    #[test]
    fn test_directory_and_actor_cannot_share_a_path() {
        let mut tree = tree();
        let p = path(&["a", "b"]);
        tree.add_actor(&p, &Geometry::axes()).unwrap();
        let live = tree.renderer().live_count();

        assert!(matches!(tree.add_directory(&p), Err(SceneError::ExistingPath(_))));
        assert!(matches!(
            tree.add_actor(&path(&["a", "b", "c"]), &Geometry::axes()),
            Err(SceneError::ExistingPath(_))
        ));
        assert_eq!(tree.renderer().live_count(), live);
    }

    #[test]
    fn test_new_node_inherits_parent_world_transform() {
        let mut tree = tree();
        let robot = path(&["robot"]);
        tree.add_directory(&robot).unwrap();
        tree.apply_transform(
            &robot,
            Namespace::Directory,
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::ZERO,
            None,
            false,
        )
        .unwrap();

        let arm = path(&["robot", "arm"]);
        tree.add_actor(&arm, &Geometry::arrow(8)).unwrap();

        let world = tree.world_transform(&arm, Namespace::Actor).unwrap();
        assert!(world.translation().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), EPS));

        let handle = tree.actor(&arm).unwrap().handle;
        assert_eq!(tree.renderer().object(handle).unwrap().transform, world);
    }

    #[test]
    fn test_stacking() {
        let mut tree = tree();
        let p = path(&["a"]);
        tree.add_actor(&p, &Geometry::axes()).unwrap();

        let t1 = Transform::from_translation(Vec3::X);
        let t2 = Transform::from_euler_degrees(Vec3::new(0.0, 0.0, 90.0));

        tree.set_transform(&p, Namespace::Actor, &t1, true).unwrap();
        tree.set_transform(&p, Namespace::Actor, &t2, true).unwrap();
        let local = tree.local_transform(&p, Namespace::Actor).unwrap();
        assert!(local.abs_diff_eq(&t1.compose(&t2), EPS));

        tree.set_transform(&p, Namespace::Actor, &t1, false).unwrap();
        tree.set_transform(&p, Namespace::Actor, &t2, false).unwrap();
        let local = tree.local_transform(&p, Namespace::Actor).unwrap();
        assert!(local.abs_diff_eq(&t2, EPS));
    }

    #[test]
    fn test_reset_transform() {
        let mut tree = tree();
        let dir = path(&["d"]);
        let leaf = path(&["d", "leaf"]);
        tree.add_actor(&leaf, &Geometry::axes()).unwrap();
        tree.apply_transform(&dir, Namespace::Directory, Vec3::X, Vec3::ZERO, None, true)
            .unwrap();
        tree.apply_transform(&leaf, Namespace::Actor, Vec3::Y, Vec3::ZERO, None, true)
            .unwrap();

        tree.reset_transform(&leaf, Namespace::Actor).unwrap();
        let world = tree.world_transform(&leaf, Namespace::Actor).unwrap();
        assert!(world.translation().abs_diff_eq(Vec3::X, EPS));

        tree.reset_transform(&dir, Namespace::Directory).unwrap();
        assert!(tree
            .world_transform(&leaf, Namespace::Actor)
            .unwrap()
            .is_identity(EPS));
    }

    #[test]
    fn test_transform_namespace_mismatch() {
        let mut tree = tree();
        let p = path(&["a"]);
        tree.add_actor(&p, &Geometry::axes()).unwrap();

        assert!(matches!(
            tree.reset_transform(&p, Namespace::Directory),
            Err(SceneError::NonexistingPath(_))
        ));
    }

    #[test]
    fn test_frame_axes_follow_the_leaf() {
        let mut tree = tree();
        let p = path(&["a", "b"]);
        tree.add_actor(&p, &Geometry::sphere(1.0, 8, 8)).unwrap();
        tree.apply_transform(
            &path(&["a"]),
            Namespace::Directory,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 45.0),
            Some(TransformOrder::RotateThenTranslate),
            true,
        )
        .unwrap();

        let actor = tree.actor(&p).unwrap();
        let axes = actor.frame_axes.as_ref().unwrap().handle;
        let renderer = tree.renderer();
        assert_eq!(
            renderer.object(actor.handle).unwrap().transform,
            renderer.object(axes).unwrap().transform
        );
    }

    #[test]
    fn test_remove_directory_is_total() {
        let mut tree = tree();
        tree.add_actor(&path(&["a", "b", "c"]), &Geometry::axes()).unwrap();
        tree.add_actor(&path(&["a", "d"]), &Geometry::axes()).unwrap();
        tree.add_actor(&path(&["e"]), &Geometry::axes()).unwrap();

        tree.remove_directory(&path(&["a"])).unwrap();

        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(&path(&["a", "b", "c"]), Namespace::Actor));
        assert_eq!(tree.renderer().live_count(), 2);
        assert_eq!(tree.handles().len(), 2);
        assert!(matches!(
            tree.remove_directory(&path(&["a"])),
            Err(SceneError::NonexistingPath(_))
        ));
    }

    #[test]
    fn test_remove_actor_keeps_siblings() {
        let mut tree = tree();
        tree.add_actor(&path(&["a", "x"]), &Geometry::axes()).unwrap();
        tree.add_actor(&path(&["a", "y"]), &Geometry::axes()).unwrap();

        tree.remove_actor(&path(&["a", "x"])).unwrap();

        assert_eq!(tree.children(&path(&["a"])).unwrap(), vec![path(&["a", "y"])]);
        assert_eq!(tree.renderer().live_count(), 2);
    }

    #[test]
    fn test_rename_rewrites_descendants() {
        let mut tree = tree();
        tree.add_actor(&path(&["robot", "arm", "hand"]), &Geometry::axes())
            .unwrap();
        tree.apply_transform(
            &path(&["robot", "arm"]),
            Namespace::Directory,
            Vec3::Z,
            Vec3::ZERO,
            None,
            true,
        )
        .unwrap();
        let before = tree
            .world_transform(&path(&["robot", "arm", "hand"]), Namespace::Actor)
            .unwrap();

        let renamed = tree.rename(&path(&["robot", "arm"]), "left arm").unwrap();
        assert_eq!(renamed, path(&["robot", "left arm"]));

        let hand = path(&["robot", "left arm", "hand"]);
        let node = tree.node(&hand, Namespace::Actor).unwrap();
        assert_eq!(node.name(), "hand");
        assert_eq!(*node.world_transform(), before);
        assert!(!tree.contains(&path(&["robot", "arm"]), Namespace::Directory));
    }

    #[test]
    fn test_rename_errors() {
        let mut tree = tree();
        tree.add_directory(&path(&["a"])).unwrap();
        tree.add_actor(&path(&["b"]), &Geometry::axes()).unwrap();

        assert!(matches!(
            tree.rename(&path(&["a"]), ""),
            Err(SceneError::MalformedPath(_))
        ));
        assert!(matches!(
            tree.rename(&path(&["a"]), "x/y"),
            Err(SceneError::MalformedPath(_))
        ));
        assert!(matches!(
            tree.rename(&path(&["a"]), "b"),
            Err(SceneError::ExistingPath(_))
        ));
        assert!(matches!(
            tree.rename(&path(&["z"]), "y"),
            Err(SceneError::NonexistingPath(_))
        ));
    }

    #[test]
    fn test_setters_clamp_values() {
        let mut tree = tree();
        let p = path(&["a"]);
        tree.add_actor(&p, &Geometry::point_cloud(vec![Vec3::ZERO], None))
            .unwrap();

        tree.set_opacity(&p, 1.5).unwrap();
        tree.set_point_size(&p, 0.2).unwrap();
        tree.set_line_width(&p, -3.0).unwrap();
        tree.set_scale(&p, -1.0).unwrap();
        tree.set_color(&p, Color::new(2.0, 0.5, -1.0)).unwrap();

        let attrs = tree.attributes(&p).unwrap();
        assert_eq!(attrs.opacity, 1.0);
        assert_eq!(attrs.point_size, 1.0);
        assert_eq!(attrs.line_width, 1.0);
        assert_eq!(attrs.scale, 0.0);
        assert_eq!(attrs.color, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_setter_on_missing_leaf_changes_nothing() {
        let mut tree = tree();
        tree.add_actor(&path(&["a", "b"]), &Geometry::axes()).unwrap();
        let calls = tree.renderer().calls().len();

        assert!(matches!(
            tree.set_opacity(&path(&["a", "x"]), 0.5),
            Err(SceneError::NonexistingPath(_))
        ));
        assert!(matches!(
            tree.set_visibility(&path(&["a"]), false),
            Err(SceneError::NonexistingPath(_))
        ));
        assert_eq!(tree.renderer().calls().len(), calls);
        assert_eq!(tree.attributes(&path(&["a", "b"])).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_billboard_exemptions() {
        let mut tree = tree();
        let text = path(&["labels", "text"]);
        let image = path(&["labels", "image"]);
        tree.add_actor(&text, &Geometry::text_billboard("base", Some(12)))
            .unwrap();
        tree.add_actor(&image, &Geometry::image_billboard("icon.png", None, None))
            .unwrap();
        assert_eq!(
            tree.node(&text, Namespace::Actor).unwrap().kind(),
            NodeKind::Billboard(BillboardKind::Text)
        );
        let _ = tree.renderer_mut().take_calls();

        tree.set_scale(&text, 4.0).unwrap();
        tree.set_mode(&image, RenderMode::Wireframe).unwrap();
        tree.set_offset(&image, Vec3::ONE).unwrap();
        tree.remove_texture(&text).unwrap();

        assert!(tree
            .renderer()
            .calls()
            .iter()
            .all(|c| *c == RenderCall::RequestRedraw));
        assert_eq!(tree.attributes(&text).unwrap().scale, 1.0);
        assert_eq!(tree.attributes(&image).unwrap().offset, Vec3::ZERO);

        tree.set_offset(&text, Vec3::ONE).unwrap();
        assert_eq!(tree.attributes(&text).unwrap().offset, Vec3::ONE);
    }

    #[test]
    fn test_orientation_axes_overlay() {
        let mut tree = tree();
        tree.add_orientation_axes().unwrap();
        let overlay = ScenePath::orientation_axes();
        let live = tree.renderer().live_count();

        assert!(tree.actor(&overlay).unwrap().frame_axes.is_none());

        tree.set_opacity(&overlay, 0.1).unwrap();
        tree.remove_actor(&overlay).unwrap();
        tree.rename(&overlay, "other").unwrap();
        tree.apply_transform(&overlay, Namespace::Actor, Vec3::X, Vec3::ZERO, None, true)
            .unwrap();

        assert_eq!(tree.attributes(&overlay).unwrap().opacity, 1.0);
        assert!(tree.local_transform(&overlay, Namespace::Actor).unwrap().is_identity(0.0));
        assert_eq!(tree.renderer().live_count(), live);

        tree.set_visibility(&overlay, false).unwrap();
        assert!(!tree.attributes(&overlay).unwrap().visible);

        assert!(matches!(
            tree.add_directory(&overlay),
            Err(SceneError::ExistingPath(_))
        ));
    }

    #[test]
    fn test_missing_overlay_is_looked_up_like_any_path() {
        let mut tree = tree();
        let overlay = ScenePath::orientation_axes();
        let calls = tree.renderer().calls().len();

        for result in [
            tree.set_opacity(&overlay, 0.5),
            tree.set_visibility(&overlay, false),
            tree.remove_actor(&overlay),
            tree.remove_directory(&overlay),
            tree.rename(&overlay, "other").map(|_| ()),
            tree.replace_actor(&overlay, &Geometry::axes()),
            tree.reset_transform(&overlay, Namespace::Actor),
        ] {
            assert!(matches!(result, Err(SceneError::NonexistingPath(_))));
        }

        assert!(tree.is_empty());
        assert_eq!(tree.renderer().calls().len(), calls);
    }

    #[test]
    fn test_replace_actor_with_text_billboard_drops_texture() {
        let file = std::env::temp_dir().join("lightfield_replace_actor_test.png");
        let image = image::RgbaImage::from_pixel(1, 1, image::Rgba([200, 0, 0, 255]));
        image.save(&file).unwrap();

        let mut tree = tree();
        let p = path(&["sign"]);
        tree.add_actor(&p, &Geometry::quad([Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y]))
            .unwrap();
        tree.set_texture(&p, &file).unwrap();
        assert_eq!(tree.attributes(&p).unwrap().texture.as_deref(), Some(file.as_path()));

        tree.replace_actor(&p, &Geometry::text_billboard("exit", None))
            .unwrap();

        let handle = tree.actor(&p).unwrap().handle;
        assert!(tree.attributes(&p).unwrap().texture.is_none());
        assert!(!tree
            .renderer()
            .calls_for(handle)
            .any(|c| matches!(c, RenderCall::SetTexture(..))));

        let _ = std::fs::remove_file(&file);
    }

    #[test]
    fn test_replace_actor_reapplies_attributes() {
        let mut tree = tree();
        let p = path(&["cloud"]);
        tree.add_actor(&p, &Geometry::point_cloud(vec![Vec3::ZERO], None))
            .unwrap();
        tree.set_point_size(&p, 4.0).unwrap();
        tree.set_color(&p, color::RED).unwrap();
        tree.apply_transform(&p, Namespace::Actor, Vec3::X, Vec3::ZERO, None, true)
            .unwrap();
        let old = tree.actor(&p).unwrap().handle;

        tree.replace_actor(&p, &Geometry::point_cloud(vec![Vec3::ONE; 3], None))
            .unwrap();

        let new = tree.actor(&p).unwrap().handle;
        let renderer = tree.renderer();
        assert_ne!(old, new);
        assert!(!renderer.is_live(old));
        assert!(renderer
            .calls_for(new)
            .any(|c| *c == RenderCall::SetPointSize(new, 4.0)));
        assert!(renderer
            .calls_for(new)
            .any(|c| *c == RenderCall::SetColor(new, color::RED)));
        assert!(renderer
            .object(new)
            .unwrap()
            .transform
            .translation()
            .abs_diff_eq(Vec3::X, EPS));

        assert!(matches!(
            tree.replace_actor(&path(&["nothing"]), &Geometry::axes()),
            Err(SceneError::NonexistingPath(_))
        ));
    }

    #[test]
    fn test_frame_axes_controls() {
        let mut tree = tree();
        let p = path(&["a"]);
        tree.add_actor(&p, &Geometry::axes()).unwrap();

        tree.set_frame_axes_visibility(&p, true).unwrap();
        tree.set_frame_axes_scale(&p, 0.25).unwrap();

        let axes = tree.actor(&p).unwrap().frame_axes.clone().unwrap();
        assert!(axes.visible);
        assert_eq!(axes.scale, 0.25);
        assert!(tree.renderer().object(axes.handle).unwrap().visible);
    }

    #[test]
    fn test_subtree_offset_orientation() {
        let mut tree = tree();
        tree.add_actor(&path(&["d", "a"]), &Geometry::axes()).unwrap();
        tree.add_actor(&path(&["d", "e", "b"]), &Geometry::axes()).unwrap();
        tree.add_actor(&path(&["d", "img"]), &Geometry::image_billboard("i.png", None, None))
            .unwrap();

        let offset = Vec3::new(0.0, 0.5, 0.0);
        let orientation = Vec3::new(0.0, 0.0, 30.0);
        tree.set_subtree_offset_orientation(&path(&["d"]), offset, orientation)
            .unwrap();

        for p in [path(&["d", "a"]), path(&["d", "e", "b"])] {
            let attrs = tree.attributes(&p).unwrap();
            assert_eq!(attrs.offset, offset);
            assert_eq!(attrs.orientation, orientation);
        }

        let img = tree.attributes(&path(&["d", "img"])).unwrap();
        assert_eq!(img.offset, Vec3::ZERO);
        assert_eq!(img.orientation, orientation);
    }

    #[test]
    fn test_set_texture_rejects_unsupported_files() {
        let mut tree = tree();
        let p = path(&["quad"]);
        tree.add_actor(&p, &Geometry::quad([Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y]))
            .unwrap();

        let err = tree.set_texture(&p, Path::new("texture.bmp")).unwrap_err();
        assert!(matches!(err, SceneError::Texture(_)));
        assert!(err.status().is_none());
        assert!(tree.attributes(&p).unwrap().texture.is_none());
    }

    #[test]
    fn test_composed_transform_matches_cache() {
        let mut tree = tree();
        let leaf = path(&["a", "b", "c"]);
        tree.add_actor(&leaf, &Geometry::axes()).unwrap();
        tree.apply_transform(
            &path(&["a"]),
            Namespace::Directory,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 20.0, 30.0),
            None,
            true,
        )
        .unwrap();
        tree.apply_transform(
            &path(&["a", "b"]),
            Namespace::Directory,
            Vec3::new(-1.0, 0.0, 0.5),
            Vec3::new(0.0, 90.0, 0.0),
            Some(TransformOrder::RotateThenTranslate),
            true,
        )
        .unwrap();

        let cached = tree.world_transform(&leaf, Namespace::Actor).unwrap();
        let walked = tree.composed_transform(&leaf, Namespace::Actor).unwrap();
        assert!(cached.abs_diff_eq(&walked, EPS));
    }
}

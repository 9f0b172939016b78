//! Hierarchy index - parent/child adjacency derived from the scene.
//!
//! Parent links live in each object's transform as plain identifiers. This
//! module turns them into a children map, a root list and subtree queries.
//! The index is a snapshot: rebuild it after any structural change instead of
//! holding it across edits.
//!
//! A parent reference counts only if it names another live object. Dangling
//! and self references make the object a root. Cycles never cause unbounded
//! walks; every traversal carries a visited set.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::id::ObjectId;
use crate::object::GameObject;
use crate::store::Scene;

/// Parent of an object if it names another live object
pub fn resolved_parent<'a>(scene: &Scene, object: &'a GameObject) -> Option<&'a ObjectId> {
    object
        .parent_id()
        .filter(|parent| *parent != object.id() && scene.contains(parent))
}

/// Ancestors of an object, nearest first.
///
/// Stops at the first dangling reference or at the first repeated id.
pub fn ancestors(scene: &Scene, id: &ObjectId) -> Vec<ObjectId> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(id.clone());

    let mut current = scene.find(id);
    while let Some(object) = current {
        let Some(parent) = resolved_parent(scene, object) else {
            break;
        };
        if !visited.insert(parent.clone()) {
            break;
        }
        chain.push(parent.clone());
        current = scene.find(parent);
    }
    chain
}

/// Check if `ancestor` appears in the parent chain of `id`
pub fn is_ancestor(scene: &Scene, ancestor: &ObjectId, id: &ObjectId) -> bool {
    ancestors(scene, id).iter().any(|a| a == ancestor)
}

/// A node of the hierarchy tree view
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: ObjectId,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Parent-to-children adjacency over a scene snapshot
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    order: Vec<ObjectId>,
    live: HashSet<ObjectId>,
    children: HashMap<ObjectId, Vec<ObjectId>>,
    roots: Vec<ObjectId>,
}

impl HierarchyIndex {
    /// Build the index from the current scene contents
    pub fn build(scene: &Scene) -> Self {
        let mut index = Self {
            order: Vec::with_capacity(scene.len()),
            live: HashSet::with_capacity(scene.len()),
            ..Default::default()
        };

        for object in scene.objects() {
            index.order.push(object.id().clone());
            index.live.insert(object.id().clone());
            match resolved_parent(scene, object) {
                Some(parent) => index
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(object.id().clone()),
                None => index.roots.push(object.id().clone()),
            }
        }

        index
    }

    /// Objects without a resolvable parent, in sequence order
    #[inline]
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Direct children of an object, in sequence order
    pub fn children_of(&self, id: &ObjectId) -> &[ObjectId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if an object was live when the index was built
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.live.contains(id)
    }

    /// The object and all its descendants, breadth first, target first.
    ///
    /// Empty if the object is not live.
    pub fn subtree(&self, id: &ObjectId) -> Vec<ObjectId> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut visited = HashSet::new();
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(id.clone());
        queue.push_back(id.clone());

        while let Some(current) = queue.pop_front() {
            for child in self.children_of(&current) {
                if visited.insert(child.clone()) {
                    queue.push_back(child.clone());
                }
            }
            result.push(current);
        }

        result
    }

    /// All descendants of an object, excluding the object itself
    pub fn descendants(&self, id: &ObjectId) -> HashSet<ObjectId> {
        let mut set: HashSet<ObjectId> = self.subtree(id).into_iter().collect();
        set.remove(id);
        set
    }

    /// Build a tree for display.
    ///
    /// Objects caught in a parent cycle are unreachable from any root; the
    /// first such object in sequence order is promoted to a root so every
    /// live object appears exactly once.
    pub fn tree(&self) -> Vec<TreeNode> {
        let mut visited = HashSet::new();
        let mut nodes: Vec<TreeNode> = self
            .roots
            .iter()
            .filter_map(|root| self.build_node(root, &mut visited))
            .collect();

        for id in &self.order {
            if !visited.contains(id) {
                log::warn!("Object {} is part of a parent cycle, showing it as a root", id);
                if let Some(node) = self.build_node(id, &mut visited) {
                    nodes.push(node);
                }
            }
        }

        nodes
    }

    fn build_node(&self, id: &ObjectId, visited: &mut HashSet<ObjectId>) -> Option<TreeNode> {
        if !visited.insert(id.clone()) {
            return None;
        }
        let children = self
            .children_of(id)
            .iter()
            .filter_map(|child| self.build_node(child, visited))
            .collect();
        Some(TreeNode {
            id: id.clone(),
            children,
        })
    }
}

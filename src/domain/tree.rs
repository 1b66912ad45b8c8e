//! Tree Mutator: pure structural operations over a single BOM tree.
//!
//! Every operation takes the current tree by reference and returns a freshly
//! built tree; the input is never mutated. Either the whole new tree is
//! returned or an error is, so no partial mutation is ever observable and a
//! failed operation leaves the caller holding the unchanged original.
//!
//! The full-copy rebuild is deliberate: trees in this domain are tens to low
//! hundreds of nodes, and correctness wins over speed here.

use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::node::{Node, NodeId, NodePatch};

/// Depth-first pre-order search, first match wins. Never fails.
pub fn find_node<D>(root: &Node<D>, id: NodeId) -> Option<&Node<D>> {
    root.iter_preorder().find(|node| node.id == id)
}

/// Rebuilds the tree with the node matching `id` replaced by a shallow merge
/// of its fields and `patch`. Nodes not containing the target are copied
/// unchanged. Missing id is an error, never a silent no-op.
#[instrument(level = "trace", skip(root, patch))]
pub fn update_node<D: Clone>(
    root: &Node<D>,
    id: NodeId,
    patch: &NodePatch<D>,
) -> TreeResult<Node<D>> {
    fn rebuild<D: Clone>(
        node: &Node<D>,
        id: NodeId,
        patch: &NodePatch<D>,
        hit: &mut bool,
    ) -> Node<D> {
        if node.id == id {
            *hit = true;
            return patch.apply(node);
        }
        let children = node
            .children
            .iter()
            .map(|child| rebuild(child, id, patch, hit))
            .collect();
        with_children(node, children)
    }

    let mut hit = false;
    let rebuilt = rebuild(root, id, patch, &mut hit);
    if hit {
        Ok(rebuilt)
    } else {
        Err(DomainError::NodeNotFound(id))
    }
}

/// Rebuilds the tree with the first node matching `id` and its entire
/// subtree removed from its parent's children.
///
/// Deleting the root is rejected with `RootDeletionForbidden`; callers must
/// discard a whole tree by dropping it, not through this operation.
#[instrument(level = "trace", skip(root))]
pub fn delete_node<D: Clone>(root: &Node<D>, id: NodeId) -> TreeResult<Node<D>> {
    if root.id == id {
        return Err(DomainError::RootDeletionForbidden(id));
    }

    fn rebuild<D: Clone>(node: &Node<D>, id: NodeId, removed: &mut bool) -> Node<D> {
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            if !*removed && child.id == id {
                *removed = true;
                continue;
            }
            children.push(rebuild(child, id, removed));
        }
        with_children(node, children)
    }

    let mut removed = false;
    let rebuilt = rebuild(root, id, &mut removed);
    if removed {
        Ok(rebuilt)
    } else {
        Err(DomainError::NodeNotFound(id))
    }
}

/// Rebuilds the tree with `child` appended to the children of the node
/// matching `parent_id`.
///
/// Fails with `ParentNotFound` when no node matches, `MaxDepthExceeded` when
/// the parent is an alternate part, and `LevelMismatch` when the child's
/// depth class is not below the parent's. Levels are classes, not graph
/// depth: a primary part (level 6) may hang directly under any structural
/// node, so only non-increasing levels are rejected.
#[instrument(level = "trace", skip(root, child))]
pub fn add_child<D: Clone>(
    root: &Node<D>,
    parent_id: NodeId,
    child: Node<D>,
) -> TreeResult<Node<D>> {
    let parent = find_node(root, parent_id).ok_or(DomainError::ParentNotFound(parent_id))?;
    if parent.level.is_leaf() {
        return Err(DomainError::MaxDepthExceeded {
            position: parent.position.clone(),
        });
    }
    if child.level <= parent.level {
        return Err(DomainError::LevelMismatch {
            parent: parent.level.get(),
            child: child.level.get(),
        });
    }

    fn rebuild<D: Clone>(
        node: &Node<D>,
        parent_id: NodeId,
        slot: &mut Option<Node<D>>,
    ) -> Node<D> {
        let mut children: Vec<_> = node
            .children
            .iter()
            .map(|child| rebuild(child, parent_id, slot))
            .collect();
        if node.id == parent_id {
            if let Some(mut child) = slot.take() {
                child.parent_id = Some(node.id);
                children.push(child);
            }
        }
        with_children(node, children)
    }

    let mut slot = Some(child);
    Ok(rebuild(root, parent_id, &mut slot))
}

/// All node ids in pre-order. Seeds expand-all view state and backs the
/// global-uniqueness audit.
pub fn collect_ids<D>(root: &Node<D>) -> Vec<NodeId> {
    root.iter_preorder().map(|node| node.id).collect()
}

/// Number of existing children under `parent_id`, 0 when absent or childless.
/// Callers derive the next sibling ordinal from this.
pub fn sibling_count<D>(root: &Node<D>, parent_id: NodeId) -> usize {
    find_node(root, parent_id)
        .map(|node| node.children.len())
        .unwrap_or(0)
}

/// Shallow copy with replaced children; identity fields pass through.
fn with_children<D: Clone>(node: &Node<D>, children: Vec<Node<D>>) -> Node<D> {
    Node {
        id: node.id,
        parent_id: node.parent_id,
        level: node.level,
        position: node.position.clone(),
        title: node.title.clone(),
        data: node.data.clone(),
        children,
    }
}

impl<D> Node<D> {
    pub fn iter_preorder(&self) -> Preorder<'_, D> {
        Preorder { stack: vec![self] }
    }

    pub fn iter_postorder(&self) -> Postorder<'_, D> {
        Postorder {
            stack: vec![(self, false)],
        }
    }

    /// Height of the subtree rooted here, in nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Depth-first pre-order traversal over borrowed nodes.
pub struct Preorder<'a, D> {
    stack: Vec<&'a Node<D>>,
}

impl<'a, D> Iterator for Preorder<'a, D> {
    type Item = &'a Node<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Depth-first post-order traversal over borrowed nodes.
pub struct Postorder<'a, D> {
    stack: Vec<(&'a Node<D>, bool)>,
}

impl<'a, D> Iterator for Postorder<'a, D> {
    type Item = &'a Node<D>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node);
            }
            self.stack.push((node, true));
            for child in node.children.iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

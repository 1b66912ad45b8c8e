//! Forest Adapter: the tree operations generalized to an ordered list of
//! independent root trees. The compliance domain works on forests; the
//! algorithmic contracts are unchanged.

use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::node::{Node, NodeId, NodePatch};
use crate::domain::tree;

/// Searches each root in order, returning the first match.
pub fn find_in_forest<D>(forest: &[Node<D>], id: NodeId) -> Option<&Node<D>> {
    forest.iter().find_map(|root| tree::find_node(root, id))
}

/// Applies the patch within whichever tree contains `id`; untouched trees
/// are copied as-is. `NodeNotFound` when no tree contains the id.
#[instrument(level = "trace", skip(forest, patch))]
pub fn update_in_forest<D: Clone>(
    forest: &[Node<D>],
    id: NodeId,
    patch: &NodePatch<D>,
) -> TreeResult<Vec<Node<D>>> {
    rebuild_containing(forest, id, |root| tree::update_node(root, id, patch))
}

/// Deletes `id` from whichever tree contains it. Root ids are protected in
/// forests exactly as in single trees.
#[instrument(level = "trace", skip(forest))]
pub fn delete_in_forest<D: Clone>(forest: &[Node<D>], id: NodeId) -> TreeResult<Vec<Node<D>>> {
    if forest.iter().any(|root| root.id == id) {
        return Err(DomainError::RootDeletionForbidden(id));
    }
    rebuild_containing(forest, id, |root| tree::delete_node(root, id))
}

/// Appends `child` under `parent_id` in whichever tree contains the parent.
#[instrument(level = "trace", skip(forest, child))]
pub fn add_child_in_forest<D: Clone>(
    forest: &[Node<D>],
    parent_id: NodeId,
    child: Node<D>,
) -> TreeResult<Vec<Node<D>>> {
    let target = forest
        .iter()
        .position(|root| tree::find_node(root, parent_id).is_some())
        .ok_or(DomainError::ParentNotFound(parent_id))?;

    let mut rebuilt = Vec::with_capacity(forest.len());
    for (i, root) in forest.iter().enumerate() {
        if i == target {
            rebuilt.push(tree::add_child(root, parent_id, child.clone())?);
        } else {
            rebuilt.push(root.clone());
        }
    }
    Ok(rebuilt)
}

/// All node ids across the forest, per-tree pre-order in root order.
pub fn collect_forest_ids<D>(forest: &[Node<D>]) -> Vec<NodeId> {
    forest.iter().flat_map(tree::collect_ids).collect()
}

/// Children count of `parent_id` wherever it lives, 0 when absent.
pub fn forest_sibling_count<D>(forest: &[Node<D>], parent_id: NodeId) -> usize {
    find_in_forest(forest, parent_id)
        .map(|node| node.children.len())
        .unwrap_or(0)
}

/// Rebuilds the list, running `op` on the single tree containing `id` and
/// cloning the rest. The error from `op` propagates untouched.
fn rebuild_containing<D: Clone>(
    forest: &[Node<D>],
    id: NodeId,
    op: impl Fn(&Node<D>) -> TreeResult<Node<D>>,
) -> TreeResult<Vec<Node<D>>> {
    let target = forest
        .iter()
        .position(|root| tree::find_node(root, id).is_some())
        .ok_or(DomainError::NodeNotFound(id))?;

    let mut rebuilt = Vec::with_capacity(forest.len());
    for (i, root) in forest.iter().enumerate() {
        if i == target {
            rebuilt.push(op(root)?);
        } else {
            rebuilt.push(root.clone());
        }
    }
    Ok(rebuilt)
}

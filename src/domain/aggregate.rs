//! Aggregator: derived values recomputed on every read.
//!
//! Cost roll-up and compliance classification never cache anything; the
//! trees in this domain are small and reproducibility matters more than
//! speed. Effective statuses are computed at read time and never written
//! back into the tree.

use std::collections::HashSet;

use chrono::NaiveDate;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::node::{BomData, ComplianceData, ComplianceStatus, Node, NodeId};

/// Days before expiry at which a compliant certificate counts as expiring.
pub const EXPIRY_WINDOW_DAYS: i64 = 90;

/// Rolled-up cost of the subtree: `cost * quantity` on every part-tier node,
/// structural levels contribute nothing. Post-order, no memoization.
///
/// The level decides, not the payload: a material payload smuggled onto a
/// level below 6 (a malformed document, for instance) is ignored rather
/// than counted.
#[instrument(level = "trace", skip(node), fields(position = %node.position))]
pub fn total_cost(node: &Node<BomData>) -> f64 {
    node.iter_postorder()
        .filter(|n| n.level.can_have_material())
        .map(|n| {
            n.data
                .material()
                .map(|m| m.cost * f64::from(m.quantity))
                .unwrap_or(0.0)
        })
        .sum()
}

/// Sum of [`total_cost`] over every root in the forest.
pub fn forest_total_cost(forest: &[Node<BomData>]) -> f64 {
    forest.iter().map(total_cost).sum()
}

/// Whole-day calendar distance from `as_of` to `expire`; negative once past.
pub fn days_until(expire: NaiveDate, as_of: NaiveDate) -> i64 {
    (expire - as_of).num_days()
}

/// Effective status of a node at `as_of`.
///
/// A stored `compliant` with an expiry date 0..=90 days out reclassifies to
/// `expiring`; every other combination passes the stored status through,
/// including `missing` nodes that happen to carry an expiry date. A parent's
/// status is never derived from its children.
pub fn effective_status(node: &Node<ComplianceData>, as_of: NaiveDate) -> ComplianceStatus {
    match (node.data.status, node.data.expire_date) {
        (ComplianceStatus::Compliant, Some(expire))
            if (0..=EXPIRY_WINDOW_DAYS).contains(&days_until(expire, as_of)) =>
        {
            ComplianceStatus::Expiring
        }
        (status, _) => status,
    }
}

/// Flat per-status counters over a whole forest, every node included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStats {
    pub compliant: usize,
    pub expiring: usize,
    pub missing: usize,
}

impl StatusStats {
    pub fn total(&self) -> usize {
        self.compliant + self.expiring + self.missing
    }
}

/// Buckets every node in the forest by effective status. No level weighting,
/// no parent-from-child propagation.
#[instrument(level = "debug", skip(forest))]
pub fn status_stats(forest: &[Node<ComplianceData>], as_of: NaiveDate) -> StatusStats {
    let counts = forest
        .iter()
        .flat_map(|root| root.iter_preorder())
        .map(|node| effective_status(node, as_of))
        .counts();

    StatusStats {
        compliant: counts.get(&ComplianceStatus::Compliant).copied().unwrap_or(0),
        expiring: counts.get(&ComplianceStatus::Expiring).copied().unwrap_or(0),
        missing: counts.get(&ComplianceStatus::Missing).copied().unwrap_or(0),
    }
}

/// Materializes the nodes whose ids are selected, preserving forest
/// traversal order. Backs batch actions over selected rows.
pub fn collect_selected<'a, D>(
    forest: &'a [Node<D>],
    selected: &HashSet<NodeId>,
) -> Vec<&'a Node<D>> {
    forest
        .iter()
        .flat_map(|root| root.iter_preorder())
        .filter(|node| selected.contains(&node.id))
        .collect()
}

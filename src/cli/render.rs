//! termtree rendering of BOM and compliance trees

use chrono::NaiveDate;
use colored::Colorize;
use termtree::Tree;

use crate::domain::{
    effective_status, total_cost, BomData, ComplianceData, ComplianceStatus, Node,
};

/// Structure view: designator, title and rolled-up subtree cost per node.
pub fn bom_tree(node: &Node<BomData>) -> Tree<String> {
    let label = format!(
        "{}  {}  [{:.2}]",
        node.position.bold(),
        node.title,
        total_cost(node)
    );
    let leaves: Vec<_> = node.children.iter().map(bom_tree).collect();
    Tree::new(label).with_leaves(leaves)
}

/// Compliance view: designator, title and colored effective status at `as_of`.
pub fn compliance_tree(node: &Node<ComplianceData>, as_of: NaiveDate) -> Tree<String> {
    let status = effective_status(node, as_of);
    let status_str = match status {
        ComplianceStatus::Compliant => status.to_string().green().to_string(),
        ComplianceStatus::Expiring => status.to_string().yellow().to_string(),
        ComplianceStatus::Missing => status.to_string().red().to_string(),
    };
    let label = format!("{}  {}  [{}]", node.position.bold(), node.title, status_str);
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|child| compliance_tree(child, as_of))
        .collect();
    Tree::new(label).with_leaves(leaves)
}

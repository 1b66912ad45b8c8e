//! Domain layer: the BOM tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! serialization format beyond the derived record shape). Everything here is
//! a pure function over in-memory tree values.

pub mod aggregate;
pub mod error;
pub mod forest;
pub mod level;
pub mod node;
pub mod position;
pub mod tree;

pub use aggregate::{
    collect_selected, days_until, effective_status, forest_total_cost, status_stats, total_cost,
    StatusStats, EXPIRY_WINDOW_DAYS,
};
pub use error::{DomainError, TreeResult};
pub use forest::{
    add_child_in_forest, collect_forest_ids, delete_in_forest, find_in_forest,
    forest_sibling_count, update_in_forest,
};
pub use level::{Level, NodeType};
pub use node::{
    BomData, ComplianceData, ComplianceStatus, ItemStatus, Lifecycle, MaterialAttrs, Node, NodeId,
    NodePatch,
};
pub use position::{generate_position, Ordinal};
pub use tree::{
    add_child, collect_ids, delete_node, find_node, sibling_count, update_node, Postorder,
    Preorder,
};

//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent structural rule violations.
/// These are independent of CLI and serialization concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("parent node not found: {0}")]
    ParentNotFound(NodeId),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("maximum depth exceeded: {position} cannot have children")]
    MaxDepthExceeded { position: String },

    #[error("root node cannot be deleted: {0}")]
    RootDeletionForbidden(NodeId),

    #[error("invalid level: {0} (must be 1..=7)")]
    InvalidLevel(u8),

    #[error("child level {child} must be deeper than parent level {parent}")]
    LevelMismatch { parent: u8, child: u8 },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

//! Designator codec: deterministic position codes for tree nodes.
//!
//! A designator is the human-facing hierarchical label of a node, e.g.
//! `M1.U1.P1.A`. It is generated once when the node is created, from the
//! target level, the parent's designator and the sibling ordinal, and never
//! recomputed afterwards.

use std::fmt;

use tracing::instrument;

use crate::domain::level::Level;

/// 1-based sibling ordinal, the explicit ordinal source for the codec.
///
/// Ordinals are derived from the current sibling count at insertion time and
/// never recomputed retroactively. Deleting a middle sibling and adding a new
/// one can therefore reuse an ordinal that was already handed out, producing
/// a designator seen earlier in the tree's history. That is accepted,
/// documented behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(u32);

impl Ordinal {
    pub const FIRST: Ordinal = Ordinal(1);

    /// Clamps to 1; ordinals are 1-based by definition.
    pub fn new(n: u32) -> Self {
        Ordinal(n.max(1))
    }

    /// Ordinal for a node appended after `sibling_count` existing children.
    pub fn after(sibling_count: usize) -> Self {
        Ordinal(sibling_count as u32 + 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Alternate-part letter: 1 -> 'A', 2 -> 'B', ...
    fn letter(self) -> char {
        char::from_u32(64 + self.0).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the designator for a new node.
///
/// The level alone decides the shape: level 7 is lettered (`M1.U1.P1.A`)
/// while every other level is prefixed and numbered. `is_alternate`
/// accompanies the request and coincides with `level.is_leaf()`, but it is
/// recorded for tracing only and never consulted. The parent position of an
/// alternate is the primary part's designator, not a structural ancestor's.
///
/// Pure and total: identical inputs always yield the identical string.
#[instrument(level = "trace")]
pub fn generate_position(
    level: Level,
    parent_position: Option<&str>,
    ordinal: Ordinal,
    is_alternate: bool,
) -> String {
    let prefix = level.prefix().map(String::from).unwrap_or_default();

    // Root designators never include a parent component.
    if level == Level::MIN {
        return format!("{prefix}{ordinal}");
    }

    let Some(parent) = parent_position else {
        // Degenerate case: node without a structural parent.
        return format!("{prefix}{ordinal}");
    };

    if level.is_leaf() {
        format!("{parent}.{}", ordinal.letter())
    } else {
        format!("{parent}.{prefix}{ordinal}")
    }
}

//! bomtree: hierarchical BOM tree engine.
//!
//! The engine owns the canonical 7-level tree shape, the deterministic
//! designator scheme labelling every node, the pure structural mutations
//! that keep trees well-formed, and the derived aggregates (cost roll-up,
//! compliance classification and statistics) every consuming view builds on.
//!
//! The surrounding application (persistence, import/export, approval
//! workflow, presentation) exchanges plain nested node records with this
//! crate and publishes the tree values the mutations return. The engine
//! itself does no I/O and holds no state.

pub mod cli;
pub mod domain;
pub mod exitcode;

//! Depth classes of the 7-level BOM hierarchy.
//!
//! Levels 1-5 are structural groupings (machine down to group), level 6 is a
//! primary part carrying material attributes, level 7 is an alternate
//! (substitute) part. A node's level is assigned at creation, always one
//! below its parent's.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, TreeResult};

/// Validated depth class, 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(7);

    /// First level that carries material attributes (primary parts).
    pub const MATERIAL: Level = Level(6);

    pub fn new(raw: u8) -> TreeResult<Self> {
        if (1..=7).contains(&raw) {
            Ok(Level(raw))
        } else {
            Err(DomainError::InvalidLevel(raw))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Alternate parts sit at the bottom of the hierarchy.
    pub fn is_leaf(self) -> bool {
        self.0 == 7
    }

    /// Material attributes are meaningful on primary and alternate parts only.
    pub fn can_have_material(self) -> bool {
        self.0 >= 6
    }

    /// Level of a direct child. Alternate parts cannot have children.
    pub fn child(self) -> TreeResult<Level> {
        if self.is_leaf() {
            Err(DomainError::MaxDepthExceeded {
                position: String::new(),
            })
        } else {
            Ok(Level(self.0 + 1))
        }
    }

    pub fn node_type(self) -> NodeType {
        match self.0 {
            6 => NodeType::PrimaryPart,
            7 => NodeType::AlternatePart,
            _ => NodeType::Structural,
        }
    }

    /// Designator prefix letter. Alternate parts are lettered, not prefixed.
    pub fn prefix(self) -> Option<char> {
        match self.0 {
            1 => Some('M'),
            2 => Some('U'),
            3 => Some('S'),
            4 => Some('F'),
            5 => Some('G'),
            6 => Some('P'),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = DomainError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Level::new(raw)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a node, derived from its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    /// Levels 1-5: machine, unit, sub-module, family, group
    Structural,
    /// Level 6
    PrimaryPart,
    /// Level 7
    AlternatePart,
}

//! Node records: the canonical tree element shared by every BOM view.
//!
//! `Node<D>` is generic over the domain payload so the structure editor
//! (material costs) and the compliance tree (status + expiry) run on the same
//! tree algorithms. The payload is a tagged variant, which removes the
//! "is this field meaningful at this level" checks the consumers would
//! otherwise need.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::level::{Level, NodeType};
use crate::domain::position::{generate_position, Ordinal};

/// Opaque node identifier, unique within the process.
///
/// The designator `position` is the human-facing code and is only unique by
/// convention within one tree; `NodeId` is the actual identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        NodeId(uuid)
    }
}

/// One element of a BOM tree.
///
/// `children` order is significant: it defines the sibling ordinals used by
/// the designator codec. `id`, `level` and `position` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<D> {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    pub level: Level,
    pub position: String,
    pub title: String,
    #[serde(flatten)]
    pub data: D,
    #[serde(default = "Vec::new")]
    pub children: Vec<Node<D>>,
}

impl<D> Node<D> {
    /// Creates a detached root node. Application bootstrap only; every other
    /// node is minted via [`Node::child_of`] and attached with `add_child`.
    pub fn root(ordinal: Ordinal, title: impl Into<String>, data: D) -> Self {
        Node {
            id: NodeId::new(),
            parent_id: None,
            level: Level::MIN,
            position: generate_position(Level::MIN, None, ordinal, false),
            title: title.into(),
            data,
            children: Vec::new(),
        }
    }

    /// Creates a child record for `parent`, deriving level, parent link and
    /// designator. The caller computes `ordinal` from the parent's current
    /// sibling count and attaches the result via `add_child`.
    pub fn child_of(
        parent: &Node<D>,
        ordinal: Ordinal,
        title: impl Into<String>,
        data: D,
    ) -> TreeResult<Self> {
        let level = parent.level.child().map_err(|_| DomainError::MaxDepthExceeded {
            position: parent.position.clone(),
        })?;
        let position =
            generate_position(level, Some(&parent.position), ordinal, level.is_leaf());
        Ok(Node {
            id: NodeId::new(),
            parent_id: Some(parent.id),
            level,
            position,
            title: title.into(),
            data,
            children: Vec::new(),
        })
    }

    /// Creates a child record at an explicitly chosen depth class.
    ///
    /// Levels classify nodes rather than measure graph depth, and parts
    /// attach directly under whichever structural node owns them, skipping
    /// intermediate classes (`M1.U1.P1` is a level-6 part under a level-2
    /// unit). The class must still be deeper than the parent's.
    pub fn child_at(
        parent: &Node<D>,
        level: Level,
        ordinal: Ordinal,
        title: impl Into<String>,
        data: D,
    ) -> TreeResult<Self> {
        if parent.level.is_leaf() {
            return Err(DomainError::MaxDepthExceeded {
                position: parent.position.clone(),
            });
        }
        if level <= parent.level {
            return Err(DomainError::LevelMismatch {
                parent: parent.level.get(),
                child: level.get(),
            });
        }
        let position =
            generate_position(level, Some(&parent.position), ordinal, level.is_leaf());
        Ok(Node {
            id: NodeId::new(),
            parent_id: Some(parent.id),
            level,
            position,
            title: title.into(),
            data,
            children: Vec::new(),
        })
    }

    pub fn node_type(&self) -> NodeType {
        self.level.node_type()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Partial update applied by `update_node`: shallow merge, patch fields win.
///
/// `children` is only replaced when explicitly set; a patch that omits it
/// always preserves the node's existing subtree. Identity fields (`id`,
/// `level`, `position`, `parent_id`) are not patchable.
#[derive(Debug, Clone)]
pub struct NodePatch<D> {
    pub title: Option<String>,
    pub data: Option<D>,
    pub children: Option<Vec<Node<D>>>,
}

impl<D> Default for NodePatch<D> {
    fn default() -> Self {
        NodePatch {
            title: None,
            data: None,
            children: None,
        }
    }
}

impl<D: Clone> NodePatch<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    pub fn children(mut self, children: Vec<Node<D>>) -> Self {
        self.children = Some(children);
        self
    }

    /// Merges this patch onto `node`, returning the patched copy.
    pub(crate) fn apply(&self, node: &Node<D>) -> Node<D> {
        Node {
            id: node.id,
            parent_id: node.parent_id,
            level: node.level,
            position: node.position.clone(),
            title: self.title.clone().unwrap_or_else(|| node.title.clone()),
            data: self.data.clone().unwrap_or_else(|| node.data.clone()),
            children: self
                .children
                .clone()
                .unwrap_or_else(|| node.children.clone()),
        }
    }
}

/// Payload of a structure-editor (cost domain) node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BomData {
    /// Levels 1-5: pure grouping, no material attributes.
    Structural,
    /// Levels 6-7: primary or alternate part with material attributes.
    Material(MaterialAttrs),
}

impl BomData {
    pub fn material(&self) -> Option<&MaterialAttrs> {
        match self {
            BomData::Structural => None,
            BomData::Material(attrs) => Some(attrs),
        }
    }
}

/// Material attributes, meaningful on levels 6-7 only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAttrs {
    pub part_name: String,
    /// Quantity per parent assembly, >= 1.
    pub quantity: u32,
    pub unit: String,
    /// Currency-neutral unit cost, >= 0.
    pub cost: f64,
    pub supplier: String,
    /// Signed cost variance against reference.
    pub variance: f64,
    pub lifecycle: Lifecycle,
    pub item_status: ItemStatus,
}

impl Default for MaterialAttrs {
    fn default() -> Self {
        MaterialAttrs {
            part_name: String::new(),
            quantity: 1,
            unit: String::new(),
            cost: 0.0,
            supplier: String::new(),
            variance: 0.0,
            lifecycle: Lifecycle::MassProduction,
            item_status: ItemStatus::Valid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifecycle {
    Research,
    Pilot,
    MassProduction,
    EndOfLife,
    Obsolete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Valid,
    Invalid,
    Pending,
    Substituted,
    Obsolete,
}

/// Payload of a compliance-domain node. Same tree shape and algorithms as the
/// cost domain; status and expiry replace the material attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceData {
    pub status: ComplianceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<NaiveDate>,
}

/// Stored compliance status. Statistics and display use the *effective*
/// status, which applies the time-based expiry reclassification at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    Expiring,
    Missing,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Expiring => "expiring",
            ComplianceStatus::Missing => "missing",
        };
        write!(f, "{s}")
    }
}

//! Input collections describing a planar truss: nodes, elements and loads.
//!
//! Field names on the wire follow the editor format the solver is fed from,
//! so `{"id":1,"x":0,"y":0,"rx":1,"ry":1}` is a valid node and restraint flags
//! may be given either as booleans or as `0`/`1` integers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{Force, Point};

/// External identifier of a node, unique within one solve call.
pub type NodeId = u32;

/// External identifier of an element.
pub type ElementId = u32;

/// Common support conditions expressed as restraint flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Support {
    /// No restraint.
    Free,
    /// Both translations restrained.
    Pinned,
    /// Vertical translation restrained, horizontal free.
    RollerY,
    /// Horizontal translation restrained, vertical free.
    RollerX,
}

impl Support {
    /// The `(rx, ry)` restraint flags for this support.
    #[must_use]
    pub const fn restraints(self) -> (bool, bool) {
        match self {
            Support::Free => (false, false),
            Support::Pinned => (true, true),
            Support::RollerY => (false, true),
            Support::RollerX => (true, false),
        }
    }
}

/// A pin joint with optional translational restraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Whether the X translation is restrained.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub rx: bool,
    /// Whether the Y translation is restrained.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub ry: bool,
}

impl Node {
    /// Create an unrestrained node.
    #[must_use]
    pub const fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            rx: false,
            ry: false,
        }
    }

    /// Replace the restraint flags with those of `support`.
    #[must_use]
    pub const fn with_support(mut self, support: Support) -> Self {
        let (rx, ry) = support.restraints();
        self.rx = rx;
        self.ry = ry;
        self
    }

    /// Position of the node.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Number of restrained translations, 0 to 2.
    #[must_use]
    pub fn restrained_count(&self) -> usize {
        usize::from(self.rx) + usize::from(self.ry)
    }
}

/// An axial-only member between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier reported back in the element results.
    pub id: ElementId,
    /// Start node.
    pub n1: NodeId,
    /// End node.
    pub n2: NodeId,
    /// Elastic modulus.
    #[serde(rename = "E")]
    pub elastic_modulus: f64,
    /// Cross-sectional area.
    #[serde(rename = "A")]
    pub area: f64,
    /// Optional yield strength used for the factor of safety.
    #[serde(
        default,
        rename = "yieldStrength",
        skip_serializing_if = "Option::is_none"
    )]
    pub yield_strength: Option<f64>,
}

impl Element {
    /// Create an element connecting `n1` to `n2`.
    #[must_use]
    pub const fn new(
        id: ElementId,
        n1: NodeId,
        n2: NodeId,
        elastic_modulus: f64,
        area: f64,
    ) -> Self {
        Self {
            id,
            n1,
            n2,
            elastic_modulus,
            area,
            yield_strength: None,
        }
    }

    /// Attach a yield strength.
    #[must_use]
    pub const fn with_yield_strength(mut self, yield_strength: f64) -> Self {
        self.yield_strength = Some(yield_strength);
        self
    }
}

/// A concentrated force applied at a node, in global axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Loaded node.
    #[serde(rename = "nodeId")]
    pub node_id: NodeId,
    /// X component.
    pub fx: f64,
    /// Y component.
    pub fy: f64,
}

impl Load {
    /// Create a load on `node_id`.
    #[must_use]
    pub const fn new(node_id: NodeId, fx: f64, fy: f64) -> Self {
        Self { node_id, fx, fy }
    }

    /// The load as a force vector.
    #[must_use]
    pub const fn force(&self) -> Force {
        Force::new(self.fx, self.fy)
    }
}

/// The three input collections of one solve call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Nodes in index order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Elements in reporting order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Applied loads.
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl Structure {
    /// Bundle the three collections.
    #[must_use]
    pub fn new(nodes: Vec<Node>, elements: Vec<Element>, loads: Vec<Load>) -> Self {
        Self {
            nodes,
            elements,
            loads,
        }
    }

    /// Parse a structure from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Copy of this structure with every load multiplied by `factor`.
    #[must_use]
    pub fn scaled_loads(&self, factor: f64) -> Self {
        let loads = self
            .loads
            .iter()
            .map(|load| Load::new(load.node_id, load.fx * factor, load.fy * factor))
            .collect();
        Self {
            loads,
            ..self.clone()
        }
    }
}

/// Accept restraint flags as booleans or as numbers, nonzero meaning restrained.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => flag,
        Flag::Number(value) => value != 0.0,
    })
}

//! Degree-of-freedom bookkeeping.
//!
//! Each node gets a contiguous index `i` in the order the node slice is given;
//! its X translation lives in DOF `2i` and its Y translation in `2i + 1`.

use std::collections::HashMap;

use crate::errors::ValidationError;
use crate::model::{Node, NodeId};

/// Translational DOFs per node.
pub const DOFS_PER_NODE: usize = 2;

/// DOF index of the X translation of the node at `index`.
#[must_use]
pub const fn x_dof(index: usize) -> usize {
    DOFS_PER_NODE * index
}

/// DOF index of the Y translation of the node at `index`.
#[must_use]
pub const fn y_dof(index: usize) -> usize {
    DOFS_PER_NODE * index + 1
}

/// Mapping from external node ids to contiguous internal indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DofMap {
    /// Internal index per node id.
    indices: HashMap<NodeId, usize>,
    /// Number of mapped nodes.
    node_count: usize,
}

impl DofMap {
    /// Map `nodes` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateNode`] when two nodes share an id.
    pub fn new(nodes: &[Node]) -> Result<Self, ValidationError> {
        let mut indices = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if indices.insert(node.id, index).is_some() {
                return Err(ValidationError::DuplicateNode(node.id));
            }
        }
        Ok(Self {
            indices,
            node_count: nodes.len(),
        })
    }

    /// Internal index of `id`.
    #[must_use]
    pub fn index(&self, id: NodeId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// The `[x, y]` DOF indices of `id`.
    #[must_use]
    pub fn dofs(&self, id: NodeId) -> Option<[usize; 2]> {
        self.index(id).map(|index| [x_dof(index), y_dof(index)])
    }

    /// Number of mapped nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Size of the global system.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.node_count * DOFS_PER_NODE
    }
}

/// Free and restrained DOFs, each in node order with X before Y.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DofPartition {
    /// DOFs solved for.
    pub free: Vec<usize>,
    /// DOFs held at zero displacement.
    pub restrained: Vec<usize>,
}

impl DofPartition {
    /// Classify every DOF of `nodes` by its restraint flag.
    #[must_use]
    pub fn new(nodes: &[Node]) -> Self {
        let mut partition = Self::default();
        for (index, node) in nodes.iter().enumerate() {
            for (dof, restrained) in [(x_dof(index), node.rx), (y_dof(index), node.ry)] {
                if restrained {
                    partition.restrained.push(dof);
                } else {
                    partition.free.push(dof);
                }
            }
        }
        partition
    }

    /// Whether no DOF is left to solve for.
    #[must_use]
    pub fn is_fully_restrained(&self) -> bool {
        self.free.is_empty()
    }
}

//! Error types produced while validating or solving a truss.

use std::fmt;

use thiserror::Error;

use crate::model::{ElementId, NodeId};

/// Error returned when the input collections are inconsistent.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Two nodes share the same id.
    #[error("node id {0} is used more than once")]
    DuplicateNode(NodeId),
    /// An element references a node that is not in the node set.
    #[error("element {element} references unknown node {node}")]
    UnknownElementNode {
        /// Offending element.
        element: ElementId,
        /// Missing node id.
        node: NodeId,
    },
    /// An element starts and ends at the same node.
    #[error("element {0} connects a node to itself")]
    SelfConnectedElement(ElementId),
    /// An element's end nodes are coincident.
    #[error("element {0} has zero length")]
    ZeroLengthElement(ElementId),
    /// An element's area is zero or negative.
    #[error("element {element} area must be positive (received {area})")]
    NonPositiveArea {
        /// Offending element.
        element: ElementId,
        /// Rejected area.
        area: f64,
    },
    /// An element's elastic modulus is zero or negative.
    #[error("element {element} elastic modulus must be positive (received {modulus})")]
    NonPositiveModulus {
        /// Offending element.
        element: ElementId,
        /// Rejected modulus.
        modulus: f64,
    },
    /// A load references a node that is not in the node set.
    #[error("load references unknown node {0}")]
    UnknownLoadNode(NodeId),
    /// A coordinate, property or load component is NaN or infinite.
    #[error("{0} is not a finite number")]
    NonFiniteInput(String),
}

/// Why the reduced stiffness matrix could not be solved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instability {
    /// Fewer restrained DOFs than are needed to stop rigid-body motion in the plane.
    InsufficientRestraints {
        /// Number of restrained DOFs in the structure.
        restrained: usize,
    },
    /// LU factorisation hit an exactly zero pivot.
    ZeroPivot,
    /// The smallest LU pivot is negligible next to the largest.
    IllConditioned {
        /// Smallest over largest absolute pivot.
        pivot_ratio: f64,
    },
}

impl fmt::Display for Instability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instability::InsufficientRestraints { restrained } => write!(
                f,
                "{restrained} restrained degree(s) of freedom, at least 3 are needed"
            ),
            Instability::ZeroPivot => write!(f, "stiffness matrix has a zero pivot"),
            Instability::IllConditioned { pivot_ratio } => {
                write!(f, "pivot ratio {pivot_ratio:.3e} is below tolerance")
            }
        }
    }
}

/// What was known about a structure when its solve failed.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnosis {
    /// The detected failure.
    pub cause: Instability,
    /// Number of connected pieces formed by nodes and elements.
    pub components: usize,
    /// Nodes with a free DOF and no attached element.
    pub unattached_nodes: Vec<NodeId>,
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        if self.components > 1 {
            write!(f, "; structure splits into {} parts", self.components)?;
        }
        if !self.unattached_nodes.is_empty() {
            write!(f, "; free nodes without members: {:?}", self.unattached_nodes)?;
        }
        Ok(())
    }
}

/// Error returned when a solve does not produce results.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// The inputs were rejected before assembly.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// The structure is a mechanism or otherwise unstable.
    #[error("unstable structure / singular matrix ({0})")]
    SingularSystem(Diagnosis),
    /// The system exceeds the configured size guard.
    #[error("{dofs} degrees of freedom exceed the limit of {max}")]
    TooLarge {
        /// Total DOF count of the structure.
        dofs: usize,
        /// Configured limit.
        max: usize,
    },
}

impl SolveError {
    /// Whether this error means the structure cannot carry load, as opposed to bad input.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, SolveError::SingularSystem(_))
    }
}

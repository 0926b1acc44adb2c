//! Pre-assembly input checks.

use crate::assembly::MemberGeometry;
use crate::config::ValidationPolicy;
use crate::dof::DofMap;
use crate::errors::ValidationError;
use crate::model::{Element, ElementId, Load, Node, NodeId};

/// Inputs that will contribute nothing under [`ValidationPolicy::Lenient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Skipped {
    /// Elements left out of the stiffness matrix.
    pub elements: Vec<ElementId>,
    /// Nodes named by loads that are left out of the load vector.
    pub load_nodes: Vec<NodeId>,
}

impl Skipped {
    /// Whether every input will be used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.load_nodes.is_empty()
    }
}

/// Check the input collections against the mapped nodes.
///
/// Under [`ValidationPolicy::Strict`] the first problem found is returned as an
/// error. Under [`ValidationPolicy::Lenient`] dangling references and
/// zero-length elements are logged and listed in the returned [`Skipped`];
/// everything else is passed through untouched.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found when `policy` is strict.
pub fn validate(
    nodes: &[Node],
    elements: &[Element],
    loads: &[Load],
    dof_map: &DofMap,
    policy: ValidationPolicy,
) -> Result<Skipped, ValidationError> {
    let strict = policy == ValidationPolicy::Strict;
    let mut skipped = Skipped::default();

    if strict {
        for node in nodes {
            finite(node.x, || format!("x coordinate of node {}", node.id))?;
            finite(node.y, || format!("y coordinate of node {}", node.id))?;
        }
    }

    for element in elements {
        if let Err(error) = MemberGeometry::resolve(element, nodes, dof_map) {
            if strict {
                return Err(error);
            }
            log::warn!("skipping element {}: {error}", element.id);
            skipped.elements.push(element.id);
            continue;
        }
        if strict {
            check_properties(element)?;
        }
    }

    for load in loads {
        if dof_map.index(load.node_id).is_none() {
            if strict {
                return Err(ValidationError::UnknownLoadNode(load.node_id));
            }
            log::warn!("skipping load on unknown node {}", load.node_id);
            skipped.load_nodes.push(load.node_id);
            continue;
        }
        if strict {
            finite(load.fx, || format!("fx of load on node {}", load.node_id))?;
            finite(load.fy, || format!("fy of load on node {}", load.node_id))?;
        }
    }

    Ok(skipped)
}

/// Require a strictly positive, finite area and modulus.
fn check_properties(element: &Element) -> Result<(), ValidationError> {
    finite(element.area, || format!("area of element {}", element.id))?;
    finite(element.elastic_modulus, || {
        format!("elastic modulus of element {}", element.id)
    })?;
    if element.area <= 0.0 {
        return Err(ValidationError::NonPositiveArea {
            element: element.id,
            area: element.area,
        });
    }
    if element.elastic_modulus <= 0.0 {
        return Err(ValidationError::NonPositiveModulus {
            element: element.id,
            modulus: element.elastic_modulus,
        });
    }
    Ok(())
}

fn finite(value: f64, what: impl FnOnce() -> String) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteInput(what()))
    }
}

//! Global stiffness matrix and load vector assembly.
//!
//! Each member contributes the standard two-force-member matrix
//!
//! ```text
//! k = (E*A/L) * [ c²   cs   -c²  -cs ]
//!               [ cs   s²   -cs  -s² ]
//!               [-c²  -cs    c²   cs ]
//!               [-cs  -s²    cs   s² ]
//! ```
//!
//! over the DOFs `[n1x, n1y, n2x, n2y]`, where `c` and `s` are the direction
//! cosines of the member axis. See
//! <https://en.wikipedia.org/wiki/Direct_stiffness_method>.

use nalgebra::{DMatrix, DVector, Matrix4, Vector4};

use crate::dof::{x_dof, y_dof, DofMap};
use crate::errors::ValidationError;
use crate::model::{Element, Load, Node};

/// Resolved geometry of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberGeometry {
    /// Internal index of the start node.
    pub start: usize,
    /// Internal index of the end node.
    pub end: usize,
    /// Member length.
    pub length: f64,
    /// Cosine of the member axis angle.
    pub cos: f64,
    /// Sine of the member axis angle.
    pub sin: f64,
}

impl MemberGeometry {
    /// Resolve `element` against the mapped `nodes`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the element connects a node to itself,
    /// references a node that is not mapped, or has zero length.
    pub fn resolve(
        element: &Element,
        nodes: &[Node],
        dof_map: &DofMap,
    ) -> Result<Self, ValidationError> {
        if element.n1 == element.n2 {
            return Err(ValidationError::SelfConnectedElement(element.id));
        }
        let lookup = |node| {
            dof_map
                .index(node)
                .ok_or(ValidationError::UnknownElementNode {
                    element: element.id,
                    node,
                })
        };
        let start = lookup(element.n1)?;
        let end = lookup(element.n2)?;

        let delta = nodes[end].position().to_vector() - nodes[start].position().to_vector();
        let length = delta.norm();
        if length == 0.0 {
            return Err(ValidationError::ZeroLengthElement(element.id));
        }

        Ok(Self {
            start,
            end,
            length,
            cos: delta.x / length,
            sin: delta.y / length,
        })
    }

    /// Global DOFs `[n1x, n1y, n2x, n2y]`.
    #[must_use]
    pub fn dof_indices(&self) -> [usize; 4] {
        [
            x_dof(self.start),
            y_dof(self.start),
            x_dof(self.end),
            y_dof(self.end),
        ]
    }

    /// Unit vector along the member in DOF order, `[-c, -s, c, s]`.
    ///
    /// Dotted with the element's end displacements this gives the elongation.
    #[must_use]
    pub fn axial_direction(&self) -> Vector4<f64> {
        Vector4::new(-self.cos, -self.sin, self.cos, self.sin)
    }

    /// Axial stiffness `E*A/L` of `element` over this geometry.
    #[must_use]
    pub fn axial_stiffness(&self, element: &Element) -> f64 {
        element.elastic_modulus * element.area / self.length
    }
}

/// Member stiffness in global axes, ordered `[n1x, n1y, n2x, n2y]`.
#[must_use]
pub fn member_stiffness(geometry: &MemberGeometry, element: &Element) -> Matrix4<f64> {
    let direction = geometry.axial_direction();
    direction * direction.transpose() * geometry.axial_stiffness(element)
}

/// Assemble the global stiffness matrix.
///
/// Elements that cannot be resolved contribute nothing; the validation pass
/// decides beforehand whether that is acceptable.
#[must_use]
pub fn assemble_stiffness(nodes: &[Node], elements: &[Element], dof_map: &DofMap) -> DMatrix<f64> {
    let dof = dof_map.dof_count();
    let mut matrix = DMatrix::zeros(dof, dof);
    for element in elements {
        let Ok(geometry) = MemberGeometry::resolve(element, nodes, dof_map) else {
            log::debug!("element {} left out of the stiffness matrix", element.id);
            continue;
        };
        let local = member_stiffness(&geometry, element);
        let dofs = geometry.dof_indices();
        for (row_local, &global_row) in dofs.iter().enumerate() {
            for (col_local, &global_col) in dofs.iter().enumerate() {
                matrix[(global_row, global_col)] += local[(row_local, col_local)];
            }
        }
    }
    matrix
}

/// Assemble the global load vector, summing loads that share a node.
#[must_use]
pub fn assemble_loads(loads: &[Load], dof_map: &DofMap) -> DVector<f64> {
    let mut vector = DVector::zeros(dof_map.dof_count());
    for load in loads {
        let Some([x, y]) = dof_map.dofs(load.node_id) else {
            log::debug!("load on node {} left out of the load vector", load.node_id);
            continue;
        };
        vector[x] += load.fx;
        vector[y] += load.fy;
    }
    vector
}

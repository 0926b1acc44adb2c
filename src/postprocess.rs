//! Recovery of displacements, support reactions and member forces.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector, Vector4};

use crate::assembly::MemberGeometry;
use crate::dof::{x_dof, y_dof, DofMap};
use crate::geometry::{Displacement, Force};
use crate::model::{Element, Node};
use crate::results::{ElementResult, Solution};

/// Scatter the free-DOF solution into a full displacement vector.
///
/// Restrained DOFs stay at zero; supports do not settle.
#[must_use]
pub fn expand_displacements(
    free_values: &DVector<f64>,
    free_dofs: &[usize],
    dof_count: usize,
) -> DVector<f64> {
    let mut displacements = DVector::zeros(dof_count);
    for (&dof, &value) in free_dofs.iter().zip(free_values.iter()) {
        displacements[dof] = value;
    }
    displacements
}

/// Residual `K*U - F` at every DOF.
///
/// Only the restrained entries are physical reactions; at free DOFs the value
/// is round-off from equilibrium.
#[must_use]
pub fn reaction_vector(
    stiffness: &DMatrix<f64>,
    displacements: &DVector<f64>,
    load: &DVector<f64>,
) -> DVector<f64> {
    stiffness * displacements - load
}

/// Axial force, stress and factor of safety of each element, in input order.
///
/// Elements that cannot be resolved report zero force and stress.
#[must_use]
pub fn element_results(
    nodes: &[Node],
    elements: &[Element],
    dof_map: &DofMap,
    displacements: &DVector<f64>,
) -> Vec<ElementResult> {
    elements
        .iter()
        .map(|element| {
            let Ok(geometry) = MemberGeometry::resolve(element, nodes, dof_map) else {
                return ElementResult {
                    id: element.id,
                    force: 0.0,
                    stress: 0.0,
                    factor_of_safety: None,
                };
            };
            let [a, b, c, d] = geometry.dof_indices();
            let end_displacements = Vector4::new(
                displacements[a],
                displacements[b],
                displacements[c],
                displacements[d],
            );
            let elongation = geometry.axial_direction().dot(&end_displacements);
            let force = geometry.axial_stiffness(element) * elongation;
            let stress = force / element.area;
            ElementResult {
                id: element.id,
                force,
                stress,
                factor_of_safety: element.yield_strength.map(|yield_strength| {
                    if stress == 0.0 {
                        f64::INFINITY
                    } else {
                        yield_strength / stress.abs()
                    }
                }),
            }
        })
        .collect()
}

/// Gather per-node displacements and reactions into a [`Solution`].
#[must_use]
pub fn build_solution(
    nodes: &[Node],
    displacements: &DVector<f64>,
    reactions: &DVector<f64>,
    element_results: Vec<ElementResult>,
) -> Solution {
    let mut displacement_map = BTreeMap::new();
    let mut reaction_map = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        let (x, y) = (x_dof(index), y_dof(index));
        displacement_map.insert(
            node.id,
            Displacement::new(displacements[x], displacements[y]),
        );
        reaction_map.insert(
            node.id,
            Force::new(
                if node.rx { reactions[x] } else { 0.0 },
                if node.ry { reactions[y] } else { 0.0 },
            ),
        );
    }
    Solution {
        displacements: displacement_map,
        reactions: reaction_map,
        element_results,
    }
}

//! The solve pipeline: index mapping, validation, assembly, partitioning,
//! reduced solve and post-processing, run once per call.

use crate::assembly::{assemble_loads, assemble_stiffness};
use crate::config::SolverOptions;
use crate::connectivity::Connectivity;
use crate::dof::{DofMap, DofPartition};
use crate::errors::{Instability, SolveError};
use crate::model::{Element, Load, Node, Structure};
use crate::postprocess::{build_solution, element_results, expand_displacements, reaction_vector};
use crate::results::Outcome;
use crate::solver::{check_restraints, reduce, solve_reduced};
use crate::validation::validate;

/// Solve a truss with default [`SolverOptions`].
///
/// # Errors
///
/// Returns [`SolveError::Validation`] for inconsistent input and
/// [`SolveError::SingularSystem`] when the structure is a mechanism.
///
/// # Examples
/// ```
/// use truss2d::{solve, Element, Load, Node, Support};
///
/// let nodes = [
///     Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
///     Node::new(2, 4.0, 0.0).with_support(Support::RollerY),
///     Node::new(3, 2.0, 3.0),
/// ];
/// let elements = [
///     Element::new(1, 1, 2, 200.0e9, 0.01),
///     Element::new(2, 2, 3, 200.0e9, 0.01),
///     Element::new(3, 3, 1, 200.0e9, 0.01),
/// ];
/// let loads = [Load::new(3, 0.0, -10.0)];
///
/// let outcome = solve(&nodes, &elements, &loads).expect("stable truss");
/// let solution = outcome.solution().expect("free DOFs present");
/// assert!((solution.reaction(1).unwrap().y - 5.0).abs() < 1e-9);
/// ```
pub fn solve(nodes: &[Node], elements: &[Element], loads: &[Load]) -> Result<Outcome, SolveError> {
    solve_with(nodes, elements, loads, &SolverOptions::default())
}

/// Solve a bundled [`Structure`].
///
/// # Errors
///
/// See [`solve_with`].
pub fn analyze(structure: &Structure, options: &SolverOptions) -> Result<Outcome, SolveError> {
    solve_with(
        &structure.nodes,
        &structure.elements,
        &structure.loads,
        options,
    )
}

/// Solve a truss with explicit options.
///
/// # Errors
///
/// Returns [`SolveError::Validation`] when the input is rejected,
/// [`SolveError::TooLarge`] when the size guard trips and
/// [`SolveError::SingularSystem`] when the reduced system cannot be solved.
pub fn solve_with(
    nodes: &[Node],
    elements: &[Element],
    loads: &[Load],
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let dof_map = DofMap::new(nodes)?;
    let dof_count = dof_map.dof_count();
    if let Some(max) = options.max_dofs {
        if dof_count > max {
            return Err(SolveError::TooLarge {
                dofs: dof_count,
                max,
            });
        }
    }

    let skipped = validate(nodes, elements, loads, &dof_map, options.validation)?;
    if !skipped.is_empty() {
        log::debug!(
            "{} element(s) and {} load(s) skipped",
            skipped.elements.len(),
            skipped.load_nodes.len()
        );
    }

    let stiffness = assemble_stiffness(nodes, elements, &dof_map);
    let load = assemble_loads(loads, &dof_map);
    let partition = DofPartition::new(nodes);
    log::debug!(
        "{} nodes, {} elements: {} free and {} restrained DOFs",
        nodes.len(),
        elements.len(),
        partition.free.len(),
        partition.restrained.len()
    );

    if partition.is_fully_restrained() {
        log::info!("structure fully restrained, nothing to solve");
        return Ok(Outcome::FullyRestrained);
    }

    let unstable = |cause: Instability| {
        let diagnosis = Connectivity::new(nodes, elements, &dof_map).diagnose(nodes, cause);
        log::warn!("unstable structure: {diagnosis}");
        SolveError::SingularSystem(diagnosis)
    };

    if options.check_restraint_count {
        check_restraints(&partition).map_err(unstable)?;
    }
    let (k_ff, f_f) = reduce(&stiffness, &load, &partition.free);
    let free_values = solve_reduced(k_ff, &f_f, options.pivot_tolerance).map_err(unstable)?;

    let displacements = expand_displacements(&free_values, &partition.free, dof_count);
    let reactions = reaction_vector(&stiffness, &displacements, &load);
    let results = element_results(nodes, elements, &dof_map, &displacements);
    Ok(Outcome::Solved(build_solution(
        nodes,
        &displacements,
        &reactions,
        results,
    )))
}

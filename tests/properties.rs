use approx::assert_relative_eq;
use truss2d::{
    analyze, point, preset, solve, solve_with, Element, Force, Instability, Load, Node, Outcome,
    Solution, SolveError, SolverOptions, Structure, Support, UnitSystem, ValidationError,
};

/// A deliberately irregular, statically indeterminate truss with mixed loads.
fn irregular_truss() -> Structure {
    let nodes = vec![
        Node::new(10, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(20, 3.0, -0.5),
        Node::new(30, 7.0, 0.2).with_support(Support::RollerY),
        Node::new(40, 1.5, 2.5),
        Node::new(50, 5.0, 2.8),
    ];
    let elements = vec![
        Element::new(1, 10, 20, 200.0e9, 0.010),
        Element::new(2, 20, 30, 200.0e9, 0.012),
        Element::new(3, 10, 40, 70.0e9, 0.020),
        Element::new(4, 40, 50, 200.0e9, 0.008),
        Element::new(5, 50, 30, 70.0e9, 0.015),
        Element::new(6, 40, 20, 200.0e9, 0.005),
        Element::new(7, 20, 50, 200.0e9, 0.005),
        Element::new(8, 10, 50, 200.0e9, 0.004),
    ];
    let loads = vec![
        Load::new(40, 12.0, -30.0),
        Load::new(50, 0.0, -45.0),
        Load::new(20, -8.0, -10.0),
        Load::new(50, 5.0, 0.0),
    ];
    Structure::new(nodes, elements, loads)
}

fn solved(structure: &Structure) -> Solution {
    analyze(structure, &SolverOptions::default())
        .expect("structure is stable")
        .into_solution()
        .expect("structure has free DOFs")
}

fn assert_equilibrium(structure: &Structure, solution: &Solution) {
    let applied = structure
        .loads
        .iter()
        .fold(Force::default(), |total, load| total + load.force());
    let reactions = solution.total_reaction();
    let scale = structure
        .loads
        .iter()
        .map(|load| load.fx.abs() + load.fy.abs())
        .sum::<f64>()
        .max(1.0);
    assert_relative_eq!(reactions.x + applied.x, 0.0, epsilon = 1e-9 * scale);
    assert_relative_eq!(reactions.y + applied.y, 0.0, epsilon = 1e-9 * scale);

    for pivot in [point(0.0, 0.0), point(-3.0, 11.0), point(8.5, -2.0)] {
        let load_moment: f64 = structure
            .loads
            .iter()
            .map(|load| {
                let at = structure.node(load.node_id).expect("loaded node").position();
                load.force().moment_about(at, pivot)
            })
            .sum();
        let reaction_moment: f64 = structure
            .nodes
            .iter()
            .map(|node| {
                let reaction = solution.reaction(node.id).expect("every node reported");
                reaction.moment_about(node.position(), pivot)
            })
            .sum();
        assert_relative_eq!(load_moment + reaction_moment, 0.0, epsilon = 1e-8 * scale);
    }
}

#[test]
fn reactions_balance_applied_loads() {
    let structure = irregular_truss();
    assert_equilibrium(&structure, &solved(&structure));
}

#[test]
fn presets_are_in_equilibrium() {
    for key in ["triangle", "warren", "pratt", "cantilever"] {
        let structure = preset(key).expect("preset exists").structure(UnitSystem::SiKnM);
        assert_equilibrium(&structure, &solved(&structure));
    }
}

#[test]
fn response_scales_with_loads() {
    let structure = irregular_truss();
    let base = solved(&structure);
    let factor = -2.5;
    let scaled = solved(&structure.scaled_loads(factor));

    for (id, displacement) in &base.displacements {
        let other = scaled.displacement(*id).expect("same nodes");
        assert_relative_eq!(other.x, displacement.x * factor, max_relative = 1e-9, epsilon = 1e-18);
        assert_relative_eq!(other.y, displacement.y * factor, max_relative = 1e-9, epsilon = 1e-18);
    }
    for (id, reaction) in &base.reactions {
        let other = scaled.reaction(*id).expect("same nodes");
        assert_relative_eq!(other.x, reaction.x * factor, max_relative = 1e-9, epsilon = 1e-9);
        assert_relative_eq!(other.y, reaction.y * factor, max_relative = 1e-9, epsilon = 1e-9);
    }
    for (result, other) in base.element_results.iter().zip(&scaled.element_results) {
        assert_eq!(result.id, other.id);
        assert_relative_eq!(other.force, result.force * factor, max_relative = 1e-9, epsilon = 1e-9);
        assert_relative_eq!(other.stress, result.stress * factor, max_relative = 1e-9, epsilon = 1e-6);
    }
}

#[test]
fn no_loads_means_no_response() {
    let mut structure = irregular_truss();
    structure.loads.clear();
    let solution = solved(&structure);

    assert!(solution
        .displacements
        .values()
        .all(|d| d.x == 0.0 && d.y == 0.0));
    assert!(solution.reactions.values().all(|r| r.x == 0.0 && r.y == 0.0));
    assert!(solution
        .element_results
        .iter()
        .all(|result| result.force == 0.0 && result.stress == 0.0));
}

#[test]
fn single_pin_is_a_mechanism() {
    let nodes = [
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 4.0, 0.0),
        Node::new(3, 2.0, 3.0),
    ];
    let elements = [
        Element::new(1, 1, 2, 1.0, 1.0),
        Element::new(2, 2, 3, 1.0, 1.0),
        Element::new(3, 3, 1, 1.0, 1.0),
    ];
    let loads = [Load::new(3, 0.0, -10.0)];

    let error = solve(&nodes, &elements, &loads).expect_err("triangle can spin about the pin");
    assert!(error.is_singular());
    assert!(matches!(
        error,
        SolveError::SingularSystem(ref diagnosis)
            if diagnosis.cause == Instability::InsufficientRestraints { restrained: 2 }
    ));
    assert!(error.to_string().starts_with("unstable structure / singular matrix"));

    // Without the restraint count the factorisation still catches it.
    let options = SolverOptions::default().with_restraint_check(false);
    let error = solve_with(&nodes, &elements, &loads, &options).expect_err("still a mechanism");
    assert!(error.is_singular());
}

#[test]
fn square_without_diagonal_is_a_mechanism() {
    let nodes = [
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 3.0, 0.0).with_support(Support::RollerY),
        Node::new(3, 3.0, 3.0),
        Node::new(4, 0.0, 3.0),
    ];
    let elements = [
        Element::new(1, 1, 2, 200.0e9, 0.01),
        Element::new(2, 2, 3, 200.0e9, 0.01),
        Element::new(3, 3, 4, 200.0e9, 0.01),
        Element::new(4, 4, 1, 200.0e9, 0.01),
    ];
    let loads = [Load::new(3, 1.0, 0.0)];
    let error = solve(&nodes, &elements, &loads).expect_err("square racks sideways");
    assert!(error.is_singular());
}

#[test]
fn fully_restrained_structure_is_trivial() {
    let nodes = [
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 2.0, 0.0).with_support(Support::Pinned),
        Node::new(3, 1.0, 1.0).with_support(Support::Pinned),
    ];
    let elements = [
        Element::new(1, 1, 2, 1.0, 1.0),
        Element::new(2, 2, 3, 1.0, 1.0),
    ];
    for loads in [vec![], vec![Load::new(3, 100.0, -100.0)]] {
        let outcome = solve(&nodes, &elements, &loads).expect("not an error");
        assert_eq!(outcome, Outcome::FullyRestrained);
    }
}

#[test]
fn loads_on_one_node_add_up() {
    let mut split = irregular_truss();
    split.loads = vec![Load::new(40, 3.0, -10.0), Load::new(40, 2.0, -5.0)];
    let mut combined = irregular_truss();
    combined.loads = vec![Load::new(40, 5.0, -15.0)];

    let split = solved(&split);
    let combined = solved(&combined);
    for (a, b) in split.element_results.iter().zip(&combined.element_results) {
        assert_relative_eq!(a.force, b.force, max_relative = 1e-12, epsilon = 1e-12);
    }
}

#[test]
fn invalid_references_are_rejected_or_skipped() {
    let nodes = vec![
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 4.0, 0.0).with_support(Support::RollerY),
        Node::new(3, 2.0, 3.0),
    ];
    let mut elements = vec![
        Element::new(1, 1, 2, 1.0e3, 1.0),
        Element::new(2, 2, 3, 1.0e3, 1.0),
        Element::new(3, 3, 1, 1.0e3, 1.0),
    ];
    let mut loads = vec![Load::new(3, 0.0, -10.0)];
    let reference = solve(&nodes, &elements, &loads)
        .expect("valid triangle")
        .into_solution()
        .expect("free DOFs");

    elements.insert(1, Element::new(9, 3, 77, 1.0e3, 1.0));
    loads.push(Load::new(77, 0.0, -1.0e6));

    assert_eq!(
        solve(&nodes, &elements, &loads),
        Err(SolveError::Validation(ValidationError::UnknownElementNode {
            element: 9,
            node: 77
        }))
    );

    let lenient = solve_with(&nodes, &elements, &loads, &SolverOptions::lenient())
        .expect("dangling inputs skipped")
        .into_solution()
        .expect("free DOFs");
    assert_eq!(lenient.displacements, reference.displacements);
    assert_eq!(lenient.reactions, reference.reactions);

    let ids: Vec<_> = lenient.element_results.iter().map(|result| result.id).collect();
    assert_eq!(ids, vec![1, 9, 2, 3]);
    let skipped = lenient.element(9).expect("skipped element is still reported");
    assert_eq!((skipped.force, skipped.stress), (0.0, 0.0));
}

#[test]
fn structure_round_trips_through_editor_json() {
    let json = r#"{
        "nodes": [
            {"id": 1, "x": 0, "y": 0, "rx": 1, "ry": 1},
            {"id": 2, "x": 4, "y": 0, "rx": 0, "ry": 1},
            {"id": 3, "x": 2, "y": 3, "rx": 0, "ry": 0}
        ],
        "elements": [
            {"id": 1, "n1": 1, "n2": 2, "E": 210000000, "A": 10},
            {"id": 2, "n1": 2, "n2": 3, "E": 210000000, "A": 10},
            {"id": 3, "n1": 3, "n2": 1, "E": 210000000, "A": 10}
        ],
        "loads": [{"nodeId": 3, "fx": 0, "fy": -10}]
    }"#;
    let structure = Structure::from_json(json).expect("editor json parses");
    let from_json = solved(&structure);
    let from_preset = solved(&preset("triangle").expect("preset").structure(UnitSystem::SiKnM));
    assert_eq!(from_json, from_preset);
}

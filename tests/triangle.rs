#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use truss2d::{solve, Element, Load, Node, Outcome, Solution, Support};

#[derive(Debug, Clone, Copy)]
struct TriangleProperties {
    area: f64,
    elastic_modulus: f64,
    apex_load: f64,
}

impl Default for TriangleProperties {
    fn default() -> Self {
        Self {
            area: 0.01,
            elastic_modulus: 200.0e9,
            apex_load: -10.0,
        }
    }
}

fn build_triangle(properties: TriangleProperties) -> (Vec<Node>, Vec<Element>, Vec<Load>) {
    let nodes = vec![
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 4.0, 0.0).with_support(Support::RollerY),
        Node::new(3, 2.0, 3.0),
    ];
    let member = |id, n1, n2| Element::new(id, n1, n2, properties.elastic_modulus, properties.area);
    let elements = vec![member(1, 1, 2), member(2, 2, 3), member(3, 3, 1)];
    let loads = vec![Load::new(3, 0.0, properties.apex_load)];
    (nodes, elements, loads)
}

fn solve_triangle(properties: TriangleProperties) -> Solution {
    let (nodes, elements, loads) = build_triangle(properties);
    match solve(&nodes, &elements, &loads).expect("triangle is stable") {
        Outcome::Solved(solution) => solution,
        Outcome::FullyRestrained => panic!("triangle has free DOFs"),
    }
}

#[test]
fn reactions_split_the_apex_load() {
    let solution = solve_triangle(TriangleProperties::default());

    let left = solution.reaction(1).expect("pinned support");
    let right = solution.reaction(2).expect("roller support");
    assert_relative_eq!(left.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(left.y, 5.0, max_relative = 1e-6);
    assert_relative_eq!(right.x, 0.0);
    assert_relative_eq!(right.y, 5.0, max_relative = 1e-6);

    let apex = solution.reaction(3).expect("free node is reported");
    assert_eq!((apex.x, apex.y), (0.0, 0.0));
}

#[test]
fn member_forces_match_hand_calculation() {
    let properties = TriangleProperties::default();
    let solution = solve_triangle(properties);

    let bottom = solution.element(1).expect("bottom chord");
    let right = solution.element(2).expect("right rafter");
    let left = solution.element(3).expect("left rafter");

    // Rafters carry 5 * sqrt(13) / 3 in compression, the tie 10 / 3 in tension.
    assert_relative_eq!(bottom.force, 3.33, epsilon = 1e-2);
    assert_relative_eq!(right.force, -6.01, epsilon = 1e-2);
    assert_relative_eq!(left.force, -6.01, epsilon = 1e-2);
    assert_relative_eq!(bottom.force, 10.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(right.force, -5.0 * 13.0_f64.sqrt() / 3.0, epsilon = 1e-9);

    assert!(bottom.is_tension());
    assert!(right.is_compression() && left.is_compression());
    assert_relative_eq!(bottom.stress, bottom.force / properties.area, epsilon = 1e-6);
}

#[test]
fn element_results_keep_input_order() {
    let solution = solve_triangle(TriangleProperties::default());
    let ids: Vec<_> = solution.element_results.iter().map(|result| result.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn displacements_match_closed_form() {
    let properties = TriangleProperties::default();
    let solution = solve_triangle(properties);
    let ea = properties.elastic_modulus * properties.area;

    assert_eq!(solution.displacement(1).map(|d| (d.x, d.y)), Some((0.0, 0.0)));

    // The tie stretches by N L / EA and the roller slides by that much.
    let roller = solution.displacement(2).expect("roller");
    assert_relative_eq!(roller.x, (10.0 / 3.0) * 4.0 / ea, max_relative = 1e-9);
    assert_eq!(roller.y, 0.0);

    let apex = solution.displacement(3).expect("apex");
    assert_relative_eq!(apex.x, roller.x / 2.0, max_relative = 1e-9);
    assert!(apex.y < 0.0);
}

#[test]
fn repeated_solves_are_identical() {
    let first = solve_triangle(TriangleProperties::default());
    let second = solve_triangle(TriangleProperties::default());
    assert_eq!(first, second);
}

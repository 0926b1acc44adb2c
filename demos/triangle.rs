use truss2d::{solve, Element, Load, Node, Outcome, Support};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let nodes = [
        Node::new(1, 0.0, 0.0).with_support(Support::Pinned),
        Node::new(2, 4.0, 0.0).with_support(Support::RollerY),
        Node::new(3, 2.0, 3.0),
    ];
    let elements = [
        Element::new(1, 1, 2, 200.0e9, 0.01).with_yield_strength(250.0e6),
        Element::new(2, 2, 3, 200.0e9, 0.01).with_yield_strength(250.0e6),
        Element::new(3, 3, 1, 200.0e9, 0.01).with_yield_strength(250.0e6),
    ];
    let loads = [Load::new(3, 0.0, -10.0e3)];

    let Outcome::Solved(solution) = solve(&nodes, &elements, &loads)? else {
        println!("nothing to solve, every DOF is restrained");
        return Ok(());
    };

    if let Some(apex) = solution.displacement(3) {
        println!("apex: ux = {:.3e} m, uy = {:.3e} m", apex.x, apex.y);
    }
    for result in &solution.element_results {
        println!(
            "element {}: N = {:+.1} N, FOS = {:.1}",
            result.id,
            result.force,
            result.factor_of_safety.unwrap_or(f64::INFINITY)
        );
    }

    Ok(())
}

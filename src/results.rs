//! Result types returned by a solve.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::{Displacement, Force};
use crate::model::{ElementId, NodeId};

/// Axial response of one element.
///
/// Forces follow the usual truss convention: positive is tension (the member
/// elongates), negative is compression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementResult {
    /// Element id.
    pub id: ElementId,
    /// Axial force.
    pub force: f64,
    /// Axial stress, force over area.
    pub stress: f64,
    /// Yield strength over absolute stress, when a yield strength was given.
    #[serde(rename = "factorOfSafety", skip_serializing_if = "Option::is_none")]
    pub factor_of_safety: Option<f64>,
}

impl ElementResult {
    /// Whether the member is stretched.
    #[must_use]
    pub fn is_tension(&self) -> bool {
        self.force > 0.0
    }

    /// Whether the member is shortened.
    #[must_use]
    pub fn is_compression(&self) -> bool {
        self.force < 0.0
    }
}

/// Displacements, reactions and member forces of a solved structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Translation of every node.
    pub displacements: BTreeMap<NodeId, Displacement>,
    /// Support reaction of every node, zero on unrestrained axes.
    pub reactions: BTreeMap<NodeId, Force>,
    /// One entry per input element, in input order.
    pub element_results: Vec<ElementResult>,
}

impl Solution {
    /// Displacement of `node`.
    #[must_use]
    pub fn displacement(&self, node: NodeId) -> Option<Displacement> {
        self.displacements.get(&node).copied()
    }

    /// Reaction at `node`.
    #[must_use]
    pub fn reaction(&self, node: NodeId) -> Option<Force> {
        self.reactions.get(&node).copied()
    }

    /// Result for the first element with id `element`.
    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&ElementResult> {
        self.element_results
            .iter()
            .find(|result| result.id == element)
    }

    /// Sum of all support reactions.
    #[must_use]
    pub fn total_reaction(&self) -> Force {
        self.reactions
            .values()
            .fold(Force::default(), |total, &reaction| total + reaction)
    }

    /// Node with the largest displacement magnitude.
    #[must_use]
    pub fn max_displacement(&self) -> Option<(NodeId, Displacement)> {
        self.displacements
            .iter()
            .max_by(|(_, a), (_, b)| a.magnitude().total_cmp(&b.magnitude()))
            .map(|(&id, &displacement)| (id, displacement))
    }

    /// Element with the largest absolute stress.
    #[must_use]
    pub fn max_stress_element(&self) -> Option<&ElementResult> {
        self.element_results
            .iter()
            .max_by(|a, b| a.stress.abs().total_cmp(&b.stress.abs()))
    }

    /// Element with the smallest factor of safety among those that have one.
    #[must_use]
    pub fn min_factor_of_safety_element(&self) -> Option<&ElementResult> {
        self.element_results
            .iter()
            .filter_map(|result| result.factor_of_safety.map(|fos| (fos, result)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, result)| result)
    }
}

/// Non-error outcome of a solve.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Every DOF is restrained; nothing was solved and no values are reported.
    FullyRestrained,
    /// The structure was solved.
    Solved(Solution),
}

impl Outcome {
    /// The solution, if one was computed.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::FullyRestrained => None,
        }
    }

    /// Consume the outcome, returning the solution if one was computed.
    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::FullyRestrained => None,
        }
    }

    /// Whether this is the fully restrained case.
    #[must_use]
    pub fn is_fully_restrained(&self) -> bool {
        matches!(self, Outcome::FullyRestrained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: ElementId, force: f64, fos: Option<f64>) -> ElementResult {
        ElementResult {
            id,
            force,
            stress: force / 2.0,
            factor_of_safety: fos,
        }
    }

    fn solution() -> Solution {
        Solution {
            displacements: BTreeMap::from([
                (1, Displacement::new(0.0, 0.0)),
                (3, Displacement::new(0.3, -0.4)),
                (2, Displacement::new(0.1, 0.0)),
            ]),
            reactions: BTreeMap::from([
                (1, Force::new(-2.0, 5.0)),
                (2, Force::new(0.0, 5.0)),
                (3, Force::new(0.0, 0.0)),
            ]),
            element_results: vec![
                element(7, 3.0, Some(10.0)),
                element(5, -8.0, Some(4.0)),
                element(6, 1.0, None),
            ],
        }
    }

    #[test]
    fn lookups_by_id() {
        let solution = solution();
        assert_eq!(solution.displacement(2), Some(Displacement::new(0.1, 0.0)));
        assert_eq!(solution.reaction(1), Some(Force::new(-2.0, 5.0)));
        assert_eq!(solution.element(5).map(|e| e.force), Some(-8.0));
        assert!(solution.element(99).is_none());
    }

    #[test]
    fn summaries() {
        let solution = solution();
        assert_eq!(solution.total_reaction(), Force::new(-2.0, 10.0));
        assert_eq!(solution.max_displacement().map(|(id, _)| id), Some(3));
        assert_eq!(solution.max_stress_element().map(|e| e.id), Some(5));
        assert_eq!(solution.min_factor_of_safety_element().map(|e| e.id), Some(5));
        assert!(solution.element_results[0].is_tension());
        assert!(solution.element_results[1].is_compression());
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(solution()).expect("serializes");
        assert_eq!(json["displacements"]["3"]["y"], -0.4);
        assert_eq!(json["reactions"]["1"]["x"], -2.0);
        assert_eq!(json["elementResults"][0]["id"], 7);
        assert_eq!(json["elementResults"][0]["factorOfSafety"], 10.0);
        assert!(json["elementResults"][2].get("factorOfSafety").is_none());
    }

    #[test]
    fn fully_restrained_has_no_solution() {
        assert!(Outcome::FullyRestrained.solution().is_none());
        assert!(Outcome::FullyRestrained.is_fully_restrained());
        let solved = Outcome::Solved(Solution::default());
        assert!(solved.solution().is_some());
        assert!(solved.into_solution().is_some());
    }
}

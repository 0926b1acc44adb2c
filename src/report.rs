//! Human-readable and JSON renderings of a solve outcome.

use std::fmt::Write;

use serde::Serialize;

use crate::errors::SolveError;
use crate::presets::UnitSystem;
use crate::results::{Outcome, Solution};

/// Message reported when every DOF is restrained.
pub const FULLY_RESTRAINED_MESSAGE: &str = "structure fully restrained";

/// Error reported when the structure is a mechanism.
pub const SINGULAR_MESSAGE: &str = "unstable structure / singular matrix";

/// JSON shape of a solve outcome: exactly one of a message, an error or results.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireOutcome<'a> {
    /// Nothing was solved.
    Message {
        /// Always [`FULLY_RESTRAINED_MESSAGE`].
        message: &'static str,
    },
    /// The solve failed.
    Error {
        /// [`SINGULAR_MESSAGE`] or the validation message.
        error: String,
        /// Extra diagnosis, when available.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Displacements, reactions and element results.
    Solved(&'a Solution),
}

impl<'a> WireOutcome<'a> {
    /// Convert a solve result into its JSON shape.
    #[must_use]
    pub fn new(result: &'a Result<Outcome, SolveError>) -> Self {
        match result {
            Ok(Outcome::FullyRestrained) => WireOutcome::Message {
                message: FULLY_RESTRAINED_MESSAGE,
            },
            Ok(Outcome::Solved(solution)) => WireOutcome::Solved(solution),
            Err(SolveError::SingularSystem(diagnosis)) => WireOutcome::Error {
                error: SINGULAR_MESSAGE.to_owned(),
                detail: Some(diagnosis.to_string()),
            },
            Err(error) => WireOutcome::Error {
                error: error.to_string(),
                detail: None,
            },
        }
    }
}

/// Render a solve result as pretty-printed JSON.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if serialization fails.
pub fn render_json(result: &Result<Outcome, SolveError>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&WireOutcome::new(result))
}

/// Render a solve result as a plain-text report, labelling values in `units`.
#[must_use]
pub fn render_text(result: &Result<Outcome, SolveError>, units: Option<UnitSystem>) -> String {
    match result {
        Ok(Outcome::FullyRestrained) => format!("{FULLY_RESTRAINED_MESSAGE}\n"),
        Ok(Outcome::Solved(solution)) => render_solution(solution, units),
        Err(error) => format!("error: {error}\n"),
    }
}

fn render_solution(solution: &Solution, units: Option<UnitSystem>) -> String {
    let (force, length) = units.map_or(("", ""), |units| {
        (units.force_unit(), units.length_unit())
    });
    let mut output = String::new();

    if let Some(units) = units {
        writeln!(&mut output, "Units: {units}").expect("writing to string cannot fail");
    }

    output.push_str("Displacements\n");
    for (id, displacement) in &solution.displacements {
        writeln!(
            &mut output,
            "  node {id:>4}: ux = {:+.4e} {length}, uy = {:+.4e} {length}",
            displacement.x, displacement.y
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("Reactions\n");
    for (id, reaction) in &solution.reactions {
        if reaction.x == 0.0 && reaction.y == 0.0 {
            continue;
        }
        writeln!(
            &mut output,
            "  node {id:>4}: rx = {:+.4} {force}, ry = {:+.4} {force}",
            reaction.x, reaction.y
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("Elements\n");
    for result in &solution.element_results {
        let state = if result.is_tension() {
            "tension"
        } else if result.is_compression() {
            "compression"
        } else {
            "unloaded"
        };
        writeln!(
            &mut output,
            "  element {:>4}: N = {:+.4} {force} ({state}), stress = {:+.4e}",
            result.id, result.force, result.stress
        )
        .expect("writing to string cannot fail");
    }

    if let Some(critical) = solution.max_stress_element() {
        writeln!(
            &mut output,
            "Most stressed element: {} ({:+.4e})",
            critical.id, critical.stress
        )
        .expect("writing to string cannot fail");
    }
    if let Some(critical) = solution.min_factor_of_safety_element() {
        if let Some(fos) = critical.factor_of_safety {
            writeln!(
                &mut output,
                "Lowest factor of safety: {fos:.2} (element {})",
                critical.id
            )
            .expect("writing to string cannot fail");
        }
    }

    output
}

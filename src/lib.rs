#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod assembly;
pub mod config;
pub mod connectivity;
pub mod dof;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod postprocess;
pub mod presets;
pub mod report;
pub mod results;
pub mod solver;
pub mod validation;

pub use analysis::{analyze, solve, solve_with};
pub use config::{SolverOptions, ValidationPolicy};
pub use errors::{Diagnosis, Instability, SolveError, ValidationError};
pub use geometry::{displacement, force, point, Displacement, Force, Point};
pub use model::{Element, ElementId, Load, Node, NodeId, Structure, Support};
pub use presets::{preset, Preset, UnitSystem, PRESETS};
pub use results::{ElementResult, Outcome, Solution};

//! Options controlling validation and singularity detection.

use serde::{Deserialize, Serialize};

/// How inconsistent input is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Reject the solve with a [`ValidationError`](crate::ValidationError).
    #[default]
    Strict,
    /// Skip dangling references and zero-length members, logging each skip.
    Lenient,
}

/// Options for a solve call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Treatment of invalid elements and loads.
    pub validation: ValidationPolicy,
    /// Smallest accepted ratio between the smallest and largest LU pivot.
    pub pivot_tolerance: f64,
    /// Reject structures with fewer than three restrained DOFs before factorising.
    pub check_restraint_count: bool,
    /// Refuse structures with more DOFs than this.
    pub max_dofs: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            pivot_tolerance: 1e-12,
            check_restraint_count: true,
            max_dofs: None,
        }
    }
}

impl SolverOptions {
    /// Default options, rejecting invalid input.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Options that skip invalid elements and loads instead of failing.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            validation: ValidationPolicy::Lenient,
            ..Self::default()
        }
    }

    /// Set the pivot ratio tolerance. Zero only rejects exactly singular matrices.
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Enable or disable the pre-solve restraint count.
    #[must_use]
    pub fn with_restraint_check(mut self, enabled: bool) -> Self {
        self.check_restraint_count = enabled;
        self
    }

    /// Limit the number of DOFs accepted.
    #[must_use]
    pub fn with_max_dofs(mut self, max_dofs: usize) -> Self {
        self.max_dofs = Some(max_dofs);
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

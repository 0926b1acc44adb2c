//! Solution of the reduced (free-DOF) stiffness system.

use nalgebra::{DMatrix, DVector};

use crate::dof::DofPartition;
use crate::errors::Instability;

/// Restrained DOFs needed to stop the two translations and the rotation of a rigid body in the plane.
pub const MIN_RESTRAINTS: usize = 3;

/// Reject partitions that cannot prevent rigid-body motion.
///
/// With any free DOF and fewer than [`MIN_RESTRAINTS`] restrained DOFs the
/// stiffness matrix is singular whatever the member layout.
///
/// # Errors
///
/// Returns [`Instability::InsufficientRestraints`] when too few DOFs are restrained.
pub fn check_restraints(partition: &DofPartition) -> Result<(), Instability> {
    let restrained = partition.restrained.len();
    if !partition.free.is_empty() && restrained < MIN_RESTRAINTS {
        return Err(Instability::InsufficientRestraints { restrained });
    }
    Ok(())
}

/// Extract `Kff` and `Ff`, the rows and columns of the free DOFs.
#[must_use]
pub fn reduce(
    stiffness: &DMatrix<f64>,
    load: &DVector<f64>,
    free_dofs: &[usize],
) -> (DMatrix<f64>, DVector<f64>) {
    let free_len = free_dofs.len();
    let mut k_ff = DMatrix::zeros(free_len, free_len);
    let mut f_f = DVector::zeros(free_len);
    for (row_idx, &row) in free_dofs.iter().enumerate() {
        f_f[row_idx] = load[row];
        for (col_idx, &col) in free_dofs.iter().enumerate() {
            k_ff[(row_idx, col_idx)] = stiffness[(row, col)];
        }
    }
    (k_ff, f_f)
}

/// Solve `Kff * Uf = Ff` by LU factorisation with partial pivoting.
///
/// Floating point rarely produces an exactly zero pivot for a mechanism, so the
/// ratio of the smallest to the largest pivot magnitude is compared against
/// `pivot_tolerance` as well.
///
/// # Errors
///
/// Returns [`Instability::ZeroPivot`] for an exactly singular matrix and
/// [`Instability::IllConditioned`] when the pivot ratio is below tolerance.
pub fn solve_reduced(
    k_ff: DMatrix<f64>,
    f_f: &DVector<f64>,
    pivot_tolerance: f64,
) -> Result<DVector<f64>, Instability> {
    let lu = k_ff.lu();
    let pivots = lu.u().diagonal();
    let largest = pivots.amax();
    let smallest = pivots.amin();
    if largest == 0.0 || smallest == 0.0 {
        return Err(Instability::ZeroPivot);
    }
    let pivot_ratio = smallest / largest;
    log::debug!("reduced system of {} DOFs, pivot ratio {pivot_ratio:.3e}", f_f.len());
    if pivot_ratio < pivot_tolerance {
        return Err(Instability::IllConditioned { pivot_ratio });
    }
    lu.solve(f_f).ok_or(Instability::ZeroPivot)
}

//! Matrix decompositions consumed by the rotation approximator and the averagers.
//!
//! These are thin wrappers over `faer`,
//! translating between [Matrix] and `faer::Mat` and mapping failures onto [RotationError].
use faer::Side;

use crate::{
    Matrix,
    error::{Result, RotationError},
};

/// Singular value decomposition `M = U * diag(s) * V^T`.
#[derive(Debug, Clone)]
pub struct Svd {
    pub u: Matrix,
    /// Singular values, nonnegative and in nonincreasing order.
    pub s: Vec<f64>,
    pub v: Matrix,
}

/// Eigendecomposition of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues in nondecreasing order.
    pub values: Vec<f64>,
    /// Column `i` is the unit eigenvector for `values[i]`.
    pub vectors: Matrix,
}

impl SymmetricEigen {
    /// Index of the eigenvalue with the largest magnitude.
    pub fn dominant_index(&self) -> usize {
        let mut best = 0;
        for (idx, v) in self.values.iter().enumerate() {
            if v.abs() > self.values[best].abs() {
                best = idx;
            }
        }
        best
    }

    /// Copy out one eigenvector.
    pub fn vector(&self, idx: usize) -> Vec<f64> {
        (0..self.vectors.nrows())
            .map(|r| self.vectors[(r, idx)])
            .collect()
    }
}

fn require_finite(m: &Matrix, what: &str) -> Result<()> {
    if m.data().iter().any(|v| !v.is_finite()) {
        return Err(RotationError::numerical(format!(
            "{what} input contains non-finite values"
        )));
    }
    Ok(())
}

/// Singular value decomposition of a square matrix.
pub fn svd(m: &Matrix) -> Result<Svd> {
    if !m.is_square() || m.nrows() == 0 {
        return Err(RotationError::invalid(format!(
            "SVD requires a non-empty square matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    require_finite(m, "SVD")?;
    let decomp = m
        .to_faer()
        .svd()
        .map_err(|e| RotationError::numerical(format!("SVD failed: {e:?}")))?;
    let s = decomp.S().column_vector();
    Ok(Svd {
        u: Matrix::from_faer(decomp.U()),
        s: (0..s.nrows()).map(|i| s[i]).collect(),
        v: Matrix::from_faer(decomp.V()),
    })
}

/// Eigendecomposition of a symmetric matrix.
///
/// Only the lower triangle is read.
pub fn symmetric_eigen(m: &Matrix) -> Result<SymmetricEigen> {
    if !m.is_square() || m.nrows() == 0 {
        return Err(RotationError::invalid(format!(
            "eigendecomposition requires a non-empty square matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    require_finite(m, "eigendecomposition")?;
    let decomp = m
        .to_faer()
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| RotationError::numerical(format!("eigendecomposition failed: {e:?}")))?;
    let s = decomp.S().column_vector();
    Ok(SymmetricEigen {
        values: (0..s.nrows()).map(|i| s[i]).collect(),
        vectors: Matrix::from_faer(decomp.U()),
    })
}

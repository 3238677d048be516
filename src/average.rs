//! Averaging of rotations, as quaternions or as matrices.
use crate::{
    Matrix, Quaternion,
    approximate::approximate_rotation_into,
    decomposition::symmetric_eigen,
    error::{Result, RotationError},
};

/// Average of unit quaternions.
///
/// Returns the dominant eigenvector of `sum(q q^T)`,
/// which is insensitive to the sign of each input.
/// The sign of the result is whatever the eigensolver produces.
pub fn average_quaternions(quats: &[Quaternion]) -> Result<Quaternion> {
    if quats.is_empty() {
        return Err(RotationError::invalid(
            "cannot average an empty list of quaternions",
        ));
    }

    let mut acc = Matrix::zeros(4, 4);
    for q in quats {
        let q = q.to_array();
        for r in 0..4 {
            for c in 0..4 {
                acc[(r, c)] += q[r] * q[c];
            }
        }
    }

    let eig = symmetric_eigen(&acc)?;
    let idx = eig.dominant_index();
    log::debug!(
        "averaged {} quaternions, dominant eigenvalue {}",
        quats.len(),
        eig.values[idx]
    );
    let v = eig.vector(idx);
    Ok(Quaternion::new(v[0], v[1], v[2], v[3]))
}

/// Average of rotation matrices: the element-wise mean, projected back onto a rotation.
pub fn average_rotation_matrices<M: AsRef<Matrix>>(matrices: &[M]) -> Result<Matrix> {
    let mut out = Matrix::zeros(3, 3);
    average_rotation_matrices_into(matrices, &mut out)?;
    Ok(out)
}

pub fn average_rotation_matrices_into<M: AsRef<Matrix>>(
    matrices: &[M],
    out: &mut Matrix,
) -> Result<()> {
    if matrices.is_empty() {
        return Err(RotationError::invalid(
            "cannot average an empty list of matrices",
        ));
    }

    let mut mean = Matrix::zeros(3, 3);
    for m in matrices {
        let m = m.as_ref();
        m.require_3x3("matrix to average")?;
        mean.add_assign(m)?;
    }
    mean.scale_mut(1.0 / matrices.len() as f64);
    log::debug!("averaged {} rotation matrices", matrices.len());

    approximate_rotation_into(&mean, out)
}

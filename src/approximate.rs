//! Projection of an arbitrary 3x3 matrix onto the nearest rotation.
use crate::{
    Matrix,
    decomposition::{Svd, svd},
    error::Result,
};

/// The rotation closest to `m` in the Frobenius norm.
///
/// With `M = U S V^T`, this is `U V^T`, negated if that product is a reflection.
pub fn approximate_rotation(m: &Matrix) -> Result<Matrix> {
    let mut out = Matrix::zeros(3, 3);
    approximate_rotation_into(m, &mut out)?;
    Ok(out)
}

/// As [approximate_rotation], writing into `out`, which is left untouched on error.
pub fn approximate_rotation_into(m: &Matrix, out: &mut Matrix) -> Result<()> {
    m.require_3x3("matrix to approximate")?;
    out.require_3x3("approximation output")?;

    let Svd { u, v, .. } = svd(m)?;
    let mut r = u.try_mul(&v.transpose())?;
    if r.determinant()? < 0.0 {
        log::trace!("nearest orthogonal matrix is a reflection, negating");
        r.scale_mut(-1.0);
    }
    out.copy_from(&r)
}

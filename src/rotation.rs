use std::sync::Arc;

use crate::{
    AxisAngle, EulerAngles, EulerSequence, Matrix, Quaternion, Transformation,
    approximate::approximate_rotation,
    average::average_rotation_matrices,
    axis_angle::{axis_angle_to_matrix, matrix_to_axis_angle, norm3},
    config::epsilon,
    error::{Result, RotationError},
    euler::matrix_to_euler,
    quaternion::{matrix_to_quaternion, quaternion_to_matrix},
};

/// A 3x3 matrix known to be a proper rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    matrix: Matrix,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// Check that `matrix` is 3x3, orthonormal and has determinant 1,
    /// all within the configured epsilon.
    pub fn try_new(matrix: Matrix) -> Result<Self> {
        matrix.require_3x3("rotation matrix")?;
        let eps = epsilon();
        if !matrix.has_orthonormal_rows(eps) {
            // rows is fine here because the matrix is square,
            // in which case an orthonormal matrix's transpose is also orthonormal
            return Err(RotationError::invalid("rotation matrix must be orthonormal"));
        }
        let det = matrix.determinant()?;
        if (det - 1.0).abs() > eps {
            return Err(RotationError::invalid(format!(
                "rotation matrix must have determinant 1, got {det}"
            )));
        }
        Ok(Self { matrix })
    }

    pub fn identity() -> Self {
        Self {
            matrix: Matrix::identity(3),
        }
    }

    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self {
            matrix: quaternion_to_matrix(&q.normalize()),
        }
    }

    /// The axis is normalised first; a zero axis gives the identity.
    pub fn from_axis_angle(aa: &AxisAngle) -> Self {
        let n = norm3(aa.axis);
        if n == 0.0 {
            return Self::identity();
        }
        let unit = AxisAngle::new(aa.axis.map(|v| v / n), aa.theta);
        Self {
            matrix: axis_angle_to_matrix(&unit),
        }
    }

    pub fn from_euler(angles: &EulerAngles) -> Self {
        Self {
            matrix: angles.to_matrix(),
        }
    }

    /// The rotation nearest to an arbitrary 3x3 matrix.
    pub fn approximate(m: &Matrix) -> Result<Self> {
        Ok(Self {
            matrix: approximate_rotation(m)?,
        })
    }

    pub fn average(rotations: &[Rotation]) -> Result<Self> {
        let matrices: Vec<&Matrix> = rotations.iter().map(|r| &r.matrix).collect();
        Ok(Self {
            matrix: average_rotation_matrices(&matrices)?,
        })
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    pub fn to_quaternion(&self) -> Result<Quaternion> {
        matrix_to_quaternion(&self.matrix)
    }

    pub fn to_axis_angle(&self) -> Result<AxisAngle> {
        matrix_to_axis_angle(&self.matrix)
    }

    pub fn to_euler(&self, sequence: EulerSequence) -> Result<EulerAngles> {
        matrix_to_euler(&self.matrix, sequence)
    }
}

impl AsRef<Matrix> for Rotation {
    fn as_ref(&self) -> &Matrix {
        &self.matrix
    }
}

impl TryFrom<Matrix> for Rotation {
    type Error = RotationError;

    fn try_from(value: Matrix) -> Result<Self> {
        Self::try_new(value)
    }
}

impl Transformation for Rotation {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        self.matrix.matmul_into(pt, buf);
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        self.matrix.matmul_transposed_into(columns, bufs);
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(Self {
            matrix: self.matrix.transpose(),
        }))
    }

    fn is_identity(&self) -> bool {
        self.matrix.is_identity()
    }

    fn input_ndim(&self) -> usize {
        3
    }

    fn output_ndim(&self) -> usize {
        3
    }
}

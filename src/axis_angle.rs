//! Conversions between rotation matrices and axis-angle (Rodrigues) form.
use std::{f64::consts::PI, sync::Arc};

use crate::{
    Matrix, Transformation,
    config::epsilon,
    error::Result,
};

/// A rotation of `theta` radians about the unit vector `axis`.
///
/// Conversions in this crate produce `theta` in `[0, pi]`.
/// When `theta` is zero the axis carries no information and may be arbitrary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: [f64; 3],
    pub theta: f64,
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self {
            axis: [1.0, 0.0, 0.0],
            theta: 0.0,
        }
    }
}

impl AxisAngle {
    /// The axis is used as given; it should have unit length.
    pub fn new(axis: [f64; 3], theta: f64) -> Self {
        Self { axis, theta }
    }

    /// Build from a rotation vector, whose direction is the axis and whose length is the angle.
    pub fn from_rotation_vector(v: [f64; 3]) -> Self {
        let theta = norm3(v);
        if theta == 0.0 {
            return Self::default();
        }
        Self {
            axis: [v[0] / theta, v[1] / theta, v[2] / theta],
            theta,
        }
    }

    pub fn rotation_vector(&self) -> [f64; 3] {
        self.axis.map(|a| a * self.theta)
    }

    pub fn to_matrix(&self) -> Matrix {
        axis_angle_to_matrix(self)
    }

    pub fn from_matrix(r: &Matrix) -> Result<Self> {
        matrix_to_axis_angle(r)
    }

    /// Rotate `pt` using the vector form of Rodrigues' formula.
    pub fn rotate(&self, pt: &[f64], buf: &mut [f64]) {
        let k = self.axis;
        let (s, c) = self.theta.sin_cos();
        let v = [pt[0], pt[1], pt[2]];
        let kxv = cross(k, v);
        let kdv = k[0] * v[0] + k[1] * v[1] + k[2] * v[2];
        for i in 0..3 {
            buf[i] = v[i] * c + kxv[i] * s + k[i] * kdv * (1.0 - c);
        }
    }
}

pub(crate) fn norm3(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Rodrigues' rotation formula, `R = I + sin(theta) K + (1 - cos(theta)) K^2`.
pub fn axis_angle_to_matrix(aa: &AxisAngle) -> Matrix {
    let mut out = Matrix::zeros(3, 3);
    write_axis_angle(aa, &mut out);
    out
}

pub fn axis_angle_to_matrix_into(aa: &AxisAngle, out: &mut Matrix) -> Result<()> {
    out.require_3x3("axis-angle output")?;
    write_axis_angle(aa, out);
    Ok(())
}

fn write_axis_angle(aa: &AxisAngle, out: &mut Matrix) {
    let [x, y, z] = aa.axis;
    let (s, c) = aa.theta.sin_cos();
    let v = 1.0 - c;

    out[(0, 0)] = c + x * x * v;
    out[(0, 1)] = x * y * v - z * s;
    out[(0, 2)] = x * z * v + y * s;
    out[(1, 0)] = x * y * v + z * s;
    out[(1, 1)] = c + y * y * v;
    out[(1, 2)] = y * z * v - x * s;
    out[(2, 0)] = x * z * v - y * s;
    out[(2, 1)] = y * z * v + x * s;
    out[(2, 2)] = c + z * z * v;
}

/// Extract the axis and angle of a rotation matrix.
///
/// Matrices which are only approximately orthonormal are accepted;
/// the result degrades gracefully with the quality of the input.
pub fn matrix_to_axis_angle(r: &Matrix) -> Result<AxisAngle> {
    r.require_3x3("rotation matrix")?;
    let eps = epsilon();

    let diag_sum = (r.trace() - 1.0) / 2.0;
    let abs_diag_sum = diag_sum.abs();
    // 2 sin(theta) times the axis
    let skew = [
        r[(2, 1)] - r[(1, 2)],
        r[(0, 2)] - r[(2, 0)],
        r[(1, 0)] - r[(0, 1)],
    ];

    let (axis, theta) = if abs_diag_sum <= 1.0 && 1.0 - abs_diag_sum > 10.0 * eps {
        let theta = diag_sum.acos();
        let bottom = 2.0 * theta.sin();
        (skew.map(|v| v / bottom), theta)
    } else {
        // sin(theta) is too close to zero to divide by;
        // recover the axis magnitudes from the diagonal of R = 2nn^T - I instead.
        log::trace!("axis-angle extraction hit degenerate branch, diag_sum={diag_sum}");
        let theta = if diag_sum >= 0.0 { 0.0 } else { PI };

        let mut x = ((r[(0, 0)] + 1.0) / 2.0).max(0.0).sqrt();
        let mut y = ((r[(1, 1)] + 1.0) / 2.0).max(0.0).sqrt();
        let mut z = ((r[(2, 2)] + 1.0) / 2.0).max(0.0).sqrt();

        // off-diagonals also carry an axis * sin(theta) term,
        // so the sign tests must allow for up to 2 sin(theta)
        let tol = eps + norm3(skew);

        // order matters: each check relies on the signs fixed before it
        if (r[(1, 0)] - 2.0 * x * y).abs() > tol {
            x = -x;
        }
        if (r[(2, 0)] - 2.0 * x * z).abs() > tol {
            z = -z;
        }
        if (r[(2, 1)] - 2.0 * z * y).abs() > tol {
            y = -y;
            x = -x;
        }
        ([x, y, z], theta)
    };

    let n = norm3(axis);
    Ok(AxisAngle {
        axis: [axis[0] / n, axis[1] / n, axis[2] / n],
        theta,
    })
}

impl Transformation for AxisAngle {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        self.rotate(pt, buf);
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(AxisAngle {
            axis: self.axis,
            theta: -self.theta,
        }))
    }

    fn is_identity(&self) -> bool {
        self.theta == 0.0
    }

    fn input_ndim(&self) -> usize {
        3
    }

    fn output_ndim(&self) -> usize {
        3
    }
}

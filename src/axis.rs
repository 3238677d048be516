//! Elementary rotations about the coordinate axes,
//! and their composition into Euler-angle rotation matrices.
use std::fmt;

use crate::{
    EulerSequence, Matrix,
    error::{Result, RotationError},
};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Elementary rotation matrix about this axis.
    pub fn rotation(self, angle: f64) -> Matrix {
        let mut out = Matrix::zeros(3, 3);
        write_axis_rotation(self, angle, &mut out);
        out
    }
}

impl TryFrom<usize> for Axis {
    type Error = RotationError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            _ => Err(RotationError::invalid(format!(
                "axis index must be 0, 1 or 2, got {value}"
            ))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Fills every entry of a 3x3 `out`.
fn write_axis_rotation(axis: Axis, angle: f64, out: &mut Matrix) {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let rows = match axis {
        Axis::X => [
            [1.0, 0.0, 0.0],
            [0.0, c, -s],
            [0.0, s, c],
        ],
        Axis::Y => [
            [c, 0.0, s],
            [0.0, 1.0, 0.0],
            [-s, 0.0, c],
        ],
        Axis::Z => [
            [c, -s, 0.0],
            [s, c, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };
    for (r, row) in rows.iter().enumerate() {
        for (col, v) in row.iter().enumerate() {
            out[(r, col)] = *v;
        }
    }
}

pub fn rot_x(angle: f64) -> Matrix {
    Axis::X.rotation(angle)
}

pub fn rot_y(angle: f64) -> Matrix {
    Axis::Y.rotation(angle)
}

pub fn rot_z(angle: f64) -> Matrix {
    Axis::Z.rotation(angle)
}

pub fn rot_x_into(angle: f64, out: &mut Matrix) -> Result<()> {
    rotation_about_into(Axis::X, angle, out)
}

pub fn rot_y_into(angle: f64, out: &mut Matrix) -> Result<()> {
    rotation_about_into(Axis::Y, angle, out)
}

pub fn rot_z_into(angle: f64, out: &mut Matrix) -> Result<()> {
    rotation_about_into(Axis::Z, angle, out)
}

fn rotation_about_into(axis: Axis, angle: f64, out: &mut Matrix) -> Result<()> {
    out.require_3x3("rotation output")?;
    write_axis_rotation(axis, angle, out);
    Ok(())
}

/// Rotation about the axis with the given index (0 = X, 1 = Y, 2 = Z).
pub fn rotation_about_axis(axis_index: usize, angle: f64) -> Result<Matrix> {
    Ok(Axis::try_from(axis_index)?.rotation(angle))
}

pub fn rotation_about_axis_into(axis_index: usize, angle: f64, out: &mut Matrix) -> Result<()> {
    rotation_about_into(Axis::try_from(axis_index)?, angle, out)
}

/// Rotation matrix `R_C(c) * R_B(b) * R_A(a)` for the axes `(A, B, C)` named by `sequence`.
pub fn euler_to_matrix(sequence: EulerSequence, a: f64, b: f64, c: f64) -> Matrix {
    let mut out = Matrix::zeros(3, 3);
    compose_euler(sequence, a, b, c, &mut out);
    out
}

pub fn euler_to_matrix_into(
    sequence: EulerSequence,
    a: f64,
    b: f64,
    c: f64,
    out: &mut Matrix,
) -> Result<()> {
    out.require_3x3("Euler rotation output")?;
    compose_euler(sequence, a, b, c, out);
    Ok(())
}

fn compose_euler(sequence: EulerSequence, a: f64, b: f64, c: f64, out: &mut Matrix) {
    let [axis_a, axis_b, axis_c] = sequence.axes();
    let r_a = axis_a.rotation(a);
    let r_b = axis_b.rotation(b);
    let r_c = axis_c.rotation(c);

    let mut ba = Matrix::zeros(3, 3);
    // shapes are fixed at 3x3 here
    for r in 0..3 {
        for col in 0..3 {
            ba[(r, col)] = (0..3).map(|k| r_b[(r, k)] * r_a[(k, col)]).sum();
        }
    }
    for r in 0..3 {
        for col in 0..3 {
            out[(r, col)] = (0..3).map(|k| r_c[(r, k)] * ba[(k, col)]).sum();
        }
    }
}

//! Unit quaternions and their conversions to and from matrices and axis-angle form.
//!
//! Matrix conversions follow Besl & McKay,
//! "A Method for Registration of 3-D Shapes" (1992).
use std::{ops::Neg, sync::Arc};

use crate::{
    AxisAngle, Matrix, Transformation,
    axis_angle::{cross, norm3},
    config::epsilon,
    error::Result,
};

/// Quaternion `w + xi + yj + zk`.
///
/// Rotations are represented by unit quaternions;
/// `q` and `-q` describe the same rotation.
/// Normalisation is not enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        Quaternion::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Components in `[w, x, y, z]` order.
    pub fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns `self` unchanged if its norm is zero.
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            return self;
        }
        Self::new(self.w / n, self.x / n, self.y / n, self.z / n)
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Flip the sign if needed so that `w >= 0`; the rotation is unchanged.
    pub fn canonical(self) -> Self {
        if self.w < 0.0 { -self } else { self }
    }

    pub fn to_matrix(&self) -> Matrix {
        quaternion_to_matrix(self)
    }

    pub fn from_matrix(r: &Matrix) -> Result<Self> {
        matrix_to_quaternion(r)
    }

    pub fn to_axis_angle(&self) -> AxisAngle {
        quaternion_to_axis_angle(self)
    }

    pub fn from_axis_angle(aa: &AxisAngle) -> Self {
        axis_angle_to_quaternion(aa)
    }

    /// Rotate `pt` by `q v q*`, assuming `self` is unit length.
    pub fn rotate(&self, pt: &[f64], buf: &mut [f64]) {
        // v + 2w(u x v) + 2u x (u x v), with u the vector part
        let u = [self.x, self.y, self.z];
        let v = [pt[0], pt[1], pt[2]];
        let t = cross(u, v).map(|c| 2.0 * c);
        let ut = cross(u, t);
        for i in 0..3 {
            buf[i] = v[i] + self.w * t[i] + ut[i];
        }
    }
}

pub fn axis_angle_to_quaternion(aa: &AxisAngle) -> Quaternion {
    let (s, c) = (aa.theta / 2.0).sin_cos();
    Quaternion::new(c, aa.axis[0] * s, aa.axis[1] * s, aa.axis[2] * s)
}

/// The angle is kept in `[0, pi]` by working from whichever of `q`, `-q` has `w >= 0`.
/// A vanishing vector part gives [AxisAngle::default], the zero rotation about +X.
pub fn quaternion_to_axis_angle(q: &Quaternion) -> AxisAngle {
    let q = q.canonical();
    let n = norm3([q.x, q.y, q.z]);
    if n <= epsilon() {
        return AxisAngle::default();
    }
    AxisAngle {
        axis: [q.x / n, q.y / n, q.z / n],
        theta: 2.0 * q.w.clamp(-1.0, 1.0).acos(),
    }
}

/// Extract a unit quaternion from a rotation matrix.
///
/// The branch is chosen to keep the denominator away from zero.
pub fn matrix_to_quaternion(r: &Matrix) -> Result<Quaternion> {
    r.require_3x3("rotation matrix")?;

    let m00 = r[(0, 0)];
    let m01 = r[(0, 1)];
    let m02 = r[(0, 2)];
    let m10 = r[(1, 0)];
    let m11 = r[(1, 1)];
    let m12 = r[(1, 2)];
    let m20 = r[(2, 0)];
    let m21 = r[(2, 1)];
    let m22 = r[(2, 2)];

    let trace = m00 + m11 + m22;

    let q = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0; // 4w
        Quaternion::new(
            0.25 * s,
            (m21 - m12) / s,
            (m02 - m20) / s,
            (m10 - m01) / s,
        )
    } else if m00 > m11 && m00 > m22 {
        let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0; // 4x
        Quaternion::new(
            (m21 - m12) / s,
            0.25 * s,
            (m01 + m10) / s,
            (m02 + m20) / s,
        )
    } else if m11 > m22 {
        let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0; // 4y
        Quaternion::new(
            (m02 - m20) / s,
            (m01 + m10) / s,
            0.25 * s,
            (m12 + m21) / s,
        )
    } else {
        let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0; // 4z
        Quaternion::new(
            (m10 - m01) / s,
            (m02 + m20) / s,
            (m12 + m21) / s,
            0.25 * s,
        )
    };
    Ok(q)
}

pub fn quaternion_to_matrix(q: &Quaternion) -> Matrix {
    let mut out = Matrix::zeros(3, 3);
    write_quaternion(q, &mut out);
    out
}

pub fn quaternion_to_matrix_into(q: &Quaternion, out: &mut Matrix) -> Result<()> {
    out.require_3x3("quaternion output")?;
    write_quaternion(q, out);
    Ok(())
}

fn write_quaternion(q: &Quaternion, out: &mut Matrix) {
    let Quaternion { w, x, y, z } = *q;

    out[(0, 0)] = w * w + x * x - y * y - z * z;
    out[(0, 1)] = 2.0 * (x * y - w * z);
    out[(0, 2)] = 2.0 * (x * z + w * y);

    out[(1, 0)] = 2.0 * (x * y + w * z);
    out[(1, 1)] = w * w - x * x + y * y - z * z;
    out[(1, 2)] = 2.0 * (y * z - w * x);

    out[(2, 0)] = 2.0 * (x * z - w * y);
    out[(2, 1)] = 2.0 * (y * z + w * x);
    out[(2, 2)] = w * w - x * x - y * y + z * z;
}

impl Transformation for Quaternion {
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        self.rotate(pt, buf);
    }

    fn invert(&self) -> Option<Arc<dyn Transformation>> {
        Some(Arc::new(self.conjugate()))
    }

    fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.w.abs() == 1.0
    }

    fn input_ndim(&self) -> usize {
        3
    }

    fn output_ndim(&self) -> usize {
        3
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    use super::*;
    use crate::{
        RotationError,
        tests::{
            assert_is_rotation, assert_same_rotation, check_inverse_transform_bulk,
            check_inverse_transform_col, check_inverse_transform_coord, check_transform_bulk,
            check_transform_col, new_rng, random_quaternion, random_unit_vector,
        },
    };
    use approx::assert_abs_diff_eq;
    use faer::rand::Rng;

    #[test]
    fn quarter_turn_about_z() {
        let q = axis_angle_to_quaternion(&AxisAngle::new([0.0, 0.0, 1.0], FRAC_PI_2));
        assert_abs_diff_eq!(
            q.to_array().as_slice(),
            [FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2].as_slice(),
            epsilon = 1e-15
        );
        let r = quaternion_to_matrix(&q);
        #[rustfmt::skip]
        let expected = [
            0.0, -1.0, 0.0,
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        ];
        assert_abs_diff_eq!(r.data(), expected.as_slice(), epsilon = 1e-15);
    }

    #[test]
    fn axis_angle_round_trip() {
        let mut rng = new_rng();
        let mut quats: Vec<Quaternion> = (0..500).map(|_| random_quaternion(&mut rng)).collect();
        quats.extend([
            Quaternion::identity(),
            -Quaternion::identity(),
            Quaternion::new(1.0, 1e-12, 0.0, -1e-12).normalize(),
        ]);
        for q in quats {
            let aa = quaternion_to_axis_angle(&q);
            assert!(aa.axis.iter().all(|v| v.is_finite()), "{q:?} gave {aa:?}");
            assert_abs_diff_eq!(norm3(aa.axis), 1.0, epsilon = 1e-12);
            let back = axis_angle_to_quaternion(&aa);
            assert_same_rotation(&q, &back, 1e-9);
        }
    }

    #[test]
    fn identity_has_default_axis() {
        let aa = quaternion_to_axis_angle(&Quaternion::identity());
        assert_eq!(aa, AxisAngle::default());
        assert!(aa.to_matrix().is_identity());
        let mut buf = [f64::NAN; 3];
        aa.rotate(&[1.0, 2.0, 3.0], &mut buf);
        assert_eq!(buf, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn matrix_round_trip_covers_all_branches() {
        let mut rng = new_rng();
        let mut quats: Vec<Quaternion> = (0..500).map(|_| random_quaternion(&mut rng)).collect();
        // half turns about each axis force the non-trace branches
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            quats.push(axis_angle_to_quaternion(&AxisAngle::new(axis, PI)));
            quats.push(axis_angle_to_quaternion(&AxisAngle::new(axis, PI - 0.1)));
        }
        for q in quats {
            let r = quaternion_to_matrix(&q);
            assert_is_rotation(&r);
            let back = matrix_to_quaternion(&r).unwrap();
            assert_abs_diff_eq!(back.norm(), 1.0, epsilon = 1e-12);
            assert_same_rotation(&q, &back, 1e-12);
        }
    }

    #[test]
    fn matrix_to_quaternion_agrees_with_axis_angle() {
        let mut rng = new_rng();
        for _ in 0..100 {
            let aa = AxisAngle::new(random_unit_vector(&mut rng), rng.random::<f64>() * PI);
            let from_matrix = matrix_to_quaternion(&aa.to_matrix()).unwrap();
            assert_same_rotation(&axis_angle_to_quaternion(&aa), &from_matrix, 1e-12);
        }
    }

    #[test]
    fn into_rejects_wrong_shape() {
        let mut out = Matrix::zeros(3, 4);
        assert!(matches!(
            quaternion_to_matrix_into(&Quaternion::identity(), &mut out),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            matrix_to_quaternion(&Matrix::zeros(4, 4)),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rotate_matches_matrix() {
        let mut rng = new_rng();
        let q = random_quaternion(&mut rng);
        let m = q.to_matrix();
        let pt = [3.0, -20.0, 7.5];
        let mut buf = [f64::NAN; 3];
        q.rotate(&pt, &mut buf);
        assert_abs_diff_eq!(buf.as_slice(), m.matmul(&pt).as_slice(), epsilon = 1e-12);
    }

    #[test]
    fn identity_detection() {
        assert!(Quaternion::identity().is_identity());
        assert!((-Quaternion::identity()).is_identity());
        assert!(!Quaternion::new(0.0, 1.0, 0.0, 0.0).is_identity());
    }

    fn make_transform() -> Quaternion {
        Quaternion::new(0.5, -0.5, 0.5, 0.5)
    }

    #[test]
    fn test_bulk() {
        check_transform_bulk(make_transform());
    }

    #[test]
    fn test_columns() {
        check_transform_col(make_transform());
    }

    #[test]
    fn test_inverse() {
        check_inverse_transform_coord(make_transform());
    }

    #[test]
    fn test_inverse_bulk() {
        check_inverse_transform_bulk(make_transform());
    }

    #[test]
    fn test_inverse_columns() {
        check_inverse_transform_col(make_transform());
    }
}

//! Euler angles for all twelve axis sequences.
//!
//! Extraction from a matrix uses one of two shared kernels,
//! configured per sequence by a table of signed matrix entries;
//! see `KernelParams`.
use std::{fmt, str::FromStr};

use crate::{
    Axis, Matrix, Quaternion,
    axis::{euler_to_matrix, euler_to_matrix_into},
    config::epsilon,
    error::{Result, RotationError},
    quaternion::quaternion_to_matrix,
};

/// Order in which the three axis rotations are applied.
///
/// For a sequence named `ABC`, angle `a` is applied about axis A first,
/// then `b` about B, then `c` about C: `R = R_C(c) * R_B(b) * R_A(a)`.
/// Sequences whose first and last axes coincide are "proper" Euler angles;
/// the others are Tait-Bryan angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EulerSequence {
    Zyx,
    Zyz,
    Zxy,
    Zxz,
    Yxz,
    Yxy,
    Yzx,
    Yzy,
    Xyz,
    Xyx,
    Xzy,
    Xzx,
}

impl EulerSequence {
    pub const ALL: [EulerSequence; 12] = [
        EulerSequence::Zyx,
        EulerSequence::Zyz,
        EulerSequence::Zxy,
        EulerSequence::Zxz,
        EulerSequence::Yxz,
        EulerSequence::Yxy,
        EulerSequence::Yzx,
        EulerSequence::Yzy,
        EulerSequence::Xyz,
        EulerSequence::Xyx,
        EulerSequence::Xzy,
        EulerSequence::Xzx,
    ];

    /// Axes `[A, B, C]` in application order.
    pub fn axes(self) -> [Axis; 3] {
        use Axis::{X, Y, Z};
        match self {
            EulerSequence::Zyx => [Z, Y, X],
            EulerSequence::Zyz => [Z, Y, Z],
            EulerSequence::Zxy => [Z, X, Y],
            EulerSequence::Zxz => [Z, X, Z],
            EulerSequence::Yxz => [Y, X, Z],
            EulerSequence::Yxy => [Y, X, Y],
            EulerSequence::Yzx => [Y, Z, X],
            EulerSequence::Yzy => [Y, Z, Y],
            EulerSequence::Xyz => [X, Y, Z],
            EulerSequence::Xyx => [X, Y, X],
            EulerSequence::Xzy => [X, Z, Y],
            EulerSequence::Xzx => [X, Z, X],
        }
    }

    /// Whether the first and last axes are the same.
    pub fn is_proper(self) -> bool {
        let [a, _, c] = self.axes();
        a == c
    }

    pub fn name(self) -> &'static str {
        match self {
            EulerSequence::Zyx => "ZYX",
            EulerSequence::Zyz => "ZYZ",
            EulerSequence::Zxy => "ZXY",
            EulerSequence::Zxz => "ZXZ",
            EulerSequence::Yxz => "YXZ",
            EulerSequence::Yxy => "YXY",
            EulerSequence::Yzx => "YZX",
            EulerSequence::Yzy => "YZY",
            EulerSequence::Xyz => "XYZ",
            EulerSequence::Xyx => "XYX",
            EulerSequence::Xzy => "XZY",
            EulerSequence::Xzx => "XZX",
        }
    }
}

impl fmt::Display for EulerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EulerSequence {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self> {
        EulerSequence::ALL
            .into_iter()
            .find(|seq| seq.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RotationError::invalid(format!("unknown Euler sequence {s:?}")))
    }
}

impl TryFrom<&str> for EulerSequence {
    type Error = RotationError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

/// Three rotation angles, in radians, tagged with the sequence they apply in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub sequence: EulerSequence,
    pub rot_a: f64,
    pub rot_b: f64,
    pub rot_c: f64,
}

impl EulerAngles {
    pub fn new(sequence: EulerSequence, rot_a: f64, rot_b: f64, rot_c: f64) -> Self {
        Self {
            sequence,
            rot_a,
            rot_b,
            rot_c,
        }
    }

    pub fn angles(&self) -> [f64; 3] {
        [self.rot_a, self.rot_b, self.rot_c]
    }

    pub fn to_matrix(&self) -> Matrix {
        euler_to_matrix(self.sequence, self.rot_a, self.rot_b, self.rot_c)
    }

    pub fn to_matrix_into(&self, out: &mut Matrix) -> Result<()> {
        euler_to_matrix_into(self.sequence, self.rot_a, self.rot_b, self.rot_c, out)
    }

    pub fn to_quaternion(&self) -> Quaternion {
        euler_to_quaternion(self.sequence, self.rot_a, self.rot_b, self.rot_c)
    }

    pub fn from_matrix(r: &Matrix, sequence: EulerSequence) -> Result<Self> {
        matrix_to_euler(r, sequence)
    }

    pub fn from_quaternion(q: &Quaternion, sequence: EulerSequence) -> Self {
        quaternion_to_euler(q, sequence)
    }
}

/// How the middle angle relates to its matrix entry,
/// and where the first angle is read from at gimbal lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MiddleAngle {
    /// Tait-Bryan sequences: the entry is `sin(b)`, `b` in `[-pi/2, pi/2]`.
    ///
    /// At lock the first angle is split across two pairs of entries,
    /// which are averaged with the sign of `sin(b)`.
    Sine {
        locked_cos: [Entry; 2],
        locked_sin: [Entry; 2],
    },
    /// Proper Euler sequences: the entry is `cos(b)`, `b` in `[0, pi]`.
    ///
    /// At lock the first angle is read from the middle axis's row,
    /// which holds `cos(a)` and `sin(a)` at both `b = 0` and `b = pi`.
    Cosine { locked_cos: Entry, locked_sin: Entry },
}

/// A matrix entry, optionally negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    row: usize,
    col: usize,
    negate: bool,
}

impl Entry {
    const fn pos(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            negate: false,
        }
    }

    const fn neg(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            negate: true,
        }
    }

    fn read(self, m: &Matrix) -> f64 {
        let v = m[(self.row, self.col)];
        if self.negate { -v } else { v }
    }
}

/// Which matrix entries carry which trigonometric terms for one sequence.
///
/// Away from gimbal lock the first angle is `atan2(first_y, first_x)`
/// and the third is `atan2(third_y, third_x)`.
/// At gimbal lock only the sum or difference of the first and third angles is determined;
/// the third is pinned to zero and the first comes from the locked entries in `kind`.
#[derive(Debug, Clone, Copy)]
struct KernelParams {
    kind: MiddleAngle,
    first_y: Entry,
    first_x: Entry,
    middle: Entry,
    third_y: Entry,
    third_x: Entry,
}

fn kernel_params(sequence: EulerSequence) -> KernelParams {
    match sequence {
        EulerSequence::Zyx => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(1, 1), Entry::neg(2, 0)],
                locked_sin: [Entry::pos(1, 0), Entry::pos(2, 1)],
            },
            first_y: Entry::neg(0, 1),
            first_x: Entry::pos(0, 0),
            middle: Entry::pos(0, 2),
            third_y: Entry::neg(1, 2),
            third_x: Entry::pos(2, 2),
        },
        EulerSequence::Zyz => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(1, 1),
                locked_sin: Entry::pos(1, 0),
            },
            first_y: Entry::pos(2, 1),
            first_x: Entry::neg(2, 0),
            middle: Entry::pos(2, 2),
            third_y: Entry::pos(1, 2),
            third_x: Entry::pos(0, 2),
        },
        EulerSequence::Zxy => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(0, 0), Entry::pos(2, 1)],
                locked_sin: [Entry::neg(0, 1), Entry::pos(2, 0)],
            },
            first_y: Entry::pos(1, 0),
            first_x: Entry::pos(1, 1),
            middle: Entry::neg(1, 2),
            third_y: Entry::pos(0, 2),
            third_x: Entry::pos(2, 2),
        },
        EulerSequence::Zxz => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(0, 0),
                locked_sin: Entry::neg(0, 1),
            },
            first_y: Entry::pos(2, 0),
            first_x: Entry::pos(2, 1),
            middle: Entry::pos(2, 2),
            third_y: Entry::pos(0, 2),
            third_x: Entry::neg(1, 2),
        },
        EulerSequence::Yxz => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(0, 0), Entry::neg(1, 2)],
                locked_sin: [Entry::pos(0, 2), Entry::pos(1, 0)],
            },
            first_y: Entry::neg(2, 0),
            first_x: Entry::pos(2, 2),
            middle: Entry::pos(2, 1),
            third_y: Entry::neg(0, 1),
            third_x: Entry::pos(1, 1),
        },
        EulerSequence::Yxy => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(0, 0),
                locked_sin: Entry::pos(0, 2),
            },
            first_y: Entry::pos(1, 0),
            first_x: Entry::neg(1, 2),
            middle: Entry::pos(1, 1),
            third_y: Entry::pos(0, 1),
            third_x: Entry::pos(2, 1),
        },
        EulerSequence::Yzx => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(2, 2), Entry::pos(1, 0)],
                locked_sin: [Entry::neg(2, 0), Entry::pos(1, 2)],
            },
            first_y: Entry::pos(0, 2),
            first_x: Entry::pos(0, 0),
            middle: Entry::neg(0, 1),
            third_y: Entry::pos(2, 1),
            third_x: Entry::pos(1, 1),
        },
        EulerSequence::Yzy => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(2, 2),
                locked_sin: Entry::neg(2, 0),
            },
            first_y: Entry::pos(1, 2),
            first_x: Entry::pos(1, 0),
            middle: Entry::pos(1, 1),
            third_y: Entry::pos(2, 1),
            third_x: Entry::neg(0, 1),
        },
        EulerSequence::Xyz => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(1, 1), Entry::pos(0, 2)],
                locked_sin: [Entry::neg(1, 2), Entry::pos(0, 1)],
            },
            first_y: Entry::pos(2, 1),
            first_x: Entry::pos(2, 2),
            middle: Entry::neg(2, 0),
            third_y: Entry::pos(1, 0),
            third_x: Entry::pos(0, 0),
        },
        EulerSequence::Xyx => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(1, 1),
                locked_sin: Entry::neg(1, 2),
            },
            first_y: Entry::pos(0, 1),
            first_x: Entry::pos(0, 2),
            middle: Entry::pos(0, 0),
            third_y: Entry::pos(1, 0),
            third_x: Entry::neg(2, 0),
        },
        EulerSequence::Xzy => KernelParams {
            kind: MiddleAngle::Sine {
                locked_cos: [Entry::pos(2, 2), Entry::neg(0, 1)],
                locked_sin: [Entry::pos(2, 1), Entry::pos(0, 2)],
            },
            first_y: Entry::neg(1, 2),
            first_x: Entry::pos(1, 1),
            middle: Entry::pos(1, 0),
            third_y: Entry::neg(2, 0),
            third_x: Entry::pos(0, 0),
        },
        EulerSequence::Xzx => KernelParams {
            kind: MiddleAngle::Cosine {
                locked_cos: Entry::pos(2, 2),
                locked_sin: Entry::pos(2, 1),
            },
            first_y: Entry::pos(0, 2),
            first_x: Entry::neg(0, 1),
            middle: Entry::pos(0, 0),
            third_y: Entry::pos(2, 0),
            third_x: Entry::pos(1, 0),
        },
    }
}

/// `m` must be 3x3.
fn solve(params: &KernelParams, m: &Matrix) -> [f64; 3] {
    match params.kind {
        MiddleAngle::Sine {
            locked_cos,
            locked_sin,
        } => tan_sin_tan(params, locked_cos, locked_sin, m),
        MiddleAngle::Cosine {
            locked_cos,
            locked_sin,
        } => tan_cos_tan(params, locked_cos, locked_sin, m),
    }
}

fn tan_sin_tan(
    p: &KernelParams,
    locked_cos: [Entry; 2],
    locked_sin: [Entry; 2],
    m: &Matrix,
) -> [f64; 3] {
    let sin1 = p.middle.read(m);

    if 1.0 - sin1.abs() <= epsilon() {
        log::trace!("gimbal lock, sin(b)={sin1}");
        let sign = sin1.signum();
        let sin0 = (locked_sin[0].read(m) + sign * locked_sin[1].read(m)) / 2.0;
        let cos0 = (locked_cos[0].read(m) + sign * locked_cos[1].read(m)) / 2.0;
        [
            sin0.atan2(cos0),
            sign * std::f64::consts::FRAC_PI_2,
            0.0,
        ]
    } else {
        [
            p.first_y.read(m).atan2(p.first_x.read(m)),
            sin1.asin(),
            p.third_y.read(m).atan2(p.third_x.read(m)),
        ]
    }
}

fn tan_cos_tan(p: &KernelParams, locked_cos: Entry, locked_sin: Entry, m: &Matrix) -> [f64; 3] {
    let cos1 = p.middle.read(m);

    if 1.0 - cos1.abs() <= epsilon() {
        log::trace!("gimbal lock, cos(b)={cos1}");
        let middle = if cos1 > 0.0 {
            0.0
        } else {
            std::f64::consts::PI
        };
        [locked_sin.read(m).atan2(locked_cos.read(m)), middle, 0.0]
    } else {
        [
            p.first_y.read(m).atan2(p.first_x.read(m)),
            cos1.acos(),
            p.third_y.read(m).atan2(p.third_x.read(m)),
        ]
    }
}

/// Decompose a rotation matrix into Euler angles for `sequence`.
///
/// At gimbal lock the third angle is reported as zero and the first absorbs the coupled rotation.
pub fn matrix_to_euler(r: &Matrix, sequence: EulerSequence) -> Result<EulerAngles> {
    r.require_3x3("rotation matrix")?;
    let [a, b, c] = solve(&kernel_params(sequence), r);
    Ok(EulerAngles::new(sequence, a, b, c))
}

pub fn quaternion_to_euler(q: &Quaternion, sequence: EulerSequence) -> EulerAngles {
    let r = quaternion_to_matrix(q);
    let [a, b, c] = solve(&kernel_params(sequence), &r);
    EulerAngles::new(sequence, a, b, c)
}

/// Quaternion for `R_C(c) * R_B(b) * R_A(a)`, computed from half-angle terms
/// without building the matrix.
pub fn euler_to_quaternion(sequence: EulerSequence, a: f64, b: f64, c: f64) -> Quaternion {
    let (sa, ca) = (a / 2.0).sin_cos();
    let (sb, cb) = (b / 2.0).sin_cos();
    let (sc, cc) = (c / 2.0).sin_cos();

    match sequence {
        EulerSequence::Zyx => Quaternion::new(
            ca * cb * cc - sa * sb * sc,
            sa * sb * cc + ca * cb * sc,
            ca * sb * cc - sa * cb * sc,
            sa * cb * cc + ca * sb * sc,
        ),
        EulerSequence::Zyz => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            sa * sb * cc - ca * sb * sc,
            ca * sb * cc + sa * sb * sc,
            sa * cb * cc + ca * cb * sc,
        ),
        EulerSequence::Zxy => Quaternion::new(
            ca * cb * cc + sa * sb * sc,
            ca * sb * cc + sa * cb * sc,
            -sa * sb * cc + ca * cb * sc,
            sa * cb * cc - ca * sb * sc,
        ),
        EulerSequence::Zxz => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            ca * sb * cc + sa * sb * sc,
            -sa * sb * cc + ca * sb * sc,
            sa * cb * cc + ca * cb * sc,
        ),
        EulerSequence::Yxz => Quaternion::new(
            ca * cb * cc - sa * sb * sc,
            ca * sb * cc - sa * cb * sc,
            sa * cb * cc + ca * sb * sc,
            sa * sb * cc + ca * cb * sc,
        ),
        EulerSequence::Yxy => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            ca * sb * cc + sa * sb * sc,
            sa * cb * cc + ca * cb * sc,
            sa * sb * cc - ca * sb * sc,
        ),
        EulerSequence::Yzx => Quaternion::new(
            ca * cb * cc + sa * sb * sc,
            -sa * sb * cc + ca * cb * sc,
            sa * cb * cc - ca * sb * sc,
            ca * sb * cc + sa * cb * sc,
        ),
        EulerSequence::Yzy => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            -sa * sb * cc + ca * sb * sc,
            sa * cb * cc + ca * cb * sc,
            ca * sb * cc + sa * sb * sc,
        ),
        EulerSequence::Xyz => Quaternion::new(
            ca * cb * cc + sa * sb * sc,
            sa * cb * cc - ca * sb * sc,
            ca * sb * cc + sa * cb * sc,
            -sa * sb * cc + ca * cb * sc,
        ),
        EulerSequence::Xyx => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            sa * cb * cc + ca * cb * sc,
            ca * sb * cc + sa * sb * sc,
            -sa * sb * cc + ca * sb * sc,
        ),
        EulerSequence::Xzy => Quaternion::new(
            ca * cb * cc - sa * sb * sc,
            sa * cb * cc + ca * sb * sc,
            sa * sb * cc + ca * cb * sc,
            ca * sb * cc - sa * cb * sc,
        ),
        EulerSequence::Xzx => Quaternion::new(
            ca * cb * cc - sa * cb * sc,
            sa * cb * cc + ca * cb * sc,
            sa * sb * cc - ca * sb * sc,
            ca * sb * cc + sa * sb * sc,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::{
        AxisAngle,
        quaternion::matrix_to_quaternion,
        tests::{assert_is_rotation, assert_same_rotation, new_rng, random_angle},
    };
    use approx::assert_abs_diff_eq;
    use faer::rand::{Rng, rngs::SmallRng};

    /// Random angles kept clear of each sequence's singular middle values.
    fn random_regular_angles(rng: &mut SmallRng, seq: EulerSequence) -> (f64, f64, f64) {
        let b = if seq.is_proper() {
            0.05 + rng.random::<f64>() * (PI - 0.1)
        } else {
            (rng.random::<f64>() * 2.0 - 1.0) * (FRAC_PI_2 - 0.05)
        };
        (random_angle(rng), b, random_angle(rng))
    }

    fn singular_middles(seq: EulerSequence) -> [f64; 2] {
        if seq.is_proper() {
            [0.0, PI]
        } else {
            [FRAC_PI_2, -FRAC_PI_2]
        }
    }

    #[test]
    fn quarter_turn_about_z_as_zyx() {
        let r = AxisAngle::new([0.0, 0.0, 1.0], FRAC_PI_2).to_matrix();
        let e = matrix_to_euler(&r, EulerSequence::Zyx).unwrap();
        assert_abs_diff_eq!(
            e.angles().as_slice(),
            [FRAC_PI_2, 0.0, 0.0].as_slice(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn sequence_names_round_trip() {
        for seq in EulerSequence::ALL {
            assert_eq!(seq.to_string().parse::<EulerSequence>().unwrap(), seq);
            assert_eq!(EulerSequence::try_from(seq.name()).unwrap(), seq);
        }
        assert_eq!("xyz".parse::<EulerSequence>().unwrap(), EulerSequence::Xyz);
        assert!(matches!(
            "XXY".parse::<EulerSequence>(),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            EulerSequence::try_from(""),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn proper_sequences() {
        let proper: Vec<_> = EulerSequence::ALL
            .into_iter()
            .filter(|s| s.is_proper())
            .collect();
        assert_eq!(proper.len(), 6);
        for seq in EulerSequence::ALL {
            assert_eq!(
                seq.is_proper(),
                matches!(kernel_params(seq).kind, MiddleAngle::Cosine { .. })
            );
        }
    }

    #[test]
    fn proper_lock_reads_middle_axis_row() {
        for seq in EulerSequence::ALL.into_iter().filter(|s| s.is_proper()) {
            let MiddleAngle::Cosine {
                locked_cos,
                locked_sin,
            } = kernel_params(seq).kind
            else {
                panic!("{seq} should lock on cos(b)");
            };
            let middle_row = seq.axes()[1].index();
            assert_eq!(locked_cos.row, middle_row, "{seq}");
            assert_eq!(locked_sin.row, middle_row, "{seq}");

            let a = 0.4;
            for b in [0.0, PI] {
                let r = euler_to_matrix(seq, a, b, 0.0);
                assert_abs_diff_eq!(locked_cos.read(&r), a.cos(), epsilon = 1e-15);
                assert_abs_diff_eq!(locked_sin.read(&r), a.sin(), epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn angles_round_trip_away_from_gimbal_lock() {
        let mut rng = new_rng();
        for seq in EulerSequence::ALL {
            for _ in 0..200 {
                let (a, b, c) = random_regular_angles(&mut rng, seq);
                let r = euler_to_matrix(seq, a, b, c);
                let e = matrix_to_euler(&r, seq).unwrap();
                assert_abs_diff_eq!(
                    e.angles().as_slice(),
                    [a, b, c].as_slice(),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn direct_quaternion_matches_matrix_path() {
        let mut rng = new_rng();
        for seq in EulerSequence::ALL {
            for _ in 0..1000 {
                let (a, b, c) = random_regular_angles(&mut rng, seq);
                let direct = euler_to_quaternion(seq, a, b, c);
                let via_matrix = matrix_to_quaternion(&euler_to_matrix(seq, a, b, c)).unwrap();
                assert_abs_diff_eq!(direct.norm(), 1.0, epsilon = 1e-12);
                assert_same_rotation(&direct, &via_matrix, 1e-10);
            }
        }
    }

    #[test]
    fn gimbal_lock_is_stable() {
        let mut rng = new_rng();
        for seq in EulerSequence::ALL {
            for b in singular_middles(seq) {
                for _ in 0..20 {
                    let (a, c) = (random_angle(&mut rng), random_angle(&mut rng));
                    let r = euler_to_matrix(seq, a, b, c);
                    let e = matrix_to_euler(&r, seq).unwrap();
                    assert!(e.angles().iter().all(|v| v.is_finite()), "{seq}: {e:?}");
                    assert_eq!(e.rot_c, 0.0);
                    assert_abs_diff_eq!(e.rot_b, b, epsilon = 1e-12);
                    let rebuilt = e.to_matrix();
                    assert_abs_diff_eq!(rebuilt.data(), r.data(), epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn quaternion_round_trip() {
        let mut rng = new_rng();
        for seq in EulerSequence::ALL {
            for _ in 0..50 {
                let (a, b, c) = random_regular_angles(&mut rng, seq);
                let q = euler_to_quaternion(seq, a, b, c);
                let e = quaternion_to_euler(&q, seq);
                assert_abs_diff_eq!(
                    e.angles().as_slice(),
                    [a, b, c].as_slice(),
                    epsilon = 1e-9
                );
                assert_same_rotation(&EulerAngles::from_quaternion(&q, seq).to_quaternion(), &q, 1e-10);
            }
        }
    }

    #[test]
    fn output_ranges() {
        let mut rng = new_rng();
        for seq in EulerSequence::ALL {
            for _ in 0..100 {
                let r = euler_to_matrix(
                    seq,
                    random_angle(&mut rng),
                    random_angle(&mut rng),
                    random_angle(&mut rng),
                );
                assert_is_rotation(&r);
                let e = EulerAngles::from_matrix(&r, seq).unwrap();
                assert!(e.rot_a.abs() <= PI && e.rot_c.abs() <= PI);
                if seq.is_proper() {
                    assert!((0.0..=PI).contains(&e.rot_b));
                } else {
                    assert!(e.rot_b.abs() <= FRAC_PI_2);
                }
                assert_abs_diff_eq!(e.to_matrix().data(), r.data(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(matches!(
            matrix_to_euler(&Matrix::identity(2), EulerSequence::Xyz),
            Err(RotationError::InvalidArgument(_))
        ));
        let mut out = Matrix::zeros(4, 3);
        assert!(
            EulerAngles::new(EulerSequence::Zyz, 0.1, 0.2, 0.3)
                .to_matrix_into(&mut out)
                .is_err()
        );
    }
}

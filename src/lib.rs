//! Conversions between 3D rotation representations:
//! rotation matrices, axis-angle, unit quaternions and Euler angles in all twelve sequences,
//! plus projection onto the nearest rotation and rotation averaging.
use smallvec::SmallVec;


mod error;
pub use error::{Result, RotationError};

pub mod config;
pub use config::{DEFAULT_EPSILON, epsilon, set_epsilon};

mod matrix;
pub use matrix::Matrix;

pub mod decomposition;

mod axis;
pub use axis::{
    Axis, euler_to_matrix, euler_to_matrix_into, rot_x, rot_x_into, rot_y, rot_y_into, rot_z,
    rot_z_into, rotation_about_axis, rotation_about_axis_into,
};

mod axis_angle;
pub use axis_angle::{
    AxisAngle, axis_angle_to_matrix, axis_angle_to_matrix_into, matrix_to_axis_angle,
};

mod quaternion;
pub use quaternion::{
    Quaternion, axis_angle_to_quaternion, matrix_to_quaternion, quaternion_to_axis_angle,
    quaternion_to_matrix, quaternion_to_matrix_into,
};

mod euler;
pub use euler::{
    EulerAngles, EulerSequence, euler_to_quaternion, matrix_to_euler, quaternion_to_euler,
};

mod approximate;
pub use approximate::{approximate_rotation, approximate_rotation_into};

mod average;
pub use average::{average_quaternions, average_rotation_matrices, average_rotation_matrices_into};

mod rotation;
pub use rotation::Rotation;

mod traits;
pub use traits::Transformation;

/// Points are always 3D.
const COORD_SIZE: usize = 3;

/// Stack-allocated scratch for a single point.
type ShortVec<T> = SmallVec<[T; COORD_SIZE]>;

/// Convenience function for turning a slice of sliceables into a vec of slices.
/// Allocates a new vec.
#[cfg(test)]
pub(crate) fn as_refs<T, Inner: AsRef<[T]>>(input: &[Inner]) -> Vec<&[T]> {
    input.iter().map(|v| v.as_ref()).collect()
}

/// Convenience function for turning a mut slice of sliceables into a vec of mut slices.
/// Allocates a new vec.
#[cfg(test)]
pub(crate) fn as_muts<T, Inner: AsMut<[T]>>(input: &mut [Inner]) -> Vec<&mut [T]> {
    input.iter_mut().map(|v| v.as_mut()).collect()
}

#[cfg(test)]
pub(crate) fn vec_of_vec<T: Copy>(outer_len: usize, inner_len: usize, val: T) -> Vec<Vec<T>> {
    vec![vec![val; inner_len]; outer_len]
}

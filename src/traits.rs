use std::sync::Arc;

use smallvec::smallvec;

use crate::ShortVec;

/// Application of a rotation to points.
///
/// Implementations may not perform any bounds checks on the input,
/// as rotating point clouds generally happens in hot loops.
/// Therefore, they may panic if coordinates or output buffers of incorrect length are given.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Transform a single point from the input space to the output space.
    /// Writes to a pre-allocated output buffer.
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]);

    /// Transform multiple points from the input space into the output space.
    /// Writes to pre-allocated output buffers.
    ///
    /// The trait default implementation simply calls [Transformation::transform_into] in turn;
    /// specific transforms may override it.
    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            self.transform_into(pt, buf);
        }
    }

    /// Transform multiple points given in columnar format.
    /// Writes to pre-allocated output buffers.
    ///
    /// The trait implementation gathers one point at a time and wraps [Transformation::transform_into];
    /// implementors with a cheaper columnar form should override it.
    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let Some(first) = columns.first() else {
            return;
        };
        let mut in_pt: ShortVec<f64> = smallvec![f64::NAN; self.input_ndim()];
        let mut out_pt: ShortVec<f64> = smallvec![f64::NAN; self.output_ndim()];
        for pt_idx in 0..first.len() {
            for (idx, col) in columns.iter().enumerate() {
                in_pt[idx] = col[pt_idx];
            }
            self.transform_into(&in_pt, &mut out_pt);
            for (out_col, p) in bufs.iter_mut().zip(out_pt.iter()) {
                out_col[pt_idx] = *p;
            }
        }
    }

    /// Return the inverse rotation.
    ///
    /// Every rotation is invertible, so the implementations in this crate always return `Some`.
    fn invert(&self) -> Option<Arc<dyn Transformation>>;

    /// Whether this is exactly the identity rotation.
    ///
    /// `true` means it definitely is an identity;
    /// `false` is not definitive for values that are the identity up to rounding.
    fn is_identity(&self) -> bool;

    fn input_ndim(&self) -> usize;

    fn output_ndim(&self) -> usize;
}

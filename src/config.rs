//! Library-wide numerical tolerance.
//!
//! A single epsilon drives every degeneracy test in the crate:
//! the axis-angle branch selection and sign fix-up, Euler gimbal-lock detection,
//! and validation of [Rotation](crate::Rotation) matrices.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, RotationError};

pub const DEFAULT_EPSILON: f64 = 1e-10;

static EPSILON_BITS: AtomicU64 = AtomicU64::new(DEFAULT_EPSILON.to_bits());

/// The tolerance currently in effect.
pub fn epsilon() -> f64 {
    f64::from_bits(EPSILON_BITS.load(Ordering::Relaxed))
}

/// Replace the tolerance for the whole process.
///
/// Intended to be called once during start-up;
/// conversions running concurrently will see either the old or the new value.
pub fn set_epsilon(eps: f64) -> Result<()> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(RotationError::invalid(format!(
            "epsilon must be finite and positive, got {eps}"
        )));
    }
    let old = f64::from_bits(EPSILON_BITS.swap(eps.to_bits(), Ordering::Relaxed));
    log::debug!("epsilon changed from {old} to {eps}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_epsilon() {
        for eps in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                set_epsilon(eps),
                Err(RotationError::InvalidArgument(_))
            ));
        }
        assert_eq!(epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn resetting_default_is_ok() {
        set_epsilon(DEFAULT_EPSILON).unwrap();
        assert_eq!(epsilon(), DEFAULT_EPSILON);
    }
}

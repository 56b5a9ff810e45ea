//! The missing value convention shared with data providers.
//!
//! Providers report a missing field with the sentinel [`MISSING`]. Inside this crate missing
//! values are `Optioned::none()`, the conversion happens once in the `provider` module.
use optional::Optioned;

/// Sentinel used by data providers for a value that is not available.
pub const MISSING: f64 = -99_999.0;

// Anything at or below this is treated as the sentinel. No physical quantity handled by this
// crate (K, Pa, g/kg, m/s, J/kg) gets near it.
const MISSING_THRESHOLD: f64 = -99_998.0;

/// Is this value the missing value sentinel (or not a finite number at all)?
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::utility::{is_missing, MISSING};
///
/// assert!(is_missing(MISSING));
/// assert!(is_missing(std::f64::NAN));
/// assert!(!is_missing(-40.0));
/// assert!(!is_missing(100_000.0));
/// ```
#[inline]
pub fn is_missing(val: f64) -> bool {
    !val.is_finite() || val <= MISSING_THRESHOLD
}

/// Convert a provider value into an `Optioned`, mapping the sentinel to `none`.
#[inline]
pub fn optioned_from_sentinel<T, F>(val: f64, wrap: F) -> Optioned<T>
where
    T: optional::Noned + Copy,
    F: FnOnce(f64) -> T,
{
    if is_missing(val) {
        optional::none()
    } else {
        optional::some(wrap(val))
    }
}

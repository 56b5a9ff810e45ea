//! Enums used as keys for looking up values in an [`Analysis`](crate::Analysis).

use strum_macros::{Display, EnumIter};

/// Sounding indexes, either calculated from the sounding or supplied by the data provider.
///
/// The `Display` implementation gives the short label used in the diagram annotations.
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::ProfileIndex;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(ProfileIndex::TotalTotals.to_string(), "TT");
/// assert_eq!(ProfileIndex::iter().count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ProfileIndex {
    /// Total-Totals
    #[strum(to_string = "TT")]
    TotalTotals,
    /// K-index (C)
    #[strum(to_string = "K")]
    K,
    /// Severe Weather Threat Index
    #[strum(to_string = "SWEAT")]
    SWeT,
    /// Convective Available Potential Energy from the provider (J/kg)
    #[strum(to_string = "CAPE")]
    CAPE,
    /// Convective Inhibition from the provider (J/kg)
    #[strum(to_string = "CIN")]
    CIN,
    /// Surface lifted index from the provider (K)
    #[strum(to_string = "LFTX")]
    LFTX,
    /// Lifting Condensation Level pressure (Pa)
    #[strum(to_string = "LCL Pres")]
    LCLPressure,
    /// Lifting Condensation Level temperature (K)
    #[strum(to_string = "LCL Temp")]
    LCLTemperature,
    /// Mean sea level pressure from the provider (Pa)
    #[strum(to_string = "MSLP")]
    MSLP,
}

impl ProfileIndex {
    /// `true` for the values that are carried through from the data provider rather than
    /// computed from the sounding.
    #[inline]
    pub fn from_provider(self) -> bool {
        use self::ProfileIndex::*;

        matches!(self, CAPE | CIN | LFTX | MSLP)
    }
}

//! Indexes that are specific to a sounding, computed from its mandatory levels and surface values.
//!
//! These are thin wrappers around the formulas in [`thermo`](crate::thermo) that pull the required
//! values out of a [`Sounding`]. Any missing input is reported as `SkewTError::MissingValue`.

use crate::{
    error::{Result, SkewTError},
    interpolation::linear_interpolate_sounding,
    sounding::{Level, Sounding},
    thermo::{self, Lcl},
};
use metfor::{Kelvin, MetersPSec, Quantity, WindUV};
use optional::Optioned;

const P850: f64 = 85_000.0;
const P700: f64 = 70_000.0;
const P500: f64 = 50_000.0;

#[inline]
fn level(snd: &Sounding, pres: f64) -> Result<Level> {
    linear_interpolate_sounding(snd, pres).map_err(|_| SkewTError::MissingValue)
}

#[inline]
fn value(val: Optioned<Kelvin>) -> Result<f64> {
    val.into_option()
        .map(Quantity::unpack)
        .ok_or(SkewTError::MissingValue)
}

#[inline]
fn wind(lvl: &Level) -> Result<WindUV<MetersPSec>> {
    lvl.wind.ok_or(SkewTError::MissingValue)
}

/// Total totals index.
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::{doctest::make_test_sounding, total_totals};
///
/// let snd = make_test_sounding();
/// assert!((total_totals(&snd).unwrap() - 64.0).abs() < 1.0e-9);
/// ```
#[inline]
pub fn total_totals(snd: &Sounding) -> Result<f64> {
    let h5 = level(snd, P500)?;
    let h85 = level(snd, P850)?;

    Ok(thermo::total_totals(
        value(h5.temperature)?,
        value(h85.temperature)?,
        value(h5.dew_point)?,
        value(h85.dew_point)?,
    ))
}

/// The K-index, in &deg;C.
#[inline]
pub fn k_index(snd: &Sounding) -> Result<f64> {
    let h5 = level(snd, P500)?;
    let h7 = level(snd, P700)?;
    let h85 = level(snd, P850)?;

    Ok(thermo::k_index(
        value(h5.temperature)?,
        value(h7.temperature)?,
        value(h85.temperature)?,
        value(h7.dew_point)?,
        value(h85.dew_point)?,
    ))
}

/// Severe Weather Threat index.
///
/// Needs the 850 and 500 hPa winds in addition to the total totals inputs.
pub fn sweat(snd: &Sounding) -> Result<f64> {
    let tt = total_totals(snd)?;

    let h5 = level(snd, P500)?;
    let h85 = level(snd, P850)?;

    let WindUV { u: u5, v: v5 } = wind(&h5)?;
    let WindUV { u: u85, v: v85 } = wind(&h85)?;

    Ok(thermo::sweat(
        tt,
        value(h85.dew_point)?,
        u5.unpack(),
        v5.unpack(),
        u85.unpack(),
        v85.unpack(),
    ))
}

/// Lifting condensation level of a parcel lifted from the surface (2m) values.
#[inline]
pub fn lcl(snd: &Sounding) -> Result<Lcl> {
    let pres = snd
        .station_pressure()
        .into_option()
        .ok_or(SkewTError::MissingValue)?;
    let temp = value(snd.sfc_temperature())?;
    let dp = value(snd.sfc_dew_point())?;

    Ok(thermo::lcl(temp, dp, pres))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sounding::doctest::make_test_sounding;
    use crate::utility::test_tools::approx_equal;
    use optional::none;

    #[test]
    fn test_total_totals() {
        let snd = make_test_sounding();

        // (285.15 - 258.15) + (280.15 - 243.15)
        assert!(approx_equal(total_totals(&snd).unwrap(), 64.0, 1.0e-9));
    }

    #[test]
    fn test_k_index() {
        let snd = make_test_sounding();

        // (12 - -15) + (7 - (2 - -8))
        assert!(approx_equal(k_index(&snd).unwrap(), 24.0, 1.0e-9));
    }

    #[test]
    fn test_sweat() {
        let snd = make_test_sounding();
        let sweat_val = sweat(&snd).unwrap();

        let tt = total_totals(&snd).unwrap();
        let expected = thermo::sweat(tt, 280.15, 20.0, 20.0, 10.0, 0.0);
        assert!(approx_equal(sweat_val, expected, 1.0e-9));
        assert!(sweat_val > 0.0);
    }

    #[test]
    fn test_sweat_without_winds() {
        let levels: Vec<_> = make_test_sounding()
            .levels()
            .iter()
            .map(|lvl| lvl.with_wind(None::<WindUV<MetersPSec>>))
            .collect();
        let snd = make_test_sounding().with_levels(levels);

        assert_eq!(sweat(&snd).unwrap_err(), SkewTError::MissingValue);
        assert!(total_totals(&snd).is_ok());
    }

    #[test]
    fn test_missing_level_data() {
        let levels: Vec<_> = make_test_sounding()
            .levels()
            .iter()
            .map(|lvl| {
                let mut lvl = *lvl;
                if lvl.pressure == P500 {
                    lvl.dew_point = none();
                }
                lvl
            })
            .collect();
        let snd = make_test_sounding().with_levels(levels);

        assert_eq!(total_totals(&snd).unwrap_err(), SkewTError::MissingValue);
        assert!(k_index(&snd).is_ok());
    }

    #[test]
    fn test_lcl() {
        let snd = make_test_sounding();
        let lcl_val = lcl(&snd).unwrap();

        assert!(lcl_val.converged);
        assert!(lcl_val.pressure < 98_000.0);
        assert!(lcl_val.pressure > 50_000.0);
        assert!(lcl_val.temperature < 295.15);

        let snd = snd.with_sfc_dew_point(none::<Kelvin>());
        assert_eq!(lcl(&snd).unwrap_err(), SkewTError::MissingValue);
    }
}

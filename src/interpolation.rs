use crate::{
    error::{SkewTError, Result},
    sounding::{Level, Sounding},
};
use itertools::Itertools;
use metfor::{Kelvin, MetersPSec, Quantity, WindUV};
use optional::{none, Optioned};

/// Interpolate values from the vertical sounding using pressure as the primary coordinate.
///
/// Returns a `Level` with interpolated values. If the target pressure matches one of the levels
/// exactly, that level is returned as is.
pub fn linear_interpolate_sounding(snd: &Sounding, tgt_p: f64) -> Result<Level> {
    if let Some(lvl) = snd.level_at(tgt_p) {
        return Ok(*lvl);
    }

    snd.levels()
        .iter()
        // Look at the levels two at a time...
        .tuple_windows::<(_, _)>()
        // Always assume pressure is sorted in descending order, find the pair that brackets
        // the target pressure.
        .find(|(lvl0, lvl1)| lvl0.pressure > tgt_p && lvl1.pressure < tgt_p)
        // Perform the interpolation!
        .map(|(lvl0, lvl1)| linear_interp_levels(lvl0, lvl1, tgt_p))
        // Map to error
        .ok_or(SkewTError::MissingValue)
}

#[inline]
pub(crate) fn linear_interp(x_val: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    debug_assert!((x2 - x1).abs() > 0.0);

    let run = x2 - x1;
    let rise = y2 - y1;
    let dx = x_val - x1;

    y1 + dx * (rise / run)
}

#[inline]
fn linear_interp_levels(lvl0: &Level, lvl1: &Level, tgt_p: f64) -> Level {
    let (p0, p1) = (lvl0.pressure, lvl1.pressure);

    let interp_t = |below: Optioned<Kelvin>, above: Optioned<Kelvin>| -> Optioned<Kelvin> {
        match (below.into_option(), above.into_option()) {
            (Some(below), Some(above)) => Optioned::from(Kelvin(linear_interp(
                tgt_p,
                p0,
                p1,
                below.unpack(),
                above.unpack(),
            ))),
            _ => none(),
        }
    };

    // Special interpolation for vectors
    let wind = match (lvl0.wind, lvl1.wind) {
        (Some(below), Some(above)) => Some(WindUV {
            u: MetersPSec(linear_interp(tgt_p, p0, p1, below.u.unpack(), above.u.unpack())),
            v: MetersPSec(linear_interp(tgt_p, p0, p1, below.v.unpack(), above.v.unpack())),
        }),
        _ => None,
    };

    Level {
        pressure: tgt_p,
        temperature: interp_t(lvl0.temperature, lvl1.temperature),
        dew_point: interp_t(lvl0.dew_point, lvl1.dew_point),
        wind,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sounding::doctest::make_test_sounding;
    use crate::utility::test_tools::approx_equal;

    #[test]
    fn test_exact_level() {
        let snd = make_test_sounding();
        let lvl = linear_interpolate_sounding(&snd, 85_000.0).unwrap();

        assert_eq!(lvl.temperature.unpack(), Kelvin(285.15));
        assert!(lvl.wind.is_some());
    }

    #[test]
    fn test_between_levels() {
        let snd = make_test_sounding();
        let lvl = linear_interpolate_sounding(&snd, 60_000.0).unwrap();

        // Halfway between 700 and 500 hPa
        assert!(approx_equal(lvl.temperature.unpack().unpack(), 266.65, 1.0e-9));
        assert!(approx_equal(lvl.dew_point.unpack().unpack(), 254.15, 1.0e-9));

        let wind = lvl.wind.unwrap();
        assert!(approx_equal(wind.u.unpack(), 17.5, 1.0e-9));
        assert!(approx_equal(wind.v.unpack(), 12.5, 1.0e-9));
    }

    #[test]
    fn test_outside_profile() {
        let snd = make_test_sounding();

        assert_eq!(
            linear_interpolate_sounding(&snd, 10_000.0).unwrap_err(),
            SkewTError::MissingValue
        );
        assert_eq!(
            linear_interpolate_sounding(&snd, 102_000.0).unwrap_err(),
            SkewTError::MissingValue
        );
    }
}

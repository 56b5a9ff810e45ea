//! Atmospheric thermodynamics formulas used for analysis and for drawing the Skew-T background.
//!
//! All functions work on plain `f64` values in base SI units: temperatures in Kelvin, pressures in
//! Pascals, angles in radians. Mixing ratios are in g/kg. None of these functions fail, domain
//! problems are handled with explicit branches that return a sentinel-like value instead.
//!
//! The empirical mixing ratio and saturated adiabat formulas follow the Stipanuk (1973)
//! approximations that are widely used for plotting Skew-T diagrams.

/// Reference pressure for potential temperature (Pa).
pub const P0: f64 = 100_000.0;

/// Offset between Celsius and Kelvin.
pub const C_TO_K: f64 = 273.15;

/// Temperatures at or above this value (K) are treated as invalid by
/// [`saturation_mixing_ratio`].
pub const INVALID_TEMPERATURE: f64 = 999.0;

/// R/cp for dry air, as used by the plotting formulas.
const KAPPA: f64 = 2.0 / 7.0;

/// Pressure step (Pa) for the LCL search.
const LCL_STEP: f64 = 100.0;
/// The LCL search stops when the mixing ratio difference (g/kg) is this small.
const LCL_THRESHOLD: f64 = 0.1;
/// The LCL search never goes above this pressure level (Pa).
const LCL_FLOOR: f64 = 10_000.0;

/// Saturation vapor pressure over liquid water (Pa), Bolton style formula.
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::thermo::saturation_vapor_pressure;
///
/// assert!((saturation_vapor_pressure(273.15) - 610.78).abs() < 1.0e-9);
/// ```
#[inline]
pub fn saturation_vapor_pressure(temp: f64) -> f64 {
    let t_c = temp - C_TO_K;
    6.1078 * ((17.269_388_2 * t_c) / (t_c + 237.3)).exp() * 100.0
}

/// Saturation mixing ratio (g/kg) at a temperature (K) and pressure (Pa).
///
/// Returns 0 for temperatures at or above [`INVALID_TEMPERATURE`].
#[inline]
pub fn saturation_mixing_ratio(temp: f64, pres: f64) -> f64 {
    if temp >= INVALID_TEMPERATURE {
        return 0.0;
    }

    let pres_hpa = pres / 100.0;
    let e_hpa = saturation_vapor_pressure(temp) / 100.0;

    621.97 * e_hpa / (pres_hpa - e_hpa)
}

/// Potential temperature (K) of dry air.
#[inline]
pub fn potential_temperature(temp: f64, pres: f64) -> f64 {
    temp * (pres / P0).powf(-KAPPA)
}

/// Temperature (K) at a pressure level along the dry adiabat with potential temperature `theta`.
#[inline]
pub fn temperature_from_potential_temperature(theta: f64, pres: f64) -> f64 {
    theta * (pres / P0).powf(KAPPA)
}

/// Temperature (K) at which the saturation mixing ratio equals `mw` (g/kg) at `pres` (Pa).
///
/// This is the inverse of [`saturation_mixing_ratio`], so it doubles as a dew point from mixing
/// ratio calculation and as the function for drawing mixing ratio lines.
#[inline]
pub fn temperature_at_mixing_ratio(mw: f64, pres: f64) -> f64 {
    let pres_hpa = pres / 100.0;
    let x = (mw * pres_hpa / (622.0 + mw)).log10();

    10.0f64.powf(0.049_864_645_5 * x + 2.408_296_5) - 7.07475
        + 38.9114 * (10.0f64.powf(0.0915 * x) - 1.2035).powi(2)
}

/// Dew point (K) from temperature (K), pressure (Pa) and relative humidity (%).
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::thermo::dew_point;
///
/// let dp = dew_point(293.15, 101_325.0, 50.0);
/// assert!(dp > 273.15 && dp < 293.15);
/// ```
#[inline]
pub fn dew_point(temp: f64, pres: f64, rh: f64) -> f64 {
    temperature_at_mixing_ratio(saturation_mixing_ratio(temp, pres) * rh / 100.0, pres)
}

/// Lifting condensation level as found by [`lcl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lcl {
    /// Pressure of the LCL in Pa.
    pub pressure: f64,
    /// Temperature at the LCL in K.
    pub temperature: f64,
    /// `false` if the search hit the top of the search range before converging. The values are
    /// then a best estimate at the top of the range.
    pub converged: bool,
}

/// Find the lifting condensation level for a surface parcel.
///
/// This is done the way it would be done by hand on a Skew-T: starting at the surface pressure,
/// rounded up to the nearest hPa, follow the dry adiabat up in 1 hPa steps until the saturation
/// mixing ratio of the parcel is within 0.1 g/kg of the surface mixing ratio. The search stops at
/// 100 hPa.
///
/// # Arguments
/// temp: 2m temperature in K
///
/// dew_point: 2m dew point in K
///
/// pres: surface pressure in Pa
pub fn lcl(temp: f64, dew_point: f64, pres: f64) -> Lcl {
    let theta = potential_temperature(temp, pres);
    let mw_sfc = saturation_mixing_ratio(dew_point, pres);

    let mut lcl_p = (pres / LCL_STEP).ceil() * LCL_STEP;
    let mut lcl_t = temperature_from_potential_temperature(theta, lcl_p);
    let mut delta = LCL_STEP * 10.0;

    while delta.abs() > LCL_THRESHOLD && lcl_p > LCL_FLOOR {
        lcl_p -= LCL_STEP;
        lcl_t = temperature_from_potential_temperature(theta, lcl_p);
        delta = saturation_mixing_ratio(lcl_t, lcl_p) - mw_sfc;
    }

    let converged = delta.abs() <= LCL_THRESHOLD;
    if !converged {
        log::warn!(
            "LCL search did not converge for T={} Td={} p={}, using {} Pa",
            temp,
            dew_point,
            pres,
            lcl_p
        );
    }

    Lcl {
        pressure: lcl_p,
        temperature: lcl_t,
        converged,
    }
}

/// Temperature (K) on the saturated adiabat labeled by the saturated potential temperature
/// `os` (K) at pressure `pres` (Pa).
///
/// A fixed 13 step search starting at 253.15 K with the step halved every iteration. Stops early
/// when the residual is below 0.01 K.
pub fn temperature_on_saturated_adiabat(os: f64, pres: f64) -> f64 {
    const ITERATIONS: usize = 13;

    let mut tq = 253.15;
    let mut d = 120.0f64;

    let pres_factor = (P0 / pres).powf(KAPPA);

    for _ in 0..ITERATIONS {
        d /= 2.0;
        let x = os * (-2.651_898_6 * saturation_mixing_ratio(tq, pres) / tq).exp() - tq * pres_factor;

        if x.abs() < 0.01 {
            return tq;
        }

        d = d.copysign(x);
        tq += d;
    }

    log::trace!("saturated adiabat search exhausted at os={} p={}", os, pres);
    tq
}

/// Saturated potential temperature (K) of moist air, the label of the saturated adiabat passing
/// through `temp` (K) at `pres` (Pa).
#[inline]
pub fn saturated_potential_temperature(temp: f64, pres: f64) -> f64 {
    temp * (P0 / pres).powf(KAPPA) / (-2.651_898_6 * (saturation_mixing_ratio(temp, pres) / temp)).exp()
}

/// Total totals index, all values in K.
#[inline]
pub fn total_totals(t500: f64, t850: f64, dp500: f64, dp850: f64) -> f64 {
    let vertical_totals = t850 - t500;
    let cross_totals = dp850 - dp500;

    vertical_totals + cross_totals
}

/// K-index, all values in K. The result is in &deg;C.
#[inline]
pub fn k_index(t500: f64, t700: f64, t850: f64, dp700: f64, dp850: f64) -> f64 {
    let t500 = t500 - C_TO_K;
    let t700 = t700 - C_TO_K;
    let t850 = t850 - C_TO_K;
    let dp700 = dp700 - C_TO_K;
    let dp850 = dp850 - C_TO_K;

    (t850 - t500) + (dp850 - (t700 - dp700))
}

/// Severe Weather Threat index.
///
/// Each of the five terms is set to zero if it is negative. Wind components are in m/s, the
/// direction term uses the radian directions from [`wind_from_vector`].
pub fn sweat(
    total_totals: f64,
    dp850: f64,
    u500: f64,
    v500: f64,
    u850: f64,
    v850: f64,
) -> f64 {
    let (spd500, dir500) = wind_from_vector(u500, v500);
    let (spd850, dir850) = wind_from_vector(u850, v850);

    let dp850_c = dp850 - C_TO_K;

    [
        12.0 * dp850_c,
        20.0 * (total_totals - 49.0),
        2.0 * spd850,
        spd500,
        125.0 * ((dir500 - dir850).sin() + 0.2),
    ]
    .iter()
    .map(|term| term.max(0.0))
    .sum()
}

/// Wind speed and direction from u and v components.
///
/// The direction is the mathematical angle `atan2(v, u)` in radians, not a meteorological
/// compass direction. Grids that are rotated relative to their central meridian will give a
/// direction error.
#[inline]
pub fn wind_from_vector(u: f64, v: f64) -> (f64, f64) {
    (u.hypot(v), v.atan2(u))
}

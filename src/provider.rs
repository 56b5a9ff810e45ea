//! The interface to gridded model data and the conversion of a raw model column into a
//! [`Sounding`].
//!
//! Decoding model files is the job of the data provider, this crate only describes what it needs
//! from one with the [`SoundingProvider`] trait. Providers hand back raw `f64` values using the
//! [`MISSING`](crate::utility::MISSING) sentinel, [`build_sounding`] validates and converts them.

use crate::{
    error::{Result, SkewTError},
    sounding::{Level, Sounding, StationInfo},
    thermo,
    utility::{is_missing, optioned_from_sentinel, MISSING},
};
use chrono::NaiveDateTime;
use itertools::izip;
use metfor::{Kelvin, MetersPSec, WindUV};
use optional::{none, some, Optioned};

/// Levels above this pressure level (Pa) can't be plotted.
const PRES_TOP: f64 = 10_000.0;
/// Levels below this pressure level (Pa) are below the bottom of the diagram.
const PRES_BOTTOM: f64 = 100_000.0;
/// Only levels on multiples of this interval (Pa) are used.
const PRES_INTERVAL: f64 = 2_500.0;

/// Indexes of a column in the model's horizontal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Index in the x (west-east) direction.
    pub x: usize,
    /// Index in the y (south-north) direction.
    pub y: usize,
}

impl GridPoint {
    /// Create a new grid point.
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        GridPoint { x, y }
    }
}

/// The moisture variable a model provides, either the dew point or the relative humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Humidity {
    /// Dew point in K.
    DewPoint(f64),
    /// Relative humidity in percent.
    RelativeHumidity(f64),
}

impl Humidity {
    /// Get the dew point (K), converting from relative humidity if needed.
    ///
    /// Returns `None` if a required value is missing. A relative humidity of zero or less has no
    /// dew point and is treated as missing, values above 100% are capped at saturation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::Humidity;
    ///
    /// assert_eq!(Humidity::DewPoint(280.0).to_dew_point(290.0, 90_000.0), Some(280.0));
    ///
    /// let dp = Humidity::RelativeHumidity(100.0).to_dew_point(290.0, 90_000.0).unwrap();
    /// assert!((dp - 290.0).abs() < 0.5);
    /// ```
    pub fn to_dew_point(self, temp: f64, pres: f64) -> Option<f64> {
        match self {
            Humidity::DewPoint(dp) if !is_missing(dp) => Some(dp),
            Humidity::DewPoint(_) => None,
            Humidity::RelativeHumidity(rh) => {
                if is_missing(rh) || is_missing(temp) || is_missing(pres) || rh <= 0.0 {
                    None
                } else {
                    Some(thermo::dew_point(temp, pres, rh.min(100.0)))
                }
            }
        }
    }
}

impl Default for Humidity {
    fn default() -> Self {
        Humidity::DewPoint(MISSING)
    }
}

/// A raw vertical column of model data at one grid point.
///
/// All scalars use the missing value sentinel. The profile vectors are parallel, one entry per
/// isobaric level in the model file, in any order. The wind vectors may be empty if the model has
/// no wind data.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderColumn {
    /// Model name or other description of the data source.
    pub source: Option<String>,
    /// Longitude and latitude of the grid point in degrees.
    pub location: Option<(f64, f64)>,
    /// Model initialization time.
    pub analysis_time: Option<NaiveDateTime>,
    /// Valid time of the data.
    pub valid_time: Option<NaiveDateTime>,

    /// Pressure of the isobaric levels in Pa.
    pub pressure: Vec<f64>,
    /// Temperature in K.
    pub temperature: Vec<f64>,
    /// Moisture on each level.
    pub humidity: Vec<Humidity>,
    /// Grid relative u wind component in m/s.
    pub u_wind: Vec<f64>,
    /// Grid relative v wind component in m/s.
    pub v_wind: Vec<f64>,

    /// 2m temperature in K.
    pub sfc_temperature: f64,
    /// 2m moisture.
    pub sfc_humidity: Humidity,
    /// Surface pressure in Pa.
    pub sfc_pressure: f64,
    /// Mean sea level pressure in Pa.
    pub mslp: f64,
    /// Surface based CAPE in J/kg.
    pub cape: f64,
    /// Surface based CIN in J/kg.
    pub cin: f64,
    /// Surface lifted index in K.
    pub lftx: f64,
}

impl Default for ProviderColumn {
    fn default() -> Self {
        ProviderColumn {
            source: None,
            location: None,
            analysis_time: None,
            valid_time: None,

            pressure: vec![],
            temperature: vec![],
            humidity: vec![],
            u_wind: vec![],
            v_wind: vec![],

            sfc_temperature: MISSING,
            sfc_humidity: Humidity::default(),
            sfc_pressure: MISSING,
            mslp: MISSING,
            cape: MISSING,
            cin: MISSING,
            lftx: MISSING,
        }
    }
}

/// A source of gridded model data, such as a decoded GRIB or NetCDF file.
pub trait SoundingProvider {
    /// Number of grid points in the x and y directions.
    fn grid_size(&self) -> (usize, usize);

    /// Get the raw data for a single column.
    ///
    /// Grid points outside the grid are an error, missing variables are not and should be filled
    /// with the sentinel.
    fn column(&self, pt: GridPoint) -> Result<ProviderColumn>;

    /// Load a sounding for the grid point.
    fn sounding(&self, pt: GridPoint) -> Result<Sounding> {
        let (nx, ny) = self.grid_size();
        if pt.x >= nx || pt.y >= ny {
            return Err(SkewTError::OutOfGrid { x: pt.x, y: pt.y });
        }

        build_sounding(pt, self.column(pt)?)
    }
}

/// Sanitize a raw column and build a sounding from it.
///
/// Only levels between 100 and 1000 hPa that are a multiple of 25 hPa are kept, relative humidity
/// is converted to dew point and sentinels become missing values.
pub fn build_sounding(pt: GridPoint, col: ProviderColumn) -> Result<Sounding> {
    let num_levels = col.pressure.len();

    if col.temperature.len() != num_levels || col.humidity.len() != num_levels {
        return Err(SkewTError::InvalidInput);
    }

    let has_wind = !col.u_wind.is_empty() || !col.v_wind.is_empty();
    if has_wind && (col.u_wind.len() != num_levels || col.v_wind.len() != num_levels) {
        return Err(SkewTError::InvalidInput);
    }

    let winds: Box<dyn Iterator<Item = Option<WindUV<MetersPSec>>> + '_> = if has_wind {
        Box::new(
            col.u_wind
                .iter()
                .zip(col.v_wind.iter())
                .map(|(&u, &v)| to_wind(u, v)),
        )
    } else {
        Box::new(std::iter::repeat(None))
    };

    let levels: Vec<Level> = izip!(&col.pressure, &col.temperature, &col.humidity, winds)
        .filter(|(p, _, _, _)| is_plot_level(**p))
        .map(|(&p, &t, &hum, wind)| {
            let temperature: Optioned<Kelvin> = optioned_from_sentinel(t, Kelvin);
            let dew_point: Optioned<Kelvin> = match hum.to_dew_point(t, p) {
                Some(dp) => some(Kelvin(dp)),
                None => none(),
            };

            Level::new(p, temperature, dew_point).with_wind(wind)
        })
        .collect();

    log::debug!(
        "using {} of {} levels at grid point ({}, {})",
        levels.len(),
        num_levels,
        pt.x,
        pt.y
    );

    if levels.is_empty() {
        return Err(SkewTError::NotEnoughData);
    }

    let sfc_dew_point: Optioned<Kelvin> = match col
        .sfc_humidity
        .to_dew_point(col.sfc_temperature, col.sfc_pressure)
    {
        Some(dp) => some(Kelvin(dp)),
        None => none(),
    };

    let station = StationInfo::new()
        .with_grid_point((pt.x, pt.y))
        .with_lon_lat(col.location);

    let snd = Sounding::new()
        .with_station_info(station)
        .with_analysis_time(col.analysis_time)
        .with_valid_time(col.valid_time)
        .with_levels(levels)
        .with_station_pressure(optioned_from_sentinel(col.sfc_pressure, |p| p))
        .with_sfc_temperature(optioned_from_sentinel(col.sfc_temperature, Kelvin))
        .with_sfc_dew_point(sfc_dew_point)
        .with_mslp(optioned_from_sentinel(col.mslp, |p| p))
        .with_cape(optioned_from_sentinel(col.cape, |v| v))
        .with_cin(optioned_from_sentinel(col.cin, |v| v))
        .with_lifted_index(optioned_from_sentinel(col.lftx, |v| v));

    Ok(snd.with_source_description(col.source))
}

#[inline]
fn is_plot_level(pres: f64) -> bool {
    !is_missing(pres)
        && pres >= PRES_TOP
        && pres <= PRES_BOTTOM
        && (pres % PRES_INTERVAL).abs() < 1.0e-6
}

#[inline]
fn to_wind(u: f64, v: f64) -> Option<WindUV<MetersPSec>> {
    if is_missing(u) || is_missing(v) {
        None
    } else {
        Some(WindUV {
            u: MetersPSec(u),
            v: MetersPSec(v),
        })
    }
}

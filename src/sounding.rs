//! Data type and methods to store an atmospheric sounding.

use chrono::NaiveDateTime;
use metfor::Kelvin;
use optional::Optioned;

pub use self::{level::Level, station_info::StationInfo};

/// All the variables stored in the sounding.
///
/// The upper air data is stored as a list of isobaric [`Level`]s ordered from the highest
/// pressure to the lowest, surface to top. The surface values are stored separately, use
/// [`Sounding::plot_rows`] to get them merged into the profile.
///
/// A sounding is immutable once built, all the builder methods consume `self`.
#[derive(Clone, Debug, Default)]
pub struct Sounding {
    // Description of the source of the sounding, usually the model name.
    source: Option<String>,

    // Station info
    station: StationInfo,

    // Model initialization time
    analysis_time: Option<NaiveDateTime>,
    // Valid time of sounding
    valid_time: Option<NaiveDateTime>,

    // Profile
    levels: Vec<Level>,

    // Surface variables
    station_pressure: Optioned<f64>,
    sfc_temperature: Optioned<Kelvin>,
    sfc_dew_point: Optioned<Kelvin>,
    mslp: Optioned<f64>,

    // Indexes calculated by the model
    cape: Optioned<f64>,
    cin: Optioned<f64>,
    lifted_index: Optioned<f64>,
}

macro_rules! make_scalar_setter {
    ($(#[$attr:meta])* => $name:ident, $field:ident, $inner_type:ty) => {
        $(#[$attr])*
        #[inline]
        pub fn $name<T>(mut self, value: T) -> Self
        where
            Optioned<$inner_type>: From<T>,
        {
            self.$field = Optioned::from(value);
            self
        }
    };
}

impl Sounding {
    /// Create a new sounding with default values. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::Sounding;
    ///
    /// let snd = Sounding::new();
    /// println!("{:?}", snd);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Sounding::default()
    }

    /// Add a source description to this sounding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::Sounding;
    ///
    /// let snd = Sounding::new().with_source_description("RAP".to_owned());
    /// assert_eq!(snd.source_description().unwrap(), "RAP");
    ///
    /// let snd = snd.with_source_description(None);
    /// assert!(snd.source_description().is_none());
    /// ```
    #[inline]
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Retrieve a source description for this sounding.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Builder function for setting the station info.
    #[inline]
    pub fn with_station_info(mut self, new_value: StationInfo) -> Self {
        self.station = new_value;
        self
    }

    /// Get the station info
    #[inline]
    pub fn station_info(&self) -> &StationInfo {
        &self.station
    }

    /// Builder method to set the analysis (model initialization) time.
    #[inline]
    pub fn with_analysis_time<T>(mut self, analysis_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.analysis_time = Option::from(analysis_time);
        self
    }

    /// Analysis (model initialization) time of the sounding.
    #[inline]
    pub fn analysis_time(&self) -> Option<NaiveDateTime> {
        self.analysis_time
    }

    /// Builder method to set the valid time of the sounding.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_skewt::Sounding;
    /// use chrono::NaiveDate;
    ///
    /// let vtime = NaiveDate::from_ymd_opt(2016, 5, 24)
    ///     .and_then(|d| d.and_hms_opt(0, 0, 0))
    ///     .unwrap();
    /// let _snd = Sounding::new().with_valid_time(vtime);
    /// let _snd = Sounding::new().with_valid_time(Some(vtime));
    /// ```
    #[inline]
    pub fn with_valid_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.valid_time = Option::from(valid_time);
        self
    }

    /// Valid time of the sounding.
    #[inline]
    pub fn valid_time(&self) -> Option<NaiveDateTime> {
        self.valid_time
    }

    /// Builder method for the isobaric levels.
    ///
    /// Levels are sorted from the highest pressure to the lowest. Levels without a finite, positive
    /// pressure are dropped, and sentinel temperatures or dew points are stored as missing.
    ///
    /// # Examples
    /// ```rust
    /// use metfor::Kelvin;
    /// use sounding_skewt::{Level, Sounding};
    ///
    /// let snd = Sounding::new().with_levels(vec![
    ///     Level::new(50_000.0, Kelvin(253.15), Kelvin(243.15)),
    ///     Level::new(85_000.0, Kelvin(283.15), Kelvin(278.15)),
    ///     Level::new(std::f64::NAN, Kelvin(283.15), Kelvin(278.15)),
    /// ]);
    ///
    /// assert_eq!(snd.levels().len(), 2);
    /// assert_eq!(snd.levels()[0].pressure, 85_000.0);
    /// ```
    #[inline]
    pub fn with_levels(mut self, mut levels: Vec<Level>) -> Self {
        levels.retain(|lvl| lvl.pressure.is_finite() && lvl.pressure > 0.0);
        levels.iter_mut().for_each(|lvl| *lvl = lvl.without_sentinels());
        levels.sort_by(|a, b| b.pressure.total_cmp(&a.pressure));

        self.levels = levels;
        self
    }

    /// Get the isobaric levels, surface to top.
    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Find the isobaric level at a pressure (Pa), if there is one.
    #[inline]
    pub fn level_at(&self, pressure: f64) -> Option<&Level> {
        self.levels
            .iter()
            .find(|lvl| (lvl.pressure - pressure).abs() < 0.5)
    }

    make_scalar_setter!(
        /// Builder method for the surface pressure in Pa.
        ///
        /// # Examples
        ///```rust
        /// use sounding_skewt::Sounding;
        /// use optional::{some, none};
        ///
        /// let _snd = Sounding::new().with_station_pressure(98_200.0);
        /// let _snd = Sounding::new().with_station_pressure(some(98_200.0));
        /// let _snd = Sounding::new().with_station_pressure(none::<f64>());
        ///```
        => with_station_pressure, station_pressure, f64
    );

    /// Surface pressure in Pa.
    #[inline]
    pub fn station_pressure(&self) -> Optioned<f64> {
        self.station_pressure
    }

    make_scalar_setter!(
        /// Builder method for the 2m temperature.
        => with_sfc_temperature, sfc_temperature, Kelvin
    );

    /// Get the 2m temperature.
    #[inline]
    pub fn sfc_temperature(&self) -> Optioned<Kelvin> {
        self.sfc_temperature
    }

    make_scalar_setter!(
        /// Builder method for the 2m dew point.
        => with_sfc_dew_point, sfc_dew_point, Kelvin
    );

    /// Get the 2m dew point.
    #[inline]
    pub fn sfc_dew_point(&self) -> Optioned<Kelvin> {
        self.sfc_dew_point
    }

    make_scalar_setter!(
        /// Builder method for the mean sea level pressure in Pa.
        => with_mslp, mslp, f64
    );

    /// Get the mean sea level pressure in Pa.
    #[inline]
    pub fn mslp(&self) -> Optioned<f64> {
        self.mslp
    }

    make_scalar_setter!(
        /// Builder method for the model CAPE in J/kg.
        => with_cape, cape, f64
    );

    /// Get the model CAPE in J/kg.
    #[inline]
    pub fn cape(&self) -> Optioned<f64> {
        self.cape
    }

    make_scalar_setter!(
        /// Builder method for the model CIN in J/kg.
        => with_cin, cin, f64
    );

    /// Get the model CIN in J/kg.
    #[inline]
    pub fn cin(&self) -> Optioned<f64> {
        self.cin
    }

    make_scalar_setter!(
        /// Builder method for the model surface based lifted index in K.
        => with_lifted_index, lifted_index, f64
    );

    /// Get the model surface based lifted index in K.
    #[inline]
    pub fn lifted_index(&self) -> Optioned<f64> {
        self.lifted_index
    }

    /// Get the surface values as a `Level`. Requires the surface pressure.
    #[inline]
    pub fn surface_as_level(&self) -> Option<Level> {
        let pressure = self.station_pressure.into_option()?;

        Some(Level {
            pressure,
            temperature: self.sfc_temperature,
            dew_point: self.sfc_dew_point,
            wind: None,
        })
    }

    /// The rows to plot, ordered from the lowest pressure to the highest (top down).
    ///
    /// The surface values are inserted in their sorted position among the isobaric levels. If the
    /// surface pressure is missing, only the isobaric levels are returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::Kelvin;
    /// use sounding_skewt::{Level, Sounding};
    ///
    /// let snd = Sounding::new()
    ///     .with_levels(vec![
    ///         Level::new(100_000.0, Kelvin(291.0), Kelvin(285.0)),
    ///         Level::new(97_500.0, Kelvin(290.0), Kelvin(284.0)),
    ///         Level::new(95_000.0, Kelvin(289.0), Kelvin(283.0)),
    ///     ])
    ///     .with_station_pressure(98_200.0)
    ///     .with_sfc_temperature(Kelvin(292.0));
    ///
    /// let pressures: Vec<f64> = snd.plot_rows().iter().map(|row| row.pressure).collect();
    /// assert_eq!(pressures, vec![95_000.0, 97_500.0, 98_200.0, 100_000.0]);
    /// ```
    pub fn plot_rows(&self) -> Vec<Level> {
        let mut rows: Vec<Level> = self.levels.iter().rev().cloned().collect();

        if let Some(sfc) = self.surface_as_level() {
            let idx = rows
                .iter()
                .position(|row| row.pressure >= sfc.pressure)
                .unwrap_or_else(|| rows.len());
            rows.insert(idx, sfc);
        }

        rows
    }
}

// FIXME: only configure for test and doc tests, not possible as of 1.41
#[doc(hidden)]
pub mod doctest {
    use super::*;
    use metfor::{MetersPSec, WindUV};

    pub fn make_test_sounding() -> super::Sounding {
        use optional::some;

        let wind = |u: f64, v: f64| WindUV {
            u: MetersPSec(u),
            v: MetersPSec(v),
        };

        let levels = vec![
            Level::new(100_000.0, Kelvin(293.15), Kelvin(288.15)),
            Level::new(92_500.0, Kelvin(289.15), Kelvin(284.15)),
            Level::new(85_000.0, Kelvin(285.15), Kelvin(280.15)).with_wind(wind(10.0, 0.0)),
            Level::new(70_000.0, Kelvin(275.15), Kelvin(265.15)).with_wind(wind(15.0, 5.0)),
            Level::new(50_000.0, Kelvin(258.15), Kelvin(243.15)).with_wind(wind(20.0, 20.0)),
            Level::new(30_000.0, Kelvin(233.15), Kelvin(218.15)),
        ];

        Sounding::new()
            .with_source_description("TEST".to_owned())
            .with_levels(levels)
            .with_station_pressure(some(98_000.0))
            .with_sfc_temperature(some(Kelvin(295.15)))
            .with_sfc_dew_point(some(Kelvin(287.15)))
    }
}


mod level;
mod station_info;

use crate::utility::optioned_from_sentinel;
use metfor::{Kelvin, MetersPSec, Quantity, WindUV};
use optional::Optioned;

/// A copy of one isobaric level of the sounding data.
#[derive(Clone, Default, Copy, Debug)]
pub struct Level {
    /// Pressure in Pa
    pub pressure: f64,
    /// Temperature in K
    pub temperature: Optioned<Kelvin>,
    /// Dew point in K
    pub dew_point: Optioned<Kelvin>,
    /// Grid relative wind components
    pub wind: Option<WindUV<MetersPSec>>,
}

impl Level {
    /// Create a level with temperature and dew point, but no wind. A temperature or dew point
    /// equal to the missing value sentinel is stored as missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::Kelvin;
    /// use optional::{none, some};
    /// use sounding_skewt::Level;
    ///
    /// let lvl = Level::new(85_000.0, Kelvin(283.15), some(Kelvin(278.15)));
    /// assert!(lvl.wind.is_none());
    ///
    /// let lvl = Level::new(85_000.0, Kelvin(283.15), none::<Kelvin>());
    /// assert!(lvl.dew_point.is_none());
    ///
    /// let lvl = Level::new(85_000.0, Kelvin(sounding_skewt::utility::MISSING), none::<Kelvin>());
    /// assert!(lvl.temperature.is_none());
    /// ```
    #[inline]
    pub fn new<T, U>(pressure: f64, temperature: T, dew_point: U) -> Self
    where
        Optioned<Kelvin>: From<T> + From<U>,
    {
        Level {
            pressure,
            temperature: drop_sentinel(Optioned::from(temperature)),
            dew_point: drop_sentinel(Optioned::from(dew_point)),
            wind: None,
        }
    }

    /// Replace sentinel temperature and dew point values with missing values.
    #[inline]
    pub(crate) fn without_sentinels(self) -> Self {
        Level {
            temperature: drop_sentinel(self.temperature),
            dew_point: drop_sentinel(self.dew_point),
            ..self
        }
    }

    /// Builder method to add the wind.
    #[inline]
    pub fn with_wind<T>(mut self, wind: T) -> Self
    where
        Option<WindUV<MetersPSec>>: From<T>,
    {
        self.wind = Option::from(wind);
        self
    }
}

fn drop_sentinel(val: Optioned<Kelvin>) -> Optioned<Kelvin> {
    val.into_option()
        .map_or_else(optional::none, |t| optioned_from_sentinel(t.unpack(), Kelvin))
}

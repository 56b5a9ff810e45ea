/// Where in the model grid a sounding was taken.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationInfo {
    /// x and y indexes into the data grid.
    grid_point: Option<(usize, usize)>,
    /// Longitude and latitude in degrees.
    location: Option<(f64, f64)>,
}

impl StationInfo {
    /// Create a new object with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::StationInfo;
    ///
    /// assert!(StationInfo::new().grid_point().is_none());
    /// assert!(StationInfo::new().location().is_none());
    ///
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add the grid point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::StationInfo;
    ///
    /// assert_eq!(StationInfo::new().with_grid_point((12, 40)).grid_point().unwrap(), (12, 40));
    /// assert!(StationInfo::new().with_grid_point(None).grid_point().is_none());
    ///
    /// ```
    #[inline]
    pub fn with_grid_point<T>(mut self, point: T) -> Self
    where
        Option<(usize, usize)>: From<T>,
    {
        self.grid_point = Option::from(point);
        self
    }

    /// Builder method to add a location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::StationInfo;
    ///
    /// assert_eq!(
    ///     StationInfo::new().with_lon_lat((-116.0, 45.0)).location().unwrap(), (-116.0, 45.0));
    /// assert_eq!(
    ///     StationInfo::new().with_lon_lat(Some((-116.0, 45.0)))
    ///         .location()
    ///         .unwrap(),
    ///     (-116.0, 45.0));
    ///
    /// ```
    #[inline]
    pub fn with_lon_lat<T>(mut self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        self.location = Option::from(coords);
        self
    }

    /// x and y indexes into the data grid.
    #[inline]
    pub fn grid_point(&self) -> Option<(usize, usize)> {
        self.grid_point
    }

    /// Longitude and latitude.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }
}

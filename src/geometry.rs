//! Layout of the plot area and the transforms between (temperature, pressure) and canvas
//! coordinates.
//!
//! Canvas coordinates have the origin in the top left corner with y increasing downward. The
//! vertical axis is the logarithm of pressure and isotherms are skewed to the right with height.

/// Lowest pressure (Pa) on the diagram, at the top of the plot area.
pub const PRES_MIN: f64 = 10_000.0;
/// Pressure (Pa) of the row where the temperature axis is labeled.
pub const PRES_BASE: f64 = 100_000.0;
/// Highest pressure (Pa) on the diagram, at the bottom of the plot area.
pub const PRES_MAX: f64 = 105_000.0;
/// Temperature (K) at the left edge of the plot area on the `PRES_BASE` row.
pub const TEMP_MIN: f64 = 223.15;
/// Temperature (K) at the right edge of the plot area on the `PRES_BASE` row.
pub const TEMP_MAX: f64 = 323.15;

/// Number of steps the plot area is divided into for sizing fonts and ticks.
const PLOT_MAX_STEPS: f64 = 400.0;

/// Size and layout of a Skew-T canvas.
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::PlotGeometry;
///
/// let geom = PlotGeometry::new(1800.0, 2400.0, 2.0);
/// assert_eq!(geom, PlotGeometry::screen());
///
/// // Bottom and top of the diagram.
/// assert!((geom.pres_to_y(105_000.0) - geom.plot_y_offset()).abs() < 1.0e-9);
/// assert!((geom.pres_to_y(10_000.0) - geom.plot_y_max()).abs() < 1.0e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    width: f64,
    height: f64,
    line_scale: f64,

    plot_x_offset: f64,
    plot_x_max: f64,
    plot_y_max: f64,
    plot_y_offset: f64,
}

impl PlotGeometry {
    /// Layout for a canvas `width` by `height` pixels, with all line widths and dash lengths
    /// multiplied by `line_scale`.
    pub fn new(width: f64, height: f64, line_scale: f64) -> Self {
        PlotGeometry {
            width,
            height,
            line_scale,

            plot_x_offset: width * 0.15,
            plot_x_max: width * 0.90,
            plot_y_max: height * 0.10,
            plot_y_offset: height * 0.85,
        }
    }

    /// The on screen canvas.
    #[inline]
    pub fn screen() -> Self {
        Self::new(1800.0, 2400.0, 2.0)
    }

    /// The canvas used when saving an image.
    #[inline]
    pub fn export() -> Self {
        Self::new(2400.0, 3600.0, 3.0)
    }

    /// Canvas width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Multiplier for line widths and dash lengths.
    #[inline]
    pub fn line_scale(&self) -> f64 {
        self.line_scale
    }

    /// Left edge of the plot area.
    #[inline]
    pub fn plot_x_offset(&self) -> f64 {
        self.plot_x_offset
    }

    /// Right edge of the plot area.
    #[inline]
    pub fn plot_x_max(&self) -> f64 {
        self.plot_x_max
    }

    /// Top edge of the plot area.
    #[inline]
    pub fn plot_y_max(&self) -> f64 {
        self.plot_y_max
    }

    /// Bottom edge of the plot area.
    #[inline]
    pub fn plot_y_offset(&self) -> f64 {
        self.plot_y_offset
    }

    /// Width of the plot area.
    #[inline]
    pub fn x_range(&self) -> f64 {
        self.plot_x_max - self.plot_x_offset
    }

    /// Height of the plot area.
    #[inline]
    pub fn y_range(&self) -> f64 {
        self.plot_y_offset - self.plot_y_max
    }

    /// Basic unit for font sizes, tick lengths and label offsets.
    #[inline]
    pub fn avg_step(&self) -> f64 {
        (self.x_range() / PLOT_MAX_STEPS + self.y_range() / PLOT_MAX_STEPS) / 2.0
    }

    /// Canvas y coordinate of a pressure level (Pa).
    #[inline]
    pub fn pres_to_y(&self, pres: f64) -> f64 {
        let pct = ((pres.ln() - PRES_MIN.ln()) / (PRES_MAX.ln() - PRES_MIN.ln())).abs();

        self.plot_y_max + pct * self.y_range()
    }

    /// Pressure (Pa) at a canvas y coordinate, the inverse of [`PlotGeometry::pres_to_y`] for
    /// points in the plot area.
    #[inline]
    pub fn y_to_pres(&self, y: f64) -> f64 {
        let pct = (y - self.plot_y_max) / self.y_range();

        (PRES_MIN.ln() + pct * (PRES_MAX.ln() - PRES_MIN.ln())).exp()
    }

    /// Canvas x coordinate of a temperature (K) on the row at canvas coordinate `y`.
    #[inline]
    pub fn temp_y_to_x(&self, temp: f64, y: f64) -> f64 {
        (temp - self.skewed_temp_min(y)) / (TEMP_MAX - TEMP_MIN) * self.x_range()
            + self.plot_x_offset
    }

    /// Temperature (K) at a canvas point, the inverse of [`PlotGeometry::temp_y_to_x`].
    #[inline]
    pub fn xy_to_temp(&self, x: f64, y: f64) -> f64 {
        (x - self.plot_x_offset) / self.x_range() * (TEMP_MAX - TEMP_MIN) + self.skewed_temp_min(y)
    }

    /// Canvas coordinates of a temperature (K) and pressure (Pa).
    #[inline]
    pub fn temp_pres_to_xy(&self, temp: f64, pres: f64) -> (f64, f64) {
        let y = self.pres_to_y(pres);
        (self.temp_y_to_x(temp, y), y)
    }

    // Temperature at the left edge of the plot area on the row at y.
    #[inline]
    fn skewed_temp_min(&self, y: f64) -> f64 {
        let y_base = self.pres_to_y(PRES_BASE);
        let y_range_new = (y_base - self.plot_y_max).abs();
        let y_off = (self.plot_y_offset - y_base).abs();

        let frac = (y + y_off - self.plot_y_offset) / y_range_new;

        TEMP_MIN + (TEMP_MAX - TEMP_MIN) * frac
    }
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self::screen()
    }
}

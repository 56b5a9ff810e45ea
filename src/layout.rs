//! Build the [`RenderScene`] for a Skew-T/Log-P diagram.
//!
//! Everything here is a pure function of a [`Sounding`] and a [`PlotGeometry`]. The background
//! (adiabats, mixing ratio lines, isotherms, isobars) never depends on the sounding, the traces
//! and annotations skip any missing values.

use crate::{
    analysis::Analysis,
    geometry::{PlotGeometry, PRES_BASE, PRES_MAX, PRES_MIN, TEMP_MAX, TEMP_MIN},
    keys::ProfileIndex,
    scene::{
        Color, Font, Point, RenderScene, SceneLayer, Stroke, Text, TextAlign, TextBaseline,
    },
    sounding::{Level, Sounding},
    thermo::{
        saturated_potential_temperature, temperature_at_mixing_ratio,
        temperature_from_potential_temperature, temperature_on_saturated_adiabat, C_TO_K,
    },
    utility::is_missing,
};
use chrono::NaiveDateTime;
use metfor::{Celsius, Kelvin, Quantity};
use std::f64::consts::FRAC_PI_2;

/// Mixing ratio lines (g/kg).
const MIXING_RATIOS: [f64; 18] = [
    0.1, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0,
    45.0,
];

/// Coldest isotherm and adiabat seed temperature (K), -150 C.
const GRID_TEMP_MIN: f64 = TEMP_MIN - (TEMP_MAX - TEMP_MIN);

const DRY_ADIABAT_STEP: f64 = 10.0;
const SAT_ADIABAT_STEP: f64 = 100.0;

const SEPARATOR: &str = "     ";
const MISSING_TEXT: &str = "--";

/// Render the diagram with the temperature and dew point traces of `snd`.
///
/// # Examples
///
/// ```rust
/// use sounding_skewt::{doctest::make_test_sounding, render, PlotGeometry, SceneLayer};
///
/// let scene = render(&make_test_sounding(), &PlotGeometry::screen());
/// assert_eq!(scene.layer(SceneLayer::TemperatureTrace).count(), 1);
/// assert_eq!(scene.layer(SceneLayer::Annotation).count(), 0);
/// ```
pub fn render(snd: &Sounding, geom: &PlotGeometry) -> RenderScene {
    let mut scene = RenderScene::new(geom.width(), geom.height());

    draw_grid_lines(&mut scene, geom);
    draw_traces(&mut scene, snd, geom);
    draw_frame(&mut scene, geom);

    log::debug!("rendered Skew-T with {} primitives", scene.len());
    scene
}

/// Render the diagram like [`render`], and add the location, times, data source, surface values
/// and indexes around the plot area.
pub fn render_annotated(snd: &Sounding, geom: &PlotGeometry) -> RenderScene {
    let mut scene = RenderScene::new(geom.width(), geom.height());

    draw_grid_lines(&mut scene, geom);
    draw_traces(&mut scene, snd, geom);
    draw_frame(&mut scene, geom);

    let anal = Analysis::new(snd.clone()).fill_in_missing_analysis();
    draw_location_and_time(&mut scene, snd, geom);
    draw_indexes(&mut scene, &anal, geom);

    log::debug!("rendered annotated Skew-T with {} primitives", scene.len());
    scene
}

/// Render an empty diagram, no sounding data.
pub fn render_blank(geom: &PlotGeometry) -> RenderScene {
    let mut scene = RenderScene::new(geom.width(), geom.height());

    draw_grid_lines(&mut scene, geom);
    draw_frame(&mut scene, geom);

    log::debug!("rendered blank Skew-T with {} primitives", scene.len());
    scene
}

/**************************************************************************************************
 *                                   Background grid
 *************************************************************************************************/
fn draw_grid_lines(scene: &mut RenderScene, geom: &PlotGeometry) {
    scene.fill_rect(
        SceneLayer::Background,
        Point::new(0.0, 0.0),
        geom.width(),
        geom.height(),
        Color::WHITE,
    );

    grid_temperatures(10).for_each(|theta| draw_dry_adiabat(scene, geom, theta));
    grid_temperatures(5).for_each(|t| draw_saturated_adiabat(scene, geom, t));
    MIXING_RATIOS
        .iter()
        .for_each(|&mw| draw_mixing_ratio(scene, geom, mw));
    grid_temperatures(10).for_each(|t| draw_isotherm(scene, geom, t));
    isobars().for_each(|p| draw_isobar(scene, geom, p));
}

/// Temperatures (K) from -150 C to 50 C.
fn grid_temperatures(step: i32) -> impl Iterator<Item = f64> {
    let start = (GRID_TEMP_MIN - C_TO_K).round() as i32 / step;
    let end = (TEMP_MAX - C_TO_K).round() as i32 / step;

    (start..=end).map(move |i| f64::from(i * step) + C_TO_K)
}

/// Labeled pressure levels (Pa), 100 to 1000 hPa.
fn isobars() -> impl Iterator<Item = f64> {
    (1..=10).map(|i| f64::from(i) * 10_000.0)
}

/// Pressure levels (Pa) from the bottom to the top of the diagram.
fn pressure_steps(step: f64) -> impl Iterator<Item = f64> {
    let num_steps = ((PRES_MAX - PRES_MIN) / step).round() as usize;

    (0..=num_steps).map(move |i| PRES_MAX - i as f64 * step)
}

/// A label parallel to a curve `temp_at(p)`, centered at `label_p` and oriented with the segment
/// between `p_below` and `p_above`.
fn curve_label(
    geom: &PlotGeometry,
    temp_at: impl Fn(f64) -> f64,
    (p_below, label_p, p_above): (f64, f64, f64),
    dx: f64,
    content: String,
    font: Font,
) -> Text {
    let (x1, y1) = geom.temp_pres_to_xy(temp_at(p_below), p_below);
    let (x2, y2) = geom.temp_pres_to_xy(temp_at(p_above), p_above);
    let (x, y) = geom.temp_pres_to_xy(temp_at(label_p), label_p);

    Text {
        content,
        anchor: Point::new(x + dx, y),
        align: TextAlign::Center,
        baseline: TextBaseline::Alphabetic,
        rotation: -((y1 - y2) / (x2 - x1)).atan(),
        font,
        color: Color::BLACK,
    }
}

fn draw_dry_adiabat(scene: &mut RenderScene, geom: &PlotGeometry, theta: f64) {
    let temp_at = |p| temperature_from_potential_temperature(theta, p);

    let points = pressure_steps(DRY_ADIABAT_STEP)
        .map(|p| Point::from(geom.temp_pres_to_xy(temp_at(p), p)))
        .collect();
    scene.polyline(
        SceneLayer::DryAdiabat,
        points,
        Stroke::solid(Color::BROWN, geom.line_scale()),
    );

    let label = curve_label(
        geom,
        temp_at,
        (22_000.0, 21_000.0, 20_000.0),
        1.5 * geom.avg_step(),
        format!("{:.0} C", theta - C_TO_K),
        Font::bold(5.0 * geom.avg_step()),
    );
    scene.text(SceneLayer::DryAdiabat, label);
}

fn draw_saturated_adiabat(scene: &mut RenderScene, geom: &PlotGeometry, temp: f64) {
    let os = saturated_potential_temperature(temp, PRES_BASE);
    let temp_at = |p| temperature_on_saturated_adiabat(os, p);

    let points = pressure_steps(SAT_ADIABAT_STEP)
        .map(|p| Point::from(geom.temp_pres_to_xy(temp_at(p), p)))
        .collect();
    let scale = geom.line_scale();
    scene.polyline(
        SceneLayer::SaturatedAdiabat,
        points,
        Stroke::dashed(Color::GREEN, 0.75 * scale, vec![3.0 * scale]),
    );

    let label = curve_label(
        geom,
        temp_at,
        (28_000.0, 27_000.0, 26_000.0),
        1.5 * geom.avg_step(),
        format!("{:.0} C", temp - C_TO_K),
        Font::bold(5.0 * geom.avg_step()),
    );
    scene.text(SceneLayer::SaturatedAdiabat, label);
}

fn draw_mixing_ratio(scene: &mut RenderScene, geom: &PlotGeometry, mw: f64) {
    let temp_at = |p| temperature_at_mixing_ratio(mw, p);

    let scale = geom.line_scale();
    scene.line(
        SceneLayer::MixingRatio,
        Point::from(geom.temp_pres_to_xy(temp_at(PRES_MAX), PRES_MAX)),
        Point::from(geom.temp_pres_to_xy(temp_at(PRES_MIN), PRES_MIN)),
        Stroke::dashed(Color::TEAL, 0.75 * scale, vec![6.0 * scale]),
    );

    let label = curve_label(
        geom,
        temp_at,
        (75_000.0, 74_000.0, 73_000.0),
        -1.5 * geom.avg_step(),
        format!("{:.1} g/kg", mw),
        Font::bold(4.0 * geom.avg_step()),
    );
    scene.text(SceneLayer::MixingRatio, label);
}

fn draw_isotherm(scene: &mut RenderScene, geom: &PlotGeometry, temp: f64) {
    scene.line(
        SceneLayer::Isotherm,
        Point::from(geom.temp_pres_to_xy(temp, PRES_MAX)),
        Point::from(geom.temp_pres_to_xy(temp, PRES_MIN)),
        Stroke::solid(Color::BLACK, 1.25 * geom.line_scale()),
    );
}

fn draw_isobar(scene: &mut RenderScene, geom: &PlotGeometry, pres: f64) {
    let y = geom.pres_to_y(pres);

    scene.line(
        SceneLayer::Isobar,
        Point::new(geom.plot_x_offset(), y),
        Point::new(geom.plot_x_max(), y),
        Stroke::solid(Color::BLUE, 0.75 * geom.line_scale()),
    );
}

/**************************************************************************************************
 *                                   Sounding traces
 *************************************************************************************************/
fn draw_traces(scene: &mut RenderScene, snd: &Sounding, geom: &PlotGeometry) {
    let rows = snd.plot_rows();

    let trace = |select: fn(&Level) -> Option<Kelvin>| -> Vec<Point> {
        rows.iter()
            .filter_map(|row| select(row).map(|t| (t.unpack(), row.pressure)))
            .filter(|&(t, _)| !is_missing(t))
            .map(|(t, p)| Point::from(geom.temp_pres_to_xy(t, p)))
            .collect()
    };

    let width = 2.0 * geom.line_scale();

    scene.polyline(
        SceneLayer::TemperatureTrace,
        trace(|row| row.temperature.into_option()),
        Stroke::solid(Color::BLACK, width),
    );
    scene.polyline(
        SceneLayer::DewPointTrace,
        trace(|row| row.dew_point.into_option()),
        Stroke::solid(Color::RED, width),
    );
}

/**************************************************************************************************
 *                                 Margins, axes and labels
 *************************************************************************************************/
fn draw_frame(scene: &mut RenderScene, geom: &PlotGeometry) {
    let (w, h) = (geom.width(), geom.height());
    let (left, right) = (geom.plot_x_offset(), geom.plot_x_max());
    let (top, bottom) = (geom.plot_y_max(), geom.plot_y_offset());
    let layer = SceneLayer::Frame;

    // Clear everything drawn outside the plot area.
    scene.fill_rect(layer, Point::new(0.0, 0.0), w, top, Color::WHITE);
    scene.fill_rect(layer, Point::new(0.0, bottom), w, h - bottom, Color::WHITE);
    scene.fill_rect(layer, Point::new(0.0, top), left, h - top, Color::WHITE);
    scene.fill_rect(layer, Point::new(right, top), w - right, h - top, Color::WHITE);

    let axis = Stroke::solid(Color::BLACK, 1.5 * geom.line_scale());
    scene.line(
        layer,
        Point::new(left, bottom),
        Point::new(left, top),
        axis.clone(),
    );
    scene.line(
        layer,
        Point::new(left, bottom),
        Point::new(right, bottom),
        axis.clone(),
    );

    let avg = geom.avg_step();
    let tick_len = 3.0 * avg;
    let tick_font = Font::normal(7.0 * avg);

    for pres in isobars() {
        let y = geom.pres_to_y(pres);

        scene.line(
            layer,
            Point::new(left, y),
            Point::new(left - tick_len, y),
            axis.clone(),
        );
        scene.text(
            layer,
            label(
                format!("{:.0}", pres / 100.0),
                Point::new(left - 4.0 * avg, y),
                TextAlign::Right,
                TextBaseline::Middle,
                tick_font,
            ),
        );
    }

    let y_base = geom.pres_to_y(PRES_BASE);
    for temp in (-5..=5).map(|i| f64::from(i * 10) + C_TO_K) {
        let x = geom.temp_y_to_x(temp, y_base);

        scene.line(
            layer,
            Point::new(x, bottom),
            Point::new(x, bottom + tick_len),
            axis.clone(),
        );
        scene.text(
            layer,
            label(
                format!("{:.0}", Celsius::from(Kelvin(temp)).unpack()),
                Point::new(x, bottom + 4.0 * avg),
                TextAlign::Center,
                TextBaseline::Top,
                tick_font,
            ),
        );
    }

    let title_size = 10.0 * avg;
    let title_font = Font::normal(title_size);

    let mut y_title = label(
        "Pressure (hPa)".to_owned(),
        Point::new(w * 0.075 + title_size, geom.y_range() / 2.0 + top),
        TextAlign::Center,
        TextBaseline::Middle,
        title_font,
    );
    y_title.rotation = -FRAC_PI_2;
    scene.text(layer, y_title);

    scene.text(
        layer,
        label(
            "Temperature (C)".to_owned(),
            Point::new(geom.x_range() / 2.0 + left, h * 0.90 - title_size),
            TextAlign::Center,
            TextBaseline::Middle,
            title_font,
        ),
    );
}

#[inline]
fn label(
    content: String,
    anchor: Point,
    align: TextAlign,
    baseline: TextBaseline,
    font: Font,
) -> Text {
    Text {
        content,
        anchor,
        align,
        baseline,
        rotation: 0.0,
        font,
        color: Color::BLACK,
    }
}

/**************************************************************************************************
 *                                      Annotations
 *************************************************************************************************/
fn draw_location_and_time(scene: &mut RenderScene, snd: &Sounding, geom: &PlotGeometry) {
    let avg = geom.avg_step();
    let x = geom.width() / 2.0;
    let row = geom.plot_y_max() / 10.0;

    let location = match snd.station_info().location() {
        Some((lon, lat)) => format!("Longitude, Latitude: {:.6}, {:.6}", lon, lat),
        None => format!("Longitude, Latitude: {}, {}", MISSING_TEXT, MISSING_TEXT),
    };

    let times = format!(
        "Analysis: {}   Valid: {}",
        format_time(snd.analysis_time()),
        format_time(snd.valid_time())
    );

    let source = format!(
        "Source: {}",
        snd.source_description().unwrap_or(MISSING_TEXT)
    );

    let lines = [
        (location, 4.5, Font::normal(12.0 * avg)),
        (times, 7.0, Font::normal(9.0 * avg)),
        (source, 9.0, Font::italic(7.0 * avg)),
    ];

    for (content, row_num, font) in lines.iter().cloned() {
        scene.text(
            SceneLayer::Annotation,
            label(
                content,
                Point::new(x, row * row_num),
                TextAlign::Center,
                TextBaseline::Middle,
                font,
            ),
        );
    }
}

fn draw_indexes(scene: &mut RenderScene, anal: &Analysis, geom: &PlotGeometry) {
    use crate::keys::ProfileIndex::*;

    let avg = geom.avg_step();
    let x = geom.width() / 2.0;
    let bottom = geom.plot_y_offset();
    let row = (geom.height() - bottom) / 20.0;

    let snd = anal.sounding();
    let celsius = |k: Option<Kelvin>| k.map(|k| Celsius::from(k).unpack());
    let hpa = |p: Option<f64>| p.map(|p| p / 100.0);
    let idx = |key: ProfileIndex| anal.get_profile_index(key).into_option();

    let surface = [
        format!(
            "Temperature 2m: {} C",
            fmt_opt(celsius(snd.sfc_temperature().into_option()), 1)
        ),
        format!(
            "Dew Point 2m: {} C",
            fmt_opt(celsius(snd.sfc_dew_point().into_option()), 1)
        ),
        format!(
            "Pressure Sfc: {} hPa",
            fmt_opt(hpa(snd.station_pressure().into_option()), 0)
        ),
    ]
    .join(SEPARATOR);

    let energy = [
        format!("LCL: {} hPa", fmt_opt(hpa(idx(LCLPressure)), 0)),
        format!("MSL: {} hPa", fmt_opt(hpa(idx(MSLP)), 0)),
        format!("CAPE: {} J/kg", fmt_opt(idx(CAPE), 0)),
        format!("CIN: {} J/kg", fmt_opt(idx(CIN), 0)),
    ]
    .join(SEPARATOR);

    let stability = [
        format!("Lifted Index: {}", fmt_opt(idx(LFTX), 1)),
        format!("K-Index: {}", fmt_opt(idx(K), 0)),
        format!("Total Totals: {}", fmt_opt(idx(TotalTotals), 0)),
        format!("SWEAT: {}", fmt_opt(idx(SWeT), 0)),
    ]
    .join(SEPARATOR);

    let lines = [
        (surface, 9.0, Font::normal(8.0 * avg)),
        (energy, 12.0, Font::normal(7.0 * avg)),
        (stability, 14.0, Font::normal(7.0 * avg)),
    ];

    for (content, row_num, font) in lines.iter().cloned() {
        scene.text(
            SceneLayer::Annotation,
            label(
                content,
                Point::new(x, row * row_num + bottom),
                TextAlign::Center,
                TextBaseline::Middle,
                font,
            ),
        );
    }
}

#[inline]
fn fmt_opt(val: Option<f64>, precision: usize) -> String {
    match val {
        Some(val) => format!("{:.*}", precision, val),
        None => MISSING_TEXT.to_owned(),
    }
}

#[inline]
fn format_time(time: Option<NaiveDateTime>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%MZ").to_string(),
        None => MISSING_TEXT.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scene::{FontWeight, Primitive};
    use crate::sounding::doctest::make_test_sounding;
    use crate::utility::test_tools::approx_equal;
    use chrono::NaiveDate;

    fn texts(scene: &RenderScene, layer: SceneLayer) -> Vec<&Text> {
        scene
            .layer(layer)
            .filter_map(|prim| match prim {
                Primitive::Text(txt) => Some(txt),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_temperatures() {
        let temps: Vec<f64> = grid_temperatures(10).collect();
        assert_eq!(temps.len(), 21);
        assert!(approx_equal(temps[0], 123.15, 1.0e-9));
        assert!(approx_equal(*temps.last().unwrap(), 323.15, 1.0e-9));

        assert_eq!(grid_temperatures(5).count(), 41);
        assert_eq!(isobars().count(), 10);
    }

    #[test]
    fn test_pressure_steps() {
        let steps: Vec<f64> = pressure_steps(100.0).collect();

        assert_eq!(steps.len(), 951);
        assert_eq!(steps[0], PRES_MAX);
        assert!(approx_equal(*steps.last().unwrap(), PRES_MIN, 1.0e-6));
        assert_eq!(pressure_steps(10.0).count(), 9_501);
    }

    #[test]
    fn test_background_counts() {
        let scene = render_blank(&PlotGeometry::screen());

        // A polyline and label for every adiabat and mixing ratio line.
        assert_eq!(scene.layer(SceneLayer::DryAdiabat).count(), 42);
        assert_eq!(scene.layer(SceneLayer::SaturatedAdiabat).count(), 82);
        assert_eq!(scene.layer(SceneLayer::MixingRatio).count(), 36);
        assert_eq!(scene.layer(SceneLayer::Isotherm).count(), 21);
        assert_eq!(scene.layer(SceneLayer::Isobar).count(), 10);
        assert_eq!(scene.layer(SceneLayer::Background).count(), 1);
    }

    #[test]
    fn test_labels() {
        let geom = PlotGeometry::screen();
        let scene = render_blank(&geom);

        let dry = texts(&scene, SceneLayer::DryAdiabat);
        assert_eq!(dry[0].content, "-150 C");
        assert_eq!(dry[15].content, "0 C");
        assert_eq!(dry[0].font.weight, FontWeight::Bold);
        assert!(approx_equal(dry[0].font.size, 5.0 * geom.avg_step(), 1.0e-9));

        let mw = texts(&scene, SceneLayer::MixingRatio);
        assert_eq!(mw[0].content, "0.1 g/kg");
        assert_eq!(mw[17].content, "45.0 g/kg");

        // Mixing ratio lines lean right going up the diagram, so their labels are turned
        // counterclockwise.
        assert!(mw.iter().all(|txt| txt.rotation < 0.0));

        let frame = texts(&scene, SceneLayer::Frame);
        assert!(frame.iter().any(|txt| txt.content == "1000"));
        assert!(frame.iter().any(|txt| txt.content == "-50"));
        let y_title = frame
            .iter()
            .find(|txt| txt.content == "Pressure (hPa)")
            .unwrap();
        assert!(approx_equal(y_title.rotation, -FRAC_PI_2, 1.0e-12));
    }

    #[test]
    fn test_missing_annotations() {
        let geom = PlotGeometry::screen();
        let scene = render_annotated(&Sounding::new(), &geom);

        let notes = texts(&scene, SceneLayer::Annotation);
        assert_eq!(notes.len(), 6);
        assert_eq!(notes[0].content, "Longitude, Latitude: --, --");
        assert_eq!(notes[1].content, "Analysis: --   Valid: --");
        assert_eq!(notes[2].content, "Source: --");
        assert!(notes[5].content.contains("SWEAT: --"));
        assert!(notes[3].font.size > notes[4].font.size);
        assert!(notes[2].font.italic);

        assert_eq!(scene.layer(SceneLayer::TemperatureTrace).count(), 0);
    }

    #[test]
    fn test_annotations() {
        use crate::sounding::StationInfo;

        let time = NaiveDate::from_ymd_opt(2017, 4, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let snd = make_test_sounding()
            .with_station_info(StationInfo::new().with_lon_lat((-114.05, 46.92)))
            .with_analysis_time(time)
            .with_valid_time(time)
            .with_cape(1234.4)
            .with_mslp(101_320.0);

        let scene = render_annotated(&snd, &PlotGeometry::screen());
        let notes = texts(&scene, SceneLayer::Annotation);

        assert_eq!(
            notes[0].content,
            "Longitude, Latitude: -114.050000, 46.920000"
        );
        assert_eq!(
            notes[1].content,
            "Analysis: 2017-04-01 12:00Z   Valid: 2017-04-01 12:00Z"
        );
        assert_eq!(notes[2].content, "Source: TEST");
        assert_eq!(
            notes[3].content,
            "Temperature 2m: 22.0 C     Dew Point 2m: 14.0 C     Pressure Sfc: 980 hPa"
        );
        assert!(notes[4].content.contains("MSL: 1013 hPa"));
        assert!(notes[4].content.contains("CAPE: 1234 J/kg"));
        assert!(notes[4].content.contains("CIN: -- J/kg"));
        assert!(notes[5].content.contains("Total Totals: 64"));
        assert!(notes[5].content.contains("K-Index: 24"));
    }

    #[test]
    fn test_trace_widths() {
        let geom = PlotGeometry::export();
        let scene = render(&make_test_sounding(), &geom);

        for layer in &[SceneLayer::TemperatureTrace, SceneLayer::DewPointTrace] {
            match scene.layer(*layer).next() {
                Some(Primitive::Polyline { points, stroke }) => {
                    assert_eq!(points.len(), 7);
                    assert!(approx_equal(stroke.width, 6.0, 1.0e-12));
                }
                _ => panic!("missing trace"),
            }
        }
    }
}

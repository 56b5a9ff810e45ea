use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use sounding_skewt::{
    utility::MISSING, GridPoint, Humidity, ProviderColumn, Result, SkewTError, Sounding,
    SoundingProvider,
};

pub mod index_tests;

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {

            use std::collections::HashMap;

            use sounding_skewt::Sounding;
            use crate::utils;

            fn load_data() -> (Sounding, HashMap<String, Option<f64>>) {
                utils::load_test_file($fname)
            }

            mod indexes {
                use crate::utils::index_tests;
                use super::load_data;

                #[test]
                fn test_total_totals() {
                    let (snd, fvals) = load_data();
                    index_tests::test_index(
                        &snd,
                        &fvals,
                        sounding_skewt::total_totals,
                        "total_totals",
                        0.5,
                    );
                }

                #[test]
                fn test_kindex() {
                    let (snd, fvals) = load_data();
                    index_tests::test_index(&snd, &fvals, sounding_skewt::k_index, "kindex", 0.5);
                }

                #[test]
                fn test_swet() {
                    let (snd, fvals) = load_data();
                    index_tests::test_index(&snd, &fvals, sounding_skewt::sweat, "swet", 0.5);
                }

                #[test]
                fn test_lcl() {
                    let (snd, fvals) = load_data();
                    index_tests::test_index(
                        &snd,
                        &fvals,
                        |snd| sounding_skewt::lcl(snd).map(|lcl| lcl.pressure),
                        "lcl_pressure",
                        // One step of the search
                        100.0,
                    );
                    index_tests::test_index(
                        &snd,
                        &fvals,
                        |snd| sounding_skewt::lcl(snd).map(|lcl| lcl.temperature),
                        "lcl_temperature",
                        0.5,
                    );
                }
            }

            mod render {
                use super::load_data;
                use sounding_skewt::{render, render_annotated, PlotGeometry, Primitive, SceneLayer};

                #[test]
                fn test_traces_match_plot_rows() {
                    let (snd, _) = load_data();
                    let scene = render(&snd, &PlotGeometry::screen());

                    let rows = snd.plot_rows();
                    let num_temps = rows.iter().filter(|row| row.temperature.is_some()).count();
                    let num_dew_points = rows.iter().filter(|row| row.dew_point.is_some()).count();

                    match scene.layer(SceneLayer::TemperatureTrace).next() {
                        Some(Primitive::Polyline { points, .. }) => {
                            assert_eq!(points.len(), num_temps)
                        }
                        _ => panic!("No temperature trace."),
                    }

                    match scene.layer(SceneLayer::DewPointTrace).next() {
                        Some(Primitive::Polyline { points, .. }) => {
                            assert_eq!(points.len(), num_dew_points)
                        }
                        _ => panic!("No dew point trace."),
                    };
                }

                #[test]
                fn test_annotated_has_six_lines() {
                    let (snd, _) = load_data();
                    let scene = render_annotated(&snd, &PlotGeometry::export());

                    assert_eq!(scene.layer(SceneLayer::Annotation).count(), 6);
                }
            }
        }
    };
}

/// A data provider backed by a single column stored in a CSV file.
pub struct CsvProvider {
    column: ProviderColumn,
}

impl SoundingProvider for CsvProvider {
    fn grid_size(&self) -> (usize, usize) {
        (1, 1)
    }

    fn column(&self, pt: GridPoint) -> Result<ProviderColumn> {
        if pt.x != 0 || pt.y != 0 {
            return Err(SkewTError::OutOfGrid { x: pt.x, y: pt.y });
        }

        Ok(self.column.clone())
    }
}

pub fn test_path(fname: &str) -> PathBuf {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    test_path
}

pub fn load_test_file(fname: &str) -> (Sounding, HashMap<String, Option<f64>>) {
    let (provider, fvals) = load_test_csv_provider(&test_path(fname));
    let snd = provider
        .sounding(GridPoint::new(0, 0))
        .expect("Error building sounding.");

    (snd, fvals)
}

#[allow(dead_code)] // Not every test file uses every function.
pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

fn parse(token: Option<&&str>) -> f64 {
    token
        .and_then(|val| f64::from_str(val.trim()).ok())
        .unwrap_or(MISSING)
}

fn parse_time(token: Option<&&str>) -> Option<NaiveDateTime> {
    token.and_then(|val| NaiveDateTime::parse_from_str(val.trim(), "%Y-%m-%dT%H:%M:%S").ok())
}

pub fn load_test_csv_provider(location: &PathBuf) -> (CsvProvider, HashMap<String, Option<f64>>) {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let mut column = ProviderColumn::default();
    let mut target_float_vals = HashMap::new();

    let mut section = "";
    for line in contents.lines() {
        if line.starts_with("###") {
            section = line.trim_matches(|c| c == '#' || c == ' ');
            continue;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        // Skip header lines, they don't start with a number.
        let is_data = tokens
            .get(0)
            .map(|tkn| f64::from_str(tkn.trim()).is_ok())
            .unwrap_or(false);

        match section {
            "Metadata Section" => match tokens[0] {
                "source" => column.source = tokens.get(1).map(|val| val.trim().to_owned()),
                "location" => column.location = Some((parse(tokens.get(1)), parse(tokens.get(2)))),
                "analysis_time" => column.analysis_time = parse_time(tokens.get(1)),
                "valid_time" => column.valid_time = parse_time(tokens.get(1)),
                _ => {}
            },
            "Profile Section" if is_data => {
                column.pressure.push(parse(tokens.get(0)));
                column.temperature.push(parse(tokens.get(1)));
                column
                    .humidity
                    .push(Humidity::RelativeHumidity(parse(tokens.get(2))));
                column.u_wind.push(parse(tokens.get(3)));
                column.v_wind.push(parse(tokens.get(4)));
            }
            "Surface Section" if is_data => {
                column.sfc_temperature = parse(tokens.get(0));
                column.sfc_humidity = Humidity::RelativeHumidity(parse(tokens.get(1)));
                column.sfc_pressure = parse(tokens.get(2));
                column.mslp = parse(tokens.get(3));
                column.cape = parse(tokens.get(4));
                column.cin = parse(tokens.get(5));
                column.lftx = parse(tokens.get(6));
            }
            "Analysis Float Section" if tokens.len() >= 2 => {
                let value = f64::from_str(tokens[1].trim()).ok();
                target_float_vals.insert(tokens[0].trim().to_owned(), value);
            }
            _ => {}
        }
    }

    (CsvProvider { column }, target_float_vals)
}

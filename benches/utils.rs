use chrono::NaiveDateTime;
use sounding_skewt::{
    build_sounding, utility::MISSING, GridPoint, Humidity, ProviderColumn, Sounding,
};
use std::{fs::File, io::Read, path::PathBuf, str::FromStr};

pub fn load_all_test_files() -> [Sounding; 2] {
    let snd1 = load_test_file("standard.csv");
    let snd2 = load_test_file("missing_data.csv");

    [snd1, snd2]
}

fn load_test_file(fname: &str) -> Sounding {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_sounding(&test_path)
}

fn parse(token: Option<&&str>) -> f64 {
    token
        .and_then(|val| f64::from_str(val.trim()).ok())
        .unwrap_or(MISSING)
}

fn load_test_csv_sounding(location: &PathBuf) -> Sounding {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let mut col = ProviderColumn::default();

    let mut section = "";
    for line in contents.lines() {
        if line.starts_with("###") {
            section = line.trim_matches(|c| c == '#' || c == ' ');
            continue;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() < 2 {
            continue;
        }

        match section {
            "Metadata Section" => match tokens[0] {
                "analysis_time" => {
                    col.analysis_time =
                        NaiveDateTime::parse_from_str(tokens[1].trim(), "%Y-%m-%dT%H:%M:%S").ok()
                }
                "valid_time" => {
                    col.valid_time =
                        NaiveDateTime::parse_from_str(tokens[1].trim(), "%Y-%m-%dT%H:%M:%S").ok()
                }
                _ => {}
            },
            "Profile Section" if f64::from_str(tokens[0].trim()).is_ok() => {
                col.pressure.push(parse(tokens.get(0)));
                col.temperature.push(parse(tokens.get(1)));
                col.humidity
                    .push(Humidity::RelativeHumidity(parse(tokens.get(2))));
                col.u_wind.push(parse(tokens.get(3)));
                col.v_wind.push(parse(tokens.get(4)));
            }
            "Surface Section" if f64::from_str(tokens[0].trim()).is_ok() => {
                col.sfc_temperature = parse(tokens.get(0));
                col.sfc_humidity = Humidity::RelativeHumidity(parse(tokens.get(1)));
                col.sfc_pressure = parse(tokens.get(2));
            }
            _ => {}
        }
    }

    build_sounding(GridPoint::new(0, 0), col).expect("oops")
}

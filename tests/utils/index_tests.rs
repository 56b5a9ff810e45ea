use super::*;

/// Compare an index against the value stored in the test file. A value of `--` in the file means
/// the index can't be calculated for that sounding.
#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_index<F: FnOnce(&Sounding) -> Result<f64>>(
    snd: &Sounding,
    tgt_float_vals: &HashMap<String, Option<f64>>,
    anal_func: F,
    index_key: &str,
    tol: f64,
) {
    let target_val = tgt_float_vals
        .get(index_key)
        .expect(&format!("Key {} missing from test file.", index_key));

    let analysis = anal_func(snd);

    match target_val {
        Some(target_val) => {
            let analysis = analysis.expect(&format!("Failed to compute {}", index_key));
            assert!(
                approx_equal(analysis, *target_val, tol),
                "{}: {} != {}",
                index_key,
                analysis,
                target_val
            );
        }
        None => assert_eq!(analysis.unwrap_err(), SkewTError::MissingValue),
    }
}

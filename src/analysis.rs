//! Data type and methods for building and describing an analysis.
//!
//! Not every possible analysis is in this data, only the values that are annotated on the diagram.
use crate::{
    indexes::{k_index, lcl, sweat, total_totals},
    keys::ProfileIndex,
    sounding::Sounding,
    thermo::Lcl,
};
use optional::{none, some, Optioned};
use strum::IntoEnumIterator;

/// Convenient package for the index values shown with a Skew-T.
///
/// Values calculated by the data provider (CAPE, CIN, LFTX, MSLP) are copied from the sounding when
/// the analysis is created. Everything else is computed by [`Analysis::fill_in_missing_analysis`].
#[derive(Debug, Clone)]
pub struct Analysis {
    // Sounding used to make the analysis
    sounding: Sounding,

    // Profile specific indicies
    total_totals: Optioned<f64>,
    k_index: Optioned<f64>,
    swet: Optioned<f64>,
    lcl_pressure: Optioned<f64>,
    lcl_temperature: Optioned<f64>,
    lcl_converged: Option<bool>,

    // Provider analysis
    cape: Optioned<f64>,
    cin: Optioned<f64>,
    lftx: Optioned<f64>,
    mslp: Optioned<f64>,
}

impl Analysis {
    /// Create a new `Analysis` holding the values supplied by the data provider.
    pub fn new(snd: Sounding) -> Self {
        let anal = Analysis {
            sounding: snd,
            total_totals: none(),
            k_index: none(),
            swet: none(),
            lcl_pressure: none(),
            lcl_temperature: none(),
            lcl_converged: None,
            cape: none(),
            cin: none(),
            lftx: none(),
            mslp: none(),
        };

        ProfileIndex::iter()
            .filter(|key| key.from_provider())
            .fold(anal, |anal, key| {
                let val = provider_value(&anal.sounding, key);
                anal.with_profile_index(key, val)
            })
    }

    /// Set a value in the analysis
    pub fn with_profile_index<T>(self, var: ProfileIndex, value: T) -> Self
    where
        Optioned<f64>: From<T>,
    {
        use self::ProfileIndex::*;

        let opt = Optioned::from(value);

        match var {
            TotalTotals => Analysis {
                total_totals: opt,
                ..self
            },
            K => Analysis {
                k_index: opt,
                ..self
            },
            SWeT => Analysis { swet: opt, ..self },
            CAPE => Analysis { cape: opt, ..self },
            CIN => Analysis { cin: opt, ..self },
            LFTX => Analysis { lftx: opt, ..self },
            LCLPressure => Analysis {
                lcl_pressure: opt,
                ..self
            },
            LCLTemperature => Analysis {
                lcl_temperature: opt,
                ..self
            },
            MSLP => Analysis { mslp: opt, ..self },
        }
    }

    /// Method to retrieve value from analysis.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_skewt::{doctest::make_test_sounding, Analysis, ProfileIndex};
    ///
    /// let anal = Analysis::new(make_test_sounding());
    /// assert!(anal.get_profile_index(ProfileIndex::TotalTotals).is_none());
    ///
    /// let anal = anal.fill_in_missing_analysis();
    /// assert!(anal.get_profile_index(ProfileIndex::TotalTotals).is_some());
    /// ```
    pub fn get_profile_index(&self, var: ProfileIndex) -> Optioned<f64> {
        use self::ProfileIndex::*;

        match var {
            TotalTotals => self.total_totals,
            K => self.k_index,
            SWeT => self.swet,
            CAPE => self.cape,
            CIN => self.cin,
            LFTX => self.lftx,
            LCLPressure => self.lcl_pressure,
            LCLTemperature => self.lcl_temperature,
            MSLP => self.mslp,
        }
    }

    /// Whether the LCL search converged, `None` if the LCL has not been computed by
    /// [`Analysis::fill_in_missing_analysis`].
    pub fn lcl_converged(&self) -> Option<bool> {
        self.lcl_converged
    }

    /// Get a reference to the sounding.
    pub fn sounding(&self) -> &Sounding {
        &self.sounding
    }

    /// Analyze the sounding to get as much information as you can. Values that are already set
    /// are left alone.
    pub fn fill_in_missing_analysis(mut self) -> Self {
        fn fill(target: &mut Optioned<f64>, calc: impl FnOnce() -> Option<f64>) {
            if target.is_none() {
                if let Some(val) = calc() {
                    *target = some(val);
                }
            }
        }

        let snd = &self.sounding;

        fill(&mut self.total_totals, || total_totals(snd).ok());
        fill(&mut self.k_index, || k_index(snd).ok());
        fill(&mut self.swet, || sweat(snd).ok());

        if self.lcl_pressure.is_none() || self.lcl_temperature.is_none() {
            if let Ok(Lcl {
                pressure,
                temperature,
                converged,
            }) = lcl(snd)
            {
                self.lcl_pressure = some(pressure);
                self.lcl_temperature = some(temperature);
                self.lcl_converged = Some(converged);
            }
        }

        self
    }
}

fn provider_value(snd: &Sounding, key: ProfileIndex) -> Optioned<f64> {
    use self::ProfileIndex::*;

    match key {
        CAPE => snd.cape(),
        CIN => snd.cin(),
        LFTX => snd.lifted_index(),
        MSLP => snd.mslp(),
        TotalTotals | K | SWeT | LCLPressure | LCLTemperature => none(),
    }
}

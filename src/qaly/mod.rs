//! Discounted quality-adjusted life years up to median survival
//!
//! For each year `y = 0..⌈m⌉` (`m` = median survival):
//!
//! ```text
//! raw[y]  = min(u − (age + y − ā)·a1 − ((age + y)² − ā²)·a2 + sex·as, 1)
//! disc[y] = raw[y]·(1 + d)^(−y)·w[y]
//! ```
//!
//! where `w[y]` is the share of year `y` lived before the median.

use serde::{Deserialize, Serialize};

use crate::params::ParameterBundle;
use crate::patient::Patient;

/// Yearly utility stream and its discounted total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QalyStream {
    /// Age/sex-adjusted utility per year, capped at 1
    pub raw: Vec<f64>,
    /// Discounted and final-year-weighted utility per year
    pub discounted: Vec<f64>,
    /// Sum of `discounted`
    pub total: f64,
}

impl QalyStream {
    /// Accumulate QALYs for a patient at `mrs` who survives `median` years
    ///
    /// A negative or undefined median yields an empty stream with a zero total.
    pub fn accumulate(
        patient: &Patient,
        mrs: usize,
        median: f64,
        bundle: &ParameterBundle,
    ) -> Self {
        let inputs = bundle.inputs();
        let utility = inputs.utility[mrs];
        let mean_age = inputs.logistic_mean_age[mrs];
        let rate = bundle.qaly_discount_rate();
        let age = patient.age_f64();
        let sex = patient.sex().indicator();

        let years = year_count(median);
        let mut raw = Vec::with_capacity(years);
        let mut discounted = Vec::with_capacity(years);
        for y in 0..years {
            let age_now = age + y as f64;
            let adjusted = utility
                - (age_now - mean_age) * inputs.qaly_age_coef
                - (age_now.powi(2) - mean_age.powi(2)) * inputs.qaly_age2_coef
                + sex * inputs.qaly_sex_coef;
            let capped = adjusted.min(1.0);
            raw.push(capped);
            let factor = (1.0 + rate).powi(-(y as i32));
            discounted.push(capped * factor * final_year_weight(y, median));
        }
        let total = discounted.iter().sum();
        Self {
            raw,
            discounted,
            total,
        }
    }

    pub fn undefined() -> Self {
        Self {
            raw: Vec::new(),
            discounted: Vec::new(),
            total: f64::NAN,
        }
    }
}

/// Number of whole or partial years lived before `median`
pub(crate) fn year_count(median: f64) -> usize {
    if median.is_finite() && median > 0.0 {
        median.ceil() as usize
    } else {
        0
    }
}

/// Share of year `y` that falls before the median
///
/// Full years count 1. The year containing the median counts `median` when it
/// is the first year and `median mod ⌊median⌋` otherwise; years past the
/// median count 0.
pub fn final_year_weight(y: usize, median: f64) -> f64 {
    let end_of_year = y as f64 + 1.0;
    if end_of_year < median {
        1.0
    } else if end_of_year < median + 1.0 {
        if y == 0 {
            median
        } else {
            median % median.floor()
        }
    } else {
        0.0
    }
}

//! Mortality after discharge
//!
//! Year one uses a logistic model for the probability of death; later years use
//! a Gompertz cumulative hazard measured in days since the end of year one.
//! The two are composed into a yearly cumulative probability of death:
//!
//! ```text
//! lp1  = c0 + c1·(age − mean_age[mrs]) + c2·sex + c_mrs[mrs]
//! p1   = 1 / (1 + exp(−lp1))
//! lpH  = g0 + g1·(age − µ) + g2·(age² − µ²) + g3·sex + g_mrs·age[mrs]·(age − µ) + g_mrs[mrs]
//! H(t) = exp(lpH)·(exp(γ·d) − 1)/γ,   d = (t − 1)·365
//! F(t) = 1 − (1 − H(t))·(1 − p1)
//! ```

mod survival;

use serde::{Deserialize, Serialize};

use crate::params::{ParameterBundle, MRS_LEVELS};
use crate::patient::Patient;

pub use survival::{SurvivalStats, UNREACHABLE};

/// Days per model year
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Linear predictors and shape of the mortality model for one patient and mRS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityModel {
    lp1: f64,
    p1: f64,
    lp_h: f64,
    gamma: f64,
}

impl MortalityModel {
    /// Evaluate the linear predictors, or `None` when `mrs` is outside 0-5
    pub fn new(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> Option<Self> {
        if mrs >= MRS_LEVELS {
            return None;
        }
        let lp1 = year_one_lp(patient, mrs, bundle);
        Some(Self {
            lp1,
            p1: logistic(lp1),
            lp_h: gompertz_lp(patient, mrs, bundle),
            gamma: bundle.inputs().gompertz_gamma,
        })
    }

    /// Year-one linear predictor
    pub fn lp1(&self) -> f64 {
        self.lp1
    }

    /// Probability of death in year one
    pub fn p1(&self) -> f64 {
        self.p1
    }

    /// Gompertz linear predictor for the years after year one
    pub fn lp_h(&self) -> f64 {
        self.lp_h
    }

    /// Gompertz shape (per day)
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Unclipped Gompertz cumulative hazard at `years` since discharge
    ///
    /// Zero at the end of year one; the hazard clock starts there.
    pub fn cumulative_hazard(&self, years: f64) -> f64 {
        let days = (years - 1.0) * DAYS_PER_YEAR;
        self.lp_h.exp() * ((self.gamma * days).exp() - 1.0) / self.gamma
    }

    /// Sweep the yearly grid `0..=horizon`
    pub fn table(&self, horizon: u32) -> MortalityTable {
        MortalityTable::sweep(self, horizon)
    }
}

fn logistic(lp: f64) -> f64 {
    1.0 / (1.0 + (-lp).exp())
}

/// Year-one logistic linear predictor
pub fn year_one_lp(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> f64 {
    let inputs = bundle.inputs();
    let c = &inputs.logistic_coeffs;
    c.constant
        + c.age * (patient.age_f64() - inputs.logistic_mean_age[mrs])
        + c.sex * patient.sex().indicator()
        + c.mrs[mrs]
}

/// Gompertz linear predictor for the years after year one
pub fn gompertz_lp(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> f64 {
    let inputs = bundle.inputs();
    let g = &inputs.gompertz_coeffs;
    let age = patient.age_f64();
    let mu = inputs.gompertz_mean_age;
    g.constant
        + g.age * (age - mu)
        + g.age_squared * (age.powi(2) - mu.powi(2))
        + g.sex * patient.sex().indicator()
        + g.mrs_age[mrs] * (age - mu)
        + g.mrs[mrs]
}

/// Year-by-year mortality trajectory
///
/// All vectors are indexed by year since discharge, `0..=horizon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityTable {
    pub years: Vec<u32>,
    /// Gompertz cumulative hazard, clipped at 1
    pub hazard: Vec<f64>,
    /// Cumulative probability of death, clipped at 1
    pub cumulative_death: Vec<f64>,
    /// `1 − cumulative_death`
    pub survival: Vec<f64>,
    /// Probability of death during each year; `None` after the hazard saturates
    pub death_probability: Vec<Option<f64>>,
    /// First year in which the unclipped hazard reached 1
    pub first_invalid_year: Option<u32>,
}

impl MortalityTable {
    fn sweep(model: &MortalityModel, horizon: u32) -> Self {
        let len = horizon as usize + 1;
        let mut table = MortalityTable {
            years: (0..=horizon).collect(),
            hazard: Vec::with_capacity(len),
            cumulative_death: Vec::with_capacity(len),
            survival: Vec::with_capacity(len),
            death_probability: Vec::with_capacity(len),
            first_invalid_year: None,
        };

        table.push(0.0, 0.0, Some(0.0));
        if horizon == 0 {
            return table;
        }
        table.push(0.0, model.p1, Some(model.p1));

        let mut previous = model.p1;
        for year in 2..=horizon {
            let raw = model.cumulative_hazard(year as f64);
            if raw >= 1.0 && table.first_invalid_year.is_none() {
                tracing::trace!(year, hazard = raw, "cumulative hazard saturated");
                table.first_invalid_year = Some(year);
            }
            let hazard = raw.min(1.0);
            let cumulative = (1.0 - (1.0 - hazard) * (1.0 - model.p1)).min(1.0);
            let probability = match table.first_invalid_year {
                Some(invalid) if year > invalid => None,
                _ => Some(1.0 - (previous - cumulative).exp()),
            };
            table.push(hazard, cumulative, probability);
            previous = cumulative;
        }
        table
    }

    fn push(&mut self, hazard: f64, cumulative: f64, probability: Option<f64>) {
        self.hazard.push(hazard);
        self.cumulative_death.push(cumulative);
        self.survival.push(1.0 - cumulative);
        self.death_probability.push(probability);
    }

    /// Empty table carried by out-of-domain records
    pub fn empty() -> Self {
        MortalityTable {
            years: Vec::new(),
            hazard: Vec::new(),
            cumulative_death: Vec::new(),
            survival: Vec::new(),
            death_probability: Vec::new(),
            first_invalid_year: None,
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

//! Cumulative resource-use models
//!
//! | Resource | Model | Cumulative count at `y` years |
//! |----------|-------|-------------------------------|
//! | A&E attendances | Weibull | `exp(γ·lp)·y^γ` |
//! | Non-elective bed days | log-logistic | `ln(1 + (y·exp(−lp))^(1/γ))` |
//! | Elective bed days | log-logistic | `ln(1 + (y·exp(−lp))^(1/γ))` |
//! | Residential care | linear | `0.95·p_care·y` |

use serde::{Deserialize, Serialize};

use crate::params::{MrsVector, ParameterBundle, ResourceCoefficients};
use crate::patient::Patient;

/// Share of a year a resident spends in residential care
pub const CARE_OCCUPANCY: f64 = 0.95;

/// A model of cumulative resource use since discharge
pub trait CumulativeUse {
    /// Cumulative use after `years` (fractional years allowed); zero at discharge
    fn cumulative(&self, years: f64) -> f64;
}

/// Weibull cumulative hazard used for A&E attendances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeibullCount {
    pub lp: f64,
    pub gamma: f64,
}

impl CumulativeUse for WeibullCount {
    // −ln(S(y)) with S(y) = exp(−exp(γ·lp)·y^γ), written in closed form
    fn cumulative(&self, years: f64) -> f64 {
        (self.gamma * self.lp).exp() * years.powf(self.gamma)
    }
}

/// Log-logistic cumulative hazard used for bed days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogLogisticCount {
    pub lp: f64,
    pub gamma: f64,
}

impl CumulativeUse for LogLogisticCount {
    // −ln(1 / (1 + (y·exp(−lp))^(1/γ)))
    fn cumulative(&self, years: f64) -> f64 {
        (years * (-self.lp).exp()).powf(1.0 / self.gamma).ln_1p()
    }
}

/// Time in residential care accumulating at a constant yearly rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCareTime {
    /// Years of care per year survived
    pub per_year: f64,
}

impl CumulativeUse for LinearCareTime {
    fn cumulative(&self, years: f64) -> f64 {
        self.per_year * years
    }
}

/// Resource linear predictor with age centred on the mRS mean age
pub fn resource_lp(
    patient: &Patient,
    mrs: usize,
    coeffs: &ResourceCoefficients,
    offsets: &MrsVector,
    bundle: &ParameterBundle,
) -> f64 {
    let mean_age = bundle.inputs().logistic_mean_age[mrs];
    coeffs.intercept
        + coeffs.age * (patient.age_f64() - mean_age)
        + coeffs.sex * patient.sex().indicator()
        + offsets[mrs]
}

impl WeibullCount {
    pub fn accident_emergency(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> Self {
        let inputs = bundle.inputs();
        Self {
            lp: resource_lp(patient, mrs, &inputs.ae_coeffs, &inputs.ae_mrs, bundle),
            gamma: inputs.ae_coeffs.gamma,
        }
    }
}

impl LogLogisticCount {
    pub fn non_elective(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> Self {
        let inputs = bundle.inputs();
        Self {
            lp: resource_lp(patient, mrs, &inputs.nel_coeffs, &inputs.nel_mrs, bundle),
            gamma: inputs.nel_coeffs.gamma,
        }
    }

    pub fn elective(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> Self {
        let inputs = bundle.inputs();
        Self {
            lp: resource_lp(patient, mrs, &inputs.el_coeffs, &inputs.el_mrs, bundle),
            gamma: inputs.el_coeffs.gamma,
        }
    }
}

impl LinearCareTime {
    /// Care rate from the discharge-destination percentage for the patient's age group
    pub fn residential(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> Self {
        let pct = bundle.care_percentages().for_age(patient.age())[mrs];
        Self {
            per_year: CARE_OCCUPANCY * pct,
        }
    }
}

//! Fixed model inputs as loaded from configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coefficients::{GompertzCoefficients, LogisticCoefficients, ResourceCoefficients};
use super::destination::{DestinationCounts, DischargeSplit};
use super::dichotomous::collapse;
use super::{ModelVariant, MrsVector, ParameterBundle};
use crate::error::OutcomeError;

/// The complete set of fixed inputs to the outcome model
///
/// Nothing here is estimated by the crate: coefficients, unit costs, utilities
/// and discharge counts are taken as given. A [`ParameterSet`] becomes an
/// immutable [`ParameterBundle`] through [`ParameterSet::build`].
///
/// Parameter files are JSON documents with exactly these fields; regression
/// groups are written as flat vectors in the layout described on each
/// coefficient type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSet {
    /// Upper bound of the yearly time grid
    pub horizon_years: u32,
    /// Annual QALY discount rate in percent
    pub discount_qaly: f64,
    /// Annual cost discount rate in percent
    pub discount_cost: f64,
    /// Monetary value of one QALY
    pub wtp_per_qaly: f64,

    pub unit_cost_ae: f64,
    pub unit_cost_nel_day: f64,
    pub unit_cost_el_day: f64,
    pub unit_cost_care_day: f64,

    /// Baseline utility by mRS, non-increasing
    pub utility: MrsVector,

    pub logistic_coeffs: LogisticCoefficients,
    /// Mean age per mRS used to centre age in the logistic and resource models
    pub logistic_mean_age: MrsVector,

    pub gompertz_coeffs: GompertzCoefficients,
    /// Gompertz shape, per day
    pub gompertz_gamma: f64,
    pub gompertz_mean_age: f64,

    pub qaly_age_coef: f64,
    pub qaly_age2_coef: f64,
    pub qaly_sex_coef: f64,

    pub ae_coeffs: ResourceCoefficients,
    pub nel_coeffs: ResourceCoefficients,
    pub el_coeffs: ResourceCoefficients,
    pub ae_mrs: MrsVector,
    pub nel_mrs: MrsVector,
    pub el_mrs: MrsVector,

    pub destinations: DestinationCounts,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            horizon_years: 50,
            discount_qaly: 3.5,
            discount_cost: 3.5,
            wtp_per_qaly: 20_000.0,
            unit_cost_ae: 153.60,
            unit_cost_nel_day: 394.00,
            unit_cost_el_day: 423.00,
            unit_cost_care_day: 115.00,
            utility: [0.95, 0.88, 0.74, 0.55, 0.32, 0.15],
            logistic_coeffs: LogisticCoefficients {
                constant: -4.235428,
                age: 0.0663151,
                sex: 0.2757525,
                mrs: [
                    0.0, 0.2832114, 0.6120887, 1.1456329, 1.6981504, 2.8543212,
                ],
            },
            logistic_mean_age: [
                67.09161, 69.60532, 72.13278, 74.90145, 77.21938, 79.80474,
            ],
            gompertz_coeffs: GompertzCoefficients {
                constant: -9.65,
                age: 0.0543782,
                age_squared: 0.0001206,
                sex: 0.2014377,
                mrs_age: [
                    0.0, -0.0041562, -0.0083015, -0.0124497, -0.0181335, -0.0262048,
                ],
                mrs: [
                    0.0, 0.2719433, 0.5512064, 0.9236718, 1.3817602, 1.9543170,
                ],
            },
            gompertz_gamma: 0.0002004,
            gompertz_mean_age: 71.48512,
            qaly_age_coef: 0.0002587,
            qaly_age2_coef: 0.0000332,
            qaly_sex_coef: 0.0212126,
            ae_coeffs: ResourceCoefficients {
                intercept: -0.4571022,
                age: -0.0086913,
                sex: -0.0479632,
                gamma: 0.8174316,
            },
            nel_coeffs: ResourceCoefficients {
                intercept: -6.1402817,
                age: -0.0102745,
                sex: 0.0632191,
                gamma: 0.6023411,
            },
            el_coeffs: ResourceCoefficients {
                intercept: -7.2931054,
                age: 0.0068231,
                sex: -0.0419865,
                gamma: 0.7514226,
            },
            ae_mrs: [
                0.0, 0.0915301, 0.2106533, 0.3379112, 0.4451863, 0.5614297,
            ],
            nel_mrs: [
                0.0, -0.2216045, -0.4905317, -0.8733601, -1.2512094, -1.5630179,
            ],
            el_mrs: [
                0.0, -0.0517289, -0.1358806, -0.2215517, -0.2943328, -0.3602156,
            ],
            destinations: DestinationCounts {
                per_mrs: [
                    DischargeSplit::new(12, 1830),
                    DischargeSplit::new(25, 1650),
                    DischargeSplit::new(61, 1420),
                    DischargeSplit::new(140, 1190),
                    DischargeSplit::new(210, 760),
                    DischargeSplit::new(180, 320),
                ],
                over70: [
                    DischargeSplit::new(118, 612),
                    DischargeSplit::new(176, 455),
                    DischargeSplit::new(150, 182),
                ],
                not_over70: [
                    DischargeSplit::new(22, 578),
                    DischargeSplit::new(34, 305),
                    DischargeSplit::new(30, 138),
                ],
            },
        }
    }
}

impl ParameterSet {
    /// Parse a complete parameter set from a JSON document
    pub fn from_json(json: &str) -> Result<Self, OutcomeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON parameter file
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, OutcomeError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, OutcomeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the model relies on
    pub fn validate(&self) -> Result<(), OutcomeError> {
        if self.horizon_years == 0 {
            return Err(OutcomeError::invalid_parameter("horizon_years", 0));
        }
        for (name, rate) in [
            ("discount_qaly", self.discount_qaly),
            ("discount_cost", self.discount_cost),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(OutcomeError::invalid_parameter(name, rate));
            }
        }
        if self.gompertz_gamma.is_nan() || self.gompertz_gamma <= 0.0 {
            return Err(OutcomeError::invalid_parameter(
                "gompertz_gamma",
                self.gompertz_gamma,
            ));
        }
        for (name, coeffs) in [
            ("ae_coeffs.gamma", &self.ae_coeffs),
            ("nel_coeffs.gamma", &self.nel_coeffs),
            ("el_coeffs.gamma", &self.el_coeffs),
        ] {
            if coeffs.gamma.is_nan() || coeffs.gamma <= 0.0 {
                return Err(OutcomeError::invalid_parameter(name, coeffs.gamma));
            }
        }
        if self.logistic_coeffs.mrs[0] != 0.0 {
            return Err(OutcomeError::invalid_parameter(
                "logistic_coeffs.mrs0",
                self.logistic_coeffs.mrs[0],
            ));
        }
        if self.gompertz_coeffs.mrs[0] != 0.0 || self.gompertz_coeffs.mrs_age[0] != 0.0 {
            return Err(OutcomeError::invalid_parameter(
                "gompertz_coeffs.mrs0",
                format!(
                    "{} / {}",
                    self.gompertz_coeffs.mrs_age[0], self.gompertz_coeffs.mrs[0]
                ),
            ));
        }
        if let Some(mrs) = self.utility.windows(2).position(|w| w[1] > w[0]) {
            return Err(OutcomeError::invalid_parameter(
                format!("utility[{}]", mrs + 1),
                self.utility[mrs + 1],
            ));
        }
        self.destinations.validate()
    }

    /// Validate and derive the immutable bundle for a model variant
    pub fn build(&self, variant: ModelVariant) -> Result<ParameterBundle, OutcomeError> {
        self.validate()?;
        let care = self.destinations.care_percentages(variant);
        let inputs = match variant {
            ModelVariant::PerMrs => self.clone(),
            ModelVariant::Dichotomous => collapse(self),
        };
        tracing::debug!(
            variant = %variant,
            horizon = inputs.horizon_years,
            "built parameter bundle"
        );
        Ok(ParameterBundle::new(variant, inputs, care))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ParameterSet::default().validate().unwrap();
    }

    #[test]
    fn negative_discount_is_rejected() {
        let set = ParameterSet {
            discount_cost: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            set.validate(),
            Err(OutcomeError::InvalidParameter { ref param, .. }) if param == "discount_cost"
        ));
    }

    #[test]
    fn increasing_utility_is_rejected() {
        let mut set = ParameterSet::default();
        set.utility[4] = 0.6;
        let err = set.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: utility[4] = 0.6");
    }

    #[test]
    fn non_zero_reference_level_is_rejected() {
        let mut set = ParameterSet::default();
        set.logistic_coeffs.mrs[0] = 0.1;
        assert!(set.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_every_input() {
        let set = ParameterSet::default();
        let json = set.to_json().unwrap();
        let parsed = ParameterSet::from_json(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn json_missing_field_is_fatal() {
        let mut value = serde_json::to_value(ParameterSet::default()).unwrap();
        value.as_object_mut().unwrap().remove("gompertz_gamma");
        let err = ParameterSet::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, OutcomeError::Json(_)));
    }

    #[test]
    fn json_short_coefficient_vector_is_fatal() {
        let mut value = serde_json::to_value(ParameterSet::default()).unwrap();
        value["logistic_coeffs"] = serde_json::json!([1.0, 2.0, 3.0]);
        assert!(ParameterSet::from_json(&value.to_string()).is_err());
    }
}

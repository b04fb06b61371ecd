//! Typed regression coefficient groups
//!
//! Each group is stored in the model's flat vector layout (the layout used in
//! parameter files) and exposes named fields to the calculation code.

use serde::{Deserialize, Serialize};

use super::{MrsVector, MRS_LEVELS};
use crate::error::OutcomeError;

/// A fixed-length group of regression coefficients
///
/// Mirrors the flat vector layout of a parameter file: [`Coefficients::from_slice`]
/// reads the vector in field order and [`Coefficients::to_vec`] writes it back.
pub trait Coefficients: Sized {
    /// Name of the group, used in error messages
    const GROUP: &'static str;

    /// Names of all coefficients in vector order
    fn field_names() -> &'static [&'static str];

    /// Number of coefficients in the group
    fn num_coefficients() -> usize {
        Self::field_names().len()
    }

    /// Create from a slice of values (in field order)
    ///
    /// A slice of the wrong length is a missing-coefficient error.
    fn from_slice(values: &[f64]) -> Result<Self, OutcomeError>;

    /// Convert to a vector of values (in field order)
    fn to_vec(&self) -> Vec<f64>;
}

fn check_len<C: Coefficients>(values: &[f64]) -> Result<(), OutcomeError> {
    if values.len() != C::num_coefficients() {
        return Err(OutcomeError::MissingCoefficient {
            group: C::GROUP,
            expected: C::num_coefficients(),
            found: values.len(),
        });
    }
    Ok(())
}

fn mrs_block(values: &[f64]) -> MrsVector {
    let mut block = [0.0; MRS_LEVELS];
    block.copy_from_slice(&values[..MRS_LEVELS]);
    block
}

/// Year-one logistic regression: constant, age, sex, then six mRS constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct LogisticCoefficients {
    pub constant: f64,
    pub age: f64,
    pub sex: f64,
    /// mRS constants; the mRS 0 slot is the reference and must be zero
    pub mrs: MrsVector,
}

impl Coefficients for LogisticCoefficients {
    const GROUP: &'static str = "logistic";

    fn field_names() -> &'static [&'static str] {
        &[
            "constant", "age", "sex", "mrs0", "mrs1", "mrs2", "mrs3", "mrs4", "mrs5",
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self, OutcomeError> {
        check_len::<Self>(values)?;
        Ok(Self {
            constant: values[0],
            age: values[1],
            sex: values[2],
            mrs: mrs_block(&values[3..]),
        })
    }

    fn to_vec(&self) -> Vec<f64> {
        let mut values = vec![self.constant, self.age, self.sex];
        values.extend_from_slice(&self.mrs);
        values
    }
}

/// Gompertz regression for the cumulative hazard after year one
///
/// Layout: constant, age, age², sex, six mRS×age interactions, six mRS constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct GompertzCoefficients {
    pub constant: f64,
    pub age: f64,
    pub age_squared: f64,
    pub sex: f64,
    /// mRS×age interaction slopes (mRS 0 slot is zero)
    pub mrs_age: MrsVector,
    /// mRS constants (mRS 0 slot is zero)
    pub mrs: MrsVector,
}

impl Coefficients for GompertzCoefficients {
    const GROUP: &'static str = "gompertz";

    fn field_names() -> &'static [&'static str] {
        &[
            "constant",
            "age",
            "age_squared",
            "sex",
            "mrs0_age",
            "mrs1_age",
            "mrs2_age",
            "mrs3_age",
            "mrs4_age",
            "mrs5_age",
            "mrs0",
            "mrs1",
            "mrs2",
            "mrs3",
            "mrs4",
            "mrs5",
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self, OutcomeError> {
        check_len::<Self>(values)?;
        Ok(Self {
            constant: values[0],
            age: values[1],
            age_squared: values[2],
            sex: values[3],
            mrs_age: mrs_block(&values[4..]),
            mrs: mrs_block(&values[4 + MRS_LEVELS..]),
        })
    }

    fn to_vec(&self) -> Vec<f64> {
        let mut values = vec![self.constant, self.age, self.age_squared, self.sex];
        values.extend_from_slice(&self.mrs_age);
        values.extend_from_slice(&self.mrs);
        values
    }
}

/// Resource-use regression: intercept, age, sex and the distribution shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ResourceCoefficients {
    pub intercept: f64,
    pub age: f64,
    pub sex: f64,
    pub gamma: f64,
}

impl Coefficients for ResourceCoefficients {
    const GROUP: &'static str = "resource";

    fn field_names() -> &'static [&'static str] {
        &["intercept", "age", "sex", "gamma"]
    }

    fn from_slice(values: &[f64]) -> Result<Self, OutcomeError> {
        check_len::<Self>(values)?;
        Ok(Self {
            intercept: values[0],
            age: values[1],
            sex: values[2],
            gamma: values[3],
        })
    }

    fn to_vec(&self) -> Vec<f64> {
        vec![self.intercept, self.age, self.sex, self.gamma]
    }
}

macro_rules! vec_conversions {
    ($($group:ty),*) => {
        $(
            impl TryFrom<Vec<f64>> for $group {
                type Error = OutcomeError;

                fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
                    <$group as Coefficients>::from_slice(&values)
                }
            }

            impl From<$group> for Vec<f64> {
                fn from(group: $group) -> Self {
                    group.to_vec()
                }
            }
        )*
    };
}

vec_conversions!(LogisticCoefficients, GompertzCoefficients, ResourceCoefficients);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_layout_matches_field_order() {
        let values: Vec<f64> = (0..9).map(f64::from).collect();
        let lg = LogisticCoefficients::from_slice(&values).unwrap();
        assert_eq!(lg.constant, 0.0);
        assert_eq!(lg.sex, 2.0);
        assert_eq!(lg.mrs, [3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(lg.to_vec(), values);
        assert_eq!(LogisticCoefficients::num_coefficients(), 9);
    }

    #[test]
    fn gompertz_splits_interactions_from_constants() {
        let values: Vec<f64> = (0..16).map(f64::from).collect();
        let gz = GompertzCoefficients::from_slice(&values).unwrap();
        assert_eq!(gz.age_squared, 2.0);
        assert_eq!(gz.mrs_age[0], 4.0);
        assert_eq!(gz.mrs_age[5], 9.0);
        assert_eq!(gz.mrs[0], 10.0);
        assert_eq!(gz.mrs[5], 15.0);
        assert_eq!(gz.to_vec(), values);
    }

    #[test]
    fn short_slice_is_a_missing_coefficient() {
        let err = GompertzCoefficients::from_slice(&[0.0; 15]).unwrap_err();
        match err {
            OutcomeError::MissingCoefficient {
                group,
                expected,
                found,
            } => {
                assert_eq!(group, "gompertz");
                assert_eq!(expected, 16);
                assert_eq!(found, 15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_vectors_round_through_serde() {
        let rc: ResourceCoefficients = serde_json::from_str("[1.0, 2.0, 3.0, 0.5]").unwrap();
        assert_eq!(rc.gamma, 0.5);
        assert!(serde_json::from_str::<ResourceCoefficients>("[1.0, 2.0, 3.0]").is_err());
        assert_eq!(serde_json::to_string(&rc).unwrap(), "[1.0,2.0,3.0,0.5]");
    }
}

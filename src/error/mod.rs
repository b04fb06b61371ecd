use thiserror::Error;

/// Errors raised while building parameters, validating patients or exporting results
///
/// Domain edge cases of the outcome model itself (an mRS outside 0-5, a survival
/// target that cannot be reached, hazard saturation) are not errors; they are
/// encoded in the [`OutcomeRecord`](crate::engine::OutcomeRecord).
#[derive(Error, Debug)]
pub enum OutcomeError {
    /// The requested model variant is neither `per_mrs` nor `dichotomous`
    #[error("Unknown model variant: {name}")]
    UnknownVariant { name: String },

    /// A coefficient slice did not have the length its group requires
    #[error("Missing coefficient in {group}: expected {expected} values, found {found}")]
    MissingCoefficient {
        /// Name of the coefficient group
        group: &'static str,
        /// Number of coefficients the group needs
        expected: usize,
        /// Number of coefficients supplied
        found: usize,
    },

    /// A fixed input failed validation
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    /// Patient input outside the supported domain
    #[error("Invalid patient {field}: {value}")]
    InvalidPatient { field: &'static str, value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl OutcomeError {
    pub(crate) fn invalid_parameter(param: impl Into<String>, value: impl ToString) -> Self {
        OutcomeError::InvalidParameter {
            param: param.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = OutcomeError::MissingCoefficient {
            group: "logistic",
            expected: 9,
            found: 8,
        };
        assert_eq!(
            err.to_string(),
            "Missing coefficient in logistic: expected 9 values, found 8"
        );

        let err = OutcomeError::invalid_parameter("discount_qaly", -1.0);
        assert_eq!(err.to_string(), "Invalid parameter: discount_qaly = -1");
    }
}

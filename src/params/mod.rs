//! Parameter bundle: the fixed inputs of the outcome model
//!
//! Two variants share the same shape:
//!
//! | Variant | mRS resolution |
//! |---------|----------------|
//! | [`ModelVariant::PerMrs`] | one value per mRS 0-5 |
//! | [`ModelVariant::Dichotomous`] | independent (mRS 0-2) vs dependent (mRS 3-5) |
//!
//! The dichotomous bundle is derived from the per-mRS inputs, so calculation
//! code never needs to know which variant it is running.
//!
//! ```rust,ignore
//! use stroke_outcomes::params::{build_bundle, ModelVariant};
//!
//! let bundle = build_bundle(ModelVariant::PerMrs)?;
//! assert_eq!(bundle.horizon_years(), 50);
//! ```

mod coefficients;
mod destination;
mod dichotomous;
mod set;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::OutcomeError;

pub use coefficients::{
    Coefficients, GompertzCoefficients, LogisticCoefficients, ResourceCoefficients,
};
pub use destination::{CarePercentages, DestinationCounts, DischargeSplit};
pub use set::ParameterSet;

/// Number of valid mRS levels (0-5)
pub const MRS_LEVELS: usize = 6;

/// One value per mRS level
pub type MrsVector = [f64; MRS_LEVELS];

/// Resolution of the mRS terms in a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Separate terms for each mRS
    PerMrs,
    /// Terms collapsed to independent / dependent
    Dichotomous,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::PerMrs => "per_mrs",
            ModelVariant::Dichotomous => "dichotomous",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_mrs" => Ok(ModelVariant::PerMrs),
            "dichotomous" => Ok(ModelVariant::Dichotomous),
            other => Err(OutcomeError::UnknownVariant {
                name: other.to_string(),
            }),
        }
    }
}

/// Immutable, validated model inputs for one variant
///
/// Built by [`ParameterSet::build`] or [`build_bundle`]. For the dichotomous
/// variant the mRS vectors in [`ParameterBundle::inputs`] are already
/// collapsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterBundle {
    variant: ModelVariant,
    inputs: ParameterSet,
    care: CarePercentages,
}

impl ParameterBundle {
    fn new(variant: ModelVariant, inputs: ParameterSet, care: CarePercentages) -> Self {
        Self {
            variant,
            inputs,
            care,
        }
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// All fixed inputs (collapsed for the dichotomous variant)
    pub fn inputs(&self) -> &ParameterSet {
        &self.inputs
    }

    /// Derived probability of a residential-care destination
    pub fn care_percentages(&self) -> &CarePercentages {
        &self.care
    }

    pub fn horizon_years(&self) -> u32 {
        self.inputs.horizon_years
    }

    pub fn wtp_per_qaly(&self) -> f64 {
        self.inputs.wtp_per_qaly
    }

    /// QALY discount rate as a fraction
    pub fn qaly_discount_rate(&self) -> f64 {
        self.inputs.discount_qaly / 100.0
    }

    /// Cost discount rate as a fraction
    pub fn cost_discount_rate(&self) -> f64 {
        self.inputs.discount_cost / 100.0
    }
}

/// Build the bundle for a variant from the default fixed inputs
pub fn build_bundle(variant: ModelVariant) -> Result<ParameterBundle, OutcomeError> {
    ParameterSet::default().build(variant)
}

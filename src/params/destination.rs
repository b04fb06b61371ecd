//! Discharge-destination counts and the residential-care percentages derived from them

use serde::{Deserialize, Serialize};

use super::{ModelVariant, MrsVector, MRS_LEVELS};
use crate::error::OutcomeError;

/// Number of patients discharged to residential care and elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DischargeSplit {
    pub care: u32,
    pub not_care: u32,
}

impl DischargeSplit {
    pub const fn new(care: u32, not_care: u32) -> Self {
        Self { care, not_care }
    }

    /// `care / (care + not_care)`
    pub fn proportion(&self) -> f64 {
        self.care as f64 / (self.care as f64 + self.not_care as f64)
    }

    /// `care / not_care`
    pub fn odds(&self) -> f64 {
        self.care as f64 / self.not_care as f64
    }

    fn sum<'a>(splits: impl IntoIterator<Item = &'a DischargeSplit>) -> DischargeSplit {
        splits
            .into_iter()
            .fold(DischargeSplit::new(0, 0), |acc, s| {
                DischargeSplit::new(acc.care + s.care, acc.not_care + s.not_care)
            })
    }
}

/// Discharge-destination counts
///
/// `per_mrs` covers every mRS; the age cohorts only cover mRS 3-5, which is
/// where the residential-care rate depends on age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationCounts {
    pub per_mrs: [DischargeSplit; MRS_LEVELS],
    /// Patients older than 70, mRS 3-5
    pub over70: [DischargeSplit; 3],
    /// Patients aged 70 or younger, mRS 3-5
    pub not_over70: [DischargeSplit; 3],
}

/// Probability of a residential-care destination by age group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarePercentages {
    pub over70: MrsVector,
    pub not_over70: MrsVector,
}

impl CarePercentages {
    /// Percentages for a patient of the given age (`age > 70` selects the older cohort)
    pub fn for_age(&self, age: u32) -> &MrsVector {
        if age > 70 {
            &self.over70
        } else {
            &self.not_over70
        }
    }
}

impl DestinationCounts {
    pub(crate) fn validate(&self) -> Result<(), OutcomeError> {
        for (mrs, split) in self.per_mrs.iter().enumerate() {
            if split.care + split.not_care == 0 {
                return Err(OutcomeError::invalid_parameter(
                    format!("destinations.per_mrs[{mrs}]"),
                    "0/0",
                ));
            }
        }
        for (name, cohort) in [("over70", &self.over70), ("not_over70", &self.not_over70)] {
            for (i, split) in cohort.iter().enumerate() {
                if split.not_care == 0 {
                    return Err(OutcomeError::invalid_parameter(
                        format!("destinations.{name}[{i}].not_care"),
                        0,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Derive residential-care percentages for a model variant
    ///
    /// mRS 0-2 use the share of all discharges (`care / (care + not_care)`);
    /// mRS 3-5 use the cohort ratio `care / not_care`. The dichotomous variant
    /// pools the counts of each group before taking the same ratios.
    pub fn care_percentages(&self, variant: ModelVariant) -> CarePercentages {
        match variant {
            ModelVariant::PerMrs => CarePercentages {
                over70: self.per_mrs_vector(&self.over70),
                not_over70: self.per_mrs_vector(&self.not_over70),
            },
            ModelVariant::Dichotomous => {
                let independent = DischargeSplit::sum(&self.per_mrs[..3]).proportion();
                let pooled = |cohort: &[DischargeSplit; 3]| -> MrsVector {
                    let dependent = DischargeSplit::sum(cohort).odds();
                    [
                        independent,
                        independent,
                        independent,
                        dependent,
                        dependent,
                        dependent,
                    ]
                };
                CarePercentages {
                    over70: pooled(&self.over70),
                    not_over70: pooled(&self.not_over70),
                }
            }
        }
    }

    fn per_mrs_vector(&self, cohort: &[DischargeSplit; 3]) -> MrsVector {
        let mut pct = [0.0; MRS_LEVELS];
        for (mrs, value) in pct.iter_mut().enumerate() {
            *value = if mrs < 3 {
                self.per_mrs[mrs].proportion()
            } else {
                cohort[mrs - 3].odds()
            };
        }
        pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn counts() -> DestinationCounts {
        DestinationCounts {
            per_mrs: [
                DischargeSplit::new(10, 90),
                DischargeSplit::new(20, 80),
                DischargeSplit::new(30, 70),
                DischargeSplit::new(1, 1),
                DischargeSplit::new(1, 1),
                DischargeSplit::new(1, 1),
            ],
            over70: [
                DischargeSplit::new(10, 40),
                DischargeSplit::new(20, 40),
                DischargeSplit::new(30, 20),
            ],
            not_over70: [
                DischargeSplit::new(5, 95),
                DischargeSplit::new(10, 90),
                DischargeSplit::new(15, 85),
            ],
        }
    }

    #[test]
    fn per_mrs_mixes_proportions_and_odds() {
        let pct = counts().care_percentages(ModelVariant::PerMrs);
        assert_relative_eq!(pct.over70[0], 0.1);
        assert_relative_eq!(pct.over70[2], 0.3);
        assert_relative_eq!(pct.over70[3], 0.25);
        assert_relative_eq!(pct.over70[5], 1.5);
        // mRS 0-2 do not depend on the cohort
        assert_eq!(pct.not_over70[..3], pct.over70[..3]);
        assert_relative_eq!(pct.not_over70[4], 10.0 / 90.0);
    }

    #[test]
    fn dichotomous_pools_each_group() {
        let pct = counts().care_percentages(ModelVariant::Dichotomous);
        assert_relative_eq!(pct.over70[0], 60.0 / 300.0);
        assert!(pct.over70[..3].iter().all(|&v| v == pct.over70[0]));
        assert_relative_eq!(pct.over70[3], 60.0 / 100.0);
        assert!(pct.over70[3..].iter().all(|&v| v == pct.over70[3]));
        assert_relative_eq!(pct.not_over70[5], 30.0 / 270.0);
    }

    #[test]
    fn age_cut_point_is_strictly_over_seventy() {
        let pct = counts().care_percentages(ModelVariant::PerMrs);
        assert_eq!(pct.for_age(70), &pct.not_over70);
        assert_eq!(pct.for_age(71), &pct.over70);
    }

    #[test]
    fn empty_cohort_fails_validation() {
        let mut c = counts();
        c.over70[1] = DischargeSplit::new(3, 0);
        assert!(c.validate().is_err());
    }
}

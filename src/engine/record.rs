//! Outcome record produced for one patient at one mRS

use serde::{Deserialize, Serialize};

use crate::mortality::{MortalityTable, SurvivalStats};
use crate::params::ModelVariant;
use crate::patient::Sex;
use crate::qaly::QalyStream;
use crate::resource::ResourceUse;

/// Whether a record holds computed outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Valid,
    /// mRS outside 0-5: sequences are empty and scalars undefined
    OutOfDomain,
}

/// Lifetime outcomes for one patient at one mRS
///
/// Plain data: every field is public and nothing is formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub kind: OutcomeKind,
    pub variant: ModelVariant,
    pub age: u32,
    pub sex: Sex,
    pub mrs: usize,

    /// Year-one linear predictor
    pub lp1: f64,
    /// Year-one probability of death
    pub p1: f64,
    /// Gompertz linear predictor
    pub lp_h: f64,
    pub mortality: MortalityTable,
    pub survival: SurvivalStats,

    pub qaly: QalyStream,
    pub resources: ResourceUse,
    /// `wtp_per_qaly · total QALY − total discounted cost`
    pub net_benefit: f64,
}

impl OutcomeRecord {
    /// Record for an mRS the model does not cover
    pub fn out_of_domain(variant: ModelVariant, age: u32, sex: Sex, mrs: usize) -> Self {
        Self {
            kind: OutcomeKind::OutOfDomain,
            variant,
            age,
            sex,
            mrs,
            lp1: f64::NAN,
            p1: f64::NAN,
            lp_h: f64::NAN,
            mortality: MortalityTable::empty(),
            survival: SurvivalStats::undefined(),
            qaly: QalyStream::undefined(),
            resources: ResourceUse::undefined(),
            net_benefit: f64::NAN,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind == OutcomeKind::Valid
    }

    /// Outcome label: the mRS, its dichotomous group, or `n/a`
    pub fn label(&self) -> String {
        match (self.kind, self.variant) {
            (OutcomeKind::OutOfDomain, _) => "n/a".to_string(),
            (OutcomeKind::Valid, ModelVariant::PerMrs) => format!("mRS {}", self.mrs),
            (OutcomeKind::Valid, ModelVariant::Dichotomous) if self.mrs < 3 => {
                "Independent (mRS 0-2)".to_string()
            }
            (OutcomeKind::Valid, ModelVariant::Dichotomous) => {
                "Dependent (mRS 3-5)".to_string()
            }
        }
    }

    pub fn median_survival(&self) -> f64 {
        self.survival.median
    }

    pub fn total_qaly(&self) -> f64 {
        self.qaly.total
    }

    pub fn total_cost(&self) -> f64 {
        self.resources.total_cost
    }
}

//! Resource use and costs up to median survival
//!
//! Each model gives a cumulative count since discharge. Yearly counts are the
//! first differences of that count over years `1..=⌈m⌉`, where the last year
//! stops at the fractional median `m`. Year `i` is discounted by
//! `(1 + d)^(i − 1)` and priced at the resource's unit cost.

mod models;

use serde::{Deserialize, Serialize};

use crate::params::ParameterBundle;
use crate::patient::Patient;
use crate::qaly::year_count;

pub use models::{
    resource_lp, CumulativeUse, LinearCareTime, LogLogisticCount, WeibullCount, CARE_OCCUPANCY,
};

/// Categories of post-discharge resource use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Accident & emergency attendances
    AccidentEmergency,
    /// Non-elective hospital bed days
    NonElectiveBedDays,
    /// Elective hospital bed days
    ElectiveBedDays,
    /// Years in residential care
    ResidentialCare,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::AccidentEmergency,
        ResourceKind::NonElectiveBedDays,
        ResourceKind::ElectiveBedDays,
        ResourceKind::ResidentialCare,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::AccidentEmergency => "ae",
            ResourceKind::NonElectiveBedDays => "nel",
            ResourceKind::ElectiveBedDays => "el",
            ResourceKind::ResidentialCare => "care",
        }
    }

    /// Cost of one unit of the count; residential care is counted in years
    pub fn unit_cost(&self, bundle: &ParameterBundle) -> f64 {
        let inputs = bundle.inputs();
        match self {
            ResourceKind::AccidentEmergency => inputs.unit_cost_ae,
            ResourceKind::NonElectiveBedDays => inputs.unit_cost_nel_day,
            ResourceKind::ElectiveBedDays => inputs.unit_cost_el_day,
            ResourceKind::ResidentialCare => inputs.unit_cost_care_day * 365.0,
        }
    }
}

/// Yearly counts since discharge, by first differences of a cumulative model
///
/// Entry `i - 1` holds year `i`; the final entry ends at `median`.
pub fn yearly_counts(model: &dyn CumulativeUse, median: f64) -> Vec<f64> {
    let years = year_count(median);
    (1..=years)
        .map(|i| {
            let end = if i < years { i as f64 } else { median };
            model.cumulative(end) - model.cumulative((i - 1) as f64)
        })
        .collect()
}

/// Yearly and total use of one resource, discounted and priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStream {
    pub kind: ResourceKind,
    /// Count in each year since discharge (entry 0 is year 1)
    pub counts: Vec<f64>,
    pub discounted_counts: Vec<f64>,
    pub discounted_costs: Vec<f64>,
    /// Undiscounted count up to the median
    pub total_count: f64,
    pub total_discounted_count: f64,
    pub total_discounted_cost: f64,
}

impl ResourceStream {
    pub fn project(
        kind: ResourceKind,
        model: &dyn CumulativeUse,
        median: f64,
        bundle: &ParameterBundle,
    ) -> Self {
        let rate = bundle.cost_discount_rate();
        let unit_cost = kind.unit_cost(bundle);

        let counts = yearly_counts(model, median);
        let discounted_counts: Vec<f64> = counts
            .iter()
            .enumerate()
            .map(|(i, count)| count / (1.0 + rate).powi(i as i32))
            .collect();
        let discounted_costs: Vec<f64> =
            discounted_counts.iter().map(|c| c * unit_cost).collect();

        Self {
            kind,
            total_count: counts.iter().sum(),
            total_discounted_count: discounted_counts.iter().sum(),
            total_discounted_cost: discounted_costs.iter().sum(),
            counts,
            discounted_counts,
            discounted_costs,
        }
    }

    pub fn undefined(kind: ResourceKind) -> Self {
        Self {
            kind,
            counts: Vec::new(),
            discounted_counts: Vec::new(),
            discounted_costs: Vec::new(),
            total_count: f64::NAN,
            total_discounted_count: f64::NAN,
            total_discounted_cost: f64::NAN,
        }
    }
}

/// The four resource streams of one patient and their total discounted cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUse {
    pub accident_emergency: ResourceStream,
    pub non_elective: ResourceStream,
    pub elective: ResourceStream,
    pub residential_care: ResourceStream,
    pub total_cost: f64,
}

impl ResourceUse {
    pub fn project(patient: &Patient, mrs: usize, median: f64, bundle: &ParameterBundle) -> Self {
        let accident_emergency = ResourceStream::project(
            ResourceKind::AccidentEmergency,
            &WeibullCount::accident_emergency(patient, mrs, bundle),
            median,
            bundle,
        );
        let non_elective = ResourceStream::project(
            ResourceKind::NonElectiveBedDays,
            &LogLogisticCount::non_elective(patient, mrs, bundle),
            median,
            bundle,
        );
        let elective = ResourceStream::project(
            ResourceKind::ElectiveBedDays,
            &LogLogisticCount::elective(patient, mrs, bundle),
            median,
            bundle,
        );
        let residential_care = ResourceStream::project(
            ResourceKind::ResidentialCare,
            &LinearCareTime::residential(patient, mrs, bundle),
            median,
            bundle,
        );
        let total_cost = accident_emergency.total_discounted_cost
            + non_elective.total_discounted_cost
            + elective.total_discounted_cost
            + residential_care.total_discounted_cost;

        Self {
            accident_emergency,
            non_elective,
            elective,
            residential_care,
            total_cost,
        }
    }

    pub fn undefined() -> Self {
        Self {
            accident_emergency: ResourceStream::undefined(ResourceKind::AccidentEmergency),
            non_elective: ResourceStream::undefined(ResourceKind::NonElectiveBedDays),
            elective: ResourceStream::undefined(ResourceKind::ElectiveBedDays),
            residential_care: ResourceStream::undefined(ResourceKind::ResidentialCare),
            total_cost: f64::NAN,
        }
    }

    /// Streams in [`ResourceKind::ALL`] order
    pub fn streams(&self) -> [&ResourceStream; 4] {
        [
            &self.accident_emergency,
            &self.non_elective,
            &self.elective,
            &self.residential_care,
        ]
    }

    pub fn stream(&self, kind: ResourceKind) -> &ResourceStream {
        match kind {
            ResourceKind::AccidentEmergency => &self.accident_emergency,
            ResourceKind::NonElectiveBedDays => &self.non_elective,
            ResourceKind::ElectiveBedDays => &self.elective,
            ResourceKind::ResidentialCare => &self.residential_care,
        }
    }
}

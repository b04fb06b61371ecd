//! Outcome engine
//!
//! [`compute`] runs the mortality sweep, survival inversion, QALY accumulation
//! and resource projection for one patient at one mRS. It is a pure function
//! of its inputs and the bundle, so calls are independent and may run in
//! parallel; [`compute_population`] does exactly that.
//!
//! ```rust,ignore
//! use stroke_outcomes::prelude::*;
//!
//! let bundle = build_bundle(ModelVariant::PerMrs)?;
//! let patient = Patient::new(73, Sex::Male)?;
//! let records = compute_all_mrs(&patient, &bundle);
//! println!("{}: median {:.2} years", records[0].label(), records[0].median_survival());
//! ```

mod export;
mod record;

use rayon::prelude::*;

use crate::mortality::{MortalityModel, SurvivalStats};
use crate::params::{ParameterBundle, MRS_LEVELS};
use crate::patient::Patient;
use crate::qaly::QalyStream;
use crate::resource::ResourceUse;

pub use export::summary_csv;
pub use record::{OutcomeKind, OutcomeRecord};

/// Lifetime outcomes for a patient at `mrs`
///
/// An `mrs` outside 0-5 yields an [`OutcomeKind::OutOfDomain`] record.
pub fn compute(patient: &Patient, mrs: usize, bundle: &ParameterBundle) -> OutcomeRecord {
    let Some(model) = MortalityModel::new(patient, mrs, bundle) else {
        tracing::warn!(mrs, "mRS outside 0-5, returning an out-of-domain record");
        return OutcomeRecord::out_of_domain(
            bundle.variant(),
            patient.age(),
            patient.sex(),
            mrs,
        );
    };

    let mortality = model.table(bundle.horizon_years());
    let survival = SurvivalStats::from_model(&model, patient.age_f64());
    let qaly = QalyStream::accumulate(patient, mrs, survival.median, bundle);
    let resources = ResourceUse::project(patient, mrs, survival.median, bundle);
    let net_benefit = bundle.wtp_per_qaly() * qaly.total - resources.total_cost;

    tracing::debug!(
        age = patient.age(),
        sex = %patient.sex(),
        mrs,
        median = survival.median,
        qaly = qaly.total,
        cost = resources.total_cost,
        "computed outcome record"
    );

    OutcomeRecord {
        kind: OutcomeKind::Valid,
        variant: bundle.variant(),
        age: patient.age(),
        sex: patient.sex(),
        mrs,
        lp1: model.lp1(),
        p1: model.p1(),
        lp_h: model.lp_h(),
        mortality,
        survival,
        qaly,
        resources,
        net_benefit,
    }
}

/// Outcomes for a patient at every mRS, indexed by mRS
pub fn compute_all_mrs(
    patient: &Patient,
    bundle: &ParameterBundle,
) -> [OutcomeRecord; MRS_LEVELS] {
    std::array::from_fn(|mrs| compute(patient, mrs, bundle))
}

/// Outcomes for many `(patient, mrs)` pairs, computed in parallel
///
/// Results are returned in input order.
pub fn compute_population(
    cases: &[(Patient, usize)],
    bundle: &ParameterBundle,
) -> Vec<OutcomeRecord> {
    cases
        .par_iter()
        .map(|(patient, mrs)| compute(patient, *mrs, bundle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{build_bundle, ModelVariant};
    use crate::patient::Sex;
    use approx::assert_relative_eq;

    #[test]
    fn net_benefit_combines_qaly_and_cost() {
        let bundle = build_bundle(ModelVariant::PerMrs).unwrap();
        let patient = Patient::new(68, Sex::Female).unwrap();
        let record = compute(&patient, 3, &bundle);
        assert!(record.is_valid());
        assert_relative_eq!(
            record.net_benefit,
            20_000.0 * record.total_qaly() - record.total_cost(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn out_of_domain_record_is_empty_and_undefined() {
        let bundle = build_bundle(ModelVariant::PerMrs).unwrap();
        let patient = Patient::new(73, Sex::Male).unwrap();
        let record = compute(&patient, 6, &bundle);
        assert_eq!(record.kind, OutcomeKind::OutOfDomain);
        assert_eq!(record.label(), "n/a");
        assert!(record.mortality.is_empty());
        assert!(record.qaly.raw.is_empty());
        assert!(record.resources.accident_emergency.counts.is_empty());
        assert!(record.p1.is_nan());
        assert!(record.survival.median.is_nan());
        assert!(record.net_benefit.is_nan());
    }

    #[test]
    fn all_mrs_are_indexed_by_mrs() {
        let bundle = build_bundle(ModelVariant::PerMrs).unwrap();
        let patient = Patient::new(73, Sex::Male).unwrap();
        let records = compute_all_mrs(&patient, &bundle);
        for (mrs, record) in records.iter().enumerate() {
            assert_eq!(record.mrs, mrs);
            assert_eq!(record.label(), format!("mRS {mrs}"));
        }
    }

    #[test]
    fn population_preserves_order() {
        let bundle = build_bundle(ModelVariant::Dichotomous).unwrap();
        let cases: Vec<(Patient, usize)> = (45..=90)
            .step_by(5)
            .map(|age| (Patient::new(age, Sex::Male).unwrap(), (age as usize) % 6))
            .collect();
        let records = compute_population(&cases, &bundle);
        assert_eq!(records.len(), cases.len());
        for ((patient, mrs), record) in cases.iter().zip(&records) {
            assert_eq!(record.age, patient.age());
            assert_eq!(record.mrs, *mrs);
            assert_eq!(record, &compute(patient, *mrs, &bundle));
        }
    }
}

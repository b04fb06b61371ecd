//! Properties that hold for every patient in the supported domain

use approx::assert_relative_eq;
use stroke_outcomes::patient::{MAX_AGE, MIN_AGE};
use stroke_outcomes::prelude::*;
use stroke_outcomes::resource::{CumulativeUse, LinearCareTime, LogLogisticCount, WeibullCount};

fn grid() -> impl Iterator<Item = Patient> {
    (MIN_AGE..=MAX_AGE).flat_map(|age| {
        [Sex::Female, Sex::Male]
            .into_iter()
            .map(move |sex| Patient::new(age, sex).expect("age within range"))
    })
}

fn bundles() -> [ParameterBundle; 2] {
    [
        build_bundle(ModelVariant::PerMrs).expect("per-mRS bundle"),
        build_bundle(ModelVariant::Dichotomous).expect("dichotomous bundle"),
    ]
}

#[test]
fn mortality_tables_are_well_formed() {
    for bundle in bundles() {
        for patient in grid() {
            for record in compute_all_mrs(&patient, &bundle) {
                let m = &record.mortality;
                assert_eq!(m.len(), 51);
                assert_eq!(m.survival[0], 1.0);
                assert_eq!(m.death_probability[0], Some(0.0));
                for t in 0..m.len() {
                    assert!((0.0..=1.0).contains(&m.cumulative_death[t]));
                    assert!((0.0..=1.0).contains(&m.survival[t]));
                    if t > 0 {
                        assert!(m.survival[t] <= m.survival[t - 1]);
                    }
                }

                let invalid = m
                    .first_invalid_year
                    .expect("hazard saturates within fifty years") as usize;
                for t in invalid..m.len() {
                    assert_eq!(m.survival[t], 0.0);
                }
                for t in (invalid + 1)..m.len() {
                    assert_eq!(m.death_probability[t], None);
                }
                for t in 0..=invalid {
                    assert!(m.death_probability[t].is_some());
                }
            }
        }
    }
}

#[test]
fn median_survival_does_not_increase_with_disability() {
    for bundle in bundles() {
        for patient in grid() {
            let records = compute_all_mrs(&patient, &bundle);
            for mrs in 1..records.len() {
                assert!(
                    records[mrs].survival.median <= records[mrs - 1].survival.median,
                    "{:?} mRS {mrs} under {}",
                    patient,
                    bundle.variant()
                );
            }
            for record in &records {
                let s = record.survival;
                assert!(s.median > 0.0);
                assert!(s.lower_quartile <= s.median && s.median <= s.upper_quartile);
            }
        }
    }
}

#[test]
fn utilities_and_net_benefit_are_consistent() {
    for bundle in bundles() {
        for patient in grid() {
            for record in compute_all_mrs(&patient, &bundle) {
                assert!(record.qaly.raw.iter().all(|u| *u <= 1.0));
                assert!(record.total_qaly() >= 0.0);
                assert_eq!(record.qaly.raw.len(), record.survival.median.ceil() as usize);

                let costs: f64 = record
                    .resources
                    .streams()
                    .iter()
                    .map(|s| s.total_discounted_cost)
                    .sum();
                assert_relative_eq!(record.total_cost(), costs, max_relative = 1e-12);
                assert_relative_eq!(
                    record.net_benefit,
                    bundle.wtp_per_qaly() * record.total_qaly() - record.total_cost(),
                    max_relative = 1e-12,
                    epsilon = 1e-9
                );
            }
        }
    }
}

#[test]
fn yearly_counts_add_up_to_the_cumulative_model() {
    for bundle in bundles() {
        for patient in grid() {
            for mrs in 0..6 {
                let record = compute(&patient, mrs, &bundle);
                let median = record.survival.median;
                let models: [(ResourceKind, Box<dyn CumulativeUse>); 4] = [
                    (
                        ResourceKind::AccidentEmergency,
                        Box::new(WeibullCount::accident_emergency(&patient, mrs, &bundle)),
                    ),
                    (
                        ResourceKind::NonElectiveBedDays,
                        Box::new(LogLogisticCount::non_elective(&patient, mrs, &bundle)),
                    ),
                    (
                        ResourceKind::ElectiveBedDays,
                        Box::new(LogLogisticCount::elective(&patient, mrs, &bundle)),
                    ),
                    (
                        ResourceKind::ResidentialCare,
                        Box::new(LinearCareTime::residential(&patient, mrs, &bundle)),
                    ),
                ];
                for (kind, model) in models {
                    let stream = record.resources.stream(kind);
                    assert!(stream.counts.iter().all(|c| *c >= 0.0));
                    assert_relative_eq!(
                        stream.total_count,
                        model.cumulative(median),
                        max_relative = 1e-9
                    );
                    assert!(stream.total_discounted_count <= stream.total_count);
                }
            }
        }
    }
}

#[test]
fn dichotomous_groups_share_outcomes() {
    let bundle = build_bundle(ModelVariant::Dichotomous).expect("dichotomous bundle");
    for patient in grid() {
        let records = compute_all_mrs(&patient, &bundle);
        for group in [0..3, 3..6] {
            let first = &records[group.start];
            for record in &records[group] {
                assert_eq!(record.p1, first.p1);
                assert_eq!(record.survival, first.survival);
                assert_eq!(record.qaly, first.qaly);
                assert_eq!(record.resources, first.resources);
                assert_eq!(record.label(), first.label());
            }
        }
    }
}

#[test]
fn change_tables_follow_their_records() {
    let bundle = build_bundle(ModelVariant::PerMrs).expect("per-mRS bundle");
    for patient in grid() {
        let records = compute_all_mrs(&patient, &bundle);
        let tables = ChangeTables::from_records(&records);
        for (r, c, value) in tables.qaly.populated() {
            assert!(c < r);
            assert_eq!(
                value,
                records[c].total_qaly() - records[r].total_qaly()
            );
        }
        for (r, c, value) in tables.cost.populated() {
            assert_eq!(
                value,
                records[r].total_cost() - records[c].total_cost()
            );
        }
        assert_eq!(tables.net_benefit.populated().count(), 15);
    }
}

#[test]
fn population_matches_single_records() {
    let bundle = build_bundle(ModelVariant::PerMrs).expect("per-mRS bundle");
    let cases: Vec<(Patient, usize)> = grid()
        .enumerate()
        .map(|(i, patient)| (patient, i % 7))
        .collect();
    let records = compute_population(&cases, &bundle);
    assert_eq!(records.len(), cases.len());
    for ((patient, mrs), record) in cases.iter().zip(&records) {
        assert_eq!(record.age, patient.age());
        assert_eq!(record.mrs, *mrs);
        if *mrs < 6 {
            assert_eq!(*record, compute(patient, *mrs, &bundle));
        } else {
            assert_eq!(record.kind, OutcomeKind::OutOfDomain);
        }
    }
}

//! Lifetime outcomes after stroke
//!
//! Given a patient's age, sex and modified Rankin Scale (mRS) score at
//! discharge, the engine produces a yearly mortality trajectory, survival
//! statistics, discounted QALYs, discounted resource use and costs, and net
//! benefit, for that mRS and for every other mRS so outcomes can be compared.
//!
//! ```rust,ignore
//! use stroke_outcomes::prelude::*;
//!
//! let bundle = build_bundle(ModelVariant::PerMrs)?;
//! let patient = Patient::new(73, Sex::Male)?;
//! let records = compute_all_mrs(&patient, &bundle);
//! let tables = ChangeTables::from_records(&records);
//! ```

pub mod compare;
pub mod engine;
pub mod error;
pub mod mortality;
pub mod params;
pub mod patient;
pub mod qaly;
pub mod resource;

pub use compare::{build_change_table, ChangeCell, ChangeMode, ChangeTable, ChangeTables};
pub use engine::{compute, compute_all_mrs, compute_population, OutcomeKind, OutcomeRecord};
pub use error::OutcomeError;
pub use params::{build_bundle, ModelVariant, ParameterBundle, ParameterSet};
pub use patient::{Patient, Sex};

pub mod prelude {
    pub use crate::compare::{
        build_change_table, ChangeCell, ChangeMode, ChangeTable, ChangeTables,
    };
    pub use crate::engine::{
        compute, compute_all_mrs, compute_population, summary_csv, OutcomeKind, OutcomeRecord,
    };
    pub use crate::error::OutcomeError;
    pub use crate::mortality::{MortalityModel, MortalityTable, SurvivalStats};
    pub use crate::params::{build_bundle, ModelVariant, ParameterBundle, ParameterSet};
    pub use crate::patient::{Patient, Sex};
    pub use crate::resource::{ResourceKind, ResourceStream, ResourceUse};
}

//! Plain-data exports of outcome records
//!
//! Values are written at full precision; rounding and layout belong to the
//! consumer.

use csv::WriterBuilder;

use super::record::OutcomeRecord;
use crate::error::OutcomeError;

impl OutcomeRecord {
    /// Named scalar outcomes in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, f64)> {
        let r = &self.resources;
        vec![
            ("lp1", self.lp1),
            ("p1", self.p1),
            ("lp_h", self.lp_h),
            ("median", self.survival.median),
            ("lower_quartile", self.survival.lower_quartile),
            ("upper_quartile", self.survival.upper_quartile),
            ("life_expectancy", self.survival.life_expectancy),
            ("t_zero_survival", self.survival.t_zero_survival),
            ("total_qaly", self.qaly.total),
            ("ae_cost", r.accident_emergency.total_discounted_cost),
            ("nel_cost", r.non_elective.total_discounted_cost),
            ("el_cost", r.elective.total_discounted_cost),
            ("care_cost", r.residential_care.total_discounted_cost),
            ("total_cost", r.total_cost),
            ("net_benefit", self.net_benefit),
        ]
    }

    /// Year-by-year mortality table as CSV
    ///
    /// Columns: `year,hazard,cumulative_death,survival,death_probability`; the
    /// death probability is left empty once the hazard has saturated.
    pub fn mortality_csv(&self) -> Result<String, OutcomeError> {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
        writer.write_record([
            "year",
            "hazard",
            "cumulative_death",
            "survival",
            "death_probability",
        ])?;
        let m = &self.mortality;
        for i in 0..m.len() {
            writer.write_record([
                m.years[i].to_string(),
                m.hazard[i].to_string(),
                m.cumulative_death[i].to_string(),
                m.survival[i].to_string(),
                m.death_probability[i]
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
            ])?;
        }
        finish(writer)
    }
}

/// One CSV row per record: identification columns followed by [`OutcomeRecord::to_params`]
pub fn summary_csv(records: &[OutcomeRecord]) -> Result<String, OutcomeError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let mut header = vec!["variant", "age", "sex", "mrs", "outcome"];
    header.extend(first.to_params().into_iter().map(|(name, _)| name));
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.variant.to_string(),
            record.age.to_string(),
            record.sex.code().to_string(),
            record.mrs.to_string(),
            record.label(),
        ];
        row.extend(
            record
                .to_params()
                .into_iter()
                .map(|(_, value)| value.to_string()),
        );
        writer.write_record(&row)?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, OutcomeError> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

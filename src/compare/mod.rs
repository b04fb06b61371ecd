//! Change-in-outcome tables across mRS
//!
//! Each table is 6×6 and lower-triangular: cell `[r, c]` with `c < r` holds
//! the change from moving a patient from mRS `r` to mRS `c`.
//!
//! | Mode | Cell `[r, c]` |
//! |------|---------------|
//! | [`ChangeMode::Qaly`] | `qaly[c] − qaly[r]` |
//! | [`ChangeMode::Cost`] | `cost[r] − cost[c]` |
//! | [`ChangeMode::NetBenefit`] | `net_benefit[c] − net_benefit[r]` |
//!
//! Costs are differenced the other way round so that every populated cell
//! reads as a gain. Diagonal and upper-triangle cells are kept distinct from
//! numeric cells.

use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::engine::OutcomeRecord;
use crate::error::OutcomeError;
use crate::params::{MrsVector, MRS_LEVELS};

/// Which outcome a change table compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeMode {
    Qaly,
    Cost,
    NetBenefit,
}

impl FromStr for ChangeMode {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qaly" => Ok(ChangeMode::Qaly),
            "cost" => Ok(ChangeMode::Cost),
            "net_benefit" => Ok(ChangeMode::NetBenefit),
            other => Err(OutcomeError::invalid_parameter("change_mode", other)),
        }
    }
}

/// A cell of a change table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChangeCell {
    /// Change from the row mRS to the column mRS
    Value(f64),
    /// Row and column are the same mRS
    Diagonal,
    /// Upper triangle
    Empty,
}

impl ChangeCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            ChangeCell::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Lower-triangular table of outcome changes between mRS levels
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTable {
    pub mode: ChangeMode,
    pub cells: Array2<ChangeCell>,
}

impl ChangeTable {
    pub fn get(&self, row: usize, col: usize) -> ChangeCell {
        self.cells[[row, col]]
    }

    /// `(row, col, value)` for every numeric cell, row-major
    pub fn populated(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((r, c), cell)| cell.value().map(|v| (r, c, v)))
    }
}

/// Build a change table from one value per mRS
pub fn build_change_table(values: &MrsVector, mode: ChangeMode) -> ChangeTable {
    let cells = Array2::from_shape_fn((MRS_LEVELS, MRS_LEVELS), |(r, c)| {
        if c == r {
            ChangeCell::Diagonal
        } else if c > r {
            ChangeCell::Empty
        } else {
            ChangeCell::Value(match mode {
                ChangeMode::Qaly | ChangeMode::NetBenefit => values[c] - values[r],
                ChangeMode::Cost => values[r] - values[c],
            })
        }
    });
    ChangeTable { mode, cells }
}

/// The three change tables for one patient
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTables {
    pub qaly: ChangeTable,
    pub cost: ChangeTable,
    pub net_benefit: ChangeTable,
}

impl ChangeTables {
    /// Build from records indexed by mRS (as returned by `compute_all_mrs`)
    pub fn from_records(records: &[OutcomeRecord; MRS_LEVELS]) -> Self {
        let pick = |f: fn(&OutcomeRecord) -> f64| -> MrsVector {
            std::array::from_fn(|mrs| f(&records[mrs]))
        };
        Self {
            qaly: build_change_table(&pick(OutcomeRecord::total_qaly), ChangeMode::Qaly),
            cost: build_change_table(&pick(OutcomeRecord::total_cost), ChangeMode::Cost),
            net_benefit: build_change_table(&pick(|r| r.net_benefit), ChangeMode::NetBenefit),
        }
    }

    pub fn table(&self, mode: ChangeMode) -> &ChangeTable {
        match mode {
            ChangeMode::Qaly => &self.qaly,
            ChangeMode::Cost => &self.cost,
            ChangeMode::NetBenefit => &self.net_benefit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: MrsVector = [10.0, 8.0, 5.0, 3.0, 1.5, 0.5];

    #[test]
    fn only_lower_triangle_is_populated() {
        let table = build_change_table(&VALUES, ChangeMode::Qaly);
        for r in 0..MRS_LEVELS {
            for c in 0..MRS_LEVELS {
                match table.get(r, c) {
                    ChangeCell::Value(_) => assert!(c < r),
                    ChangeCell::Diagonal => assert_eq!(c, r),
                    ChangeCell::Empty => assert!(c > r),
                }
            }
        }
        assert_eq!(table.populated().count(), 15);
    }

    #[test]
    fn sign_conventions() {
        let qaly = build_change_table(&VALUES, ChangeMode::Qaly);
        assert_eq!(qaly.get(2, 1), ChangeCell::Value(3.0));
        let cost = build_change_table(&VALUES, ChangeMode::Cost);
        assert_eq!(cost.get(2, 1), ChangeCell::Value(-3.0));
        let nb = build_change_table(&VALUES, ChangeMode::NetBenefit);
        assert_eq!(nb.get(5, 0), ChangeCell::Value(9.5));
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("cost".parse::<ChangeMode>().unwrap(), ChangeMode::Cost);
        assert_eq!(
            "net_benefit".parse::<ChangeMode>().unwrap(),
            ChangeMode::NetBenefit
        );
        assert!("utility".parse::<ChangeMode>().is_err());
    }
}

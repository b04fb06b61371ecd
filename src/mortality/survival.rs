//! Inverting the mortality model for survival times

use serde::{Deserialize, Serialize};

use super::{MortalityModel, DAYS_PER_YEAR};

/// Returned when a survival target cannot be reached
pub const UNREACHABLE: f64 = -1.0;

/// How a target probability maps onto the Gompertz hazard scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// `q' = (1 + q)/(1 + p1) − 1`
    AfterYearOne,
    /// `q' = q`
    Direct,
}

impl MortalityModel {
    /// Years since discharge at which the cumulative probability of death reaches `q`
    ///
    /// Beyond year one the target is rescaled by the year-one probability and the
    /// Gompertz hazard is solved for it; within year one a constant daily
    /// hazard of `ln(1 − p1)/365` is assumed. The year-one solution is used
    /// whenever the Gompertz solution does not exceed one year.
    ///
    /// Returns [`UNREACHABLE`] when neither solution is finite.
    pub fn survival_time(&self, q: f64) -> f64 {
        self.find_survival_time(q, Target::AfterYearOne)
    }

    /// Years since discharge at which survival reaches zero
    ///
    /// The hazard is solved for 1 without rescaling by `p1`.
    pub fn time_to_zero_survival(&self) -> f64 {
        self.find_survival_time(1.0, Target::Direct)
    }

    /// Continuous cumulative probability of death that [`Self::survival_time`] inverts
    ///
    /// Within year one this is `1 − (1 − p1)^t`; afterwards
    /// `(1 + H(t))·(1 + p1) − 1`. The yearly table composes hazards as
    /// `1 − (1 − H)(1 − p1)`, which differs from this curve by a term of order
    /// `p1·H`.
    pub fn inverted_cumulative_death(&self, years: f64) -> f64 {
        if years <= 1.0 {
            1.0 - (1.0 - self.p1).powf(years)
        } else {
            (1.0 + self.cumulative_hazard(years)) * (1.0 + self.p1) - 1.0
        }
    }

    fn find_survival_time(&self, q: f64, target: Target) -> f64 {
        let rescaled = match target {
            Target::AfterYearOne => (1.0 + q) / (1.0 + self.p1) - 1.0,
            Target::Direct => q,
        };
        let after_year_one = self.gompertz_time(rescaled);
        if after_year_one > 1.0 {
            return after_year_one;
        }

        let within_year_one = self.year_one_time(q);
        if within_year_one.is_finite() && within_year_one >= 0.0 {
            within_year_one
        } else {
            tracing::warn!(q, p1 = self.p1, "survival target is unreachable");
            UNREACHABLE
        }
    }

    /// Solve `H(t) = q'` for `t` in years
    fn gompertz_time(&self, rescaled: f64) -> f64 {
        if rescaled <= 0.0 {
            return UNREACHABLE;
        }
        let days = (rescaled * self.gamma / self.lp_h.exp() + 1.0).ln() / self.gamma;
        let years = days / DAYS_PER_YEAR + 1.0;
        if years.is_finite() {
            years
        } else {
            UNREACHABLE
        }
    }

    /// Solve `1 − (1 − p1)^t = q` for `t` in years
    fn year_one_time(&self, q: f64) -> f64 {
        let daily_log_survival = (1.0 - self.p1).ln() / DAYS_PER_YEAR;
        (1.0 - q).ln() / daily_log_survival / DAYS_PER_YEAR
    }
}

/// Summary survival statistics, in years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalStats {
    /// Time to 50% cumulative mortality
    pub median: f64,
    /// Time to 25% cumulative mortality
    pub lower_quartile: f64,
    /// Time to 75% cumulative mortality
    pub upper_quartile: f64,
    /// `age + median`
    pub life_expectancy: f64,
    /// Time at which survival reaches zero
    pub t_zero_survival: f64,
}

impl SurvivalStats {
    pub fn from_model(model: &MortalityModel, age: f64) -> Self {
        let median = model.survival_time(0.5);
        Self {
            median,
            lower_quartile: model.survival_time(0.25),
            upper_quartile: model.survival_time(0.75),
            life_expectancy: age + median,
            t_zero_survival: model.time_to_zero_survival(),
        }
    }

    /// All statistics undefined
    pub fn undefined() -> Self {
        Self {
            median: f64::NAN,
            lower_quartile: f64::NAN,
            upper_quartile: f64::NAN,
            life_expectancy: f64::NAN,
            t_zero_survival: f64::NAN,
        }
    }
}

//! Collapsing per-mRS inputs to the independent (mRS 0-2) / dependent (mRS 3-5) split

use super::{MrsVector, ParameterSet};

fn group_means(values: &MrsVector) -> (f64, f64) {
    let independent = values[..3].iter().sum::<f64>() / 3.0;
    let dependent = values[3..].iter().sum::<f64>() / 3.0;
    (independent, dependent)
}

fn broadcast(independent: f64, dependent: f64) -> MrsVector {
    [
        independent,
        independent,
        independent,
        dependent,
        dependent,
        dependent,
    ]
}

/// Replace a vector by its group means
fn pooled(values: &MrsVector) -> MrsVector {
    let (independent, dependent) = group_means(values);
    broadcast(independent, dependent)
}

/// Re-reference a regression mRS vector on the independent group
///
/// Returns the shift to fold into the matching non-mRS term and the new vector
/// (zero for mRS 0-2).
fn rereferenced(values: &MrsVector) -> (f64, MrsVector) {
    let (independent, dependent) = group_means(values);
    (independent, broadcast(0.0, dependent - independent))
}

/// Collapse a per-mRS parameter set to the dichotomous model
///
/// Every mRS-indexed input becomes the mean of its group. Regression mRS
/// terms keep mRS 0 as the zero reference: the independent mean moves into the
/// constant (or age slope, for the Gompertz mRS×age interactions) and the
/// dependent group keeps the difference.
pub(crate) fn collapse(set: &ParameterSet) -> ParameterSet {
    let mut out = set.clone();

    let (shift, mrs) = rereferenced(&set.logistic_coeffs.mrs);
    out.logistic_coeffs.constant += shift;
    out.logistic_coeffs.mrs = mrs;

    let (shift, mrs) = rereferenced(&set.gompertz_coeffs.mrs);
    out.gompertz_coeffs.constant += shift;
    out.gompertz_coeffs.mrs = mrs;

    let (shift, mrs_age) = rereferenced(&set.gompertz_coeffs.mrs_age);
    out.gompertz_coeffs.age += shift;
    out.gompertz_coeffs.mrs_age = mrs_age;

    out.utility = pooled(&set.utility);
    out.logistic_mean_age = pooled(&set.logistic_mean_age);
    out.ae_mrs = pooled(&set.ae_mrs);
    out.nel_mrs = pooled(&set.nel_mrs);
    out.el_mrs = pooled(&set.el_mrs);
    out
}

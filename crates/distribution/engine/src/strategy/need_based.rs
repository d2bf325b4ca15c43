//! Need-based allocation: weighted by family size and income
//!
//! Need points combine a family component (household size plus
//! dependents) with an income component (10 points at zero income,
//! shrinking by one point per 1000 currency units of monthly income,
//! floored at zero).

use crate::strategy::result_for;
use distribution_types::{round_minor, Beneficiary, DistributionResult};

/// Need score for one beneficiary.
pub(crate) fn need_points(beneficiary: &Beneficiary) -> f64 {
    let family_points = (beneficiary.family_size() + beneficiary.dependents_count()) as f64;

    let income_minor = beneficiary.monthly_income_minor();
    let income_points = if income_minor == 0 {
        10.0
    } else {
        let income_major = income_minor as f64 / 100.0;
        (10.0 - income_major / 1000.0).max(0.0)
    };

    family_points + income_points
}

pub fn allocate(distributable_minor: i64, beneficiaries: &[Beneficiary]) -> Vec<DistributionResult> {
    if beneficiaries.is_empty() {
        return Vec::new();
    }

    let mut points: Vec<f64> = beneficiaries.iter().map(need_points).collect();
    let mut total_points: f64 = points.iter().sum();
    if total_points == 0.0 {
        // A roster where every need score is zero degenerates to an equal split
        points = vec![1.0; beneficiaries.len()];
        total_points = beneficiaries.len() as f64;
    }

    let point_value = distributable_minor as f64 / total_points;

    beneficiaries
        .iter()
        .zip(&points)
        .map(|(b, &p)| {
            let amount = round_minor(point_value * p);
            result_for(
                b,
                amount,
                distributable_minor,
                format!("{p:.1} of {total_points:.1} need points"),
            )
        })
        .collect()
}

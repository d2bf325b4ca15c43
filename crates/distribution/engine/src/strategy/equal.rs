//! Equal split: the same amount for every beneficiary

use crate::strategy::result_for;
use distribution_types::{round_minor, Beneficiary, DistributionResult};

pub fn allocate(distributable_minor: i64, beneficiaries: &[Beneficiary]) -> Vec<DistributionResult> {
    if beneficiaries.is_empty() {
        return Vec::new();
    }

    let count = beneficiaries.len();
    let amount = round_minor(distributable_minor as f64 / count as f64);
    let basis = format!("equal split among {count} beneficiaries");

    beneficiaries
        .iter()
        .map(|b| result_for(b, amount, distributable_minor, basis.clone()))
        .collect()
}

//! Hybrid allocation: a weighted blend of shariah and need-based
//!
//! The two underlying patterns are computed independently on the full
//! distributable amount, then blended per beneficiary. The engine
//! validates the blend weights before dispatching here.

use crate::strategy::{need_based, result_for, shariah};
use distribution_types::{round_minor, Beneficiary, DistributionResult, HybridConfig};

pub fn allocate(
    distributable_minor: i64,
    beneficiaries: &[Beneficiary],
    config: &HybridConfig,
) -> Vec<DistributionResult> {
    if beneficiaries.is_empty() {
        return Vec::new();
    }

    let shariah_results = shariah::allocate(distributable_minor, beneficiaries);
    let need_results = need_based::allocate(distributable_minor, beneficiaries);

    let basis = format!(
        "{:.0}% shariah + {:.0}% need-based blend",
        config.shariah_weight * 100.0,
        config.need_weight * 100.0
    );

    beneficiaries
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let blended = shariah_results[i].allocated_minor as f64 * config.shariah_weight
                + need_results[i].allocated_minor as f64 * config.need_weight;
            result_for(b, round_minor(blended), distributable_minor, basis.clone())
        })
        .collect()
}

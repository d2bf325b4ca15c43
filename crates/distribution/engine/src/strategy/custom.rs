//! Custom weights: a caller-supplied percentage per beneficiary

use crate::strategy::result_for;
use distribution_types::{
    round_minor, AllocationError, AllocationResult, Beneficiary, BeneficiaryId, DistributionResult,
};
use std::collections::HashMap;

/// Weights must sum to 100 within this tolerance, or the request is
/// rejected; the engine never auto-normalizes.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

pub fn allocate(
    distributable_minor: i64,
    beneficiaries: &[Beneficiary],
    weights: &HashMap<BeneficiaryId, f64>,
) -> AllocationResult<Vec<DistributionResult>> {
    let mut resolved = Vec::with_capacity(beneficiaries.len());
    for b in beneficiaries {
        let weight = weights
            .get(&b.id)
            .copied()
            .ok_or_else(|| AllocationError::MissingWeightFor(b.id.clone()))?;
        resolved.push(weight);
    }

    let sum: f64 = resolved.iter().sum();
    if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(AllocationError::WeightSumOutOfTolerance {
            sum,
            tolerance: WEIGHT_SUM_TOLERANCE,
        });
    }

    Ok(beneficiaries
        .iter()
        .zip(&resolved)
        .map(|(b, &weight)| {
            let amount = round_minor(distributable_minor as f64 * weight / 100.0);
            result_for(
                b,
                amount,
                distributable_minor,
                format!("custom weight {weight}%"),
            )
        })
        .collect())
}

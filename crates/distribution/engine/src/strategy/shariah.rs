//! Shariah shares: inheritance-law-derived weighting
//!
//! Each beneficiary gets an integer share count from its type label,
//! matched case-insensitively by substring against a fixed vocabulary.
//! Daughter and wife terms are checked before son terms because "ابنة"
//! (daughter) contains "ابن" (son).

use crate::strategy::result_for;
use distribution_types::{round_minor, Beneficiary, DistributionResult};

const WAQIF_TERMS: [&str; 2] = ["واقف", "waqif"];
const DAUGHTER_WIFE_TERMS: [&str; 5] = ["ابنة", "بنت", "daughter", "زوجة", "wife"];
const SON_TERMS: [&str; 2] = ["ابن", "son"];

/// Share count for a beneficiary type label: waqif 3, son-like 2,
/// daughter-like and wife-like 1, unrecognized 1.
pub(crate) fn share_count(beneficiary_type: &str) -> u32 {
    let label = beneficiary_type.to_lowercase();
    let matches = |terms: &[&str]| terms.iter().any(|t| label.contains(t));

    if matches(&WAQIF_TERMS) {
        3
    } else if matches(&DAUGHTER_WIFE_TERMS) {
        1
    } else if matches(&SON_TERMS) {
        2
    } else {
        1
    }
}

pub fn allocate(distributable_minor: i64, beneficiaries: &[Beneficiary]) -> Vec<DistributionResult> {
    if beneficiaries.is_empty() {
        return Vec::new();
    }

    let shares: Vec<u32> = beneficiaries
        .iter()
        .map(|b| share_count(&b.beneficiary_type))
        .collect();
    let total_shares: u32 = shares.iter().sum();
    let share_value = distributable_minor as f64 / total_shares as f64;

    beneficiaries
        .iter()
        .zip(&shares)
        .map(|(b, &s)| {
            let amount = round_minor(share_value * s as f64);
            result_for(
                b,
                amount,
                distributable_minor,
                format!("{s} of {total_shares} shariah shares"),
            )
        })
        .collect()
}

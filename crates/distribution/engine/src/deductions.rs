//! Deduction calculation: the distributable remainder of a gross pool
//!
//! Each of the five percentages is applied to the gross amount
//! independently (the base is never reduced by a previous deduction),
//! each component rounded on its own, then summed.

use distribution_types::{apply_percentage, DeductionBreakdown, DeductionsConfig};

/// Compute the itemized deductions for a gross amount. Infallible; a
/// missing percentage resolves to its documented default.
pub fn calculate(total_minor: i64, config: &DeductionsConfig) -> DeductionBreakdown {
    let nazer_minor = apply_percentage(total_minor, config.nazer_pct());
    let reserve_minor = apply_percentage(total_minor, config.reserve_pct());
    let corpus_minor = apply_percentage(total_minor, config.corpus_pct());
    let maintenance_minor = apply_percentage(total_minor, config.maintenance_pct());
    let development_minor = apply_percentage(total_minor, config.development_pct());

    DeductionBreakdown {
        nazer_minor,
        reserve_minor,
        corpus_minor,
        maintenance_minor,
        development_minor,
        total_minor: nazer_minor
            + reserve_minor
            + corpus_minor
            + maintenance_minor
            + development_minor,
    }
}

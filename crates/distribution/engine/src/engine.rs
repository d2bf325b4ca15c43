//! Allocation engine: validation, deduction, dispatch, summary
//!
//! The engine is the sole public entry point of the distribution core.
//! It validates the request, computes the deduction breakdown, hands
//! the distributable remainder to the pattern named in the request,
//! and assembles the summary from the pattern's output.

use crate::{deductions, strategy};
use chrono::Utc;
use distribution_types::{
    AllocationError, AllocationPattern, AllocationResult, DistributionOutcome, DistributionParams,
    DistributionSummary,
};
use tracing::{info, warn};

/// The distribution allocation engine. Stateless; a single value can
/// serve any number of concurrent calculations.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute a full distribution for the given parameters.
    ///
    /// Validates the request, applies deductions, dispatches to the
    /// requested pattern, and returns the per-beneficiary results
    /// together with the run summary. The result array has the same
    /// length and order as the input beneficiary array.
    pub fn calculate(&self, params: &DistributionParams) -> AllocationResult<DistributionOutcome> {
        if params.total_minor <= 0 {
            return Err(AllocationError::NonPositiveAmount(params.total_minor));
        }
        if params.beneficiaries.is_empty() {
            return Err(AllocationError::EmptyBeneficiaries);
        }
        params.deductions.validate()?;

        let breakdown = deductions::calculate(params.total_minor, &params.deductions);
        let distributable_minor = params.total_minor - breakdown.total_minor;
        if distributable_minor < 0 {
            // The combined deduction invariant is owned by the caller
            warn!(
                total_minor = params.total_minor,
                deductions_minor = breakdown.total_minor,
                "deductions exceed the gross amount; distributable is negative"
            );
        }

        let results = match params.pattern {
            AllocationPattern::Shariah => {
                strategy::shariah::allocate(distributable_minor, &params.beneficiaries)
            }
            AllocationPattern::Equal => {
                strategy::equal::allocate(distributable_minor, &params.beneficiaries)
            }
            AllocationPattern::NeedBased => {
                strategy::need_based::allocate(distributable_minor, &params.beneficiaries)
            }
            AllocationPattern::Custom => {
                let weights = params
                    .custom_weights
                    .as_ref()
                    .ok_or(AllocationError::MissingCustomWeights)?;
                strategy::custom::allocate(distributable_minor, &params.beneficiaries, weights)?
            }
            AllocationPattern::Hybrid => {
                let config = params
                    .hybrid_config
                    .as_ref()
                    .ok_or(AllocationError::MissingHybridConfig)?;
                config.validate()?;
                strategy::hybrid::allocate(distributable_minor, &params.beneficiaries, config)
            }
        };

        let total_distributed_minor = results.iter().map(|r| r.allocated_minor).sum();

        info!(
            pattern = %params.pattern,
            beneficiaries = params.beneficiaries.len(),
            distributable_minor,
            total_distributed_minor,
            "distribution calculated"
        );

        Ok(DistributionOutcome {
            results,
            summary: DistributionSummary {
                total_minor: params.total_minor,
                deductions: breakdown,
                distributable_minor,
                total_distributed_minor,
                beneficiaries_count: params.beneficiaries.len(),
                pattern: params.pattern,
                calculated_at: Utc::now(),
            },
        })
    }
}

//! Distribution domain types for the awqaf platform core
//!
//! A distribution takes a gross revenue pool, removes the configured
//! deductions, and splits the remainder among beneficiaries according
//! to an allocation pattern. These types describe the inputs
//! ([`DistributionParams`]) and outputs ([`DistributionResult`],
//! [`DistributionSummary`]) of that computation; the computation itself
//! lives in the `distribution-engine` crate.
//!
//! All monetary values are integer minor units (1 unit = 0.01 of the
//! currency). Percentages and weights are `f64`.

pub mod beneficiary;
pub mod errors;
pub mod money;
pub mod params;
pub mod result;

pub use beneficiary::{Beneficiary, BeneficiaryId};
pub use errors::{AllocationError, AllocationResult};
pub use money::{apply_percentage, round_minor, share_of};
pub use params::{AllocationPattern, DeductionsConfig, DistributionParams, HybridConfig};
pub use result::{DeductionBreakdown, DistributionOutcome, DistributionResult, DistributionSummary};

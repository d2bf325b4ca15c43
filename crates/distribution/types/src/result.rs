//! Allocation output: per-beneficiary results and the run summary

use crate::{AllocationPattern, BeneficiaryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Deduction Breakdown ──────────────────────────────────────────────

/// The five deduction components taken off the gross, plus their sum.
/// Each component is rounded independently before summing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub nazer_minor: i64,
    pub reserve_minor: i64,
    pub corpus_minor: i64,
    pub maintenance_minor: i64,
    pub development_minor: i64,
    /// Sum of the five components
    pub total_minor: i64,
}

impl DeductionBreakdown {
    /// The components as (name, amount) pairs, in ledger order
    pub fn itemized(&self) -> [(&'static str, i64); 5] {
        [
            ("nazer", self.nazer_minor),
            ("reserve", self.reserve_minor),
            ("corpus", self.corpus_minor),
            ("maintenance", self.maintenance_minor),
            ("development", self.development_minor),
        ]
    }
}

// ── Distribution Result ──────────────────────────────────────────────

/// One beneficiary's allocation.
///
/// The result array of a run has the same length and order as the
/// input beneficiary array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub beneficiary_id: BeneficiaryId,
    pub beneficiary_name: String,
    /// Amount allocated to this beneficiary, minor units
    pub allocated_minor: i64,
    /// Share of the distributable amount, 0-100
    pub percentage: f64,
    /// Human-readable justification of the amount
    pub calculation_basis: String,
    /// Payout routing, copied from the beneficiary record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

// ── Distribution Summary ─────────────────────────────────────────────

/// Totals and echo fields for one allocation run.
///
/// `total_distributed_minor` equals the sum of the per-beneficiary
/// amounts exactly; it stays within one minor unit per beneficiary of
/// `distributable_minor` (rounding bound).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Gross pool, echoed from the request
    pub total_minor: i64,
    /// Itemized deductions and their total
    pub deductions: DeductionBreakdown,
    /// total - deductions.total
    pub distributable_minor: i64,
    /// Sum of all allocated amounts
    pub total_distributed_minor: i64,
    pub beneficiaries_count: usize,
    /// The pattern that produced the results
    pub pattern: AllocationPattern,
    /// When the engine computed this distribution
    pub calculated_at: DateTime<Utc>,
}

/// The full output of one allocation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionOutcome {
    pub results: Vec<DistributionResult>,
    pub summary: DistributionSummary,
}

//! Distribution request parameters
//!
//! [`DistributionParams`] is the single input of the allocation engine:
//! the gross pool, the deduction percentages, the beneficiary list, and
//! the pattern that decides how the remainder is split.

use crate::{AllocationError, AllocationResult, Beneficiary, BeneficiaryId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Allocation Pattern ───────────────────────────────────────────────

/// The closed set of allocation policies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPattern {
    /// Shariah inheritance shares derived from the beneficiary type
    Shariah,
    /// The same amount for every beneficiary
    Equal,
    /// Weighted by family size and income need points
    NeedBased,
    /// Caller-supplied percentage per beneficiary
    Custom,
    /// Weighted blend of the shariah and need-based results
    Hybrid,
}

impl AllocationPattern {
    /// The wire label of this pattern
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shariah => "shariah",
            Self::Equal => "equal",
            Self::NeedBased => "need_based",
            Self::Custom => "custom",
            Self::Hybrid => "hybrid",
        }
    }

    /// All patterns, in wire order
    pub fn all() -> [AllocationPattern; 5] {
        [
            Self::Shariah,
            Self::Equal,
            Self::NeedBased,
            Self::Custom,
            Self::Hybrid,
        ]
    }
}

impl std::fmt::Display for AllocationPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ── Deductions Config ────────────────────────────────────────────────

/// Default percentage applied when the nazer deduction is not configured
pub const DEFAULT_NAZER_PCT: f64 = 5.0;
/// Default percentage applied when the reserve deduction is not configured
pub const DEFAULT_RESERVE_PCT: f64 = 10.0;
/// Default percentage applied when the waqf-corpus deduction is not configured
pub const DEFAULT_CORPUS_PCT: f64 = 5.0;
/// Default percentage applied when the maintenance deduction is not configured
pub const DEFAULT_MAINTENANCE_PCT: f64 = 3.0;
/// Default percentage applied when the development deduction is not configured
pub const DEFAULT_DEVELOPMENT_PCT: f64 = 2.0;

/// The five deduction percentages taken off the gross amount.
///
/// Each percentage is applied to the gross independently (the base is
/// never reduced by a previous deduction). A missing percentage falls
/// back to its documented default; callers relying on explicit
/// configuration must supply all five.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionsConfig {
    /// Trustee (nazer) fee percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nazer_pct: Option<f64>,
    /// Reserve fund percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_pct: Option<f64>,
    /// Waqf corpus preservation percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_pct: Option<f64>,
    /// Property maintenance percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_pct: Option<f64>,
    /// Development fund percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_pct: Option<f64>,
}

impl DeductionsConfig {
    /// A config with every percentage supplied explicitly
    pub fn explicit(nazer: f64, reserve: f64, corpus: f64, maintenance: f64, development: f64) -> Self {
        Self {
            nazer_pct: Some(nazer),
            reserve_pct: Some(reserve),
            corpus_pct: Some(corpus),
            maintenance_pct: Some(maintenance),
            development_pct: Some(development),
        }
    }

    pub fn nazer_pct(&self) -> f64 {
        self.nazer_pct.unwrap_or(DEFAULT_NAZER_PCT)
    }

    pub fn reserve_pct(&self) -> f64 {
        self.reserve_pct.unwrap_or(DEFAULT_RESERVE_PCT)
    }

    pub fn corpus_pct(&self) -> f64 {
        self.corpus_pct.unwrap_or(DEFAULT_CORPUS_PCT)
    }

    pub fn maintenance_pct(&self) -> f64 {
        self.maintenance_pct.unwrap_or(DEFAULT_MAINTENANCE_PCT)
    }

    pub fn development_pct(&self) -> f64 {
        self.development_pct.unwrap_or(DEFAULT_DEVELOPMENT_PCT)
    }

    /// The resolved percentages as (name, value) pairs, in ledger order
    pub fn resolved(&self) -> [(&'static str, f64); 5] {
        [
            ("nazer", self.nazer_pct()),
            ("reserve", self.reserve_pct()),
            ("corpus", self.corpus_pct()),
            ("maintenance", self.maintenance_pct()),
            ("development", self.development_pct()),
        ]
    }

    /// Check every percentage is within 0-100.
    ///
    /// The sum across the five is deliberately NOT checked here; a
    /// combined deduction above 100% yields a negative distributable
    /// remainder which the engine reports but does not forbid.
    pub fn validate(&self) -> AllocationResult<()> {
        for (name, value) in self.resolved() {
            if !(0.0..=100.0).contains(&value) || !value.is_finite() {
                return Err(AllocationError::InvalidDeductionPercentage { name, value });
            }
        }
        Ok(())
    }
}

// ── Hybrid Config ────────────────────────────────────────────────────

/// Blend weights for the hybrid pattern
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Weight of the shariah result, 0-1
    pub shariah_weight: f64,
    /// Weight of the need-based result, 0-1
    pub need_weight: f64,
}

impl HybridConfig {
    pub fn new(shariah_weight: f64, need_weight: f64) -> Self {
        Self {
            shariah_weight,
            need_weight,
        }
    }

    /// Check both weights are within 0-1 and sum to 1.
    ///
    /// Without this check the blended total silently drifts away from
    /// the distributable amount.
    pub fn validate(&self) -> AllocationResult<()> {
        let in_range = (0.0..=1.0).contains(&self.shariah_weight)
            && (0.0..=1.0).contains(&self.need_weight);
        let sums_to_one = (self.shariah_weight + self.need_weight - 1.0).abs() <= 1e-9;
        if !in_range || !sums_to_one {
            return Err(AllocationError::InvalidHybridWeights {
                shariah_weight: self.shariah_weight,
                need_weight: self.need_weight,
            });
        }
        Ok(())
    }
}

// ── Distribution Params ──────────────────────────────────────────────

/// The full input of one allocation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Gross pool in minor units; must be positive
    pub total_minor: i64,
    /// Beneficiaries to allocate to; must be non-empty
    pub beneficiaries: Vec<Beneficiary>,
    /// Deduction percentages
    #[serde(default)]
    pub deductions: DeductionsConfig,
    /// The allocation policy
    pub pattern: AllocationPattern,
    /// Per-beneficiary percentages; required iff pattern is `custom`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_weights: Option<HashMap<BeneficiaryId, f64>>,
    /// Blend weights; required iff pattern is `hybrid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_config: Option<HybridConfig>,
}

impl DistributionParams {
    pub fn new(total_minor: i64, beneficiaries: Vec<Beneficiary>, pattern: AllocationPattern) -> Self {
        Self {
            total_minor,
            beneficiaries,
            deductions: DeductionsConfig::default(),
            pattern,
            custom_weights: None,
            hybrid_config: None,
        }
    }

    pub fn with_deductions(mut self, deductions: DeductionsConfig) -> Self {
        self.deductions = deductions;
        self
    }

    pub fn with_custom_weights(mut self, weights: HashMap<BeneficiaryId, f64>) -> Self {
        self.custom_weights = Some(weights);
        self
    }

    pub fn with_hybrid_config(mut self, config: HybridConfig) -> Self {
        self.hybrid_config = Some(config);
        self
    }
}

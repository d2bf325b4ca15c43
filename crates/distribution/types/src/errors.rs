//! Error types for the distribution allocation engine

use crate::BeneficiaryId;

/// Errors raised while validating or computing a distribution.
///
/// Every variant is scoped to a single calculation attempt; none is
/// fatal to the surrounding process.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("total amount must be positive, got {0} minor units")]
    NonPositiveAmount(i64),

    #[error("beneficiary list is empty")]
    EmptyBeneficiaries,

    #[error("deduction percentage out of range: {name} = {value} (expected 0-100)")]
    InvalidDeductionPercentage { name: &'static str, value: f64 },

    #[error("custom pattern requires custom_weights")]
    MissingCustomWeights,

    #[error("no custom weight configured for beneficiary {0}")]
    MissingWeightFor(BeneficiaryId),

    #[error("custom weights sum to {sum:.2}, expected 100 within {tolerance}")]
    WeightSumOutOfTolerance { sum: f64, tolerance: f64 },

    #[error("hybrid pattern requires hybrid_config")]
    MissingHybridConfig,

    #[error("hybrid weights invalid: shariah {shariah_weight} + need {need_weight} must equal 1")]
    InvalidHybridWeights {
        shariah_weight: f64,
        need_weight: f64,
    },
}

impl AllocationError {
    /// Malformed request input, as opposed to pattern-specific
    /// configuration problems
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveAmount(_)
                | Self::EmptyBeneficiaries
                | Self::InvalidDeductionPercentage { .. }
                | Self::InvalidHybridWeights { .. }
        )
    }

    /// Missing or inconsistent pattern-specific configuration
    pub fn is_config(&self) -> bool {
        !self.is_validation()
    }
}

/// Result type alias for allocation operations
pub type AllocationResult<T> = Result<T, AllocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(AllocationError::NonPositiveAmount(0).is_validation());
        assert!(AllocationError::EmptyBeneficiaries.is_validation());
        assert!(AllocationError::MissingCustomWeights.is_config());
        assert!(AllocationError::MissingWeightFor(BeneficiaryId::new("b-1")).is_config());
        assert!(AllocationError::InvalidHybridWeights {
            shariah_weight: 0.7,
            need_weight: 0.7
        }
        .is_validation());
    }

    #[test]
    fn display_carries_detail() {
        let err = AllocationError::WeightSumOutOfTolerance {
            sum: 97.5,
            tolerance: 0.01,
        };
        let text = err.to_string();
        assert!(text.contains("97.50"));
        assert!(text.contains("100"));
    }
}

//! Error types for the approval workflow core

use crate::{ApprovalInstanceId, ApprovalWorkflowId};

/// Errors raised while validating workflows or sequencing decisions.
///
/// Conflict errors mean the caller raced another decision and should
/// reload the instance; state errors mean the attempted step is no
/// longer actionable and retrying cannot succeed.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    // --- Definition validation ---
    #[error("workflow has no levels")]
    EmptyWorkflow,

    #[error("level numbers must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguousLevels { expected: u32, found: u32 },

    #[error("duplicate level number: {0}")]
    DuplicateLevel(u32),

    #[error("level {0} repeats another level's amount condition")]
    DuplicateCondition(u32),

    // --- Instance creation ---
    #[error("workflow {0} is inactive")]
    WorkflowInactive(ApprovalWorkflowId),

    #[error("no level of workflow {workflow_id} applies to amount {amount_minor}")]
    NoApplicableLevels {
        workflow_id: ApprovalWorkflowId,
        amount_minor: i64,
    },

    // --- Concurrency ---
    #[error("instance {instance_id} changed underneath the caller: expected version {expected}, found {actual}")]
    VersionConflict {
        instance_id: ApprovalInstanceId,
        expected: u64,
        actual: u64,
    },

    // --- Decision sequencing ---
    #[error("instance {0} already reached a terminal state")]
    InstanceTerminal(ApprovalInstanceId),

    #[error("level {level} is not the current pending level (current: {current:?})")]
    NotCurrentLevel { level: u32, current: Option<u32> },

    #[error("level {0} already has a decision")]
    AlreadyDecided(u32),

    #[error("level {0} does not permit skipping")]
    SkipNotAllowed(u32),
}

impl ApprovalError {
    /// A concurrent decision won the race; reload and re-inspect
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }

    /// The attempted step is no longer actionable; not retryable
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::InstanceTerminal(_)
                | Self::NotCurrentLevel { .. }
                | Self::AlreadyDecided(_)
                | Self::SkipNotAllowed(_)
        )
    }
}

/// Result type alias for approval operations
pub type ApprovalResult<T> = Result<T, ApprovalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let conflict = ApprovalError::VersionConflict {
            instance_id: ApprovalInstanceId::new("i-1"),
            expected: 1,
            actual: 2,
        };
        assert!(conflict.is_conflict());
        assert!(!conflict.is_state_error());

        assert!(ApprovalError::AlreadyDecided(1).is_state_error());
        assert!(ApprovalError::InstanceTerminal(ApprovalInstanceId::new("i-1")).is_state_error());
        assert!(!ApprovalError::EmptyWorkflow.is_state_error());
    }

    #[test]
    fn not_current_level_display() {
        let err = ApprovalError::NotCurrentLevel {
            level: 2,
            current: Some(1),
        };
        let text = err.to_string();
        assert!(text.contains("level 2"));
        assert!(text.contains("Some(1)"));
    }
}

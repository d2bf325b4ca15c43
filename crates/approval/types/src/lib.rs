//! Approval workflow domain types
//!
//! A computed distribution is not money until it has cleared every
//! configured approval level. [`ApprovalWorkflow`] is the declarative,
//! externally authored ladder of levels; [`ApprovalInstance`] is one
//! entity's passage through that ladder, created against an immutable
//! snapshot of the workflow so later edits never alter in-flight
//! approvals. The sequencing rules themselves live in the
//! `approval-engine` crate.

pub mod errors;
pub mod events;
pub mod instance;
pub mod workflow;

pub use errors::{ApprovalError, ApprovalResult};
pub use events::ApprovalEvent;
pub use instance::{
    ApprovalDecision, ApprovalInstance, ApprovalInstanceId, ApproverId, DecisionStatus, EntityRef,
    HistoryEntry, InstanceState, LevelState,
};
pub use workflow::{AmountCondition, ApprovalLevel, ApprovalWorkflow, ApprovalWorkflowId, ApproverRole};

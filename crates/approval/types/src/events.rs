//! Events emitted by the approval state machine
//!
//! The core never persists or dispatches these itself; they are
//! returned to the caller, which owns persistence and notification
//! fan-out.

use crate::{ApprovalInstanceId, ApproverId, ApproverRole, DecisionStatus, InstanceState};
use serde::{Deserialize, Serialize};

/// A state change the caller should persist and fan out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApprovalEvent {
    /// A decision was recorded against a level
    DecisionRecorded {
        instance_id: ApprovalInstanceId,
        level: u32,
        status: DecisionStatus,
        actor: ApproverId,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// The instance reached a terminal state
    InstanceFinalized {
        instance_id: ApprovalInstanceId,
        final_state: InstanceState,
    },
    /// A pending level's decision is overdue; notify the level's role
    EscalationTriggered {
        instance_id: ApprovalInstanceId,
        level: u32,
        role: ApproverRole,
    },
}

impl ApprovalEvent {
    pub fn instance_id(&self) -> &ApprovalInstanceId {
        match self {
            Self::DecisionRecorded { instance_id, .. }
            | Self::InstanceFinalized { instance_id, .. }
            | Self::EscalationTriggered { instance_id, .. } => instance_id,
        }
    }
}

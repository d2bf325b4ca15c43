//! Approval instances: one entity's passage through a workflow
//!
//! An instance is created against an immutable snapshot of the
//! workflow definition. Levels whose amount condition excludes the
//! entity are filtered out at creation and never enter pending. The
//! instance records decisions, an audit history, and a version counter
//! used for optimistic concurrency; the sequencing rules that decide
//! *whether* a mutation is legal live in `approval-engine`.

use crate::{ApprovalError, ApprovalLevel, ApprovalResult, ApprovalWorkflow, ApproverRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for an approval instance
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalInstanceId(pub String);

impl ApprovalInstanceId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for ApprovalInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the person acting on a level. Authorization (whether
/// they actually hold the level's role) is checked outside this core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApproverId(pub String);

impl ApproverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ApproverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to the entity being approved
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }

    pub fn distribution(id: impl Into<String>) -> Self {
        Self::new("distribution", id)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity_id)
    }
}

// ── Decisions ────────────────────────────────────────────────────────

/// The outcome recorded against one level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Approved,
    Rejected,
    Skipped,
}

/// A decision recorded against one level of an instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub status: DecisionStatus,
    pub actor: ApproverId,
    /// Approval notes or rejection/skip reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl ApprovalDecision {
    pub fn approved(actor: ApproverId, notes: Option<String>) -> Self {
        Self {
            status: DecisionStatus::Approved,
            actor,
            notes,
            decided_at: Utc::now(),
        }
    }

    pub fn rejected(actor: ApproverId, reason: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Rejected,
            actor,
            notes: Some(reason.into()),
            decided_at: Utc::now(),
        }
    }

    pub fn skipped(actor: ApproverId, reason: Option<String>) -> Self {
        Self {
            status: DecisionStatus::Skipped,
            actor,
            notes: reason,
            decided_at: Utc::now(),
        }
    }
}

// ── Level State ──────────────────────────────────────────────────────

/// Runtime state of one applicable level
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelState {
    /// The level definition, snapshotted from the workflow
    pub definition: ApprovalLevel,
    /// When this level became the current pending level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entered_at: Option<DateTime<Utc>>,
    /// Advisory overdue flag; never changes approval progress
    pub escalated: bool,
    /// The recorded decision, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<ApprovalDecision>,
}

impl LevelState {
    fn from_definition(definition: ApprovalLevel) -> Self {
        Self {
            definition,
            entered_at: None,
            escalated: false,
            decision: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.definition.level
    }

    pub fn role(&self) -> ApproverRole {
        self.definition.role
    }

    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }

    /// Hours this level has been pending without a decision
    pub fn pending_hours(&self, now: DateTime<Utc>) -> Option<i64> {
        match (&self.decision, self.entered_at) {
            (None, Some(entered)) => Some(now.signed_duration_since(entered).num_hours()),
            _ => None,
        }
    }
}

// ── Instance State ───────────────────────────────────────────────────

/// Lifecycle state of an approval instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstanceState {
    /// Waiting on the named level's decision
    Pending { level: u32 },
    /// Every applicable level approved (or skipped); terminal
    Approved,
    /// A level rejected; terminal
    Rejected,
}

impl InstanceState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

// ── History ──────────────────────────────────────────────────────────

/// An entry in the instance audit trail
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonically increasing sequence number
    pub sequence: u64,
    /// Type of event
    pub event_type: String,
    /// Human-readable description
    pub description: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Who caused this event (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ApproverId>,
}

// ── Approval Instance ────────────────────────────────────────────────

/// One entity's passage through an approval workflow
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalInstance {
    /// Unique instance identifier
    pub id: ApprovalInstanceId,
    /// The entity being approved
    pub entity: EntityRef,
    /// The entity's amount, used for level applicability
    pub amount_minor: i64,
    /// The workflow id this instance was opened against
    pub workflow_id: crate::ApprovalWorkflowId,
    /// Runtime state per applicable level, in ladder order
    pub levels: Vec<LevelState>,
    /// Current lifecycle state
    pub state: InstanceState,
    /// Optimistic-concurrency counter; bumped on every recorded
    /// decision. Callers read it with the instance and pass it back
    /// with their decision.
    pub version: u64,
    /// Audit trail of every state change
    pub history: Vec<HistoryEntry>,
    /// When the instance was opened
    pub created_at: DateTime<Utc>,
    /// When the instance was last mutated
    pub updated_at: DateTime<Utc>,
    /// When the instance reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl ApprovalInstance {
    /// Open an instance against a workflow definition.
    ///
    /// The definition is validated, filtered to the levels whose
    /// amount condition matches the entity, and snapshotted into the
    /// instance. The first applicable level becomes pending
    /// immediately.
    pub fn open(
        workflow: &ApprovalWorkflow,
        entity: EntityRef,
        amount_minor: i64,
    ) -> ApprovalResult<Self> {
        workflow.validate()?;
        if !workflow.active {
            return Err(ApprovalError::WorkflowInactive(workflow.id.clone()));
        }

        let applicable: Vec<LevelState> = workflow
            .applicable_levels(amount_minor)
            .into_iter()
            .map(|l| LevelState::from_definition(l.clone()))
            .collect();
        if applicable.is_empty() {
            return Err(ApprovalError::NoApplicableLevels {
                workflow_id: workflow.id.clone(),
                amount_minor,
            });
        }

        let now = Utc::now();
        let first_level = applicable[0].level();
        let mut instance = Self {
            id: ApprovalInstanceId::generate(),
            entity,
            amount_minor,
            workflow_id: workflow.id.clone(),
            levels: applicable,
            state: InstanceState::Pending { level: first_level },
            version: 0,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
            finalized_at: None,
        };
        instance.levels[0].entered_at = Some(now);
        instance.record_history(
            "instance_opened",
            format!(
                "Approval opened for {} at level {}",
                instance.entity, first_level
            ),
            None,
        );
        Ok(instance)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The level currently awaiting a decision, if any
    pub fn current_level(&self) -> Option<u32> {
        match self.state {
            InstanceState::Pending { level } => Some(level),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn level_state(&self, level: u32) -> Option<&LevelState> {
        self.levels.iter().find(|l| l.level() == level)
    }

    /// The next applicable level after the given one, in ladder order
    pub fn next_level_after(&self, level: u32) -> Option<u32> {
        self.levels
            .iter()
            .map(|l| l.level())
            .find(|&l| l > level)
    }

    /// Number of levels that have a recorded decision
    pub fn decided_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_decided()).count()
    }

    // ── Mutations (sequencing enforced by approval-engine) ───────────

    /// Record a decision against a level and bump the version
    pub fn record_decision(&mut self, level: u32, decision: ApprovalDecision) {
        let actor = decision.actor.clone();
        let status = decision.status;
        if let Some(slot) = self.levels.iter_mut().find(|l| l.level() == level) {
            slot.decision = Some(decision);
        }
        self.version += 1;
        self.updated_at = Utc::now();
        self.record_history(
            "decision_recorded",
            format!("Level {level} {status:?} by {actor}"),
            Some(actor),
        );
    }

    /// Make a level the current pending one and stamp its entry time
    pub fn advance_to(&mut self, level: u32, now: DateTime<Utc>) {
        if let Some(slot) = self.levels.iter_mut().find(|l| l.level() == level) {
            slot.entered_at = Some(now);
        }
        self.state = InstanceState::Pending { level };
        self.updated_at = now;
        self.record_history("level_entered", format!("Level {level} pending"), None);
    }

    /// Move to a terminal state
    pub fn finalize(&mut self, state: InstanceState) {
        let now = Utc::now();
        self.state = state;
        self.finalized_at = Some(now);
        self.updated_at = now;
        self.record_history("instance_finalized", format!("Final state {state:?}"), None);
    }

    /// Set the advisory escalation flag on a level
    pub fn flag_escalated(&mut self, level: u32, now: DateTime<Utc>) {
        if let Some(slot) = self.levels.iter_mut().find(|l| l.level() == level) {
            slot.escalated = true;
        }
        self.updated_at = now;
        self.record_history(
            "escalation_flagged",
            format!("Level {level} decision overdue"),
            None,
        );
    }

    fn record_history(
        &mut self,
        event_type: impl Into<String>,
        description: impl Into<String>,
        actor: Option<ApproverId>,
    ) {
        self.history.push(HistoryEntry {
            sequence: self.history.len() as u64,
            event_type: event_type.into(),
            description: description.into(),
            timestamp: Utc::now(),
            actor,
        });
    }
}

//! Workflow definitions: the declarative approval ladder
//!
//! An ApprovalWorkflow is an ordered list of levels, each naming the
//! role that must decide, whether the level may be skipped, an optional
//! escalation timeout, and an optional amount range that decides
//! whether the level applies to a given entity at all.
//!
//! Definitions are authored and persisted outside this core. Once an
//! instance has been created against a definition it operates on its
//! own snapshot; editing the definition never alters the instance.

use crate::{ApprovalError, ApprovalResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Identifier ───────────────────────────────────────────────────────

/// Unique identifier for a workflow definition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalWorkflowId(pub String);

impl ApprovalWorkflowId {
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

impl std::fmt::Display for ApprovalWorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Approver Role ────────────────────────────────────────────────────

/// The closed set of roles a level can require.
///
/// Who actually holds a role is an authorization concern outside this
/// core; the engine only sequences decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproverRole {
    /// Prepares and verifies the figures
    Accountant,
    /// Independent review
    Auditor,
    /// Operational management
    Manager,
    /// The endowment's trustee; final authority
    Nazer,
}

impl std::fmt::Display for ApproverRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Accountant => "accountant",
            Self::Auditor => "auditor",
            Self::Manager => "manager",
            Self::Nazer => "nazer",
        };
        write!(f, "{label}")
    }
}

// ── Amount Condition ─────────────────────────────────────────────────

/// An optional amount range restricting when a level applies.
/// A level without a condition always applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountCondition {
    /// Inclusive lower bound, minor units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_minor: Option<i64>,
    /// Inclusive upper bound, minor units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_minor: Option<i64>,
}

impl AmountCondition {
    pub fn at_least(min_minor: i64) -> Self {
        Self {
            min_minor: Some(min_minor),
            max_minor: None,
        }
    }

    pub fn at_most(max_minor: i64) -> Self {
        Self {
            min_minor: None,
            max_minor: Some(max_minor),
        }
    }

    pub fn between(min_minor: i64, max_minor: i64) -> Self {
        Self {
            min_minor: Some(min_minor),
            max_minor: Some(max_minor),
        }
    }

    /// Whether an entity amount falls inside this range
    pub fn applies_to(&self, amount_minor: i64) -> bool {
        if let Some(min) = self.min_minor {
            if amount_minor < min {
                return false;
            }
        }
        if let Some(max) = self.max_minor {
            if amount_minor > max {
                return false;
            }
        }
        true
    }
}

// ── Approval Level ───────────────────────────────────────────────────

/// One rung of the approval ladder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLevel {
    /// 1-based position in the ladder
    pub level: u32,
    /// The role that must decide this level
    pub role: ApproverRole,
    /// Whether this level may be skipped instead of decided
    #[serde(default)]
    pub can_skip: bool,
    /// Hours a level may stay undecided before an escalation signal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_escalate_after_hours: Option<u32>,
    /// Amount range restricting when this level applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<AmountCondition>,
}

impl ApprovalLevel {
    pub fn new(level: u32, role: ApproverRole) -> Self {
        Self {
            level,
            role,
            can_skip: false,
            auto_escalate_after_hours: None,
            condition: None,
        }
    }

    pub fn skippable(mut self) -> Self {
        self.can_skip = true;
        self
    }

    pub fn with_escalation_after(mut self, hours: u32) -> Self {
        self.auto_escalate_after_hours = Some(hours);
        self
    }

    pub fn with_condition(mut self, condition: AmountCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether this level applies to an entity of the given amount
    pub fn applies_to(&self, amount_minor: i64) -> bool {
        self.condition
            .map(|c| c.applies_to(amount_minor))
            .unwrap_or(true)
    }
}

// ── Approval Workflow ────────────────────────────────────────────────

/// A declarative, ordered approval ladder for one entity type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    /// Unique identifier
    pub id: ApprovalWorkflowId,
    /// Human-readable name
    pub name: String,
    /// The entity type this workflow gates (e.g. "distribution")
    pub entity_type: String,
    /// Inactive workflows cannot open new instances
    pub active: bool,
    /// The levels, ordered by their 1-based level number
    pub levels: Vec<ApprovalLevel>,
    /// When this definition was created
    pub created_at: DateTime<Utc>,
}

impl ApprovalWorkflow {
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: ApprovalWorkflowId::generate(),
            name: name.into(),
            entity_type: entity_type.into(),
            active: true,
            levels: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Append a level, rejecting duplicate level numbers
    pub fn add_level(&mut self, level: ApprovalLevel) -> ApprovalResult<()> {
        if self.levels.iter().any(|l| l.level == level.level) {
            return Err(ApprovalError::DuplicateLevel(level.level));
        }
        self.levels.push(level);
        Ok(())
    }

    /// Validate the definition for structural correctness:
    /// non-empty, level numbers contiguous from 1 in declaration
    /// order, no two levels with identical explicit conditions.
    pub fn validate(&self) -> ApprovalResult<()> {
        if self.levels.is_empty() {
            return Err(ApprovalError::EmptyWorkflow);
        }

        for (i, level) in self.levels.iter().enumerate() {
            let expected = i as u32 + 1;
            if level.level != expected {
                return Err(ApprovalError::NonContiguousLevels {
                    expected,
                    found: level.level,
                });
            }
        }

        let mut seen = HashSet::new();
        for level in &self.levels {
            if let Some(condition) = level.condition {
                let key = (
                    condition.min_minor,
                    condition.max_minor,
                );
                if !seen.insert(key) {
                    return Err(ApprovalError::DuplicateCondition(level.level));
                }
            }
        }

        Ok(())
    }

    /// The levels that apply to an entity of the given amount, in
    /// ladder order
    pub fn applicable_levels(&self, amount_minor: i64) -> Vec<&ApprovalLevel> {
        self.levels
            .iter()
            .filter(|l| l.applies_to(amount_minor))
            .collect()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

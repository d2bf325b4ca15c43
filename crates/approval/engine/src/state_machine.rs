//! Decision sequencing: approve, reject, and skip
//!
//! Decisions are only accepted against the instance's current pending
//! level, and only when the caller's `expected_version` matches the
//! instance. The version check runs before any state check: a caller
//! holding a stale snapshot learns it raced another decision rather
//! than getting a misleading state error.

use approval_types::{
    ApprovalDecision, ApprovalError, ApprovalEvent, ApprovalInstance, ApprovalResult, ApproverId,
    DecisionStatus, InstanceState,
};
use chrono::Utc;
use tracing::info;

/// Sequences decisions against approval instances. Stateless; the
/// caller holds the instances.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApprovalStateMachine;

impl ApprovalStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Approve the current pending level.
    ///
    /// On the last applicable level the instance finalizes as
    /// approved; otherwise the next applicable level becomes pending.
    pub fn approve(
        &self,
        instance: &mut ApprovalInstance,
        level: u32,
        actor: &ApproverId,
        notes: Option<String>,
        expected_version: u64,
    ) -> ApprovalResult<Vec<ApprovalEvent>> {
        self.guard(instance, level, expected_version)?;

        instance.record_decision(level, ApprovalDecision::approved(actor.clone(), notes.clone()));
        let mut events = vec![ApprovalEvent::DecisionRecorded {
            instance_id: instance.id.clone(),
            level,
            status: DecisionStatus::Approved,
            actor: actor.clone(),
            notes,
        }];
        events.extend(self.advance_or_finalize(instance, level));

        info!(instance_id = %instance.id, level, actor = %actor, "level approved");
        Ok(events)
    }

    /// Reject the current pending level.
    ///
    /// The instance finalizes as rejected immediately; no further
    /// level ever becomes pending.
    pub fn reject(
        &self,
        instance: &mut ApprovalInstance,
        level: u32,
        actor: &ApproverId,
        reason: impl Into<String>,
        expected_version: u64,
    ) -> ApprovalResult<Vec<ApprovalEvent>> {
        self.guard(instance, level, expected_version)?;

        let reason = reason.into();
        instance.record_decision(level, ApprovalDecision::rejected(actor.clone(), reason.clone()));
        instance.finalize(InstanceState::Rejected);

        info!(instance_id = %instance.id, level, actor = %actor, "level rejected");
        Ok(vec![
            ApprovalEvent::DecisionRecorded {
                instance_id: instance.id.clone(),
                level,
                status: DecisionStatus::Rejected,
                actor: actor.clone(),
                notes: Some(reason),
            },
            ApprovalEvent::InstanceFinalized {
                instance_id: instance.id.clone(),
                final_state: InstanceState::Rejected,
            },
        ])
    }

    /// Skip the current pending level, where the definition permits.
    ///
    /// A skip advances exactly like an approval; skipping the last
    /// applicable level finalizes the instance as approved.
    pub fn skip(
        &self,
        instance: &mut ApprovalInstance,
        level: u32,
        actor: &ApproverId,
        reason: Option<String>,
        expected_version: u64,
    ) -> ApprovalResult<Vec<ApprovalEvent>> {
        self.guard(instance, level, expected_version)?;
        let slot = instance
            .level_state(level)
            .ok_or(ApprovalError::NotCurrentLevel {
                level,
                current: instance.current_level(),
            })?;
        if !slot.definition.can_skip {
            return Err(ApprovalError::SkipNotAllowed(level));
        }

        instance.record_decision(level, ApprovalDecision::skipped(actor.clone(), reason.clone()));
        let mut events = vec![ApprovalEvent::DecisionRecorded {
            instance_id: instance.id.clone(),
            level,
            status: DecisionStatus::Skipped,
            actor: actor.clone(),
            notes: reason,
        }];
        events.extend(self.advance_or_finalize(instance, level));

        info!(instance_id = %instance.id, level, actor = %actor, "level skipped");
        Ok(events)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Common admissibility checks for any decision on (instance, level)
    fn guard(
        &self,
        instance: &ApprovalInstance,
        level: u32,
        expected_version: u64,
    ) -> ApprovalResult<()> {
        if instance.version != expected_version {
            return Err(ApprovalError::VersionConflict {
                instance_id: instance.id.clone(),
                expected: expected_version,
                actual: instance.version,
            });
        }
        if instance.is_terminal() {
            return Err(ApprovalError::InstanceTerminal(instance.id.clone()));
        }
        let slot = instance
            .level_state(level)
            .ok_or(ApprovalError::NotCurrentLevel {
                level,
                current: instance.current_level(),
            })?;
        if slot.is_decided() {
            return Err(ApprovalError::AlreadyDecided(level));
        }
        if instance.current_level() != Some(level) {
            return Err(ApprovalError::NotCurrentLevel {
                level,
                current: instance.current_level(),
            });
        }
        Ok(())
    }

    /// Advance past a cleared level, finalizing when it was the last
    fn advance_or_finalize(
        &self,
        instance: &mut ApprovalInstance,
        level: u32,
    ) -> Option<ApprovalEvent> {
        match instance.next_level_after(level) {
            Some(next) => {
                instance.advance_to(next, Utc::now());
                None
            }
            None => {
                instance.finalize(InstanceState::Approved);
                Some(ApprovalEvent::InstanceFinalized {
                    instance_id: instance.id.clone(),
                    final_state: InstanceState::Approved,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approval_types::{
        AmountCondition, ApprovalLevel, ApprovalWorkflow, ApproverRole, EntityRef,
    };

    fn two_level_workflow() -> ApprovalWorkflow {
        let mut wf = ApprovalWorkflow::new("Distribution approval", "distribution");
        wf.add_level(ApprovalLevel::new(1, ApproverRole::Accountant))
            .unwrap();
        wf.add_level(ApprovalLevel::new(2, ApproverRole::Nazer))
            .unwrap();
        wf
    }

    fn open_instance(wf: &ApprovalWorkflow) -> ApprovalInstance {
        ApprovalInstance::open(wf, EntityRef::distribution("d-1"), 36_500_000).unwrap()
    }

    fn accountant() -> ApproverId {
        ApproverId::new("u-accountant")
    }

    fn nazer() -> ApproverId {
        ApproverId::new("u-nazer")
    }

    #[test]
    fn approve_both_levels_finalizes_approved() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let events = machine
            .approve(&mut inst, 1, &accountant(), Some("figures check out".into()), 0)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(inst.state, InstanceState::Pending { level: 2 });
        assert_eq!(inst.version, 1);
        assert!(inst.level_state(2).unwrap().entered_at.is_some());

        let events = machine.approve(&mut inst, 2, &nazer(), None, 1).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            ApprovalEvent::InstanceFinalized {
                final_state: InstanceState::Approved,
                ..
            }
        ));
        assert_eq!(inst.state, InstanceState::Approved);
        assert!(inst.finalized_at.is_some());
    }

    #[test]
    fn reject_at_first_level_terminates_the_ladder() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let events = machine
            .reject(&mut inst, 1, &accountant(), "amounts do not reconcile", 0)
            .unwrap();
        assert_eq!(inst.state, InstanceState::Rejected);
        assert_eq!(events.len(), 2);
        // Level 2 never became pending
        assert!(inst.level_state(2).unwrap().entered_at.is_none());

        // Nothing further is actionable
        let err = machine.approve(&mut inst, 2, &nazer(), None, 1).unwrap_err();
        assert!(matches!(err, ApprovalError::InstanceTerminal(_)));
    }

    #[test]
    fn racing_decisions_resolve_to_one_winner() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        // Both approvers loaded the instance at version 0
        machine.approve(&mut inst, 1, &accountant(), None, 0).unwrap();
        let err = machine
            .approve(&mut inst, 1, &ApproverId::new("u-deputy"), None, 0)
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(matches!(
            err,
            ApprovalError::VersionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));
        // The instance advanced exactly once
        assert_eq!(inst.state, InstanceState::Pending { level: 2 });
        assert_eq!(inst.decided_count(), 1);
    }

    #[test]
    fn non_current_level_is_a_state_error() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let err = machine.approve(&mut inst, 2, &nazer(), None, 0).unwrap_err();
        assert!(err.is_state_error());
        assert!(matches!(
            err,
            ApprovalError::NotCurrentLevel {
                level: 2,
                current: Some(1)
            }
        ));
    }

    #[test]
    fn decided_level_is_a_state_error_even_with_a_fresh_version() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        machine.approve(&mut inst, 1, &accountant(), None, 0).unwrap();
        let err = machine
            .approve(&mut inst, 1, &accountant(), None, 1)
            .unwrap_err();
        assert!(matches!(err, ApprovalError::AlreadyDecided(1)));
    }

    #[test]
    fn unknown_level_is_a_state_error() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let err = machine.approve(&mut inst, 9, &nazer(), None, 0).unwrap_err();
        assert!(matches!(err, ApprovalError::NotCurrentLevel { level: 9, .. }));
    }

    #[test]
    fn skip_requires_permission() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let err = machine
            .skip(&mut inst, 1, &accountant(), None, 0)
            .unwrap_err();
        assert!(matches!(err, ApprovalError::SkipNotAllowed(1)));
        assert_eq!(inst.state, InstanceState::Pending { level: 1 });
    }

    #[test]
    fn skip_advances_like_an_approval() {
        let mut wf = ApprovalWorkflow::new("Skippable first", "distribution");
        wf.add_level(ApprovalLevel::new(1, ApproverRole::Accountant).skippable())
            .unwrap();
        wf.add_level(ApprovalLevel::new(2, ApproverRole::Nazer))
            .unwrap();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let events = machine
            .skip(&mut inst, 1, &accountant(), Some("pre-verified batch".into()), 0)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(inst.state, InstanceState::Pending { level: 2 });
        assert_eq!(
            inst.level_state(1).unwrap().decision.as_ref().unwrap().status,
            DecisionStatus::Skipped
        );
    }

    #[test]
    fn skipping_the_last_level_finalizes_approved() {
        let mut wf = ApprovalWorkflow::new("Skippable final", "distribution");
        wf.add_level(ApprovalLevel::new(1, ApproverRole::Accountant))
            .unwrap();
        wf.add_level(ApprovalLevel::new(2, ApproverRole::Nazer).skippable())
            .unwrap();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        machine.approve(&mut inst, 1, &accountant(), None, 0).unwrap();
        let events = machine.skip(&mut inst, 2, &nazer(), None, 1).unwrap();
        assert_eq!(inst.state, InstanceState::Approved);
        assert!(matches!(
            events[1],
            ApprovalEvent::InstanceFinalized {
                final_state: InstanceState::Approved,
                ..
            }
        ));
    }

    #[test]
    fn conditioned_level_never_enters_the_sequence() {
        let mut wf = ApprovalWorkflow::new("Tiered", "distribution");
        wf.add_level(ApprovalLevel::new(1, ApproverRole::Accountant))
            .unwrap();
        wf.add_level(
            ApprovalLevel::new(2, ApproverRole::Manager)
                .with_condition(AmountCondition::at_least(100_000_000)),
        )
        .unwrap();
        wf.add_level(ApprovalLevel::new(3, ApproverRole::Nazer))
            .unwrap();

        // 36.5M is below the level-2 threshold: the ladder is 1 -> 3
        let mut inst = open_instance(&wf);
        assert_eq!(inst.levels.len(), 2);

        let machine = ApprovalStateMachine::new();
        machine.approve(&mut inst, 1, &accountant(), None, 0).unwrap();
        assert_eq!(inst.state, InstanceState::Pending { level: 3 });

        machine.approve(&mut inst, 3, &nazer(), None, 1).unwrap();
        assert_eq!(inst.state, InstanceState::Approved);
    }

    #[test]
    fn decision_event_carries_notes() {
        let wf = two_level_workflow();
        let mut inst = open_instance(&wf);
        let machine = ApprovalStateMachine::new();

        let events = machine
            .approve(&mut inst, 1, &accountant(), Some("checked against ledger".into()), 0)
            .unwrap();
        assert!(matches!(
            &events[0],
            ApprovalEvent::DecisionRecorded {
                level: 1,
                status: DecisionStatus::Approved,
                notes: Some(n),
                ..
            } if n == "checked against ledger"
        ));
    }
}

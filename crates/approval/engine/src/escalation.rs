//! Escalation monitoring: advisory overdue signals
//!
//! The monitor detects pending levels whose decision is overdue and
//! flags them exactly once. Escalation never approves, rejects, or
//! advances anything; the returned event is the caller's cue to
//! notify the level's role. The core owns no scheduler: an external
//! job invokes the sweep at whatever cadence the caller chooses,
//! passing `now` explicitly so runs are deterministic.

use approval_types::{ApprovalEvent, ApprovalInstance};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

/// Detects overdue pending levels. Stateless and idempotent: a level
/// already flagged is never reported again.
#[derive(Clone, Copy, Debug, Default)]
pub struct EscalationMonitor;

impl EscalationMonitor {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one instance's current pending level at `now`.
    ///
    /// Returns the escalation event on the first transition into the
    /// overdue state, `None` otherwise (not due, already flagged,
    /// no timeout configured, or the instance is terminal).
    pub fn evaluate(
        &self,
        instance: &mut ApprovalInstance,
        now: DateTime<Utc>,
    ) -> Option<ApprovalEvent> {
        if instance.is_terminal() {
            return None;
        }
        let level = instance.current_level()?;
        let slot = instance.level_state(level)?;
        if slot.is_decided() || slot.escalated {
            return None;
        }
        let hours = slot.definition.auto_escalate_after_hours?;
        let entered = slot.entered_at?;
        if now.signed_duration_since(entered) <= Duration::hours(hours as i64) {
            return None;
        }

        let role = slot.role();
        instance.flag_escalated(level, now);
        warn!(
            instance_id = %instance.id,
            level,
            role = %role,
            overdue_hours = hours,
            "approval decision overdue"
        );
        Some(ApprovalEvent::EscalationTriggered {
            instance_id: instance.id.clone(),
            level,
            role,
        })
    }

    /// Evaluate a batch of instances, collecting the triggered events.
    pub fn sweep(
        &self,
        instances: &mut [ApprovalInstance],
        now: DateTime<Utc>,
    ) -> Vec<ApprovalEvent> {
        instances
            .iter_mut()
            .filter_map(|instance| self.evaluate(instance, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approval_types::{
        ApprovalLevel, ApprovalWorkflow, ApproverId, ApproverRole, EntityRef, InstanceState,
    };
    use crate::ApprovalStateMachine;

    fn timed_workflow(hours: u32) -> ApprovalWorkflow {
        let mut wf = ApprovalWorkflow::new("Timed", "distribution");
        wf.add_level(
            ApprovalLevel::new(1, ApproverRole::Accountant).with_escalation_after(hours),
        )
        .unwrap();
        wf.add_level(ApprovalLevel::new(2, ApproverRole::Nazer))
            .unwrap();
        wf
    }

    fn open(wf: &ApprovalWorkflow) -> ApprovalInstance {
        ApprovalInstance::open(wf, EntityRef::distribution("d-1"), 1_000_000).unwrap()
    }

    #[test]
    fn not_due_returns_none() {
        let wf = timed_workflow(24);
        let mut inst = open(&wf);
        let entered = inst.levels[0].entered_at.unwrap();

        let monitor = EscalationMonitor::new();
        assert!(monitor.evaluate(&mut inst, entered).is_none());
        // Exactly at the deadline is not yet overdue
        assert!(monitor
            .evaluate(&mut inst, entered + Duration::hours(24))
            .is_none());
        assert!(!inst.levels[0].escalated);
    }

    #[test]
    fn overdue_level_flags_exactly_once() {
        let wf = timed_workflow(24);
        let mut inst = open(&wf);
        let entered = inst.levels[0].entered_at.unwrap();
        let late = entered + Duration::hours(25);

        let monitor = EscalationMonitor::new();
        let event = monitor.evaluate(&mut inst, late).unwrap();
        assert!(matches!(
            event,
            ApprovalEvent::EscalationTriggered {
                level: 1,
                role: ApproverRole::Accountant,
                ..
            }
        ));
        assert!(inst.levels[0].escalated);

        // Idempotent: the same sweep running again stays quiet
        assert!(monitor.evaluate(&mut inst, late).is_none());
        assert!(monitor
            .evaluate(&mut inst, late + Duration::hours(48))
            .is_none());
    }

    #[test]
    fn escalation_never_changes_approval_progress() {
        let wf = timed_workflow(24);
        let mut inst = open(&wf);
        let entered = inst.levels[0].entered_at.unwrap();

        let monitor = EscalationMonitor::new();
        monitor
            .evaluate(&mut inst, entered + Duration::hours(30))
            .unwrap();
        assert_eq!(inst.state, InstanceState::Pending { level: 1 });
        assert!(inst.level_state(1).unwrap().decision.is_none());

        // The flagged level still takes a normal decision
        let machine = ApprovalStateMachine::new();
        let expected_version = inst.version;
        machine
            .approve(&mut inst, 1, &ApproverId::new("u-1"), None, expected_version)
            .unwrap();
        assert_eq!(inst.state, InstanceState::Pending { level: 2 });
    }

    #[test]
    fn level_without_timeout_never_escalates() {
        let mut wf = ApprovalWorkflow::new("Untimed", "distribution");
        wf.add_level(ApprovalLevel::new(1, ApproverRole::Accountant))
            .unwrap();
        let mut inst = open(&wf);
        let entered = inst.levels[0].entered_at.unwrap();

        let monitor = EscalationMonitor::new();
        assert!(monitor
            .evaluate(&mut inst, entered + Duration::days(365))
            .is_none());
    }

    #[test]
    fn terminal_instance_returns_none() {
        let wf = timed_workflow(1);
        let mut inst = open(&wf);
        let machine = ApprovalStateMachine::new();
        machine
            .reject(&mut inst, 1, &ApproverId::new("u-1"), "no", 0)
            .unwrap();

        let monitor = EscalationMonitor::new();
        assert!(monitor
            .evaluate(&mut inst, Utc::now() + Duration::days(10))
            .is_none());
    }

    #[test]
    fn sweep_collects_across_instances() {
        let wf = timed_workflow(24);
        let mut instances = vec![open(&wf), open(&wf), open(&wf)];
        // The middle instance already got a decision
        ApprovalStateMachine::new()
            .approve(&mut instances[1], 1, &ApproverId::new("u-1"), None, 0)
            .unwrap();

        let entered = instances[0].levels[0].entered_at.unwrap();
        let monitor = EscalationMonitor::new();
        let events = monitor.sweep(&mut instances, entered + Duration::hours(48));

        // Instance 1 is now pending level 2 which has no timeout
        assert_eq!(events.len(), 2);
        assert!(instances[0].levels[0].escalated);
        assert!(instances[2].levels[0].escalated);
    }
}

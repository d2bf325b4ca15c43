//! Approval Sequencing Engine
//!
//! Drives an [`approval_types::ApprovalInstance`] through its workflow.
//! Approvals advance the current pending level while a rejection ends
//! the ladder immediately; overdue levels raise advisory escalation
//! signals without touching approval progress.
//!
//! The engine owns no storage, timers, or threads. Every mutation is a
//! synchronous call against a caller-held instance, guarded by an
//! optimistic version check so two approvers racing on the same level
//! resolve to exactly one recorded decision. Emitted
//! [`approval_types::ApprovalEvent`]s are returned to the caller,
//! which owns persistence and notification fan-out.
//!
//! # Example
//!
//! ```rust
//! use approval_engine::ApprovalStateMachine;
//! use approval_types::{
//!     ApprovalInstance, ApprovalLevel, ApprovalWorkflow, ApproverId, ApproverRole, EntityRef,
//!     InstanceState,
//! };
//!
//! let mut workflow = ApprovalWorkflow::new("Distribution approval", "distribution");
//! workflow.add_level(ApprovalLevel::new(1, ApproverRole::Accountant)).unwrap();
//! workflow.add_level(ApprovalLevel::new(2, ApproverRole::Nazer)).unwrap();
//!
//! let mut instance =
//!     ApprovalInstance::open(&workflow, EntityRef::distribution("d-1"), 36_500_000).unwrap();
//!
//! let machine = ApprovalStateMachine::new();
//! machine.approve(&mut instance, 1, &ApproverId::new("u-accountant"), None, 0).unwrap();
//! machine.approve(&mut instance, 2, &ApproverId::new("u-nazer"), None, 1).unwrap();
//! assert_eq!(instance.state, InstanceState::Approved);
//! ```

#![deny(unsafe_code)]

pub mod escalation;
pub mod state_machine;

pub use escalation::EscalationMonitor;
pub use state_machine::ApprovalStateMachine;

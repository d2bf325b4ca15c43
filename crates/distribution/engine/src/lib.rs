//! Distribution Allocation Engine
//!
//! Takes a gross revenue pool, removes the configured deductions, and
//! splits the remainder among beneficiaries according to the requested
//! allocation pattern. The engine is a pure, synchronous computation:
//! it performs no I/O, owns no state, and is safe to invoke
//! concurrently for independent inputs.
//!
//! [`AllocationEngine::calculate`] is the sole public entry point; the
//! individual patterns under [`strategy`] are independently testable
//! free functions dispatched by the engine, so adding a pattern never
//! touches the existing ones.
//!
//! # Example
//!
//! ```rust
//! use distribution_engine::AllocationEngine;
//! use distribution_types::{AllocationPattern, Beneficiary, DeductionsConfig, DistributionParams};
//!
//! let params = DistributionParams::new(
//!     50_000_000,
//!     vec![
//!         Beneficiary::new("b-1", "Ahmad", "ابن"),
//!         Beneficiary::new("b-2", "Fatima", "بنت"),
//!     ],
//!     AllocationPattern::Shariah,
//! )
//! .with_deductions(DeductionsConfig::explicit(5.0, 10.0, 5.0, 5.0, 2.0));
//!
//! let outcome = AllocationEngine::new().calculate(&params).unwrap();
//! assert_eq!(outcome.summary.distributable_minor, 36_500_000);
//! assert_eq!(outcome.results.len(), 2);
//! ```

#![deny(unsafe_code)]

pub mod deductions;
pub mod engine;
pub mod strategy;

pub use engine::AllocationEngine;

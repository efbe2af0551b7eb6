//!
//! # ardulog-parallel
//! File access and parallel decode orchestration for ArduPilot binary flight logs:
//! balanced segment planning across a shared read-only byte buffer, and a coordinator
//! that dispatches segments to workers and merges the result into one timestamp-ordered
//! sequence.
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]
#![allow(clippy::too_many_arguments)]

pub mod coordinator;
pub mod planner;
pub mod result;

pub use coordinator::{decode, CoordinatorState, DecodeOptions, DecodeOutcome, ExecutionMode};
pub use planner::{plan_segments, Segment};
pub use result::{Error, Result};

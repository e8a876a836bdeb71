//! Core domain model for socialtrack: the plan catalog, the month record
//! and its mutation commands, the progress calculator, and the boundary
//! contracts for narrative generation and the simulated send.
//!
//! Everything here is synchronous and side-effect free except the
//! [`narrative`] boundary (async collaborator) and the [`send`] driver
//! (timer-based). Persistence lives in `socialtrack-store`.

pub mod catalog;
pub mod month;
pub mod narrative;
pub mod send;
pub mod stats;

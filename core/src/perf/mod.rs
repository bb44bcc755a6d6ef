//! Shared benchmarking scaffolding used by the criterion bench, the
//! standalone harness and the report generator.
//!
//! Keeping the setup and the checked run here means every tool measures the
//! same dataset and applies the same postcondition.

pub mod alloc;
mod context;


pub use context::*;

//! Usage store implementations
//!
//! The ledger talks to any [`tollgate_core::UsageStore`]. The in-memory
//! store here serves single-instance deployments and tests; durable
//! backends live with the persistence collaborator.

mod memory;

pub use memory::MemoryUsageStore;

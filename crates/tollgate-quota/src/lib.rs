//! Quota admission control
//!
//! Tracks per-account consumption against a tier-derived monthly limit.
//! The event log is authoritative: the cached counter is recomputed
//! from it before every decision, so a crash between event-write and
//! counter-update can never leak quota. Within one account, admission
//! is linearized through a per-key async mutex; unrelated accounts
//! share no mutable state.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod ledger;
mod period;
pub mod storage;

pub use error::QuotaError;
pub use ledger::{Decision, QuotaLedger, ReservationId};
pub use period::current_period;

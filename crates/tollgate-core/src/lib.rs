//! Shared domain model for Tollgate
//!
//! Defines the types that flow between the classifier, selector, meter,
//! quota ledger, and analytics, plus the traits implemented by external
//! collaborators (usage store, backend invoker, account directory,
//! tokenizer). No component logic lives here.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod account;
mod event;
mod invoke;
mod store;
mod tokenizer;
mod types;

pub use account::{Account, AccountDirectory, DirectoryError};
pub use event::{QuotaRecord, QuotaStatus, UsageEvent, UsageFilter};
pub use invoke::{BackendInvoker, Invocation, InvokeError, InvokeOptions};
pub use store::{StoreError, UsageStore};
pub use tokenizer::{Tokenizer, TokenizerError};
pub use types::{ComplexityLevel, ResourceType, SubscriptionTier};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::SubscriptionTier;

/// Billing identity of a requester
///
/// Owned by the identity/billing subsystem; Tollgate only reads the
/// tier and bonus units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier
    pub account_id: String,
    /// Subscription tier
    pub tier: SubscriptionTier,
    /// Extra units added to the tier's period limit
    pub bonus_units: u64,
}

/// Errors from the account directory
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No account exists with this id
    #[error("unknown account: {0}")]
    NotFound(String),

    /// The directory cannot be reached
    #[error("account directory unavailable: {0}")]
    Unavailable(String),
}

/// Read access to account records
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Look up an account by id
    async fn get_account(&self, account_id: &str) -> Result<Account, DirectoryError>;
}

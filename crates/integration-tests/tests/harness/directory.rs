//! Fixed account directory for tests

use std::collections::HashMap;

use async_trait::async_trait;
use tollgate_core::{Account, AccountDirectory, DirectoryError, SubscriptionTier};

/// Directory backed by a static map of accounts
pub struct TestDirectory {
    accounts: HashMap<String, Account>,
}

impl TestDirectory {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.account_id.clone(), account))
                .collect(),
        }
    }

    /// One account per tier, ids "starter", "professional", "enterprise"
    pub fn one_per_tier() -> Self {
        Self::new([
            account("starter", SubscriptionTier::Starter),
            account("professional", SubscriptionTier::Professional),
            account("enterprise", SubscriptionTier::Enterprise),
        ])
    }
}

pub fn account(id: &str, tier: SubscriptionTier) -> Account {
    Account {
        account_id: id.to_owned(),
        tier,
        bonus_units: 0,
    }
}

#[async_trait]
impl AccountDirectory for TestDirectory {
    async fn get_account(&self, account_id: &str) -> Result<Account, DirectoryError> {
        self.accounts
            .get(account_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(account_id.to_owned()))
    }
}

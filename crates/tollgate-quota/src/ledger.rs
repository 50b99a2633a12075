use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use tollgate_config::{QuotaConfig, TierLimitsConfig};
use tollgate_core::{Account, QuotaRecord, QuotaStatus, SubscriptionTier, UsageEvent, UsageFilter, UsageStore};
use uuid::Uuid;

use crate::QuotaError;
use crate::period::current_period;

/// Handle for an admitted-but-uncommitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationId(Uuid);

/// Outcome of an admission check
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Units still available after this decision
    pub remaining: u64,
    /// Period limit the decision was made against
    pub limit: u64,
    /// Reservation to commit or release, present iff allowed
    pub reservation: Option<ReservationId>,
}

/// Units admitted but not yet committed
#[derive(Debug)]
struct Reservation {
    id: Uuid,
    units: u64,
    expires_at: Timestamp,
}

#[derive(Debug, Default)]
struct AccountState {
    record: Option<QuotaRecord>,
    reservations: Vec<Reservation>,
}

impl AccountState {
    fn drop_expired(&mut self, now: Timestamp) {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.expires_at > now);
        let expired = before - self.reservations.len();
        if expired > 0 {
            tracing::warn!(expired, "dropped expired quota reservations");
        }
    }

    fn pending_units(&self) -> u64 {
        self.reservations.iter().map(|r| r.units).sum()
    }
}

/// Per-account quota ledger over a durable usage store
///
/// The per-account mutex serializes only the read-modify-write of the
/// admission decision (including the reconciling store read); it is
/// never held across a backend invocation.
pub struct QuotaLedger {
    store: Arc<dyn UsageStore>,
    limits: TierLimitsConfig,
    reservation_ttl: Duration,
    accounts: DashMap<String, Arc<Mutex<AccountState>>>,
}

impl QuotaLedger {
    /// Create a ledger from configuration
    pub fn new(store: Arc<dyn UsageStore>, config: &QuotaConfig) -> Self {
        Self {
            store,
            limits: config.limits.clone(),
            reservation_ttl: Duration::from_secs(config.reservation_ttl_secs),
            accounts: DashMap::new(),
        }
    }

    /// Period limit for an account: tier default plus bonus units
    pub fn limit_for(&self, account: &Account) -> u64 {
        let base = match account.tier {
            SubscriptionTier::Starter => self.limits.starter,
            SubscriptionTier::Professional => self.limits.professional,
            SubscriptionTier::Enterprise => self.limits.enterprise,
        };
        base.saturating_add(account.bonus_units)
    }

    /// Atomically check quota and reserve units for one request
    ///
    /// `period_used` is recomputed from the event log before deciding;
    /// the cached record is refreshed as a side effect but never
    /// trusted. In-flight reservations count against the limit so
    /// concurrent requests on one account cannot jointly oversubscribe.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::StoreUnavailable`] if the store cannot be
    /// read. Callers must treat this as a denial.
    pub async fn check_and_reserve(&self, account: &Account, requested_units: u64) -> Result<Decision, QuotaError> {
        let now = Timestamp::now();
        let (period_start, reset_at) = current_period(now)?;
        let limit = self.limit_for(account);

        let state = self.account_state(&account.account_id);
        let mut state = state.lock().await;
        state.drop_expired(now);

        let used = self
            .store
            .total_units(&account.account_id, &UsageFilter::period(period_start, now))
            .await?;

        state.record = Some(QuotaRecord {
            account_id: account.account_id.clone(),
            period_limit: limit,
            period_used: used,
            reset_at,
        });

        let available = limit.saturating_sub(used).saturating_sub(state.pending_units());

        if requested_units > available {
            tracing::info!(
                account_id = %account.account_id,
                requested_units,
                available,
                limit,
                "admission denied: quota exceeded"
            );
            return Ok(Decision {
                allowed: false,
                remaining: available,
                limit,
                reservation: None,
            });
        }

        let ttl = SignedDuration::try_from(self.reservation_ttl).unwrap_or(SignedDuration::MAX);
        let reservation = Reservation {
            id: Uuid::new_v4(),
            units: requested_units,
            expires_at: now.checked_add(ttl).unwrap_or(Timestamp::MAX),
        };
        let id = ReservationId(reservation.id);
        state.reservations.push(reservation);

        Ok(Decision {
            allowed: true,
            remaining: available - requested_units,
            limit,
            reservation: Some(id),
        })
    }

    /// Commit completed work: append its events and settle the reservation
    ///
    /// Called only after the backend invocation has actually completed,
    /// so failed invocations never consume quota. The committed units
    /// are the metered actuals, which may differ from the reserved
    /// estimate.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::StoreUnavailable`] if an append fails; the
    /// reservation is kept and left to expire so reconciliation stays
    /// conservative.
    pub async fn commit(
        &self,
        account_id: &str,
        reservation: ReservationId,
        events: Vec<UsageEvent>,
    ) -> Result<(), QuotaError> {
        let units: u64 = events.iter().map(|e| e.unit_count).sum();

        let state = self.account_state(account_id);
        let mut state = state.lock().await;

        for event in events {
            self.store.append(event).await?;
        }

        state.reservations.retain(|r| r.id != reservation.0);
        if let Some(record) = state.record.as_mut() {
            record.period_used = record.period_used.saturating_add(units);
        }

        tracing::debug!(account_id, units, "usage committed");
        Ok(())
    }

    /// Release a reservation without charging
    ///
    /// Used when an invocation fails or the caller abandons the request
    /// after admission. Idempotent: releasing an unknown or expired
    /// reservation is a no-op.
    pub async fn release(&self, account_id: &str, reservation: ReservationId) {
        let state = self.account_state(account_id);
        let mut state = state.lock().await;
        let before = state.reservations.len();
        state.reservations.retain(|r| r.id != reservation.0);
        if state.reservations.len() < before {
            tracing::debug!(account_id, "reservation released without charge");
        }
    }

    /// Current-period standing for an account, reconciled from the log
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::StoreUnavailable`] if the store cannot be
    /// read
    pub async fn status(&self, account: &Account) -> Result<QuotaStatus, QuotaError> {
        let now = Timestamp::now();
        let (period_start, _) = current_period(now)?;
        let limit = self.limit_for(account);

        let used = self
            .store
            .total_units(&account.account_id, &UsageFilter::period(period_start, now))
            .await?;

        Ok(QuotaStatus {
            limit,
            used,
            remaining: limit.saturating_sub(used),
        })
    }

    fn account_state(&self, account_id: &str) -> Arc<Mutex<AccountState>> {
        self.accounts
            .entry(account_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(AccountState::default())))
            .clone()
    }
}

impl std::fmt::Debug for QuotaLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaLedger")
            .field("accounts", &self.accounts.len())
            .finish_non_exhaustive()
    }
}

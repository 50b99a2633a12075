use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tollgate_classify::Context;
use tollgate_core::{ComplexityLevel, InvokeOptions};

/// One request to route through the gateway
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Account to bill
    pub account_id: String,
    /// Optional project grouping for analytics
    pub project_id: Option<String>,
    /// Prompt text to send to the selected backend
    pub prompt: String,
    /// Conversation context that feeds classification
    pub context: Option<Context>,
    /// Options forwarded to the backend invoker
    pub options: InvokeOptions,
    /// Caller metadata recorded on usage events, bounded at commit
    pub metadata: BTreeMap<String, String>,
}

impl RouteRequest {
    /// A request with just an account and a prompt
    pub fn new(account_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Why a request was denied admission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The account's period quota cannot cover the request
    QuotaExceeded {
        /// Period limit the denial was made against
        limit: u64,
        /// Units still available this period
        remaining: u64,
    },
    /// The usage store could not be read; admission fails closed
    StoreUnavailable,
}

/// Outcome of a routed request
///
/// Denials are results, not errors: `denied` is set, `deny_reason`
/// says why, and nothing was invoked or charged.
#[derive(Debug, Clone)]
pub struct RouteResult {
    /// Generated output, absent on denial
    pub text: Option<String>,
    /// Backend that served the request, absent on denial
    pub backend_used: Option<String>,
    /// Complexity the request classified as
    pub complexity: ComplexityLevel,
    /// Units charged for the request
    pub units_used: u64,
    /// Cost charged, 6 decimal places
    pub cost: Decimal,
    /// Whether admission was denied
    pub denied: bool,
    /// Set iff `denied`
    pub deny_reason: Option<DenyReason>,
}

impl RouteResult {
    pub(crate) fn denial(complexity: ComplexityLevel, reason: DenyReason) -> Self {
        Self {
            text: None,
            backend_used: None,
            complexity,
            units_used: 0,
            cost: Decimal::ZERO,
            denied: true,
            deny_reason: Some(reason),
        }
    }
}

//! Counters emitted by the application services.
//!
//! Without an installed recorder every call is a no-op.

use metrics::counter;

pub const REWRITE_DECISIONS_TOTAL: &str = "url_rewrite_decisions_total";
pub const SETTINGS_UPDATES_TOTAL: &str = "url_settings_updates_total";

/// Counts one evaluated URI by its reason code, or `"error"`.
#[inline]
pub fn record_decision(reason: &'static str) {
    counter!(REWRITE_DECISIONS_TOTAL, "reason" => reason).increment(1);
}

/// Counts one settings update attempt.
#[inline]
pub fn record_settings_update(scope: &'static str, outcome: &'static str) {
    counter!(SETTINGS_UPDATES_TOTAL, "scope" => scope, "outcome" => outcome).increment(1);
}

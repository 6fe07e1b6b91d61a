//! Display text for reason codes.

use crate::domain::entities::ReasonCode;

/// Turns a [`ReasonCode`] into text shown by the diagnostics report.
#[cfg_attr(test, mockall::automock)]
pub trait ReasonLocalizer: Send + Sync {
    fn localize(&self, code: ReasonCode) -> String;
}

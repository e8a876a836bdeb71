//! The simulated report send.
//!
//! There is no real transmission: a send walks Idle -> Sending -> Sent ->
//! Idle on a fixed delay schedule. The only precondition is a present
//! client signature; an unsigned report is rejected as an ordinary
//! decision path, not a failure of the record.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::month::MonthData;

/// Delay before a send is reported as delivered.
pub const SENT_DELAY: Duration = Duration::from_secs(2);
/// Delay before the status returns to idle after delivery.
pub const IDLE_DELAY: Duration = Duration::from_secs(3);

/// Lifecycle of a simulated send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Sent,
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Sent => "sent",
        };
        f.write_str(s)
    }
}

/// The report cannot be sent without a client signature.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("the client must sign the report before it can be sent")]
pub struct UnsignedReport;

/// Check the send precondition against the month record.
pub fn check_send_allowed(month: &MonthData) -> Result<(), UnsignedReport> {
    if month.is_signed() { Ok(()) } else { Err(UnsignedReport) }
}

/// Drive one simulated send to completion.
///
/// Emits each status transition through `on_status`, sleeping on the fixed
/// schedule between them. Returns an error (and emits nothing) when the
/// report is unsigned. The caller is responsible for suppressing a second
/// send while one is in flight.
pub async fn run_simulated_send(
    month: &MonthData,
    mut on_status: impl FnMut(SendStatus),
) -> Result<(), UnsignedReport> {
    check_send_allowed(month)?;

    on_status(SendStatus::Sending);
    tokio::time::sleep(SENT_DELAY).await;
    on_status(SendStatus::Sent);
    tokio::time::sleep(IDLE_DELAY).await;
    on_status(SendStatus::Idle);
    Ok(())
}

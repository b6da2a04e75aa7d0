//! Failure isolation for presence-gated side effects.
//!
//! Observers passed to `if_present` / `if_not_present` may panic or return
//! an error. Either way the failure is reported through `log` and dropped,
//! so a faulty observer never aborts the chain it sits in.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::OptionalError;
use crate::rx_configuration::ObserverConfig;

/// The value an observer callback hands back.
///
/// Plain `()` callbacks never fail; `Result<(), E>` callbacks fail with `E`.
pub trait ObserverOutcome {
    /// Describe the failure, if there was one
    fn into_failure(self) -> Option<String>;
}

impl ObserverOutcome for () {
    fn into_failure(self) -> Option<String> {
        None
    }
}

impl<E: fmt::Display> ObserverOutcome for Result<(), E> {
    fn into_failure(self) -> Option<String> {
        self.err().map(|e| e.to_string())
    }
}

/// Run an observer inline, absorbing any failure.
///
/// Returns the absorbed failure so callers inside the crate can inspect it;
/// the public chaining API always discards it.
pub(crate) fn run_observer<R, F>(config: &ObserverConfig, observer: F) -> Option<OptionalError>
where
    F: FnOnce() -> R,
    R: ObserverOutcome,
{
    let failure = match panic::catch_unwind(AssertUnwindSafe(observer)) {
        Ok(outcome) => outcome.into_failure()?,
        Err(payload) => panic_message(payload.as_ref()),
    };

    let error = OptionalError::ObserverFailure(failure);
    match &config.label {
        Some(label) => log::log!(config.report_level, "[{}] {}", label, error),
        None => log::log!(config.report_level, "{}", error),
    }
    Some(error)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "observer panicked".to_string()
    }
}

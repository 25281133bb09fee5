//! Uniform interception of failed hero operations.
//!
//! Every network-facing operation of [`HeroService`](super::HeroService) ends
//! in [`ErrorHandler::handle_error`]. A failure is written to the diagnostics
//! log, reported once on the message log, and replaced by the operation's
//! fallback value. Operations without a sensible fallback resolve to
//! [`LoggedAndSuppressed`] instead, which carries no transport detail: the
//! caller can tell the operation did not happen, but there is nothing left to
//! handle.

use thiserror::Error;

use super::ClientError;
use crate::messages::MessageLog;

/// Marker for an operation whose failure was already logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed (already reported)")]
pub struct LoggedAndSuppressed {
    pub operation: String,
}

/// Writes `<source>: <message>` lines to the shared message log.
#[derive(Debug, Clone)]
pub(crate) struct ErrorHandler {
    source: &'static str,
    messages: MessageLog,
}

impl ErrorHandler {
    pub(crate) fn new(source: &'static str, messages: MessageLog) -> Self {
        Self { source, messages }
    }

    pub(crate) fn log(&self, message: impl AsRef<str>) {
        self.messages.add(format!("{}: {}", self.source, message.as_ref()));
    }

    /// Build the recovery step for `operation`.
    ///
    /// Use with `Result::or_else`. With a fallback the result is always `Ok`.
    pub(crate) fn handle_error<T>(
        &self,
        operation: impl Into<String>,
        fallback: Option<T>,
    ) -> impl FnOnce(ClientError) -> Result<T, LoggedAndSuppressed> {
        let operation = operation.into();
        let handler = self.clone();
        move |error| {
            tracing::error!(source = handler.source, %operation, %error, "operation failed");
            handler.log(format!("{operation} failed: {error}"));
            fallback.ok_or(LoggedAndSuppressed { operation })
        }
    }
}

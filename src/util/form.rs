//! Loading/error bookkeeping around a single async submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page form funnels its API call through [`FormSubmission::submit`],
//! so views read `loading` and `error` from one place and never write their
//! own error handling.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt::Display;
use std::future::Future;

use leptos::prelude::*;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl FormStatus {
    /// Idle status carrying a local validation message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { loading: false, error: Some(message.into()) }
    }
}

/// Receives every status transition of a submission.
pub trait FormStatusSink {
    fn publish(&self, status: FormStatus);
}

impl FormStatusSink for RwSignal<FormStatus> {
    fn publish(&self, status: FormStatus) {
        self.set(status);
    }
}

/// Wraps an async action with loading/error state.
#[derive(Clone, Copy, Debug)]
pub struct FormSubmission<S, F> {
    sink: S,
    action: F,
}

impl<S: FormStatusSink, F> FormSubmission<S, F> {
    pub fn new(sink: S, action: F) -> Self {
        Self { sink, action }
    }

    /// Run the action once.
    ///
    /// Publishes `loading = true` with no error, then exactly one final
    /// status with `loading = false`. Returns `None` on failure, with the
    /// error's message (or a generic fallback) published as `error`.
    pub async fn submit<I, O, E, Fut>(&self, input: I) -> Option<O>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<O, E>>,
        E: Display,
    {
        self.sink.publish(FormStatus { loading: true, error: None });
        match (self.action)(input).await {
            Ok(output) => {
                self.sink.publish(FormStatus { loading: false, error: None });
                Some(output)
            }
            Err(err) => {
                log::error!("form submission failed: {err}");
                self.sink.publish(FormStatus { loading: false, error: Some(error_message(&err)) });
                None
            }
        }
    }
}

fn error_message(err: &impl Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_owned()
    } else {
        message
    }
}

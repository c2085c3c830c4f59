use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::http::ApiError;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<FormStatus>>>);

impl FormStatusSink for Recorder {
    fn publish(&self, status: FormStatus) {
        self.0.borrow_mut().push(status);
    }
}

impl Recorder {
    fn loading_trace(&self) -> Vec<bool> {
        self.0.borrow().iter().map(|s| s.loading).collect()
    }

    fn last(&self) -> FormStatus {
        self.0.borrow().last().cloned().unwrap()
    }
}

#[test]
fn success_returns_output_and_clears_loading() {
    let recorder = Recorder::default();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let form = FormSubmission::new(recorder.clone(), move |n: i32| {
        counter.set(counter.get() + 1);
        async move { Ok::<_, ApiError>(n * 2) }
    });

    let result = block_on(form.submit(21));

    assert_eq!(result, Some(42));
    assert_eq!(calls.get(), 1);
    assert_eq!(recorder.loading_trace(), vec![true, false]);
    assert_eq!(recorder.last(), FormStatus { loading: false, error: None });
}

#[test]
fn failure_sets_error_message_and_returns_none() {
    let recorder = Recorder::default();
    let form = FormSubmission::new(recorder.clone(), |(): ()| async {
        Err::<(), _>(ApiError::Business { code: 500, message: "bad".to_owned() })
    });

    let result = block_on(form.submit(()));

    assert_eq!(result, None);
    assert_eq!(recorder.loading_trace(), vec![true, false]);
    assert_eq!(recorder.last().error.as_deref(), Some("bad"));
}

#[test]
fn empty_error_message_uses_fallback() {
    let recorder = Recorder::default();
    let form = FormSubmission::new(recorder.clone(), |(): ()| async { Err::<(), _>(String::new()) });

    block_on(form.submit(()));

    assert_eq!(recorder.last().error.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
}

#[test]
fn loading_is_observed_during_the_call() {
    let recorder = Recorder::default();
    let observed = Rc::new(Cell::new(false));
    let probe = recorder.clone();
    let seen = observed.clone();
    let form = FormSubmission::new(recorder.clone(), move |(): ()| {
        seen.set(probe.last().loading);
        async { Ok::<_, String>(()) }
    });

    block_on(form.submit(()));

    assert!(observed.get());
    assert!(!recorder.last().loading);
}

#[test]
fn resubmit_clears_previous_error() {
    let recorder = Recorder::default();
    let fail = Rc::new(Cell::new(true));
    let flag = fail.clone();
    let form = FormSubmission::new(recorder.clone(), move |(): ()| {
        let failing = flag.get();
        async move { if failing { Err("nope".to_owned()) } else { Ok(()) } }
    });

    block_on(form.submit(()));
    assert_eq!(recorder.last().error.as_deref(), Some("nope"));

    fail.set(false);
    block_on(form.submit(()));

    let statuses = recorder.0.borrow().clone();
    assert_eq!(statuses[2], FormStatus { loading: true, error: None });
    assert_eq!(statuses[3], FormStatus { loading: false, error: None });
}

#[test]
fn failed_status_is_idle_with_message() {
    assert_eq!(FormStatus::failed("Enter a code."), FormStatus { loading: false, error: Some("Enter a code.".to_owned()) });
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tango_core::errors::TangoError;
use tango_core::logging_facility::test_capture::init_test_capture;
use tango_core::{log_op_end, log_op_error, log_op_start};
use tango_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, query = "犬");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].field("query"), Some("犬"));
}

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = TangoError::DuplicateDictionary {
        title: "T1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err_code"), Some("ERR_DUPLICATE_DICTIONARY"));
    assert_eq!(events[0].field("err_kind"), Some("DuplicateDictionary"));
    assert_eq!(events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_boundary_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1u64);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
    let starts = capture.count_events(|e| e.is(op_name, EVENT_START));
    assert_eq!(starts, 1);
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].component(), Some("logging_facility_tests"));
    assert_eq!(events[0].target, "logging_facility_tests");
}

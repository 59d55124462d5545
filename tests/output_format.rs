//! Integration tests for error and stack output formatting.

use errstack::{
    BoxError, CategoryError, Missing, StackPolicy, StackTracer, UserFacingError, errorf, join,
};

// ============================================================================
// Compact mode
// ============================================================================

#[test]
fn display_is_just_the_message() {
    let err = errstack::new("connection refused");
    assert_eq!(format!("{err}"), "connection refused");
}

#[test]
fn alternate_display_appends_the_compact_stack() {
    let err = errstack::new("connection refused");
    let output = format!("{err:#}");

    assert!(
        output.starts_with("connection refused: ["),
        "Should append the bracketed stack. Got:\n{}",
        output
    );
    assert!(output.ends_with(']'), "Got:\n{}", output);
    assert!(
        output.contains("output_format.rs:"),
        "Should reference this file by basename. Got:\n{}",
        output
    );
}

#[test]
fn compact_frames_use_the_file_basename() {
    let line = line!() + 1;
    let err = errstack::new("boom");

    let frame = &err.stack_trace().frames()[0];
    assert_eq!(format!("{frame}"), format!("output_format.rs:{line}"));
}

#[test]
fn compact_frames_are_space_separated() {
    let err = errstack::new("boom");
    let compact = format!("{}", err.stack_trace());

    let inner = compact
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .expect("bracketed");
    assert_eq!(
        inner.split(' ').count(),
        err.stack_trace().frames().len(),
        "One entry per frame. Got:\n{}",
        compact
    );
}

// ============================================================================
// Verbose mode
// ============================================================================

#[test]
fn debug_output_has_the_message_then_frames() {
    let err = errstack::new("boom");
    let output = format!("{err:?}");

    assert!(output.starts_with("boom\n"), "Got:\n{}", output);
    assert!(
        output.contains("\n\t"),
        "Frame locations should be tab-indented. Got:\n{}",
        output
    );
    assert!(
        output.contains("tests/output_format.rs:"),
        "Should carry the full path. Got:\n{}",
        output
    );
}

#[test]
fn verbose_frames_name_the_function() {
    let err = errstack::new("boom");
    let frame = &err.stack_trace().frames()[0];
    let output = format!("{frame:#}");

    assert!(
        output.contains("verbose_frames_name_the_function"),
        "Should name the calling function. Got:\n{}",
        output
    );
}

// ============================================================================
// Empty stacks
// ============================================================================

#[test]
fn preserve_nodes_render_an_empty_stack() {
    let inner = errstack::new("inner");
    let err = errorf!("outer: {}", inner; StackPolicy::Preserve);

    assert_eq!(format!("{err}"), "outer: inner");
    assert_eq!(format!("{err:#}"), "outer: inner: []");
    assert_eq!(format!("{err:?}"), "outer: inner");
}

// ============================================================================
// Aggregates and wrappers
// ============================================================================

#[test]
fn joined_errors_render_one_message_per_line() {
    let a: BoxError = Box::new(std::io::Error::other("a"));
    let b: BoxError = Box::new(std::io::Error::other("b"));
    let joined = join([Some(a), Some(b)]).expect("two remain");

    assert_eq!(format!("{joined}"), "a\nb");
}

#[test]
fn user_facing_renders_the_internal_message() {
    let cause = errstack::new("row 42 not in index");
    let err = UserFacingError::builder("that record does not exist")
        .from_error(cause)
        .build();

    assert_eq!(format!("{err}"), "row 42 not in index");
    assert!(format!("{err:#}").starts_with("row 42 not in index: ["));
    assert!(format!("{err:?}").starts_with("row 42 not in index\n"));
}

#[test]
fn category_debug_is_prefixed_with_the_label() {
    let err = CategoryError::<Missing>::new("gone");
    let output = format!("{err:?}");

    assert!(output.starts_with("missing: gone"), "Got:\n{}", output);
    assert_eq!(format!("{err}"), "gone");
}

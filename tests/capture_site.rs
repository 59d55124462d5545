//! Integration tests for capture-site accuracy: the first recorded frame
//! must point at the exact line of the constructor call.

use errstack::{StackPolicy, StackTracer, TracedError, errorf, stack_trace};

fn assert_frame_at(frame: &errstack::Frame, line: u32) {
    assert!(
        frame
            .file()
            .map(|file| file.ends_with("capture_site.rs"))
            .unwrap_or(false),
        "Frame should point at this file. Got:\n{:#}",
        frame
    );
    assert_eq!(
        frame.line(),
        Some(line),
        "Frame should point at the constructor call. Got:\n{:#}",
        frame
    );
}

// ============================================================================
// Direct construction
// ============================================================================

#[test]
fn new_records_the_calling_line() {
    let line = line!() + 1;
    let err = errstack::new("boom");

    let frames = err.stack_trace().frames();
    assert!(!frames.is_empty());
    assert_frame_at(&frames[0], line);
}

#[inline(never)]
fn make_error() -> TracedError {
    errstack::new("from helper")
}

#[test]
fn second_frame_is_the_callers_caller() {
    let line = line!() + 1;
    let err = make_error();

    let frames = err.stack_trace().frames();
    assert!(frames.len() >= 2);
    assert!(
        frames[0]
            .function()
            .map(|name| name.contains("make_error"))
            .unwrap_or(false),
        "Innermost frame should be the helper. Got:\n{:#}",
        frames[0]
    );
    assert_frame_at(&frames[1], line);
}

#[inline(always)]
fn inlined_make(message: &str) -> TracedError {
    errstack::new(message)
}

#[test]
fn inlined_constructors_resolve_to_the_caller() {
    let line = line!() + 1;
    let err = inlined_make("boom");

    // The helper merges into this frame; the outermost symbol names this
    // function and the call-site line.
    assert_frame_at(&err.stack_trace().frames()[0], line);
}

#[test]
fn category_new_records_the_calling_line() {
    let line = line!() + 1;
    let err = errstack::CategoryError::<errstack::Missing>::new("gone");

    assert_frame_at(&err.stack_trace().frames()[0], line);
}

// ============================================================================
// Skipping wrapper frames
// ============================================================================

#[inline(never)]
fn missing_record(message: &str) -> errstack::MissingError {
    errstack::CategoryError::<errstack::Missing>::builder(message)
        .skip(1)
        .build()
}

#[test]
fn skip_hides_the_wrapper_constructor() {
    let line = line!() + 1;
    let err = missing_record("gone");

    let frame = &err.stack_trace().frames()[0];
    assert!(
        !frame
            .function()
            .map(|name| name.contains("missing_record"))
            .unwrap_or(false),
        "Wrapper frame should be skipped. Got:\n{:#}",
        frame
    );
    assert_frame_at(frame, line);
}

// ============================================================================
// Wrapping
// ============================================================================

#[test]
fn wrap_overwrites_while_the_inner_stack_stays_reachable() {
    let inner_line = line!() + 1;
    let inner = errstack::new("inner");
    let outer_line = line!() + 1;
    let outer = errstack::with_stack(inner);

    assert_frame_at(&outer.stack_trace().frames()[0], outer_line);

    let inner = errstack::cause(&outer)
        .and_then(|cause| cause.downcast_ref::<TracedError>())
        .expect("inner error in tree");
    assert_frame_at(&inner.stack_trace().frames()[0], inner_line);
}

#[test]
fn errorf_captures_at_the_invocation_by_default() {
    let inner = errstack::new("inner");
    let line = line!() + 1;
    let err = errorf!("outer: {}", inner);

    assert_frame_at(&err.stack_trace().frames()[0], line);
}

#[test]
fn errorf_preserve_reports_the_existing_stack() {
    let inner_line = line!() + 1;
    let inner = errstack::new("inner");
    let err = errorf!("outer: {}", inner; StackPolicy::Preserve);

    let stack = stack_trace(&err).expect("inner stack survives");
    assert_frame_at(&stack.frames()[0], inner_line);
}

// ============================================================================
// Joined trees
// ============================================================================

#[test]
fn joined_nodes_report_the_first_childs_stack() {
    let a_line = line!() + 1;
    let a: errstack::BoxError = Box::new(errstack::new("a"));
    let b: errstack::BoxError = Box::new(errstack::new("b"));

    let joined = errstack::join([Some(a), Some(b)]).expect("two remain");
    let stack = stack_trace(&*joined).expect("children carry stacks");
    assert_frame_at(&stack.frames()[0], a_line);
}

// ============================================================================
// Depth limiting
// ============================================================================

#[inline(never)]
fn recurse(depth: usize) -> TracedError {
    if depth == 0 {
        errstack::new("bottom")
    } else {
        recurse(depth - 1)
    }
}

#[test]
fn capture_stops_at_the_depth_limit() {
    let err = recurse(40);
    assert_eq!(err.stack_trace().frames().len(), 32);
}

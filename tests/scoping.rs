//! Name resolution: lexical chain, globals, natives, and the write
//! rules at block and function boundaries.

mod common;

use common::{output_of, run};
use hazel::DiagnosticKind;
use indoc::indoc;

// =============================================================================
// BLOCK FRAMES
// =============================================================================

#[test]
fn test_blocks_are_transparent_for_existing_names() {
    let source = indoc! {"
        set x to 1
        if true:
            set x to 2
        echo x
    "};
    assert_eq!(output_of(source), vec!["2"]);
}

#[test]
fn test_names_first_set_in_a_block_do_not_escape() {
    let source = indoc! {"
        if true:
            set y to 9
        echo y
    "};
    let result = run(source);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ReferenceError);
    assert_eq!(result.output, vec!["null"]);
}

#[test]
fn test_loop_body_accumulates_into_outer_name() {
    let source = indoc! {"
        set total to 0
        set i to 0
        while i < 5:
            set total to total + i
            set i to i + 1
        echo total
    "};
    assert_eq!(output_of(source), vec!["10"]);
}

// =============================================================================
// FUNCTION BOUNDARIES
// =============================================================================

#[test]
fn test_function_writes_shadow_instead_of_mutating() {
    let source = indoc! {r#"
        set x to "outer"
        function f:
            set x to "inner"
            echo x
        f()
        echo x
    "#};
    assert_eq!(output_of(source), vec!["inner", "outer"]);
}

#[test]
fn test_read_before_write_sees_the_outer_value() {
    let source = indoc! {r#"
        set x to "outer"
        function f:
            echo x
            set x to "inner"
            echo x
        f()
        echo x
    "#};
    assert_eq!(output_of(source), vec!["outer", "inner", "outer"]);
}

#[test]
fn test_globals_cross_function_boundaries() {
    let source = indoc! {"
        set $score to 0
        function bump:
            set $score to $score + 1
        bump()
        bump()
        echo $score
    "};
    assert_eq!(output_of(source), vec!["2"]);
}

#[test]
fn test_undefined_global_is_a_reference_error() {
    let result = run("echo $nope\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ReferenceError);
}

// =============================================================================
// CLOSURES
// =============================================================================

#[test]
fn test_closures_share_their_defining_frame() {
    let source = indoc! {"
        set fns to []
        set i to 0
        while i < 3:
            function report:
                return i
            append(fns, report)
            set i to i + 1
        echo fns[0]()
        echo fns[1]()
        echo fns[2]()
    "};
    // All three closures observe the loop counter's final value.
    assert_eq!(output_of(source), vec!["3", "3", "3"]);
}

#[test]
fn test_closure_keeps_its_frame_alive_after_the_call_returns() {
    let source = indoc! {"
        function counter:
            set n to 41
            function peek:
                return n + 1
            return peek
        set p to counter()
        echo p()
    "};
    assert_eq!(output_of(source), vec!["42"]);
}

// =============================================================================
// NATIVE TIER
// =============================================================================

#[test]
fn test_local_definitions_shadow_natives() {
    let source = indoc! {r#"
        function len(xs):
            return "mine"
        echo len([1, 2])
    "#};
    assert_eq!(output_of(source), vec!["mine"]);
}

#[test]
fn test_natives_resolve_when_nothing_shadows_them() {
    assert_eq!(output_of("echo len(\"abc\")\n"), vec!["3"]);
}

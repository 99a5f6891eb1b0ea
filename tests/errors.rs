//! Load-time faults abort before anything runs; runtime faults are
//! recorded and execution continues.

mod common;

use common::run;
use hazel::DiagnosticKind;
use indoc::indoc;

// =============================================================================
// FATAL LOAD ERRORS
// =============================================================================

#[test]
fn test_tab_indentation_is_fatal() {
    let result = run("if true:\n\techo 1\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::IndentationError);
    assert!(result.output.is_empty());
}

#[test]
fn test_indent_not_a_multiple_of_four_is_fatal() {
    let result = run("if true:\n   echo 1\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::IndentationError);
}

#[test]
fn test_indent_jump_of_two_levels_is_fatal() {
    let result = run("if true:\n        echo 1\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::IndentationError);
}

#[test]
fn test_unterminated_string_is_fatal() {
    let result = run("echo \"oops\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::LexError);
    assert!(result.output.is_empty());
}

#[test]
fn test_parse_error_runs_nothing() {
    // The echo on line 1 is fine, but nothing runs after a failed load.
    let result = run("echo 1\nset x to\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ParseError);
    assert!(result.output.is_empty());
}

#[test]
fn test_fatal_diagnostics_carry_a_position() {
    let result = run("set x to 1\nset y to\n");
    assert_eq!(result.diagnostics[0].line, 2);
}

// =============================================================================
// FAULT-TOLERANT RUNTIME ERRORS
// =============================================================================

#[test]
fn test_division_by_zero_degrades_to_null_and_continues() {
    let source = indoc! {"
        set x to 1 / 0
        echo x
        echo \"after\"
    "};
    let result = run(source);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::DivisionError);
    assert_eq!(result.output, vec!["null", "after"]);
}

#[test]
fn test_modulo_by_zero_is_a_division_error() {
    let result = run("echo 5 % 0\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::DivisionError);
}

#[test]
fn test_whole_expression_degrades_not_just_the_subterm() {
    // The fault inside the parentheses nulls out the surrounding sum too.
    let result = run("echo 1 + (2 / 0)\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.output, vec!["null"]);
}

#[test]
fn test_each_faulting_turn_gets_its_own_diagnostic() {
    let source = indoc! {"
        echo missing
        echo 1 / 0
        echo [1][5]
    "};
    let result = run(source);
    let kinds: Vec<DiagnosticKind> = result.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::ReferenceError,
            DiagnosticKind::DivisionError,
            DiagnosticKind::RangeError,
        ]
    );
    assert_eq!(result.output, vec!["null", "null", "null"]);
}

#[test]
fn test_faulting_condition_is_false() {
    let source = indoc! {"
        if missing > 1:
            echo \"taken\"
        echo \"done\"
    "};
    let result = run(source);
    assert_eq!(result.output, vec!["done"]);
}

#[test]
fn test_runtime_diagnostics_carry_a_position() {
    let result = run("set x to 1\necho x / 0\n");
    let d = &result.diagnostics[0];
    assert_eq!(d.line, 2);
    assert!(d.column > 1);
}

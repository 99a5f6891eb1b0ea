//! Expression operator semantics, end to end through `execute`.

mod common;

use common::{output_of, run};
use hazel::DiagnosticKind;
use indoc::indoc;

// =============================================================================
// ARITHMETIC
// =============================================================================

#[test]
fn test_multiplication_before_addition() {
    assert_eq!(output_of("echo 2 + 3 * 4\n"), vec!["14"]);
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(output_of("echo (2 + 3) * 4\n"), vec!["20"]);
}

#[test]
fn test_whole_numbers_print_without_decimal() {
    assert_eq!(output_of("echo 10 / 4\necho 10 / 5\n"), vec!["2.5", "2"]);
}

#[test]
fn test_modulo() {
    assert_eq!(output_of("echo 10 % 3\n"), vec!["1"]);
}

#[test]
fn test_unary_negation() {
    assert_eq!(output_of("set x to 4\necho -x\n"), vec!["-4"]);
}

#[test]
fn test_plus_concatenates_when_either_side_is_a_string() {
    let source = indoc! {r#"
        echo "n=" + 3
        echo 3 + "!"
        echo "a" + "b"
    "#};
    assert_eq!(output_of(source), vec!["n=3", "3!", "ab"]);
}

#[test]
fn test_adding_a_list_is_a_type_error() {
    let result = run("echo [1] + 2\necho \"after\"\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::TypeError);
    assert_eq!(result.output, vec!["null", "after"]);
}

// =============================================================================
// COMPARISON AND EQUALITY
// =============================================================================

#[test]
fn test_natural_language_comparisons() {
    let source = indoc! {"
        echo 1 is 1
        echo 1 is not 2
        echo 3 is greater than 2
        echo 2 is less than 3
        echo 2 is at least 2
        echo 2 is at most 1
    "};
    assert_eq!(
        output_of(source),
        vec!["true", "true", "true", "true", "true", "false"]
    );
}

#[test]
fn test_strings_compare_lexicographically() {
    assert_eq!(output_of("echo \"apple\" < \"banana\"\n"), vec!["true"]);
}

#[test]
fn test_equality_across_types_is_false_not_an_error() {
    let result = run("echo 1 is \"1\"\necho null is not 0\n");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.output, vec!["false", "true"]);
}

#[test]
fn test_ordering_across_types_is_a_type_error() {
    let result = run("echo 1 < \"a\"\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::TypeError);
    assert_eq!(result.output, vec!["null"]);
}

// =============================================================================
// LOGIC AND MEMBERSHIP
// =============================================================================

#[test]
fn test_and_or_always_yield_booleans() {
    let source = indoc! {"
        echo 0 or 5
        echo 0 and 5
        echo not null
    "};
    assert_eq!(output_of(source), vec!["true", "false", "true"]);
}

#[test]
fn test_and_short_circuits() {
    // The undefined name on the right is never evaluated.
    let result = run("echo false and missing\n");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.output, vec!["false"]);
}

#[test]
fn test_list_membership() {
    let source = indoc! {"
        set xs to [1, 2, 3]
        echo xs has 2
        echo 5 is in xs
    "};
    assert_eq!(output_of(source), vec!["true", "false"]);
}

#[test]
fn test_substring_membership() {
    assert_eq!(output_of("echo \"ell\" is in \"hello\"\n"), vec!["true"]);
}

#[test]
fn test_comparison_binds_tighter_than_membership() {
    // Parsed as (x is 2) is in flags.
    let source = indoc! {"
        set x to 2
        set flags to [true]
        echo x is 2 is in flags
    "};
    assert_eq!(output_of(source), vec!["true"]);
}

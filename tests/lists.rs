//! List and string indexing, slicing, and identity semantics.

mod common;

use common::{output_of, run};
use hazel::DiagnosticKind;
use indoc::indoc;

// =============================================================================
// INDEXING
// =============================================================================

#[test]
fn test_negative_index_counts_from_the_end() {
    let source = indoc! {"
        set items to [10, 20, 30]
        echo items[-1]
        echo items[-3]
    "};
    assert_eq!(output_of(source), vec!["30", "10"]);
}

#[test]
fn test_out_of_range_index_is_a_range_error() {
    let result = run("set items to [1, 2]\necho items[5]\necho \"after\"\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::RangeError);
    assert_eq!(result.output, vec!["null", "after"]);
}

#[test]
fn test_index_assignment_mutates_in_place() {
    let source = indoc! {"
        set items to [1, 2, 3]
        set items[1] to 99
        echo items
    "};
    assert_eq!(output_of(source), vec!["[1, 99, 3]"]);
}

#[test]
fn test_out_of_range_assignment_is_a_no_op_with_a_diagnostic() {
    let source = indoc! {"
        set items to [1, 2]
        set items[9] to 0
        echo items
    "};
    let result = run(source);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::RangeError);
    assert_eq!(result.output, vec!["[1, 2]"]);
}

#[test]
fn test_string_indexing_yields_one_character() {
    assert_eq!(output_of("echo \"hello\"[1]\n"), vec!["e"]);
}

// =============================================================================
// SLICING
// =============================================================================

#[test]
fn test_slices_are_half_open_and_clamped() {
    let source = indoc! {"
        set xs to [1, 2, 3, 4]
        echo xs[1:3]
        echo xs[2:99]
        echo xs[:2]
        echo xs[2:]
    "};
    assert_eq!(
        output_of(source),
        vec!["[2, 3]", "[3, 4]", "[1, 2]", "[3, 4]"]
    );
}

#[test]
fn test_slice_with_negative_bounds() {
    assert_eq!(output_of("echo \"hello\"[-3:]\n"), vec!["llo"]);
}

#[test]
fn test_slices_do_not_alias_the_source() {
    let source = indoc! {"
        set xs to [1, 2, 3, 4]
        set ys to xs[1:3]
        set ys[0] to 99
        echo xs[1]
        echo ys[0]
    "};
    assert_eq!(output_of(source), vec!["2", "99"]);
}

#[test]
fn test_inverted_slice_is_empty() {
    assert_eq!(output_of("echo [1, 2, 3][2:1]\n"), vec!["[]"]);
}

// =============================================================================
// IDENTITY
// =============================================================================

#[test]
fn test_lists_assign_by_reference() {
    let source = indoc! {"
        set a to [1]
        set b to a
        append(b, 2)
        echo a
    "};
    assert_eq!(output_of(source), vec!["[1, 2]"]);
}

#[test]
fn test_numbers_assign_by_copy() {
    let source = indoc! {"
        set n to 1
        set m to n
        set m to 5
        echo n
    "};
    assert_eq!(output_of(source), vec!["1"]);
}

#[test]
fn test_self_containing_list_prints_finitely() {
    let source = indoc! {"
        set a to [1]
        add a to a
        echo a
    "};
    assert_eq!(output_of(source), vec!["[1, [...]]"]);
}

#[test]
fn test_self_containing_lists_compare_finitely() {
    let source = indoc! {"
        set a to [1]
        add a to a
        set b to [1]
        add b to b
        echo a is b
        echo a is [1]
    "};
    assert_eq!(output_of(source), vec!["true", "false"]);
}

#[test]
fn test_list_equality_is_structural() {
    assert_eq!(output_of("echo [1, [2]] is [1, [2]]\n"), vec!["true"]);
}

#[test]
fn test_length_property() {
    let source = indoc! {"
        echo [1, 2, 3].length
        echo \"hi\".length
    "};
    assert_eq!(output_of(source), vec!["3", "2"]);
}

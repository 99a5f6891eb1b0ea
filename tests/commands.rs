//! The command-statement vocabulary and its registration extension
//! point.

mod common;

use std::rc::Rc;

use common::{output_of, run};
use hazel::ast::CommandArg;
use hazel::interpreter::CommandHandler;
use hazel::{ArgShape, CommandForm, DiagnosticKind, Interpreter, RuntimeError};
use indoc::indoc;

// =============================================================================
// STANDARD VOCABULARY
// =============================================================================

#[test]
fn test_echo_and_say_write_one_record_each() {
    let source = indoc! {r#"
        echo "first"
        say "second"
    "#};
    assert_eq!(output_of(source), vec!["first", "second"]);
}

#[test]
fn test_echo_of_a_faulting_expression_still_writes_null() {
    let result = run("echo missing\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ReferenceError);
    assert_eq!(result.output, vec!["null"]);
}

#[test]
fn test_increase_and_decrease() {
    let source = indoc! {"
        set score to 10
        increase score by 5
        decrease score by 2
        echo score
    "};
    assert_eq!(output_of(source), vec!["13"]);
}

#[test]
fn test_increase_reaches_through_index_targets() {
    let source = indoc! {"
        set scores to [1, 2]
        increase scores[1] by 10
        echo scores
    "};
    assert_eq!(output_of(source), vec!["[1, 12]"]);
}

#[test]
fn test_increase_of_a_non_number_is_a_type_error() {
    let result = run("set name to \"bo\"\nincrease name by 1\necho name\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::TypeError);
    assert_eq!(result.output, vec!["bo"]);
}

#[test]
fn test_add_to_and_remove_from() {
    let source = indoc! {"
        set xs to [1, 2]
        add 3 to xs
        remove 1 from xs
        echo xs
    "};
    assert_eq!(output_of(source), vec!["[2, 3]"]);
}

#[test]
fn test_remove_of_an_absent_element_is_a_no_op() {
    let source = indoc! {"
        set xs to [1, 2]
        remove 9 from xs
        echo xs
    "};
    assert_eq!(output_of(source), vec!["[1, 2]"]);
}

#[test]
fn test_remove_drops_only_the_first_match() {
    let source = indoc! {"
        set xs to [7, 8, 7]
        remove 7 from xs
        echo xs
    "};
    assert_eq!(output_of(source), vec!["[8, 7]"]);
}

// =============================================================================
// REGISTRATION
// =============================================================================

#[test]
fn test_registered_commands_parse_and_dispatch() {
    let mut interpreter = Interpreter::new();
    let handler: CommandHandler = Rc::new(|interpreter, args, pos| {
        let Some(CommandArg::Expr(expr)) = args.first() else {
            return Err(RuntimeError::type_error("shout needs a value", pos));
        };
        let value = interpreter.evaluate(expr);
        interpreter.write_output(value.to_output_string().to_uppercase());
        Ok(())
    });
    interpreter.register_command(CommandForm::new("shout", vec![ArgShape::Expr]), handler);
    interpreter.run_source("shout \"hi\" + \"!\"\n");
    assert_eq!(interpreter.output(), ["HI!"]);
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn test_word_slots_capture_raw_words() {
    let mut interpreter = Interpreter::new();
    let handler: CommandHandler = Rc::new(|interpreter, args, pos| {
        let Some(CommandArg::Word(direction)) = args.first() else {
            return Err(RuntimeError::type_error("go needs a direction", pos));
        };
        interpreter.write_output(format!("going {}", direction));
        Ok(())
    });
    interpreter.register_command(CommandForm::new("go", vec![ArgShape::Word]), handler);
    // `north` is never resolved as a variable; the word itself is the
    // argument.
    interpreter.run_source("go north\n");
    assert_eq!(interpreter.output(), ["going north"]);
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn test_unregistered_keyword_is_an_ordinary_expression() {
    // Without a registration, `shout` is just an undefined name.
    let result = run("shout\n");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ReferenceError);
}

// =============================================================================
// ASK
// =============================================================================

#[test]
fn test_ask_reads_from_the_input_source() {
    let mut interpreter = Interpreter::new().with_input(|prompt| {
        assert_eq!(prompt, "name?");
        Some("Ada".to_string())
    });
    interpreter.run_source("ask \"name?\" as who\necho \"hi \" + who\n");
    assert_eq!(interpreter.output(), ["hi Ada"]);
}

#[test]
fn test_ask_with_an_exhausted_source_yields_an_empty_string() {
    let mut interpreter = Interpreter::new().with_input(|_| None);
    interpreter.run_source("ask \"?\" as reply\necho reply is \"\"\n");
    assert_eq!(interpreter.output(), ["true"]);
}

#[test]
fn test_ask_without_an_input_source_yields_an_empty_string() {
    let source = indoc! {r#"
        ask "?" as reply
        echo reply.length
    "#};
    assert_eq!(output_of(source), vec!["0"]);
}

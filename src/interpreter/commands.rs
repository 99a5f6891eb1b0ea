//! Evaluator-side half of the command extension point: one handler per
//! registered keyword. The standard vocabulary lives here; the domain
//! layer adds its own pairs through `Interpreter::register_command`.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::CommandArg;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::evaluator::Interpreter;
use crate::token::Pos;
use crate::value::Value;

pub type CommandHandler = Rc<dyn Fn(&mut Interpreter, &[CommandArg], Pos) -> Result<(), RuntimeError>>;

pub(crate) fn standard_handlers() -> IndexMap<String, CommandHandler> {
    let mut handlers: IndexMap<String, CommandHandler> = IndexMap::new();
    let echo_handler: CommandHandler = Rc::new(echo);
    handlers.insert("echo".to_string(), echo_handler.clone());
    handlers.insert("say".to_string(), echo_handler);
    let inc: CommandHandler = Rc::new(|i, args, pos| adjust(i, args, pos, "increase", 1.0));
    handlers.insert("increase".to_string(), inc);
    let dec: CommandHandler = Rc::new(|i, args, pos| adjust(i, args, pos, "decrease", -1.0));
    handlers.insert("decrease".to_string(), dec);
    let add_handler: CommandHandler = Rc::new(add);
    handlers.insert("add".to_string(), add_handler);
    let remove_handler: CommandHandler = Rc::new(remove);
    handlers.insert("remove".to_string(), remove_handler);
    handlers
}

/// Writes exactly one record to the output sink, faults included: an
/// erroring argument degrades to `null` and still prints.
fn echo(interp: &mut Interpreter, args: &[CommandArg], pos: Pos) -> Result<(), RuntimeError> {
    let Some(CommandArg::Expr(expr)) = args.first() else {
        return Err(RuntimeError::type_error("echo needs a value", pos));
    };
    let value = interp.evaluate(expr);
    interp.write_output(value.to_output_string());
    Ok(())
}

fn adjust(
    interp: &mut Interpreter,
    args: &[CommandArg],
    pos: Pos,
    keyword: &str,
    sign: f64,
) -> Result<(), RuntimeError> {
    let (Some(CommandArg::Lvalue(target)), Some(CommandArg::Expr(amount))) =
        (args.first(), args.get(1))
    else {
        return Err(RuntimeError::type_error(
            format!("malformed '{}' command", keyword),
            pos,
        ));
    };
    let current = interp.eval(target)?;
    let amount = interp.eval(amount)?;
    match (current.as_number(), amount.as_number()) {
        (Some(current), Some(amount)) => {
            interp.assign_to(target, Value::Number(current + sign * amount));
            Ok(())
        }
        _ => Err(RuntimeError::type_error(
            format!(
                "{} needs numbers, got {} and {}",
                keyword,
                current.type_name(),
                amount.type_name()
            ),
            pos,
        )),
    }
}

fn two_exprs<'a>(
    args: &'a [CommandArg],
    keyword: &str,
    pos: Pos,
) -> Result<(&'a crate::ast::Expr, &'a crate::ast::Expr), RuntimeError> {
    match (args.first(), args.get(1)) {
        (Some(CommandArg::Expr(a)), Some(CommandArg::Expr(b))) => Ok((a, b)),
        _ => Err(RuntimeError::type_error(
            format!("malformed '{}' command", keyword),
            pos,
        )),
    }
}

fn add(interp: &mut Interpreter, args: &[CommandArg], pos: Pos) -> Result<(), RuntimeError> {
    let (value_expr, target_expr) = two_exprs(args, "add", pos)?;
    let value = interp.eval(value_expr)?;
    let target = interp.eval(target_expr)?;
    match target {
        Value::List(items) => {
            items.borrow_mut().push(value);
            Ok(())
        }
        other => Err(RuntimeError::type_error(
            format!("cannot add to {}", other.type_name()),
            pos,
        )),
    }
}

/// Removes the first structurally-equal element; absent is a no-op.
fn remove(interp: &mut Interpreter, args: &[CommandArg], pos: Pos) -> Result<(), RuntimeError> {
    let (value_expr, target_expr) = two_exprs(args, "remove", pos)?;
    let value = interp.eval(value_expr)?;
    let target = interp.eval(target_expr)?;
    match target {
        Value::List(items) => {
            let position = items.borrow().iter().position(|v| *v == value);
            if let Some(i) = position {
                items.borrow_mut().remove(i);
            }
            Ok(())
        }
        other => Err(RuntimeError::type_error(
            format!("cannot remove from {}", other.type_name()),
            pos,
        )),
    }
}

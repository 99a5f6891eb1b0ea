//! Tree-walking evaluator. Statements flow through [`ControlFlow`]
//! signals; expression faults are recorded as diagnostics and degrade
//! to `null`, so a long-running script survives an isolated bad access.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::{BinaryOp, Expr, LogicalOp, Stmt, UnaryOp};
use crate::diagnostic::Diagnostic;
use crate::interpreter::builtins::BuiltinRegistry;
use crate::interpreter::commands::{standard_handlers, CommandHandler};
use crate::interpreter::control_flow::ControlFlow;
use crate::interpreter::environment::{Environment, Globals};
use crate::interpreter::error::RuntimeError;
use crate::interpreter::parser::Parser;
use crate::interpreter::registry::{CommandForm, CommandRegistry};
use crate::interpreter::scheduler;
use crate::lexer::Lexer;
use crate::token::Pos;
use crate::value::{Function, Value};

/// Prompt-to-reply function backing `ask`. `None` means the source is
/// exhausted; `ask` then yields `""`.
pub type InputSource = Box<dyn FnMut(&str) -> Option<String>>;

/// Hook consumed by the domain layer. A returned statement block runs
/// immediately in the current environment.
pub type EventHook = Box<dyn FnMut(&EventRecord) -> Option<Vec<Stmt>>>;

/// Passed through the event hook untouched; the core does not interpret
/// the kind or name beyond delivering them.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub kind: String,
    pub name: String,
    pub bindings: Vec<(String, Value)>,
}

/// Everything a run produced, in order.
#[derive(Debug)]
pub struct Execution {
    pub output: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Value of the last top-level expression statement, if any.
    pub value: Option<Value>,
}

/// One-shot convenience: lex, parse and run with default I/O.
pub fn execute(source: &str) -> Execution {
    let mut interpreter = Interpreter::new();
    interpreter.run_source(source);
    interpreter.into_execution()
}

pub struct Interpreter {
    env: Rc<Environment>,
    globals: Rc<Globals>,
    builtins: Rc<BuiltinRegistry>,
    registry: CommandRegistry,
    handlers: IndexMap<String, CommandHandler>,
    /// name -> deadline on the logical tick clock.
    timers: IndexMap<String, u64>,
    clock: u64,
    call_depth: usize,
    diagnostics: Vec<Diagnostic>,
    output: Vec<String>,
    input: Option<InputSource>,
    on_event: Option<EventHook>,
    last_value: Option<Value>,
}

const MAX_CALL_DEPTH: usize = 256;

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: Environment::script(),
            globals: Rc::new(Globals::new()),
            builtins: Rc::new(BuiltinRegistry::standard()),
            registry: CommandRegistry::standard(),
            handlers: standard_handlers(),
            timers: IndexMap::new(),
            clock: 0,
            call_depth: 0,
            diagnostics: Vec::new(),
            output: Vec::new(),
            input: None,
            on_event: None,
            last_value: None,
        }
    }

    pub fn with_input(mut self, input: impl FnMut(&str) -> Option<String> + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn with_event_hook(
        mut self,
        hook: impl FnMut(&EventRecord) -> Option<Vec<Stmt>> + 'static,
    ) -> Self {
        self.on_event = Some(Box::new(hook));
        self
    }

    /// Registers a statement form and its handler in one step; the
    /// parser side and the evaluator side of the extension point stay
    /// in lockstep.
    pub fn register_command(&mut self, form: CommandForm, handler: CommandHandler) {
        self.handlers.insert(form.keyword.clone(), handler);
        self.registry.register(form);
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_execution(self) -> Execution {
        Execution {
            output: self.output,
            diagnostics: self.diagnostics,
            value: self.last_value,
        }
    }

    /// Loads and runs a program. A fatal lex, indentation or parse
    /// error leaves its diagnostic and runs nothing.
    pub fn run_source(&mut self, source: &str) {
        let tokens = match Lexer::tokenize(source) {
            Ok(tokens) => tokens,
            Err(fault) => {
                self.diagnostics.push(fault.to_diagnostic());
                return;
            }
        };
        let program = match Parser::with_registry(tokens, self.registry.clone()).parse() {
            Ok(program) => program,
            Err(fault) => {
                self.diagnostics.push(fault.to_diagnostic());
                return;
            }
        };
        self.run(&program);
    }

    /// Runs one top-level statement list (one "turn"); timers are
    /// polled at its end.
    pub fn run(&mut self, program: &[Stmt]) {
        for stmt in program {
            if let ControlFlow::Return(_) = self.execute_statement(stmt) {
                break;
            }
        }
        self.turn_boundary();
    }

    // ---- statements ---------------------------------------------------

    pub fn execute_statement(&mut self, stmt: &Stmt) -> ControlFlow {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                let value = self.evaluate(value);
                self.assign_to(target, value);
                ControlFlow::Normal
            }
            Stmt::If {
                condition,
                then_body,
                else_ifs,
                else_body,
                ..
            } => {
                if self.evaluate(condition).is_truthy() {
                    return self.run_block(then_body);
                }
                for (condition, body) in else_ifs {
                    if self.evaluate(condition).is_truthy() {
                        return self.run_block(body);
                    }
                }
                match else_body {
                    Some(body) => self.run_block(body),
                    None => ControlFlow::Normal,
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                while self.evaluate(condition).is_truthy() {
                    match self.run_block(body) {
                        ControlFlow::Break => break,
                        ControlFlow::Return(value) => return ControlFlow::Return(value),
                        ControlFlow::Normal | ControlFlow::Continue => {}
                    }
                }
                ControlFlow::Normal
            }
            Stmt::FunctionDef {
                name, params, body, ..
            } => {
                let function = Value::Function(Rc::new(Function {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    env: self.env.clone(),
                }));
                self.env.assign(name, function);
                ControlFlow::Normal
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr),
                    None => Value::Null,
                };
                ControlFlow::Return(value)
            }
            Stmt::Break(_) => ControlFlow::Break,
            Stmt::Continue(_) => ControlFlow::Continue,
            Stmt::Ask {
                prompt, target, ..
            } => {
                let prompt = match prompt {
                    Some(expr) => self.evaluate(expr).to_output_string(),
                    None => String::new(),
                };
                let reply = self
                    .input
                    .as_mut()
                    .and_then(|source| source(&prompt))
                    .unwrap_or_default();
                if let Some(name) = target {
                    self.env.assign(name, Value::str(reply));
                }
                ControlFlow::Normal
            }
            // Outside a parallel block a wait is a no-op; the scheduler
            // intercepts waits before they reach this point.
            Stmt::Wait { duration, .. } => {
                if let Some(expr) = duration {
                    self.evaluate(expr);
                }
                ControlFlow::Normal
            }
            Stmt::Parallel { body, .. } => {
                scheduler::run_parallel(self, body);
                ControlFlow::Normal
            }
            Stmt::StartTimer {
                name,
                duration,
                unit,
                pos,
            } => {
                let duration = self.evaluate(duration);
                match duration.as_number() {
                    Some(n) if n >= 0.0 => {
                        // The float cast saturates, so an absurd duration
                        // becomes a deadline at the end of the clock
                        // instead of wrapping past it.
                        let ticks = (n * unit.ticks()).ceil() as u64;
                        self.timers
                            .insert(name.clone(), self.clock.saturating_add(ticks));
                    }
                    _ => {
                        self.record(RuntimeError::type_error(
                            format!(
                                "timer duration must be a non-negative number, got {}",
                                duration.type_name()
                            ),
                            *pos,
                        ));
                    }
                }
                ControlFlow::Normal
            }
            Stmt::StopTimer { name, .. } => {
                // Idempotent when the timer never existed.
                self.timers.shift_remove(name);
                ControlFlow::Normal
            }
            Stmt::Command { keyword, args, pos } => {
                match self.handlers.get(keyword).cloned() {
                    Some(handler) => {
                        if let Err(fault) = handler(self, args, *pos) {
                            self.record(fault);
                        }
                    }
                    None => {
                        self.record(RuntimeError::reference(
                            format!("no handler registered for command '{}'", keyword),
                            *pos,
                        ));
                    }
                }
                ControlFlow::Normal
            }
            Stmt::Expr(expr) => {
                let value = self.evaluate(expr);
                // Only top-level expression statements feed the run's
                // reported value; ones inside a call body do not.
                if self.call_depth == 0 {
                    self.last_value = Some(value);
                }
                ControlFlow::Normal
            }
        }
    }

    /// Executes an `if`/`while` body in a fresh transparent block frame,
    /// one per entry (so one per loop iteration).
    fn run_block(&mut self, body: &[Stmt]) -> ControlFlow {
        let saved = self.env.clone();
        self.env = Environment::block(saved.clone());
        let mut flow = ControlFlow::Normal;
        for stmt in body {
            flow = self.execute_statement(stmt);
            if !flow.is_normal() {
                break;
            }
        }
        self.env = saved;
        flow
    }

    // ---- expressions --------------------------------------------------

    /// Fault-tolerant evaluation: a runtime fault is recorded and the
    /// expression degrades to `null`.
    pub fn evaluate(&mut self, expr: &Expr) -> Value {
        match self.eval(expr) {
            Ok(value) => value,
            Err(fault) => {
                self.record(fault);
                Value::Null
            }
        }
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(n, _) => Ok(Value::Number(*n)),
            Expr::Str(s, _) => Ok(Value::str(s)),
            Expr::Bool(b, _) => Ok(Value::Bool(*b)),
            Expr::Null(_) => Ok(Value::Null),
            Expr::List(items, _) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item)?);
                }
                Ok(Value::list(values))
            }
            Expr::Ident(name, pos) => self.resolve(name, *pos),
            Expr::Global(name, pos) => self.globals.get(name).ok_or_else(|| {
                RuntimeError::reference(format!("undefined global '${}'", name), *pos)
            }),
            Expr::Property { object, name, pos } => {
                let object = self.eval(object)?;
                property_of(&object, name, *pos)
            }
            Expr::Index { object, index, pos } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                index_into(&object, &index, *pos)
            }
            Expr::Slice {
                object, start, end, ..
            } => {
                let pos = expr.pos();
                let object = self.eval(object)?;
                let start = match start {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                let end = match end {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                slice_of(&object, start.as_ref(), end.as_ref(), pos)
            }
            Expr::Unary { op, operand, pos } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Neg => match value.as_number() {
                        Some(n) => Ok(Value::Number(-n)),
                        None => Err(RuntimeError::type_error(
                            format!("cannot negate {}", value.type_name()),
                            *pos,
                        )),
                    },
                }
            }
            Expr::Binary {
                left, op, right, pos
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary_op(*op, &left, &right, *pos)
            }
            Expr::Logical {
                left, op, right, ..
            } => {
                let left = self.eval(left)?;
                match op {
                    LogicalOp::And => {
                        if !left.is_truthy() {
                            return Ok(Value::Bool(false));
                        }
                        Ok(Value::Bool(self.eval(right)?.is_truthy()))
                    }
                    LogicalOp::Or => {
                        if left.is_truthy() {
                            return Ok(Value::Bool(true));
                        }
                        Ok(Value::Bool(self.eval(right)?.is_truthy()))
                    }
                }
            }
            Expr::Call { callee, args, pos } => {
                let callee = self.eval(callee)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.call_value(&callee, &values, *pos)
            }
        }
    }

    /// LGN read: the lexical chain, then the global frame, then the
    /// native table.
    fn resolve(&self, name: &str, pos: Pos) -> Result<Value, RuntimeError> {
        if let Some(value) = self.env.get(name) {
            return Ok(value);
        }
        if let Some(value) = self.globals.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = self.builtins.get(name) {
            return Ok(Value::Native(builtin));
        }
        Err(RuntimeError::reference(
            format!("undefined name '{}'", name),
            pos,
        ))
    }

    fn call_value(
        &mut self,
        callee: &Value,
        args: &[Value],
        pos: Pos,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Native(builtin) => {
                if !builtin.arity.accepts(args.len()) {
                    return Err(RuntimeError::type_error(
                        format!(
                            "{} expects {} arguments, got {}",
                            builtin.name,
                            builtin.arity,
                            args.len()
                        ),
                        pos,
                    ));
                }
                Ok((builtin.func)(args))
            }
            Value::Function(function) => {
                if args.len() != function.params.len() {
                    return Err(RuntimeError::type_error(
                        format!(
                            "{} expects {} arguments, got {}",
                            function.name,
                            function.params.len(),
                            args.len()
                        ),
                        pos,
                    ));
                }
                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(RuntimeError::range("maximum call depth exceeded", pos));
                }
                let function = function.clone();
                self.call_depth += 1;
                let saved = self.env.clone();
                self.env = Environment::function(function.env.clone());
                for (param, value) in function.params.iter().zip(args) {
                    self.env.define(param.clone(), value.clone());
                }
                let mut result = Value::Null;
                for stmt in &function.body {
                    match self.execute_statement(stmt) {
                        ControlFlow::Return(value) => {
                            result = value;
                            break;
                        }
                        // A stray break or continue ends the body; there
                        // is no loop left to consume it.
                        ControlFlow::Break | ControlFlow::Continue => break,
                        ControlFlow::Normal => {}
                    }
                }
                self.env = saved;
                self.call_depth -= 1;
                Ok(result)
            }
            other => Err(RuntimeError::type_error(
                format!("{} is not callable", other.type_name()),
                pos,
            )),
        }
    }

    // ---- assignment ---------------------------------------------------

    /// Lvalue write; index and property targets are validated here, at
    /// evaluation time. Faults degrade to a no-op plus a diagnostic.
    pub fn assign_to(&mut self, target: &Expr, value: Value) {
        if let Err(fault) = self.try_assign(target, value) {
            self.record(fault);
        }
    }

    fn try_assign(&mut self, target: &Expr, value: Value) -> Result<(), RuntimeError> {
        match target {
            Expr::Ident(name, _) => {
                self.env.assign(name, value);
                Ok(())
            }
            Expr::Global(name, _) => {
                self.globals.set(name.clone(), value);
                Ok(())
            }
            Expr::Property { object, name, pos } => {
                let object = self.eval(object)?;
                match object {
                    Value::Object(instance) => {
                        instance.borrow_mut().properties.insert(name.clone(), value);
                        Ok(())
                    }
                    other => Err(RuntimeError::type_error(
                        format!(
                            "cannot set property '{}' on {}",
                            name,
                            other.type_name()
                        ),
                        *pos,
                    )),
                }
            }
            Expr::Index { object, index, pos } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                match object {
                    Value::List(items) => {
                        let len = items.borrow().len() as i64;
                        let slot = normalize_index(&index, len, *pos)?;
                        items.borrow_mut()[slot] = value;
                        Ok(())
                    }
                    other => Err(RuntimeError::type_error(
                        format!("cannot assign into {}", other.type_name()),
                        *pos,
                    )),
                }
            }
            other => Err(RuntimeError::type_error(
                "invalid assignment target",
                other.pos(),
            )),
        }
    }

    // ---- faults, output, events, timers -------------------------------

    pub fn record(&mut self, fault: RuntimeError) {
        self.diagnostics.push(fault.to_diagnostic());
    }

    pub fn write_output(&mut self, record: String) {
        self.output.push(record);
    }

    /// Delivers an event to the hook; a returned statement block runs
    /// immediately in the current environment. Without a hook the event
    /// is dropped.
    pub fn dispatch_event(&mut self, kind: &str, name: &str, bindings: Vec<(String, Value)>) {
        let Some(mut hook) = self.on_event.take() else {
            return;
        };
        let record = EventRecord {
            kind: kind.to_string(),
            name: name.to_string(),
            bindings,
        };
        let reaction = hook(&record);
        self.on_event = Some(hook);
        if let Some(body) = reaction {
            for stmt in &body {
                if !self.execute_statement(stmt).is_normal() {
                    break;
                }
            }
        }
    }

    /// Advances the logical clock one tick and fires every expired
    /// timer exactly once, in insertion order.
    pub(crate) fn turn_boundary(&mut self) {
        self.clock = self.clock.saturating_add(1);
        self.poll_timers();
    }

    /// Jumps the clock straight to `tick`. The scheduler uses this when
    /// every live task is asleep, so the ticks in between would all be
    /// empty; timers due in the skipped span fire at the landing point.
    pub(crate) fn fast_forward(&mut self, tick: u64) {
        if tick > self.clock {
            self.clock = tick;
            self.poll_timers();
        }
    }

    fn poll_timers(&mut self) {
        let expired: Vec<String> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= self.clock)
            .map(|(name, _)| name.clone())
            .collect();
        for name in expired {
            self.timers.shift_remove(&name);
            self.dispatch_event("timer", &name, Vec::new());
        }
    }

    pub fn active_timers(&self) -> impl Iterator<Item = &str> + '_ {
        self.timers.keys().map(|name| name.as_str())
    }

    pub(crate) fn clock(&self) -> u64 {
        self.clock
    }

    // Scheduler support: tasks carry their own block frames.
    pub(crate) fn environment(&self) -> Rc<Environment> {
        self.env.clone()
    }

    pub(crate) fn set_environment(&mut self, env: Rc<Environment>) {
        self.env = env;
    }
}

// ---- value operations ------------------------------------------------

fn binary_op(op: BinaryOp, left: &Value, right: &Value, pos: Pos) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            // Either operand being a string turns + into concatenation.
            (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::str(format!(
                "{}{}",
                left.to_output_string(),
                right.to_output_string()
            ))),
            _ => Err(type_fault("add", left, right, pos)),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                let verb = match op {
                    BinaryOp::Sub => "subtract",
                    BinaryOp::Mul => "multiply",
                    BinaryOp::Div => "divide",
                    _ => "take the remainder of",
                };
                return Err(type_fault(verb, left, right, pos));
            };
            match op {
                BinaryOp::Sub => Ok(Value::Number(a - b)),
                BinaryOp::Mul => Ok(Value::Number(a * b)),
                BinaryOp::Div => {
                    if b == 0.0 {
                        Err(RuntimeError::division("division by zero", pos))
                    } else {
                        Ok(Value::Number(a / b))
                    }
                }
                _ => {
                    if b == 0.0 {
                        Err(RuntimeError::division("modulo by zero", pos))
                    } else {
                        Ok(Value::Number(a % b))
                    }
                }
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(type_fault("compare", left, right, pos));
                }
            };
            let Some(ordering) = ordering else {
                return Ok(Value::Bool(false));
            };
            let result = match op {
                BinaryOp::Less => ordering.is_lt(),
                BinaryOp::Greater => ordering.is_gt(),
                BinaryOp::LessEq => ordering.is_le(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::Has => membership(left, right, pos),
        BinaryOp::In => membership(right, left, pos),
    }
}

fn membership(container: &Value, item: &Value, pos: Pos) -> Result<Value, RuntimeError> {
    match (container, item) {
        (Value::List(items), _) => Ok(Value::Bool(items.borrow().iter().any(|v| v == item))),
        (Value::Str(haystack), Value::Str(needle)) => {
            Ok(Value::Bool(haystack.contains(needle.as_ref())))
        }
        _ => Err(RuntimeError::type_error(
            format!(
                "membership needs a list or string on the container side, got {}",
                container.type_name()
            ),
            pos,
        )),
    }
}

fn type_fault(verb: &str, left: &Value, right: &Value, pos: Pos) -> RuntimeError {
    RuntimeError::type_error(
        format!(
            "cannot {} {} and {}",
            verb,
            left.type_name(),
            right.type_name()
        ),
        pos,
    )
}

fn property_of(object: &Value, name: &str, pos: Pos) -> Result<Value, RuntimeError> {
    match (object, name) {
        (Value::List(items), "length") => Ok(Value::Number(items.borrow().len() as f64)),
        (Value::Str(s), "length") => Ok(Value::Number(s.chars().count() as f64)),
        (Value::Object(instance), _) => instance
            .borrow()
            .properties
            .get(name)
            .cloned()
            .ok_or_else(|| {
                RuntimeError::reference(format!("object has no property '{}'", name), pos)
            }),
        _ => Err(RuntimeError::type_error(
            format!("{} has no property '{}'", object.type_name(), name),
            pos,
        )),
    }
}

fn normalize_index(index: &Value, len: i64, pos: Pos) -> Result<usize, RuntimeError> {
    let Some(n) = index.as_number() else {
        return Err(RuntimeError::type_error(
            format!("index must be a number, got {}", index.type_name()),
            pos,
        ));
    };
    if n.fract() != 0.0 {
        return Err(RuntimeError::type_error("index must be a whole number", pos));
    }
    let mut i = n as i64;
    if i < 0 {
        i += len;
    }
    if i < 0 || i >= len {
        return Err(RuntimeError::range(
            format!("index {} out of range for length {}", n, len),
            pos,
        ));
    }
    Ok(i as usize)
}

fn index_into(object: &Value, index: &Value, pos: Pos) -> Result<Value, RuntimeError> {
    match object {
        Value::List(items) => {
            let len = items.borrow().len() as i64;
            let slot = normalize_index(index, len, pos)?;
            Ok(items.borrow()[slot].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let slot = normalize_index(index, chars.len() as i64, pos)?;
            Ok(Value::str(chars[slot].to_string()))
        }
        other => Err(RuntimeError::type_error(
            format!("cannot index {}", other.type_name()),
            pos,
        )),
    }
}

/// Half-open, clamped at both ends, always a fresh value.
fn slice_of(
    object: &Value,
    start: Option<&Value>,
    end: Option<&Value>,
    pos: Pos,
) -> Result<Value, RuntimeError> {
    let bound = |value: Option<&Value>, default: i64, len: i64| -> Result<i64, RuntimeError> {
        let Some(value) = value else {
            return Ok(default);
        };
        let Some(n) = value.as_number() else {
            return Err(RuntimeError::type_error(
                format!("slice bound must be a number, got {}", value.type_name()),
                pos,
            ));
        };
        let mut i = n.floor() as i64;
        if i < 0 {
            i += len;
        }
        Ok(i.clamp(0, len))
    };
    match object {
        Value::List(items) => {
            let items = items.borrow();
            let len = items.len() as i64;
            let start = bound(start, 0, len)?;
            let end = bound(end, len, len)?;
            if start >= end {
                return Ok(Value::list(Vec::new()));
            }
            Ok(Value::list(
                items[start as usize..end as usize].to_vec(),
            ))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let len = chars.len() as i64;
            let start = bound(start, 0, len)?;
            let end = bound(end, len, len)?;
            if start >= end {
                return Ok(Value::str(""));
            }
            Ok(Value::str(
                chars[start as usize..end as usize].iter().collect::<String>(),
            ))
        }
        other => Err(RuntimeError::type_error(
            format!("cannot slice {}", other.type_name()),
            pos,
        )),
    }
}

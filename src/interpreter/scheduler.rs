//! Cooperative scheduler behind `run in parallel`. Each direct child
//! statement of the block is one task; tasks run round-robin in source
//! order and yield only at `wait`, so interleaving is deterministic.
//! The logical clock advances one tick per round and timers are polled
//! between rounds.

use std::rc::Rc;

use crate::ast::{Expr, Stmt};
use crate::interpreter::control_flow::ControlFlow;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluator::Interpreter;

pub(crate) fn run_parallel(interpreter: &mut Interpreter, body: &[Stmt]) {
    let saved = interpreter.environment();
    let mut tasks: Vec<Task> = body
        .iter()
        .map(|stmt| Task::new(stmt.clone(), Environment::block(saved.clone())))
        .collect();
    while tasks.iter().any(|task| !task.done()) {
        let mut ran = false;
        for task in &mut tasks {
            if task.done() || task.wake_at > interpreter.clock() {
                continue;
            }
            ran = true;
            interpreter.set_environment(task.env.clone());
            task.run_until_suspend(interpreter);
        }
        interpreter.set_environment(saved.clone());
        interpreter.turn_boundary();
        if !ran {
            // Every live task is asleep; the ticks until the earliest
            // wakeup would all be empty rounds, so skip them.
            let next = tasks
                .iter()
                .filter(|task| !task.done())
                .map(|task| task.wake_at)
                .min();
            if let Some(next) = next {
                interpreter.fast_forward(next);
            }
        }
    }
    interpreter.set_environment(saved);
}

/// Structured statements are unrolled onto an explicit frame stack so a
/// `wait` nested inside `if` or `while` can suspend without unwinding
/// through the evaluator.
enum Frame {
    Seq {
        stmts: Vec<Stmt>,
        index: usize,
    },
    Loop {
        condition: Expr,
        body: Vec<Stmt>,
        index: usize,
    },
}

/// What the frame stack wants next. Cloned out of the frames so no
/// borrow is held while the interpreter runs.
enum Pending {
    Stmt(Stmt),
    LoopCheck(Expr),
    Done,
}

struct Task {
    frames: Vec<Frame>,
    env: Rc<Environment>,
    /// Earliest clock value at which the task may run again.
    wake_at: u64,
}

impl Task {
    fn new(stmt: Stmt, env: Rc<Environment>) -> Self {
        Task {
            frames: vec![Frame::Seq {
                stmts: vec![stmt],
                index: 0,
            }],
            env,
            wake_at: 0,
        }
    }

    fn done(&self) -> bool {
        self.frames.is_empty()
    }

    fn run_until_suspend(&mut self, interpreter: &mut Interpreter) {
        loop {
            match self.next_pending() {
                Pending::Done => return,
                Pending::LoopCheck(condition) => {
                    if interpreter.evaluate(&condition).is_truthy() {
                        self.restart_loop();
                    } else {
                        self.frames.pop();
                    }
                }
                Pending::Stmt(stmt) => match stmt {
                    Stmt::Wait { duration, unit, .. } => {
                        let ticks = match duration {
                            Some(expr) => {
                                let value = interpreter.evaluate(&expr);
                                match value.as_number() {
                                    Some(n) if n > 0.0 => (n * unit.ticks()).ceil() as u64,
                                    _ => 1,
                                }
                            }
                            None => 1,
                        };
                        self.wake_at = interpreter.clock().saturating_add(ticks);
                        return;
                    }
                    Stmt::If {
                        condition,
                        then_body,
                        else_ifs,
                        else_body,
                        ..
                    } => {
                        let chosen = if interpreter.evaluate(&condition).is_truthy() {
                            Some(then_body)
                        } else {
                            let mut hit = None;
                            for (condition, body) in else_ifs {
                                if interpreter.evaluate(&condition).is_truthy() {
                                    hit = Some(body);
                                    break;
                                }
                            }
                            hit.or(else_body)
                        };
                        if let Some(body) = chosen {
                            self.frames.push(Frame::Seq {
                                stmts: body,
                                index: 0,
                            });
                        }
                    }
                    Stmt::While {
                        condition, body, ..
                    } => {
                        if interpreter.evaluate(&condition).is_truthy() {
                            self.frames.push(Frame::Loop {
                                condition,
                                body,
                                index: 0,
                            });
                        }
                    }
                    Stmt::Break(_) => self.break_out(),
                    Stmt::Continue(_) => self.continue_loop(),
                    Stmt::Return { value, .. } => {
                        if let Some(expr) = value {
                            interpreter.evaluate(&expr);
                        }
                        self.frames.clear();
                        return;
                    }
                    // Everything else runs atomically, function calls
                    // included, so a wait inside a called function does
                    // not suspend the task.
                    other => {
                        if let ControlFlow::Return(_) = interpreter.execute_statement(&other) {
                            self.frames.clear();
                            return;
                        }
                    }
                },
            }
        }
    }

    fn next_pending(&mut self) -> Pending {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Pending::Done;
            };
            match frame {
                Frame::Seq { stmts, index } => {
                    if *index < stmts.len() {
                        let stmt = stmts[*index].clone();
                        *index += 1;
                        return Pending::Stmt(stmt);
                    }
                    self.frames.pop();
                }
                Frame::Loop {
                    condition,
                    body,
                    index,
                } => {
                    if *index < body.len() {
                        let stmt = body[*index].clone();
                        *index += 1;
                        return Pending::Stmt(stmt);
                    }
                    return Pending::LoopCheck(condition.clone());
                }
            }
        }
    }

    fn restart_loop(&mut self) {
        if let Some(Frame::Loop { index, .. }) = self.frames.last_mut() {
            *index = 0;
        }
    }

    /// Pops frames through the nearest enclosing loop. A break with no
    /// loop ends the task.
    fn break_out(&mut self) {
        while let Some(frame) = self.frames.pop() {
            if matches!(frame, Frame::Loop { .. }) {
                return;
            }
        }
    }

    /// Pops back to the nearest loop and skips the rest of its body so
    /// the next step is the condition check.
    fn continue_loop(&mut self) {
        while let Some(frame) = self.frames.last_mut() {
            if let Frame::Loop { body, index, .. } = frame {
                *index = body.len();
                return;
            }
            self.frames.pop();
        }
    }
}

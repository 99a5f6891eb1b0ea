use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// The top-level program body. Behaves as the outermost function
    /// frame for write resolution.
    Script,
    /// Created per call; encloses the chain captured at definition.
    Function,
    /// Created per `if`/`while` body entry (one per loop iteration).
    /// Transparent for names already bound in the same function.
    Block,
}

/// One frame of the local tier. Frames are reference-counted because a
/// closure keeps its captured chain alive past the call that created it,
/// and every closure from the same scope shares the same mutable frame.
#[derive(Debug)]
pub struct Environment {
    kind: FrameKind,
    values: RefCell<HashMap<String, Value>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn script() -> Rc<Self> {
        Rc::new(Environment {
            kind: FrameKind::Script,
            values: RefCell::new(HashMap::new()),
            enclosing: None,
        })
    }

    pub fn function(captured: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            kind: FrameKind::Function,
            values: RefCell::new(HashMap::new()),
            enclosing: Some(captured),
        })
    }

    pub fn block(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            kind: FrameKind::Block,
            values: RefCell::new(HashMap::new()),
            enclosing: Some(parent),
        })
    }

    /// Read resolution: the whole lexical chain, block frames through
    /// the owning function frame through every captured enclosing
    /// function. The global frame and native table are consulted by the
    /// evaluator after this returns `None`.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds directly in this frame. Used for parameters and for names
    /// a block introduces for the first time.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Write resolution for a bare name. Searches only up to the owning
    /// function (or script) frame; an existing binding there is mutated
    /// in place, which is what lets loop bodies update accumulators. A
    /// name bound nowhere in that stretch is created in this innermost
    /// frame. Bindings of enclosing functions are never touched, so an
    /// inner function's assignment shadows instead of leaking outward.
    pub fn assign(&self, name: &str, value: Value) {
        let mut frame = self;
        loop {
            if frame.values.borrow().contains_key(name) {
                frame.values.borrow_mut().insert(name.to_string(), value);
                return;
            }
            if frame.kind != FrameKind::Block {
                break;
            }
            match frame.enclosing.as_deref() {
                Some(outer) => frame = outer,
                None => break,
            }
        }
        self.define(name, value);
    }
}

/// The single global frame, addressed exclusively through `$` names.
/// Owned by the interpreter instance rather than the process, so
/// independent runs can coexist.
#[derive(Debug, Default)]
pub struct Globals {
    values: RefCell<HashMap<String, Value>>,
}

impl Globals {
    pub fn new() -> Self {
        Globals::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.borrow().get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn block_frames_are_transparent_for_existing_bindings() {
        let script = Environment::script();
        script.define("sum", num(0.0));
        let block = Environment::block(script.clone());
        block.assign("sum", num(5.0));
        assert_eq!(script.get("sum"), Some(num(5.0)));
        assert!(block.values.borrow().get("sum").is_none());
    }

    #[test]
    fn new_names_in_a_block_stay_in_the_block() {
        let script = Environment::script();
        let block = Environment::block(script.clone());
        block.assign("tmp", num(1.0));
        assert_eq!(block.get("tmp"), Some(num(1.0)));
        assert_eq!(script.get("tmp"), None);
    }

    #[test]
    fn writes_do_not_cross_a_function_boundary() {
        let script = Environment::script();
        script.define("x", Value::str("outer"));
        let call = Environment::function(script.clone());
        call.assign("x", Value::str("inner"));
        assert_eq!(call.get("x"), Some(Value::str("inner")));
        assert_eq!(script.get("x"), Some(Value::str("outer")));
    }

    #[test]
    fn reads_see_through_the_function_boundary() {
        let script = Environment::script();
        script.define("free", num(7.0));
        let call = Environment::function(script.clone());
        assert_eq!(call.get("free"), Some(num(7.0)));
    }

    #[test]
    fn shared_frames_observe_each_others_writes() {
        let script = Environment::script();
        script.define("counter", num(0.0));
        let a = Environment::function(script.clone());
        let b = Environment::function(script.clone());
        // Both calls resolve the same captured frame.
        script.assign("counter", num(3.0));
        assert_eq!(a.get("counter"), Some(num(3.0)));
        assert_eq!(b.get("counter"), Some(num(3.0)));
    }

    #[test]
    fn globals_are_a_separate_tier() {
        let globals = Globals::new();
        globals.set("score", num(10.0));
        assert_eq!(globals.get("score"), Some(num(10.0)));
        assert_eq!(globals.get("missing"), None);
    }
}

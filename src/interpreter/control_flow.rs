use crate::value::Value;

/// Signal produced by statement execution. Propagates upward until the
/// nearest enclosing loop (`Break`/`Continue`) or function call
/// (`Return`) consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

impl ControlFlow {
    pub fn is_normal(&self) -> bool {
        matches!(self, ControlFlow::Normal)
    }
}

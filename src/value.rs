use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::Stmt;
use crate::interpreter::builtins::Builtin;
use crate::interpreter::environment::Environment;

/// Runtime value. Primitives copy on assignment; lists, functions and
/// object instances share identity, so mutation through one alias is
/// visible through every other.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Function(Rc<Function>),
    Object(Rc<RefCell<ObjectInstance>>),
    /// A builtin resolved through the native table.
    Native(Rc<Builtin>),
}

pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    /// Environment chain captured at the definition point. Shared by
    /// every call and every nested closure.
    pub env: Rc<Environment>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Extensible record used by the domain layer on top of the core. The
/// core only moves these around; `type()` reports the tag.
#[derive(Debug)]
pub struct ObjectInstance {
    pub type_tag: String,
    pub properties: IndexMap<String, Value>,
}

impl ObjectInstance {
    pub fn new(type_tag: impl Into<String>) -> Self {
        ObjectInstance {
            type_tag: type_tag.into(),
            properties: IndexMap::new(),
        }
    }
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Value {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Function(_) | Value::Native(_) => "function".to_string(),
            Value::Object(obj) => obj.borrow().type_tag.clone(),
        }
    }

    /// `false`, `null`, `0`, `""` and `[]` are falsy; everything else
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Function(_) | Value::Object(_) | Value::Native(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Standard string conversion, as used by `echo`, `toString` and
    /// string concatenation. Strings come out bare; inside lists they
    /// are quoted.
    pub fn to_output_string(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_display_string(),
        }
    }

    fn to_display_string(&self) -> String {
        self.display_with(&mut Vec::new())
    }

    /// `visited` holds the lists currently being rendered on the path
    /// down from the root; re-encountering one means the list is cyclic
    /// and the inner occurrence prints as `[...]`.
    fn display_with(&self, visited: &mut Vec<*const RefCell<Vec<Value>>>) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Str(s) => format!("\"{}\"", s),
            Value::List(items) => {
                let cell = Rc::as_ptr(items);
                if visited.contains(&cell) {
                    return "[...]".to_string();
                }
                visited.push(cell);
                let parts: Vec<String> = items
                    .borrow()
                    .iter()
                    .map(|v| v.display_with(visited))
                    .collect();
                visited.pop();
                format!("[{}]", parts.join(", "))
            }
            Value::Function(f) => format!("<function {}>", f.name),
            Value::Native(b) => format!("<function {}>", b.name),
            Value::Object(obj) => {
                let obj = obj.borrow();
                format!("<{}>", obj.type_tag)
            }
        }
    }

    /// Structural list comparison that terminates on cycles. `visited`
    /// holds the pairs currently being compared higher up the path; a
    /// pair met again is part of a cycle and cannot disprove equality,
    /// so it answers equal.
    fn eq_with(
        &self,
        other: &Value,
        visited: &mut Vec<(*const RefCell<Vec<Value>>, *const RefCell<Vec<Value>>)>,
    ) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
                if visited.contains(&pair) {
                    return true;
                }
                visited.push(pair);
                let (a, b) = (a.borrow(), b.borrow());
                let result =
                    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_with(y, visited));
                visited.pop();
                result
            }
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Whole numbers print without a decimal point.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_output_string())
    }
}

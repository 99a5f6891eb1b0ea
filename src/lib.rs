pub mod ast;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod token;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use interpreter::{
    execute, ArgShape, CommandForm, CommandRegistry, EventRecord, Execution, Interpreter,
    LoadError, Parser, RuntimeError,
};
pub use lexer::Lexer;
pub use value::Value;

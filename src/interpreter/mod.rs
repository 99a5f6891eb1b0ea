pub mod builtins;
pub mod commands;
pub mod control_flow;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod registry;
mod scheduler;

pub use commands::CommandHandler;
pub use control_flow::ControlFlow;
pub use environment::{Environment, Globals};
pub use error::{LoadError, RuntimeError};
pub use evaluator::{execute, EventRecord, Execution, Interpreter};
pub use parser::Parser;
pub use registry::{ArgShape, CommandForm, CommandRegistry};

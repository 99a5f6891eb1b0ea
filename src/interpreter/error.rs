use thiserror::Error;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::Pos;

/// Fatal load-time failure. Any one of these aborts loading before a
/// single statement executes.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
    /// Parse errors only: the token kinds that would have been accepted.
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    Lex,
    Indentation,
    Parse,
}

impl LoadError {
    pub fn lex(message: impl Into<String>, pos: Pos) -> Self {
        LoadError {
            kind: LoadErrorKind::Lex,
            message: message.into(),
            expected: Vec::new(),
            found: None,
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn indentation(message: impl Into<String>, pos: Pos) -> Self {
        LoadError {
            kind: LoadErrorKind::Indentation,
            message: message.into(),
            expected: Vec::new(),
            found: None,
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn parse(message: impl Into<String>, pos: Pos) -> Self {
        LoadError {
            kind: LoadErrorKind::Parse,
            message: message.into(),
            expected: Vec::new(),
            found: None,
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let kind = match self.kind {
            LoadErrorKind::Lex => DiagnosticKind::LexError,
            LoadErrorKind::Indentation => DiagnosticKind::IndentationError,
            LoadErrorKind::Parse => DiagnosticKind::ParseError,
        };
        let mut message = self.message.clone();
        if !self.expected.is_empty() {
            message.push_str(&format!(" (expected {}", self.expected.join(" or ")));
            if let Some(found) = &self.found {
                message.push_str(&format!(", found {}", found));
            }
            message.push(')');
        }
        Diagnostic::new(kind, message, self.line, self.column)
    }
}

/// Non-fatal runtime fault. Recorded as a diagnostic; the offending
/// expression evaluates to `null` and the program keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("TypeError: {message} (line {line}, column {column})")]
    Type { message: String, line: u32, column: u32 },
    #[error("ReferenceError: {message} (line {line}, column {column})")]
    Reference { message: String, line: u32, column: u32 },
    #[error("RangeError: {message} (line {line}, column {column})")]
    Range { message: String, line: u32, column: u32 },
    #[error("DivisionError: {message} (line {line}, column {column})")]
    Division { message: String, line: u32, column: u32 },
}

impl RuntimeError {
    pub fn type_error(message: impl Into<String>, pos: Pos) -> Self {
        RuntimeError::Type {
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn reference(message: impl Into<String>, pos: Pos) -> Self {
        RuntimeError::Reference {
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn range(message: impl Into<String>, pos: Pos) -> Self {
        RuntimeError::Range {
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn division(message: impl Into<String>, pos: Pos) -> Self {
        RuntimeError::Division {
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let (kind, message, line, column) = match self {
            RuntimeError::Type { message, line, column } => {
                (DiagnosticKind::TypeError, message, line, column)
            }
            RuntimeError::Reference { message, line, column } => {
                (DiagnosticKind::ReferenceError, message, line, column)
            }
            RuntimeError::Range { message, line, column } => {
                (DiagnosticKind::RangeError, message, line, column)
            }
            RuntimeError::Division { message, line, column } => {
                (DiagnosticKind::DivisionError, message, line, column)
            }
        };
        Diagnostic::new(kind, message.clone(), *line, *column)
    }
}

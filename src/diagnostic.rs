use std::fmt;

/// Every way a program can go wrong, load-time and run-time alike.
///
/// The first three are fatal: the program never starts. The rest are
/// recorded while execution continues and the offending expression
/// degrades to `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    LexError,
    IndentationError,
    ParseError,
    TypeError,
    ReferenceError,
    RangeError,
    DivisionError,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::LexError => "LexError",
            DiagnosticKind::IndentationError => "IndentationError",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::TypeError => "TypeError",
            DiagnosticKind::ReferenceError => "ReferenceError",
            DiagnosticKind::RangeError => "RangeError",
            DiagnosticKind::DivisionError => "DivisionError",
        }
    }

    /// Fatal kinds abort loading; the rest are fault-tolerant.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::LexError | DiagnosticKind::IndentationError | DiagnosticKind::ParseError
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}, column {})",
            self.kind, self.message, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let d = Diagnostic::new(DiagnosticKind::TypeError, "cannot add list and number", 3, 7);
        assert_eq!(
            d.to_string(),
            "TypeError: cannot add list and number (line 3, column 7)"
        );
    }

    #[test]
    fn only_load_kinds_are_fatal() {
        assert!(DiagnosticKind::IndentationError.is_fatal());
        assert!(DiagnosticKind::ParseError.is_fatal());
        assert!(!DiagnosticKind::DivisionError.is_fatal());
        assert!(!DiagnosticKind::ReferenceError.is_fatal());
    }
}

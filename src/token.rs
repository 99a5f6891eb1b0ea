use std::fmt;

/// 1-based source position of a token or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Pos { line, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals and identifiers
    Number(f64),
    Str(String),
    Ident(String),
    /// `$name`
    Global(String),
    True,
    False,
    Null,

    // Keywords
    Set,
    To,
    If,
    Else,
    While,
    Function,
    Return,
    Ask,
    As,
    And,
    Or,
    Not,
    Is,
    In,
    Has,
    By,
    From,
    Wait,
    For,
    Run,
    Parallel,
    Start,
    Stop,
    Timer,
    Break,
    Continue,

    // Comparison operators (word forms merge into these after lexing)
    Eq,
    NotEq,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    /// `is in`, the mirrored membership test
    IsIn,

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Keyword lookup for a lexed identifier.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "set" => TokenKind::Set,
            "to" => TokenKind::To,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "ask" => TokenKind::Ask,
            "as" => TokenKind::As,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "is" => TokenKind::Is,
            "in" => TokenKind::In,
            "has" => TokenKind::Has,
            "by" => TokenKind::By,
            "from" => TokenKind::From,
            "wait" => TokenKind::Wait,
            "for" => TokenKind::For,
            "run" => TokenKind::Run,
            "parallel" => TokenKind::Parallel,
            "start" => TokenKind::Start,
            "stop" => TokenKind::Stop,
            "timer" => TokenKind::Timer,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string {:?}", s),
            TokenKind::Ident(name) => write!(f, "'{}'", name),
            TokenKind::Global(name) => write!(f, "'${}'", name),
            TokenKind::Newline => write!(f, "end of line"),
            TokenKind::Indent => write!(f, "indent"),
            TokenKind::Dedent => write!(f, "dedent"),
            TokenKind::Eof => write!(f, "end of input"),
            other => write!(f, "'{}'", other.lexeme_hint()),
        }
    }
}

impl TokenKind {
    fn lexeme_hint(&self) -> &'static str {
        match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Set => "set",
            TokenKind::To => "to",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::Ask => "ask",
            TokenKind::As => "as",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Is => "is",
            TokenKind::In => "in",
            TokenKind::Has => "has",
            TokenKind::By => "by",
            TokenKind::From => "from",
            TokenKind::Wait => "wait",
            TokenKind::For => "for",
            TokenKind::Run => "run",
            TokenKind::Parallel => "parallel",
            TokenKind::Start => "start",
            TokenKind::Stop => "stop",
            TokenKind::Timer => "timer",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Eq => "is",
            TokenKind::NotEq => "is not",
            TokenKind::Greater => "is greater than",
            TokenKind::Less => "is less than",
            TokenKind::GreaterEq => "is at least",
            TokenKind::LessEq => "is at most",
            TokenKind::IsIn => "is in",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            pos,
        }
    }
}

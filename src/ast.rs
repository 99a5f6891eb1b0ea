use crate::token::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    /// `xs has x`
    Has,
    /// `x is in xs`
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
}

impl TimeUnit {
    /// Scale factor into logical ticks.
    pub fn ticks(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64, Pos),
    Str(String, Pos),
    Bool(bool, Pos),
    Null(Pos),
    List(Vec<Expr>, Pos),
    Ident(String, Pos),
    /// `$name`, resolved in the global frame only.
    Global(String, Pos),
    Property {
        object: Box<Expr>,
        name: String,
        pos: Pos,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        pos: Pos,
    },
    /// `xs[start:end]`, half-open, either bound optional.
    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
        pos: Pos,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        pos: Pos,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        pos: Pos,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
        pos: Pos,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        pos: Pos,
    },
}

impl Expr {
    pub fn pos(&self) -> Pos {
        match self {
            Expr::Number(_, pos)
            | Expr::Str(_, pos)
            | Expr::Bool(_, pos)
            | Expr::Null(pos)
            | Expr::List(_, pos)
            | Expr::Ident(_, pos)
            | Expr::Global(_, pos)
            | Expr::Property { pos, .. }
            | Expr::Index { pos, .. }
            | Expr::Slice { pos, .. }
            | Expr::Unary { pos, .. }
            | Expr::Binary { pos, .. }
            | Expr::Logical { pos, .. }
            | Expr::Call { pos, .. } => *pos,
        }
    }
}

/// One argument slot of a parsed command statement. Particle words from
/// the registered form are consumed during parsing and not stored.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArg {
    Expr(Expr),
    Lvalue(Expr),
    Word(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `set <lvalue> to <expr>`
    Assign {
        target: Expr,
        value: Expr,
        pos: Pos,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_ifs: Vec<(Expr, Vec<Stmt>)>,
        else_body: Option<Vec<Stmt>>,
        pos: Pos,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        pos: Pos,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        pos: Pos,
    },
    Return {
        value: Option<Expr>,
        pos: Pos,
    },
    Break(Pos),
    Continue(Pos),
    /// `ask [prompt] [as name]`
    Ask {
        prompt: Option<Expr>,
        target: Option<String>,
        pos: Pos,
    },
    /// `wait [for <expr> [seconds|minutes]]`; the only suspension point.
    Wait {
        duration: Option<Expr>,
        unit: TimeUnit,
        pos: Pos,
    },
    /// `run in parallel:` block; each direct child statement is one task.
    Parallel {
        body: Vec<Stmt>,
        pos: Pos,
    },
    StartTimer {
        name: String,
        duration: Expr,
        unit: TimeUnit,
        pos: Pos,
    },
    StopTimer {
        name: String,
        pos: Pos,
    },
    /// Generic registered command form, standard vocabulary included.
    Command {
        keyword: String,
        args: Vec<CommandArg>,
        pos: Pos,
    },
    Expr(Expr),
}

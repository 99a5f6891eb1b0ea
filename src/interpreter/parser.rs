//! Recursive-descent parser over the lexed token stream, one token of
//! lookahead. Indentation is already bracketed by the lexer, so blocks
//! are plain `Colon Newline Indent ... Dedent` sequences. The first
//! unexpected token aborts the parse; nothing recovers and nothing
//! runs.

use crate::ast::{BinaryOp, CommandArg, Expr, LogicalOp, Stmt, TimeUnit, UnaryOp};
use crate::interpreter::error::LoadError;
use crate::interpreter::registry::{ArgShape, CommandRegistry};
use crate::token::{Pos, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    registry: CommandRegistry,
}

impl Parser {
    /// Parses with the standard command vocabulary.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser::with_registry(tokens, CommandRegistry::standard())
    }

    /// Parses with a caller-supplied command registry; this is the
    /// statement-level extension point.
    pub fn with_registry(tokens: Vec<Token>, registry: CommandRegistry) -> Self {
        Parser {
            tokens,
            current: 0,
            registry,
        }
    }

    pub fn parse(&mut self) -> Result<Vec<Stmt>, LoadError> {
        let mut statements = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Eof) {
            statements.push(self.statement()?);
            self.skip_newlines();
        }
        Ok(statements)
    }

    // ---- token cursor -------------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn pos(&self) -> Pos {
        self.peek().pos
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, LoadError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{}", kind), context))
        }
    }

    fn unexpected(&self, expected: &str, context: &str) -> LoadError {
        let found = &self.peek().kind;
        LoadError::parse(format!("unexpected token in {}", context), self.pos())
            .with_expected(expected)
            .with_found(found.to_string())
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn end_of_statement(&mut self) -> Result<(), LoadError> {
        if self.check(&TokenKind::Eof) || self.check(&TokenKind::Dedent) {
            return Ok(());
        }
        self.expect(TokenKind::Newline, "statement")?;
        Ok(())
    }

    // ---- statements ---------------------------------------------------

    fn statement(&mut self) -> Result<Stmt, LoadError> {
        match &self.peek().kind {
            TokenKind::Set => self.assignment(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Function => self.function_def(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Ask => self.ask_statement(),
            TokenKind::Wait => self.wait_statement(),
            TokenKind::Run => self.parallel_statement(),
            TokenKind::Start => self.start_timer(),
            TokenKind::Stop => self.stop_timer(),
            TokenKind::Break => {
                let pos = self.advance().pos;
                self.end_of_statement()?;
                Ok(Stmt::Break(pos))
            }
            TokenKind::Continue => {
                let pos = self.advance().pos;
                self.end_of_statement()?;
                Ok(Stmt::Continue(pos))
            }
            TokenKind::Ident(name) if self.registry.contains(name) => self.command_statement(),
            _ => {
                let expr = self.expression()?;
                self.end_of_statement()?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn assignment(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Set, "assignment")?.pos;
        let target = self.lvalue()?;
        self.expect(TokenKind::To, "assignment")?;
        let value = self.expression()?;
        self.end_of_statement()?;
        Ok(Stmt::Assign { target, value, pos })
    }

    /// An assignment target: a bare or global name followed by any
    /// number of `.name` / `[index]` steps. Slices are not assignable.
    fn lvalue(&mut self) -> Result<Expr, LoadError> {
        let mut expr = match self.advance() {
            Token {
                kind: TokenKind::Ident(name),
                pos,
                ..
            } => Expr::Ident(name, pos),
            Token {
                kind: TokenKind::Global(name),
                pos,
                ..
            } => Expr::Global(name, pos),
            token => {
                return Err(LoadError::parse("invalid assignment target", token.pos)
                    .with_expected("a name")
                    .with_found(token.kind.to_string()));
            }
        };
        loop {
            if self.matches(&TokenKind::Dot) {
                let pos = self.pos();
                let name = self.property_name()?;
                expr = Expr::Property {
                    object: Box::new(expr),
                    name,
                    pos,
                };
            } else if self.matches(&TokenKind::LBracket) {
                let pos = self.pos();
                let index = self.expression()?;
                self.expect(TokenKind::RBracket, "index target")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                    pos,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn property_name(&mut self) -> Result<String, LoadError> {
        match self.advance() {
            Token {
                kind: TokenKind::Ident(name),
                ..
            } => Ok(name),
            token => Err(LoadError::parse("expected a property name after '.'", token.pos)
                .with_expected("a name")
                .with_found(token.kind.to_string())),
        }
    }

    fn block(&mut self, context: &str) -> Result<Vec<Stmt>, LoadError> {
        self.expect(TokenKind::Colon, context)?;
        self.expect(TokenKind::Newline, context)?;
        if !self.check(&TokenKind::Indent) {
            return Err(self.unexpected("an indented block", context));
        }
        self.advance();
        let mut statements = Vec::new();
        while !self.check(&TokenKind::Dedent) && !self.check(&TokenKind::Eof) {
            statements.push(self.statement()?);
            self.skip_newlines();
        }
        self.expect(TokenKind::Dedent, context)?;
        Ok(statements)
    }

    fn if_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::If, "if statement")?.pos;
        let condition = self.expression()?;
        let then_body = self.block("if statement")?;
        let mut else_ifs = Vec::new();
        let mut else_body = None;
        while self.check(&TokenKind::Else) {
            self.advance();
            if self.matches(&TokenKind::If) {
                let condition = self.expression()?;
                let body = self.block("else if branch")?;
                else_ifs.push((condition, body));
            } else {
                else_body = Some(self.block("else branch")?);
                break;
            }
        }
        Ok(Stmt::If {
            condition,
            then_body,
            else_ifs,
            else_body,
            pos,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::While, "while loop")?.pos;
        let condition = self.expression()?;
        let body = self.block("while loop")?;
        Ok(Stmt::While {
            condition,
            body,
            pos,
        })
    }

    fn function_def(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Function, "function definition")?.pos;
        let name = match self.advance() {
            Token {
                kind: TokenKind::Ident(name),
                ..
            } => name,
            token => {
                return Err(LoadError::parse("expected a function name", token.pos)
                    .with_expected("a name")
                    .with_found(token.kind.to_string()));
            }
        };
        let mut params = Vec::new();
        if self.matches(&TokenKind::LParen) {
            if !self.check(&TokenKind::RParen) {
                loop {
                    match self.advance() {
                        Token {
                            kind: TokenKind::Ident(param),
                            ..
                        } => params.push(param),
                        token => {
                            return Err(LoadError::parse(
                                "expected a parameter name",
                                token.pos,
                            )
                            .with_expected("a name")
                            .with_found(token.kind.to_string()));
                        }
                    }
                    if !self.matches(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RParen, "parameter list")?;
        }
        let body = self.block("function body")?;
        Ok(Stmt::FunctionDef {
            name,
            params,
            body,
            pos,
        })
    }

    fn return_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Return, "return statement")?.pos;
        let value = if self.check(&TokenKind::Newline)
            || self.check(&TokenKind::Dedent)
            || self.check(&TokenKind::Eof)
        {
            None
        } else {
            Some(self.expression()?)
        };
        self.end_of_statement()?;
        Ok(Stmt::Return { value, pos })
    }

    fn ask_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Ask, "ask statement")?.pos;
        let prompt = if self.check(&TokenKind::Newline)
            || self.check(&TokenKind::As)
            || self.check(&TokenKind::Eof)
        {
            None
        } else {
            Some(self.expression()?)
        };
        let target = if self.matches(&TokenKind::As) {
            match self.advance() {
                Token {
                    kind: TokenKind::Ident(name),
                    ..
                } => Some(name),
                token => {
                    return Err(LoadError::parse("expected a name after 'as'", token.pos)
                        .with_expected("a name")
                        .with_found(token.kind.to_string()));
                }
            }
        } else {
            None
        };
        self.end_of_statement()?;
        Ok(Stmt::Ask {
            prompt,
            target,
            pos,
        })
    }

    fn time_unit(&mut self) -> TimeUnit {
        if let TokenKind::Ident(word) = &self.peek().kind {
            let unit = match word.as_str() {
                "second" | "seconds" => Some(TimeUnit::Seconds),
                "minute" | "minutes" => Some(TimeUnit::Minutes),
                _ => None,
            };
            if let Some(unit) = unit {
                self.advance();
                return unit;
            }
        }
        TimeUnit::Seconds
    }

    fn wait_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Wait, "wait statement")?.pos;
        let mut duration = None;
        let mut unit = TimeUnit::Seconds;
        if !self.check(&TokenKind::Newline)
            && !self.check(&TokenKind::Dedent)
            && !self.check(&TokenKind::Eof)
        {
            self.matches(&TokenKind::For);
            duration = Some(self.expression()?);
            unit = self.time_unit();
        }
        self.end_of_statement()?;
        Ok(Stmt::Wait {
            duration,
            unit,
            pos,
        })
    }

    fn parallel_statement(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Run, "parallel block")?.pos;
        self.expect(TokenKind::In, "parallel block")?;
        self.expect(TokenKind::Parallel, "parallel block")?;
        let body = self.block("parallel block")?;
        Ok(Stmt::Parallel { body, pos })
    }

    fn timer_name(&mut self) -> Result<String, LoadError> {
        match self.advance() {
            Token {
                kind: TokenKind::Ident(name),
                ..
            } => Ok(name),
            Token {
                kind: TokenKind::Str(name),
                ..
            } => Ok(name),
            token => Err(LoadError::parse("expected a timer name", token.pos)
                .with_expected("a name")
                .with_found(token.kind.to_string())),
        }
    }

    fn start_timer(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Start, "start timer")?.pos;
        self.expect(TokenKind::Timer, "start timer")?;
        let name = self.timer_name()?;
        self.expect(TokenKind::For, "start timer")?;
        let duration = self.expression()?;
        let unit = self.time_unit();
        self.end_of_statement()?;
        Ok(Stmt::StartTimer {
            name,
            duration,
            unit,
            pos,
        })
    }

    fn stop_timer(&mut self) -> Result<Stmt, LoadError> {
        let pos = self.expect(TokenKind::Stop, "stop timer")?.pos;
        self.expect(TokenKind::Timer, "stop timer")?;
        let name = self.timer_name()?;
        self.end_of_statement()?;
        Ok(Stmt::StopTimer { name, pos })
    }

    fn command_statement(&mut self) -> Result<Stmt, LoadError> {
        let token = self.advance();
        let (keyword, pos) = match token {
            Token {
                kind: TokenKind::Ident(name),
                pos,
                ..
            } => (name, pos),
            token => {
                return Err(LoadError::parse("expected a command keyword", token.pos)
                    .with_found(token.kind.to_string()));
            }
        };
        let shape = self
            .registry
            .form(&keyword)
            .map(|form| form.shape.clone())
            .unwrap_or_default();
        let mut args = Vec::new();
        for slot in &shape {
            match slot {
                ArgShape::Expr => args.push(CommandArg::Expr(self.expression()?)),
                ArgShape::Lvalue => args.push(CommandArg::Lvalue(self.lvalue()?)),
                ArgShape::Word => {
                    let token = self.advance();
                    match token.kind {
                        TokenKind::Ident(word) => args.push(CommandArg::Word(word)),
                        TokenKind::Str(word) => args.push(CommandArg::Word(word)),
                        kind => {
                            return Err(LoadError::parse(
                                format!("expected a word in '{}' command", keyword),
                                token.pos,
                            )
                            .with_found(kind.to_string()));
                        }
                    }
                }
                ArgShape::Particle(word) => {
                    let token = self.advance();
                    if token.lexeme != *word {
                        return Err(LoadError::parse(
                            format!("expected '{}' in '{}' command", word, keyword),
                            token.pos,
                        )
                        .with_expected(format!("'{}'", word))
                        .with_found(token.kind.to_string()));
                    }
                }
            }
        }
        self.end_of_statement()?;
        Ok(Stmt::Command { keyword, args, pos })
    }

    // ---- expressions --------------------------------------------------

    fn expression(&mut self) -> Result<Expr, LoadError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.and_expr()?;
        while self.check(&TokenKind::Or) {
            let pos = self.advance().pos;
            let right = self.and_expr()?;
            left = Expr::Logical {
                left: Box::new(left),
                op: LogicalOp::Or,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.membership()?;
        while self.check(&TokenKind::And) {
            let pos = self.advance().pos;
            let right = self.membership()?;
            left = Expr::Logical {
                left: Box::new(left),
                op: LogicalOp::And,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn membership(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.comparison()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Has => BinaryOp::Has,
                TokenKind::IsIn => BinaryOp::In,
                _ => break,
            };
            let pos = self.advance().pos;
            let right = self.comparison()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.additive()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::LessEq => BinaryOp::LessEq,
                TokenKind::GreaterEq => BinaryOp::GreaterEq,
                _ => break,
            };
            let pos = self.advance().pos;
            let right = self.additive()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn additive(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let pos = self.advance().pos;
            let right = self.multiplicative()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr, LoadError> {
        let mut left = self.unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let pos = self.advance().pos;
            let right = self.unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, LoadError> {
        let op = match &self.peek().kind {
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            let pos = self.advance().pos;
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                pos,
            });
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr, LoadError> {
        let mut expr = self.primary()?;
        loop {
            if self.matches(&TokenKind::Dot) {
                let pos = self.pos();
                let name = self.property_name()?;
                expr = Expr::Property {
                    object: Box::new(expr),
                    name,
                    pos,
                };
            } else if self.check(&TokenKind::LBracket) {
                let pos = self.advance().pos;
                expr = self.index_or_slice(expr, pos)?;
            } else if self.check(&TokenKind::LParen) {
                let pos = self.advance().pos;
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.expression()?);
                        if !self.matches(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "call arguments")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                    pos,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn index_or_slice(&mut self, object: Expr, pos: Pos) -> Result<Expr, LoadError> {
        if self.matches(&TokenKind::Colon) {
            let end = if self.check(&TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.expression()?))
            };
            self.expect(TokenKind::RBracket, "slice")?;
            return Ok(Expr::Slice {
                object: Box::new(object),
                start: None,
                end,
                pos,
            });
        }
        let first = self.expression()?;
        if self.matches(&TokenKind::Colon) {
            let end = if self.check(&TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.expression()?))
            };
            self.expect(TokenKind::RBracket, "slice")?;
            return Ok(Expr::Slice {
                object: Box::new(object),
                start: Some(Box::new(first)),
                end,
                pos,
            });
        }
        self.expect(TokenKind::RBracket, "index")?;
        Ok(Expr::Index {
            object: Box::new(object),
            index: Box::new(first),
            pos,
        })
    }

    fn primary(&mut self) -> Result<Expr, LoadError> {
        let token = self.advance();
        let pos = token.pos;
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n, pos)),
            TokenKind::Str(s) => Ok(Expr::Str(s, pos)),
            TokenKind::True => Ok(Expr::Bool(true, pos)),
            TokenKind::False => Ok(Expr::Bool(false, pos)),
            TokenKind::Null => Ok(Expr::Null(pos)),
            TokenKind::Ident(name) => Ok(Expr::Ident(name, pos)),
            TokenKind::Global(name) => Ok(Expr::Global(name, pos)),
            TokenKind::LParen => {
                let expr = self.expression()?;
                self.expect(TokenKind::RParen, "parenthesized expression")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                let mut items = Vec::new();
                if !self.check(&TokenKind::RBracket) {
                    loop {
                        items.push(self.expression()?);
                        if !self.matches(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket, "list literal")?;
                Ok(Expr::List(items, pos))
            }
            kind => Err(LoadError::parse("expected an expression", pos)
                .with_expected("an expression")
                .with_found(kind.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Vec<Stmt> {
        let tokens = Lexer::tokenize(source).expect("lex failed");
        Parser::new(tokens).parse().expect("parse failed")
    }

    fn parse_err(source: &str) -> LoadError {
        let tokens = Lexer::tokenize(source).expect("lex failed");
        Parser::new(tokens).parse().unwrap_err()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let stmts = parse("2 + 3 * 4\n");
        let Stmt::Expr(Expr::Binary { op, right, .. }) = &stmts[0] else {
            panic!("expected a binary expression");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(
            **right,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn not_binds_tighter_than_and() {
        let stmts = parse("not a and b\n");
        let Stmt::Expr(Expr::Logical { op, left, .. }) = &stmts[0] else {
            panic!("expected a logical expression");
        };
        assert_eq!(*op, LogicalOp::And);
        assert!(matches!(
            **left,
            Expr::Unary {
                op: UnaryOp::Not,
                ..
            }
        ));
    }

    #[test]
    fn comparison_binds_tighter_than_membership() {
        let stmts = parse("x is 1 is in flags\n");
        let Stmt::Expr(Expr::Binary { op, .. }) = &stmts[0] else {
            panic!("expected a binary expression");
        };
        assert_eq!(*op, BinaryOp::In);
    }

    #[test]
    fn else_if_chain_parses() {
        let source = "if a:\n    echo 1\nelse if b:\n    echo 2\nelse:\n    echo 3\n";
        let stmts = parse(source);
        let Stmt::If {
            else_ifs,
            else_body,
            ..
        } = &stmts[0]
        else {
            panic!("expected an if statement");
        };
        assert_eq!(else_ifs.len(), 1);
        assert!(else_body.is_some());
    }

    #[test]
    fn function_without_parameter_list_parses() {
        let stmts = parse("function greet:\n    echo \"hi\"\n");
        let Stmt::FunctionDef { name, params, .. } = &stmts[0] else {
            panic!("expected a function definition");
        };
        assert_eq!(name, "greet");
        assert!(params.is_empty());
    }

    #[test]
    fn command_statement_consumes_its_particles() {
        let stmts = parse("increase score by 2\n");
        let Stmt::Command { keyword, args, .. } = &stmts[0] else {
            panic!("expected a command statement");
        };
        assert_eq!(keyword, "increase");
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], CommandArg::Lvalue(_)));
        assert!(matches!(args[1], CommandArg::Expr(_)));
    }

    #[test]
    fn unregistered_leading_word_is_an_expression() {
        let stmts = parse("shout(\"hi\")\n");
        assert!(matches!(stmts[0], Stmt::Expr(Expr::Call { .. })));
    }

    #[test]
    fn slice_with_missing_bounds_parses() {
        let stmts = parse("xs[:2]\n");
        let Stmt::Expr(Expr::Slice { start, end, .. }) = &stmts[0] else {
            panic!("expected a slice");
        };
        assert!(start.is_none());
        assert!(end.is_some());
    }

    #[test]
    fn missing_block_is_a_parse_error() {
        let err = parse_err("if a:\nset x to 1\n");
        assert!(err.expected.iter().any(|e| e.contains("indented block")));
    }

    #[test]
    fn first_error_stops_the_parse() {
        let err = parse_err("set to 3\nset x to\n");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn run_in_parallel_parses_each_child_as_a_task() {
        let source = "run in parallel:\n    echo 1\n    echo 2\n";
        let stmts = parse(source);
        let Stmt::Parallel { body, .. } = &stmts[0] else {
            panic!("expected a parallel block");
        };
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn timer_statements_parse() {
        let stmts = parse("start timer bomb for 3 seconds\nstop timer bomb\n");
        assert!(matches!(stmts[0], Stmt::StartTimer { .. }));
        assert!(matches!(stmts[1], Stmt::StopTimer { .. }));
    }
}

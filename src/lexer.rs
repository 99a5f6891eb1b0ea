//! Hand-written, line-oriented lexer. Owns indentation tracking: leading
//! whitespace is measured against an indent stack and turned into
//! `Indent`/`Dedent` tokens, so the parser only ever sees bracket-like
//! block delimiters.

use crate::interpreter::error::LoadError;
use crate::token::{Pos, Token, TokenKind};

const INDENT_WIDTH: u32 = 4;

pub struct Lexer {
    tokens: Vec<Token>,
    indent_stack: Vec<u32>,
}

impl Lexer {
    /// Tokenizes a whole program. Stops at the first lex or indentation
    /// fault; both are fatal.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LoadError> {
        let stripped = strip_comments(source)?;
        let mut lexer = Lexer {
            tokens: Vec::new(),
            indent_stack: vec![0],
        };
        let mut last_line = 0u32;
        for (index, line) in stripped.lines().enumerate() {
            let line_no = index as u32 + 1;
            lexer.lex_line(line, line_no)?;
            last_line = line_no;
        }
        let end = Pos::new(last_line + 1, 1);
        while lexer.indent_stack.len() > 1 {
            lexer.indent_stack.pop();
            lexer.tokens.push(Token::new(TokenKind::Dedent, "", end));
        }
        lexer.tokens.push(Token::new(TokenKind::Eof, "", end));
        merge_compound_operators(lexer.tokens)
    }

    fn lex_line(&mut self, line: &str, line_no: u32) -> Result<(), LoadError> {
        let chars: Vec<char> = line.chars().collect();

        let mut indent = 0usize;
        while indent < chars.len() && (chars[indent] == ' ' || chars[indent] == '\t') {
            if chars[indent] == '\t' {
                return Err(LoadError::indentation(
                    "tab character in indentation; indent with spaces only",
                    Pos::new(line_no, indent as u32 + 1),
                ));
            }
            indent += 1;
        }
        // Blank lines (and lines comment stripping emptied) produce no
        // tokens and leave the indent stack alone.
        if chars[indent..].iter().all(|c| c.is_whitespace()) {
            return Ok(());
        }

        self.track_indent(indent as u32, line_no)?;
        self.lex_rest(&chars, indent, line_no)?;
        self.tokens.push(Token::new(
            TokenKind::Newline,
            "",
            Pos::new(line_no, chars.len() as u32 + 1),
        ));
        Ok(())
    }

    fn track_indent(&mut self, width: u32, line_no: u32) -> Result<(), LoadError> {
        let pos = Pos::new(line_no, 1);
        if width % INDENT_WIDTH != 0 {
            return Err(LoadError::indentation(
                format!(
                    "indentation of {} spaces is not a multiple of {}",
                    width, INDENT_WIDTH
                ),
                pos,
            ));
        }
        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            if width != top + INDENT_WIDTH {
                return Err(LoadError::indentation(
                    "unexpected indent; blocks indent one level at a time",
                    pos,
                ));
            }
            self.indent_stack.push(width);
            self.tokens.push(Token::new(TokenKind::Indent, "", pos));
        } else if width < top {
            while *self.indent_stack.last().unwrap_or(&0) > width {
                self.indent_stack.pop();
                self.tokens.push(Token::new(TokenKind::Dedent, "", pos));
            }
            if *self.indent_stack.last().unwrap_or(&0) != width {
                return Err(LoadError::indentation(
                    "dedent does not match any enclosing indentation level",
                    pos,
                ));
            }
        }
        Ok(())
    }

    fn lex_rest(&mut self, chars: &[char], start: usize, line_no: u32) -> Result<(), LoadError> {
        let mut i = start;
        while i < chars.len() {
            let c = chars[i];
            let pos = Pos::new(line_no, i as u32 + 1);
            match c {
                ' ' | '\r' => {
                    i += 1;
                }
                '\t' => {
                    return Err(LoadError::lex("tab character in source line", pos));
                }
                '0'..='9' => {
                    i = self.lex_number(chars, i, pos);
                }
                '"' => {
                    i = self.lex_string(chars, i, line_no)?;
                }
                '$' => {
                    let next = chars.get(i + 1).copied();
                    if !next.map(is_ident_start).unwrap_or(false) {
                        return Err(LoadError::lex("'$' must be followed by a name", pos));
                    }
                    let (word, end) = read_word(chars, i + 1);
                    self.tokens.push(Token::new(
                        TokenKind::Global(word.clone()),
                        format!("${}", word),
                        pos,
                    ));
                    i = end;
                }
                c if is_ident_start(c) => {
                    let (word, end) = read_word(chars, i);
                    let kind = TokenKind::keyword(&word)
                        .unwrap_or_else(|| TokenKind::Ident(word.clone()));
                    self.tokens.push(Token::new(kind, word, pos));
                    i = end;
                }
                '=' => {
                    if chars.get(i + 1) == Some(&'=') {
                        self.tokens.push(Token::new(TokenKind::Eq, "==", pos));
                        i += 2;
                    } else {
                        return Err(LoadError::lex(
                            "unexpected '='; assignment is spelled 'set ... to'",
                            pos,
                        ));
                    }
                }
                '!' => {
                    if chars.get(i + 1) == Some(&'=') {
                        self.tokens.push(Token::new(TokenKind::NotEq, "!=", pos));
                        i += 2;
                    } else {
                        return Err(LoadError::lex(
                            "unexpected '!'; negation is spelled 'not'",
                            pos,
                        ));
                    }
                }
                '<' => {
                    if chars.get(i + 1) == Some(&'=') {
                        self.tokens.push(Token::new(TokenKind::LessEq, "<=", pos));
                        i += 2;
                    } else {
                        self.tokens.push(Token::new(TokenKind::Less, "<", pos));
                        i += 1;
                    }
                }
                '>' => {
                    if chars.get(i + 1) == Some(&'=') {
                        self.tokens.push(Token::new(TokenKind::GreaterEq, ">=", pos));
                        i += 2;
                    } else {
                        self.tokens.push(Token::new(TokenKind::Greater, ">", pos));
                        i += 1;
                    }
                }
                _ => {
                    let kind = match c {
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        '/' => TokenKind::Slash,
                        '%' => TokenKind::Percent,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        ',' => TokenKind::Comma,
                        '.' => TokenKind::Dot,
                        ':' => TokenKind::Colon,
                        other => {
                            return Err(LoadError::lex(
                                format!("unexpected character '{}'", other),
                                pos,
                            ));
                        }
                    };
                    self.tokens.push(Token::new(kind, c.to_string(), pos));
                    i += 1;
                }
            }
        }
        Ok(())
    }

    fn lex_number(&mut self, chars: &[char], start: usize, pos: Pos) -> usize {
        let mut end = start;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
        if chars.get(end) == Some(&'.')
            && chars.get(end + 1).map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            end += 1;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
        }
        let lexeme: String = chars[start..end].iter().collect();
        let value: f64 = lexeme.parse().unwrap_or(0.0);
        self.tokens
            .push(Token::new(TokenKind::Number(value), lexeme, pos));
        end
    }

    fn lex_string(&mut self, chars: &[char], start: usize, line_no: u32) -> Result<usize, LoadError> {
        let pos = Pos::new(line_no, start as u32 + 1);
        let mut text = String::new();
        let mut i = start + 1;
        loop {
            match chars.get(i) {
                None => {
                    return Err(LoadError::lex("unterminated string literal", pos));
                }
                Some('"') => {
                    i += 1;
                    break;
                }
                Some('\\') => {
                    let escape_pos = Pos::new(line_no, i as u32 + 1);
                    match chars.get(i + 1) {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('"') => text.push('"'),
                        Some('\\') => text.push('\\'),
                        Some(other) => {
                            return Err(LoadError::lex(
                                format!("unknown escape sequence '\\{}'", other),
                                escape_pos,
                            ));
                        }
                        None => {
                            return Err(LoadError::lex("unterminated string literal", pos));
                        }
                    }
                    i += 2;
                }
                Some(c) => {
                    text.push(*c);
                    i += 1;
                }
            }
        }
        let lexeme: String = chars[start..i].iter().collect();
        self.tokens
            .push(Token::new(TokenKind::Str(text), lexeme, pos));
        Ok(i)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn read_word(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_continue(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

/// Removes `//` line comments and `/* */` block comments before
/// tokenization, replacing them with whitespace so every surviving
/// character keeps its line and column.
fn strip_comments(source: &str) -> Result<String, LoadError> {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str { escaped: bool },
        Line,
        Block,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut line = 1u32;
    let mut column = 1u32;
    let mut block_start = Pos::new(1, 1);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' => {
                    state = State::Str { escaped: false };
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    state = State::Line;
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'*') => {
                    block_start = Pos::new(line, column);
                    state = State::Block;
                    out.push(' ');
                }
                _ => out.push(c),
            },
            State::Str { escaped } => {
                out.push(c);
                state = match (escaped, c) {
                    (false, '\\') => State::Str { escaped: true },
                    (false, '"') => State::Code,
                    // An unterminated string falls off the line; the
                    // per-line lexer reports it.
                    (false, '\n') => State::Code,
                    _ => State::Str { escaped: false },
                };
            }
            State::Line => {
                if c == '\n' {
                    state = State::Code;
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    column += 1;
                    state = State::Code;
                    out.push_str("  ");
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    if state == State::Block {
        return Err(LoadError::lex("unterminated block comment", block_start));
    }
    Ok(out)
}

/// Collapses the natural-language operator spellings into single
/// tokens, greedy longest match first: `is at least`, `is at most`,
/// `is greater than`, `is less than`, `is not`, `is in`, then bare
/// `is` as equality.
fn merge_compound_operators(tokens: Vec<Token>) -> Result<Vec<Token>, LoadError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind != TokenKind::Is {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }
        let pos = tokens[i].pos;
        let word_at = |offset: usize| -> Option<&str> {
            match tokens.get(i + offset).map(|t| &t.kind) {
                Some(TokenKind::Ident(w)) => Some(w.as_str()),
                _ => None,
            }
        };
        let (kind, lexeme, consumed) = match tokens.get(i + 1).map(|t| &t.kind) {
            Some(TokenKind::Not) => (TokenKind::NotEq, "is not", 2),
            Some(TokenKind::In) => (TokenKind::IsIn, "is in", 2),
            Some(TokenKind::Ident(w)) if w == "greater" => {
                if word_at(2) != Some("than") {
                    return Err(LoadError::lex("expected 'than' after 'is greater'", pos));
                }
                (TokenKind::Greater, "is greater than", 3)
            }
            Some(TokenKind::Ident(w)) if w == "less" => {
                if word_at(2) != Some("than") {
                    return Err(LoadError::lex("expected 'than' after 'is less'", pos));
                }
                (TokenKind::Less, "is less than", 3)
            }
            Some(TokenKind::Ident(w)) if w == "at" => match word_at(2) {
                Some("least") => (TokenKind::GreaterEq, "is at least", 3),
                Some("most") => (TokenKind::LessEq, "is at most", 3),
                _ => {
                    return Err(LoadError::lex(
                        "expected 'least' or 'most' after 'is at'",
                        pos,
                    ));
                }
            },
            _ => (TokenKind::Eq, "is", 1),
        };
        out.push(Token::new(kind, lexeme, pos));
        i += consumed;
    }
    Ok(out)
}

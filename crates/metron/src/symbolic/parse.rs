//! Text scanner and parser for symbolic expressions.

use log::trace;

use super::{canonical, Exponent, Expression, SymbolicError, Term};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Symbol(String),
    Number(f64),
    Pow(Exponent),
    Star,
    Slash,
    Open,
    Close,
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

fn lex(src: &str) -> Result<Vec<Token>, SymbolicError> {
    let mut cursor = Cursor::new(src);
    let mut tokens = Vec::new();
    while let Some(c) = cursor.peek() {
        if c.is_whitespace() {
            cursor.bump();
        } else if c == '*' {
            cursor.bump();
            tokens.push(Token::Star);
        } else if c == '/' {
            cursor.bump();
            tokens.push(Token::Slash);
        } else if c == '(' {
            cursor.bump();
            tokens.push(Token::Open);
        } else if c == ')' {
            cursor.bump();
            tokens.push(Token::Close);
        } else if c == '^' {
            cursor.bump();
            tokens.push(Token::Pow(lex_exponent(src, &mut cursor)?));
        } else if c.is_ascii_digit() || c == '.' {
            let text = cursor.eat_while(|c| c.is_ascii_digit() || c == '.');
            let value = text
                .parse::<f64>()
                .map_err(|_| SymbolicError::Operand(text.to_string()))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() || c == '_' {
            let text = cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
            tokens.push(Token::Symbol(text.to_string()));
        } else {
            return Err(SymbolicError::Malformed(src.to_string()));
        }
    }
    Ok(tokens)
}

/// An exponent is contiguous with its `^`: an optional sign, digits,
/// and an optional `/denominator` that only counts when a digit
/// follows the slash. `^(p/q)` is also accepted.
fn lex_exponent(src: &str, cursor: &mut Cursor<'_>) -> Result<Exponent, SymbolicError> {
    let parenthesized = cursor.peek() == Some('(');
    if parenthesized {
        cursor.bump();
    }
    let negative = cursor.peek() == Some('-');
    if negative {
        cursor.bump();
    }
    let numer_text = cursor.eat_while(|c| c.is_ascii_digit());
    if numer_text.is_empty() {
        return Err(SymbolicError::Exponent(src.to_string()));
    }
    let numer: i64 = numer_text
        .parse()
        .map_err(|_| SymbolicError::Exponent(src.to_string()))?;
    let denom: i64 = if cursor.peek() == Some('/')
        && cursor.peek_second().map_or(false, |c| c.is_ascii_digit())
    {
        cursor.bump();
        cursor
            .eat_while(|c| c.is_ascii_digit())
            .parse()
            .map_err(|_| SymbolicError::Exponent(src.to_string()))?
    } else {
        1
    };
    if parenthesized && cursor.bump() != Some(')') {
        return Err(SymbolicError::Parentheses(src.to_string()));
    }
    if denom == 0 {
        return Err(SymbolicError::Exponent(src.to_string()));
    }
    let sign = if negative { -1 } else { 1 };
    Ok(Exponent::new(sign * numer, denom))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    src: String,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_expr(&mut self) -> Result<Expression, SymbolicError> {
        let mut acc = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.parse_factor()?;
                    acc = &acc * &rhs;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.parse_factor()?;
                    acc = &acc / &rhs;
                }
                // Juxtaposition multiplies: `kg m^2`.
                Some(Token::Symbol(_)) | Some(Token::Number(_)) | Some(Token::Open) => {
                    let rhs = self.parse_factor()?;
                    acc = &acc * &rhs;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn parse_factor(&mut self) -> Result<Expression, SymbolicError> {
        let token = self
            .next()
            .ok_or_else(|| SymbolicError::Malformed(self.src.clone()))?;
        let base = match token {
            Token::Open => {
                let inner = self.parse_expr()?;
                match self.next() {
                    Some(Token::Close) => inner,
                    _ => return Err(SymbolicError::Parentheses(self.src.clone())),
                }
            }
            Token::Symbol(s) => Expression::from_terms([Term::new(s)]),
            Token::Number(n) => canonical(n, Vec::new()),
            _ => return Err(SymbolicError::Malformed(self.src.clone())),
        };
        if let Some(Token::Pow(k)) = self.peek() {
            let k = *k;
            self.pos += 1;
            Ok(base.pow(k))
        } else {
            Ok(base)
        }
    }
}

pub(super) fn expression(src: &str) -> Result<Expression, SymbolicError> {
    let tokens = lex(src)?;
    if tokens.is_empty() {
        return Err(SymbolicError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        src: src.to_string(),
    };
    let expr = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(match parser.peek() {
            Some(Token::Close) => SymbolicError::Parentheses(src.to_string()),
            _ => SymbolicError::Malformed(src.to_string()),
        });
    }
    trace!("parsed '{}' into {} term(s)", src, expr.terms().len());
    Ok(expr)
}

pub(super) fn term(src: &str) -> Result<Term, SymbolicError> {
    let tokens = lex(src)?;
    let term = match tokens.as_slice() {
        [Token::Symbol(s)] => Term::new(s.clone()),
        [Token::Symbol(s), Token::Pow(k)] => Term::with_exponent(s.clone(), *k),
        [Token::Number(n), Token::Symbol(s)] => Term::new(s.clone()).with_coefficient(*n),
        [Token::Number(n), Token::Symbol(s), Token::Pow(k)] => {
            Term::with_exponent(s.clone(), *k).with_coefficient(*n)
        }
        _ => return Err(SymbolicError::Operand(src.to_string())),
    };
    Ok(term)
}

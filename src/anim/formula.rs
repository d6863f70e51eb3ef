//! Formula-defined curves with a bounded memo cache.
//!
//! A formula is a small arithmetic expression over the variable `x`,
//! e.g. `"x^2"`, `"(1 - cos(pi * x)) / 2"`, `"sqrt(abs(x))"`. Parsed
//! once into an expression tree, evaluated per sample, with results
//! memoized keyed on the exact input bits.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::curve::Curve;

/// Entries kept in one formula's memo cache before least-recently-used
/// eviction.
const CACHE_CAPACITY: usize = 1024;

/// Formula parsing failures.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum CurveError {
    /// The formula text does not parse.
    #[error("formula error at byte {position}: {message}")]
    Parse {
        /// Byte offset of the offending token.
        position: usize,
        /// What was expected or found.
        message: String,
    },
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Token {
    Number(f32),
    X,
    Pi,
    Func(Func),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Func {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Abs,
    Exp,
    Ln,
}

impl Func {
    fn apply(self, v: f32) -> f32 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Sqrt => v.sqrt(),
            Self::Abs => v.abs(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
        }
    }
}

#[derive(Clone, Debug)]
enum Expr {
    Const(f32),
    X,
    Neg(Box<Expr>),
    Call(Func, Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, x: f32) -> f32 {
        match self {
            Self::Const(v) => *v,
            Self::X => x,
            Self::Neg(e) => -e.eval(x),
            Self::Call(f, e) => f.apply(e.eval(x)),
            Self::Add(a, b) => a.eval(x) + b.eval(x),
            Self::Sub(a, b) => a.eval(x) - b.eval(x),
            Self::Mul(a, b) => a.eval(x) * b.eval(x),
            Self::Div(a, b) => a.eval(x) / b.eval(x),
            Self::Pow(a, b) => a.eval(x).powf(b.eval(x)),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, CurveError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;
        match c {
            ' ' | '\t' => {
                i += 1;
            }
            '+' => {
                tokens.push((start, Token::Plus));
                i += 1;
            }
            '-' => {
                tokens.push((start, Token::Minus));
                i += 1;
            }
            '*' => {
                tokens.push((start, Token::Star));
                i += 1;
            }
            '/' => {
                tokens.push((start, Token::Slash));
                i += 1;
            }
            '^' => {
                tokens.push((start, Token::Caret));
                i += 1;
            }
            '(' => {
                tokens.push((start, Token::Open));
                i += 1;
            }
            ')' => {
                tokens.push((start, Token::Close));
                i += 1;
            }
            '0'..='9' | '.' => {
                while i < bytes.len() && matches!(bytes[i] as char, '0'..='9' | '.') {
                    i += 1;
                }
                let literal = &text[start..i];
                let value = literal.parse::<f32>().map_err(|_| CurveError::Parse {
                    position: start,
                    message: format!("bad number literal {literal:?}"),
                })?;
                tokens.push((start, Token::Number(value)));
            }
            'a'..='z' => {
                while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                    i += 1;
                }
                let word = match &text[start..i] {
                    "x" => Token::X,
                    "pi" => Token::Pi,
                    "sin" => Token::Func(Func::Sin),
                    "cos" => Token::Func(Func::Cos),
                    "tan" => Token::Func(Func::Tan),
                    "sqrt" => Token::Func(Func::Sqrt),
                    "abs" => Token::Func(Func::Abs),
                    "exp" => Token::Func(Func::Exp),
                    "ln" => Token::Func(Func::Ln),
                    other => {
                        return Err(CurveError::Parse {
                            position: start,
                            message: format!("unknown name {other:?}"),
                        })
                    }
                };
                tokens.push((start, word));
            }
            other => {
                return Err(CurveError::Parse {
                    position: start,
                    message: format!("unexpected character {other:?}"),
                })
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [(usize, Token)],
    pos: usize,
    end: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(_, t)| *t)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn here(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(p, _)| *p)
    }

    fn expect_close(&mut self) -> Result<(), CurveError> {
        match self.bump() {
            Some(Token::Close) => Ok(()),
            _ => Err(CurveError::Parse {
                position: self.here(),
                message: "expected ')'".to_owned(),
            }),
        }
    }

    fn expr(&mut self) -> Result<Expr, CurveError> {
        let mut left = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.bump();
                    left = Expr::Add(Box::new(left), Box::new(self.term()?));
                }
                Token::Minus => {
                    self.bump();
                    left = Expr::Sub(Box::new(left), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, CurveError> {
        let mut left = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.bump();
                    left = Expr::Mul(Box::new(left), Box::new(self.unary()?));
                }
                Token::Slash => {
                    self.bump();
                    left = Expr::Div(Box::new(left), Box::new(self.unary()?));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, CurveError> {
        if self.peek() == Some(Token::Minus) {
            self.bump();
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, CurveError> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Caret) {
            self.bump();
            // right associative: x^2^3 is x^(2^3)
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CurveError> {
        let position = self.here();
        match self.bump() {
            Some(Token::Number(v)) => Ok(Expr::Const(v)),
            Some(Token::X) => Ok(Expr::X),
            Some(Token::Pi) => Ok(Expr::Const(std::f32::consts::PI)),
            Some(Token::Func(f)) => {
                match self.bump() {
                    Some(Token::Open) => {}
                    _ => {
                        return Err(CurveError::Parse {
                            position: self.here(),
                            message: "expected '(' after function name".to_owned(),
                        })
                    }
                }
                let inner = self.expr()?;
                self.expect_close()?;
                Ok(Expr::Call(f, Box::new(inner)))
            }
            Some(Token::Open) => {
                let inner = self.expr()?;
                self.expect_close()?;
                Ok(inner)
            }
            _ => Err(CurveError::Parse {
                position,
                message: "expected a value".to_owned(),
            }),
        }
    }
}

/// Bounded memo keyed by the input's exact bit pattern.
#[derive(Debug, Default)]
struct Memo {
    values: HashMap<u32, f32>,
    order: VecDeque<u32>,
    hits: u64,
}

impl Memo {
    fn get(&mut self, key: u32) -> Option<f32> {
        let value = self.values.get(&key).copied()?;
        self.hits += 1;
        // refresh recency
        if let Some(p) = self.order.iter().position(|k| *k == key) {
            self.order.remove(p);
        }
        self.order.push_back(key);
        Some(value)
    }

    fn insert(&mut self, key: u32, value: f32) {
        if self.values.len() >= CACHE_CAPACITY {
            if let Some(oldest) = self.order.pop_front() {
                self.values.remove(&oldest);
            }
        }
        self.values.insert(key, value);
        self.order.push_back(key);
    }
}

/// A curve defined by a formula string.
#[derive(Debug)]
pub struct FormulaCurve {
    expr: Expr,
    memo: RefCell<Memo>,
}

impl FormulaCurve {
    /// Parse a formula over the variable `x`.
    ///
    /// # Errors
    /// [`CurveError::Parse`] with the byte position of the first
    /// offending token.
    pub fn parse(text: &str) -> Result<Self, CurveError> {
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            end: text.len(),
        };
        let expr = parser.expr()?;
        if parser.pos != tokens.len() {
            return Err(CurveError::Parse {
                position: parser.here(),
                message: "trailing input after expression".to_owned(),
            });
        }
        Ok(Self {
            expr,
            memo: RefCell::new(Memo::default()),
        })
    }

    /// Memo hits so far; cache behavior is asserted with this rather
    /// than wall-clock timing.
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.memo.borrow().hits
    }
}

impl Curve for FormulaCurve {
    fn value(&self, x: f32) -> f32 {
        let key = x.to_bits();
        let mut memo = self.memo.borrow_mut();
        if let Some(value) = memo.get(key) {
            return value;
        }
        let value = self.expr.eval(x);
        memo.insert(key, value);
        value
    }
}

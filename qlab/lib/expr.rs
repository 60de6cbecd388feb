//! Restricted arithmetic expressions in a single variable `x`, used for
//! user-defined potentials.
//!
//! Input is tokenized, parsed by recursive descent into a small syntax tree,
//! and evaluated against a value of `x`. Nothing beyond arithmetic, a fixed set
//! of math functions and a few constants can be expressed.
//!
//! Grammar, loosest binding first:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | name | name '(' args ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//! Exponentiation is right-associative and binds tighter than unary minus, so
//! `-x^2` is `-(x^2)`. Names may carry a leading `Math.` (`Math.sin(x)`,
//! `Math.PI`) so that expressions written for a JavaScript-style calculator
//! are accepted unchanged.
//!
//! ```
//! use qlab::expr::Expr;
//!
//! let v: Expr = "0.5 * x^2 + Math.sin(pi * x)".parse().unwrap();
//! assert!((v.eval(2.0).unwrap() - 2.0).abs() < 1e-12);
//! assert!("x +* 2".parse::<Expr>().is_err());
//! ```

use std::{ f64::consts, fmt, str::FromStr };
use crate::error::ExprError;

pub type ExprResult<T> = Result<T, ExprError>;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(v) => write!(f, "{}", v),
            Self::Name(s) => write!(f, "{:?}", s),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Percent => write!(f, "'%'"),
            Self::Caret => write!(f, "'^'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
        }
    }
}

fn tokenize(src: &str) -> ExprResult<Vec<Token>> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut k: usize = 0;
    while k < chars.len() {
        let c = chars[k];
        match c {
            c if c.is_whitespace() => { k += 1; },
            '+' => { tokens.push(Token::Plus); k += 1; },
            '-' => { tokens.push(Token::Minus); k += 1; },
            '*' if chars.get(k + 1) == Some(&'*') => {
                tokens.push(Token::Caret);
                k += 2;
            },
            '*' => { tokens.push(Token::Star); k += 1; },
            '/' => { tokens.push(Token::Slash); k += 1; },
            '%' => { tokens.push(Token::Percent); k += 1; },
            '^' => { tokens.push(Token::Caret); k += 1; },
            '(' => { tokens.push(Token::LParen); k += 1; },
            ')' => { tokens.push(Token::RParen); k += 1; },
            ',' => { tokens.push(Token::Comma); k += 1; },
            c if c.is_ascii_digit() || c == '.' => {
                let start = k;
                while k < chars.len()
                    && (chars[k].is_ascii_digit() || chars[k] == '.')
                { k += 1; }
                // exponent part, only if followed by digits
                if k < chars.len() && (chars[k] == 'e' || chars[k] == 'E') {
                    let mut j = k + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        k = j;
                        while k < chars.len() && chars[k].is_ascii_digit() {
                            k += 1;
                        }
                    }
                }
                let lit: String = chars[start..k].iter().collect();
                let val: f64 = lit.parse()
                    .map_err(|_| ExprError::BadNumber(lit.clone()))?;
                tokens.push(Token::Num(val));
            },
            c if c.is_alphabetic() || c == '_' => {
                let start = k;
                while k < chars.len()
                    && (chars[k].is_alphanumeric()
                        || chars[k] == '_'
                        || chars[k] == '.')
                { k += 1; }
                let name: String = chars[start..k].iter().collect();
                tokens.push(Token::Name(name));
            },
            c => { return Err(ExprError::UnexpectedChar(c, k)); },
        }
    }
    Ok(tokens)
}

/// Binary arithmetic operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            Self::Add => l + r,
            Self::Sub => l - r,
            Self::Mul => l * r,
            Self::Div => l / r,
            Self::Rem => l % r,
            Self::Pow => l.powf(r),
        }
    }
}

/// Functions callable from an expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Pow,
    Atan2,
    Hypot,
    Min,
    Max,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        let f = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "pow" => Self::Pow,
            "atan2" => Self::Atan2,
            "hypot" => Self::Hypot,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => { return None; },
        };
        Some(f)
    }

    fn arity(self) -> usize {
        match self {
            Self::Pow | Self::Atan2 | Self::Hypot | Self::Min | Self::Max => 2,
            _ => 1,
        }
    }

    // missing arguments evaluate as NaN and are caught by `Expr::eval`
    fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Abs => a.abs(),
            Self::Sign => if a == 0.0 { 0.0 } else { a.signum() },
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Pow => a.powf(b),
            Self::Atan2 => a.atan2(b),
            Self::Hypot => a.hypot(b),
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "tau" | "TAU" => Some(consts::TAU),
        "SQRT2" => Some(consts::SQRT_2),
        "LN2" => Some(consts::LN_2),
        "LN10" => Some(consts::LN_10),
        _ => None,
    }
}

/// A parsed expression in the single variable `x`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal or named constant.
    Num(f64),
    /// The independent variable.
    X,
    /// Negation.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Function call.
    Call(Func, Vec<Expr>),
}

/// Maximum nesting of parentheses, calls and unary operators, and maximum
/// depth of the resulting syntax tree.
pub const MAX_DEPTH: usize = 256;

// a subtree and its depth
type Parsed = (Expr, usize);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    // current recursion depth of `unary`
    nest: usize,
}

// build a node from its children, rejecting trees that grow too deep
fn node(expr: Expr, child_depth: usize) -> ExprResult<Parsed> {
    let depth = child_depth + 1;
    if depth > MAX_DEPTH { return Err(ExprError::TooDeep(MAX_DEPTH)); }
    Ok((expr, depth))
}

impl Parser {
    fn peek(&self) -> Option<&Token> { self.tokens.get(self.pos) }

    fn next(&mut self) -> ExprResult<Token> {
        let tok = self.tokens.get(self.pos).cloned()
            .ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, tok: Token) -> ExprResult<()> {
        let next = self.next()?;
        (next == tok).then_some(())
            .ok_or_else(|| ExprError::UnexpectedToken(next.to_string()))
    }

    fn binary(op: BinOp, lhs: Parsed, rhs: Parsed) -> ExprResult<Parsed> {
        let (l, dl) = lhs;
        let (r, dr) = rhs;
        node(Expr::Binary(op, Box::new(l), Box::new(r)), dl.max(dr))
    }

    fn expr(&mut self) -> ExprResult<Parsed> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => { break; },
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Self::binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> ExprResult<Parsed> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => { break; },
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Self::binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // every recursive path passes through here
    fn unary(&mut self) -> ExprResult<Parsed> {
        if self.nest >= MAX_DEPTH { return Err(ExprError::TooDeep(MAX_DEPTH)); }
        self.nest += 1;
        let res = self.unary_inner();
        self.nest -= 1;
        res
    }

    fn unary_inner(&mut self) -> ExprResult<Parsed> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                let (inner, d) = self.unary()?;
                node(Expr::Neg(Box::new(inner)), d)
            },
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            },
            _ => self.power(),
        }
    }

    fn power(&mut self) -> ExprResult<Parsed> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let exp = self.unary()?;
            Self::binary(BinOp::Pow, base, exp)
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> ExprResult<Parsed> {
        match self.next()? {
            Token::Num(v) => Ok((Expr::Num(v), 1)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            },
            Token::Name(name) => {
                let bare = name.strip_prefix("Math.").unwrap_or(&name);
                if let Some(Token::LParen) = self.peek() {
                    self.pos += 1;
                    let func = Func::from_name(bare)
                        .ok_or_else(|| ExprError::UnknownFunction(name.clone()))?;
                    let (args, d) = self.args()?;
                    if args.len() != func.arity() {
                        return Err(ExprError::BadArity {
                            name: bare.to_string(),
                            expected: func.arity(),
                            got: args.len(),
                        });
                    }
                    node(Expr::Call(func, args), d)
                } else if bare == "x" {
                    Ok((Expr::X, 1))
                } else {
                    constant(bare).map(|v| (Expr::Num(v), 1))
                        .ok_or(ExprError::UnknownVariable(name))
                }
            },
            tok => Err(ExprError::UnexpectedToken(tok.to_string())),
        }
    }

    // assumes the opening parenthesis has already been consumed; also returns
    // the greatest depth among the arguments
    fn args(&mut self) -> ExprResult<(Vec<Expr>, usize)> {
        let mut args: Vec<Expr> = Vec::new();
        let mut depth: usize = 0;
        if let Some(Token::RParen) = self.peek() {
            self.pos += 1;
            return Ok((args, depth));
        }
        loop {
            let (arg, d) = self.expr()?;
            args.push(arg);
            depth = depth.max(d);
            match self.next()? {
                Token::Comma => { continue; },
                Token::RParen => { break; },
                tok => { return Err(ExprError::UnexpectedToken(tok.to_string())); },
            }
        }
        Ok((args, depth))
    }
}

impl Expr {
    /// Parse an expression from text.
    pub fn parse(src: &str) -> ExprResult<Self> {
        let tokens = tokenize(src)?;
        if tokens.is_empty() { return Err(ExprError::UnexpectedEnd); }
        let mut parser = Parser { tokens, pos: 0, nest: 0 };
        let (expr, _) = parser.expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(tok) => Err(ExprError::UnexpectedToken(tok.to_string())),
        }
    }

    // evaluate without checking for finiteness
    fn eval_raw(&self, x: f64) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::X => x,
            Self::Neg(inner) => -inner.eval_raw(x),
            Self::Binary(op, l, r) => op.apply(l.eval_raw(x), r.eval_raw(x)),
            Self::Call(func, args) => {
                let vals: Vec<f64> = args.iter().map(|a| a.eval_raw(x)).collect();
                func.apply(&vals)
            },
        }
    }

    /// Evaluate at a given `x`.
    ///
    /// Results that are NaN or infinite (e.g. `1/x` at `x = 0`, `sqrt(x)` for
    /// `x < 0`) are reported as [`ExprError::NonFinite`].
    pub fn eval(&self, x: f64) -> ExprResult<f64> {
        let v = self.eval_raw(x);
        v.is_finite().then_some(v).ok_or(ExprError::NonFinite(x))
    }
}

impl FromStr for Expr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use super::*;

    fn ev(src: &str, x: f64) -> f64 {
        Expr::parse(src).unwrap().eval(x).unwrap()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_relative_eq!(ev("1 + 2 * 3", 0.0), 7.0);
        assert_relative_eq!(ev("(1 + 2) * 3", 0.0), 9.0);
        assert_relative_eq!(ev("2 ^ 3 ^ 2", 0.0), 512.0);
        assert_relative_eq!(ev("2 ** 3", 0.0), 8.0);
        assert_relative_eq!(ev("-x^2", 3.0), -9.0);
        assert_relative_eq!(ev("8 / 4 / 2", 0.0), 1.0);
        assert_relative_eq!(ev("10 - 4 - 3", 0.0), 3.0);
        assert_relative_eq!(ev("7 % 4", 0.0), 3.0);
        assert_relative_eq!(ev("2^-1", 0.0), 0.5);
    }

    #[test]
    fn nesting_is_bounded() {
        let parens = format!("{}x{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(Expr::parse(&parens), Err(ExprError::TooDeep(MAX_DEPTH)));
        let negs = format!("{}x", "-".repeat(5000));
        assert_eq!(Expr::parse(&negs), Err(ExprError::TooDeep(MAX_DEPTH)));
        let calls = format!("{}x{}", "sin(".repeat(5000), ")".repeat(5000));
        assert_eq!(Expr::parse(&calls), Err(ExprError::TooDeep(MAX_DEPTH)));
        let chain = vec!["x"; 5000].join(" + ");
        assert_eq!(Expr::parse(&chain), Err(ExprError::TooDeep(MAX_DEPTH)));

        let ok = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert_relative_eq!(ev(&ok, 1.5), 1.5);
        let ok = vec!["x"; 100].join(" + ");
        assert_relative_eq!(ev(&ok, 0.5), 50.0);
        assert_relative_eq!(ev(&format!("{}x", "-".repeat(100)), 2.0), 2.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_relative_eq!(ev("Math.sin(Math.PI / 2)", 0.0), 1.0);
        assert_relative_eq!(ev("exp(-x*x)", 0.0), 1.0);
        assert_relative_eq!(ev("pow(x, 3)", 2.0), 8.0);
        assert_relative_eq!(ev("max(x, 0) + min(x, 0)", -2.5), -2.5);
        assert_relative_eq!(ev("abs(x) + sqrt(4)", -1.0), 3.0);
        assert_relative_eq!(ev("1.5e1 + 2E-1", 0.0), 15.2);
        assert_relative_eq!(ev("e", 0.0), std::f64::consts::E);
    }

    #[test]
    fn syntax_errors() {
        assert!(matches!(Expr::parse(""), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(Expr::parse("x +"), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(Expr::parse("x $ 2"), Err(ExprError::UnexpectedChar('$', 2))));
        assert!(matches!(Expr::parse("(x"), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(Expr::parse("x)"), Err(ExprError::UnexpectedToken(_))));
        assert!(matches!(Expr::parse("y * 2"), Err(ExprError::UnknownVariable(_))));
        assert!(matches!(Expr::parse("foo(x)"), Err(ExprError::UnknownFunction(_))));
        assert!(matches!(Expr::parse("sin(x, 1)"), Err(ExprError::BadArity { .. })));
        assert!(matches!(Expr::parse("1..2"), Err(ExprError::BadNumber(_))));
        assert!(Expr::parse("alert(1); x").is_err());
    }

    #[test]
    fn non_finite_results() {
        let e = Expr::parse("1 / x").unwrap();
        assert!(matches!(e.eval(0.0), Err(ExprError::NonFinite(_))));
        assert_relative_eq!(e.eval(4.0).unwrap(), 0.25);
        let e = Expr::parse("sqrt(x)").unwrap();
        assert!(e.eval(-1.0).is_err());
    }
}

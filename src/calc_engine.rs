use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Digits kept after the decimal point for non-integral results.
const RESULT_DECIMALS: i32 = 10;

/// Above this magnitude an f64 carries no fractional digits worth rounding.
const ROUNDING_LIMIT: f64 = 1e15;

/// Nesting allowed for groups, calls, signs and exponents combined.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    fn to_radians(self, x: f64) -> f64 {
        match self {
            AngleMode::Degrees => x.to_radians(),
            AngleMode::Radians => x,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Degrees => f.write_str("deg"),
            AngleMode::Radians => f.write_str("rad"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            other => Err(format!("unknown angle mode '{}', expected deg or rad", other)),
        }
    }
}

/// A successfully computed value: integral results are kept as integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn value(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Real(x) => x,
        }
    }

    fn from_f64(x: f64) -> Self {
        if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
            return Number::Integer(x as i64);
        }
        if x.fract() == 0.0 || x.abs() >= ROUNDING_LIMIT {
            return Number::Real(x);
        }
        let scale = 10f64.powi(RESULT_DECIMALS);
        Number::Real((x * scale).round() / scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationResult {
    Number(Number),
    Error,
}

impl EvaluationResult {
    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationResult::Error)
    }

    pub fn number(&self) -> Option<Number> {
        match self {
            EvaluationResult::Number(n) => Some(*n),
            EvaluationResult::Error => None,
        }
    }
}

/// Why an evaluation failed. Callers of [`evaluate`] only ever see
/// [`EvaluationResult::Error`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown character: '{0}'")]
    UnknownCharacter(char),
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("unknown name: '{0}'")]
    UnknownName(String),
    #[error("function '{0}' requires parentheses")]
    MissingCallParens(String),
    #[error("missing closing parenthesis")]
    MissingCloseParen,
    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected tokens at end of expression")]
    TrailingTokens,
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0} domain error")]
    Domain(&'static str),
    #[error("result is not a finite number")]
    NonFinite,
    #[error("expression nested too deeply")]
    TooDeep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(char),
    Ident(String),
    LParen,
    RParen,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            '+' | '-' | '*' | '/' | '^' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                let mut has_dot = false;

                while let Some(&ch) = chars.peek() {
                    match ch {
                        '.' if has_dot => break,
                        '.' => {
                            has_dot = true;
                            num_str.push(ch);
                            chars.next();
                        }
                        '0'..='9' => {
                            num_str.push(ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                let value = num_str
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(num_str.clone()))?;
                tokens.push(Token::Number(value));
            }
            _ if c.is_alphabetic() => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphabetic() {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err(EvalError::UnknownCharacter(c)),
        }
    }
    Ok(tokens)
}

/// Recursive-descent evaluator over a closed grammar:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := ('+' | '-') unary | power
/// power   := primary ('^' unary)?
/// primary := number | constant | '(' expr ')' | function '(' expr ')'
/// ```
///
/// `^` binds tighter than a leading sign on its left (`-2^2` is `-4`) and is
/// right-associative through `unary`.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    angle_mode: AngleMode,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, angle_mode: AngleMode) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            angle_mode,
        }
    }

    pub fn parse(&mut self) -> Result<f64, EvalError> {
        let result = self.expr()?;
        if self.current < self.tokens.len() {
            return Err(EvalError::TrailingTokens);
        }
        Ok(result)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut left = self.term()?;

        loop {
            match self.peek() {
                Some(Token::Op('+')) => {
                    self.current += 1;
                    left += self.term()?;
                }
                Some(Token::Op('-')) => {
                    self.current += 1;
                    left -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut left = self.unary()?;

        loop {
            match self.peek() {
                Some(Token::Op('*')) => {
                    self.current += 1;
                    left *= self.unary()?;
                }
                Some(Token::Op('/')) => {
                    self.current += 1;
                    let right = self.unary()?;
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // Every recursive path (group, call argument, sign, exponent) comes
    // back through here, so this is where nesting is bounded.
    fn unary(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        let result = if self.depth > MAX_DEPTH {
            Err(EvalError::TooDeep)
        } else {
            self.signed()
        };
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Op('+')) => {
                self.current += 1;
                self.unary()
            }
            Some(Token::Op('-')) => {
                self.current += 1;
                Ok(-self.unary()?)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;

        if self.peek() == Some(&Token::Op('^')) {
            self.current += 1;
            let exponent = self.unary()?;
            if base == 0.0 && exponent < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            let result = base.powf(exponent);
            if result.is_nan() {
                return Err(EvalError::Domain("power"));
            }
            Ok(result)
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        let token = self.peek().cloned().ok_or(EvalError::UnexpectedEnd)?;
        self.current += 1;

        match token {
            Token::Number(n) => Ok(n),
            Token::LParen => {
                let value = self.expr()?;
                self.expect_close()?;
                Ok(value)
            }
            Token::Ident(name) => match name.as_str() {
                "π" => Ok(PI),
                "e" => Ok(E),
                "sin" | "cos" | "tan" | "sqrt" | "ln" | "log" => {
                    if self.peek() != Some(&Token::LParen) {
                        return Err(EvalError::MissingCallParens(name.clone()));
                    }
                    self.current += 1;
                    let arg = self.expr()?;
                    self.expect_close()?;
                    self.call(&name, arg)
                }
                _ => Err(EvalError::UnknownName(name.clone())),
            },
            other => Err(EvalError::UnexpectedToken(other)),
        }
    }

    fn expect_close(&mut self) -> Result<(), EvalError> {
        if self.peek() == Some(&Token::RParen) {
            self.current += 1;
            Ok(())
        } else {
            Err(EvalError::MissingCloseParen)
        }
    }

    fn call(&self, name: &str, arg: f64) -> Result<f64, EvalError> {
        let result = match name {
            "sin" => self.angle_mode.to_radians(arg).sin(),
            "cos" => self.angle_mode.to_radians(arg).cos(),
            "tan" => self.angle_mode.to_radians(arg).tan(),
            "sqrt" => {
                if arg < 0.0 {
                    return Err(EvalError::Domain("sqrt"));
                }
                arg.sqrt()
            }
            "ln" => {
                if arg <= 0.0 {
                    return Err(EvalError::Domain("ln"));
                }
                arg.ln()
            }
            "log" => {
                if arg <= 0.0 {
                    return Err(EvalError::Domain("log"));
                }
                arg.log10()
            }
            _ => return Err(EvalError::UnknownName(name.to_string())),
        };
        Ok(result)
    }
}

/// Evaluates `text` and reports the reason for any failure.
pub fn evaluate_detailed(text: &str, angle_mode: AngleMode) -> Result<f64, EvalError> {
    let text = text.replace('√', "sqrt");
    let tokens = tokenize(&text)?;
    let value = Parser::new(tokens, angle_mode).parse()?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

pub fn evaluate(text: &str, angle_mode: AngleMode) -> EvaluationResult {
    match evaluate_detailed(text, angle_mode) {
        Ok(value) => EvaluationResult::Number(Number::from_f64(value)),
        Err(e) => {
            debug!(text, %angle_mode, error = %e, "evaluation failed");
            EvaluationResult::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> EvaluationResult {
        EvaluationResult::Number(Number::Integer(n))
    }

    fn real(x: f64) -> EvaluationResult {
        EvaluationResult::Number(Number::Real(x))
    }

    fn deg(text: &str) -> EvaluationResult {
        evaluate(text, AngleMode::Degrees)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(deg("2+2"), int(4));
        assert_eq!(deg("2+3*4"), int(14));
        assert_eq!(deg("(2+3)*4"), int(20));
        assert_eq!(deg("7/2"), real(3.5));
        assert_eq!(deg("10-4-3"), int(3));
        assert_eq!(deg("64/4/2"), int(8));
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_sign() {
        assert_eq!(deg("2^3^2"), int(512));
        assert_eq!(deg("-2^2"), int(-4));
        assert_eq!(deg("2^-1"), real(0.5));
        assert_eq!(deg("(-2)^2"), int(4));
    }

    #[test]
    fn unary_signs() {
        assert_eq!(deg("-5+3"), int(-2));
        assert_eq!(deg("3*-2"), int(-6));
        assert_eq!(deg("--4"), int(4));
        assert_eq!(deg("+7"), int(7));
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(deg("sqrt(25)+sin(0)"), int(5));
        assert_eq!(deg("√(16)"), int(4));
        assert_eq!(deg("ln(1)"), int(0));
        assert_eq!(deg("log(1000)"), int(3));
        assert_eq!(deg("e^(0)"), int(1));
        assert_eq!(deg("π"), real(3.1415926536));
        assert_eq!(deg("e"), real(2.7182818285));
    }

    #[test]
    fn degrees_and_radians() {
        assert_eq!(deg("cos(180)"), int(-1));
        assert_eq!(deg("sin(30)"), real(0.5));
        assert_eq!(evaluate("cos(π)", AngleMode::Radians), int(-1));
        assert_eq!(evaluate("sin(0)", AngleMode::Radians), int(0));
        assert_eq!(evaluate("sin(π/2)", AngleMode::Radians), int(1));
    }

    #[test]
    fn nested_calls() {
        assert_eq!(deg("sqrt(sqrt(81))"), int(3));
        assert_eq!(deg("log(10^(2+1))"), int(3));
    }

    #[test]
    fn failures_collapse_to_error() {
        for text in [
            "1/0",
            "5+(2*3",
            "2+",
            "",
            "sin()",
            "sin 30",
            "sqrt(-1)",
            "ln(0)",
            "log(-10)",
            "0^-1",
            "(-8)^(1/3)",
            "10^400",
            "foo(2)",
            "2**3",
            "2)",
            "1.2.3",
            "3$",
        ] {
            assert_eq!(deg(text), EvaluationResult::Error, "{text:?}");
        }
    }

    #[test]
    fn detailed_errors_name_the_failure() {
        assert_eq!(evaluate_detailed("1/0", AngleMode::Degrees), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate_detailed("5+(2*3", AngleMode::Degrees), Err(EvalError::MissingCloseParen));
        assert_eq!(evaluate_detailed("sqrt(-4)", AngleMode::Degrees), Err(EvalError::Domain("sqrt")));
        assert_eq!(
            evaluate_detailed("abs(2)", AngleMode::Degrees),
            Err(EvalError::UnknownName("abs".to_string()))
        );
        assert_eq!(evaluate_detailed("#", AngleMode::Degrees), Err(EvalError::UnknownCharacter('#')));
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(deg(&parens), EvaluationResult::Error);
        assert_eq!(evaluate_detailed(&parens, AngleMode::Degrees), Err(EvalError::TooDeep));

        let signs = format!("{}1", "-".repeat(10_000));
        assert_eq!(deg(&signs), EvaluationResult::Error);

        let calls = format!("{}0{}", "sin(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(deg(&calls), EvaluationResult::Error);

        let powers = format!("1{}", "^1".repeat(10_000));
        assert_eq!(deg(&powers), EvaluationResult::Error);
    }

    #[test]
    fn moderate_nesting_still_evaluates() {
        let parens = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(deg(&parens), int(7));
        assert_eq!(deg(&format!("{}3", "--".repeat(50))), int(3));
    }

    #[test]
    fn results_are_rounded() {
        assert_eq!(deg("1/3"), real(0.3333333333));
        assert_eq!(deg("0.1+0.2"), real(0.3));
    }

    #[test]
    fn angle_mode_parses_and_toggles() {
        assert_eq!("deg".parse::<AngleMode>(), Ok(AngleMode::Degrees));
        assert_eq!("Radians".parse::<AngleMode>(), Ok(AngleMode::Radians));
        assert!("grad".parse::<AngleMode>().is_err());
        assert_eq!(AngleMode::Degrees.toggled(), AngleMode::Radians);
    }
}

//! Token table for the calculator keypad.
//!
//! Every named token maps to a tagged descriptor. Literal tokens (digits,
//! the decimal point, operators and parentheses) are recognized by shape
//! and go straight to the display.

use std::fmt;

use num::ToPrimitive;

use crate::error::{CalcError, PartialComp};
use crate::value::Number;

/// How the display text is read before a unary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Parse as an integer; anything else is rejected.
    Integer,
    /// Parse as a floating point number.
    Real,
}

impl Mode {
    pub fn read(self, text: &str) -> Result<Number, CalcError> {
        let text = text.trim();
        match self {
            Mode::Integer => Ok(Number::Int(text.parse()?)),
            Mode::Real => Ok(Number::Float(text.parse()?)),
        }
    }
}

/// Check applied to the operand before computing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    None,
    /// Negative operands are reported as "Not a number".
    NonNegative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unary {
    Sqrt,
    CubeRoot,
    Square,
    Cube,
    Percent,
    Negate,
    Reciprocal,
    Log10,
    Sin,
    Cos,
    Tan,
    Factorial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOp {
    Add,
    Subtract,
    Clear,
    Recall,
}

/// What a token does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Appended to the display as typed.
    Literal,
    Evaluate,
    Clear,
    Unary { op: Unary, mode: Mode, guard: Guard },
    Memory(MemoryOp),
}

#[derive(Clone, Copy, Debug)]
pub struct Descriptor {
    pub token: &'static str,
    pub kind: Kind,
}

const fn unary(op: Unary) -> Descriptor {
    Descriptor {
        token: op.token(),
        kind: Kind::Unary {
            op,
            mode: op.mode(),
            guard: op.guard(),
        },
    }
}

const fn command(token: &'static str, kind: Kind) -> Descriptor {
    Descriptor { token, kind }
}

/// Every named (non-literal) token.
pub static COMMANDS: [Descriptor; 18] = [
    command("=", Kind::Evaluate),
    command("C", Kind::Clear),
    unary(Unary::Sqrt),
    unary(Unary::CubeRoot),
    unary(Unary::Square),
    unary(Unary::Cube),
    unary(Unary::Percent),
    unary(Unary::Negate),
    unary(Unary::Reciprocal),
    unary(Unary::Log10),
    unary(Unary::Sin),
    unary(Unary::Cos),
    unary(Unary::Tan),
    unary(Unary::Factorial),
    command("M+", Kind::Memory(MemoryOp::Add)),
    command("M-", Kind::Memory(MemoryOp::Subtract)),
    command("MC", Kind::Memory(MemoryOp::Clear)),
    command("MR", Kind::Memory(MemoryOp::Recall)),
];

/// The keypad, row by row.
#[rustfmt::skip]
pub static KEYPAD: [&str; 35] = [
    "MC", "M+", "M-", "MR", "C", "%", "/",
    "√", "^2", "^3", "7", "8", "9", "*",
    "sin", "cos", "tan", "4", "5", "6", "+",
    "1/x", "3√", "log", "1", "2", "3", "-",
    "(", ")", "x!", "0", ".", "+/-", "=",
];

pub fn is_literal(token: &str) -> bool {
    match token {
        "." | "+" | "-" | "*" | "/" | "(" | ")" => true,
        _ => token.chars().all(|c| c.is_ascii_digit()),
    }
}

pub fn lookup(token: &str) -> Option<Kind> {
    if is_literal(token) {
        return Some(Kind::Literal);
    }
    COMMANDS
        .iter()
        .find(|descriptor| descriptor.token == token)
        .map(|descriptor| descriptor.kind)
}

impl Unary {
    pub const ALL: [Unary; 12] = [
        Unary::Sqrt,
        Unary::CubeRoot,
        Unary::Square,
        Unary::Cube,
        Unary::Percent,
        Unary::Negate,
        Unary::Reciprocal,
        Unary::Log10,
        Unary::Sin,
        Unary::Cos,
        Unary::Tan,
        Unary::Factorial,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Unary::Sqrt => "√",
            Unary::CubeRoot => "3√",
            Unary::Square => "^2",
            Unary::Cube => "^3",
            Unary::Percent => "%",
            Unary::Negate => "+/-",
            Unary::Reciprocal => "1/x",
            Unary::Log10 => "log",
            Unary::Sin => "sin",
            Unary::Cos => "cos",
            Unary::Tan => "tan",
            Unary::Factorial => "x!",
        }
    }

    pub const fn mode(self) -> Mode {
        match self {
            Unary::Negate | Unary::Factorial => Mode::Integer,
            _ => Mode::Real,
        }
    }

    pub const fn guard(self) -> Guard {
        match self {
            // Cube roots of negatives are rejected along with square roots.
            Unary::Sqrt | Unary::CubeRoot => Guard::NonNegative,
            _ => Guard::None,
        }
    }

    /// Checks the guard, then applies the operation.
    pub fn apply(self, value: Number) -> Result<Number, CalcError> {
        if self.guard() == Guard::NonNegative && value.as_float() < 0.0 {
            return Err(CalcError::NegativeRoot(self.token()));
        }
        let x = value.as_float();
        let result = match self {
            Unary::Negate => return Ok(-value),
            Unary::Factorial => return factorial(value).map(Number::Int),
            Unary::Sqrt => x.sqrt(),
            Unary::CubeRoot => x.powf(1.0 / 3.0),
            Unary::Square => x.powi(2),
            Unary::Cube => x.powi(3),
            Unary::Percent => x / 100.0,
            Unary::Reciprocal if x == 0.0 => return Err(self.undefined(value)),
            Unary::Reciprocal => 1.0 / x,
            Unary::Log10 if x <= 0.0 => return Err(self.undefined(value)),
            Unary::Log10 => x.log10(),
            Unary::Sin => x.to_radians().sin(),
            Unary::Cos => x.to_radians().cos(),
            Unary::Tan => x.to_radians().tan(),
        };
        Number::Float(result).in_range(self.token(), value)
    }

    fn undefined(self, value: Number) -> CalcError {
        CalcError::Undefined(PartialComp::unary(self.token(), value))
    }

    fn overflow<T: ToString>(self, arg: T) -> CalcError {
        CalcError::WouldOverflow(PartialComp::unary(self.token(), arg))
    }
}

fn factorial(value: Number) -> Result<i64, CalcError> {
    let n = match value {
        Number::Int(n) => n,
        Number::Float(x) if x.fract() == 0.0 => x
            .to_i64()
            .ok_or_else(|| Unary::Factorial.overflow(value))?,
        Number::Float(_) => return Err(Unary::Factorial.undefined(value)),
    };
    if n < 0 {
        return Err(Unary::Factorial.undefined(value));
    }
    (2..=n).try_fold(1i64, |acc, k| {
        acc.checked_mul(k).ok_or_else(|| Unary::Factorial.overflow(n))
    })
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let token = match *self {
            MemoryOp::Add => "M+",
            MemoryOp::Subtract => "M-",
            MemoryOp::Clear => "MC",
            MemoryOp::Recall => "MR",
        };
        f.write_str(token)
    }
}

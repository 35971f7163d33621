use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Represents a partial computation that can be captured as part of an
/// error message, e.g. `x! 25`.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialComp {
    op: String,
    arg: String,
}

impl PartialComp {
    pub fn unary<T, U>(op: T, arg: U) -> Self
    where
        T: ToString,
        U: ToString,
    {
        PartialComp {
            op: op.to_string(),
            arg: arg.to_string(),
        }
    }
}

impl fmt::Display for PartialComp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.op, self.arg)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("expected {1} token, got {0} instead")]
    UnexpectedToken(String, &'static str),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    #[error("name '{0}' is not defined")]
    UnknownAtom(String),
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("attempted to divide by zero")]
    DivideByZero,
    #[error("result is not a finite number")]
    NotFinite,
    #[error("{0} is not defined for negative numbers")]
    NegativeRoot(&'static str),
    #[error("{0} is not defined")]
    Undefined(PartialComp),
    #[error("expression '{0}' would overflow")]
    WouldOverflow(PartialComp),
    #[error("display does not hold a number")]
    NoValue,
}

impl CalcError {
    /// Classifies the error into what the display shows for it.
    pub fn fault(&self) -> Fault {
        use self::CalcError::*;
        match *self {
            UnrecognizedToken(_)
            | InvalidNumber(_)
            | UnexpectedToken(..)
            | UnexpectedEndOfInput
            | UnmatchedParenthesis => Fault::InvalidInput,
            DivideByZero | NotFinite | NegativeRoot(_) => Fault::NotANumber,
            UnknownAtom(_) | TooDeep(_) | Undefined(_) | WouldOverflow(_) | NoValue => {
                Fault::Generic(self.to_string())
            }
        }
    }
}

impl From<ParseFloatError> for CalcError {
    fn from(data: ParseFloatError) -> CalcError {
        CalcError::InvalidNumber(data.to_string())
    }
}

impl From<ParseIntError> for CalcError {
    fn from(data: ParseIntError) -> CalcError {
        CalcError::InvalidNumber(data.to_string())
    }
}

/// The three ways a failed operation shows up on the display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    InvalidInput,
    NotANumber,
    Generic(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Fault::InvalidInput => f.write_str("Invalid Input"),
            Fault::NotANumber => f.write_str("Not a number"),
            Fault::Generic(ref message) => write!(f, "Error: {}", message),
        }
    }
}

impl From<CalcError> for Fault {
    fn from(err: CalcError) -> Fault {
        err.fault()
    }
}

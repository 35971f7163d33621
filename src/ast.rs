//! Expression tree produced by the parser.
//!
//! Runs of same-precedence operators (`a - b + c`) are kept flat in a
//! `Chain`, so the tree only grows deeper through parentheses, signs and
//! powers, all of which the parser bounds.

use std::fmt;

use crate::error::CalcError;
use crate::value::Number;

/// Left-associative binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
}

impl BinaryOp {
    pub fn apply(self, lhs: Number, rhs: Number) -> Result<Number, CalcError> {
        match self {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Subtract => Ok(lhs - rhs),
            BinaryOp::Multiply => Ok(lhs * rhs),
            BinaryOp::Divide => lhs / rhs,
            BinaryOp::FloorDivide => lhs.floor_div(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match *self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::FloorDivide => "//",
        };
        f.write_str(symbol)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(Number),
    /// An identifier. Nothing is ever bound to a name, so evaluating one
    /// always fails.
    Name(String),
    Negate(Box<Expr>),
    /// `base ** exponent`
    Power(Box<Expr>, Box<Expr>),
    /// A first operand followed by operator/operand pairs, applied left to right.
    Chain(Box<Expr>, Vec<(BinaryOp, Expr)>),
}

impl Expr {
    pub fn eval(&self) -> Result<Number, CalcError> {
        match *self {
            Expr::Number(n) => Ok(n),
            Expr::Name(ref name) => Err(CalcError::UnknownAtom(name.clone())),
            Expr::Negate(ref operand) => Ok(-operand.eval()?),
            Expr::Power(ref base, ref exponent) => base.eval()?.pow(exponent.eval()?),
            Expr::Chain(ref first, ref rest) => {
                let mut acc = first.eval()?;
                for &(op, ref operand) in rest {
                    acc = op.apply(acc, operand.eval()?)?;
                }
                Ok(acc)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Name(ref name) => f.write_str(name),
            Expr::Negate(ref operand) => write!(f, "-({})", operand),
            Expr::Power(ref base, ref exponent) => write!(f, "({})**({})", base, exponent),
            Expr::Chain(ref first, ref rest) => {
                write!(f, "({})", first)?;
                for &(op, ref operand) in rest {
                    write!(f, " {} ({})", op, operand)?;
                }
                Ok(())
            }
        }
    }
}

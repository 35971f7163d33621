use std::convert::TryFrom;
use std::fmt;
use std::ops::*;

use num::Integer;

use crate::error::{CalcError, PartialComp};

/// Magnitude from which floats switch to scientific notation.
const SCI_UPPER: f64 = 1e16;
/// Magnitude below which floats switch to scientific notation.
const SCI_LOWER: f64 = 1e-4;

/// Represents a canonical value that can be calculated by this library
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// An integral value. Arithmetic that would overflow it is carried out
    /// as `Float` instead.
    Int(i64),
    /// A floating point number
    Float(f64),
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl Number {
    /// Reads a number the way the memory keys do: integer when the text is
    /// one, float otherwise, `None` when it is neither.
    pub fn parse_loose(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            Some(Number::Int(n))
        } else if let Ok(x) = text.parse::<f64>() {
            Some(Number::Float(x))
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Number::Int(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    pub fn as_float(&self) -> f64 {
        match *self {
            Number::Int(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    /// Represents a computation that stays integral when both sides are
    /// integers and the integer operation does not overflow, and is cast to
    /// floating point otherwise.
    pub fn castmap<F, G>(self, that: Number, f: F, g: G) -> Number
    where
        F: Fn(i64, i64) -> Option<i64>,
        G: Fn(f64, f64) -> f64,
    {
        match (self, that) {
            (Number::Int(n), Number::Int(m)) => match f(n, m) {
                Some(r) => Number::Int(r),
                None => Number::Float(g(n as f64, m as f64)),
            },
            (lhs, rhs) => Number::Float(g(lhs.as_float(), rhs.as_float())),
        }
    }

    /// Floor division. Integral for two integers.
    pub fn floor_div(self, that: Number) -> Result<Number, CalcError> {
        if that.is_zero() {
            return Err(CalcError::DivideByZero);
        }
        let value = match (self, that) {
            // i64::MIN // -1 is the only overflowing case.
            (Number::Int(n), Number::Int(m)) if !(n == i64::MIN && m == -1) => {
                Number::Int(Integer::div_floor(&n, &m))
            }
            (lhs, rhs) => Number::Float((lhs.as_float() / rhs.as_float()).floor()),
        };
        Ok(value)
    }

    pub fn pow(self, that: Number) -> Result<Number, CalcError> {
        if self.is_zero() && that.as_float() < 0.0 {
            return Err(CalcError::DivideByZero);
        }
        let value = match (self, that) {
            (Number::Int(n), Number::Int(m)) if m >= 0 => {
                let exact = usize::try_from(m)
                    .ok()
                    .and_then(|m| num::checked_pow(n, m));
                match exact {
                    Some(r) => Number::Int(r),
                    None => Number::Float((n as f64).powf(m as f64)),
                }
            }
            (Number::Float(n), Number::Int(m)) if m >= i32::MIN as i64 && m <= i32::MAX as i64 => {
                Number::Float(n.powi(m as i32))
            }
            (lhs, rhs) => Number::Float(lhs.as_float().powf(rhs.as_float())),
        };
        Ok(value)
    }

    /// Fails with `NotFinite` unless the number is finite.
    pub fn finite(self) -> Result<Number, CalcError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(CalcError::NotFinite)
        }
    }

    /// Checks that a unary result did not leave the representable range.
    pub fn in_range<T: ToString>(self, op: &'static str, arg: T) -> Result<Number, CalcError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(CalcError::WouldOverflow(PartialComp::unary(op, arg)))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) if !x.is_finite() => write!(f, "{}", x),
            Number::Float(x) => {
                let magnitude = x.abs();
                if x == 0.0 || (magnitude >= SCI_LOWER && magnitude < SCI_UPPER) {
                    // Integral floats print without a fractional part.
                    write!(f, "{}", x)
                } else {
                    write!(f, "{:e}", x)
                }
            }
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, that: Number) -> Self::Output {
        self.castmap(that, |x, y| x.checked_add(y), |x, y| x + y)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, that: Number) -> Self::Output {
        self.castmap(that, |x, y| x.checked_sub(y), |x, y| x - y)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, that: Number) -> Self::Output {
        self.castmap(that, |x, y| x.checked_mul(y), |x, y| x * y)
    }
}

impl Div for Number {
    type Output = Result<Self, CalcError>;

    /// True division: the quotient is always a float.
    fn div(self, that: Number) -> Self::Output {
        if that.is_zero() {
            return Err(CalcError::DivideByZero);
        }
        Ok(Number::Float(self.as_float() / that.as_float()))
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Number::Int(n) => match n.checked_neg() {
                Some(r) => Number::Int(r),
                None => Number::Float(-(n as f64)),
            },
            Number::Float(f) => Number::Float(-f),
        }
    }
}

//! Engine of a desktop calculator.
//!
//! A [`Calculator`] owns a display buffer and a memory register. Front-ends
//! feed it keypad tokens (`"7"`, `"+"`, `"√"`, `"M+"`, `"="`, ...) or key
//! presses and render [`Calculator::display`] afterwards. Failures never
//! escape: they show up on the display as `Invalid Input`, `Not a number`
//! or `Error: <message>`.
//!
//! ```
//! use deskcalc::Calculator;
//!
//! let mut calc = Calculator::with_hook(());
//! for token in &["9", "√", "+", "1", "="] {
//!     calc.handle_token(token);
//! }
//! assert_eq!(calc.display(), "4");
//! ```

mod ast;
mod engine;
mod error;
mod hook;
mod keys;
mod ops;
mod parse;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use crate::ast::{BinaryOp, Expr};
pub use crate::engine::Calculator;
pub use crate::error::{CalcError, Fault, PartialComp};
pub use crate::hook::{Hook, Outcome, TraceHook};
pub use crate::keys::{key_input, Key, KeyInput};
pub use crate::ops::{lookup, Descriptor, Guard, Kind, MemoryOp, Mode, Unary, COMMANDS, KEYPAD};
pub use crate::parse::MAX_DEPTH;
pub use crate::value::Number;

/// Parses an arithmetic expression without evaluating it.
pub fn parse_expr(input: &str) -> Result<Expr, CalcError> {
    token::tokenize(input).and_then(|tokens| parse::parse(&tokens))
}

/// Evaluates an arithmetic expression. Non-finite results are errors.
pub fn eval(input: &str) -> Result<Number, CalcError> {
    parse_expr(input)
        .and_then(|expr| expr.eval())
        .and_then(Number::finite)
}

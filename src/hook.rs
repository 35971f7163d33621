//! Observability around token dispatch.
//!
//! The engine calls its hook once before and once after handling every
//! token, so logging (or any other instrumentation) lives in one place
//! instead of in each operation.

use std::fmt;

use crate::error::Fault;
use crate::ops::{MemoryOp, Unary};

/// What handling a token did to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Appended,
    Evaluated,
    Applied(Unary),
    Memory(MemoryOp),
    Cleared,
    Erased,
    /// The token was handled and left nothing to report, e.g. a backspace
    /// on an empty display.
    Ignored,
    Rejected(Fault),
}

impl Outcome {
    pub fn fault(&self) -> Option<&Fault> {
        match *self {
            Outcome::Rejected(ref fault) => Some(fault),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Appended => f.write_str("appended"),
            Outcome::Evaluated => f.write_str("evaluated"),
            Outcome::Applied(op) => write!(f, "applied {}", op),
            Outcome::Memory(op) => write!(f, "memory {}", op),
            Outcome::Cleared => f.write_str("cleared"),
            Outcome::Erased => f.write_str("erased"),
            Outcome::Ignored => f.write_str("ignored"),
            Outcome::Rejected(ref fault) => write!(f, "rejected: {}", fault),
        }
    }
}

pub trait Hook {
    /// Called with the display as it was before the token.
    fn before(&mut self, _token: &str, _display: &str) {}

    /// Called with the display as the token left it.
    fn after(&mut self, _token: &str, _outcome: &Outcome, _display: &str) {}
}

/// The silent hook.
impl Hook for () {}

impl<'a, H: Hook + ?Sized> Hook for &'a mut H {
    fn before(&mut self, token: &str, display: &str) {
        (**self).before(token, display)
    }

    fn after(&mut self, token: &str, outcome: &Outcome, display: &str) {
        (**self).after(token, outcome, display)
    }
}

impl<H: Hook + ?Sized> Hook for Box<H> {
    fn before(&mut self, token: &str, display: &str) {
        (**self).before(token, display)
    }

    fn after(&mut self, token: &str, outcome: &Outcome, display: &str) {
        (**self).after(token, outcome, display)
    }
}

/// Logs every dispatch through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceHook;

impl Hook for TraceHook {
    fn before(&mut self, token: &str, shown: &str) {
        tracing::debug!(token, display = shown, "handling token");
    }

    fn after(&mut self, token: &str, outcome: &Outcome, shown: &str) {
        match outcome.fault() {
            Some(fault) => tracing::warn!(token, %fault, "token rejected"),
            None => tracing::debug!(token, %outcome, display = shown, "token handled"),
        }
    }
}

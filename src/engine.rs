use crate::error::{CalcError, Fault};
use crate::eval;
use crate::hook::{Hook, Outcome, TraceHook};
use crate::keys::{key_input, Key, KeyInput};
use crate::ops::{lookup, Kind, MemoryOp, Mode, Unary};
use crate::value::Number;

/// Name the hook sees for a backspace.
const BACKSPACE: &str = "BackSpace";
/// Name the hook sees for a clear.
const CLEAR: &str = "C";

/// The calculator: a display buffer, a memory register and the hook that
/// observes every token.
///
/// No operation fails: errors are written to the display and the engine
/// stays usable.
#[derive(Debug)]
pub struct Calculator<H = TraceHook> {
    display: String,
    memory: Number,
    hook: H,
}

impl Calculator<TraceHook> {
    pub fn new() -> Self {
        Calculator::with_hook(TraceHook)
    }
}

impl Default for Calculator<TraceHook> {
    fn default() -> Self {
        Calculator::new()
    }
}

impl<H: Hook> Calculator<H> {
    pub fn with_hook(hook: H) -> Self {
        Calculator {
            display: String::new(),
            memory: Number::default(),
            hook,
        }
    }

    /// The text currently shown.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn memory(&self) -> Number {
        self.memory
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Handles one keypad token.
    pub fn handle_token(&mut self, token: &str) -> Outcome {
        self.observe(token, |calc| calc.dispatch(token))
    }

    /// Handles one key press. Keys without a meaning are ignored without
    /// reaching the hook.
    pub fn handle_key(&mut self, key: Key) -> Option<Outcome> {
        match key_input(key)? {
            KeyInput::Token(token) => Some(self.handle_token(token)),
            KeyInput::Backspace => Some(self.backspace()),
        }
    }

    fn observe<F>(&mut self, token: &str, handle: F) -> Outcome
    where
        F: FnOnce(&mut Self) -> Outcome,
    {
        self.hook.before(token, &self.display);
        let outcome = handle(self);
        self.hook.after(token, &outcome, &self.display);
        outcome
    }

    fn dispatch(&mut self, token: &str) -> Outcome {
        match lookup(token) {
            Some(Kind::Literal) => self.append(token),
            Some(Kind::Evaluate) => {
                let expression = self.display.trim().to_owned();
                self.evaluate(&expression)
            }
            Some(Kind::Clear) => self.erase_all(),
            Some(Kind::Unary { op, mode, .. }) => self.apply_unary(op, mode),
            Some(Kind::Memory(op)) => self.handle_memory(op),
            None => self.reject(CalcError::UnrecognizedToken(token.to_owned())),
        }
    }

    /// Appends text to the display as typed.
    pub fn append(&mut self, text: &str) -> Outcome {
        self.display.push_str(text);
        Outcome::Appended
    }

    /// Evaluates `expression` and shows the result.
    pub fn evaluate(&mut self, expression: &str) -> Outcome {
        match eval(expression) {
            Ok(value) => {
                self.show(value);
                Outcome::Evaluated
            }
            Err(err) => self.reject(err),
        }
    }

    /// Reads the display in `mode`, applies `op` and shows the result.
    pub fn apply_unary(&mut self, op: Unary, mode: Mode) -> Outcome {
        match mode.read(&self.display).and_then(|value| op.apply(value)) {
            Ok(value) => {
                self.show(value);
                Outcome::Applied(op)
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn handle_memory(&mut self, op: MemoryOp) -> Outcome {
        match self.try_memory(op) {
            Ok(()) => Outcome::Memory(op),
            Err(err) => self.reject(err),
        }
    }

    fn try_memory(&mut self, op: MemoryOp) -> Result<(), CalcError> {
        let current = Number::parse_loose(&self.display).ok_or(CalcError::NoValue);
        match op {
            MemoryOp::Add => {
                self.memory = (self.memory + current?).finite()?;
                self.show(self.memory);
            }
            MemoryOp::Subtract => {
                self.memory = (self.memory - current?).finite()?;
                self.show(self.memory);
            }
            MemoryOp::Clear => self.memory = Number::default(),
            MemoryOp::Recall => self.show(self.memory),
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Outcome {
        self.observe(CLEAR, |calc| calc.erase_all())
    }

    /// Removes the last character shown, if any.
    pub fn backspace(&mut self) -> Outcome {
        self.observe(BACKSPACE, |calc| calc.erase_last())
    }

    fn erase_all(&mut self) -> Outcome {
        self.display.clear();
        Outcome::Cleared
    }

    fn erase_last(&mut self) -> Outcome {
        match self.display.pop() {
            Some(_) => Outcome::Erased,
            None => Outcome::Ignored,
        }
    }

    fn show(&mut self, value: Number) {
        self.display = value.to_string();
    }

    fn reject(&mut self, err: CalcError) -> Outcome {
        tracing::debug!(error = %err, display = %self.display, "operation failed");
        let fault = Fault::from(err);
        self.display = fault.to_string();
        Outcome::Rejected(fault)
    }
}

//! Keyboard input.
//!
//! Typing on the keyboard has the same effect as pressing the keypad
//! button with the same symbol. A few keys have no button of their own:
//! Return evaluates, Escape clears and BackSpace deletes.

/// A key press as reported by a front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Return,
    Escape,
    BackSpace,
    Other,
}

/// What a key press asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Token(&'static str),
    Backspace,
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub fn key_input(key: Key) -> Option<KeyInput> {
    let token = match key {
        Key::Char(c) => match c {
            '0'..='9' => DIGITS[c as usize - '0' as usize],
            '+' => "+",
            '-' => "-",
            '*' => "*",
            '/' => "/",
            '(' => "(",
            ')' => ")",
            '.' => ".",
            '%' => "%",
            '=' => "=",
            'c' => "C",
            _ => return None,
        },
        Key::Return => "=",
        Key::Escape => "C",
        Key::BackSpace => return Some(KeyInput::Backspace),
        Key::Other => return None,
    };
    Some(KeyInput::Token(token))
}

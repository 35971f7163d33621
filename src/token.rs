use std::fmt;
use std::iter::Peekable;

use crate::error::CalcError;
use crate::error::CalcError::*;
use crate::value::Number;

/// Tokens used for parsing an arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Plus,
    Minus,
    Divide,
    FloorDivide,
    Multiply,
    Exponent,
    OpenParen,
    CloseParen,
    Number(Number),
    Atom(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Plus => write!(f, "Plus"),
            Token::Minus => write!(f, "Minus"),
            Token::Divide => write!(f, "Divide"),
            Token::FloorDivide => write!(f, "FloorDivide"),
            Token::Multiply => write!(f, "Multiply"),
            Token::Exponent => write!(f, "Exponent"),
            Token::OpenParen => write!(f, "OpenParen"),
            Token::CloseParen => write!(f, "CloseParen"),
            Token::Number(ref n) => write!(f, "'{}'", n),
            Token::Atom(ref s) => write!(f, "'{}'", s),
        }
    }
}

enum OperatorState {
    PotentiallyIncomplete,
    Complete,
    NotAnOperator,
}

trait IsOperator {
    fn is_operator(self) -> bool;
}

impl IsOperator for char {
    fn is_operator(self) -> bool {
        match self {
            '+' | '-' | '/' | '*' | '(' | ')' => true,
            _ => false,
        }
    }
}

trait CheckOperator {
    fn check_operator(self) -> OperatorState;
}

impl CheckOperator for char {
    fn check_operator(self) -> OperatorState {
        match self {
            '+' | '-' | '(' | ')' => OperatorState::Complete,
            '*' | '/' => OperatorState::PotentiallyIncomplete,
            _ => OperatorState::NotAnOperator,
        }
    }
}

trait OperatorMatch {
    fn operator_type(self) -> Option<Token>;
}

impl OperatorMatch for [char; 2] {
    fn operator_type(self) -> Option<Token> {
        if self == ['*', '*'] {
            Some(Token::Exponent)
        } else if self == ['/', '/'] {
            Some(Token::FloorDivide)
        } else {
            None
        }
    }
}

impl OperatorMatch for char {
    fn operator_type(self) -> Option<Token> {
        match self {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '/' => Some(Token::Divide),
            '*' => Some(Token::Multiply),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => None,
        }
    }
}

fn is_atom_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if is_atom_start(c) {
            tokens.push(Token::Atom(consume_atom(&mut chars)));
        } else if c.is_ascii_digit() || c == '.' {
            tokens.push(consume_number(&mut chars)?);
        } else {
            match c.check_operator() {
                OperatorState::Complete => {
                    tokens.push(
                        c.operator_type()
                            .ok_or_else(|| UnrecognizedToken(c.to_string()))?,
                    );
                    chars.next();
                }
                OperatorState::PotentiallyIncomplete => {
                    chars.next();
                    let pair = chars.peek().and_then(|&next| [c, next].operator_type());
                    match pair {
                        Some(token) => {
                            tokens.push(token);
                            chars.next();
                        }
                        None => tokens.push(
                            c.operator_type()
                                .ok_or_else(|| UnrecognizedToken(c.to_string()))?,
                        ),
                    }
                }
                OperatorState::NotAnOperator => {
                    if c.is_whitespace() {
                        chars.next();
                    } else {
                        let token_string = consume_until_new_token(&mut chars);
                        return Err(UnrecognizedToken(token_string));
                    }
                }
            }
        }
    }
    Ok(tokens)
}

fn digits<I>(input: &mut Peekable<I>, number: &mut String) -> usize
where
    I: Iterator<Item = char>,
{
    let mut count = 0;
    while let Some(&c) = input.peek() {
        if c.is_ascii_digit() {
            number.push(c);
            count += 1;
        } else {
            break;
        }
        input.next();
    }
    count
}

/// Consume a numeric literal:
/// - an integer part, a fraction, or both (`12`, `1.5`, `.5`, `5.`)
/// - an optional exponent (`1e16`, `2.5E-3`)
///
/// Multi-digit integers may not start with a zero unless every digit is one.
fn consume_number<I>(input: &mut Peekable<I>) -> Result<Token, CalcError>
where
    I: Iterator<Item = char>,
{
    let mut number = String::new();
    let whole = digits(input, &mut number);
    let mut is_float = false;
    let mut mantissa = whole;

    if let Some(&'.') = input.peek() {
        input.next();
        number.push('.');
        is_float = true;
        mantissa += digits(input, &mut number);
    }
    if mantissa == 0 {
        return Err(InvalidNumber(number));
    }

    if let Some(&e) = input.peek() {
        if e == 'e' || e == 'E' {
            input.next();
            number.push(e);
            is_float = true;
            if let Some(&sign) = input.peek() {
                if sign == '+' || sign == '-' {
                    input.next();
                    number.push(sign);
                }
            }
            if digits(input, &mut number) == 0 {
                return Err(InvalidNumber(number));
            }
        }
    }

    if is_float {
        Ok(Token::Number(Number::Float(number.parse()?)))
    } else if number.len() > 1 && number.starts_with('0') && number.chars().any(|c| c != '0') {
        Err(InvalidNumber(number))
    } else {
        // Integers beyond i64 are read as floats, like overflowing arithmetic.
        let value = number
            .parse::<i64>()
            .map(Number::Int)
            .or_else(|_| number.parse::<f64>().map(Number::Float))?;
        Ok(Token::Number(value))
    }
}

/// Consume a valid atom. An atom is defined by:
/// - Starting with an alphabetic character or an underscore
/// - Consisting of alphanumeric characters or underscores
fn consume_atom<I: Iterator<Item = char>>(input: &mut Peekable<I>) -> String {
    let mut atom = String::new();
    while let Some(&c) = input.peek() {
        if c.is_alphanumeric() || c == '_' {
            atom.push(c);
            input.next();
        } else {
            break;
        }
    }
    atom
}

fn consume_until_new_token<I: Iterator<Item = char>>(input: &mut I) -> String {
    input
        .take_while(|c| !(c.is_whitespace() || c.is_operator() || c.is_ascii_digit()))
        .collect()
}

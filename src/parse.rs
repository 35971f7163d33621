use crate::ast::{BinaryOp, Expr};
use crate::error::CalcError;
use crate::token::*;

/// Deepest nesting of parentheses, signs and powers the parser accepts.
pub const MAX_DEPTH: usize = 100;

#[derive(Clone, Debug)]
pub struct Parsed {
    expr: Expr,
    tokens_read: usize,
}

impl Parsed {
    pub fn new(expr: Expr, tokens_read: usize) -> Self {
        Parsed { expr, tokens_read }
    }
}

fn additive(token: &Token) -> Option<BinaryOp> {
    match *token {
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Subtract),
        _ => None,
    }
}

fn multiplicative(token: &Token) -> Option<BinaryOp> {
    match *token {
        Token::Multiply => Some(BinaryOp::Multiply),
        Token::Divide => Some(BinaryOp::Divide),
        Token::FloorDivide => Some(BinaryOp::FloorDivide),
        _ => None,
    }
}

/// Parses `first (op next)*`, where `select` picks the operators of one
/// precedence level and `next` parses its operands.
fn chain<S, N>(
    token_list: &[Token],
    depth: usize,
    select: S,
    next: N,
) -> Result<Parsed, CalcError>
where
    S: Fn(&Token) -> Option<BinaryOp>,
    N: Fn(&[Token], usize) -> Result<Parsed, CalcError>,
{
    let first = next(token_list, depth)?;
    let mut index = first.tokens_read;
    let mut rest = Vec::new();

    while let Some(op) = token_list.get(index).and_then(|t| select(t)) {
        let operand = next(&token_list[index + 1..], depth)?;
        index += operand.tokens_read + 1;
        rest.push((op, operand.expr));
    }

    if rest.is_empty() {
        Ok(first)
    } else {
        Ok(Parsed::new(Expr::Chain(Box::new(first.expr), rest), index))
    }
}

// Addition and subtraction
fn e_expr(token_list: &[Token], depth: usize) -> Result<Parsed, CalcError> {
    chain(token_list, depth, additive, t_expr)
}

// Multiplication, division and floor division
fn t_expr(token_list: &[Token], depth: usize) -> Result<Parsed, CalcError> {
    chain(token_list, depth, multiplicative, u_expr)
}

// Sign prefixes
fn u_expr(token_list: &[Token], depth: usize) -> Result<Parsed, CalcError> {
    if depth > MAX_DEPTH {
        return Err(CalcError::TooDeep(MAX_DEPTH));
    }
    match token_list.first() {
        Some(Token::Minus) => {
            let ir = u_expr(&token_list[1..], depth + 1)?;
            Ok(Parsed::new(Expr::Negate(Box::new(ir.expr)), ir.tokens_read + 1))
        }
        Some(Token::Plus) => {
            let ir = u_expr(&token_list[1..], depth + 1)?;
            Ok(Parsed::new(ir.expr, ir.tokens_read + 1))
        }
        _ => f_expr(token_list, depth + 1),
    }
}

// Exponentiation, right-associative and binding tighter than a sign on its left
fn f_expr(token_list: &[Token], depth: usize) -> Result<Parsed, CalcError> {
    let g = g_expr(token_list, depth)?;
    match token_list.get(g.tokens_read) {
        Some(Token::Exponent) => {
            let exponent = u_expr(&token_list[g.tokens_read + 1..], depth)?;
            Ok(Parsed::new(
                Expr::Power(Box::new(g.expr), Box::new(exponent.expr)),
                g.tokens_read + exponent.tokens_read + 1,
            ))
        }
        _ => Ok(g),
    }
}

// Numbers, names and parenthesized expressions
fn g_expr(token_list: &[Token], depth: usize) -> Result<Parsed, CalcError> {
    match token_list.first() {
        Some(Token::Number(n)) => Ok(Parsed::new(Expr::Number(*n), 1)),
        Some(Token::Atom(s)) => Ok(Parsed::new(Expr::Name(s.clone()), 1)),
        Some(Token::OpenParen) => {
            let ir = e_expr(&token_list[1..], depth)?;
            let close_paren = ir.tokens_read + 1;
            match token_list.get(close_paren) {
                Some(Token::CloseParen) => Ok(Parsed::new(ir.expr, close_paren + 1)),
                Some(other) => Err(CalcError::UnexpectedToken(other.to_string(), ")")),
                None => Err(CalcError::UnmatchedParenthesis),
            }
        }
        Some(other) => Err(CalcError::UnexpectedToken(other.to_string(), "number")),
        None => Err(CalcError::UnexpectedEndOfInput),
    }
}

pub fn parse(tokens: &[Token]) -> Result<Expr, CalcError> {
    let parsed = e_expr(tokens, 0)?;
    match tokens.get(parsed.tokens_read) {
        None => Ok(parsed.expr),
        Some(Token::CloseParen) => Err(CalcError::UnmatchedParenthesis),
        Some(other) => Err(CalcError::UnexpectedToken(other.to_string(), "operator")),
    }
}

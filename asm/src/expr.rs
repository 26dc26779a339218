use crate::driver::{Context, Pass};
use crate::error::Error;
use crate::symbol::SymbolTable;
use crate::token::{Token, TokenKind};

// ----------------------------------------------------------------------------
// Expression value

/// Result of evaluating one expression: the 16-bit value, a size hint
/// (`wide` = two bytes), whether the `A(..)` address-of form was used
/// (widens the enclosing instruction), and whether every symbol involved
/// was actually resolved (Pass 1 substitutes 0 for unknown names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprValue {
    pub value: u16,
    pub wide: bool,
    pub addr_of: bool,
    pub resolved: bool,
}

impl ExprValue {
    fn new(value: u16, wide: bool) -> Self {
        ExprValue {
            value,
            wide,
            addr_of: false,
            resolved: true,
        }
    }
}

fn peek(line: &str, pos: usize) -> Option<u8> {
    line.as_bytes().get(pos).copied()
}

// ----------------------------------------------------------------------------
// Evaluator

/// Evaluate an expression starting at `pos`, advancing the cursor past the
/// consumed span. Handles the address-of forms `A(expr)`, `A.0(expr)` and
/// `A.1(expr)`; everything else is a simple expression with an optional
/// trailing `+const` / `-const`.
pub fn eval(
    line: &str,
    pos: &mut usize,
    ctx: &Context,
    symtab: &SymbolTable,
) -> Result<ExprValue, Error> {
    let save = *pos;
    if peek(line, *pos) != Some(b'*') {
        let tok = Token::scan(line, pos);
        if tok.kind == TokenKind::Text && tok.text == "A" {
            match peek(line, *pos) {
                Some(b'(') => {
                    *pos += 1;
                    return addr_of(line, pos, ctx, symtab, None);
                }
                Some(b'.') => {
                    *pos += 1;
                    let sel = match peek(line, *pos) {
                        Some(b'0') => 0,
                        Some(b'1') => 1,
                        _ => return Err(Error::InvPeriod),
                    };
                    *pos += 1;
                    if peek(line, *pos) != Some(b'(') {
                        return Err(Error::MissingParen);
                    }
                    *pos += 1;
                    return addr_of(line, pos, ctx, symtab, Some(sel));
                }
                // no parenthesis: A is just an ordinary identifier
                _ => {}
            }
        }
        *pos = save;
    }
    operand(line, pos, ctx, symtab)
}

// A(expr) / A.0(expr) / A.1(expr), cursor already past the '('.
fn addr_of(
    line: &str,
    pos: &mut usize,
    ctx: &Context,
    symtab: &SymbolTable,
    sel: Option<u8>,
) -> Result<ExprValue, Error> {
    let inner = operand(line, pos, ctx, symtab)?;
    if peek(line, *pos) != Some(b')') {
        return Err(Error::MissingParen);
    }
    *pos += 1;
    let out = match sel {
        // A(expr): full address, widens the enclosing instruction
        None => ExprValue {
            value: inner.value,
            wide: true,
            addr_of: true,
            resolved: inner.resolved,
        },
        Some(0) => ExprValue {
            value: inner.value & 0x00FF,
            wide: false,
            addr_of: false,
            resolved: inner.resolved,
        },
        Some(_) => ExprValue {
            value: inner.value >> 8,
            wide: false,
            addr_of: false,
            resolved: inner.resolved,
        },
    };
    Ok(out)
}

// Simple expression plus the optional trailing +const / -const.
fn operand(
    line: &str,
    pos: &mut usize,
    ctx: &Context,
    symtab: &SymbolTable,
) -> Result<ExprValue, Error> {
    let mut base = if peek(line, *pos) == Some(b'*') {
        *pos += 1;
        // the location counter is always treated as two bytes wide
        ExprValue::new(ctx.pc, true)
    } else {
        let tok = Token::scan(line, pos);
        simple(&tok, ctx, symtab)?
    };

    let minus = match peek(line, *pos) {
        Some(b'+') => false,
        Some(b'-') => true,
        _ => return Ok(base),
    };
    *pos += 1;
    let tok = Token::scan(line, pos);
    let cval = match tok.kind {
        TokenKind::BConst | TokenKind::DConst | TokenKind::HConst => tok.value(),
        TokenKind::Error(e) => return Err(e),
        // only a constant may follow the sign, not another symbol
        _ => return Err(Error::MissingConst),
    };
    base.value = if minus {
        base.value.wrapping_sub(cval)
    } else {
        base.value.wrapping_add(cval)
    };
    base.wide = true;
    Ok(base)
}

fn simple(tok: &Token, ctx: &Context, symtab: &SymbolTable) -> Result<ExprValue, Error> {
    match tok.kind {
        TokenKind::Empty => Err(Error::MissingExpr),
        TokenKind::Error(e) => Err(e),
        // a string yields the value of its first character
        TokenKind::Str => Ok(ExprValue::new(tok.text.as_bytes()[0] as u16, false)),
        TokenKind::BConst | TokenKind::DConst | TokenKind::HConst => {
            let v = tok.value();
            Ok(ExprValue::new(v, v > 0x00FF))
        }
        TokenKind::Text => identifier(&tok.text, ctx, symtab),
    }
}

fn identifier(name: &str, ctx: &Context, symtab: &SymbolTable) -> Result<ExprValue, Error> {
    if let Some(sym) = symtab.get(name) {
        return match sym.value() {
            // a bound symbol always has a one-byte hint; A(..) asks for two
            Some(v) => Ok(ExprValue::new(v, false)),
            None => undefined(ctx),
        };
    }
    // unbound identifiers that read as hex are taken as hex constants
    if is_hex_like(name) {
        let v = u16::from_str_radix(name, 16).unwrap_or(0);
        return Ok(ExprValue::new(v, v > 0x00FF));
    }
    undefined(ctx)
}

fn undefined(ctx: &Context) -> Result<ExprValue, Error> {
    match ctx.pass {
        // the symbol may still be defined further down; use 0 for now
        Pass::One => Ok(ExprValue {
            value: 0,
            wide: false,
            addr_of: false,
            resolved: false,
        }),
        Pass::Two => Err(Error::UndefSymbol),
    }
}

pub(crate) fn is_hex_like(name: &str) -> bool {
    (1..=4).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

use arch::{Instr, OperType};

use crate::driver::{Context, Pass};
use crate::error::Error;
use crate::expr::{self, is_hex_like};
use crate::symbol::SymbolTable;
use crate::token::{Token, TokenKind};

// ----------------------------------------------------------------------------
// Statement

/// Terminal classification of one statement. Error is sticky: once set, the
/// statement stays an error with exactly one error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StKind {
    Nop,
    Dc,
    Equ,
    Org,
    Page,
    End,
    Instr,
    Error,
}

/// One source statement: `[Label:] [Mnemonic [operand] [,datalist]]`.
///
/// A statement is re-parsed once per pass from its stored raw text, because
/// the symbol resolution available to the evaluator differs between passes.
/// `parse` writes only into the statement's own fields.
#[derive(Debug)]
pub struct Statement {
    text: String,
    line: u32,
    bad_period: bool,

    pub kind: StKind,
    pub error: Option<Error>,
    pub label: Option<String>,
    pub value: u16,
    pub size: u16,
    pub resolved: bool,
    pub instr: Option<&'static Instr>,
    pub code: Vec<u8>,
}

impl Statement {
    pub fn new(text: &str, line: u32, bad_period: bool) -> Self {
        Statement {
            text: text.to_string(),
            line,
            bad_period,
            kind: StKind::Nop,
            error: None,
            label: None,
            value: 0,
            size: 0,
            resolved: true,
            instr: None,
            code: Vec::new(),
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse (and on Pass 2, encode) this statement against the current
    /// context and symbol table. An erroring statement keeps its previously
    /// computed size so the location counter stays in step between passes,
    /// and contributes no object bytes.
    pub fn parse(&mut self, ctx: &Context, symtab: &SymbolTable) {
        let prev_size = self.size;
        self.kind = StKind::Nop;
        self.error = None;
        self.label = None;
        self.value = 0;
        self.size = 0;
        self.resolved = true;
        self.instr = None;
        self.code.clear();

        let text = std::mem::take(&mut self.text);
        let result = self.parse_inner(&text, ctx, symtab);
        self.text = text;

        if let Err(e) = result {
            self.kind = StKind::Error;
            self.error = Some(e);
            self.size = prev_size;
            self.code.clear();
        }
    }

    fn parse_inner(&mut self, line: &str, ctx: &Context, symtab: &SymbolTable) -> Result<(), Error> {
        if self.bad_period {
            return Err(Error::InvPeriod);
        }
        let bytes = line.as_bytes();
        let mut pos = 0;

        skip_space(line, &mut pos);
        if pos == bytes.len() {
            return Ok(()); // empty
        }

        // bare data-list
        if bytes[pos] == b',' {
            self.kind = StKind::Dc;
            return self.datalist(line, &mut pos, ctx, symtab, true);
        }

        if !bytes[pos].is_ascii_alphabetic() {
            return Err(Error::BadStart);
        }

        let mut name = first_name(line, &mut pos)?;
        skip_space(line, &mut pos);

        // label
        let mut labeled = false;
        if bytes.get(pos) == Some(&b':') {
            pos += 1;
            labeled = true;
            self.label = Some(name);
            skip_space(line, &mut pos);
            if pos == bytes.len() {
                return Ok(()); // label alone
            }
            name = first_name(line, &mut pos)?;
            skip_space(line, &mut pos);
        }

        // equate
        if !labeled && bytes.get(pos) == Some(&b'=') {
            pos += 1;
            skip_space(line, &mut pos);
            self.kind = StKind::Equ;
            self.label = Some(name);
            let v = expr::eval(line, &mut pos, ctx, symtab)?;
            self.value = v.value;
            self.resolved = v.resolved;
            return expect_end(line, &mut pos);
        }

        // directive or instruction mnemonic
        match name.as_str() {
            "DC" => {
                self.kind = StKind::Dc;
                if pos == bytes.len() {
                    return Err(Error::MissingExpr);
                }
                self.datalist(line, &mut pos, ctx, symtab, false)
            }
            "ORG" => {
                self.kind = StKind::Org;
                let v = expr::eval(line, &mut pos, ctx, symtab)?;
                self.value = v.value;
                self.resolved = v.resolved;
                expect_end(line, &mut pos)
            }
            "PAGE" => {
                self.kind = StKind::Page;
                expect_end(line, &mut pos)
            }
            "END" => {
                self.kind = StKind::End;
                expect_end(line, &mut pos)
            }
            _ => self.instruction(&name, line, &mut pos, ctx, symtab),
        }
    }

    fn instruction(
        &mut self,
        name: &str,
        line: &str,
        pos: &mut usize,
        ctx: &Context,
        symtab: &SymbolTable,
    ) -> Result<(), Error> {
        let instr = arch::lookup(name).ok_or(Error::InvMnemonic)?;
        self.kind = StKind::Instr;
        self.instr = Some(instr);
        self.size = instr.size;

        match instr.oper {
            OperType::NONE => {
                self.code.push(instr.opcode);
            }
            OperType::REG | OperType::REG1 | OperType::IODEV => {
                let v = regdev(line, pos, ctx, symtab, instr.oper)?;
                self.code.push(instr.opcode | v);
            }
            OperType::EXPR => {
                let v = expr::eval(line, pos, ctx, symtab)?;
                self.value = v.value;
                self.resolved = v.resolved;
                self.code.push(instr.opcode);
                if v.addr_of {
                    // the address-of form widens the encoding by one byte
                    self.size += 1;
                    self.code.push((v.value >> 8) as u8);
                }
                self.code.push(v.value as u8);
            }
            OperType::SADDR => {
                let v = expr::eval(line, pos, ctx, symtab)?;
                self.value = v.value;
                self.resolved = v.resolved;
                // the operand byte at pc+1 must share the target's page;
                // addresses are not final on Pass 1, so only Pass 2 checks
                if ctx.pass == Pass::Two
                    && (ctx.pc.wrapping_add(1) & 0xFF00) != (v.value & 0xFF00)
                {
                    return Err(Error::InvBranch);
                }
                self.code.push(instr.opcode);
                self.code.push(v.value as u8);
            }
            OperType::LADDR => {
                let v = expr::eval(line, pos, ctx, symtab)?;
                self.value = v.value;
                self.resolved = v.resolved;
                self.code.push(instr.opcode);
                self.code.push((v.value >> 8) as u8);
                self.code.push(v.value as u8);
            }
        }

        // optional trailing data-list
        skip_space(line, pos);
        if *pos == line.len() {
            return Ok(());
        }
        if line.as_bytes()[*pos] == b',' {
            return self.datalist(line, pos, ctx, symtab, true);
        }
        Err(Error::InvMnemonic)
    }

    // Comma-separated items, each a string (one byte per character) or an
    // expression (one or two bytes per its size hint, high byte first).
    // With `leading_comma` the cursor sits on the ',' introducing the list.
    fn datalist(
        &mut self,
        line: &str,
        pos: &mut usize,
        ctx: &Context,
        symtab: &SymbolTable,
        leading_comma: bool,
    ) -> Result<(), Error> {
        let mut need_comma = leading_comma;
        loop {
            skip_space(line, pos);
            if *pos == line.len() {
                return Ok(());
            }
            if need_comma {
                if line.as_bytes()[*pos] != b',' {
                    return Err(Error::InvSyntax);
                }
                *pos += 1;
                skip_space(line, pos);
            }
            need_comma = true;

            let save = *pos;
            let tok = Token::scan(line, pos);
            match tok.kind {
                TokenKind::Str => {
                    self.code.extend_from_slice(tok.text.as_bytes());
                    self.size += tok.text.len() as u16;
                }
                TokenKind::Error(e) => return Err(e),
                _ => {
                    *pos = save;
                    let v = expr::eval(line, pos, ctx, symtab)?;
                    if !v.resolved {
                        self.resolved = false;
                    }
                    if v.wide {
                        self.code.push((v.value >> 8) as u8);
                        self.code.push(v.value as u8);
                        self.size += 2;
                    } else {
                        self.code.push(v.value as u8);
                        self.size += 1;
                    }
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Operand helpers

// First token of a statement (or of the part after a label): must be a name.
fn first_name(line: &str, pos: &mut usize) -> Result<String, Error> {
    let tok = Token::scan(line, pos);
    match tok.kind {
        TokenKind::Text => Ok(tok.text),
        TokenKind::Error(e) => Err(e),
        _ => Err(Error::InvMnemonic),
    }
}

// Register / io-device operand: a constant, the literal `Rh` notation, a
// bound symbol (low bits), or an unprefixed hex literal.
fn regdev(
    line: &str,
    pos: &mut usize,
    ctx: &Context,
    symtab: &SymbolTable,
    oper: OperType,
) -> Result<u8, Error> {
    let (limit, mask, inv) = if oper == OperType::IODEV {
        (7u16, 0x07u16, Error::InvDevice)
    } else {
        (15u16, 0x0Fu16, Error::InvRegister)
    };

    let mut placeholder = false;
    let tok = Token::scan(line, pos);
    let value = match tok.kind {
        TokenKind::Empty => return Err(Error::MissingExpr),
        TokenKind::Error(e) => return Err(e),
        TokenKind::Str => return Err(inv),
        TokenKind::BConst | TokenKind::DConst | TokenKind::HConst => {
            let v = tok.value();
            if v > limit {
                return Err(inv);
            }
            v
        }
        TokenKind::Text => {
            let name = tok.text.as_str();
            if let Some(h) = reg_literal(name) {
                let v = h as u16;
                if v > limit {
                    return Err(inv);
                }
                v
            } else if let Some(sym) = symtab.get(name) {
                match sym.value() {
                    Some(v) => v & mask,
                    None => match ctx.pass {
                        Pass::One => {
                            placeholder = true;
                            0
                        }
                        Pass::Two => return Err(Error::UndefSymbol),
                    },
                }
            } else if is_hex_like(name) {
                let v = u16::from_str_radix(name, 16).unwrap_or(0);
                if v > limit {
                    return Err(inv);
                }
                v
            } else {
                match ctx.pass {
                    Pass::One => {
                        placeholder = true;
                        0
                    }
                    Pass::Two => return Err(Error::UndefSymbol),
                }
            }
        }
    };

    // register 0 is excluded for REG1; a Pass-1 placeholder is not a real 0
    if oper == OperType::REG1 && value == 0 && !placeholder {
        return Err(Error::InvRegister);
    }
    Ok(value as u8)
}

// R0..R9, RA..RF
fn reg_literal(name: &str) -> Option<u8> {
    let b = name.as_bytes();
    if b.len() == 2 && b[0] == b'R' {
        (b[1] as char).to_digit(16).map(|d| d as u8)
    } else {
        None
    }
}

fn skip_space(line: &str, pos: &mut usize) {
    let bytes = line.as_bytes();
    while *pos < bytes.len() && (bytes[*pos] == b' ' || bytes[*pos] == b'\t') {
        *pos += 1;
    }
}

fn expect_end(line: &str, pos: &mut usize) -> Result<(), Error> {
    skip_space(line, pos);
    if *pos == line.len() {
        Ok(())
    } else {
        Err(Error::InvSyntax)
    }
}

use std::collections::HashSet;

use crate::error::Error;
use crate::stmt::{StKind, Statement};
use crate::symbol::SymbolTable;

// ----------------------------------------------------------------------------
// Assembly context

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    One,
    Two,
}

/// Location counter and pass number, reset at the start of each pass and
/// threaded by reference through parsing and evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub pass: Pass,
    pub pc: u16,
}

// ----------------------------------------------------------------------------
// Output records

/// What Pass 2 produces for one logical source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub line: u32,
    pub source: String,
    pub errors: Vec<Error>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub records: Vec<LineRecord>,
    pub errors: usize,
    pub missing_end: bool,
}

// ----------------------------------------------------------------------------
// Statement splitter

// Split one raw line on ';', except inside quoted strings, and drop period
// comments (".text."). An unterminated period comment marks the statement
// it interrupted, which then reports INV_PERIOD when parsed.
fn split_line(line: &str, num: u32, out: &mut Vec<Statement>) {
    enum State {
        Text,
        Quote,
        Period,
    }
    let mut state = State::Text;
    let mut buf = String::new();

    for c in line.chars() {
        match state {
            State::Text => match c {
                ';' => {
                    if !buf.is_empty() {
                        out.push(Statement::new(&buf, num, false));
                    }
                    buf.clear();
                }
                '\'' => {
                    buf.push(c);
                    state = State::Quote;
                }
                '.' => state = State::Period,
                _ => buf.push(c),
            },
            State::Quote => {
                buf.push(c);
                if c == '\'' {
                    state = State::Text;
                }
            }
            State::Period => {
                if c == '.' {
                    state = State::Text;
                }
            }
        }
    }

    match state {
        State::Period => out.push(Statement::new(&buf, num, true)),
        _ => {
            if !buf.is_empty() {
                out.push(Statement::new(&buf, num, false));
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Two-pass driver

/// Owns the statement sequence and the symbol table for one assembly run.
/// The statement order and count never change between passes; only resolved
/// values and diagnostics differ.
pub struct Assembler {
    source: Vec<String>,
    stmts: Vec<Statement>,
    symtab: SymbolTable,
    missing_end: bool,
}

impl Assembler {
    pub fn new(source: Vec<String>) -> Self {
        let mut stmts = Vec::new();
        for (idx, line) in source.iter().enumerate() {
            split_line(line, idx as u32 + 1, &mut stmts);
        }
        Assembler {
            source,
            stmts,
            symtab: SymbolTable::new(),
            missing_end: false,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symtab
    }

    pub fn statements(&self) -> &[Statement] {
        &self.stmts
    }

    pub fn run(&mut self) -> Listing {
        self.pass1();
        self.pass2()
    }

    /// Pass 1: build the symbol table and compute the layout. Undefined
    /// symbols are tolerated; sizes and label addresses are final after this.
    pub fn pass1(&mut self) {
        self.symtab = SymbolTable::new();
        let mut ctx = Context {
            pass: Pass::One,
            pc: 0,
        };
        let mut ended = false;

        for st in &mut self.stmts {
            st.parse(&ctx, &self.symtab);
            if st.kind == StKind::Error {
                ctx.pc = ctx.pc.wrapping_add(st.size);
                continue;
            }

            if let Some(label) = st.label.clone() {
                if self.symtab.get(&label).is_some() {
                    self.symtab.mark_duplicate(&label);
                } else if st.kind == StKind::Equ {
                    let value = if st.resolved { Some(st.value) } else { None };
                    self.symtab.define(&label, value);
                    continue; // that is all in this statement
                } else {
                    self.symtab.define(&label, Some(ctx.pc));
                }
            }

            match st.kind {
                StKind::Org => ctx.pc = st.value,
                StKind::Page => ctx.pc = ctx.pc.wrapping_add(0x100) & 0xFF00,
                StKind::End => {
                    // ignore all text after END
                    ended = true;
                    break;
                }
                StKind::Equ => {} // duplicate equate keeps the first value
                _ => ctx.pc = ctx.pc.wrapping_add(st.size),
            }
        }
        self.missing_end = !ended;
    }

    /// Pass 2: re-resolve, validate, emit object bytes, and collect one
    /// record per source line. Idempotent for an unchanged symbol table.
    pub fn pass2(&mut self) -> Listing {
        let mut ctx = Context {
            pass: Pass::Two,
            pc: 0,
        };
        let mut records: Vec<LineRecord> = Vec::new();
        let mut errors = 0;
        let mut current: Option<LineRecord> = None;
        // labels whose defining statement was already seen on this pass;
        // only redefinitions get the duplicate diagnostic
        let mut defined: HashSet<String> = HashSet::new();

        for st in &mut self.stmts {
            if current.as_ref().map(|r| r.line) != Some(st.line()) {
                if let Some(rec) = current.take() {
                    errors += rec.errors.len();
                    records.push(rec);
                }
                current = Some(LineRecord {
                    address: ctx.pc,
                    bytes: Vec::new(),
                    line: st.line(),
                    source: self
                        .source
                        .get(st.line() as usize - 1)
                        .cloned()
                        .unwrap_or_default(),
                    errors: Vec::new(),
                });
            }
            let rec = current.as_mut().unwrap();

            st.parse(&ctx, &self.symtab);

            if st.kind == StKind::Error {
                if let Some(e) = st.error {
                    rec.errors.push(e);
                }
                // keep the Pass-1 size so later addresses stay in step
                ctx.pc = ctx.pc.wrapping_add(st.size);
                continue;
            }

            if let Some(label) = st.label.clone() {
                let dup = self
                    .symtab
                    .get(&label)
                    .map_or(false, |sym| sym.is_duplicate());
                let first = defined.insert(label.clone());
                if dup && !first {
                    rec.errors.push(Error::DupSymbol);
                } else if st.kind == StKind::Equ && !dup && first {
                    // the expression may only have resolved on this pass
                    self.symtab.update_value(&label, st.value);
                    continue;
                }
            }

            match st.kind {
                StKind::Org => ctx.pc = st.value,
                StKind::Page => ctx.pc = ctx.pc.wrapping_add(0x100) & 0xFF00,
                StKind::End => break,
                StKind::Equ => {}
                _ => {
                    rec.bytes.extend_from_slice(&st.code);
                    ctx.pc = ctx.pc.wrapping_add(st.size);
                }
            }
        }
        if let Some(rec) = current.take() {
            errors += rec.errors.len();
            records.push(rec);
        }

        Listing {
            records,
            errors,
            missing_end: self.missing_end,
        }
    }
}

use color_print::cprintln;

use crate::driver::{LineRecord, Listing};
use crate::symbol::SymbolTable;

// Object bytes per listing row, as in the reference listing layout.
const ROW_BYTES: usize = 7;

/// Print the full listing: one row per source line, continuation rows when
/// a line emitted more than seven bytes, then its diagnostics.
pub fn print_listing(listing: &Listing) {
    for rec in &listing.records {
        print_record(rec);
    }
}

fn print_record(rec: &LineRecord) {
    let mut off = 0;
    loop {
        let end = (off + ROW_BYTES).min(rec.bytes.len());
        let hex = rec.bytes[off..end]
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        if off == 0 {
            cprintln!(
                "<green>{:04X}</> {:<20} <blue>{:>4}</> {}",
                rec.address,
                hex,
                rec.line,
                rec.source
            );
        } else {
            cprintln!(
                "<green>{:04X}</> {:<20}",
                rec.address.wrapping_add(off as u16),
                hex
            );
        }
        off = end;
        if off >= rec.bytes.len() {
            break;
        }
    }
    print_errors(rec);
}

fn print_errors(rec: &LineRecord) {
    for err in &rec.errors {
        cprintln!(">>> <red,bold>{}</> (line {})", err, rec.line);
    }
}

/// Diagnostics only, for quiet mode.
pub fn print_diagnostics(listing: &Listing) {
    for rec in &listing.records {
        print_errors(rec);
    }
}

pub fn print_summary(listing: &Listing) {
    println!();
    if listing.missing_end {
        cprintln!("<yellow,bold>warn</>: Missing END directive");
    }
    if listing.errors == 0 {
        println!("0 errors");
    } else {
        cprintln!("<red,bold>{} errors</>", listing.errors);
    }
}

pub fn print_symbols(symtab: &SymbolTable) {
    println!();
    println!("Symbol Table");
    println!();
    println!("{:<8} Hex    Dec", "Symbol");
    for sym in symtab.iter() {
        match sym.value() {
            Some(v) => cprintln!("{:<8} <green>{:04X}</> {:>6}", sym.name(), v, v),
            None => cprintln!("{:<8} <yellow>not yet known</>", sym.name()),
        }
    }
    println!();
}

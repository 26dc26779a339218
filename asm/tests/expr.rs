use asm1802::expr::{eval, ExprValue};
use asm1802::{Context, Error, Pass, SymbolTable};

fn table() -> SymbolTable {
    let mut symtab = SymbolTable::new();
    symtab.define("START", Some(0x1234));
    symtab.define("LOW", Some(0x0005));
    symtab.define("PENDING", None);
    symtab
}

fn run(code: &str, pass: Pass, pc: u16) -> Result<ExprValue, Error> {
    let ctx = Context { pass, pc };
    let symtab = table();
    let mut pos = 0;
    let out = eval(code, &mut pos, &ctx, &symtab);
    println!("{:?} <- {:?}", out, code);
    out
}

fn ok(code: &str) -> ExprValue {
    run(code, Pass::Two, 0x0200).unwrap()
}

#[test]
fn constants() {
    assert_eq!((ok("#FF").value, ok("#FF").wide), (0x00FF, false));
    assert_eq!((ok("D'255'").value, ok("D'255'").wide), (0x00FF, false));
    assert_eq!((ok("D'256'").value, ok("D'256'").wide), (0x0100, true));
    assert_eq!(ok("B'1010'").value, 0x000A);
    assert_eq!(ok("X'FF'").value, ok("#FF").value);
    assert_eq!((ok("T'A'").value, ok("T'A'").wide), (0x0041, false));
    // a multi-character string yields its first character
    assert_eq!(ok("T'AB'").value, 0x0041);
}

#[test]
fn location_counter() {
    let v = run("*", Pass::Two, 0x0273).unwrap();
    assert_eq!((v.value, v.wide), (0x0273, true));
    let v = run("*+2", Pass::Two, 0x0273).unwrap();
    assert_eq!((v.value, v.wide), (0x0275, true));
}

#[test]
fn symbols() {
    let v = ok("START");
    assert_eq!((v.value, v.wide), (0x1234, false));
    // unbound identifiers that read as hex are hex constants
    assert_eq!(ok("FF").value, 0x00FF);
    assert_eq!(ok("ABC").value, 0x0ABC);
    // an unbound name that is not hex: tolerated on Pass 1, fatal on Pass 2
    let v = run("TARGET", Pass::One, 0).unwrap();
    assert_eq!((v.value, v.resolved), (0, false));
    assert_eq!(run("TARGET", Pass::Two, 0), Err(Error::UndefSymbol));
    // a defined-but-unresolved symbol behaves the same way
    assert_eq!(run("PENDING", Pass::Two, 0), Err(Error::UndefSymbol));
    assert!(!run("PENDING", Pass::One, 0).unwrap().resolved);
}

#[test]
fn offsets() {
    let v = ok("START+1");
    assert_eq!((v.value, v.wide), (0x1235, true));
    assert_eq!(ok("START-#10").value, 0x1224);
    // the offset forces the two-byte hint even for small values
    assert!(ok("LOW+1").wide);
    // only a constant may follow the sign
    assert_eq!(run("START+LOW", Pass::Two, 0), Err(Error::MissingConst));
    assert_eq!(run("START+", Pass::Two, 0), Err(Error::MissingConst));
    assert_eq!(run("START+#GG", Pass::Two, 0), Err(Error::InvHexConst));
}

#[test]
fn address_of() {
    let v = ok("A(START)");
    assert_eq!((v.value, v.wide, v.addr_of), (0x1234, true, true));
    let v = ok("A.0(START)");
    assert_eq!((v.value, v.wide, v.addr_of), (0x0034, false, false));
    let v = ok("A.1(START)");
    assert_eq!((v.value, v.wide, v.addr_of), (0x0012, false, false));
    // offsets are accepted inside the parentheses
    assert_eq!(ok("A(START+1)").value, 0x1235);

    assert_eq!(run("A.(START)", Pass::Two, 0), Err(Error::InvPeriod));
    assert_eq!(run("A.2(START)", Pass::Two, 0), Err(Error::InvPeriod));
    assert_eq!(run("A.0 START", Pass::Two, 0), Err(Error::MissingParen));
    assert_eq!(run("A(START", Pass::Two, 0), Err(Error::MissingParen));

    // without a parenthesis or period, A is an ordinary identifier (hex A)
    assert_eq!(ok("A").value, 0x000A);
    assert_eq!(ok("A+1").value, 0x000B);
}

#[test]
fn missing_expression() {
    assert_eq!(run("", Pass::Two, 0), Err(Error::MissingExpr));
    assert_eq!(run("   ", Pass::Two, 0), Err(Error::MissingExpr));
}

use once_cell::sync::Lazy;
use std::collections::HashMap;

// ----------------------------------------------------------------------------
// Operand kind

/// What kind of operand an instruction takes.
/// Bytes passed through a trailing datalist are not part of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperType {
    #[default]
    NONE, // no operand
    REG,   // register (0 to F)
    REG1,  // register (1 to F)
    IODEV, // io device (0 to 7)
    EXPR,  // expression
    SADDR, // short address, same page only
    LADDR, // long address
}

// ----------------------------------------------------------------------------
// Instruction descriptor

/// One CDP1802 instruction: opcode template (variable bits are 0),
/// operand kind, and the number of bytes generated.
#[derive(Debug, Clone, Copy)]
pub struct Instr {
    pub opcode: u8,
    pub oper: OperType,
    pub size: u16,
}

impl Instr {
    const fn new(opcode: u8, oper: OperType, size: u16) -> Self {
        Instr { opcode, oper, size }
    }
}

/// Lookup a mnemonic (uppercase). None if not an instruction.
pub fn lookup(name: &str) -> Option<&'static Instr> {
    TABLE.get(name)
}

static TABLE: Lazy<HashMap<&'static str, Instr>> = Lazy::new(|| {
    use OperType::*;
    let mut it = HashMap::new();

    // register instructions
    it.insert("INC", Instr::new(0x10, REG, 1));
    it.insert("DEC", Instr::new(0x20, REG, 1));
    it.insert("GLO", Instr::new(0x80, REG, 1));
    it.insert("GHI", Instr::new(0x90, REG, 1));
    it.insert("PLO", Instr::new(0xA0, REG, 1));
    it.insert("PHI", Instr::new(0xB0, REG, 1));
    it.insert("IRX", Instr::new(0x60, NONE, 1));

    // memory instructions
    it.insert("LDN", Instr::new(0x00, REG1, 1));
    it.insert("LDA", Instr::new(0x40, REG, 1));
    it.insert("LDX", Instr::new(0xF0, NONE, 1));
    it.insert("LDXA", Instr::new(0x72, NONE, 1));
    it.insert("LDI", Instr::new(0xF8, EXPR, 2));
    it.insert("STR", Instr::new(0x50, REG, 1));
    it.insert("STXD", Instr::new(0x73, NONE, 1));

    // logic instructions
    it.insert("OR", Instr::new(0xF1, NONE, 1));
    it.insert("ORI", Instr::new(0xF9, EXPR, 2));
    it.insert("XOR", Instr::new(0xF3, NONE, 1));
    it.insert("XRI", Instr::new(0xFB, EXPR, 2));
    it.insert("AND", Instr::new(0xF2, NONE, 1));
    it.insert("ANI", Instr::new(0xFA, EXPR, 2));
    it.insert("SHR", Instr::new(0xF6, NONE, 1));
    it.insert("SHRC", Instr::new(0x76, NONE, 1));
    it.insert("RSHR", Instr::new(0x76, NONE, 1));
    it.insert("SHL", Instr::new(0xFC, NONE, 1));
    it.insert("SHLC", Instr::new(0x7E, NONE, 1));
    it.insert("RSHL", Instr::new(0x7E, NONE, 1));

    // arithmetic instructions
    it.insert("ADD", Instr::new(0xF4, NONE, 1));
    it.insert("ADI", Instr::new(0xFC, EXPR, 2));
    it.insert("ADC", Instr::new(0x74, NONE, 1));
    it.insert("ADCI", Instr::new(0x7C, EXPR, 2));
    it.insert("SD", Instr::new(0xF5, NONE, 1));
    it.insert("SDI", Instr::new(0xFD, EXPR, 2));
    it.insert("SDB", Instr::new(0x75, NONE, 1));
    it.insert("SDBI", Instr::new(0x7D, EXPR, 2));
    it.insert("SM", Instr::new(0xF7, NONE, 1));
    it.insert("SMI", Instr::new(0xFF, EXPR, 2));
    it.insert("SMB", Instr::new(0x77, NONE, 1));
    it.insert("SMBI", Instr::new(0x7F, EXPR, 2));

    // short branch
    it.insert("BR", Instr::new(0x30, SADDR, 2));
    it.insert("NBR", Instr::new(0x38, NONE, 1));
    it.insert("BZ", Instr::new(0x32, SADDR, 2));
    it.insert("BNZ", Instr::new(0x3A, SADDR, 2));
    it.insert("BDF", Instr::new(0x33, SADDR, 2));
    it.insert("BPZ", Instr::new(0x33, SADDR, 2));
    it.insert("BGE", Instr::new(0x33, SADDR, 2));
    it.insert("BNF", Instr::new(0x3B, SADDR, 2));
    it.insert("BM", Instr::new(0x3B, SADDR, 2));
    it.insert("BL", Instr::new(0x3B, SADDR, 2));
    it.insert("BQ", Instr::new(0x31, SADDR, 2));
    it.insert("BNQ", Instr::new(0x39, SADDR, 2));
    it.insert("B1", Instr::new(0x34, SADDR, 2));
    it.insert("BN1", Instr::new(0x3C, SADDR, 2));
    it.insert("B2", Instr::new(0x35, SADDR, 2));
    it.insert("BN2", Instr::new(0x3D, SADDR, 2));
    it.insert("B3", Instr::new(0x36, SADDR, 2));
    it.insert("BN3", Instr::new(0x3E, SADDR, 2));
    it.insert("B4", Instr::new(0x37, SADDR, 2));
    it.insert("BN4", Instr::new(0x3F, SADDR, 2));

    // long branch
    it.insert("LBR", Instr::new(0xC0, LADDR, 3));
    it.insert("NLBR", Instr::new(0xC8, LADDR, 3));
    it.insert("LBZ", Instr::new(0xC2, LADDR, 3));
    it.insert("LBNZ", Instr::new(0xCA, LADDR, 3));
    it.insert("LBDF", Instr::new(0xC3, LADDR, 3));
    it.insert("LBNF", Instr::new(0xCB, LADDR, 3));
    it.insert("LBQ", Instr::new(0xC1, LADDR, 3));
    it.insert("LBNQ", Instr::new(0xC9, LADDR, 3));

    // skip
    it.insert("SKP", Instr::new(0x38, NONE, 1));
    it.insert("LSKP", Instr::new(0xC8, NONE, 1));
    it.insert("LSZ", Instr::new(0xCE, LADDR, 3));
    it.insert("LSNZ", Instr::new(0xC6, LADDR, 3));
    it.insert("LSDF", Instr::new(0xCF, LADDR, 3));
    it.insert("LSNF", Instr::new(0xC7, LADDR, 3));
    it.insert("LSQ", Instr::new(0xCD, LADDR, 3));
    it.insert("LSNQ", Instr::new(0xC5, LADDR, 3));
    it.insert("LSIE", Instr::new(0xCC, LADDR, 3));

    // control
    it.insert("IDL", Instr::new(0x00, NONE, 1));
    it.insert("NOP", Instr::new(0xC4, NONE, 1));
    it.insert("SEP", Instr::new(0xD0, REG, 1));
    it.insert("SEX", Instr::new(0xE0, REG, 1));
    it.insert("SEQ", Instr::new(0x7B, NONE, 1));
    it.insert("REQ", Instr::new(0x7A, NONE, 1));
    it.insert("SAV", Instr::new(0x78, NONE, 1));
    it.insert("MARK", Instr::new(0x79, NONE, 1));
    it.insert("RET", Instr::new(0x70, NONE, 1));
    it.insert("DIS", Instr::new(0x71, NONE, 1));
    it.insert("OUT", Instr::new(0x60, IODEV, 1));
    it.insert("INP", Instr::new(0x68, IODEV, 1));

    it
});

#[test]
fn test() {
    let ldi = lookup("LDI").unwrap();
    assert_eq!(ldi.opcode, 0xF8);
    assert_eq!(ldi.oper, OperType::EXPR);
    assert_eq!(ldi.size, 2);

    let br = lookup("BR").unwrap();
    assert_eq!((br.opcode, br.size), (0x30, 2));
    assert_eq!(lookup("LBR").unwrap().size, 3);

    // aliases share encodings
    assert_eq!(lookup("BPZ").unwrap().opcode, lookup("BDF").unwrap().opcode);
    assert_eq!(lookup("SKP").unwrap().opcode, lookup("NBR").unwrap().opcode);

    assert!(lookup("MOV").is_none());
    assert!(lookup("ldi").is_none()); // table is keyed by uppercase
}

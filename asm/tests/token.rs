use asm1802::{Error, Token, TokenKind};

fn case(code: &str, kind: TokenKind, text: &str) {
    let mut pos = 0;
    let tok = Token::scan(code, &mut pos);
    println!("{:?} <- {:?}", tok, code);
    assert_eq!(tok.kind, kind);
    assert_eq!(tok.text, text);
}

#[test]
fn hex_constants() {
    case("#FF", TokenKind::HConst, "FF");
    case("#0", TokenKind::HConst, "0");
    case("#1234", TokenKind::HConst, "1234");
    case("X'FF'", TokenKind::HConst, "FF");
    case("x'ff'", TokenKind::HConst, "FF");
    // '#' constants are not case-normalized before the check
    case("#ff", TokenKind::Error(Error::InvHexConst), "ff");
    case("#12345", TokenKind::Error(Error::InvHexConst), "12345");
    case("#", TokenKind::Error(Error::InvHexConst), "");
    case("X'GG'", TokenKind::Error(Error::InvHexConst), "GG");
}

#[test]
fn binary_constants() {
    case("B'1010'", TokenKind::BConst, "1010");
    case("B'0'", TokenKind::BConst, "0");
    case("B'11111111'", TokenKind::BConst, "11111111");
    case("B'111111111'", TokenKind::Error(Error::InvBinConst), "111111111");
    case("B'102'", TokenKind::Error(Error::InvBinConst), "102");
    case("b'1'", TokenKind::BConst, "1");
}

#[test]
fn decimal_constants() {
    case("0", TokenKind::DConst, "0");
    case("255", TokenKind::DConst, "255");
    case("65535", TokenKind::DConst, "65535");
    case("65536", TokenKind::Error(Error::InvDecConst), "65536");
    case("123456", TokenKind::Error(Error::InvDecConst), "123456");
    case("D'255'", TokenKind::DConst, "255");
    case("d'42'", TokenKind::DConst, "42");
    // digit-leading spans must be all digits
    case("5C", TokenKind::Error(Error::InvDecConst), "5C");
}

#[test]
fn strings() {
    case("T'AB'", TokenKind::Str, "AB");
    case("t'ab'", TokenKind::Str, "AB");
    case("T'A''B'", TokenKind::Str, "A'B");
    case("T'A;B'", TokenKind::Str, "A;B");
    case("T''", TokenKind::Error(Error::MissingQuote), "T'");
    case("T'AB", TokenKind::Error(Error::MissingQuote), "T'AB");
}

#[test]
fn text_and_errors() {
    case("HELLO", TokenKind::Text, "HELLO");
    case("hello", TokenKind::Text, "HELLO");
    case("R5", TokenKind::Text, "R5");
    case("A1B2", TokenKind::Text, "A1B2");
    case("Q'X'", TokenKind::Error(Error::InvSyntax), "Q'X");
    case("AB#C", TokenKind::Error(Error::InvSyntax), "AB#C");
    case("", TokenKind::Empty, "");
    case("   ", TokenKind::Empty, "");
}

#[test]
fn cursor_stops_at_delimiters() {
    let mut pos = 0;
    let tok = Token::scan("LDI #05", &mut pos);
    assert_eq!(tok.kind, TokenKind::Text);
    assert_eq!(tok.text, "LDI");
    assert_eq!(pos, 3); // the space is left unconsumed

    let mut pos = 0;
    let tok = Token::scan("FOO+1", &mut pos);
    assert_eq!(tok.text, "FOO");
    assert_eq!(pos, 3);
    pos += 1; // past the '+'
    let tok = Token::scan("FOO+1", &mut pos);
    assert_eq!(tok.kind, TokenKind::DConst);
    assert_eq!(tok.text, "1");
}

#[test]
fn values() {
    let mut pos = 0;
    assert_eq!(Token::scan("B'1010'", &mut pos).value(), 0x0A);
    pos = 0;
    assert_eq!(Token::scan("#FF", &mut pos).value(), 0xFF);
    pos = 0;
    assert_eq!(Token::scan("X'FF'", &mut pos).value(), 0xFF);
    pos = 0;
    assert_eq!(Token::scan("D'256'", &mut pos).value(), 0x0100);
}

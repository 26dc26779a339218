use thiserror::Error;

/// Statement-local assembly errors. Every statement carries at most one of
/// these; none of them aborts the run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid mnemonic or missing comma")]
    InvMnemonic,

    #[error("Previously defined symbol")]
    DupSymbol,

    #[error("Invalid binary constant")]
    InvBinConst,

    #[error("Invalid decimal constant")]
    InvDecConst,

    #[error("Invalid hex constant")]
    InvHexConst,

    #[error("A constant was expected")]
    MissingConst,

    #[error("An expression was expected")]
    MissingExpr,

    #[error("Undefined symbol")]
    UndefSymbol,

    #[error("Missing end quote in string")]
    MissingQuote,

    #[error("Missing closing parenthesis")]
    MissingParen,

    #[error("Invalid '.'")]
    InvPeriod,

    #[error("Invalid character at start of statement")]
    BadStart,

    #[error("Branch out of page")]
    InvBranch,

    #[error("Invalid register number")]
    InvRegister,

    #[error("Invalid device number")]
    InvDevice,

    #[error("Syntax error")]
    InvSyntax,
}

pub mod op;

pub use op::{lookup, Instr, OperType};

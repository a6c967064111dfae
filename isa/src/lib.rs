pub mod dialect;
pub mod opcode;
pub mod operand;

pub use dialect::Dialect;
pub use opcode::{Flow, InstructionSpec, Opcode};
pub use operand::{DataType, Frame, OperandKind};

/// Value of the `language` attribute on the output root element.
pub const LANGUAGE: &str = "IPPcode23";

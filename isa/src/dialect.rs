use serde::Deserialize;

use crate::{opcode::Opcode, operand::DataType};

/// Which instruction set the source is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Base IPPcode23 only.
    Legacy,
    /// IPPcode23 plus the stack and float extensions of IFJcode22.
    #[default]
    Extended,
}

impl Dialect {
    pub fn allows(&self, op: Opcode) -> bool {
        match self {
            Dialect::Legacy => !op.is_extension(),
            Dialect::Extended => true,
        }
    }

    /// Case-sensitive type name lookup limited to this dialect.
    pub fn data_type(&self, name: &str) -> Option<DataType> {
        DataType::parse(name).filter(|ty| match self {
            Dialect::Legacy => !ty.is_extension(),
            Dialect::Extended => true,
        })
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Dialect::Legacy => &[".IPPcode23"],
            Dialect::Extended => &[".IPPcode23", ".IFJcode22"],
        }
    }

    pub fn is_header(&self, line: &str) -> bool {
        self.headers().contains(&line)
    }
}

#[test]
fn test() {
    assert!(Dialect::Extended.allows(Opcode::ADDS));
    assert!(!Dialect::Legacy.allows(Opcode::ADDS));
    assert!(!Dialect::Legacy.allows(Opcode::DIV));
    assert!(Dialect::Legacy.allows(Opcode::IDIV));

    assert_eq!(Dialect::Extended.data_type("float"), Some(DataType::Float));
    assert_eq!(Dialect::Legacy.data_type("float"), None);
    assert_eq!(Dialect::Legacy.data_type("bool"), Some(DataType::Bool));

    assert!(Dialect::Legacy.is_header(".IPPcode23"));
    assert!(!Dialect::Legacy.is_header(".IFJcode22"));
    assert!(Dialect::Extended.is_header(".IFJcode22"));
    assert!(!Dialect::Extended.is_header(".ippcode23"));
    assert!(!Dialect::Extended.is_header(".IPPcode23 x"));
}

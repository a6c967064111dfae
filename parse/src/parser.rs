use isa::{Dialect, Opcode, OperandKind};

use crate::{
    error::Error,
    operand::{self, Argument},
};

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// 1-based position among instruction lines.
    pub order: usize,
    pub opcode: Opcode,
    pub args: Vec<Argument>,
}

impl Instruction {
    /// Parse one normalized line (single spaces, no comment, not the header).
    pub fn parse(code: &str, order: usize, dialect: Dialect) -> Result<Instruction, Error> {
        let words: Vec<&str> = code.split(' ').collect();
        let (op, args) = match words.split_first() {
            Some((op, args)) if !op.is_empty() => (op.to_ascii_uppercase(), args),
            _ => return Err(Error::MissingOpcode),
        };

        let opcode = Opcode::parse(&op).ok_or_else(|| Error::UnknownOpcode(op.clone()))?;
        if !dialect.allows(opcode) {
            return Err(Error::LegacyOpcode(opcode));
        }

        let kinds = opcode.operands();
        if args.len() != kinds.len() {
            return Err(Error::ArgumentCount {
                opcode,
                expected: kinds.len(),
                got: args.len(),
            });
        }

        let args = kinds
            .iter()
            .zip(args)
            .map(|(kind, arg)| parse_arg(*kind, arg, dialect))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Instruction {
            order,
            opcode,
            args,
        })
    }

    /// Name of the label operand, if the instruction has one.
    pub fn label(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            Argument::Label(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

fn parse_arg(kind: OperandKind, arg: &str, dialect: Dialect) -> Result<Argument, Error> {
    match kind {
        OperandKind::Var => {
            operand::variable(arg).ok_or_else(|| Error::InvalidVariable(arg.to_string()))
        }
        OperandKind::Symb => {
            operand::symbol(arg, dialect).ok_or_else(|| Error::InvalidSymbol(arg.to_string()))
        }
        OperandKind::Label => {
            operand::label(arg).ok_or_else(|| Error::InvalidLabel(arg.to_string()))
        }
        OperandKind::Type => {
            operand::type_tag(arg, dialect).ok_or_else(|| Error::InvalidType(arg.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isa::{DataType, Frame};

    const EXT: Dialect = Dialect::Extended;

    #[test]
    fn parses_operands_by_kind() {
        let inst = Instruction::parse("move GF@x string@hi", 3, EXT).unwrap();
        assert_eq!(inst.order, 3);
        assert_eq!(inst.opcode, Opcode::MOVE);
        assert_eq!(
            inst.args,
            vec![
                Argument::Var {
                    frame: Frame::Global,
                    name: "x".into()
                },
                Argument::Const {
                    ty: DataType::String,
                    value: "hi".into()
                },
            ]
        );

        let inst = Instruction::parse("READ LF@n int", 1, EXT).unwrap();
        assert_eq!(inst.args[1], Argument::Type(DataType::Int));

        let inst = Instruction::parse("JUMPIFEQ end GF@a nil@nil", 1, EXT).unwrap();
        assert_eq!(inst.label(), Some("end"));
        assert_eq!(Instruction::parse("BREAK", 1, EXT).unwrap().label(), None);
    }

    #[test]
    fn opcode_errors() {
        assert!(matches!(
            Instruction::parse("", 1, EXT),
            Err(Error::MissingOpcode)
        ));
        assert!(matches!(
            Instruction::parse("FOO GF@a", 1, EXT),
            Err(Error::UnknownOpcode(name)) if name == "FOO"
        ));
        assert!(matches!(
            Instruction::parse("adds", 1, Dialect::Legacy),
            Err(Error::LegacyOpcode(Opcode::ADDS))
        ));
        assert!(Instruction::parse("adds", 1, EXT).is_ok());
    }

    #[test]
    fn arity_mismatch() {
        let err = Instruction::parse("CREATEFRAME GF@a int@1", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "CREATEFRAME expects 0 arguments, got 2");
        let err = Instruction::parse("MOVE GF@a", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "MOVE expects 2 arguments, got 1");
    }

    #[test]
    fn operand_errors() {
        let err = Instruction::parse("DEFVAR int@1", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "Invalid variable int@1");
        let err = Instruction::parse("WRITE int@abc", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "Invalid symbol int@abc");
        let err = Instruction::parse("JUMP 9lives", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "Invalid label 9lives");
        let err = Instruction::parse("READ GF@a text", 1, EXT).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type text");
        assert!(matches!(
            Instruction::parse("PUSHS float@0x1p0", 1, Dialect::Legacy),
            Err(Error::InvalidSymbol(_))
        ));
    }
}

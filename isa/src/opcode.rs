use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::operand::OperandKind;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    Display,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Opcode {
    // Frames and calls
    MOVE = 1,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    CALL,
    RETURN,
    // Data stack
    PUSHS,
    POPS,
    CLEARS,
    // Arithmetic
    ADD,
    SUB,
    MUL,
    DIV,
    IDIV,
    ADDS,
    SUBS,
    MULS,
    DIVS,
    IDIVS,
    // Relational and boolean
    LT,
    GT,
    EQ,
    LTS,
    GTS,
    EQS,
    AND,
    OR,
    NOT,
    ANDS,
    ORS,
    NOTS,
    // Conversions
    INT2FLOAT,
    FLOAT2INT,
    INT2CHAR,
    STRI2INT,
    INT2FLOATS,
    FLOAT2INTS,
    INT2CHARS,
    STRI2INTS,
    // I/O
    READ,
    WRITE,
    // Strings
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,
    // Types
    TYPE,
    // Control flow
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    JUMPIFEQS,
    JUMPIFNEQS,
    EXIT,
    // Debugging
    BREAK,
    DPRINT,
}

/// How an instruction takes part in label/jump bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Defines the label named by its first argument.
    Label,
    /// Jumps to the label named by its first argument.
    Jump,
    /// Jumps without naming a target.
    Return,
    Plain,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSpec {
    pub opcode: Opcode,
    pub name: &'static str,
    pub id: u8,
    pub operands: &'static [OperandKind],
    pub extended: bool,
}

const NONE: &[OperandKind] = &[];
const V: &[OperandKind] = &[OperandKind::Var];
const S: &[OperandKind] = &[OperandKind::Symb];
const L: &[OperandKind] = &[OperandKind::Label];
const VS: &[OperandKind] = &[OperandKind::Var, OperandKind::Symb];
const VT: &[OperandKind] = &[OperandKind::Var, OperandKind::Type];
const VSS: &[OperandKind] = &[OperandKind::Var, OperandKind::Symb, OperandKind::Symb];
const LSS: &[OperandKind] = &[OperandKind::Label, OperandKind::Symb, OperandKind::Symb];

impl Opcode {
    /// Mnemonic lookup, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        s.to_ascii_uppercase().parse::<Self>().ok()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn id(&self) -> u8 {
        (*self).into()
    }

    pub fn operands(&self) -> &'static [OperandKind] {
        use Opcode::*;
        match self {
            MOVE => VS,
            CREATEFRAME => NONE,
            PUSHFRAME => NONE,
            POPFRAME => NONE,
            DEFVAR => V,
            CALL => L,
            RETURN => NONE,
            PUSHS => S,
            POPS => V,
            CLEARS => NONE,
            ADD => VSS,
            SUB => VSS,
            MUL => VSS,
            DIV => VSS,
            IDIV => VSS,
            ADDS => NONE,
            SUBS => NONE,
            MULS => NONE,
            DIVS => NONE,
            IDIVS => NONE,
            LT => VSS,
            GT => VSS,
            EQ => VSS,
            LTS => NONE,
            GTS => NONE,
            EQS => NONE,
            AND => VSS,
            OR => VSS,
            NOT => VS,
            ANDS => NONE,
            ORS => NONE,
            NOTS => NONE,
            INT2FLOAT => VS,
            FLOAT2INT => VS,
            INT2CHAR => VS,
            STRI2INT => VSS,
            INT2FLOATS => NONE,
            FLOAT2INTS => NONE,
            INT2CHARS => NONE,
            STRI2INTS => NONE,
            READ => VT,
            WRITE => S,
            CONCAT => VSS,
            STRLEN => VS,
            GETCHAR => VSS,
            SETCHAR => VSS,
            TYPE => VS,
            LABEL => L,
            JUMP => L,
            JUMPIFEQ => LSS,
            JUMPIFNEQ => LSS,
            JUMPIFEQS => L,
            JUMPIFNEQS => L,
            EXIT => S,
            BREAK => NONE,
            DPRINT => S,
        }
    }

    /// Stack and float instructions, absent from the legacy instruction set.
    pub fn is_extension(&self) -> bool {
        use Opcode::*;
        match self {
            CLEARS | ADDS | SUBS | MULS | DIVS | IDIVS | LTS | GTS | EQS | ANDS | ORS | NOTS
            | INT2CHARS | STRI2INTS | JUMPIFEQS | JUMPIFNEQS => true,
            DIV | INT2FLOAT | FLOAT2INT | INT2FLOATS | FLOAT2INTS => true,
            MOVE | CREATEFRAME | PUSHFRAME | POPFRAME | DEFVAR | CALL | RETURN | PUSHS
            | POPS | ADD | SUB | MUL | IDIV | LT | GT | EQ | AND | OR | NOT | INT2CHAR
            | STRI2INT | READ | WRITE | CONCAT | STRLEN | GETCHAR | SETCHAR | TYPE | LABEL
            | JUMP | JUMPIFEQ | JUMPIFNEQ | EXIT | BREAK | DPRINT => false,
        }
    }

    pub fn flow(&self) -> Flow {
        use Opcode::*;
        match self {
            LABEL => Flow::Label,
            CALL | JUMP | JUMPIFEQ | JUMPIFNEQ | JUMPIFEQS | JUMPIFNEQS => Flow::Jump,
            RETURN => Flow::Return,
            MOVE | CREATEFRAME | PUSHFRAME | POPFRAME | DEFVAR | PUSHS | POPS | CLEARS
            | ADD | SUB | MUL | DIV | IDIV | ADDS | SUBS | MULS | DIVS | IDIVS | LT | GT
            | EQ | LTS | GTS | EQS | AND | OR | NOT | ANDS | ORS | NOTS | INT2FLOAT
            | FLOAT2INT | INT2CHAR | STRI2INT | INT2FLOATS | FLOAT2INTS | INT2CHARS
            | STRI2INTS | READ | WRITE | CONCAT | STRLEN | GETCHAR | SETCHAR | TYPE | EXIT
            | BREAK | DPRINT => Flow::Plain,
        }
    }

    pub fn spec(&self) -> InstructionSpec {
        InstructionSpec {
            opcode: *self,
            name: self.name(),
            id: self.id(),
            operands: self.operands(),
            extended: self.is_extension(),
        }
    }

    /// The whole instruction set in declaration order.
    pub fn catalog() -> impl Iterator<Item = InstructionSpec> {
        Opcode::iter().map(|op| op.spec())
    }
}

impl InstructionSpec {
    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

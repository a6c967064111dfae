use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// ----------------------------------------------------------------------------
// Operand kind

/// Syntactic role an instruction argument has to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperandKind {
    /// `FRAME@name`
    Var,
    /// Variable or constant
    Symb,
    Label,
    /// Bare data type name, only used by `READ`
    Type,
}

// ----------------------------------------------------------------------------
// Data type

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Int,
    Bool,
    String,
    Nil,
    Float,
}

impl DataType {
    /// Case-sensitive lookup: `int` is a type, `Int` is not.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, DataType::Float)
    }
}

// ----------------------------------------------------------------------------
// Frame

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Frame {
    Global,
    Local,
    Temporary,
}

static FRAME_MAP: Lazy<BiMap<&'static str, Frame>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Frame> = BiMap::new();
    map.insert("GF", Frame::Global);
    map.insert("LF", Frame::Local);
    map.insert("TF", Frame::Temporary);
    map
});

impl Frame {
    pub fn parse(s: &str) -> Option<Frame> {
        FRAME_MAP.get_by_left(s).copied()
    }

    pub fn prefix(&self) -> &'static str {
        FRAME_MAP.get_by_right(self).copied().unwrap_or_default()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

use isa::{DataType, Dialect, Frame};

// ----------------------------------------------------------------------------
// Argument

/// A validated instruction argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Var { frame: Frame, name: String },
    Const { ty: DataType, value: String },
    Label(String),
    Type(DataType),
}

impl Argument {
    /// Value of the `type` attribute on the `argN` element.
    pub fn type_attr(&self) -> &'static str {
        match self {
            Argument::Var { .. } => "var",
            Argument::Const { ty, .. } => ty.name(),
            Argument::Label(_) => "label",
            Argument::Type(_) => "type",
        }
    }

    /// Element text: variables keep their frame prefix, constants drop the type.
    pub fn text(&self) -> String {
        match self {
            Argument::Var { frame, name } => format!("{}@{}", frame, name),
            Argument::Const { value, .. } => value.clone(),
            Argument::Label(name) => name.clone(),
            Argument::Type(ty) => ty.name().to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Recognizers

/// `FRAME@identifier`
pub fn variable(s: &str) -> Option<Argument> {
    let (frame, name) = s.split_once('@')?;
    let frame = Frame::parse(frame)?;
    if !is_identifier(name) {
        return None;
    }
    Some(Argument::Var {
        frame,
        name: name.to_string(),
    })
}

/// `type@value` with the value checked against the type.
pub fn constant(s: &str, dialect: Dialect) -> Option<Argument> {
    let (ty, value) = s.split_once('@')?;
    let ty = dialect.data_type(ty)?;
    let ok = match ty {
        DataType::Int => is_int(value),
        DataType::Bool => value == "true" || value == "false",
        DataType::String => is_string(value),
        DataType::Nil => value == "nil",
        DataType::Float => is_hex_float(value),
    };
    if !ok {
        return None;
    }
    Some(Argument::Const {
        ty,
        value: value.to_string(),
    })
}

/// Variable first, constant second.
pub fn symbol(s: &str, dialect: Dialect) -> Option<Argument> {
    variable(s).or_else(|| constant(s, dialect))
}

pub fn label(s: &str) -> Option<Argument> {
    is_identifier(s).then(|| Argument::Label(s.to_string()))
}

pub fn type_tag(s: &str, dialect: Dialect) -> Option<Argument> {
    dialect.data_type(s).map(Argument::Type)
}

// ----------------------------------------------------------------------------
// Lexical helpers

fn is_special(c: char) -> bool {
    matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

/// Letter or special character first, then the same set plus digits.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || is_special(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || is_special(c))
}

/// Optional sign, then at least one decimal digit.
fn is_int(s: &str) -> bool {
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// No whitespace, no `#`, and every backslash starts a `\DDD` escape.
fn is_string(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    for (idx, c) in chars.iter().enumerate() {
        if c.is_whitespace() || *c == '#' {
            return false;
        }
        if *c == '\\' {
            let escape = chars.get(idx + 1..idx + 4);
            match escape {
                Some(digits) if digits.iter().all(|d| d.is_ascii_digit()) => {}
                _ => return false,
            }
        }
    }
    true
}

/// `[+-]0x<hex>[.<hex>]p[+-]<dec>`
fn is_hex_float(s: &str) -> bool {
    let s = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let Some(s) = s.strip_prefix("0x") else {
        return false;
    };
    let Some((mantissa, exponent)) = s.split_once('p') else {
        return false;
    };
    let hex = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_hexdigit());
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => hex(int) && hex(frac),
        None => hex(mantissa),
    };
    mantissa_ok && is_int(exponent)
}

use std::borrow::Cow;
use std::io::{self, Write};

use crate::{operand::Argument, parser::Instruction};

/// Parsed program, in the order instructions appeared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// XML document, compact or indented by two spaces.
    pub fn to_xml(&self, pretty: bool) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_xml(&mut out, pretty);
        String::from_utf8_lossy(&out).into_owned()
    }

    pub fn write_xml<W: Write>(&self, out: &mut W, pretty: bool) -> io::Result<()> {
        let (nl, indent) = if pretty { ("\n", "  ") } else { ("", "") };

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        let root = format!(r#"program language="{}""#, escape(isa::LANGUAGE, true));
        if self.instructions.is_empty() {
            writeln!(out, "<{}/>", root)?;
            return Ok(());
        }

        write!(out, "<{}>{}", root, nl)?;
        for inst in &self.instructions {
            let head = format!(
                r#"instruction order="{}" opcode="{}""#,
                inst.order,
                inst.opcode.name()
            );
            if inst.args.is_empty() {
                write!(out, "{}<{}/>{}", indent, head, nl)?;
                continue;
            }
            write!(out, "{}<{}>{}", indent, head, nl)?;
            for (idx, arg) in inst.args.iter().enumerate() {
                write!(out, "{}{}", indent.repeat(2), arg_element(idx + 1, arg))?;
                write!(out, "{}", nl)?;
            }
            write!(out, "{}</instruction>{}", indent, nl)?;
        }
        writeln!(out, "</program>")?;
        Ok(())
    }
}

fn arg_element(no: usize, arg: &Argument) -> String {
    let text = arg.text();
    let ty = escape(arg.type_attr(), true);
    if text.is_empty() {
        format!(r#"<arg{} type="{}"/>"#, no, ty)
    } else {
        format!(r#"<arg{} type="{}">{}</arg{}>"#, no, ty, escape(&text, false), no)
    }
}

/// Escape markup characters; quotes only matter inside attributes.
pub fn escape(s: &str, attr: bool) -> Cow<'_, str> {
    let special = |c: char| matches!(c, '&' | '<' | '>') || (attr && c == '"');
    if !s.contains(special) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

use std::io::BufRead;

use isa::{Dialect, Flow};
use log::{debug, info};

use crate::{
    error::{Error, Fatal},
    normalize::Line,
    parser::Instruction,
    stats::Stats,
    xml::Program,
};

/// Header named in diagnostics, whichever dialect is active.
const HEADER: &str = ".IPPcode23";

/// Single-pass analysis state, fed one raw line at a time.
#[derive(Debug)]
pub struct Analyzer {
    dialect: Dialect,
    header: bool,
    program: Program,
    stats: Stats,
}

impl Analyzer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            header: false,
            program: Program::new(),
            stats: Stats::new(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn feed(&mut self, raw: &str) -> Result<(), Fatal> {
        let line = Line::new(self.stats.lines, raw);
        self.stats.lines += 1;
        if line.has_comment() {
            self.stats.comment_lines += 1;
        }

        let Some(code) = line.normalized() else {
            return Ok(());
        };

        if !self.header {
            if !self.dialect.is_header(&code) {
                return Err(Error::MissingHeader(HEADER).at(line.no()));
            }
            debug!("line {}: header {}", line.no(), code);
            self.header = true;
            return Ok(());
        }

        let order = self.stats.instruction_lines + 1;
        let inst = Instruction::parse(&code, order, self.dialect).map_err(|e| e.at(line.no()))?;
        self.stats.instruction_lines = order;
        self.stats.count(inst.opcode);

        let labels = &mut self.stats.labels;
        match (inst.opcode.flow(), inst.label()) {
            (Flow::Label, Some(name)) => labels.define(name),
            (Flow::Jump, Some(name)) => labels.jump(name),
            (Flow::Return, _) => labels.ret(),
            _ => {}
        }

        debug!("line {}: #{} {}", line.no(), order, code);
        self.program.push(inst);
        Ok(())
    }

    pub fn finish(self) -> Result<(Program, Stats), Fatal> {
        if !self.header {
            let error = Error::EmptyProgram(HEADER);
            return Err(match self.stats.lines {
                0 => error.into(),
                last => error.at(last),
            });
        }

        let labels = &self.stats.labels;
        info!(
            "{} lines, {} instructions, {} comments, {} labels, {} jumps ({} returns, {} bad)",
            self.stats.lines,
            self.stats.instruction_lines,
            self.stats.comment_lines,
            labels.count(),
            labels.total(),
            labels.returns(),
            labels.bad()
        );
        let undefined = labels.undefined();
        if !undefined.is_empty() {
            debug!(
                "undefined labels: {}",
                undefined.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        Ok((self.program, self.stats))
    }
}

/// Run the whole input through a fresh [`Analyzer`].
///
/// Lines are decoded lossily, so stray bytes only matter where they break a token.
pub fn analyze<R: BufRead>(mut reader: R, dialect: Dialect) -> Result<(Program, Stats), Fatal> {
    let mut analyzer = Analyzer::new(dialect);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(Error::InputRead)? == 0 {
            break;
        }
        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        analyzer.feed(&String::from_utf8_lossy(bytes))?;
    }
    analyzer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn feed_incrementally() {
        let mut analyzer = Analyzer::new(Dialect::Extended);
        analyzer.feed("# leading comment").unwrap();
        analyzer.feed("").unwrap();
        analyzer.feed(".IPPcode23").unwrap();
        analyzer.feed("JUMP end").unwrap();
        assert_eq!(analyzer.stats().labels.bad(), 1);
        analyzer.feed("LABEL end # done").unwrap();
        assert_eq!(analyzer.stats().labels.bad(), 0);
        assert_eq!(analyzer.program().len(), 2);

        let (program, stats) = analyzer.finish().unwrap();
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.comment_lines, 2);
        assert_eq!(stats.labels.forward(), 1);
        assert_eq!(program.instructions[1].order, 2);
    }

    #[test]
    fn error_lines() {
        let mut analyzer = Analyzer::new(Dialect::Extended);
        let err = analyzer.feed("WRITE int@1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoHeader);
        assert_eq!(err.line, Some(1));

        let mut analyzer = Analyzer::new(Dialect::Extended);
        analyzer.feed(".IPPcode23").unwrap();
        analyzer.feed("").unwrap();
        let err = analyzer.feed("POPS int@1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Analysis);
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn no_header() {
        let err = Analyzer::new(Dialect::Extended).finish().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoHeader);
        assert_eq!(err.line, None);

        let mut analyzer = Analyzer::new(Dialect::Extended);
        analyzer.feed("# a").unwrap();
        analyzer.feed("   ").unwrap();
        let err = analyzer.finish().unwrap_err();
        assert_eq!(err.line, Some(2));
        assert_eq!(err.to_string(), "Missing .IPPcode23 header (empty file)");
    }

    #[test]
    fn header_only_once() {
        let src = ".IPPcode23\n.IPPcode23\n";
        let err = analyze(src.as_bytes(), Dialect::Extended).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Opcode);
        assert_eq!(err.line, Some(2));
    }
}

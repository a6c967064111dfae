use color_print::cformat;
use isa::Opcode;
use num_enum::IntoPrimitive;
use strum::Display;
use thiserror::Error;

/// Error class, doubling as the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, Display)]
#[repr(u8)]
pub enum ErrorKind {
    #[strum(serialize = "EPARAM")]
    Param = 10,
    #[strum(serialize = "ENOENT")]
    NoEntry = 11,
    #[strum(serialize = "EWRITE")]
    Write = 12,
    #[strum(serialize = "ENOHEAD")]
    NoHeader = 21,
    #[strum(serialize = "EOPCODE")]
    Opcode = 22,
    #[strum(serialize = "EANLYS")]
    Analysis = 23,
    #[strum(serialize = "EINT")]
    Internal = 99,
}

impl ErrorKind {
    pub fn code(&self) -> i32 {
        u8::from(*self) as i32
    }
}

#[derive(Error, Debug)]
pub enum Error {
    // Parameter errors
    #[error("{0}")]
    Cli(#[from] clap::Error),

    #[error("--stats requires a file name")]
    MissingStatsFile,

    #[error("--stats can't be used multiple times")]
    DuplicateStats,

    #[error("--stats must be present before --{0}")]
    StatsNotFirst(String),

    #[error("Malformed config file {0}: {1}")]
    ConfigFormat(String, #[source] serde_yaml::Error),

    #[error("Can't open file {0}")]
    FileOpen(String, #[source] std::io::Error),

    // Header errors
    #[error("Missing {0} header")]
    MissingHeader(&'static str),

    #[error("Missing {0} header (empty file)")]
    EmptyProgram(&'static str),

    // Opcode errors
    #[error("Missing operation code")]
    MissingOpcode,

    #[error("Unknown instruction {0}")]
    UnknownOpcode(String),

    #[error("Instruction {0} not allowed in legacy mode")]
    LegacyOpcode(Opcode),

    // Analysis errors
    #[error("{opcode} expects {expected} arguments, got {got}")]
    ArgumentCount {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },

    #[error("Invalid variable {0}")]
    InvalidVariable(String),

    #[error("Invalid symbol {0}")]
    InvalidSymbol(String),

    #[error("Invalid label {0}")]
    InvalidLabel(String),

    #[error("Invalid type {0}")]
    InvalidType(String),

    // Output errors
    #[error("Can't write file {0}")]
    StatsWrite(String, #[source] std::io::Error),

    #[error("Failed to read input")]
    InputRead(#[source] std::io::Error),

    #[error("Failed to write output")]
    OutputWrite(#[source] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Cli(_)
            | Error::MissingStatsFile
            | Error::DuplicateStats
            | Error::StatsNotFirst(_)
            | Error::ConfigFormat(..) => ErrorKind::Param,
            Error::FileOpen(..) => ErrorKind::NoEntry,
            Error::MissingHeader(_) | Error::EmptyProgram(_) => ErrorKind::NoHeader,
            Error::MissingOpcode | Error::UnknownOpcode(_) | Error::LegacyOpcode(_) => {
                ErrorKind::Opcode
            }
            Error::ArgumentCount { .. }
            | Error::InvalidVariable(_)
            | Error::InvalidSymbol(_)
            | Error::InvalidLabel(_)
            | Error::InvalidType(_) => ErrorKind::Analysis,
            Error::StatsWrite(..) => ErrorKind::Write,
            Error::InputRead(_) | Error::OutputWrite(_) => ErrorKind::Internal,
        }
    }

    pub fn at(self, line: usize) -> Fatal {
        Fatal {
            error: self,
            line: Some(line),
        }
    }
}

/// An error that ends the run, with the 1-based source line it belongs to.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Fatal {
    #[source]
    pub error: Error,
    pub line: Option<usize>,
}

impl From<Error> for Fatal {
    fn from(error: Error) -> Self {
        Fatal { error, line: None }
    }
}

impl Fatal {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().code()
    }

    /// Three-line stderr report: error class, line (when known), message.
    pub fn render(&self, fancy: bool) -> String {
        let (err, code, line) = if fancy {
            (
                cformat!("<red,bold>ERR!</>"),
                cformat!("<magenta>code</>"),
                cformat!("<magenta>line</>"),
            )
        } else {
            ("ERR!".to_string(), "code".to_string(), "line".to_string())
        };

        let mut out = format!("{} {} {}\n", err, code, self.kind());
        if let Some(no) = self.line {
            out.push_str(&format!("{} {} {}\n", err, line, no));
        }
        // clap messages already carry their own trailing newline and usage block
        let msg = self.error.to_string();
        out.push_str(&format!("{} {}", err, msg.trim_end()));
        out
    }

    pub fn print_diag(&self, fancy: bool) {
        eprintln!("{}", self.render(fancy));
    }
}

pub mod analyzer;
pub mod driver;
pub mod error;
pub mod label;
pub mod normalize;
pub mod operand;
pub mod options;
pub mod parser;
pub mod stats;
pub mod xml;

pub use analyzer::{analyze, Analyzer};
pub use driver::{open_input, run};
pub use error::{Error, ErrorKind, Fatal};
pub use label::Labels;
pub use operand::Argument;
pub use options::{Options, Settings};
pub use parser::Instruction;
pub use stats::{report, StatKey, Stats};
pub use xml::Program;

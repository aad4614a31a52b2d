pub mod analyzer;
pub mod config;
pub mod diag;
pub mod display;
mod error;
pub mod grammer;
pub mod parser;
pub mod report;

pub use analyzer::{cell_allocation_snapshot, validate, Analyzer};
pub use diag::{Diagnostic, Severity};
pub use error::{Error, LiteralError, ParseError, SyntaxError};
pub use parser::{parse, parse_value};
pub use report::Report;

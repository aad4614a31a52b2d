use crate::grammer::token::Token;
use thiserror::Error;

/// Why a single source line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid INIT syntax")]
    Init,

    #[error("Invalid PARAM syntax: \"{0}\"")]
    Param(String),

    #[error("Invalid variable syntax")]
    Variable,

    #[error("Invalid SET syntax")]
    Set,

    #[error("Invalid MOV syntax")]
    Mov,

    #[error("Invalid SYSCALL syntax")]
    Syscall,

    #[error("Unknown data type: \"{0}\"")]
    UnknownType(String),

    #[error("Invalid cell range: \"{0}\". Expected format: C1..C5")]
    RangeFormat(String),

    #[error("Invalid cell range: \"{0}\". Both sides must start with 'C'")]
    RangePrefix(String),

    #[error("Invalid cell range: \"{0}\". Cell numbers must be valid integers")]
    RangeNumber(String),

    #[error("Invalid cell range: \"{0}\". Start cell must be <= end cell")]
    RangeInverted(String),

    #[error("Invalid cell range: \"{0}\". A range covers at most {1} cells")]
    RangeTooWide(String, u32),

    #[error("Invalid cell: \"{0}\". Must start with 'C'")]
    CellPrefix(String),

    #[error("Invalid cell: \"{0}\". Cell number must be a valid integer")]
    CellNumber(String),
}

/// First rejected line of a document. `line` is 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: SyntaxError,
}

impl ParseError {
    pub fn new(line_idx: usize, kind: SyntaxError) -> Self {
        ParseError {
            line: line_idx + 1,
            kind,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to encode report")]
    Json(#[from] serde_json::Error),
}

/// Why an object or array literal was rejected. The line parser turns this into `Value::Raw`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("Unexpected end of literal")]
    UnexpectedEOF,

    #[error("Unexpected token: {0}")]
    UnexpectedToken(Token),

    #[error("Nested objects are not supported: {0}")]
    NestedObject(Token),

    #[error("Trailing input after literal: {0}")]
    TrailingInput(Token),
}

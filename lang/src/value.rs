use indexmap::IndexMap;
use std::fmt;

/// Right-hand side of a declaration or `SET`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(u64),
    Hex(u64),
    Reference { target: String },
    Object(IndexMap<String, Literal>),
    Array(Vec<Literal>),
    /// Anything that is not one of the literal forms, kept verbatim.
    Str(String),
    /// A literal the parser gave up on (bad object/array, numeric overflow), kept verbatim.
    Raw(String),
}

/// Item of an object or array literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Array(Vec<Literal>),
}

impl Value {
    pub fn reference(&self) -> Option<&str> {
        match self {
            Value::Reference { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }
}

/// Reads a bare literal token as a number: digits, sign, point and exponent only.
pub fn number(s: &str) -> Option<f64> {
    let plausible = s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if plausible {
        s.parse().ok()
    } else {
        None
    }
}

const STRUCTURAL: &[char] = &['{', '}', '[', ']', ',', ':', '"'];

fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.trim() != s || s.contains(STRUCTURAL) || number(s).is_some()
}

fn write_text(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if needs_quotes(s) && !s.contains('"') {
        write!(f, "\"{}\"", s)
    } else {
        write!(f, "{}", s)
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Literal]) -> fmt::Result {
    write!(f, "[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => write_text(f, s),
            Literal::Array(items) => write_items(f, items),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Hex(n) => write!(f, "0x{:X}", n),
            Value::Reference { target } => write!(f, "&{}", target),
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (idx, (key, item)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write_text(f, key)?;
                    write!(f, ": {}", item)?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => write_items(f, items),
            Value::Str(s) | Value::Raw(s) => write!(f, "{}", s),
        }
    }
}

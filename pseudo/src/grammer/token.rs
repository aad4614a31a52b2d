use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, col: usize) -> Self {
        Token { kind, col }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at column {}", self.kind, self.col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Colon,    // ':'
    Comma,    // ','
    LBracket, // '['
    RBracket, // ']'
    LCurly,   // '{'
    RCurly,   // '}'

    Text(String), // "quoted"
    Bare(String), // run up to the next structural character, trimmed

    Error(String),
}

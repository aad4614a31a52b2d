use super::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits one object or array literal into tokens.
pub struct LiteralLexer<'a> {
    iter: Peekable<CharIndices<'a>>,
}

impl<'a> LiteralLexer<'a> {
    pub fn new(literal: &'a str) -> Self {
        Self {
            iter: literal.char_indices().peekable(),
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> LiteralLexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }
    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }
}

fn structural_token(ch: char) -> Option<TokenKind> {
    match ch {
        ':' => Some(TokenKind::Colon),
        ',' => Some(TokenKind::Comma),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        _ => None,
    }
}

fn ends_bare(ch: char) -> bool {
    ch == '"' || structural_token(ch).is_some()
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> LiteralLexer<'a> {
    pub fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some((col, ch)) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch.is_whitespace() {
                self.consume();
                continue;
            }

            // 1. Structural character
            if let Some(kind) = structural_token(ch) {
                self.consume();
                tokens.push(Token::new(kind, col));
                continue;
            }

            // 2. Quoted text
            if ch == '"' {
                tokens.push(Token::new(self.parse_text(), col));
                continue;
            }

            // 3. Bare run
            let mut bare = String::new();
            while let Some((_, ch)) = self.iter.next_if(|(_, c)| !ends_bare(*c)) {
                bare.push(ch);
            }
            tokens.push(Token::new(TokenKind::Bare(bare.trim_end().to_string()), col));
        }
        tokens
    }

    fn parse_text(&mut self) -> TokenKind {
        self.consume(); // consume opening "
        let mut text = String::new();
        while let Some((_, ch)) = self.consume() {
            if ch == '"' {
                return TokenKind::Text(text);
            }
            text.push(ch);
        }
        TokenKind::Error(format!("Unterminated string: \"{}", text))
    }
}

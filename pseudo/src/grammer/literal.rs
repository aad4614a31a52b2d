use super::lexer::LiteralLexer;
use super::token::{Token, TokenKind};
use crate::error::LiteralError;
use indexmap::IndexMap;
use lang::value::{number, Literal};
use std::iter::Peekable;

macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

macro_rules! expect {
    ($parser:expr, $kind:pat) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind))
    };
}

/// Parses a whole `{ ... }` literal.
pub fn object(literal: &str) -> Result<IndexMap<String, Literal>, LiteralError> {
    let mut parser = LiteralParser::new(LiteralLexer::new(literal).parse().into_iter());
    let fields = parser.object()?;
    parser.finish()?;
    Ok(fields)
}

/// Parses a whole `[ ... ]` literal.
pub fn array(literal: &str) -> Result<Vec<Literal>, LiteralError> {
    let mut parser = LiteralParser::new(LiteralLexer::new(literal).parse().into_iter());
    let items = parser.array()?;
    parser.finish()?;
    Ok(items)
}

// object := "{" [ key ":" item { "," key ":" item } [ "," ] ] "}"
// array  := "[" [ item { "," item } [ "," ] ] "]"
// item   := array | bare | text
// key    := bare | text
pub struct LiteralParser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
}

impl<I: Iterator<Item = Token>> LiteralParser<I> {
    pub fn new(tokens: I) -> Self {
        LiteralParser {
            tokens: tokens.peekable(),
        }
    }

    /// Peek and check next token is match with condition
    fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        match self.tokens.peek() {
            Some(token) => cond(token),
            None => false,
        }
    }

    /// Next token must be match with condition
    fn expect_tobe<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Result<Token, LiteralError> {
        match self.tokens.next() {
            Some(token) if cond(&token) => Ok(token),
            Some(token) => Err(LiteralError::UnexpectedToken(token)),
            None => Err(LiteralError::UnexpectedEOF),
        }
    }

    /// No token may follow the literal
    pub fn finish(&mut self) -> Result<(), LiteralError> {
        match self.tokens.next() {
            Some(token) => Err(LiteralError::TrailingInput(token)),
            None => Ok(()),
        }
    }
}

impl<I: Iterator<Item = Token>> LiteralParser<I> {
    pub fn object(&mut self) -> Result<IndexMap<String, Literal>, LiteralError> {
        expect!(self, TokenKind::LCurly)?;
        let mut fields = IndexMap::new();
        while !check!(self, TokenKind::RCurly) {
            let key = self.key()?;
            expect!(self, TokenKind::Colon)?;
            let item = self.item()?;
            fields.insert(key, item);
            if !check!(self, TokenKind::Comma) {
                break;
            }
            expect!(self, TokenKind::Comma)?;
        }
        expect!(self, TokenKind::RCurly)?;
        Ok(fields)
    }

    pub fn array(&mut self) -> Result<Vec<Literal>, LiteralError> {
        expect!(self, TokenKind::LBracket)?;
        let mut items = Vec::new();
        while !check!(self, TokenKind::RBracket) {
            items.push(self.item()?);
            if !check!(self, TokenKind::Comma) {
                break;
            }
            expect!(self, TokenKind::Comma)?;
        }
        expect!(self, TokenKind::RBracket)?;
        Ok(items)
    }

    fn key(&mut self) -> Result<String, LiteralError> {
        let token = expect!(self, TokenKind::Bare(_) | TokenKind::Text(_))?;
        match token.kind {
            TokenKind::Bare(key) | TokenKind::Text(key) => Ok(key),
            _ => Err(LiteralError::UnexpectedToken(token)),
        }
    }

    fn item(&mut self) -> Result<Literal, LiteralError> {
        if check!(self, TokenKind::LBracket) {
            return Ok(Literal::Array(self.array()?));
        }
        let token = self.tokens.next().ok_or(LiteralError::UnexpectedEOF)?;
        match token.kind {
            TokenKind::Bare(bare) => Ok(match number(&bare) {
                Some(n) => Literal::Number(n),
                None => Literal::Text(bare),
            }),
            TokenKind::Text(text) => Ok(Literal::Text(text)),
            TokenKind::LCurly => Err(LiteralError::NestedObject(token)),
            _ => Err(LiteralError::UnexpectedToken(token)),
        }
    }
}

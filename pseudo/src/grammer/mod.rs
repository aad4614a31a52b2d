pub mod lexer;
pub mod literal;
pub mod token;

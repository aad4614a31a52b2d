pub mod ast;
pub mod cell;
pub mod kind;
pub mod value;

//! Front end of the Scroopy language: scanning, syntax tree and parsing.

pub mod ast;
pub mod lexer;
pub mod parser;

use std::rc::Rc;

use thiserror::Error;

use crate::lexer::TokenKind;

/// A parse diagnostic. The `Display` output is the human readable message
/// reported to the user.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {0} found")]
    NoPrefixFunction(TokenKind),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(Rc<str>),
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: TokenKind) -> Self {
        ParseError::UnexpectedToken { expected, got }
    }
}

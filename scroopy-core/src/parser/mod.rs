pub mod error;
pub mod expressions;
pub mod statements;

use tracing::{debug, trace};

use crate::ast::Program;
use crate::lexer::{Token, TokenKind, Tokenizer};
pub use error::ParseError;
use statements::parse_statement;

/// Parses a whole source text, returning the program together with every
/// diagnostic found. Callers should not evaluate a program with diagnostics.
pub fn parse(input: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Tokenizer::new(input));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Precedence climbing parser with one token of lookahead.
///
/// A production that fails is reported and yields nothing, but the productions
/// around it keep consuming their own tokens, so a mistake inside an
/// expression is reported once. A statement that cannot start (a `let`
/// without a name or `=`) is dropped and parsing resumes at the very next
/// token, which may add further diagnostics.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    pub current: Token,
    pub peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let peek = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn next_token(&mut self) {
        let next = self.tokenizer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances only if the lookahead has the expected kind; otherwise the
    /// mismatch is recorded.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.record(ParseError::unexpected_token(kind, self.peek.kind));
            None
        }
    }

    pub(crate) fn skip_terminator(&mut self) {
        if self.peek_is(TokenKind::SemiColon) {
            self.next_token();
        }
    }

    pub(crate) fn record(&mut self, error: ParseError) {
        trace!(%error, position = self.current.start, "parse error");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            if let Some(statement) = parse_statement(self) {
                statements.push(statement);
            }
            self.next_token();
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program { statements }
    }
}

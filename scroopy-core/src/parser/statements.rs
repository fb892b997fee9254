use crate::ast::{BlockStatement, Expression, Identifier, LetStatement, ReturnStatement, Statement};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::Parser;

/// `None` means the statement was reported and dropped.
pub fn parse_statement(parser: &mut Parser) -> Option<Statement> {
    match parser.current.kind {
        TokenKind::Let => parse_let_statement(parser).map(Statement::Let),
        TokenKind::Return => parse_return_statement(parser).map(Statement::Return),
        _ => parse_expression_statement(parser).map(Statement::Expression),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Option<LetStatement> {
    parser.expect_peek(TokenKind::Ident)?;
    let name = parser.current.literal.clone();
    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest);
    parser.skip_terminator();

    Some(LetStatement {
        identifier: Identifier { name },
        value: value?,
    })
}

fn parse_return_statement(parser: &mut Parser) -> Option<ReturnStatement> {
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest);
    parser.skip_terminator();

    Some(ReturnStatement { value: value? })
}

fn parse_expression_statement(parser: &mut Parser) -> Option<Expression> {
    let expression = parse_expression(parser, Precedence::Lowest);
    parser.skip_terminator();

    expression
}

/// Parses statements up to the closing brace, or the end of input if the
/// block is never closed. The current token must be the opening brace.
///
/// A statement that fails to parse is reported and skipped; the rest of the
/// block is still parsed.
pub fn parse_block_statement(parser: &mut Parser) -> BlockStatement {
    let mut statements = Vec::new();
    parser.next_token();

    while !parser.current_is(TokenKind::RBrace) && !parser.current_is(TokenKind::Eof) {
        if let Some(statement) = parse_statement(parser) {
            statements.push(statement);
        }
        parser.next_token();
    }

    BlockStatement { statements }
}

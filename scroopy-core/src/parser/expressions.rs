use std::rc::Rc;

use super::error::ParseError;
use super::statements::parse_block_statement;
use crate::ast::{Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::TokenKind;
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token: TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::Power => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Pratt loop. The current token must be the first token of the expression;
/// afterwards the current token is its last one.
///
/// Failures are recorded on the parser and yield `None`. A `None` operand does
/// not stop the enclosing production: it still consumes its own tokens and
/// then yields `None` as well.
pub fn parse_expression(parser: &mut Parser, precedence: Precedence) -> Option<Expression> {
    let Some(prefix_parse_function) = prefix_parsing_function(parser.current.kind) else {
        parser.record(ParseError::NoPrefixFunction(parser.current.kind));
        return None;
    };
    let mut left_expression = prefix_parse_function(parser);

    while !parser.peek_is(TokenKind::SemiColon) && precedence < precedence_of(parser.peek.kind) {
        let Some(infix) = infix_parsing(parser.peek.kind) else {
            break;
        };
        parser.next_token();
        left_expression = parse_infix(infix, left_expression, parser);
    }

    left_expression
}

pub type PrefixFunction = fn(&mut Parser) -> Option<Expression>;

pub fn prefix_parsing_function(token: TokenKind) -> Option<PrefixFunction> {
    match token {
        TokenKind::Ident => Some(parse_identifier),
        TokenKind::Int => Some(parse_integer_literal),
        TokenKind::String => Some(parse_string_literal),
        TokenKind::True | TokenKind::False => Some(parse_boolean_literal),
        TokenKind::Bang | TokenKind::Minus => Some(parse_prefix_operation),
        TokenKind::LParen => Some(parse_grouped_expression),
        TokenKind::LBracket => Some(parse_array_literal),
        TokenKind::LBrace => Some(parse_hash_literal),
        TokenKind::If => Some(parse_if_expression),
        TokenKind::Function => Some(parse_function_literal),
        _ => None,
    }
}

fn parse_identifier(parser: &mut Parser) -> Option<Expression> {
    Some(Expression::Identifier(Identifier {
        name: parser.current.literal.clone(),
    }))
}

fn parse_integer_literal(parser: &mut Parser) -> Option<Expression> {
    let literal = parser.current.literal.clone();
    match literal.parse() {
        Ok(value) => Some(Expression::IntegerLiteral(value)),
        Err(_) => {
            parser.record(ParseError::InvalidInteger(literal));
            None
        }
    }
}

fn parse_string_literal(parser: &mut Parser) -> Option<Expression> {
    Some(Expression::StringLiteral(parser.current.literal.clone()))
}

fn parse_boolean_literal(parser: &mut Parser) -> Option<Expression> {
    Some(Expression::BooleanLiteral(parser.current_is(TokenKind::True)))
}

fn parse_prefix_operation(parser: &mut Parser) -> Option<Expression> {
    let kind = if parser.current_is(TokenKind::Bang) {
        PrefixOperationKind::Bang
    } else {
        PrefixOperationKind::Minus
    };
    parser.next_token();
    let right = parse_expression(parser, Precedence::Prefix)?;

    Some(Expression::PrefixOperation(kind, Box::new(right)))
}

fn parse_grouped_expression(parser: &mut Parser) -> Option<Expression> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest);
    parser.expect_peek(TokenKind::RParen)?;

    expression
}

/// Comma separated expressions closed by `terminator`. The current token must
/// be the opening delimiter; afterwards the current token is the terminator.
/// A bad element is skipped over and the rest of the list is still parsed.
fn parse_expression_list(parser: &mut Parser, terminator: TokenKind) -> Option<Vec<Expression>> {
    let mut elements: Vec<Option<Expression>> = Vec::new();

    if parser.peek_is(terminator) {
        parser.next_token();
        return Some(Vec::new());
    }

    parser.next_token();
    elements.push(parse_expression(parser, Precedence::Lowest));

    while parser.peek_is(TokenKind::Comma) {
        parser.next_token();
        parser.next_token();
        elements.push(parse_expression(parser, Precedence::Lowest));
    }

    parser.expect_peek(terminator)?;
    elements.into_iter().collect()
}

fn parse_array_literal(parser: &mut Parser) -> Option<Expression> {
    parse_expression_list(parser, TokenKind::RBracket).map(Expression::ArrayLiteral)
}

// A missing `:` or `,` abandons the whole literal.
fn parse_hash_literal(parser: &mut Parser) -> Option<Expression> {
    let mut pairs = Vec::new();
    let mut complete = true;

    while !parser.peek_is(TokenKind::RBrace) {
        parser.next_token();
        let key = parse_expression(parser, Precedence::Lowest);
        parser.expect_peek(TokenKind::Colon)?;

        parser.next_token();
        let value = parse_expression(parser, Precedence::Lowest);
        match key.zip(value) {
            Some(pair) => pairs.push(pair),
            None => complete = false,
        }

        if !parser.peek_is(TokenKind::RBrace) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }
    parser.expect_peek(TokenKind::RBrace)?;

    complete.then_some(Expression::HashLiteral(pairs))
}

fn parse_if_expression(parser: &mut Parser) -> Option<Expression> {
    parser.next_token();
    let condition = parse_expression(parser, Precedence::Lowest);

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser);

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser))
    } else {
        None
    };

    Some(Expression::IfExpression {
        condition: Box::new(condition?),
        consequence,
        alternative,
    })
}

fn parse_function_literal(parser: &mut Parser) -> Option<Expression> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = Rc::new(parse_block_statement(parser));

    Some(Expression::FunctionLiteral { parameters, body })
}

fn parse_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_is(TokenKind::RParen) {
        parser.next_token();
        return Some(parameters);
    }

    parser.next_token();
    parameters.push(parse_parameter(parser)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.next_token();
        parser.next_token();
        parameters.push(parse_parameter(parser)?);
    }

    parser.expect_peek(TokenKind::RParen)?;
    Some(parameters)
}

fn parse_parameter(parser: &mut Parser) -> Option<Identifier> {
    if !parser.current_is(TokenKind::Ident) {
        parser.record(ParseError::unexpected_token(
            TokenKind::Ident,
            parser.current.kind,
        ));
        return None;
    }

    Some(Identifier {
        name: parser.current.literal.clone(),
    })
}

#[derive(Debug, Clone, Copy)]
pub enum Infix {
    Operation(InfixOperationKind),
    Call,
    Index,
}

pub fn infix_parsing(token: TokenKind) -> Option<Infix> {
    use InfixOperationKind as InfixKind;

    let kind = match token {
        TokenKind::LParen => return Some(Infix::Call),
        TokenKind::LBracket => return Some(Infix::Index),
        TokenKind::Plus => InfixKind::Plus,
        TokenKind::Minus => InfixKind::Minus,
        TokenKind::LessThan => InfixKind::LessThan,
        TokenKind::GreaterThan => InfixKind::GreaterThan,
        TokenKind::Equal => InfixKind::Equal,
        TokenKind::NotEqual => InfixKind::NotEqual,
        TokenKind::Asterisk => InfixKind::Multiply,
        TokenKind::Slash => InfixKind::Divide,
        TokenKind::Power => InfixKind::Power,
        _ => return None,
    };
    Some(Infix::Operation(kind))
}

fn parse_infix(infix: Infix, left: Option<Expression>, parser: &mut Parser) -> Option<Expression> {
    match infix {
        Infix::Operation(kind) => parse_infix_operation(kind, left, parser),
        Infix::Call => parse_call_expression(left, parser),
        Infix::Index => parse_index_expression(left, parser),
    }
}

/// The current token is the operator.
fn parse_infix_operation(
    kind: InfixOperationKind,
    left: Option<Expression>,
    parser: &mut Parser,
) -> Option<Expression> {
    let precedence = precedence_of(parser.current.kind);
    parser.next_token();
    let right = parse_expression(parser, precedence);

    Some(Expression::InfixOperation(
        kind,
        Box::new(left?),
        Box::new(right?),
    ))
}

fn parse_call_expression(left: Option<Expression>, parser: &mut Parser) -> Option<Expression> {
    let arguments = parse_expression_list(parser, TokenKind::RParen);

    Some(Expression::CallExpression {
        function: Box::new(left?),
        arguments: arguments?,
    })
}

fn parse_index_expression(left: Option<Expression>, parser: &mut Parser) -> Option<Expression> {
    parser.next_token();
    let index = parse_expression(parser, Precedence::Lowest);
    parser.expect_peek(TokenKind::RBracket)?;

    Some(Expression::IndexExpression {
        left: Box::new(left?),
        index: Box::new(index?),
    })
}

//! Syntax tree produced by the parser.
//!
//! The `Display` implementations render the canonical text of a node: every
//! prefix and infix operation is fully parenthesised so that the shape of the
//! tree can be read back from the string.

use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct LetStatement {
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    StringLiteral(Rc<str>),
    BooleanLiteral(bool),
    ArrayLiteral(Vec<Expression>),
    /// Pairs are kept in source order.
    HashLiteral(Vec<(Expression, Expression)>),
    PrefixOperation(PrefixOperationKind, Box<Expression>),
    InfixOperation(InfixOperationKind, Box<Expression>, Box<Expression>),
    IfExpression {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: Rc<BlockStatement>,
    },
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperationKind {
    Plus,
    Minus,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperationKind {
    Minus,
    Bang,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

fn write_separated<T: Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> std::fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.identifier, self.value)
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident),
            IntegerLiteral(val) => write!(f, "{}", val),
            StringLiteral(val) => write!(f, "{}", val),
            BooleanLiteral(val) => write!(f, "{}", val),
            ArrayLiteral(arr) => {
                write!(f, "[")?;
                write_separated(f, arr)?;
                write!(f, "]")
            }
            HashLiteral(hash) => {
                write!(f, "{{")?;
                write_separated(f, hash.iter().map(|(key, value)| format!("{}:{}", key, value)))?;
                write!(f, "}}")
            }
            PrefixOperation(kind, expr) => write!(f, "({}{})", kind, expr),
            InfixOperation(kind, left, right) => {
                write!(f, "({} {} {})", left, kind, right)
            }
            IfExpression {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral { parameters, body } => {
                write!(f, "fn(")?;
                write_separated(f, parameters)?;
                write!(f, ") {}", body)
            }
            CallExpression {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_separated(f, arguments)?;
                write!(f, ")")
            }
            IndexExpression { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Let(statement) => write!(f, "{}", statement),
            Return(statement) => write!(f, "{}", statement),
            Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl PrefixOperationKind {
    pub fn as_str(&self) -> &'static str {
        use PrefixOperationKind::*;
        match self {
            Minus => "-",
            Bang => "!",
        }
    }
}

impl Display for PrefixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InfixOperationKind {
    pub fn as_str(&self) -> &'static str {
        use InfixOperationKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            LessThan => "<",
            GreaterThan => ">",
            Equal => "==",
            NotEqual => "!=",
            Multiply => "*",
            Divide => "/",
            Power => "**",
        }
    }
}

impl Display for InfixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Identifier {
        Identifier { name: name.into() }
    }

    #[test]
    fn test_let_statement_text() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                identifier: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            })],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_nested_expression_text() {
        let expression = Expression::CallExpression {
            function: Box::new(Expression::FunctionLiteral {
                parameters: vec![ident("x"), ident("y")],
                body: Rc::new(BlockStatement {
                    statements: vec![Statement::Return(ReturnStatement {
                        value: Expression::InfixOperation(
                            InfixOperationKind::Power,
                            Box::new(Expression::Identifier(ident("x"))),
                            Box::new(Expression::Identifier(ident("y"))),
                        ),
                    })],
                }),
            }),
            arguments: vec![
                Expression::PrefixOperation(
                    PrefixOperationKind::Minus,
                    Box::new(Expression::IntegerLiteral(2)),
                ),
                Expression::IndexExpression {
                    left: Box::new(Expression::ArrayLiteral(vec![
                        Expression::IntegerLiteral(1),
                        Expression::StringLiteral("two".into()),
                    ])),
                    index: Box::new(Expression::IntegerLiteral(0)),
                },
            ],
        };

        assert_eq!(
            expression.to_string(),
            "fn(x, y) return (x ** y);((-2), ([1, two][0]))"
        );
    }

    #[test]
    fn test_if_and_hash_text() {
        let expression = Expression::IfExpression {
            condition: Box::new(Expression::BooleanLiteral(true)),
            consequence: BlockStatement {
                statements: vec![Statement::Expression(Expression::HashLiteral(vec![(
                    Expression::StringLiteral("a".into()),
                    Expression::IntegerLiteral(1),
                )]))],
            },
            alternative: Some(BlockStatement::default()),
        };

        assert_eq!(expression.to_string(), "iftrue {a:1}else ");
    }
}

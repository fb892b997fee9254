use std::collections::HashMap;
use std::rc::Rc;

use scroopy_core::ast;
use scroopy_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};
use tracing::{debug, trace};

use crate::builtins::map_builtins;
use crate::environment::Environment;
use crate::object::{EvaluationError, HashKey, Object, Signal};

/// Evaluates a whole program. A top level `return` ends the program with its
/// value; an error ends it with that error. Bindings made before the error
/// stay in `environment`.
pub fn eval_program(
    program: &ast::Program,
    environment: &Environment,
) -> Result<Rc<Object>, EvaluationError> {
    debug!(statements = program.statements.len(), "evaluating program");
    let mut output = Object::null();
    for statement in &program.statements {
        let result = eval_statement(statement, environment);

        match result {
            Err(Signal::Return(value)) => return Ok(value),
            Err(Signal::Error(error)) => {
                debug!(%error, "evaluation failed");
                return Err(error);
            }
            Ok(object) => output = object,
        };
    }
    Ok(output)
}

pub fn eval_statement(
    statement: &ast::Statement,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    let value = eval_expression(&statement.value, environment)?;
    Ok(environment.define(statement.identifier.name.clone(), value))
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    let value = eval_expression(&statement.value, environment)?;
    Err(Signal::Return(value))
}

/// Signals pass through a block untouched; only a call boundary unwraps a
/// `return`.
pub fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

pub fn eval_expression(
    expression: &Expression,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(eval_expressions(array, environment)?)),
        Expression::HashLiteral(literal) => eval_hash_literal(literal, environment),
        Expression::Identifier(identifier) => eval_identifier(identifier, environment),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            Ok(eval_prefix_operation(*kind, right)?)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            Ok(eval_infix_operation(*kind, left, right)?)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            Ok(apply_function(&function, arguments)?)
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            Ok(eval_index_expression(&left, &index)?)
        }
    }
}

fn eval_identifier(
    identifier: &ast::Identifier,
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    environment
        .lookup(&identifier.name)
        .or_else(|| map_builtins(&identifier.name).map(Object::builtin_function))
        .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()).into())
}

// Left to right; the first error wins.
fn eval_expressions(
    expressions: &[Expression],
    environment: &Environment,
) -> Result<Vec<Rc<Object>>, Signal> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

fn eval_hash_literal(
    literal: &[(Expression, Expression)],
    environment: &Environment,
) -> Result<Rc<Object>, Signal> {
    let mut hashmap = HashMap::with_capacity(literal.len());
    for (key, value) in literal {
        let key = eval_expression(key, environment)?;
        let hashed_key = HashKey::try_from(key.as_ref())?;
        let value = eval_expression(value, environment)?;
        hashmap.insert(hashed_key, (key, value));
    }
    Ok(Object::hash(hashmap))
}

/// Calls `function` with already evaluated arguments. A `return` inside the
/// body stops at this boundary.
pub fn apply_function(
    function: &Rc<Object>,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, EvaluationError> {
    match function.as_ref() {
        Object::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(EvaluationError::WrongArgumentCount {
                    expected: function.parameters.len(),
                    actual: arguments.len(),
                });
            }
            trace!(arity = arguments.len(), "calling function");

            let call_environment = Environment::new_enclosed(function.env.clone());
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                call_environment.define(parameter.name.clone(), argument);
            }

            match eval_block_statement(&function.body, &call_environment) {
                Ok(object) => Ok(object),
                Err(Signal::Return(value)) => Ok(value),
                Err(Signal::Error(err)) => Err(err),
            }
        }
        Object::BuiltinFunction(builtin) => {
            trace!(name = builtin.name, arity = arguments.len(), "calling builtin");
            (builtin.func)(arguments)
        }
        other => Err(EvaluationError::NotAFunction(other.type_tag())),
    }
}

fn eval_prefix_operation(
    kind: PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    match (kind, right.as_ref()) {
        (PrefixOperationKind::Bang, object) => Ok(Object::boolean(!object.is_truthy())),
        (PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperationKind::Minus, object) => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: object.type_tag(),
        }),
    }
}

fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    use InfixOperationKind as Op;

    let unknown_operator = || EvaluationError::UnknownInfixOperator {
        left: left.type_tag(),
        operation: kind,
        right: right.type_tag(),
    };

    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (Object::String(left), Object::String(right)) => match kind {
            Op::Plus => Ok(Object::string(format!("{}{}", left, right))),
            Op::Equal => Ok(Object::boolean(left == right)),
            Op::NotEqual => Ok(Object::boolean(left != right)),
            _ => Err(unknown_operator()),
        },
        (Object::Boolean(left), Object::Boolean(right)) => match kind {
            Op::Equal => Ok(Object::boolean(left == right)),
            Op::NotEqual => Ok(Object::boolean(left != right)),
            _ => Err(unknown_operator()),
        },
        // The integer is coerced with a non-zero test.
        (Object::Integer(integer), Object::Boolean(boolean))
        | (Object::Boolean(boolean), Object::Integer(integer))
            if matches!(kind, Op::Equal | Op::NotEqual) =>
        {
            let equal = (*integer != 0) == *boolean;
            Ok(Object::boolean(if kind == Op::Equal { equal } else { !equal }))
        }
        (left, right) if left.type_tag() != right.type_tag() => {
            Err(EvaluationError::TypeMismatch {
                left: left.type_tag(),
                operation: kind,
                right: right.type_tag(),
            })
        }
        _ => Err(unknown_operator()),
    }
}

/// Arithmetic wraps on overflow. `**` goes through `f64` and truncates toward
/// zero, saturating at the `i64` bounds.
fn eval_integer_infix_operation(
    kind: InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, EvaluationError> {
    use InfixOperationKind as Op;

    match kind {
        Op::Plus => Ok(Object::integer(left.wrapping_add(right))),
        Op::Minus => Ok(Object::integer(left.wrapping_sub(right))),
        Op::Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        Op::Divide => {
            if right == 0 {
                return Err(EvaluationError::DivisionByZero(left));
            }
            Ok(Object::integer(left.wrapping_div(right)))
        }
        Op::Power => Ok(Object::integer((left as f64).powf(right as f64) as i64)),
        Op::LessThan => Ok(Object::boolean(left < right)),
        Op::GreaterThan => Ok(Object::boolean(left > right)),
        Op::Equal => Ok(Object::boolean(left == right)),
        Op::NotEqual => Ok(Object::boolean(left != right)),
    }
}

/// Out of range array indices and missing hash keys yield `null`.
fn eval_index_expression(
    left: &Rc<Object>,
    index: &Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| array.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(hash), index) => {
            let hashed_index = HashKey::try_from(index)?;
            Ok(hash
                .get(&hashed_index)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(Object::null))
        }
        (other, _) => Err(EvaluationError::IndexNotSupported(other.type_tag())),
    }
}

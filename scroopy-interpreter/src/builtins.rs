use std::rc::Rc;

use crate::object::{BuiltinFunction, EvaluationError, Object, ObjectType};

fn check_argument_count(expected: usize, args: &[Rc<Object>]) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(EvaluationError::WrongArgumentCount {
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn expect_array<'a>(
    function: &'static str,
    arg: &'a Rc<Object>,
) -> Result<&'a [Rc<Object>], EvaluationError> {
    match arg.as_ref() {
        Object::Array(arr) => Ok(arr),
        other => Err(EvaluationError::UnexpectedArgumentType {
            function,
            expected: ObjectType::Array,
            got: other.type_tag(),
        }),
    }
}

fn builtin_len(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    match args[0].as_ref() {
        Object::String(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        other => Err(EvaluationError::UnsupportedArgument {
            function: "len",
            got: other.type_tag(),
        }),
    }
}

fn builtin_first(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    let arr = expect_array("first", &args[0])?;
    Ok(arr.first().cloned().unwrap_or_else(Object::null))
}

fn builtin_last(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    let arr = expect_array("last", &args[0])?;
    Ok(arr.last().cloned().unwrap_or_else(Object::null))
}

fn builtin_rest(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    let arr = expect_array("rest", &args[0])?;
    if arr.is_empty() {
        return Ok(Object::null());
    }
    Ok(Object::array(arr[1..].to_vec()))
}

// The argument array is left untouched; a new array is returned.
fn builtin_push(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(2, &args)?;
    let arr = expect_array("push", &args[0])?;
    let mut new_arr = arr.to_vec();
    new_arr.push(args[1].clone());
    Ok(Object::array(new_arr))
}

const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "len",
        func: builtin_len,
    },
    BuiltinFunction {
        name: "first",
        func: builtin_first,
    },
    BuiltinFunction {
        name: "last",
        func: builtin_last,
    },
    BuiltinFunction {
        name: "rest",
        func: builtin_rest,
    },
    BuiltinFunction {
        name: "push",
        func: builtin_push,
    },
];

pub(crate) fn map_builtins(name: &str) -> Option<BuiltinFunction> {
    BUILTINS.iter().find(|builtin| builtin.name == name).cloned()
}

use std::rc::Rc;

use scroopy_core::parser::ParseError;
use scroopy_interpreter::object::{EvaluationError, Object};

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object);
}

pub struct InterpreterPrinter {}

impl Printer for InterpreterPrinter {
    type Object = Result<Rc<Object>, EvaluationError>;

    fn print(&mut self, object: Self::Object) {
        println!("{}", format_result(&object));
    }
}

fn format_result(object: &Result<Rc<Object>, EvaluationError>) -> String {
    match object {
        Ok(obj) => obj.to_string(),
        Err(err) => format!("ERROR: {}", err),
    }
}

pub fn print_parse_errors(errors: &[ParseError]) {
    for error in errors {
        println!("\t{}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scroopy_interpreter::object::ObjectType;

    #[test]
    fn test_format_result() {
        assert_eq!(
            format_result(&Ok(Object::array(vec![Object::integer(1), Object::null()]))),
            "[1, null]"
        );
        assert_eq!(
            format_result(&Err(EvaluationError::NotAFunction(ObjectType::Integer))),
            "ERROR: not a function: INTEGER"
        );
    }
}

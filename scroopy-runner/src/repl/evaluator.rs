use std::rc::Rc;

use scroopy_core::ast::Program;
use scroopy_interpreter::environment::Environment;
use scroopy_interpreter::evaluator;
use scroopy_interpreter::object::{EvaluationError, Object};

pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, program: Program) -> Self::Object;
}

/// Keeps one global environment alive across evaluations.
pub struct InterpreterEvaluator {
    environment: Environment,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }
}

impl Evaluator for InterpreterEvaluator {
    type Object = Result<Rc<Object>, EvaluationError>;

    fn evaluate(&mut self, program: Program) -> Self::Object {
        evaluator::eval_program(&program, &self.environment)
    }
}

use std::path::Path;

use scroopy_core::parser;
use tracing::debug;

use crate::error::RunError;
use crate::repl::evaluator::{Evaluator, InterpreterEvaluator};
use crate::repl::printer::{print_parse_errors, InterpreterPrinter, Printer};

/// Runs a script once with a fresh global environment.
pub fn execute(path: &Path) -> Result<(), RunError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunError::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "running script");

    let (program, errors) = parser::parse(&source);
    if !errors.is_empty() {
        print_parse_errors(&errors);
        return Err(RunError::Parse(errors.len()));
    }

    let result = InterpreterEvaluator::new().evaluate(program);
    let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
    InterpreterPrinter {}.print(result);
    Ok(outcome?)
}

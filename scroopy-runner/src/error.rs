use std::path::PathBuf;

use rustyline::error::ReadlineError;
use scroopy_interpreter::object::EvaluationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0} parse error(s)")]
    Parse(usize),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

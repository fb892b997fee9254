use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scroopy_core::ast::Program;
use scroopy_core::parser;

use super::printer::print_parse_errors;
use crate::error::RunError;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(Program),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new(rl: DefaultEditor) -> Self {
        Self { rl }
    }

    /// Reads and parses one line. Lines with diagnostics are reported here and
    /// never reach the evaluator.
    pub fn read(&mut self) -> Result<ReadOutput, RunError> {
        let line = match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => return Ok(ReadOutput::Clear),
            Err(ReadlineError::Eof) => return Ok(ReadOutput::Exit),
            Err(err) => return Err(err.into()),
            Ok(line) => line,
        };
        if line.trim().is_empty() {
            return Ok(ReadOutput::Clear);
        }
        self.rl.add_history_entry(line.as_str())?;

        let (program, errors) = parser::parse(&line);
        if !errors.is_empty() {
            print_parse_errors(&errors);
            return Ok(ReadOutput::Clear);
        }
        Ok(ReadOutput::Value(program))
    }
}

pub(crate) mod evaluator;
pub(crate) mod printer;
mod reader;

use rustyline::DefaultEditor;

use crate::error::RunError;
use evaluator::{Evaluator, InterpreterEvaluator};
use printer::{InterpreterPrinter, Printer};
use reader::{ReadOutput, Reader};

const SCROOPY_ASCII: &str = r#"
  ___  ___ _ __ ___   ___  _ __  _   _
 / __|/ __| '__/ _ \ / _ \| '_ \| | | |
 \__ \ (__| | | (_) | (_) | |_) | |_| |
 |___/\___|_|  \___/ \___/| .__/ \__, |
                          |_|    |___/
"#;

struct Repl<E: Evaluator, P: Printer> {
    reader: Reader,
    evaluator: E,
    printer: P,
}

impl<O, E: Evaluator<Object = O>, P: Printer<Object = O>> Repl<E, P> {
    fn run(mut self) -> Result<(), RunError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(program) => {
                    let result = self.evaluator.evaluate(program);
                    self.printer.print(result)
                }
            }
        }
        Ok(())
    }
}

fn greeting(user: Option<String>) -> String {
    format!(
        "Hello {}! This is the Scroopy programming language!",
        user.as_deref().unwrap_or("there")
    )
}

fn current_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|user| !user.is_empty())
}

pub fn start(banner: bool) -> Result<(), RunError> {
    if banner {
        println!("{}", SCROOPY_ASCII);
        println!("{}", greeting(current_user()));
        println!("Feel free to type in commands");
    }

    Repl {
        reader: Reader::new(DefaultEditor::new()?),
        evaluator: InterpreterEvaluator::new(),
        printer: InterpreterPrinter {},
    }
    .run()
}

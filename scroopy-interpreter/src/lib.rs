//! Tree-walking evaluator for the Scroopy language.

pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod object;

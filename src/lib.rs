// minibasic: a line-oriented BASIC interpreter
//
// Each line is scanned on demand and evaluated straight away by a
// recursive-descent interpreter. Variables persist between lines.

// Public modules
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use error::{BasicError, ErrorKind, ErrorReason, Span};
pub use interpreter::{Effect, Environment, Interpreter};
pub use lexer::{MatchResult, Scanner, Token, TokenType};
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;

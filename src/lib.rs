//! An optimizing tree-walking interpreter for the eight symbol tape language.
//!
//! Source bytes are lexed and parsed into a tree of [`parser::Instruction`]s,
//! rewritten by a fixed sequence of optimizer passes and then evaluated
//! against a 65536 cell wrapping tape.

pub mod interpreter;
pub mod lexer;
pub mod optimizer;
pub mod parser;

use std::io::Read;

use lexer::{lexer::Lexer, LexerError};
use parser::{parser::Parser, Program};

/// Parse a program without optimizing it
pub fn parse<R: Read>(source: R) -> Result<Program, LexerError> {
    Parser::new(Lexer::new(source)).parse_program()
}

/// Parse and optimize a program
pub fn compile<R: Read>(source: R) -> Result<Program, LexerError> {
    Ok(optimizer::optimize(&parse(source)?))
}

use std::io::Read;

use tracing::warn;

use crate::lexer::{lexer::Lexer, LexerError, LexerTokenKind};

use super::{BasicBlock, Instruction, Program};

pub struct Parser<R: Read> {
    lexer: Lexer<R>,
}

impl<R: Read> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Parser<R> {
        Parser { lexer }
    }

    /// Parses until the closing `]` of the current loop (which is consumed) or the end of the stream.
    /// Returns whether the block was terminated by a `]`.
    fn parse_block(&mut self) -> Result<(BasicBlock, bool), LexerError> {
        let mut instructions = vec![];

        loop {
            let instruction = match self.lexer.next_token()? {
                LexerTokenKind::MoveRight => Instruction::Move(1),
                LexerTokenKind::MoveLeft => Instruction::Move(-1),
                LexerTokenKind::Increment => Instruction::Add { value: 1, offset: 0 },
                LexerTokenKind::Decrement => Instruction::Add { value: -1, offset: 0 },
                LexerTokenKind::Write => Instruction::Print { offset: 0 },
                LexerTokenKind::Read => Instruction::Read { offset: 0 },
                LexerTokenKind::LoopStart => {
                    let (line, col) = (self.lexer.cur_line, self.lexer.cur_col);
                    let (body, closed) = self.parse_block()?;
                    if !closed {
                        warn!(line, col, "`[` is never closed, loop runs to the end of the program");
                    }
                    Instruction::Loop(body)
                }
                // the loop has ended so we can break
                LexerTokenKind::LoopEnd => return Ok((BasicBlock { instructions }, true)),
                LexerTokenKind::EOF => return Ok((BasicBlock { instructions }, false)),
                // we aren't outputting comments to the tree
                LexerTokenKind::Comment(_) => continue,
            };
            instructions.push(instruction);
        }
    }

    /// A stray `]` at the top level ends the program, anything after it is ignored
    pub fn parse_program(&mut self) -> Result<Program, LexerError> {
        let (program, truncated) = self.parse_block()?;
        if truncated {
            warn!(
                line = self.lexer.cur_line,
                col = self.lexer.cur_col,
                "unmatched `]`, ignoring the rest of the program"
            );
        }
        Ok(program)
    }
}

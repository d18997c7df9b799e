use std::io::{self, Bytes, Read};
use std::iter::Peekable;

use super::{is_command, LexerError, LexerTokenKind};

#[derive(Debug)]
pub struct Lexer<R: Read> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the file (in bytes) */
    pub byte_offset: usize,

    bytes: Peekable<Bytes<R>>,
}

impl<R: Read> Lexer<R> {
    pub fn new(source: R) -> Lexer<R> {
        Lexer {
            cur_col: 0,
            cur_line: 1,

            byte_offset: 0,

            bytes: source.bytes().peekable(),
        }
    }

    fn transform_to_type(&mut self, c: u8) -> Result<LexerTokenKind, LexerError> {
        match c {
            b'>' => Ok(LexerTokenKind::MoveRight),
            b'<' => Ok(LexerTokenKind::MoveLeft),
            b'+' => Ok(LexerTokenKind::Increment),
            b'-' => Ok(LexerTokenKind::Decrement),
            b'.' => Ok(LexerTokenKind::Write),
            b',' => Ok(LexerTokenKind::Read),
            b'[' => Ok(LexerTokenKind::LoopStart),
            b']' => Ok(LexerTokenKind::LoopEnd),
            c => {
                // Simplify the comment stream down to a single run of bytes,
                // an IO error stops the run and is reported by the next call
                let mut comment = vec![c];
                while let Some(Ok(next)) = self.bytes.peek() {
                    if is_command(*next) {
                        break;
                    }
                    match self.consume_byte()? {
                        Some(b) => comment.push(b),
                        None => break,
                    }
                }

                Ok(LexerTokenKind::Comment(comment))
            }
        }
    }

    fn consume_byte(&mut self) -> Result<Option<u8>, LexerError> {
        loop {
            match self.bytes.next() {
                Some(Ok(c)) => {
                    self.cur_col += 1;
                    if c == b'\n' {
                        self.cur_line += 1;
                        self.cur_col = 0;
                    }
                    self.byte_offset += 1;
                    return Ok(Some(c));
                }
                Some(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(None),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<LexerTokenKind, LexerError> {
        match self.consume_byte()? {
            Some(c) => self.transform_to_type(c),
            None => Ok(LexerTokenKind::EOF),
        }
    }

    pub fn collect_results(&mut self) -> Result<Vec<LexerTokenKind>, LexerError> {
        let mut v = vec![];
        loop {
            match self.next_token()? {
                LexerTokenKind::EOF => return Ok(v),
                tok => v.push(tok),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<LexerTokenKind> {
        Lexer::new(source.as_bytes()).collect_results().unwrap()
    }

    #[test]
    fn recognises_all_eight_symbols() {
        assert_eq!(
            lex("><+-.,[]"),
            vec![
                LexerTokenKind::MoveRight,
                LexerTokenKind::MoveLeft,
                LexerTokenKind::Increment,
                LexerTokenKind::Decrement,
                LexerTokenKind::Write,
                LexerTokenKind::Read,
                LexerTokenKind::LoopStart,
                LexerTokenKind::LoopEnd,
            ]
        );
    }

    #[test]
    fn comments_are_collapsed_into_one_token() {
        assert_eq!(
            lex("ab c\n+xy"),
            vec![
                LexerTokenKind::Comment(b"ab c\n".to_vec()),
                LexerTokenKind::Increment,
                LexerTokenKind::Comment(b"xy".to_vec()),
            ]
        );
    }

    #[test]
    fn unbalanced_brackets_are_not_lexer_errors() {
        assert_eq!(lex("]]["), vec![
            LexerTokenKind::LoopEnd,
            LexerTokenKind::LoopEnd,
            LexerTokenKind::LoopStart,
        ]);
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut lexer = Lexer::new("+\n -".as_bytes());
        assert_eq!(lexer.next_token().unwrap(), LexerTokenKind::Increment);
        assert_eq!((lexer.cur_line, lexer.cur_col), (1, 1));
        lexer.next_token().unwrap();
        assert_eq!(lexer.next_token().unwrap(), LexerTokenKind::Decrement);
        assert_eq!((lexer.cur_line, lexer.cur_col), (2, 2));
        assert_eq!(lexer.byte_offset, 4);
        assert_eq!(lexer.next_token().unwrap(), LexerTokenKind::EOF);
    }

    #[test]
    fn non_utf8_bytes_are_comments() {
        assert_eq!(
            lex_bytes(&[0xff, 0xfe, b'.']),
            vec![LexerTokenKind::Comment(vec![0xff, 0xfe]), LexerTokenKind::Write]
        );
    }

    fn lex_bytes(source: &[u8]) -> Vec<LexerTokenKind> {
        Lexer::new(source).collect_results().unwrap()
    }
}

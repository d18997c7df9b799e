use thiserror::Error;

pub mod lexer;

#[derive(Debug, Clone, PartialEq)]
pub enum LexerTokenKind {
    // `>`: Move the `data pointer` one cell to the right
    MoveRight,
    // `<`: Move the `data pointer` one cell to the left
    MoveLeft,

    // `+`: Increment the byte at the `data pointer` by one
    Increment,
    // `-`: Decrement the byte at the `data pointer` by one
    Decrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Write,
    // `,`: Read the next byte from the `input device` and store it at the `data pointer`
    Read,

    // `[`: If the byte at the `data pointer` is zero, then jump past the matching `]`
    LoopStart,
    // `]`: If the byte at the `data pointer` is non-zero then jump back to the matching `[`
    LoopEnd,

    // End of file: no more tokens left
    EOF,

    // Comment every other byte
    Comment(Vec<u8>),
}

impl LexerTokenKind {
    /// The source symbol for this token, comments are rendered lossily
    pub fn symbol(&self) -> String {
        match self {
            LexerTokenKind::MoveRight => ">".into(),
            LexerTokenKind::MoveLeft => "<".into(),
            LexerTokenKind::Increment => "+".into(),
            LexerTokenKind::Decrement => "-".into(),
            LexerTokenKind::Write => ".".into(),
            LexerTokenKind::Read => ",".into(),
            LexerTokenKind::LoopStart => "[".into(),
            LexerTokenKind::LoopEnd => "]".into(),
            LexerTokenKind::EOF => String::new(),
            LexerTokenKind::Comment(c) => String::from_utf8_lossy(c).into_owned(),
        }
    }
}

/// Is this byte one of the eight command symbols
pub fn is_command(byte: u8) -> bool {
    matches!(byte, b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'[' | b']')
}

#[derive(Error, Debug)]
pub enum LexerError {
    #[error("IO Error: {0}")]
    FileIO(
        #[from]
        std::io::Error,
    ),
}

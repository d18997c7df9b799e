pub mod tree_interpreter;

use std::io::{self, Read, Write};

use thiserror::Error;

/// Number of cells on the tape, the data pointer wraps around at this size
pub const TAPE_SIZE: usize = 1 << 16;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to write output: {0}")]
    Output(
        #[from]
        io::Error,
    ),

    #[error("Program did not finish within {limit} steps")]
    StepLimitExceeded { limit: u64 },
}

pub struct Runtime<'io> {
    /// Pointer into the tape
    data_pointer: u16,

    /// Our statically sized tape
    tape: Box<[u8]>,

    in_stream: Box<dyn Read + 'io>,
    out_stream: Box<dyn Write + 'io>,

    /// Flush after every write rather than only before reads and at the end
    flush_each_write: bool,
}

impl<'io> Runtime<'io> {
    pub fn new(in_stream: Box<dyn Read + 'io>, out_stream: Box<dyn Write + 'io>) -> Self {
        Self {
            data_pointer: 0,
            tape: vec![0; TAPE_SIZE].into_boxed_slice(),
            in_stream,
            out_stream,
            flush_each_write: false,
        }
    }

    pub fn with_flush_each_write(mut self, flush_each_write: bool) -> Self {
        self.flush_each_write = flush_each_write;
        self
    }

    pub fn reset(&mut self) {
        self.tape.fill(0);
        self.data_pointer = 0;
    }

    pub fn data_pointer(&self) -> u16 {
        self.data_pointer
    }

    pub fn set_data_pointer(&mut self, to: u16) {
        self.data_pointer = to;
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// The cell at `offset` from the data pointer
    pub fn cell(&self, offset: isize) -> u8 {
        self.tape[self.address(offset)]
    }

    pub fn set_cell(&mut self, offset: isize, value: u8) {
        let address = self.address(offset);
        self.tape[address] = value;
    }

    /// Read one byte from the input into the cell at `offset`.
    /// Once the input is exhausted the cell is left unchanged.
    pub fn read(&mut self, offset: isize) -> Result<(), RuntimeError> {
        // anything already printed (i.e. a prompt) should be visible before we block
        self.out_stream.flush()?;

        let mut byte = [0u8; 1];
        loop {
            match self.in_stream.read(&mut byte) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    self.set_cell(offset, byte[0]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // a broken input is no different from an empty one
                Err(_) => return Ok(()),
            }
        }
    }

    /// Write the cell at `offset` to the output
    pub fn write(&mut self, offset: isize) -> Result<(), RuntimeError> {
        let byte = self.cell(offset);
        self.out_stream.write_all(&[byte])?;
        if self.flush_each_write {
            self.out_stream.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    pub fn add_value(&mut self, offset: isize, by: i32) {
        let address = self.address(offset);
        // truncating is exactly arithmetic modulo 256
        self.tape[address] = self.tape[address].wrapping_add(by as u8);
    }

    pub fn clear(&mut self, offset: isize) {
        self.set_cell(offset, 0);
    }

    pub fn shift_data_pointer(&mut self, by: isize) {
        self.data_pointer = self.data_pointer.wrapping_add(by as u16);
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.cell(0) == 0
    }

    fn address(&self, offset: isize) -> usize {
        usize::from(self.data_pointer.wrapping_add(offset as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime<'a>(input: &'a [u8], output: &'a mut Vec<u8>) -> Runtime<'a> {
        Runtime::new(Box::new(input), Box::new(output))
    }

    #[test]
    fn cells_wrap_around() {
        let mut output = vec![];
        let mut rt = runtime(&[], &mut output);
        rt.set_cell(0, 255);
        rt.add_value(0, 1);
        assert_eq!(rt.cell(0), 0);
        rt.add_value(0, -1);
        assert_eq!(rt.cell(0), 255);
        rt.add_value(0, 258);
        assert_eq!(rt.cell(0), 1);
    }

    #[test]
    fn pointer_wraps_around() {
        let mut output = vec![];
        let mut rt = runtime(&[], &mut output);
        rt.shift_data_pointer(-1);
        assert_eq!(rt.data_pointer(), 65535);
        rt.shift_data_pointer(2);
        assert_eq!(rt.data_pointer(), 1);
    }

    #[test]
    fn offsets_wrap_around() {
        let mut output = vec![];
        let mut rt = runtime(&[], &mut output);
        rt.set_cell(-1, 7);
        assert_eq!(rt.tape()[TAPE_SIZE - 1], 7);
        rt.set_data_pointer(65535);
        rt.add_value(1, 3);
        assert_eq!(rt.tape()[0], 3);
    }

    #[test]
    fn exhausted_input_leaves_cell_alone() {
        let mut output = vec![];
        let mut rt = runtime(b"a", &mut output);
        rt.read(0).unwrap();
        assert_eq!(rt.cell(0), b'a');
        rt.read(0).unwrap();
        assert_eq!(rt.cell(0), b'a');
    }

    #[test]
    fn writes_reach_the_output() {
        let mut output = vec![];
        {
            let mut rt = runtime(&[], &mut output);
            rt.set_cell(2, b'x');
            rt.write(2).unwrap();
            rt.write(0).unwrap();
        }
        assert_eq!(output, vec![b'x', 0]);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut output = vec![];
        let mut rt = runtime(&[], &mut output);
        rt.shift_data_pointer(5);
        rt.set_cell(0, 9);
        rt.reset();
        assert_eq!(rt.data_pointer(), 0);
        assert!(rt.tape().iter().all(|&cell| cell == 0));
    }
}

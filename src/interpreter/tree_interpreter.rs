use crate::parser::{BasicBlock, Instruction, Program};

use super::{Runtime, RuntimeError};

/// Walks the instruction tree directly, recursing once per loop body
#[derive(Debug, Default)]
pub struct Interpreter {
    /// Give up after this many steps (instructions executed plus loop tests)
    step_limit: Option<u64>,
    steps: u64,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Steps taken by the last (or current) run
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn interpret(&mut self, runtime: &mut Runtime<'_>, program: &Program) -> Result<(), RuntimeError> {
        self.steps = 0;
        let result = self.interpret_block(runtime, program);
        // flush whatever made it out, even if we stopped early
        runtime.flush()?;
        result
    }

    fn step(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => Err(RuntimeError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn interpret_block(&mut self, runtime: &mut Runtime<'_>, block: &BasicBlock) -> Result<(), RuntimeError> {
        for instruction in block.instructions.iter() {
            self.step()?;
            match instruction {
                Instruction::Nop => {}
                Instruction::Move(by) => runtime.shift_data_pointer(*by),
                Instruction::Add { value, offset } => runtime.add_value(*offset, *value),
                Instruction::Print { offset } => runtime.write(*offset)?,
                Instruction::Read { offset } => runtime.read(*offset)?,
                Instruction::Clear { offset } => runtime.clear(*offset),
                Instruction::Loop(body) => {
                    while !runtime.value_is_zero() {
                        self.interpret_block(runtime, body)?;
                        self.step()?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, input: &[u8]) -> (Vec<u8>, u16, Vec<u8>) {
        let program = crate::compile(source.as_bytes()).unwrap();
        let mut output = vec![];
        let (pointer, tape) = {
            let mut runtime = Runtime::new(Box::new(input), Box::new(&mut output));
            Interpreter::new()
                .with_step_limit(Some(1_000_000))
                .interpret(&mut runtime, &program)
                .unwrap();
            (runtime.data_pointer(), runtime.tape()[..8].to_vec())
        };
        (output, pointer, tape)
    }

    #[test]
    fn echo_one_byte() {
        assert_eq!(run(",.", b"xyz").0, b"x");
    }

    #[test]
    fn read_past_end_of_input_keeps_cell() {
        assert_eq!(run("+++,.", b"").0, vec![3]);
    }

    #[test]
    fn moves_and_adds() {
        let (_, pointer, tape) = run(">>+++<-<", b"");
        assert_eq!(pointer, 0);
        assert_eq!(&tape[..3], &[0, 255, 3]);
    }

    #[test]
    fn clear_loop_zeroes_cell() {
        for start in [1u8, 2, 127, 128, 255] {
            for source in ["[-]", "[+]"] {
                let program = crate::compile(source.as_bytes()).unwrap();
                let mut output = vec![];
                let mut runtime = Runtime::new(Box::new(&b""[..]), Box::new(&mut output));
                runtime.set_data_pointer(10);
                runtime.set_cell(0, start);
                Interpreter::new().interpret(&mut runtime, &program).unwrap();
                assert_eq!(runtime.cell(0), 0);
                assert_eq!(runtime.data_pointer(), 10);
            }
        }
    }

    #[test]
    fn loop_tests_the_current_cell() {
        // copies cell 0 into cells 1 and 2, leaving the pointer on the (now zero) cell 0
        let (_, pointer, tape) = run("+++[>+>+<<-]", b"");
        assert_eq!(pointer, 0);
        assert_eq!(&tape[..3], &[0, 3, 3]);
    }

    #[test]
    fn empty_loop_on_nonzero_cell_never_ends() {
        let program = crate::compile("+[]".as_bytes()).unwrap();
        let mut output = vec![];
        let mut runtime = Runtime::new(Box::new(&b""[..]), Box::new(&mut output));
        let mut interpreter = Interpreter::new().with_step_limit(Some(10_000));
        let result = interpreter.interpret(&mut runtime, &program);
        assert!(matches!(result, Err(RuntimeError::StepLimitExceeded { limit: 10_000 })));
        assert_eq!(interpreter.steps(), 10_001);
    }

    #[test]
    fn empty_loop_on_zero_cell_is_skipped() {
        assert_eq!(run("[].", b"").0, vec![0]);
    }

    #[test]
    fn nop_does_nothing() {
        let program = BasicBlock::new(vec![Instruction::Nop, Instruction::Print { offset: 0 }]);
        let mut output = vec![];
        {
            let mut runtime = Runtime::new(Box::new(&b""[..]), Box::new(&mut output));
            Interpreter::new().interpret(&mut runtime, &program).unwrap();
        }
        assert_eq!(output, vec![0]);
    }
}

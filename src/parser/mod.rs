pub mod parser;

/// A single node of the instruction tree.
///
/// Offsets are cell addresses relative to the data pointer at the start of
/// the enclosing straight-line run, they are all zero until offset folding runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Placeholder with no effect, stripped by the optimizer
    Nop,

    /// Shift the data pointer by the given delta
    Move(isize),

    /// Add `value` to the cell at `offset`
    Add { value: i32, offset: isize },

    /// Write the cell at `offset` to the output device
    Print { offset: isize },

    /// Read one byte from the input device into the cell at `offset`
    Read { offset: isize },

    /// Repeat the body while the cell under the data pointer is non-zero
    Loop(BasicBlock),

    /// Zero the cell at `offset`
    Clear { offset: isize },
}

impl Instruction {
    /// Mutable access to the cell offset, if this kind of instruction has one
    pub fn offset_mut(&mut self) -> Option<&mut isize> {
        match self {
            Instruction::Add { offset, .. }
            | Instruction::Print { offset }
            | Instruction::Read { offset }
            | Instruction::Clear { offset } => Some(offset),
            Instruction::Nop | Instruction::Move(_) | Instruction::Loop(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicBlock {
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Total number of instructions including those nested inside loops
    pub fn instruction_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|instruction| match instruction {
                Instruction::Loop(body) => 1 + body.instruction_count(),
                _ => 1,
            })
            .sum()
    }
}

pub type Program = BasicBlock;

use crate::parser::{BasicBlock, Instruction};

/// Removes every `Nop` from the block and from all nested loop bodies
pub fn nop_elimination(block: &mut BasicBlock) {
    block.instructions.retain_mut(|instruction| match instruction {
        Instruction::Nop => false,
        Instruction::Loop(body) => {
            nop_elimination(body);
            true
        }
        _ => true,
    });
}

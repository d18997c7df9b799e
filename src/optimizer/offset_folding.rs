use crate::parser::{BasicBlock, Instruction};

/// Replaces pointer moves inside straight-line runs with cell offsets.
///
/// Every run ends with at most one `Move` carrying its net displacement, placed
/// before the loop that ends the run (or at the end of the block). The replaced
/// moves are left behind as `Nop`s.
pub fn offset_folding(block: &mut BasicBlock) {
    let mut displacement: isize = 0;
    let mut pc = 0;
    let instructions = &mut block.instructions;

    while pc < instructions.len() {
        match &mut instructions[pc] {
            Instruction::Move(by) => {
                displacement = displacement.wrapping_add(*by);
                instructions[pc] = Instruction::Nop;
            }
            Instruction::Loop(body) => {
                // the body starts from its own pointer, every iteration
                offset_folding(body);
                if displacement != 0 {
                    instructions.insert(pc, Instruction::Move(displacement));
                    displacement = 0;
                    pc += 1;
                }
            }
            Instruction::Nop => {}
            other => {
                if let Some(offset) = other.offset_mut() {
                    *offset = offset.wrapping_add(displacement);
                }
            }
        }
        pc += 1;
    }

    if displacement != 0 {
        instructions.push(Instruction::Move(displacement));
    }
}

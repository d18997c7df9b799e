use crate::parser::{BasicBlock, Instruction};

/// Is this loop body just `[-]`/`[+]` (or any other odd step)?
///
/// An odd delta always reaches zero modulo 256, an even one may cycle forever.
fn is_clear_loop(body: &BasicBlock) -> bool {
    match body.instructions.as_slice() {
        [Instruction::Add { value, offset: 0 }] => value % 2 != 0,
        _ => false,
    }
}

/// Rewrites loops that unconditionally zero the current cell into a single `Clear`
pub fn clear_loops(block: &mut BasicBlock) {
    for instruction in block.instructions.iter_mut() {
        if let Instruction::Loop(body) = instruction {
            if is_clear_loop(body) {
                *instruction = Instruction::Clear { offset: 0 };
            } else {
                clear_loops(body);
            }
        }
    }
}

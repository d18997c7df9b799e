use crate::interpreter::TAPE_SIZE;
use crate::parser::{BasicBlock, Instruction};

/// Combine two neighbouring instructions into one, if they are both moves or adds to the same cell
fn fold_pair(first: &Instruction, second: &Instruction) -> Option<Instruction> {
    match (first, second) {
        (Instruction::Move(a), Instruction::Move(b)) => Some(Instruction::Move(a.wrapping_add(*b))),
        (
            Instruction::Add { value: a, offset },
            Instruction::Add { value: b, offset: other },
        ) if offset == other => Some(Instruction::Add {
            value: a.wrapping_add(*b),
            offset: *offset,
        }),
        _ => None,
    }
}

/// Does this instruction leave the tape and pointer untouched
fn is_identity(instruction: &Instruction) -> bool {
    match instruction {
        Instruction::Move(by) => by.rem_euclid(TAPE_SIZE as isize) == 0,
        Instruction::Add { value, .. } => value.rem_euclid(256) == 0,
        _ => false,
    }
}

/// A form of constant folding that folds runs of moves/adds into one.
///
/// Runs that cancel out are dropped entirely, which can bring more foldable
/// instructions next to each other (i.e. `+><+` becomes a single add of 2).
pub fn constant_folding(block: &mut BasicBlock) {
    let mut pc = 0;
    let instructions = &mut block.instructions;
    while pc < instructions.len() {
        if let Instruction::Loop(body) = &mut instructions[pc] {
            constant_folding(body);
            pc += 1;
            continue;
        }

        // accumulate the whole run into the first instruction
        let mut end = pc + 1;
        while end < instructions.len() {
            match fold_pair(&instructions[pc], &instructions[end]) {
                Some(folded) => {
                    instructions[pc] = folded;
                    end += 1;
                }
                // no longer a series of constants
                None => break,
            }
        }
        instructions.drain(pc + 1..end);

        if is_identity(&instructions[pc]) {
            instructions.remove(pc);
            // step back so the previous instruction gets a chance to absorb the next one
            if pc > 0 && !matches!(instructions[pc - 1], Instruction::Loop(_)) {
                pc -= 1;
            }
            continue;
        }

        pc += 1;
    }
}

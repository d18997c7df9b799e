use tracing::debug;

use crate::parser::{BasicBlock, Program};

use self::{
    clear_loop::clear_loops, constant_folding::constant_folding, nop_elimination::nop_elimination,
    offset_folding::offset_folding,
};

pub mod clear_loop;
pub mod constant_folding;
pub mod nop_elimination;
pub mod offset_folding;

/// The passes in the order they are run.
///
/// Clear loops are recognised once more after constant folding since folding
/// a body like `-><` can leave a single `Add` behind.
const PASSES: [(&str, fn(&mut BasicBlock)); 6] = [
    ("nop-elimination", nop_elimination),
    ("clear-loop", clear_loops),
    ("constant-folding", constant_folding),
    ("clear-loop", clear_loops),
    ("offset-folding", offset_folding),
    ("nop-elimination", nop_elimination),
];

pub fn optimize(program: &Program) -> Program {
    let mut copy = program.clone();

    for (name, pass) in PASSES {
        let before = copy.instruction_count();
        pass(&mut copy);
        debug!(pass = name, before, after = copy.instruction_count(), "ran optimizer pass");
    }

    copy
}

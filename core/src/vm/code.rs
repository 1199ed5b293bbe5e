use hashbrown::{HashMap, HashSet};

use crate::{String, Vec, format, vm::Instruction};

/// A flat, fully resolved program.
///
/// Addresses are indices into `instructions`. Execution starts at address 0
/// with the startup prologue `Ldi(main), Call(0), Halt`.
#[derive(Clone, PartialEq, Eq)]
pub struct Code {
    pub instructions: Vec<Instruction>,
}

impl Code {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Addresses of function entries: each `Alloc` that starts a run.
    pub fn function_entries(&self) -> Vec<usize> {
        self.instructions
            .iter()
            .enumerate()
            .filter(|&(addr, instr)| {
                instr.is_alloc() && (addr == 0 || !self.instructions[addr - 1].is_alloc())
            })
            .map(|(addr, _)| addr)
            .collect()
    }

    /// Number of `Call` instructions left in the program.
    pub fn call_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instr| instr.as_call().is_some())
            .count()
    }
}

impl core::ops::Index<usize> for Code {
    type Output = Instruction;

    fn index(&self, addr: usize) -> &Instruction {
        &self.instructions[addr]
    }
}

impl From<Vec<Instruction>> for Code {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

/// Extract the target of an instruction, if it's a jump instruction.
fn get_jump_target(instr: &Instruction) -> Option<usize> {
    match instr {
        Instruction::Jump(addr) => usize::try_from(*addr).ok(),
        _ => None,
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Code {{")?;

        // First pass: collect all jump targets to determine which addresses need labels
        let jump_targets: HashSet<usize> = self
            .instructions
            .iter()
            .filter_map(get_jump_target)
            .collect();

        // Assign label numbers to targets (sorted for deterministic output)
        let mut sorted_targets: Vec<_> = jump_targets.into_iter().collect();
        sorted_targets.sort();
        let label_map: HashMap<usize, usize> = sorted_targets
            .into_iter()
            .enumerate()
            .map(|(i, addr)| (addr, i))
            .collect();

        let function_map: HashMap<usize, usize> = self
            .function_entries()
            .into_iter()
            .enumerate()
            .map(|(i, addr)| (addr, i))
            .collect();

        // Second pass: print instructions with labels
        writeln!(f, "  instructions:")?;
        for (addr, instr) in self.instructions.iter().enumerate() {
            let label_prefix = if let Some(&fn_num) = function_map.get(&addr) {
                format!("F{}:", fn_num)
            } else if let Some(&label_num) = label_map.get(&addr) {
                format!("L{}:", label_num)
            } else {
                String::new()
            };

            if let Some(target) = get_jump_target(instr) {
                let target_label = label_map
                    .get(&target)
                    .map(|l| format!("L{}", l))
                    .unwrap_or_else(|| format!("@{}", target));
                writeln!(
                    f,
                    "    {:4} {:>4}  {:?} (to {})",
                    addr, label_prefix, instr, target_label
                )?;
            } else {
                writeln!(f, "    {:4} {:>4}  {:?}", addr, label_prefix, instr)?;
            }
        }

        write!(f, "}}")
    }
}

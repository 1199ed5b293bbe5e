//! Tail-call rewriting.
//!
//! A call in tail position is translated as
//!
//! ```text
//! T-k-2:  Ldi(target)
//!         Nop            ┐
//!         ...            │ k reserved slots
//!         Nop            ┘
//! A-1:    Call(k)
//! A:      Return(cells)
//! ```
//!
//! When the callee's frame has the same shape as the current one, the window
//! is rewritten in place into
//!
//! ```text
//!         Sts(0)         ┐
//!         Sts(-1)        │ k stores, last argument first
//!         ...            │
//!         Sts(-(k-1))    ┘
//! A-2:    Ldi(0)
//! A-1:    Not
//! A:      Jump(body)
//! ```
//!
//! which overwrites the current parameters with the new arguments and jumps
//! past the callee's `Alloc` run, reusing the frame instead of growing the
//! stack.
//!
//! The frame check compares shapes only: the callee's local count must
//! equal the current function's, and the `Return` operand must equal those
//! locals plus `k`. The call target is not compared with the enclosing
//! function, so a call to a different function with an identical frame shape
//! is rewritten too.

use crate::vm::{Instruction, scan_frame};

use crate::vm::Code;

/// Rewrite every matching tail call in `code`.
///
/// The returned program has the same length as the input.
pub fn optimize(mut code: Code) -> Code {
    let rewrites = TailCallRewriter::new(&mut code.instructions).run();
    tracing::debug!(rewrites, "tail-call optimization finished");
    code
}

/// A matched tail-call window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TailCall {
    /// Address of the `Ldi(target)`.
    target_slot: usize,
    argc: usize,
    /// First instruction after the callee's `Alloc` run.
    body: usize,
}

/// Forward scan over a flat program, rewriting tail calls in place.
///
/// Borrowing a slice (not a `Vec`) makes the length invariant structural.
pub struct TailCallRewriter<'p> {
    program: &'p mut [Instruction],
    /// Local count of the function most recently entered by the scan.
    frame_cells: i32,
}

impl<'p> TailCallRewriter<'p> {
    pub fn new(program: &'p mut [Instruction]) -> Self {
        Self {
            program,
            frame_cells: 0,
        }
    }

    /// Scan the whole program once; returns the number of rewrites.
    pub fn run(&mut self) -> usize {
        let mut rewrites = 0;
        let mut addr = 0;
        while addr < self.program.len() {
            match self.program[addr] {
                Instruction::Alloc(_) => {
                    // Consume the whole run so inner Allocs are not rescanned.
                    let scan = scan_frame(self.program, addr);
                    self.frame_cells = scan.cells;
                    addr = scan.next;
                    continue;
                }
                Instruction::Return(cells) => {
                    if let Some(tail_call) = self.match_tail_call(addr, cells) {
                        self.rewrite(addr, tail_call);
                        rewrites += 1;
                    }
                }
                _ => {}
            }
            addr += 1;
        }
        rewrites
    }

    /// Check whether the code right before the `Return` at `ret` is a
    /// same-shaped tail call.
    fn match_tail_call(&self, ret: usize, ret_cells: i32) -> Option<TailCall> {
        let call = ret.checked_sub(1)?;
        let argc = usize::try_from(self.program[call].as_call()?).ok()?;
        let target_slot = ret.checked_sub(argc + 2)?;

        if !self.program[target_slot + 1..call]
            .iter()
            .all(Instruction::is_nop)
        {
            return None;
        }

        let target = usize::try_from(self.program[target_slot].as_ldi()?)
            .ok()
            .filter(|&target| target < self.program.len())?;

        let callee = scan_frame(self.program, target);
        let shape_matches = callee.cells == self.frame_cells
            && i64::from(callee.cells) + argc as i64 == i64::from(ret_cells);
        if !shape_matches {
            tracing::trace!(
                ret,
                target,
                callee_cells = callee.cells,
                frame_cells = self.frame_cells,
                ret_cells,
                "frame shape mismatch, keeping call"
            );
            return None;
        }

        Some(TailCall {
            target_slot,
            argc,
            body: callee.next,
        })
    }

    fn rewrite(&mut self, ret: usize, tail_call: TailCall) {
        let TailCall {
            target_slot,
            argc,
            body,
        } = tail_call;
        tracing::debug!(ret, target_slot, argc, body, "rewriting tail call");

        // The last-pushed argument is popped first and belongs to the last
        // parameter (offset 0).
        for (i, slot) in (target_slot..target_slot + argc).enumerate() {
            self.program[slot] = Instruction::Sts(-(i as i32));
        }
        let [push_zero, not] = Instruction::PUSH_TRUE;
        self.program[ret - 2] = push_zero;
        self.program[ret - 1] = not;
        self.program[ret] = Instruction::Jump(body as i32);
    }
}

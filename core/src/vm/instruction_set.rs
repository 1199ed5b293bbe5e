//! Stack-and-frame machine instructions.
//!
//! This module defines the instruction set shared by the translator, the
//! tail-call rewriter and the reference machine.
//!
//! # Instruction Format
//!
//! Every instruction is one machine word made of an operation tag and a
//! signed immediate:
//! ```text
//! ┌────────────┬──────────────────┐
//! │    Tag     │    Immediate     │
//! │  (Opcode)  │      (i32)       │
//! └────────────┴──────────────────┘
//! ```
//!
//! Operations that take no immediate report `0` from [`Instruction::immediate`].
//! The index of an instruction inside a program is its absolute address.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., second, top] -> [..., result]`.
//!
//! Binary operators compute `top OP second`. The translator pushes the right
//! operand first and the left operand last, so `a - b` ends up as
//! `[..., b, a] -> [..., a - b]`.
//!
//! # Booleans
//!
//! `false` is all-bits-zero and `true` is all-bits-one (`-1`), so `And`,
//! `Or` and `Not` double as logical operators.
//!
//! # Unconditional Jumps
//!
//! There is no dedicated opcode. An unconditional jump is always the pair
//! `Ldi(0), Not` (push true) followed by `Jump(addr)`.

use core::fmt;

/// Boolean `true` as produced by comparisons and `Not(0)`.
pub const TRUE: i32 = -1;

/// Boolean `false`.
pub const FALSE: i32 = 0;

/// Operation tag of an [`Instruction`], without its immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Ldi,
    Lds,
    Sts,
    Alloc,
    Call,
    Return,
    Jump,
    Nop,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Not,
    Shl,
    Eq,
    Lt,
    Le,
    Halt,
    In,
    Out,
}

/// A single machine instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    // ========================================================================
    // Stack & Frame
    // ========================================================================
    /// Push immediate value
    /// Stack: [...] -> [..., v]
    Ldi(i32),

    /// Push the frame cell at offset `off`
    /// Stack: [...] -> [..., frame[off]]
    Lds(i32),

    /// Pop and store into the frame cell at offset `off`
    /// Stack: [..., v] -> [...]
    Sts(i32),

    /// Grow the current frame by `n` cells
    ///
    /// Every function starts with `Alloc(0)` followed by one `Alloc` per
    /// declaration group. That contiguous run is how the tail-call rewriter
    /// finds function entries and their frame sizes.
    Alloc(i32),

    // ========================================================================
    // Control Flow
    // ========================================================================
    /// Call the address on top of the stack with `argc` arguments beneath it
    /// Stack: [..., a1, ..., aN, target] -> [..., result] (after return)
    Call(i32),

    /// Pop the result, release `cells` frame cells and resume the caller
    Return(i32),

    /// Pop a condition and jump to the absolute address when it is true
    /// Stack: [..., cond] -> [...]
    Jump(i32),

    /// No operation
    ///
    /// Reserved space: placeholders before backpatching, and the padding
    /// between a callee address and its `Call` that tail-call rewriting
    /// reuses.
    Nop,

    // ========================================================================
    // Arithmetic & Bitwise
    // ========================================================================
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Not,

    /// Shift the top of stack left by the immediate amount
    /// Stack: [..., v] -> [..., v << n]
    Shl(i32),

    // ========================================================================
    // Comparisons
    // ========================================================================
    Eq,
    Lt,
    Le,

    // ========================================================================
    // Machine
    // ========================================================================
    /// Halt execution
    Halt,

    /// Read one value from the input
    /// Stack: [...] -> [..., v]
    In,

    /// Pop and emit one value
    /// Stack: [..., v] -> [...]
    Out,
}

impl Instruction {
    /// Push boolean `true`, the first half of an unconditional jump.
    pub const PUSH_TRUE: [Instruction; 2] = [Instruction::Ldi(0), Instruction::Not];

    pub const fn op(&self) -> Opcode {
        match self {
            Self::Ldi(_) => Opcode::Ldi,
            Self::Lds(_) => Opcode::Lds,
            Self::Sts(_) => Opcode::Sts,
            Self::Alloc(_) => Opcode::Alloc,
            Self::Call(_) => Opcode::Call,
            Self::Return(_) => Opcode::Return,
            Self::Jump(_) => Opcode::Jump,
            Self::Nop => Opcode::Nop,
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Mod => Opcode::Mod,
            Self::And => Opcode::And,
            Self::Or => Opcode::Or,
            Self::Not => Opcode::Not,
            Self::Shl(_) => Opcode::Shl,
            Self::Eq => Opcode::Eq,
            Self::Lt => Opcode::Lt,
            Self::Le => Opcode::Le,
            Self::Halt => Opcode::Halt,
            Self::In => Opcode::In,
            Self::Out => Opcode::Out,
        }
    }

    /// The signed immediate, `0` for operations without one.
    pub const fn immediate(&self) -> i32 {
        match self {
            Self::Ldi(v)
            | Self::Lds(v)
            | Self::Sts(v)
            | Self::Alloc(v)
            | Self::Call(v)
            | Self::Return(v)
            | Self::Jump(v)
            | Self::Shl(v) => *v,
            _ => 0,
        }
    }

    pub const fn is_alloc(&self) -> bool {
        matches!(self, Self::Alloc(_))
    }

    pub const fn is_nop(&self) -> bool {
        matches!(self, Self::Nop)
    }

    /// Argument count if this is a `Call`.
    pub const fn as_call(&self) -> Option<i32> {
        match self {
            Self::Call(argc) => Some(*argc),
            _ => None,
        }
    }

    /// Immediate if this is an `Ldi`.
    pub const fn as_ldi(&self) -> Option<i32> {
        match self {
            Self::Ldi(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ldi(v) => write!(f, "Ldi({})", v),
            Self::Lds(off) => write!(f, "Lds({:+})", off),
            Self::Sts(off) => write!(f, "Sts({:+})", off),
            Self::Alloc(n) => write!(f, "Alloc({})", n),
            Self::Call(argc) => write!(f, "Call({})", argc),
            Self::Return(cells) => write!(f, "Return({})", cells),
            Self::Jump(addr) => write!(f, "Jump({})", addr),
            Self::Shl(n) => write!(f, "Shl({})", n),
            other => write!(f, "{:?}", other.op()),
        }
    }
}

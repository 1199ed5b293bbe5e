//! Reference machine errors.
//!
//! A translated program never triggers the structural errors below when run
//! from address 0; they exist so hand-written or corrupted programs fail
//! cleanly instead of panicking.
//!
//! # Error Categories
//!
//! - **Runtime errors**: division by zero, input exhaustion.
//! - **Structural errors**: bad addresses, stack underflow, frame access
//!   outside the stack.
//! - **Resource exceeded errors**: call depth and step limits from
//!   [`ExecutionOptions`](crate::api::ExecutionOptions).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("division by zero at {pc}")]
    DivisionByZero { pc: usize },

    #[error("input exhausted at {pc}")]
    InputExhausted { pc: usize },

    #[error("stack underflow at {pc}")]
    StackUnderflow { pc: usize },

    #[error("frame offset {offset} out of bounds at {pc}")]
    FrameOutOfBounds { pc: usize, offset: i32 },

    #[error("invalid address {target} reached from {pc}")]
    InvalidAddress { pc: usize, target: i64 },

    #[error("invalid allocation of {cells} cells at {pc}")]
    InvalidAlloc { pc: usize, cells: i32 },

    #[error("return without an active call at {pc}")]
    ReturnWithoutCall { pc: usize },

    #[error("call depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    #[error("step limit of {max_steps} exceeded")]
    StepLimitExceeded { max_steps: usize },
}

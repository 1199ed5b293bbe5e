mod code;
mod error;
pub mod frame;
mod instruction_set;
mod runtime;
mod stack;

pub use code::Code;
pub use error::ExecutionError;
pub use frame::{FrameScan, scan_frame};
pub use instruction_set::{FALSE, Instruction, Opcode, TRUE};
pub use runtime::{Execution, VM};

pub use stack::Stack;

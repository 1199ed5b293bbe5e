use super::instruction_set::{FALSE, Instruction, TRUE};

use crate::{
    Vec,
    api::ExecutionOptions,
    vm::{Code, ExecutionError, Stack},
};

/// Saved caller state, one per active call.
#[derive(Debug, Clone, Copy)]
struct CallRecord {
    return_pc: usize,
    saved_fp: isize,
}

/// Outcome of running a program to `Halt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Values emitted by `Out`, in order.
    pub output: Vec<i32>,
    /// Number of instructions executed.
    pub steps: usize,
    /// Deepest nesting of active calls, including the call to `main`.
    pub max_call_depth: usize,
    /// Largest operand stack length, frames included.
    pub max_stack_len: usize,
}

/// Reference interpreter for translated programs.
///
/// The frame pointer indexes the last parameter, so `Lds(0)` is the last
/// argument, negative offsets walk back to the first argument and positive
/// offsets address the locals pushed by `Alloc`. Return addresses live on a
/// separate call stack, which keeps frame offsets independent of the calling
/// convention.
pub struct VM<'c, 'i> {
    code: &'c Code,
    input: core::slice::Iter<'i, i32>,
    options: ExecutionOptions,
    pc: usize,
    fp: isize,
    stack: Stack<i32>,
    calls: Vec<CallRecord>,
    output: Vec<i32>,
    steps: usize,
    max_call_depth: usize,
}

impl<'c, 'i> VM<'c, 'i> {
    pub fn new(code: &'c Code, input: &'i [i32], options: ExecutionOptions) -> Self {
        VM {
            code,
            input: input.iter(),
            options,
            pc: 0,
            fp: -1,
            stack: Stack::new(),
            calls: Vec::new(),
            output: Vec::new(),
            steps: 0,
            max_call_depth: 0,
        }
    }

    /// Run `code` from address 0 until `Halt`.
    pub fn execute(
        code: &Code,
        input: &[i32],
        options: ExecutionOptions,
    ) -> Result<Execution, ExecutionError> {
        VM::new(code, input, options).run()
    }

    pub fn run(mut self) -> Result<Execution, ExecutionError> {
        loop {
            let pc = self.pc;
            let instruction = *self
                .code
                .instructions
                .get(pc)
                .ok_or(ExecutionError::InvalidAddress {
                    pc,
                    target: pc as i64,
                })?;

            self.steps += 1;
            if let Some(max_steps) = self.options.max_steps {
                if self.steps > max_steps {
                    return Err(ExecutionError::StepLimitExceeded { max_steps });
                }
            }
            self.pc += 1;

            use Instruction::*;
            match instruction {
                Ldi(value) => self.stack.push(value),
                Lds(offset) => {
                    let index = self.frame_index(offset)?;
                    let value = self
                        .stack
                        .get(index)
                        .ok_or(ExecutionError::FrameOutOfBounds { pc, offset })?;
                    self.stack.push(value);
                }
                Sts(offset) => {
                    let value = self.pop()?;
                    let index = self.frame_index(offset)?;
                    if !self.stack.set(index, value) {
                        return Err(ExecutionError::FrameOutOfBounds { pc, offset });
                    }
                }
                Alloc(cells) => {
                    if cells < 0 {
                        return Err(ExecutionError::InvalidAlloc { pc, cells });
                    }
                    for _ in 0..cells {
                        self.stack.push(0);
                    }
                }
                Call(argc) => {
                    let target = self.pop()?;
                    let target = self.address(target)?;
                    if argc < 0 || self.stack.len() < argc as usize {
                        return Err(ExecutionError::StackUnderflow { pc });
                    }
                    if self.calls.len() >= self.options.max_call_depth {
                        return Err(ExecutionError::StackOverflow {
                            depth: self.calls.len() + 1,
                            max_depth: self.options.max_call_depth,
                        });
                    }
                    self.calls.push(CallRecord {
                        return_pc: self.pc,
                        saved_fp: self.fp,
                    });
                    self.max_call_depth = self.max_call_depth.max(self.calls.len());
                    self.fp = self.stack.len() as isize - 1;
                    self.pc = target;
                }
                Return(cells) => {
                    let value = self.pop()?;
                    if cells < 0 || !self.stack.pop_n(cells as usize) {
                        return Err(ExecutionError::StackUnderflow { pc });
                    }
                    self.stack.push(value);
                    let record = self
                        .calls
                        .pop()
                        .ok_or(ExecutionError::ReturnWithoutCall { pc })?;
                    self.pc = record.return_pc;
                    self.fp = record.saved_fp;
                }
                Jump(target) => {
                    if self.pop()? != FALSE {
                        self.pc = self.address(target)?;
                    }
                }
                Nop => {}
                Add => self.binary(|a, b| Ok(a.wrapping_add(b)))?,
                Sub => self.binary(|a, b| Ok(a.wrapping_sub(b)))?,
                Mul => self.binary(|a, b| Ok(a.wrapping_mul(b)))?,
                Div => self.binary(|a, b| {
                    a.checked_div(b)
                        .or_else(|| (b == -1).then(|| a.wrapping_neg()))
                        .ok_or(ExecutionError::DivisionByZero { pc })
                })?,
                Mod => self.binary(|a, b| {
                    if b == 0 {
                        Err(ExecutionError::DivisionByZero { pc })
                    } else {
                        Ok(a.wrapping_rem(b))
                    }
                })?,
                And => self.binary(|a, b| Ok(a & b))?,
                Or => self.binary(|a, b| Ok(a | b))?,
                Not => {
                    let value = self.pop()?;
                    self.stack.push(!value);
                }
                Shl(amount) => {
                    let value = self.pop()?;
                    self.stack.push(value.wrapping_shl(amount as u32));
                }
                Eq => self.binary(|a, b| Ok(truth(a == b)))?,
                Lt => self.binary(|a, b| Ok(truth(a < b)))?,
                Le => self.binary(|a, b| Ok(truth(a <= b)))?,
                Halt => {
                    return Ok(Execution {
                        output: self.output,
                        steps: self.steps,
                        max_call_depth: self.max_call_depth,
                        max_stack_len: self.stack.high_water_mark(),
                    });
                }
                In => {
                    let value = *self
                        .input
                        .next()
                        .ok_or(ExecutionError::InputExhausted { pc })?;
                    self.stack.push(value);
                }
                Out => {
                    let value = self.pop()?;
                    self.output.push(value);
                }
            }
        }
    }

    fn pop(&mut self) -> Result<i32, ExecutionError> {
        self.stack.pop().ok_or(ExecutionError::StackUnderflow {
            pc: self.pc.saturating_sub(1),
        })
    }

    /// Pops `top` then `second` and pushes `op(top, second)`.
    fn binary<F>(&mut self, op: F) -> Result<(), ExecutionError>
    where
        F: FnOnce(i32, i32) -> Result<i32, ExecutionError>,
    {
        let top = self.pop()?;
        let second = self.pop()?;
        self.stack.push(op(top, second)?);
        Ok(())
    }

    fn frame_index(&self, offset: i32) -> Result<usize, ExecutionError> {
        let index = self.fp + offset as isize;
        usize::try_from(index).map_err(|_| ExecutionError::FrameOutOfBounds {
            pc: self.pc.saturating_sub(1),
            offset,
        })
    }

    fn address(&self, target: i32) -> Result<usize, ExecutionError> {
        usize::try_from(target)
            .ok()
            .filter(|&addr| addr < self.code.len())
            .ok_or(ExecutionError::InvalidAddress {
                pc: self.pc.saturating_sub(1),
                target: target as i64,
            })
    }
}

fn truth(b: bool) -> i32 {
    if b { TRUE } else { FALSE }
}

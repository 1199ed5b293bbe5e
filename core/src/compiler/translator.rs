//! Translator implementation.

use hashbrown::{HashMap, HashSet};

use crate::{
    ToString, Vec,
    ast::{BinaryOp, BoolOp, ComparisonOp, Cond, Expr, Function, Program, Stmt, UnaryOp},
    compiler::{CompileError, MainError},
    vm::{Code, Instruction},
};

/// Entry point and arity of a translated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FunctionDesc {
    entry: usize,
    arity: usize,
}

/// A call site whose callee address is not known yet.
#[derive(Debug, Clone, Copy)]
struct CallPatch<'a> {
    callee: &'a str,
    arity: usize,
    slot: usize,
}

/// Single-pass translator from a [`Program`] to a flat [`Code`].
///
/// All state lives for one translation. The buffer is only handed out by
/// [`translate`], and only when every placeholder has been patched.
struct Translator<'a> {
    /// Instruction buffer. Index = absolute address.
    instructions: Vec<Instruction>,

    /// Frame offsets of the current function's parameters and locals.
    ///
    /// Locals get 1, 2, ... in declaration order; parameter `i` of `p` gets
    /// `i - (p - 1)`, so the last parameter sits at offset 0.
    locals: HashMap<&'a str, i32>,

    /// Parameters plus locals of the current function, the operand of every
    /// `Return` it contains.
    frame_cells: i32,

    /// Name of the function being translated (for error messages).
    current_function: &'a str,

    /// Functions emitted so far.
    functions: HashMap<&'a str, FunctionDesc>,

    /// Call sites to resolve once every function is known.
    patches: Vec<CallPatch<'a>>,

    /// Placeholders emitted but not patched yet.
    open_placeholders: HashSet<usize>,
}

/// Translate `program` into a fully resolved flat program.
pub fn translate(program: &Program<'_>) -> Result<Code, CompileError> {
    let mut translator = Translator::new();
    translator.program(program)?;
    Ok(translator.finalize())
}

impl<'a> Translator<'a> {
    fn new() -> Self {
        Self {
            instructions: Vec::new(),
            locals: HashMap::new(),
            frame_cells: 0,
            current_function: "",
            functions: HashMap::new(),
            patches: Vec::new(),
            open_placeholders: HashSet::new(),
        }
    }

    /// Finalize translation and return the program.
    fn finalize(self) -> Code {
        debug_assert!(
            self.open_placeholders.is_empty(),
            "Unpatched placeholders at {:?}",
            self.open_placeholders
        );
        Code::new(self.instructions)
    }

    // === Instruction Emission ===

    fn emit(&mut self, instruction: Instruction) -> usize {
        let index = self.instructions.len();
        self.instructions.push(instruction);
        index
    }

    /// Get the current instruction index (for use as a jump label).
    fn label(&self) -> usize {
        self.instructions.len()
    }

    /// Reserve one instruction slot to be overwritten by `patch`.
    fn placeholder(&mut self) -> usize {
        let index = self.emit(Instruction::Nop);
        self.open_placeholders.insert(index);
        index
    }

    fn patch(&mut self, placeholder: usize, instruction: Instruction) {
        let was_open = self.open_placeholders.remove(&placeholder);
        debug_assert!(was_open, "Slot {} is not an open placeholder", placeholder);
        self.instructions[placeholder] = instruction;
    }

    /// Patch `placeholder` with a jump to the current end of the buffer.
    fn patch_jump_here(&mut self, placeholder: usize) {
        let target = self.label();
        self.patch(placeholder, Instruction::Jump(address(target)));
    }

    fn push_true(&mut self) {
        for instruction in Instruction::PUSH_TRUE {
            self.emit(instruction);
        }
    }

    // === Local Variable Management ===

    fn declare(&mut self, name: &'a str, offset: i32) -> Result<(), CompileError> {
        if self.locals.insert(name, offset).is_some() {
            return Err(CompileError::DuplicateDeclaration {
                name: name.to_string(),
                function: self.current_function.to_string(),
            });
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<i32, CompileError> {
        self.locals
            .get(name)
            .copied()
            .ok_or_else(|| CompileError::UndeclaredVariable {
                name: name.to_string(),
                function: self.current_function.to_string(),
            })
    }

    // === Program & Functions ===

    /// Translate a whole program: startup prologue, every function in source
    /// order, then call-site resolution.
    fn program(&mut self, program: &Program<'a>) -> Result<(), CompileError> {
        // Ldi(main), Call(0), Halt
        let main_slot = self.placeholder();
        self.emit(Instruction::Call(0));
        self.emit(Instruction::Halt);

        let mut has_main = false;
        for function in program.functions {
            let entry = self.label();
            let desc = FunctionDesc {
                entry,
                arity: function.params.len(),
            };
            if self.functions.insert(function.name, desc).is_some() {
                return Err(CompileError::DuplicateFunction {
                    name: function.name.to_string(),
                });
            }
            if function.name == "main" {
                if !function.params.is_empty() {
                    return Err(MainError::HasParameters {
                        count: function.params.len(),
                    }
                    .into());
                }
                self.patch(main_slot, Instruction::Ldi(address(entry)));
                has_main = true;
            }
            self.function(function)?;
        }

        if !has_main {
            return Err(MainError::Missing.into());
        }
        self.resolve_calls()
    }

    fn function(&mut self, function: &Function<'a>) -> Result<(), CompileError> {
        self.locals.clear();
        self.current_function = function.name;
        let entry = self.label();

        // Zero-size marker: the tail-call rewriter finds functions by their
        // leading Alloc run.
        self.emit(Instruction::Alloc(0));

        let mut next_offset = 1;
        for group in function.declarations {
            for &name in group.iter() {
                self.declare(name, next_offset)?;
                next_offset += 1;
            }
            self.emit(Instruction::Alloc(group.len() as i32));
        }

        let param_count = function.params.len() as i32;
        for (i, &name) in function.params.iter().enumerate() {
            self.declare(name, i as i32 - (param_count - 1))?;
        }

        self.frame_cells = param_count + (next_offset - 1);
        tracing::debug!(
            function = function.name,
            entry,
            frame_cells = self.frame_cells,
            "translating function"
        );

        for stmt in function.body {
            self.stmt(stmt)?;
        }
        Ok(())
    }

    /// Overwrite every callee placeholder with the callee's entry address.
    fn resolve_calls(&mut self) -> Result<(), CompileError> {
        for patch in core::mem::take(&mut self.patches) {
            let desc = *self.functions.get(patch.callee).ok_or_else(|| {
                CompileError::UnknownFunction {
                    name: patch.callee.to_string(),
                }
            })?;
            if desc.arity != patch.arity {
                return Err(CompileError::ArityMismatch {
                    name: patch.callee.to_string(),
                    expected: desc.arity,
                    found: patch.arity,
                });
            }
            tracing::trace!(
                callee = patch.callee,
                slot = patch.slot,
                entry = desc.entry,
                "resolved call"
            );
            self.patch(patch.slot, Instruction::Ldi(address(desc.entry)));
        }
        Ok(())
    }

    // === Statements ===

    fn stmt(&mut self, stmt: &Stmt<'a>) -> Result<(), CompileError> {
        match *stmt {
            Stmt::Read(name) => {
                let offset = self.lookup(name)?;
                self.emit(Instruction::In);
                self.emit(Instruction::Sts(offset));
            }

            Stmt::Write(expr) => {
                self.expr(expr)?;
                self.emit(Instruction::Out);
            }

            Stmt::Assign { name, expr } => {
                self.expr(expr)?;
                let offset = self.lookup(name)?;
                self.emit(Instruction::Sts(offset));
            }

            Stmt::Block(stmts) => {
                for stmt in stmts {
                    self.stmt(stmt)?;
                }
            }

            // The else branch is emitted first so the condition jumps
            // straight to the then branch.
            Stmt::If {
                cond,
                then_branch,
                else_branch: Some(else_branch),
            } => {
                self.cond(cond)?;
                let then_jump = self.placeholder();
                self.stmt(else_branch)?;
                self.push_true();
                let end_jump = self.placeholder();
                self.patch_jump_here(then_jump);
                self.stmt(then_branch)?;
                self.patch_jump_here(end_jump);
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch: None,
            } => {
                self.cond(cond)?;
                self.emit(Instruction::Not);
                let end_jump = self.placeholder();
                self.stmt(then_branch)?;
                self.patch_jump_here(end_jump);
            }

            Stmt::While { cond, body } => {
                let loop_start = self.label();
                self.cond(cond)?;
                self.emit(Instruction::Not);
                let end_jump = self.placeholder();
                self.stmt(body)?;
                self.push_true();
                self.emit(Instruction::Jump(address(loop_start)));
                self.patch_jump_here(end_jump);
            }

            Stmt::Return(expr) => {
                self.expr(expr)?;
                self.emit(Instruction::Return(self.frame_cells));
            }

            Stmt::Empty => {}
        }
        Ok(())
    }

    // === Expressions ===

    fn expr(&mut self, expr: &Expr<'a>) -> Result<(), CompileError> {
        match *expr {
            Expr::Number(value) => self.number(value),

            Expr::Var(name) => {
                let offset = self.lookup(name)?;
                self.emit(Instruction::Lds(offset));
            }

            Expr::Unary {
                op: UnaryOp::Neg,
                expr,
            } => {
                // 0 - expr
                self.expr(expr)?;
                self.emit(Instruction::Ldi(0));
                self.emit(Instruction::Sub);
            }

            Expr::Binary { op, left, right } => {
                self.expr(right)?;
                self.expr(left)?;
                self.emit(match op {
                    BinaryOp::Add => Instruction::Add,
                    BinaryOp::Sub => Instruction::Sub,
                    BinaryOp::Mul => Instruction::Mul,
                    BinaryOp::Div => Instruction::Div,
                    BinaryOp::Mod => Instruction::Mod,
                });
            }

            Expr::Call { callee, args } => {
                for arg in args {
                    self.expr(arg)?;
                }
                let slot = self.placeholder();
                self.patches.push(CallPatch {
                    callee,
                    arity: args.len(),
                    slot,
                });
                // Reserved for the tail-call rewriter.
                for _ in 0..args.len() {
                    self.emit(Instruction::Nop);
                }
                self.emit(Instruction::Call(args.len() as i32));
            }
        }
        Ok(())
    }

    /// Literals wider than 16 bits are assembled from two halves.
    fn number(&mut self, value: i32) {
        self.emit(Instruction::Ldi(value & 0xffff));
        if !(0..=0xffff).contains(&value) {
            self.emit(Instruction::Ldi(((value as u32) >> 16) as i32));
            self.emit(Instruction::Shl(16));
            self.emit(Instruction::Or);
        }
    }

    // === Conditions ===

    fn cond(&mut self, cond: &Cond<'a>) -> Result<(), CompileError> {
        match *cond {
            Cond::True => self.push_true(),

            Cond::False => {
                self.emit(Instruction::Ldi(0));
            }

            Cond::Comparison { op, left, right } => {
                self.expr(right)?;
                self.expr(left)?;
                let (instruction, negate) = match op {
                    ComparisonOp::Eq => (Instruction::Eq, false),
                    ComparisonOp::Neq => (Instruction::Eq, true),
                    ComparisonOp::Lt => (Instruction::Lt, false),
                    ComparisonOp::Le => (Instruction::Le, false),
                    ComparisonOp::Gt => (Instruction::Le, true),
                    ComparisonOp::Ge => (Instruction::Lt, true),
                };
                self.emit(instruction);
                if negate {
                    self.emit(Instruction::Not);
                }
            }

            Cond::Not(cond) => {
                self.cond(cond)?;
                self.emit(Instruction::Not);
            }

            // Both operands are always evaluated.
            Cond::Binary { op, left, right } => {
                self.cond(right)?;
                self.cond(left)?;
                self.emit(match op {
                    BoolOp::And => Instruction::And,
                    BoolOp::Or => Instruction::Or,
                });
            }
        }
        Ok(())
    }
}

/// Addresses are stored as instruction immediates.
fn address(index: usize) -> i32 {
    index as i32
}

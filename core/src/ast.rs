//! Abstract syntax tree consumed by the translator.
//!
//! The tree is arena-allocated: nodes live in a [`Bump`] and refer to each
//! other through `&'a` references. Every node kind is a variant of a closed
//! enum, so the translator handles them with exhaustive matches.
//!
//! The language has one flat scope per function (parameters plus the
//! declaration groups at the top of the function), statements, integer
//! expressions and boolean conditions. Conditions are a separate node type
//! because they only appear as the test of `if` and `while`.

use bumpalo::Bump;

/// A whole translation unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'a> {
    pub functions: &'a [Function<'a>],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Function<'a> {
    pub name: &'a str,
    pub params: &'a [&'a str],
    /// Declaration groups, e.g. `var a, b; var c;` is `[[a, b], [c]]`.
    pub declarations: &'a [&'a [&'a str]],
    pub body: &'a [Stmt<'a>],
}

impl<'a> Function<'a> {
    /// Number of declared locals across all groups.
    pub fn local_count(&self) -> usize {
        self.declarations.iter().map(|group| group.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Integer-valued expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'a> {
    Number(i32),
    Var(&'a str),
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Call {
        callee: &'a str,
        args: &'a [&'a Expr<'a>],
    },
}

/// Boolean-valued condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cond<'a> {
    True,
    False,
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Not(&'a Cond<'a>),
    Binary {
        op: BoolOp,
        left: &'a Cond<'a>,
        right: &'a Cond<'a>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'a> {
    Read(&'a str),
    Write(&'a Expr<'a>),
    Assign {
        name: &'a str,
        expr: &'a Expr<'a>,
    },
    Block(&'a [Stmt<'a>]),
    If {
        cond: &'a Cond<'a>,
        then_branch: &'a Stmt<'a>,
        else_branch: Option<&'a Stmt<'a>>,
    },
    While {
        cond: &'a Cond<'a>,
        body: &'a Stmt<'a>,
    },
    Return(&'a Expr<'a>),
    Empty,
}

/// Arena-backed constructor for AST nodes.
///
/// Hosts without a parser (and tests) use this to assemble trees; all names
/// and slices are copied into the arena.
///
/// # Example
///
/// ```ignore
/// use bumpalo::Bump;
/// use stackc_core::ast::{AstBuilder, BinaryOp};
///
/// let arena = Bump::new();
/// let b = AstBuilder::new(&arena);
/// let sum = b.binary(BinaryOp::Add, b.num(1), b.num(2));
/// let main = b.function("main", &[], &[], &[b.write(sum)]);
/// let program = b.program(&[main]);
/// ```
#[derive(Clone, Copy)]
pub struct AstBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    fn name(&self, name: &str) -> &'a str {
        self.arena.alloc_str(name)
    }

    fn names(&self, names: &[&str]) -> &'a [&'a str] {
        self.arena
            .alloc_slice_fill_iter(names.iter().map(|name| self.name(name)))
    }

    // === Expressions ===

    pub fn num(&self, value: i32) -> &'a Expr<'a> {
        self.arena.alloc(Expr::Number(value))
    }

    pub fn var(&self, name: &str) -> &'a Expr<'a> {
        self.arena.alloc(Expr::Var(self.name(name)))
    }

    pub fn neg(&self, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(Expr::Unary {
            op: UnaryOp::Neg,
            expr,
        })
    }

    pub fn binary(&self, op: BinaryOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(Expr::Binary { op, left, right })
    }

    pub fn call(&self, callee: &str, args: &[&'a Expr<'a>]) -> &'a Expr<'a> {
        self.arena.alloc(Expr::Call {
            callee: self.name(callee),
            args: self.arena.alloc_slice_copy(args),
        })
    }

    // === Conditions ===

    pub fn truth(&self, value: bool) -> &'a Cond<'a> {
        self.arena.alloc(if value { Cond::True } else { Cond::False })
    }

    pub fn compare(
        &self,
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    ) -> &'a Cond<'a> {
        self.arena.alloc(Cond::Comparison { op, left, right })
    }

    pub fn not(&self, cond: &'a Cond<'a>) -> &'a Cond<'a> {
        self.arena.alloc(Cond::Not(cond))
    }

    pub fn logic(&self, op: BoolOp, left: &'a Cond<'a>, right: &'a Cond<'a>) -> &'a Cond<'a> {
        self.arena.alloc(Cond::Binary { op, left, right })
    }

    // === Statements ===

    pub fn read(&self, name: &str) -> Stmt<'a> {
        Stmt::Read(self.name(name))
    }

    pub fn write(&self, expr: &'a Expr<'a>) -> Stmt<'a> {
        Stmt::Write(expr)
    }

    pub fn assign(&self, name: &str, expr: &'a Expr<'a>) -> Stmt<'a> {
        Stmt::Assign {
            name: self.name(name),
            expr,
        }
    }

    pub fn block(&self, stmts: &[Stmt<'a>]) -> Stmt<'a> {
        Stmt::Block(self.arena.alloc_slice_copy(stmts))
    }

    pub fn if_then(&self, cond: &'a Cond<'a>, then_branch: Stmt<'a>) -> Stmt<'a> {
        Stmt::If {
            cond,
            then_branch: self.arena.alloc(then_branch),
            else_branch: None,
        }
    }

    pub fn if_else(
        &self,
        cond: &'a Cond<'a>,
        then_branch: Stmt<'a>,
        else_branch: Stmt<'a>,
    ) -> Stmt<'a> {
        Stmt::If {
            cond,
            then_branch: self.arena.alloc(then_branch),
            else_branch: Some(self.arena.alloc(else_branch)),
        }
    }

    pub fn while_loop(&self, cond: &'a Cond<'a>, body: Stmt<'a>) -> Stmt<'a> {
        Stmt::While {
            cond,
            body: self.arena.alloc(body),
        }
    }

    pub fn ret(&self, expr: &'a Expr<'a>) -> Stmt<'a> {
        Stmt::Return(expr)
    }

    pub fn empty(&self) -> Stmt<'a> {
        Stmt::Empty
    }

    // === Functions ===

    pub fn function(
        &self,
        name: &str,
        params: &[&str],
        declarations: &[&[&str]],
        body: &[Stmt<'a>],
    ) -> Function<'a> {
        Function {
            name: self.name(name),
            params: self.names(params),
            declarations: self
                .arena
                .alloc_slice_fill_iter(declarations.iter().map(|group| self.names(group))),
            body: self.arena.alloc_slice_copy(body),
        }
    }

    pub fn program(&self, functions: &[Function<'a>]) -> Program<'a> {
        Program {
            functions: self.arena.alloc_slice_copy(functions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_copies_names() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let owned = crate::String::from("counter");
        let f = b.function("f", &["n"], &[&[owned.as_str(), "x"], &["y"]], &[]);
        drop(owned);
        assert_eq!(f.declarations[0], &["counter", "x"]);
        assert_eq!(f.local_count(), 3);
        assert_eq!(f.params, &["n"]);
    }

    #[test]
    fn test_builder_nodes() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let call = b.call("f", &[b.num(1), b.var("x")]);
        assert_eq!(
            *call,
            Expr::Call {
                callee: "f",
                args: &[&Expr::Number(1), &Expr::Var("x")],
            }
        );
        assert_eq!(*b.truth(false), Cond::False);
        assert_eq!(b.empty(), Stmt::Empty);
    }
}

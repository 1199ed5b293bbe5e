#![allow(dead_code, unused_macros)]

use pretty_assertions::assert_eq;
use stackc::ast::{AstBuilder, BinaryOp, ComparisonOp, Function, Program};
use stackc::{CompilationOptions, Execution, ExecutionOptions, compile, run};

/// Declares a test that compiles a program with and without tail-call
/// rewriting, runs both, and checks the output.
///
/// ```ignore
/// test_case!(
///     name,
///     program: |b| [b.function("main", &[], &[], &[...])],
///     input: &[1, 2],
///     output: &[3],
/// );
/// ```
///
/// The `error:` form expects compilation to fail with a matching
/// `CompileError`.
macro_rules! test_case {
    (
        $name:ident,
        program: |$b:ident| $functions:expr,
        input: $input:expr,
        output: $output:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let arena = bumpalo::Bump::new();
            let $b = stackc::ast::AstBuilder::new(&arena);
            let program = $b.program(&$functions);
            crate::cases::assert_runs(&program, $input, $output);
        }
    };
    (
        $name:ident,
        program: |$b:ident| $functions:expr,
        error: $error:pat $(,)?
    ) => {
        #[test]
        fn $name() {
            let arena = bumpalo::Bump::new();
            let $b = stackc::ast::AstBuilder::new(&arena);
            let program = $b.program(&$functions);
            let result = stackc::compile(&program, &stackc::CompilationOptions::default());
            assert!(
                matches!(result, Err(stackc::Error::Compilation($error))),
                "unexpected result: {:?}",
                result
            );
        }
    };
}

/// Run `program` both ways and check that each produces `expected`.
pub fn assert_runs(program: &Program<'_>, input: &[i32], expected: &[i32]) -> [Execution; 2] {
    let plain = compile(program, &CompilationOptions { tail_calls: false }).unwrap();
    let optimized = compile(program, &CompilationOptions::default()).unwrap();
    assert_eq!(optimized.len(), plain.len());

    let plain = run(&plain, input, ExecutionOptions::default()).unwrap();
    let optimized = run(&optimized, input, ExecutionOptions::default()).unwrap();
    assert_eq!(plain.output, expected);
    assert_eq!(optimized.output, expected);
    [plain, optimized]
}

// ============================================================================
// Shared programs
// ============================================================================

/// main() { <body> return 0; }
pub fn main_fn<'a>(
    b: &AstBuilder<'a>,
    declarations: &[&[&str]],
    body: &[stackc::ast::Stmt<'a>],
) -> Function<'a> {
    let mut stmts = body.to_vec();
    stmts.push(b.ret(b.num(0)));
    b.function("main", &[], declarations, &stmts)
}

/// fact(n, acc) { if (n <= 1) return acc; else return fact(n - 1, acc * n); }
pub fn tail_factorial<'a>(b: &AstBuilder<'a>) -> Function<'a> {
    b.function(
        "fact",
        &["n", "acc"],
        &[],
        &[b.if_else(
            b.compare(ComparisonOp::Le, b.var("n"), b.num(1)),
            b.ret(b.var("acc")),
            b.ret(b.call(
                "fact",
                &[
                    b.binary(BinaryOp::Sub, b.var("n"), b.num(1)),
                    b.binary(BinaryOp::Mul, b.var("acc"), b.var("n")),
                ],
            )),
        )],
    )
}

/// sum(n, acc) { if (n == 0) return acc; else return sum(n - 1, acc + n); }
pub fn tail_sum<'a>(b: &AstBuilder<'a>) -> Function<'a> {
    b.function(
        "sum",
        &["n", "acc"],
        &[],
        &[b.if_else(
            b.compare(ComparisonOp::Eq, b.var("n"), b.num(0)),
            b.ret(b.var("acc")),
            b.ret(b.call(
                "sum",
                &[
                    b.binary(BinaryOp::Sub, b.var("n"), b.num(1)),
                    b.binary(BinaryOp::Add, b.var("acc"), b.var("n")),
                ],
            )),
        )],
    )
}

/// fib(n) { if (n < 2) return n; else return fib(n - 1) + fib(n - 2); }
pub fn fibonacci<'a>(b: &AstBuilder<'a>) -> Function<'a> {
    b.function(
        "fib",
        &["n"],
        &[],
        &[b.if_else(
            b.compare(ComparisonOp::Lt, b.var("n"), b.num(2)),
            b.ret(b.var("n")),
            b.ret(b.binary(
                BinaryOp::Add,
                b.call("fib", &[b.binary(BinaryOp::Sub, b.var("n"), b.num(1))]),
                b.call("fib", &[b.binary(BinaryOp::Sub, b.var("n"), b.num(2))]),
            )),
        )],
    )
}

/// gcd(a, b) { if (b == 0) return a; else return gcd(b, a % b); }
pub fn gcd<'a>(b: &AstBuilder<'a>) -> Function<'a> {
    b.function(
        "gcd",
        &["a", "b"],
        &[],
        &[b.if_else(
            b.compare(ComparisonOp::Eq, b.var("b"), b.num(0)),
            b.ret(b.var("a")),
            b.ret(b.call(
                "gcd",
                &[b.var("b"), b.binary(BinaryOp::Mod, b.var("a"), b.var("b"))],
            )),
        )],
    )
}

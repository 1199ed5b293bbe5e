#[macro_use]
mod cases;

use cases::main_fn;
use stackc::ast::BinaryOp;

test_case!(
    write_literal,
    program: |b| [main_fn(&b, &[], &[b.write(b.num(42))])],
    input: &[],
    output: &[42],
);

test_case!(
    literals_wider_than_sixteen_bits,
    program: |b| [main_fn(
        &b,
        &[],
        &[
            b.write(b.num(0xffff)),
            b.write(b.num(0x10000)),
            b.write(b.num(100_000)),
            b.write(b.num(-1)),
            b.write(b.num(-70_000)),
            b.write(b.num(i32::MAX)),
            b.write(b.num(i32::MIN)),
        ],
    )],
    input: &[],
    output: &[0xffff, 0x10000, 100_000, -1, -70_000, i32::MAX, i32::MIN],
);

test_case!(
    negation,
    program: |b| [main_fn(
        &b,
        &[],
        &[b.write(b.neg(b.num(7))), b.write(b.neg(b.neg(b.num(7))))],
    )],
    input: &[],
    output: &[-7, 7],
);

test_case!(
    non_commutative_operators,
    program: |b| [main_fn(
        &b,
        &[],
        &[
            b.write(b.binary(BinaryOp::Sub, b.num(10), b.num(3))),
            b.write(b.binary(BinaryOp::Div, b.num(17), b.num(5))),
            b.write(b.binary(BinaryOp::Mod, b.num(17), b.num(5))),
            b.write(b.binary(BinaryOp::Div, b.num(-17), b.num(5))),
            b.write(b.binary(BinaryOp::Mod, b.num(-17), b.num(5))),
        ],
    )],
    input: &[],
    output: &[7, 3, 2, -3, -2],
);

test_case!(
    nested_expressions,
    // (a - b) * (a + b) - -c
    program: |b| [main_fn(
        &b,
        &[&["a", "b", "c"]],
        &[
            b.read("a"),
            b.read("b"),
            b.read("c"),
            b.write(b.binary(
                BinaryOp::Sub,
                b.binary(
                    BinaryOp::Mul,
                    b.binary(BinaryOp::Sub, b.var("a"), b.var("b")),
                    b.binary(BinaryOp::Add, b.var("a"), b.var("b")),
                ),
                b.neg(b.var("c")),
            )),
        ],
    )],
    input: &[9, 4, 5],
    output: &[70],
);

test_case!(
    assignment_and_locals,
    program: |b| [main_fn(
        &b,
        &[&["x"], &["y", "z"]],
        &[
            b.assign("x", b.num(6)),
            b.assign("y", b.binary(BinaryOp::Mul, b.var("x"), b.num(7))),
            b.assign("z", b.binary(BinaryOp::Sub, b.var("y"), b.var("x"))),
            b.write(b.var("y")),
            b.write(b.var("z")),
        ],
    )],
    input: &[],
    output: &[42, 36],
);

test_case!(
    locals_start_at_zero,
    program: |b| [main_fn(&b, &[&["x"]], &[b.write(b.var("x"))])],
    input: &[],
    output: &[0],
);

test_case!(
    read_echoes_input,
    program: |b| [main_fn(
        &b,
        &[&["x"]],
        &[b.read("x"), b.write(b.var("x")), b.read("x"), b.write(b.var("x"))],
    )],
    input: &[-3, 100_000],
    output: &[-3, 100_000],
);

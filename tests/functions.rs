#[macro_use]
mod cases;

use cases::{fibonacci, gcd, main_fn};
use stackc::ast::BinaryOp;

test_case!(
    parameters_keep_their_order,
    // diff(a, b) { return a - b; }
    program: |b| [
        main_fn(&b, &[], &[b.write(b.call("diff", &[b.num(10), b.num(3)]))]),
        b.function(
            "diff",
            &["a", "b"],
            &[],
            &[b.ret(b.binary(BinaryOp::Sub, b.var("a"), b.var("b")))],
        ),
    ],
    input: &[],
    output: &[7],
);

test_case!(
    three_parameters_and_locals,
    // mix(a, b, c) { var x, y; var z; x = a * 100; y = b * 10; z = c; return x + y + z; }
    program: |b| [
        main_fn(&b, &[], &[b.write(b.call("mix", &[b.num(1), b.num(2), b.num(3)]))]),
        b.function(
            "mix",
            &["a", "b", "c"],
            &[&["x", "y"], &["z"]],
            &[
                b.assign("x", b.binary(BinaryOp::Mul, b.var("a"), b.num(100))),
                b.assign("y", b.binary(BinaryOp::Mul, b.var("b"), b.num(10))),
                b.assign("z", b.var("c")),
                b.ret(b.binary(
                    BinaryOp::Add,
                    b.binary(BinaryOp::Add, b.var("x"), b.var("y")),
                    b.var("z"),
                )),
            ],
        ),
    ],
    input: &[],
    output: &[123],
);

test_case!(
    assignment_to_parameter_is_local_to_call,
    // bump(n) { n = n + 1; return n; }
    program: |b| [
        main_fn(
            &b,
            &[&["v"]],
            &[
                b.assign("v", b.num(5)),
                b.write(b.call("bump", &[b.var("v")])),
                b.write(b.var("v")),
            ],
        ),
        b.function(
            "bump",
            &["n"],
            &[],
            &[
                b.assign("n", b.binary(BinaryOp::Add, b.var("n"), b.num(1))),
                b.ret(b.var("n")),
            ],
        ),
    ],
    input: &[],
    output: &[6, 5],
);

test_case!(
    calls_in_arguments,
    // sq(x) { return x * x; }   write sq(sq(3)) + sq(2);
    program: |b| [
        main_fn(
            &b,
            &[],
            &[b.write(b.binary(
                BinaryOp::Add,
                b.call("sq", &[b.call("sq", &[b.num(3)])]),
                b.call("sq", &[b.num(2)]),
            ))],
        ),
        b.function(
            "sq",
            &["x"],
            &[],
            &[b.ret(b.binary(BinaryOp::Mul, b.var("x"), b.var("x")))],
        ),
    ],
    input: &[],
    output: &[85],
);

test_case!(
    function_defined_before_main,
    program: |b| [
        b.function("seven", &[], &[], &[b.ret(b.num(7))]),
        main_fn(&b, &[], &[b.write(b.call("seven", &[]))]),
    ],
    input: &[],
    output: &[7],
);

test_case!(
    non_tail_recursion,
    program: |b| [
        main_fn(
            &b,
            &[&["n"]],
            &[b.read("n"), b.write(b.call("fib", &[b.var("n")]))],
        ),
        fibonacci(&b),
    ],
    input: &[15],
    output: &[610],
);

test_case!(
    euclid,
    program: |b| [
        main_fn(
            &b,
            &[],
            &[
                b.write(b.call("gcd", &[b.num(1071), b.num(462)])),
                b.write(b.call("gcd", &[b.num(17), b.num(5)])),
            ],
        ),
        gcd(&b),
    ],
    input: &[],
    output: &[21, 1],
);

test_case!(
    main_return_value_is_discarded,
    program: |b| [b.function("main", &[], &[], &[b.write(b.num(1)), b.ret(b.num(99))])],
    input: &[],
    output: &[1],
);

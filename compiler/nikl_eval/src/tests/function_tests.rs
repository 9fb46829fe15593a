use super::{error, output, run_with_depth};
use crate::{ErrorClass, EvalErrorKind};
use pretty_assertions::assert_eq;

#[test]
fn closures_keep_their_own_state() {
    let source = r#"
fn make_counter() {
    let count = 0
    fn inc() {
        count = count + 1
        return count
    }
    return inc
}
let c = make_counter()
c()
c()
print(c())
let d = make_counter()
print(d())
"#;
    assert_eq!(output(source), "3\n1\n");
}

#[test]
fn free_names_resolve_at_definition_site() {
    let source = r#"
let x = "global"
fn outer() {
    let x = "outer"
    fn inner() {
        return x
    }
    return inner
}
fn caller(f) {
    let x = "caller"
    return f()
}
print(caller(outer()))
"#;
    assert_eq!(output(source), "outer\n");
}

#[test]
fn captured_scope_is_shared_not_copied() {
    let source = r#"
fn f() {
    return y
}
let y = 7
print(f())
y = 8
print(f())
"#;
    assert_eq!(output(source), "7\n8\n");
}

#[test]
fn recursion() {
    let source = r#"
fn fib(n) {
    if n < 2 {
        return n
    }
    return fib(n - 1) + fib(n - 2)
}
print(fib(15))
"#;
    assert_eq!(output(source), "610\n");
}

#[test]
fn deep_recursion_within_limit() {
    let source = r#"
fn down(n) {
    if n == 0 {
        return "done"
    }
    return down(n - 1)
}
print(down(5000))
"#;
    assert_eq!(output(source), "done\n");
}

#[test]
fn unbounded_recursion_is_stack_overflow() {
    let source = "fn f(n) {\n    return f(n + 1)\n}\nf(0)";
    let (_, result) = run_with_depth(source, 50);
    let err = result.unwrap_err();
    assert_eq!(err.class(), ErrorClass::StackOverflow);
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.backtrace.map(|b| b.len()), Some(50));
}

#[test]
fn return_exits_nested_loops() {
    let source = r#"
fn find(items, target) {
    for row in items {
        for item in row {
            if item == target {
                return "found"
            }
        }
    }
    return "missing"
}
print(find([[1, 2], [3]], 3), find([[1]], 5))
"#;
    assert_eq!(output(source), "found missing\n");
}

#[test]
fn function_without_return_yields_none() {
    assert_eq!(
        output("fn noop() {\n    let z = 1\n}\nprint(noop())"),
        "None\n"
    );
}

#[test]
fn builtins_are_values() {
    let source = r#"
let measure = len
fn twice(f, v) {
    return f(v) * 2
}
print(measure("abc"), twice(len, [1, 2]))
"#;
    assert_eq!(output(source), "3 4\n");
}

#[test]
fn functions_compare_by_identity() {
    let source = r#"
fn a() {}
fn b() {}
let alias = a
print(a == alias, a == b, len == len)
"#;
    assert_eq!(output(source), "True False True\n");
}

#[test]
fn arity_mismatch_is_type_error() {
    let err = error("fn add(a, b) {\n    return a + b\n}\nadd(1)");
    assert_eq!(err.class(), ErrorClass::TypeError);
    assert_eq!(err.message, "add expects 2 arguments, got 1");
}

#[test]
fn calling_a_non_callable() {
    let err = error("let x = 1\nx()");
    assert_eq!(err.class(), ErrorClass::TypeError);
    assert_eq!(err.message, "Int is not callable");
}

#[test]
fn arguments_evaluate_left_to_right() {
    let source = r#"
fn tag(label) {
    print(label)
    return label
}
fn pair(a, b) {
    return (a, b)
}
print(pair(tag("first"), tag("second")))
"#;
    assert_eq!(
        output(source),
        "first\nsecond\n(\"first\", \"second\")\n"
    );
}

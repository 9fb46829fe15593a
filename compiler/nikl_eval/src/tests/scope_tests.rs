use super::{error, output, run_session};
use crate::ErrorClass;
use pretty_assertions::assert_eq;

#[test]
fn function_let_does_not_touch_global() {
    let source = r#"
let x: Array = [1]
fn f() {
    let x: HashMap = {"a": 1}
    return len(x)
}
print(f())
print(x)
"#;
    assert_eq!(output(source), "1\n[1]\n");
}

#[test]
fn block_let_shadows_until_block_ends() {
    let source = r#"
let x = 1
if True {
    let x = 2
    print(x)
}
print(x)
"#;
    assert_eq!(output(source), "2\n1\n");
}

#[test]
fn rebinding_changes_type_everywhere() {
    let source = r#"
let x: Array = [1, 2]
fn show() {
    return x
}
x = "text"
print(x, len(x))
print(show())
"#;
    assert_eq!(output(source), "text 4\ntext\n");
}

#[test]
fn assignment_updates_enclosing_binding() {
    let source = r#"
let n = 1
if True {
    n = 2
}
print(n)
"#;
    assert_eq!(output(source), "2\n");
}

#[test]
fn assignment_to_unbound_name_creates_global() {
    let source = r#"
fn set() {
    g = 10
}
set()
print(g)
"#;
    assert_eq!(output(source), "10\n");
}

#[test]
fn loop_variables_are_scoped_to_the_loop() {
    let err = error("for i in [1] { let inside = i }\nprint(i)");
    assert_eq!(err.class(), ErrorClass::NameError);
    assert_eq!(err.message, "undefined variable: i");
}

#[test]
fn read_after_del_is_name_error() {
    let err = error("let x = 1\ndel x\nprint(x)");
    assert_eq!(err.class(), ErrorClass::NameError);
    assert_eq!(err.message, "name 'x' was deleted");
}

#[test]
fn let_after_del_rebinds() {
    assert_eq!(output("let x = 1\ndel x\nlet x = 2\nprint(x)"), "2\n");
}

#[test]
fn del_of_outer_name_is_rejected() {
    let err = error("let x = 1\nif True {\n    del x\n}");
    assert_eq!(err.class(), ErrorClass::NameError);
    assert_eq!(
        err.message,
        "cannot delete 'x': not bound in the current scope"
    );
}

#[test]
fn del_inside_block_reveals_outer_binding() {
    let source = r#"
let x = "outer"
if True {
    let x = "inner"
    del x
    print(x)
}
"#;
    assert_eq!(output(source), "outer\n");
}

#[test]
fn del_of_never_bound_name() {
    let err = error("del ghost");
    assert_eq!(err.class(), ErrorClass::NameError);
}

#[test]
fn session_keeps_globals_across_errors() {
    let (out, results) = run_session(&[
        "let x = 1",
        "if True {\n    let y = 2\n    undefined()\n}",
        "fn f(n) {\n    return n + missing\n}\nf(1)",
        "print(x)",
    ]);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().map_err(|e| e.class()),
        Err(ErrorClass::NameError)
    );
    assert!(results[2].is_err());
    assert!(results[3].is_ok());
    assert_eq!(out, "1\n");
}

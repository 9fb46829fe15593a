use super::{error, run};
use crate::{ErrorClass, EvalErrorKind};
use nikl_diagnostic::ErrorCode;
use nikl_ir::Span;
use pretty_assertions::assert_eq;

fn span_of(source: &str, needle: &str) -> Span {
    let start = source.find(needle).expect("needle in source");
    Span::from_range(start..start + needle.len())
}

#[test]
fn undefined_function_keeps_earlier_output() {
    let (out, result) = run("print(\"before\")\nundefined_fn()\nprint(\"after\")");
    let err = result.unwrap_err();
    assert_eq!(out, "before\n");
    assert_eq!(err.class(), ErrorClass::NameError);
    assert_eq!(err.to_string(), "NameError: undefined variable: undefined_fn");
}

#[test]
fn error_span_points_at_innermost_expression() {
    let source = "let total = 1 + missing * 2";
    let err = error(source);
    assert_eq!(err.span, Some(span_of(source, "missing")));
}

#[test]
fn operator_errors_span_the_whole_operation() {
    let source = "let x = 1\nprint(x + \"a\")";
    let err = error(source);
    assert_eq!(err.class(), ErrorClass::TypeError);
    assert_eq!(err.span, Some(span_of(source, "x + \"a\"")));
    assert_eq!(err.code(), ErrorCode::E6003);
}

#[test]
fn del_error_spans_the_statement() {
    let source = "let a = 1\ndel nothing";
    let err = error(source);
    assert_eq!(err.span, Some(span_of(source, "del nothing")));
}

#[test]
fn errors_inside_calls_carry_a_backtrace() {
    let source = r#"
fn inner() {
    return missing
}
fn outer() {
    return inner()
}
outer()
"#;
    let err = error(source);
    assert_eq!(err.span, Some(span_of(source, "missing")));

    let names: Vec<_> = err
        .backtrace
        .as_ref()
        .expect("backtrace")
        .frames()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);

    let diag = err.to_diagnostic();
    assert_eq!(diag.message, "NameError: undefined variable: missing");
    assert_eq!(
        diag.notes,
        vec![
            "in call to `inner`".to_string(),
            "in call to `outer`".to_string()
        ]
    );
}

#[test]
fn arithmetic_errors() {
    assert_eq!(error("print(1 / 0)").kind, EvalErrorKind::DivisionByZero);
    assert_eq!(error("print(1 % 0)").kind, EvalErrorKind::ModuloByZero);
    assert_eq!(error("print(1.5 / 0.0)").class(), ErrorClass::ValueError);
    assert_eq!(
        error("print(9223372036854775807 + 1)").kind,
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert_eq!(error("print(-\"a\")").class(), ErrorClass::TypeError);
    assert_eq!(error("print(True < False)").class(), ErrorClass::TypeError);
}

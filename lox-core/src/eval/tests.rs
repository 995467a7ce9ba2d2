use std::io::{self, Write};

use crate::{
    environment::prelude::Value,
    eval::prelude::{Interpreter, RuntimeError, RuntimeErrorType},
    lexer::prelude::{scan, Token, TokenKind},
    parser::prelude::{parse, Expr, Primitive, Stmt},
    utils::prelude::SrcSpan
};

/// Output sink whose reader has gone away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn statements(input: &str) -> Vec<Stmt> {
    let (tokens, errors) = scan(input);
    assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");

    parse(tokens).into_result()
        .unwrap_or_else(|errors| panic!("unexpected parse errors: {errors:?}"))
}

/// Runs `input` and returns everything it printed along with the outcome.
fn run(input: &str) -> (String, Result<(), RuntimeError>) {
    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.interpret(&statements(input));
    let output = String::from_utf8(interpreter.into_output()).expect("output is utf8");

    (output, result)
}

fn output(input: &str) -> String {
    let (output, result) = run(input);
    assert_eq!(result, Ok(()), "{input}");

    output
}

fn runtime_error(input: &str) -> RuntimeError {
    match run(input).1 {
        Err(err) => err,
        Ok(()) => panic!("{input} should fail"),
    }
}

fn evaluate(input: &str) -> Result<Value, RuntimeError> {
    let mut interpreter = Interpreter::new(Vec::new());

    match statements(&format!("{input};")).as_slice() {
        [Stmt::Expression(expression)] => interpreter.eval_expression(expression),
        other => panic!("expected a single expression, got {other:?}"),
    }
}

#[test]
fn test_arithmetic() {
    assert_eq!(evaluate("1 + 2 * 3"), Ok(Value::Number { value: 7.0 }));
    assert_eq!(evaluate("(1 + 2) * 3"), Ok(Value::Number { value: 9.0 }));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(Value::Number { value: 3.0 }));
    assert_eq!(evaluate("7 / 2"), Ok(Value::Number { value: 3.5 }));
    assert_eq!(evaluate("-(2 + 3)"), Ok(Value::Number { value: -5.0 }));
    assert_eq!(evaluate("1 + 1"), Ok(Value::Number { value: 2.0 }));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(evaluate("\"foo\" + \"bar\""), Ok(Value::String { value: "foobar".into() }));
    assert_eq!(evaluate("\"1\" + 1"), Ok(Value::String { value: "11".into() }));
    assert_eq!(evaluate("2.5 + \"x\""), Ok(Value::String { value: "2.5x".into() }));
}

#[test]
fn test_invalid_operands() {
    let err = evaluate("\"a\" + true").unwrap_err();
    assert_eq!(err.error.message(), "Operands must be two numbers or two strings.");
    assert_eq!(err.token.lexeme, "+");

    let err = evaluate("nil + 1").unwrap_err();
    assert_eq!(err.error.message(), "Operands must be two numbers or two strings.");

    let err = evaluate("1 < \"a\"").unwrap_err();
    assert_eq!(err.error.message(), "Operands must be numbers.");

    let err = evaluate("\"a\" * 2").unwrap_err();
    assert_eq!(err.error.message(), "Operands must be numbers.");

    let err = evaluate("-\"a\"").unwrap_err();
    assert_eq!(err.error.message(), "Operand must be a number.");
    assert_eq!(err.to_string(), "[line 1] RuntimeError: Operand must be a number.");
}

#[test]
fn test_division_by_zero() {
    let err = evaluate("1 / 0").unwrap_err();

    assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
    assert_eq!(err.to_string(), "[line 1] RuntimeError: Division by zero.");
    assert_eq!(evaluate("0 / 5"), Ok(Value::Number { value: 0.0 }));
}

#[test]
fn test_comparison_and_equality() {
    assert_eq!(evaluate("1 < 2"), Ok(Value::Boolean { value: true }));
    assert_eq!(evaluate("2 <= 2"), Ok(Value::Boolean { value: true }));
    assert_eq!(evaluate("1 > 2"), Ok(Value::Boolean { value: false }));
    assert_eq!(evaluate("3 >= 4"), Ok(Value::Boolean { value: false }));
    assert_eq!(evaluate("1 == 1"), Ok(Value::Boolean { value: true }));
    assert_eq!(evaluate("1 == \"1\""), Ok(Value::Boolean { value: false }));
    assert_eq!(evaluate("nil == nil"), Ok(Value::Boolean { value: true }));
    assert_eq!(evaluate("nil == false"), Ok(Value::Boolean { value: false }));
    assert_eq!(evaluate("\"a\" != \"b\""), Ok(Value::Boolean { value: true }));
}

#[test]
fn test_truthiness() {
    let cases = [
        ("nil", false),
        ("false", false),
        ("0", false),
        ("\"\"", false),
        ("true", true),
        ("1", true),
        ("-1", true),
        ("\"0\"", true),
    ];

    for (input, truthy) in cases {
        assert_eq!(evaluate(&format!("!{input}")), Ok(Value::Boolean { value: !truthy }), "{input}");
    }
}

#[test]
fn test_logical_operators_return_operands() {
    assert_eq!(evaluate("nil or \"default\""), Ok(Value::String { value: "default".into() }));
    assert_eq!(evaluate("\"set\" or \"default\""), Ok(Value::String { value: "set".into() }));
    assert_eq!(evaluate("0 and 1"), Ok(Value::Number { value: 0.0 }));
    assert_eq!(evaluate("1 and 2"), Ok(Value::Number { value: 2.0 }));

    // the right side is never evaluated when the left decides
    assert_eq!(evaluate("true or 1 / 0"), Ok(Value::Boolean { value: true }));
    assert_eq!(evaluate("false and 1 / 0"), Ok(Value::Boolean { value: false }));
}

#[test]
fn test_ternary_evaluates_taken_branch_only() {
    assert_eq!(evaluate("true ? 1 : (1/0)"), Ok(Value::Number { value: 1.0 }));
    assert_eq!(evaluate("false ? 1/0 : 2"), Ok(Value::Number { value: 2.0 }));
    assert_eq!(evaluate("\"\" ? 1 : 0 ? 2 : 3"), Ok(Value::Number { value: 3.0 }));
}

#[test]
fn test_print_formats() {
    let input = r#"
        print 1;
        print 2.5;
        print -0.5;
        print 10 / 4;
        print "text";
        print nil;
        print true;
        print 1 == 2;
    "#;

    assert_eq!(output(input), "1\n2.5\n-0.5\n2.5\ntext\nnil\ntrue\nfalse\n");
}

#[test]
fn test_variables_and_assignment() {
    let input = r#"
        var a;
        print a;
        var b = 2;
        a = b = 3;
        print a + b;
        var b = "redeclared";
        print b;
    "#;

    assert_eq!(output(input), "nil\n6\nredeclared\n");
}

#[test]
fn test_block_shadowing() {
    assert_eq!(output("var x = 1; { var x = 2; print x; } print x;"), "2\n1\n");
}

#[test]
fn test_block_assignment_reaches_enclosing_scope() {
    let input = r#"
        var total = 0;
        {
            var step = 5;
            {
                total = total + step;
            }
        }
        print total;
    "#;

    assert_eq!(output(input), "5\n");
}

#[test]
fn test_undefined_variables() {
    let err = runtime_error("x = 5;");
    assert_eq!(err.error, RuntimeErrorType::UndefinedVariable { name: "x".into() });
    assert_eq!(err.to_string(), "[line 1] RuntimeError: Undefined variable 'x'.");

    let err = runtime_error("print y;");
    assert_eq!(err.error, RuntimeErrorType::UndefinedVariable { name: "y".into() });

    let err = runtime_error("{ var inner = 1; } print inner;");
    assert_eq!(err.error, RuntimeErrorType::UndefinedVariable { name: "inner".into() });
}

#[test]
fn test_error_aborts_remaining_statements() {
    let (output, result) = run("print 1;\nprint 1 / 0;\nprint 2;");

    assert_eq!(output, "1\n");
    assert_eq!(result.map_err(|err| err.token.line), Err(2));
}

#[test]
fn test_error_in_block_restores_scope() {
    let mut interpreter = Interpreter::new(Vec::new());

    let result = interpreter.interpret(&statements("var a = 1; { var a = 2; { print nope; } }"));
    assert!(result.is_err());
    assert_eq!(interpreter.environment().depth(), 1);

    interpreter.interpret(&statements("print a;")).expect("global scope is intact");
    assert_eq!(interpreter.output(), b"1\n");
}

#[test]
fn test_control_flow() {
    let input = r#"
        var i = 0;
        while (i < 3) {
            if (i == 1) print "one"; else print i;
            i = i + 1;
        }
        for (var j = 3; j > 0; j = j - 1) print j;
        if (nil) print "never";
    "#;

    assert_eq!(output(input), "0\none\n2\n3\n2\n1\n");
}

#[test]
fn test_repl_echoes_expression_statements() {
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.set_repl(true);

    interpreter.interpret(&statements("var a = 2; a * 21; print \"p\";")).expect("runs");

    assert_eq!(String::from_utf8_lossy(interpreter.output()), "42\np\n");
}

#[test]
fn test_globals_persist_between_runs() {
    let mut interpreter = Interpreter::new(Vec::new());

    interpreter.interpret(&statements("var counter = 1;")).expect("runs");
    interpreter.interpret(&statements("counter = counter + 1;")).expect("runs");
    interpreter.interpret(&statements("print counter;")).expect("runs");

    assert_eq!(interpreter.output(), b"2\n");
}

#[test]
fn test_failed_print_is_runtime_error() {
    let mut interpreter = Interpreter::new(ClosedPipe);

    let err = interpreter.interpret(&statements("var a = 1;\nprint a;\nprint 2;")).unwrap_err();

    assert_eq!(err.error, RuntimeErrorType::Output { kind: io::ErrorKind::BrokenPipe });
    assert_eq!(err.token.kind, TokenKind::Print);
    assert_eq!(err.token.location, SrcSpan::from(11, 16));
    assert_eq!(err.to_string(), "[line 2] RuntimeError: Could not write output.");
}

fn number(value: f64) -> Box<Expr> {
    Box::new(Expr::Literal(Primitive::Number(value)))
}

#[test]
#[should_panic(expected = "is not an infix operator")]
fn test_foreign_infix_operator_is_not_silenced() {
    let operator = Token::new(TokenKind::Semicolon, ";", 1, SrcSpan::from(0, 1));
    let expression = Expr::Binary { left: number(1.0), operator, right: number(2.0) };

    let _ = Interpreter::new(Vec::new()).eval_expression(&expression);
}

#[test]
#[should_panic(expected = "is not a prefix operator")]
fn test_foreign_prefix_operator_is_not_silenced() {
    let operator = Token::new(TokenKind::Plus, "+", 1, SrcSpan::from(0, 1));
    let expression = Expr::Unary { operator, right: number(1.0) };

    let _ = Interpreter::new(Vec::new()).eval_expression(&expression);
}

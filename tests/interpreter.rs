mod common;

use common::{run, Harness};
use pretty_assertions::assert_eq;
use rox_interpreter::error::{LoxError, RuntimeError};
use rox_interpreter::interpreter::Interpreter;

fn runtime_error(outcome: &common::Outcome) -> &RuntimeError {
    match outcome.diagnostics.as_slice() {
        [LoxError::Runtime(e)] => e,
        other => panic!("expected exactly one runtime error, got {:?}", other),
    }
}

#[test]
fn only_nil_and_false_are_falsy() {
    let outcome = run(r#"
        print !nil;
        print !false;
        print !true;
        print !0;
        print !0.0;
        print !"";
        if (0) print "zero is truthy";
        if ("") print "empty string is truthy";
    "#);

    assert_eq!(
        outcome.output,
        vec![
            "true",
            "true",
            "false",
            "false",
            "false",
            "false",
            "zero is truthy",
            "empty string is truthy"
        ]
    );
}

#[test]
fn plus_adds_numbers_and_concatenates_strings() {
    let outcome = run(r#"
        print 1 + 2;
        print "a" + "b";
        print 2.5 * 2;
        print 7 / 2;
    "#);

    assert_eq!(outcome.output, vec!["3", "ab", "5", "3.5"]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn plus_rejects_mixed_operands() {
    let outcome = run(r#"print 1 + "a";"#);

    assert!(outcome.had_runtime_error);
    assert!(!outcome.had_error);
    let err = runtime_error(&outcome);
    assert!(matches!(err, RuntimeError::Type { .. }));
    assert!(err.to_string().contains("two numbers or two strings"));
}

#[test]
fn arithmetic_and_comparison_require_numbers() {
    let outcome = run(r#"print "a" < 1;"#);
    assert_eq!(
        runtime_error(&outcome).to_string(),
        "Operands must be numbers.\n[line 1]"
    );

    let outcome = run("print -\"a\";");
    assert_eq!(
        runtime_error(&outcome).to_string(),
        "Operand must be a number.\n[line 1]"
    );
}

#[test]
fn equality_never_coerces() {
    let outcome = run(r#"
        print nil == nil;
        print nil == false;
        print 1 == 1;
        print 1 == "1";
        print "a" == "a";
        print "a" != "b";
    "#);

    assert_eq!(
        outcome.output,
        vec!["true", "false", "true", "false", "true", "true"]
    );
}

#[test]
fn logical_operators_short_circuit_and_yield_operands() {
    let outcome = run(r#"
        print nil or "fallback";
        print "first" or undefined;
        print 1 and 2;
        print false and undefined;
    "#);

    assert_eq!(outcome.output, vec!["fallback", "first", "2", "false"]);
    assert!(!outcome.had_runtime_error);
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    let outcome = run("print x;");

    assert!(!outcome.had_error);
    assert!(outcome.had_runtime_error);
    assert_eq!(
        runtime_error(&outcome),
        &RuntimeError::UndefinedVariable {
            name: "x".into(),
            line: 1
        }
    );
}

#[test]
fn assigning_an_undeclared_global_fails() {
    let outcome = run("y = 1;");

    assert!(matches!(
        runtime_error(&outcome),
        RuntimeError::UndefinedVariable { name, .. } if name == "y"
    ));
}

#[test]
fn runtime_error_stops_the_rest_of_the_program() {
    let outcome = run(r#"
        print "before";
        print -"oops";
        print "after";
    "#);

    assert_eq!(outcome.output, vec!["before"]);
    assert_eq!(runtime_error(&outcome).line(), 3);
}

#[test]
fn inner_scope_shadows_without_clobbering() {
    let outcome = run(r#"
        var a = "global";
        {
            var a = "local";
            print a;
        }
        print a;
    "#);

    assert_eq!(outcome.output, vec!["local", "global"]);
}

#[test]
fn globals_may_be_redeclared() {
    let outcome = run("var a = 1; var a = 2; print a;");

    assert_eq!(outcome.output, vec!["2"]);
}

#[test]
fn uninitialized_variables_are_nil() {
    let outcome = run("var a; print a;");

    assert_eq!(outcome.output, vec!["nil"]);
}

#[test]
fn closures_share_captured_state() {
    let outcome = run(r#"
        fun makeCounter() {
            var i = 0;
            fun inc() {
                i = i + 1;
                return i;
            }
            return inc;
        }

        var c = makeCounter();
        print c();
        print c();

        var d = makeCounter();
        print d();
    "#);

    assert_eq!(outcome.output, vec!["1", "2", "1"]);
}

#[test]
fn closures_capture_by_reference() {
    let outcome = run(r#"
        {
            var x = "before";
            fun show() { print x; }
            x = "after";
            show();
        }
    "#);

    assert_eq!(outcome.output, vec!["after"]);
}

#[test]
fn references_bind_lexically_not_dynamically() {
    let outcome = run(r#"
        var a = "global";
        {
            fun showA() { print a; }
            showA();
            var a = "block";
            showA();
        }
    "#);

    assert_eq!(outcome.output, vec!["global", "global"]);
}

#[test]
fn functions_see_globals_defined_later() {
    let outcome = run(r#"
        fun f() { return g(); }
        fun g() { return "g"; }
        print f();
    "#);

    assert_eq!(outcome.output, vec!["g"]);
}

#[test]
fn return_unwinds_nested_blocks_and_loops() {
    let outcome = run(r#"
        fun find() {
            var i = 0;
            while (true) {
                {
                    if (i == 3) return "found " + "it";
                }
                i = i + 1;
            }
            print "unreachable";
        }
        print find();

        fun nothing() { return; }
        print nothing();

        fun noReturn() {}
        print noReturn();
    "#);

    assert_eq!(outcome.output, vec!["found it", "nil", "nil"]);
}

#[test]
fn recursion_works() {
    let outcome = run(r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(15);
    "#);

    assert_eq!(outcome.output, vec!["610"]);
}

#[test]
fn for_loops_run_with_their_own_scope() {
    let outcome = run(r#"
        var sum = 0;
        for (var i = 0; i < 5; i = i + 1) {
            sum = sum + i;
        }
        print sum;
    "#);

    assert_eq!(outcome.output, vec!["10"]);
}

#[test]
fn arity_mismatch_does_not_run_the_body() {
    let outcome = run(r#"
        fun one(a) { print "ran"; }
        one(1, 2);
    "#);

    assert!(outcome.output.is_empty());
    assert_eq!(
        runtime_error(&outcome),
        &RuntimeError::Type {
            message: "Expected 1 arguments but got 2.".into(),
            line: 3
        }
    );
}

#[test]
fn arguments_are_evaluated_before_the_arity_check() {
    let mut harness = Harness::new();

    let outcome = harness.run(r#"
        var calls = 0;
        fun bump() { calls = calls + 1; return calls; }
        fun one(a) {}
        one(bump(), bump());
    "#);
    assert!(outcome.had_runtime_error);

    let outcome = harness.run("print calls;");
    assert_eq!(outcome.output, vec!["2"]);
}

#[test]
fn calling_a_non_callable_fails() {
    let outcome = run(r#""not a function"();"#);

    assert_eq!(runtime_error(&outcome), &RuntimeError::NotCallable { line: 1 });
    assert_eq!(
        outcome.messages(),
        vec!["Can only call functions and classes.\n[line 1]"]
    );
}

#[test]
fn environment_is_restored_after_a_runtime_error_in_a_block() {
    let mut harness = Harness::new();

    harness.run(r#"var a = "global";"#);
    let outcome = harness.run(r#"{ var a = "inner"; print missing; }"#);
    assert!(outcome.had_runtime_error);

    let outcome = harness.run("print a;");
    assert_eq!(outcome.output, vec!["global"]);
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    let mut harness = Harness::new();

    let outcome = harness.run(r#"fun f() { f(); } f(); print "after";"#);
    assert!(outcome.had_runtime_error);
    assert!(outcome.output.is_empty());
    assert_eq!(runtime_error(&outcome), &RuntimeError::StackOverflow { line: 1 });
    assert_eq!(outcome.messages(), vec!["Stack overflow.\n[line 1]"]);

    let outcome = harness.run(r#"print "still here";"#);
    assert_eq!(outcome.output, vec!["still here"]);
}

#[test]
fn call_depth_limit_counts_nested_calls() {
    let mut harness = Harness::new();

    harness.run("var depth = 0; fun dive() { depth = depth + 1; dive(); } dive();");
    let outcome = harness.run("print depth;");
    assert_eq!(outcome.output, vec![Interpreter::MAX_CALL_DEPTH.to_string()]);

    // The counter unwinds with the error, so a fresh dive reaches the same depth.
    harness.run("depth = 0; dive();");
    let outcome = harness.run("print depth;");
    assert_eq!(outcome.output, vec![Interpreter::MAX_CALL_DEPTH.to_string()]);
}

#[test]
fn deep_bounded_recursion_completes() {
    let outcome = run(r#"
        fun count(n) {
            if (n == 0) return 0;
            return 1 + count(n - 1);
        }
        print count(1000);
    "#);

    assert!(!outcome.had_runtime_error, "{:?}", outcome.messages());
    assert_eq!(outcome.output, vec!["1000"]);
}

#[test]
fn deeply_nested_expressions_and_blocks() {
    let depth = 1000;
    let source = format!(
        "print {}1{};\n{}print \"inner\";{}",
        "(".repeat(depth),
        ")".repeat(depth),
        "{".repeat(depth),
        "}".repeat(depth),
    );

    let outcome = run(&source);

    assert!(!outcome.had_error, "{:?}", outcome.messages());
    assert_eq!(outcome.output, vec!["1", "inner"]);
}

#[test]
fn callables_display_their_kind() {
    let outcome = run(r#"
        fun greet() {}
        print greet;
        print clock;
        print clock() > 0;
    "#);

    assert_eq!(outcome.output, vec!["<fn greet>", "<native fn>", "true"]);
}

#[test]
fn numbers_print_without_trailing_zero_fraction() {
    let outcome = run("print 3; print 2.5; print -0.5; print 1 / 0; print -1 / 0;");

    assert_eq!(outcome.output, vec!["3", "2.5", "-0.5", "Infinity", "-Infinity"]);
}

#[test]
fn very_large_and_small_numbers_use_exponent_form() {
    let outcome = run(r#"
        print 1000000000000000;
        print 10000000000000000;
        print 10000000000000000000000;
        print 15000000000000000000000;
        print 0.0001;
        print 0.00001;
        print 0.000015;
    "#);

    assert_eq!(
        outcome.output,
        vec![
            "1000000000000000",
            "1.0e+16",
            "1.0e+22",
            "1.5e+22",
            "0.0001",
            "1.0e-05",
            "1.5e-05",
        ]
    );
}

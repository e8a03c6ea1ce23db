mod common;

use common::SharedBuffer;
use pretty_assertions::assert_eq;
use rox_interpreter::driver::{Lox, EXIT_DATA_ERROR, EXIT_SOFTWARE};

fn run_lines(input: &str) -> (Lox, String, String, String) {
    let out = SharedBuffer::default();
    let mut lox = Lox::with_output(Box::new(out.clone()));
    let mut prompt = Vec::new();
    let mut errors = Vec::new();

    lox.run_prompt(input.as_bytes(), &mut prompt, &mut errors)
        .expect("in-memory I/O cannot fail");

    (
        lox,
        out.contents(),
        String::from_utf8(prompt).expect("prompt is UTF-8"),
        String::from_utf8(errors).expect("errors are UTF-8"),
    )
}

#[test]
fn state_persists_between_lines() {
    let (_, out, prompt, errors) = run_lines(
        "var a = 1;\nfun add(n) { return a + n; }\n{ var a = 10; print add(a); }\n",
    );

    assert_eq!(out, "11\n");
    assert_eq!(prompt, "> > > > ");
    assert_eq!(errors, "");
}

#[test]
fn a_bad_line_does_not_poison_the_next() {
    let (lox, out, _, errors) = run_lines("print ;\nprint \"ok\";\n");

    assert_eq!(out, "ok\n");
    assert_eq!(errors, "[line 1] Error at ';': Expect expression.\n");
    assert!(!lox.session().had_error());
}

#[test]
fn an_empty_line_ends_the_prompt() {
    let (_, out, _, _) = run_lines("print 1;\n\nprint 2;\n");

    assert_eq!(out, "1\n");
}

#[test]
fn runtime_errors_are_printed_and_the_prompt_continues() {
    let (lox, out, _, errors) = run_lines("print missing;\nprint 2;\n");

    assert_eq!(out, "2\n");
    assert_eq!(errors, "Undefined variable 'missing'.\n[line 1]\n");
    assert_eq!(lox.exit_code(), Some(EXIT_SOFTWARE));
}

#[test]
fn closures_from_earlier_lines_keep_their_bindings() {
    let (_, out, _, errors) = run_lines(
        "fun make() { var n = 0; fun inc() { n = n + 1; return n; } return inc; }\nvar c = make();\nprint c();\nprint c();\n",
    );

    assert_eq!(errors, "");
    assert_eq!(out, "1\n2\n");
}

#[test]
fn script_exit_codes() {
    let mut lox = Lox::with_output(Box::new(SharedBuffer::default()));
    lox.run("print 1");
    assert_eq!(lox.exit_code(), Some(EXIT_DATA_ERROR));

    let mut lox = Lox::with_output(Box::new(SharedBuffer::default()));
    lox.run("print -nil;");
    assert_eq!(lox.exit_code(), Some(EXIT_SOFTWARE));

    let mut lox = Lox::with_output(Box::new(SharedBuffer::default()));
    lox.run("print 1;");
    assert_eq!(lox.exit_code(), None);
}

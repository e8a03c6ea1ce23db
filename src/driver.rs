//! Glue between source text and the evaluation core: scanning, parsing,
//! resolution and interpretation for one script, or line by line for the
//! prompt.

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::session::Session;
use crate::token::Token;

/// Command-line usage error.
pub const EXIT_USAGE: i32 = 64;

/// The input had a scan, parse or resolve error.
pub const EXIT_DATA_ERROR: i32 = 65;

/// A runtime error aborted the program.
pub const EXIT_SOFTWARE: i32 = 70;

/// Scans `source`, reporting lex errors to `session`. Always ends with `EOF`.
pub fn scan(source: &str, session: &mut Session) -> Vec<Token> {
    let mut tokens = Vec::new();

    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => session.error(e),
        }
    }

    tokens
}

/// Scans and parses `source`.
pub fn parse(source: &str, session: &mut Session) -> Vec<Stmt> {
    let tokens = scan(source, session);
    Parser::new(tokens, session).parse()
}

/// One interpreter plus its session: globals and resolved distances persist
/// across calls to [`Lox::run`].
pub struct Lox {
    session: Session,
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            interpreter: Interpreter::new(),
        }
    }

    /// `print` output goes to `out` instead of stdout.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self {
            session: Session::new(),
            interpreter: Interpreter::with_output(out),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn take_diagnostics(&mut self) -> Vec<LoxError> {
        self.session.take_diagnostics()
    }

    /// Runs one chunk of source. Static errors suppress resolution or
    /// execution; runtime errors end up in the session.
    pub fn run(&mut self, source: &str) {
        let statements = parse(source, &mut self.session);

        if self.session.had_error() {
            debug!("Static errors after parsing, skipping execution");
            return;
        }

        Resolver::new(&mut self.interpreter, &mut self.session).resolve(&statements);

        if self.session.had_error() {
            debug!("Static errors after resolving, skipping execution");
            return;
        }

        self.interpreter.interpret(&statements, &mut self.session);
    }

    /// Process exit code for a finished script run, `None` on success.
    pub fn exit_code(&self) -> Option<i32> {
        if self.session.had_error() {
            Some(EXIT_DATA_ERROR)
        } else if self.session.had_runtime_error() {
            Some(EXIT_SOFTWARE)
        } else {
            None
        }
    }

    /// Interactive loop: runs each line read from `input` until end of input
    /// or an empty line. Diagnostics are written to `errors` after each line.
    /// A static error on one line does not poison the next.
    pub fn run_prompt<R: BufRead, P: Write, E: Write>(
        &mut self,
        input: R,
        prompt: &mut P,
        errors: &mut E,
    ) -> std::io::Result<()> {
        info!("Starting prompt");

        let mut lines = input.lines();

        loop {
            write!(prompt, "> ")?;
            prompt.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            if line.is_empty() {
                break;
            }

            self.run(&line);

            for diagnostic in self.take_diagnostics() {
                writeln!(errors, "{}", diagnostic)?;
            }

            self.session.reset_error();
        }

        info!("Prompt finished");
        Ok(())
    }
}

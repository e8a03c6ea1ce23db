#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox_interpreter as lox;

use lox::driver::Lox;
use lox::error::LoxError;

/// A `Write` sink the test keeps a handle to after boxing it into the
/// interpreter.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("print output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Everything observable about one `Lox::run`.
pub struct Outcome {
    pub output: Vec<String>,
    pub diagnostics: Vec<LoxError>,
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl Outcome {
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}

/// A runner whose output can be inspected between runs.
pub struct Harness {
    pub lox: Lox,
    pub out: SharedBuffer,
}

impl Harness {
    pub fn new() -> Self {
        let out = SharedBuffer::default();
        let lox = Lox::with_output(Box::new(out.clone()));
        Self { lox, out }
    }

    pub fn run(&mut self, source: &str) -> Outcome {
        self.out.0.borrow_mut().clear();
        self.lox.run(source);

        Outcome {
            output: self.out.lines(),
            diagnostics: self.lox.take_diagnostics(),
            had_error: self.lox.session().had_error(),
            had_runtime_error: self.lox.session().had_runtime_error(),
        }
    }
}

/// Runs `source` in a fresh interpreter.
pub fn run(source: &str) -> Outcome {
    Harness::new().run(source)
}

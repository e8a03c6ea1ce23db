//! Per-run diagnostic channel.
//!
//! A `Session` is owned by the driver and handed by reference to the parser,
//! the resolver and the interpreter. It lives for one script run, or for the
//! whole prompt loop in the REPL.

use log::debug;

use crate::ast::ExprId;
use crate::error::{LoxError, RuntimeError};

#[derive(Debug, Default)]
pub struct Session {
    diagnostics: Vec<LoxError>,
    had_error: bool,
    had_runtime_error: bool,
    next_expr_id: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a static (scan, parse or resolve) error.
    pub fn error(&mut self, error: LoxError) {
        debug_assert!(error.is_static(), "runtime errors go through runtime_error");
        debug!("Static error reported: {}", error);
        self.had_error = true;
        self.diagnostics.push(error);
    }

    /// Record an uncaught runtime error.
    pub fn runtime_error(&mut self, error: RuntimeError) {
        debug!("Runtime error reported: {}", error);
        self.had_runtime_error = true;
        self.diagnostics.push(LoxError::Runtime(error));
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the static-error flag between REPL lines.
    pub fn reset_error(&mut self) {
        self.had_error = false;
    }

    pub fn diagnostics(&self) -> &[LoxError] {
        &self.diagnostics
    }

    /// Drain everything reported so far, oldest first.
    pub fn take_diagnostics(&mut self) -> Vec<LoxError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Hands out a fresh AST node identity. Ids never repeat within a
    /// session, so the interpreter's locals table stays valid across lines.
    pub fn next_expr_id(&mut self) -> ExprId {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }
}

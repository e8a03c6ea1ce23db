//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Two tiers exist. Static errors (scanner, parser, resolver) are collected by
//! the [`Session`](crate::session::Session) and prevent execution. Runtime
//! errors ([`RuntimeError`]) unwind evaluation up to `Interpreter::interpret`,
//! which hands them to the session as well.
//!
//! The module **does not** print diagnostics itself.

use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,
        location: String,
    },

    /// Static‑analysis failure found by the resolver.
    #[error("[line {line}] Error{location}: {kind}")]
    Resolve {
        kind: ResolveError,
        line: usize,
        location: String,
    },

    /// Runtime evaluation error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, location: String, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        LoxError::Parse {
            message,
            line,
            location,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve(line: usize, location: String, kind: ResolveError) -> Self {
        info!("Creating Resolve error: line={}, kind={:?}", line, kind);

        LoxError::Resolve {
            kind,
            line,
            location,
        }
    }

    /// `true` for scanner, parser and resolver errors.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            LoxError::Lex { .. } | LoxError::Parse { .. } | LoxError::Resolve { .. }
        )
    }
}

/// Static errors reported by the resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Already a variable with this name in this scope.")]
    DuplicateDeclaration,

    #[error("Can't read local variable in its own initializer.")]
    SelfReferentialInitializer,

    #[error("Can't return from top-level code.")]
    ReturnOutsideFunction,

    #[error("Can't return a value from an initializer.")]
    ReturnValueFromInitializer,

    #[error("A class can't inherit from itself.")]
    SelfInheritance,

    #[error("Can't use 'this' outside of a class.")]
    ThisOutsideClass,

    #[error("Can't use 'super' outside of a class.")]
    SuperOutsideClass,

    #[error("Can't use 'super' in a class with no superclass.")]
    SuperWithoutSuperclass,
}

/// Errors raised while evaluating a program. Each carries the line of the
/// offending token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Operand type violations, arity mismatches and bad superclasses.
    #[error("{message}\n[line {line}]")]
    Type { message: String, line: usize },

    #[error("Undefined variable '{name}'.\n[line {line}]")]
    UndefinedVariable { name: String, line: usize },

    #[error("Undefined property '{name}'.\n[line {line}]")]
    UndefinedProperty { name: String, line: usize },

    #[error("Only instances have properties.\n[line {line}]")]
    NotAnInstance { line: usize },

    #[error("Can only call functions and classes.\n[line {line}]")]
    NotCallable { line: usize },

    /// Call nesting went past `Interpreter::MAX_CALL_DEPTH`.
    #[error("Stack overflow.\n[line {line}]")]
    StackOverflow { line: usize },

    /// Writing `print` output failed.
    #[error("Failed to write output: {message}\n[line {line}]")]
    Output { message: String, line: usize },
}

impl RuntimeError {
    pub fn type_error<S: Into<String>>(line: usize, msg: S) -> Self {
        RuntimeError::Type {
            message: msg.into(),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            RuntimeError::Type { line, .. }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::UndefinedProperty { line, .. }
            | RuntimeError::NotAnInstance { line }
            | RuntimeError::NotCallable { line }
            | RuntimeError::StackOverflow { line }
            | RuntimeError::Output { line, .. } => *line,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Result of evaluating Lox code.
pub type IResult<T> = std::result::Result<T, RuntimeError>;

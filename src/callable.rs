//! The callable capability and the two function kinds.
//!
//! Anything a Lox program can put in front of `(...)` implements
//! [`Callable`]: native functions, user functions (including bound methods)
//! and classes (see [`crate::class`]).

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::environment::{Environment, SharedEnv};
use crate::error::IResult;
use crate::interpreter::{Flow, Interpreter};
use crate::value::Value;

/// Uniform calling convention used by `Expr::Call`.
///
/// The interpreter checks `arity` against the argument count before calling.
pub trait Callable: fmt::Display {
    fn arity(&self) -> usize;

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Value>)
        -> IResult<Value>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Native functions
// ─────────────────────────────────────────────────────────────────────────────

/// A function implemented in Rust and installed in the global scope.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> IResult<Value>,
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(self: Rc<Self>, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> IResult<Value> {
        debug!("Calling native function '{}'", self.name);
        (self.func)(&arguments)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// `clock()`: seconds since the Unix epoch as a number.
pub fn clock() -> NativeFunction {
    NativeFunction {
        name: "clock",
        arity: 0,
        func: |_args: &[Value]| {
            let now = chrono::Utc::now();
            Ok(Value::Number(now.timestamp_micros() as f64 / 1_000_000.0))
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User functions
// ─────────────────────────────────────────────────────────────────────────────

/// A function or method declared in Lox, paired with the environment it
/// closes over.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: SharedEnv,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: SharedEnv, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Re-close this method over a fresh scope that binds `this`.
    pub fn bind(&self, instance: Value) -> LoxFunction {
        let mut environment = Environment::with_enclosing(self.closure.clone());
        environment.define("this", instance);

        LoxFunction {
            declaration: self.declaration.clone(),
            closure: environment.into_shared(),
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(self: Rc<Self>, interpreter: &mut Interpreter, arguments: Vec<Value>) -> IResult<Value> {
        debug!("Calling user-defined function '{}'", self.name());

        let mut environment = Environment::with_enclosing(self.closure.clone());
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        let flow = interpreter.execute_block(&self.declaration.body, environment.into_shared())?;

        // An initializer yields its instance whichever way it exits.
        if self.is_initializer {
            return Ok(self.closure.borrow().get_at(0, "this"));
        }

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Nil,
        })
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}

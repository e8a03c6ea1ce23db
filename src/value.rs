use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::callable::{Callable, LoxFunction, NativeFunction};
use crate::class::{LoxClass, LoxInstance};

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    NativeFunction(Rc<NativeFunction>),
    Function(Rc<LoxFunction>),
    Class(Rc<LoxClass>),
    Instance(Rc<RefCell<LoxInstance>>),
}

impl Value {
    /// `nil` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// The callable capability of this value, if it has one.
    pub fn as_callable(&self) -> Option<Rc<dyn Callable>> {
        match self {
            Value::NativeFunction(native) => Some(native.clone() as Rc<dyn Callable>),
            Value::Function(function) => Some(function.clone() as Rc<dyn Callable>),
            Value::Class(class) => Some(class.clone() as Rc<dyn Callable>),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Structural for primitives, identity for heap objects. No coercion.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => format_number(f, *n),

            Value::String(s) => write!(f, "{}", s),

            Value::NativeFunction(native) => write!(f, "{}", native),

            Value::Function(function) => write!(f, "{}", function),

            Value::Class(class) => write!(f, "{}", class),

            Value::Instance(instance) => write!(f, "{}", instance.borrow()),
        }
    }
}

/// Integral values drop the fraction (`3`). Magnitudes of `1e16` and up, or
/// below `1e-4`, switch to exponent form (`1.0e+22`, `1.0e-05`).
fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }

    let scientific = format!("{:e}", n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return write!(f, "{}", n);
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..=15).contains(&exponent) {
        return write!(f, "{}", n);
    }

    let fraction = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{}{}e{}{:02}", mantissa, fraction, sign, exponent.abs())
}

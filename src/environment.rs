use crate::error::{IResult, RuntimeError};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// An environment shared between the interpreter and every closure that
/// captured it.
pub type SharedEnv = Rc<RefCell<Environment>>;

/// One scope in the chain: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<SharedEnv>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: SharedEnv) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap into the shared handle used everywhere at runtime.
    pub fn into_shared(self) -> SharedEnv {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` in this scope, replacing any previous binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Dynamic lookup through the whole chain.
    pub fn get(&self, name: &Token) -> IResult<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Updates the nearest existing binding; never creates one.
    pub fn assign(&mut self, name: &Token, value: Value) -> IResult<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Reads `name` from the scope exactly `distance` hops out.
    ///
    /// # Panics
    ///
    /// If the ancestor or the binding does not exist. The resolver computed
    /// `distance` from the same scope structure, so a miss means the two passes
    /// disagree.
    pub fn get_at(&self, distance: usize, name: &str) -> Value {
        if distance == 0 {
            return match self.values.get(name) {
                Some(value) => value.clone(),
                None => panic!("resolved binding '{}' missing from its scope", name),
            };
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get_at(distance - 1, name),
            None => panic!("no enclosing scope {} hops out for '{}'", distance, name),
        }
    }

    /// Writes `name` in the scope exactly `distance` hops out.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Environment::get_at`].
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value) {
        if distance == 0 {
            match self.values.get_mut(name) {
                Some(slot) => *slot = value,
                None => panic!("resolved binding '{}' missing from its scope", name),
            }
            return;
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign_at(distance - 1, name, value),
            None => panic!("no enclosing scope {} hops out for '{}'", distance, name),
        }
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::UndefinedVariable {
        name: name.lexeme.clone(),
        line: name.line,
    }
}

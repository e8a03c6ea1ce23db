use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{ClassDecl, Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{clock, LoxFunction};
use crate::class::{LoxClass, LoxInstance, INITIALIZER};
use crate::environment::{Environment, SharedEnv};
use crate::error::{IResult, RuntimeError};
use crate::session::Session;
use crate::stack::ensure_sufficient_stack;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished. `Return` travels outward through blocks, loops
/// and conditionals until the enclosing function call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking evaluator.
///
/// Holds the global scope, the scope currently in effect, and the binding
/// distances the resolver recorded for variable-reference nodes.
pub struct Interpreter {
    globals: SharedEnv,
    environment: SharedEnv,
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
    /// Lox calls currently on the stack.
    call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Deepest nesting of Lox calls before `Stack overflow.` is raised.
    pub const MAX_CALL_DEPTH: usize = 1024;

    /// Creates an Interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates an Interpreter whose `print` statements write to `out`, and
    /// defines native functions such as `clock`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Environment::new().into_shared();

        debug!("Defining native function 'clock'");
        globals
            .borrow_mut()
            .define("clock", Value::NativeFunction(Rc::new(clock())));

        Self {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
            out,
            call_depth: 0,
        }
    }

    /// Called by the resolver: the reference `id` lives `depth` scopes out.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// The distance recorded for `id`, `None` for globals.
    pub fn resolved_depth(&self, id: ExprId) -> Option<usize> {
        self.locals.get(&id).copied()
    }

    /// Executes a program. An uncaught runtime error is reported to `session`
    /// and stops the remaining top-level statements.
    pub fn interpret(&mut self, statements: &[Stmt], session: &mut Session) {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                debug!("Runtime error: {}", e);
                session.runtime_error(e);
                return;
            }
        }

        info!("Interpretation completed successfully");
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        ensure_sufficient_stack(|| self.execute_inner(stmt))
    }

    fn execute_inner(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value).map_err(|e| RuntimeError::Output {
                    message: e.to_string(),
                    line: expr.line(),
                })?;
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}' = {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment = Environment::with_enclosing(self.environment.clone());
                self.execute_block(statements, environment.into_shared())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);
                // Captures the live environment, not a copy of it.
                let function =
                    LoxFunction::new(declaration.clone(), self.environment.clone(), false);
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class(declaration) => self.execute_class(declaration),
        }
    }

    /// Runs `statements` inside `environment`, then restores the previous
    /// environment however the block exits.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: SharedEnv) -> IResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = self.execute_statements(statements);

        self.environment = previous;
        result
    }

    fn execute_statements(&mut self, statements: &[Stmt]) -> IResult<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_class(&mut self, declaration: &ClassDecl) -> IResult<Flow> {
        let name = &declaration.name;
        debug!("Defining class '{}'", name.lexeme);

        // Bound first so methods can refer to the class by name.
        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        let superclass = match &declaration.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    return Err(RuntimeError::type_error(
                        expr.line(),
                        "Superclass must be a class.",
                    ))
                }
            },
            None => None,
        };

        // Methods of a subclass close over an extra scope holding `super`.
        let method_env = match &superclass {
            Some(superclass) => {
                let mut environment = Environment::with_enclosing(self.environment.clone());
                environment.define("super", Value::Class(superclass.clone()));
                environment.into_shared()
            }
            None => self.environment.clone(),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = declaration
            .methods
            .iter()
            .map(|method| {
                let is_initializer = method.name.lexeme == INITIALIZER;
                let function = LoxFunction::new(method.clone(), method_env.clone(), is_initializer);
                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        info!("Class '{}' defined", name.lexeme);
        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        ensure_sufficient_stack(|| self.evaluate_inner(expr))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                if operator.token_type == TokenType::OR {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(right)
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.resolved_depth(*id) {
                    Some(distance) => {
                        self.environment
                            .borrow_mut()
                            .assign_at(distance, &name.lexeme, value.clone());
                    }
                    None => {
                        self.globals.borrow_mut().assign(name, value.clone())?;
                    }
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                // Every argument is evaluated before the callee is checked.
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                let callable = callee
                    .as_callable()
                    .ok_or(RuntimeError::NotCallable { line: paren.line })?;

                if values.len() != callable.arity() {
                    return Err(RuntimeError::type_error(
                        paren.line,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            values.len()
                        ),
                    ));
                }

                if self.call_depth >= Self::MAX_CALL_DEPTH {
                    return Err(RuntimeError::StackOverflow { line: paren.line });
                }

                self.call_depth += 1;
                let result = callable.call(self, values);
                self.call_depth -= 1;
                result
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(RuntimeError::NotAnInstance { line: name.line }),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::NotAnInstance { line: name.line });
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super { id, method, .. } => self.evaluate_super(*id, method),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> IResult<Value> {
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::type_error(
                    operator.line,
                    "Operand must be a number.",
                )),
            },
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
            _ => unreachable!("parser only builds unary '-' and '!'"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> IResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::type_error(
                    operator.line,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => {
                let (a, b) = number_operands(operator, &left, &right)?;

                Ok(match operator.token_type {
                    TokenType::MINUS => Value::Number(a - b),
                    TokenType::STAR => Value::Number(a * b),
                    TokenType::SLASH => Value::Number(a / b),
                    TokenType::GREATER => Value::Bool(a > b),
                    TokenType::GREATER_EQUAL => Value::Bool(a >= b),
                    TokenType::LESS => Value::Bool(a < b),
                    TokenType::LESS_EQUAL => Value::Bool(a <= b),
                    _ => unreachable!("parser only builds known binary operators"),
                })
            }
        }
    }

    fn evaluate_super(&mut self, id: ExprId, method: &Token) -> IResult<Value> {
        let Some(distance) = self.resolved_depth(id) else {
            panic!("'super' at line {} was never resolved", method.line);
        };

        let (superclass, object) = {
            let environment = self.environment.borrow();
            // `this` always sits in the scope just inside `super`.
            (
                environment.get_at(distance, "super"),
                environment.get_at(distance - 1, "this"),
            )
        };

        let Value::Class(superclass) = superclass else {
            panic!("'super' bound to a non-class value");
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(object)))),
            None => Err(RuntimeError::UndefinedProperty {
                name: method.lexeme.clone(),
                line: method.line,
            }),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.resolved_depth(id) {
            Some(distance) => Ok(self.environment.borrow().get_at(distance, &name.lexeme)),
            None => self.globals.borrow().get(name),
        }
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> IResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::type_error(
            operator.line,
            "Operands must be numbers.",
        )),
    }
}

use std::fmt;
use std::rc::Rc;

use crate::environment::Bindings;
use crate::error::Error;
use crate::interner::InternedSymbol;

// ============================================================================
// Core Type System
// ============================================================================

/// A cons cell. Owns both of its children; proper lists are right-nested
/// chains of cells terminated by [`Value::Nil`].
#[derive(Debug)]
pub struct ConsCell {
    pub car: Value,
    pub cdr: Value,
}

/// Native function type - Rust functions callable from Lisp.
///
/// Natives receive the caller's environment and the RAW, unevaluated
/// argument list; each one decides for itself what to evaluate. This is the
/// mechanism by which special forms such as `if` and `let` avoid eager
/// evaluation.
pub type NativeFn = fn(&Bindings, &Value) -> Result<Value, Error>;

/// Every runtime datum. A `(lambda PARAMS BODY...)` expression is not a
/// separate variant: it is an ordinary list that the evaluator treats
/// specially, self-evaluating until it lands in function position.
#[derive(Clone, Debug)]
pub enum Value {
    Symbol(InternedSymbol),
    Integer(i64),
    Str(String),
    Nil,
    Cons(Rc<ConsCell>),
    Native(NativeFn),
}

impl Value {
    /// Build a symbol value, interning the name
    pub fn symbol(name: &str) -> Value {
        Value::Symbol(InternedSymbol::new(name))
    }

    /// True for a proper list: a cons chain ending in nil, or nil itself.
    /// A chain ending in anything else is a dotted pair, not a list.
    pub fn is_list(&self) -> bool {
        let mut current = self;
        while let Value::Cons(cell) = current {
            current = &cell.cdr;
        }
        matches!(current, Value::Nil)
    }

    /// Number of cons cells in the spine
    pub fn list_len(&self) -> usize {
        let mut len = 0;
        let mut current = self;
        while let Value::Cons(cell) = current {
            len += 1;
            current = &cell.cdr;
        }
        len
    }
}

// Structural equality: lists compare recursively, symbols by name, integers
// and strings by value, native functions by identity. Values of different
// tags are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Cons(a), Value::Cons(b)) => a.car == b.car && a.cdr == b.cdr,
            (Value::Native(a), Value::Native(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

// ============================================================================
// Primitive Operations
// ============================================================================

pub fn cons(car: Value, cdr: Value) -> Value {
    Value::Cons(Rc::new(ConsCell { car, cdr }))
}

/// First element of a pair. Nil is its own car, so `(car nil)` is `nil`.
pub fn car(value: &Value) -> Result<Value, Error> {
    match value {
        Value::Cons(cell) => Ok(cell.car.clone()),
        Value::Nil => Ok(Value::Nil),
        other => Err(Error::TypeMismatch {
            name: "car",
            expected: "cons or ()",
            got: other.to_string(),
        }),
    }
}

/// Rest of a pair. Nil is its own cdr, mirroring `car`.
pub fn cdr(value: &Value) -> Result<Value, Error> {
    match value {
        Value::Cons(cell) => Ok(cell.cdr.clone()),
        Value::Nil => Ok(Value::Nil),
        other => Err(Error::TypeMismatch {
            name: "cdr",
            expected: "cons or ()",
            got: other.to_string(),
        }),
    }
}

/// Right-fold a vector of values into a proper list
pub fn list_from_vec(items: Vec<Value>) -> Value {
    items
        .into_iter()
        .rev()
        .fold(Value::Nil, |acc, item| cons(item, acc))
}

// ============================================================================
// External Representation
// ============================================================================

fn escape_string(s: &str) -> String {
    s.replace('"', "\\\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Nil => write!(f, "()"),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Cons(_) => {
                write!(f, "(")?;
                let mut current = self.clone();
                while let Value::Cons(ref cell) = current {
                    write!(f, "{}", cell.car)?;
                    match cell.cdr {
                        Value::Nil => break,
                        Value::Cons(_) => {
                            write!(f, " ")?;
                            current = cell.cdr.clone();
                        }
                        ref other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}

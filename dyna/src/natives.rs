//! The native function set.
//!
//! Every native has the same shape: it receives the caller's environment and
//! the RAW argument list, and decides for itself what to evaluate. That one
//! rule is what lets `if`, `let` and `define` behave as special forms while
//! staying ordinary entries in the environment - there are no reserved words
//! anywhere, and a program is free to shadow any of these names.

use std::fs;

use log::debug;

use dynalisp::{Bindings, Error, NativeFn, Value, car, cdr, cons, list_from_vec};

use crate::interpreter::{eval, read_eval_all};

/// Base environment: `nil` plus the native function table.
pub fn base_bindings() -> Bindings {
    let mut env = Bindings::root("nil", Value::Nil);
    for (name, native) in NATIVES {
        env = env.assoc_str(name, Value::Native(*native));
    }
    env
}

const NATIVES: &[(&str, NativeFn)] = &[
    ("eval", native_eval),
    ("let", native_let),
    ("if", native_if),
    ("define", native_define),
    ("load", native_load),
    ("+", native_plus),
    ("car", native_car),
    ("cdr", native_cdr),
    ("cons", native_cons),
    ("print", native_print),
    ("=", native_equal),
];

// ============================================================================
// Helpers
// ============================================================================

/// Evaluate every element of a raw argument list, preserving order
fn eval_args(env: &Bindings, args: &Value) -> Result<Value, Error> {
    let mut values = Vec::new();
    let mut iter = args.clone();
    while let Value::Cons(cell) = iter {
        values.push(eval(env, &cell.car)?);
        iter = cell.cdr.clone();
    }
    Ok(list_from_vec(values))
}

fn require_len(name: &'static str, args: &Value, expected: usize) -> Result<(), Error> {
    let got = args.list_len();
    if got != expected {
        return Err(Error::ArityMismatch {
            name,
            expected,
            got,
        });
    }
    Ok(())
}

// ============================================================================
// Special Forms (manual evaluation)
// ============================================================================

fn native_if(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("if", args, 3)?;

    let condition = eval(env, &car(args)?)?;
    let branches = cdr(args)?;
    if matches!(condition, Value::Nil) {
        eval(env, &car(&cdr(&branches)?)?)
    } else {
        eval(env, &car(&branches)?)
    }
}

fn native_let(env: &Bindings, args: &Value) -> Result<Value, Error> {
    let varlist = car(args)?;
    if !varlist.is_list() {
        return Err(Error::TypeMismatch {
            name: "let",
            expected: "a list of bindings",
            got: varlist.to_string(),
        });
    }

    let mut bindings = env.clone();
    let mut iter = varlist;
    while let Value::Cons(cell) = iter {
        let declaration = &cell.car;
        if !declaration.is_list() || declaration.list_len() != 2 {
            return Err(Error::InvalidParameter(format!(
                "let binding must be a (name value) pair, got {declaration}"
            )));
        }
        let name = match car(declaration)? {
            Value::Symbol(sym) => sym,
            other => {
                return Err(Error::InvalidParameter(format!(
                    "let names must be symbols, got {other}"
                )));
            }
        };
        // each binding sees the ones declared before it
        let value = eval(&bindings, &car(&cdr(declaration)?)?)?;
        bindings = bindings.assoc(name, value);
        iter = cell.cdr.clone();
    }

    let mut result = Value::Nil;
    let mut body = cdr(args)?;
    while let Value::Cons(cell) = body {
        result = eval(&bindings, &cell.car)?;
        body = cell.cdr.clone();
    }
    Ok(result)
}

fn native_define(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("define", args, 2)?;

    let name = match car(args)? {
        Value::Symbol(sym) => sym,
        other => {
            return Err(Error::InvalidParameter(format!(
                "define expects a symbol name, got {other}"
            )));
        }
    };
    let value = eval(env, &car(&cdr(args)?)?)?;

    // the sole destructive environment operation: every holder of this
    // frame observes the new binding
    env.define(name, value.clone());
    Ok(value)
}

// ============================================================================
// Eager Natives
// ============================================================================

fn native_eval(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("eval", args, 1)?;
    let argument = eval(env, &car(args)?)?;
    eval(env, &argument)
}

fn native_load(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("load", args, 1)?;

    let path = match eval(env, &car(args)?)? {
        Value::Str(path) => path,
        other => {
            return Err(Error::TypeMismatch {
                name: "load",
                expected: "a string path",
                got: other.to_string(),
            });
        }
    };

    debug!("loading {path}");
    let contents = fs::read_to_string(&path)?;
    read_eval_all(env, &contents)
}

fn native_plus(env: &Bindings, args: &Value) -> Result<Value, Error> {
    let mut sum = 0i64;
    let mut iter = eval_args(env, args)?;
    while let Value::Cons(cell) = iter {
        match cell.car {
            Value::Integer(n) => sum += n,
            ref other => {
                return Err(Error::TypeMismatch {
                    name: "+",
                    expected: "integer",
                    got: other.to_string(),
                });
            }
        }
        iter = cell.cdr.clone();
    }
    Ok(Value::Integer(sum))
}

fn native_car(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("car", args, 1)?;
    let argument = eval(env, &car(args)?)?;
    car(&argument)
}

fn native_cdr(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("cdr", args, 1)?;
    let argument = eval(env, &car(args)?)?;
    cdr(&argument)
}

fn native_cons(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("cons", args, 2)?;
    let head = eval(env, &car(args)?)?;
    let tail = eval(env, &car(&cdr(args)?)?)?;
    Ok(cons(head, tail))
}

fn native_print(env: &Bindings, args: &Value) -> Result<Value, Error> {
    let mut last = Value::Nil;
    let mut iter = eval_args(env, args)?;
    while let Value::Cons(cell) = iter {
        println!("{}", cell.car);
        last = cell.car.clone();
        iter = cell.cdr.clone();
    }
    Ok(last)
}

fn native_equal(env: &Bindings, args: &Value) -> Result<Value, Error> {
    require_len("=", args, 2)?;
    let evaluated = eval_args(env, args)?;
    let a = car(&evaluated)?;
    let b = car(&cdr(&evaluated)?)?;
    if a == b {
        Ok(Value::symbol("t"))
    } else {
        Ok(Value::Nil)
    }
}

//! The recursive evaluator.
//!
//! `eval` dispatches on value shape; `apply` resolves the callee and routes
//! between native functions (which get their argument list raw) and lambda
//! lists. Evaluation is a plain recursive call tree: deeply nested or
//! self-recursive input can exhaust the host stack, and that failure mode is
//! deliberately left fatal rather than guarded.

use once_cell::sync::Lazy;

use dynalisp::{Bindings, ConsCell, Error, InternedSymbol, Value, car, cdr, read, read_all};

static LAMBDA: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("lambda"));

/// Evaluate one expression in the given environment.
pub fn eval(env: &Bindings, value: &Value) -> Result<Value, Error> {
    match value {
        // Self-evaluating forms
        Value::Integer(_) | Value::Str(_) | Value::Nil => Ok(value.clone()),

        Value::Symbol(sym) => env
            .lookup(*sym)
            .ok_or_else(|| Error::UndefinedSymbol(sym.resolve())),

        Value::Native(_) => Err(Error::NotEvaluable),

        Value::Cons(cell) => {
            if !value.is_list() {
                // The reader only produces proper lists, so a dotted pair in
                // expression position means the host built a malformed tree.
                panic!("eval: dotted pair in expression position");
            }

            // a lambda expression is data until it is applied
            if is_lambda_form(value) {
                return Ok(value.clone());
            }

            apply(env, &cell.car, &cell.cdr)
        }
    }
}

/// Apply a callee expression to a raw, unevaluated argument list.
///
/// The callee is evaluated first (so a symbol bound to a function works).
/// Native functions receive the raw argument list and decide their own
/// evaluation policy; lambda lists bind their parameter(s) onto the
/// CALL-SITE environment - scoping is dynamic, nothing is captured when a
/// lambda expression is created.
pub fn apply(env: &Bindings, fn_expr: &Value, raw_args: &Value) -> Result<Value, Error> {
    let target = eval(env, fn_expr)?;

    if let Value::Native(native) = &target {
        return native(env, raw_args);
    }

    if target.is_list() && is_lambda_form(&target) {
        if let Value::Cons(cell) = &target {
            return apply_lambda(env, cell, raw_args);
        }
    }

    Err(Error::NotCallable)
}

fn is_lambda_form(value: &Value) -> bool {
    match value {
        Value::Cons(cell) => matches!(&cell.car, Value::Symbol(sym) if *sym == *LAMBDA),
        _ => false,
    }
}

fn apply_lambda(env: &Bindings, lambda: &ConsCell, raw_args: &Value) -> Result<Value, Error> {
    let param = car(&lambda.cdr)?;

    let frame = match &param {
        // a single-symbol parameter takes the whole argument list, raw;
        // this is what rest-args and quote-like helpers are built from
        Value::Symbol(sym) => env.assoc(*sym, raw_args.clone()),
        list if list.is_list() => bind_positional(env, list, raw_args)?,
        other => {
            return Err(Error::InvalidParameter(format!(
                "lambda parameter must be a symbol or a list of symbols, got {other}"
            )));
        }
    };

    // body forms run in sequence; an empty body yields ()
    let mut result = Value::Nil;
    let mut body = cdr(&lambda.cdr)?;
    while let Value::Cons(cell) = body {
        result = eval(&frame, &cell.car)?;
        body = cell.cdr.clone();
    }
    Ok(result)
}

fn bind_positional(env: &Bindings, params: &Value, raw_args: &Value) -> Result<Bindings, Error> {
    if params.list_len() != raw_args.list_len() {
        return Err(Error::ArityMismatch {
            name: "lambda",
            expected: params.list_len(),
            got: raw_args.list_len(),
        });
    }

    let mut bindings = env.clone();
    let mut param_iter = params.clone();
    let mut arg_iter = raw_args.clone();
    while let (Value::Cons(param_cell), Value::Cons(arg_cell)) = (&param_iter, &arg_iter) {
        let name = match &param_cell.car {
            Value::Symbol(sym) => *sym,
            other => {
                return Err(Error::InvalidParameter(format!(
                    "parameter is not a symbol: {other}"
                )));
            }
        };

        // arguments evaluate in the call-site environment, not in the
        // partially built frame
        let value = eval(env, &arg_cell.car)?;
        bindings = bindings.assoc(name, value);

        let next_params = param_cell.cdr.clone();
        let next_args = arg_cell.cdr.clone();
        param_iter = next_params;
        arg_iter = next_args;
    }

    Ok(bindings)
}

/// Read one expression from `text` and evaluate it.
pub fn read_eval(env: &Bindings, text: &str) -> Result<Value, Error> {
    let sexp = read(text)?;
    eval(env, &sexp)
}

/// Read and evaluate every top-level expression in `text`, returning the
/// last value (or `()` when there is none).
pub fn read_eval_all(env: &Bindings, text: &str) -> Result<Value, Error> {
    let sexps = read_all(text)?;
    let mut result = Value::Nil;
    let mut iter = sexps;
    while let Value::Cons(cell) = iter {
        result = eval(env, &cell.car)?;
        iter = cell.cdr.clone();
    }
    Ok(result)
}

//! Error taxonomy shared by the reader and the evaluator.
//!
//! Every fallible operation in the core returns `Result<_, Error>` and
//! propagates with `?`; there is no exception-handling form in the language
//! itself, so errors travel unchanged to whichever driver started the
//! evaluation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Reader errors
    #[error("no s-expression found")]
    NoNextSexp,
    #[error("closing paren missing")]
    UnfinishedSexp,
    #[error("closing quote missing")]
    UnfinishedString,
    #[error("cannot read `{0}` as a value")]
    MalformedToken(String),

    // Evaluator errors
    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),
    #[error("value cannot be evaluated")]
    NotEvaluable,
    #[error("not a function")]
    NotCallable,
    #[error("{name}: expected {expected} argument(s), got {got}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("{name}: expected {expected}, got {got}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        got: String,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

//! The reader: text in, s-expression values out.
//!
//! `read` consumes exactly one expression from the front of the text;
//! `read_all` consumes a whole sequence of top-level expressions and treats
//! running out of input as its normal stop condition.

use crate::error::Error;
use crate::language::{Value, list_from_vec};
use crate::lexer::{Lexer, Token};

struct Reader {
    lexer: Lexer,
    peeked: Option<Token>,
}

impl Reader {
    fn new(text: &str) -> Self {
        Reader {
            lexer: Lexer::new(text),
            peeked: None,
        }
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek_token(&mut self) -> Result<Token, Error> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.clone().expect("just filled"))
    }

    fn parse_next(&mut self) -> Result<Value, Error> {
        match self.next_token()? {
            Token::Eof => Err(Error::NoNextSexp),
            Token::LParen => self.parse_list(),
            Token::RParen => Err(Error::MalformedToken(")".to_string())),
            Token::Integer(n) => Ok(Value::Integer(n)),
            Token::Str(s) => Ok(Value::Str(s)),
            Token::Symbol(s) => Ok(Value::symbol(&s)),
        }
    }

    /// Called with the opening paren already consumed. Collects elements
    /// until the matching close paren; running out of input first is the
    /// unfinished-sexp error, distinct from the clean end-of-input above.
    fn parse_list(&mut self) -> Result<Value, Error> {
        let mut elements = Vec::new();
        loop {
            match self.peek_token()? {
                Token::RParen => {
                    self.next_token()?;
                    return Ok(list_from_vec(elements));
                }
                Token::Eof => return Err(Error::UnfinishedSexp),
                _ => elements.push(self.parse_next()?),
            }
        }
    }
}

/// Parse exactly one s-expression from the start of `text`. Anything after
/// it is left alone. Exhausted input is `Error::NoNextSexp`.
pub fn read(text: &str) -> Result<Value, Error> {
    Reader::new(text).parse_next()
}

/// Parse every top-level s-expression in `text` and return them, in order,
/// as a proper list.
pub fn read_all(text: &str) -> Result<Value, Error> {
    let mut reader = Reader::new(text);
    let mut sexps = Vec::new();
    loop {
        match reader.parse_next() {
            Ok(value) => sexps.push(value),
            Err(Error::NoNextSexp) => return Ok(list_from_vec(sexps)),
            Err(err) => return Err(err),
        }
    }
}

//! Environment for variable bindings.
//!
//! Bindings form an append-only, singly-linked chain of frames, one binding
//! per frame. Extension (`assoc`) returns a new head chained onto the old
//! one without touching it, so chains extended from a common ancestor share
//! structure. Lookup walks nearest-first, which is what makes the most
//! recent binding for a name win.
//!
//! The one destructive operation is `define`: it rewrites the head frame in
//! place, so every holder of that frame node observes the new binding. Node
//! identity is explicit (`Rc<RefCell<..>>`), and the whole structure is
//! single-threaded on purpose - concurrent `define` calls on a shared frame
//! would race.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::interner::InternedSymbol;
use crate::language::Value;

struct Frame {
    name: InternedSymbol,
    value: Value,
    next: Option<Bindings>,
}

/// A shared handle to the head frame of a binding chain. Cheap to clone;
/// clones alias the same frame node.
#[derive(Clone)]
pub struct Bindings {
    head: Rc<RefCell<Frame>>,
}

impl Bindings {
    /// Start a new chain holding a single binding
    pub fn root(name: &str, value: Value) -> Self {
        Bindings {
            head: Rc::new(RefCell::new(Frame {
                name: InternedSymbol::new(name),
                value,
                next: None,
            })),
        }
    }

    /// Non-destructive extension: a new head frame chained onto this one.
    /// The receiver and everything behind it are untouched.
    pub fn assoc(&self, name: InternedSymbol, value: Value) -> Self {
        Bindings {
            head: Rc::new(RefCell::new(Frame {
                name,
                value,
                next: Some(self.clone()),
            })),
        }
    }

    /// `assoc` with an uninterned name
    pub fn assoc_str(&self, name: &str, value: Value) -> Self {
        self.assoc(InternedSymbol::new(name), value)
    }

    /// Walk the chain nearest-first and return the first match
    pub fn lookup(&self, name: InternedSymbol) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let next = {
                let frame = current.head.borrow();
                if frame.name == name {
                    return Some(frame.value.clone());
                }
                frame.next.clone()
            };
            match next {
                Some(bindings) => current = bindings,
                None => return None,
            }
        }
    }

    /// Destructively add a binding to the head frame.
    ///
    /// The current head contents move into a fresh node behind the new
    /// binding, so the head node keeps its identity and every environment
    /// sharing it sees the definition.
    pub fn define(&self, name: InternedSymbol, value: Value) {
        let displaced = {
            let frame = self.head.borrow();
            Frame {
                name: frame.name,
                value: frame.value.clone(),
                next: frame.next.clone(),
            }
        };
        *self.head.borrow_mut() = Frame {
            name,
            value,
            next: Some(Bindings {
                head: Rc::new(RefCell::new(displaced)),
            }),
        };
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<bindings")?;
        let mut current = Some(self.clone());
        while let Some(bindings) = current {
            let frame = bindings.head.borrow();
            write!(f, " {}", frame.name)?;
            current = frame.next.clone();
        }
        write!(f, ">")
    }
}

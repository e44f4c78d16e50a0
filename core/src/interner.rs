use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// A symbol interned in the global string interner.
///
/// Two symbols spelled the same way always intern to the same key, so
/// equality by name reduces to a key comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedSymbol(DefaultSymbol);

impl InternedSymbol {
    /// Intern a name and return its symbol
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER.write().unwrap();
        InternedSymbol(interner.get_or_intern(name))
    }

    /// Resolve the symbol back to an owned name
    pub fn resolve(&self) -> String {
        self.with_str(str::to_string)
    }

    /// Run a function against the symbol's name without allocating
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap();
        let name = interner
            .resolve(self.0)
            .expect("interned symbol should always resolve");
        f(name)
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|name| write!(f, "{name}"))
    }
}

//! Shared syntax nodes.

use std::fmt;

use tache_common::Span;

/// An identifier inside an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// An identifier without source location.
    pub fn dummy(name: impl Into<String>) -> Self {
        Self::new(name, Span::DUMMY)
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::dummy(name)
    }
}

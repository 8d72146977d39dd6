//! Evaluation context.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Identifier resolution for the evaluator.
///
/// Both operations are total: an identifier bound nowhere resolves to
/// `Value::None`.
pub trait Context {
    /// Resolve `identifier`.
    fn lookup(&self, identifier: &str) -> Value;

    /// The innermost value, target of the implicit iterator `.`.
    fn top(&self) -> Value;
}

impl<C: Context + ?Sized> Context for &C {
    fn lookup(&self, identifier: &str) -> Value {
        (**self).lookup(identifier)
    }

    fn top(&self) -> Value {
        (**self).top()
    }
}

struct Scope {
    value: Value,
    parent: Option<Arc<Scope>>,
}

/// A persistent stack of context values.
///
/// Pushing returns a new stack that shares every outer scope with the
/// receiver, so renderers can enter and leave sections without copying.
#[derive(Clone, Default)]
pub struct ContextStack {
    top: Option<Arc<Scope>>,
}

impl ContextStack {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with a single scope.
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self::new().push(value)
    }

    /// A new context with `value` as its innermost scope.
    pub fn push(&self, value: impl Into<Value>) -> Self {
        Self {
            top: Some(Arc::new(Scope {
                value: value.into(),
                parent: self.top.clone(),
            })),
        }
    }

    /// The context without its innermost scope.
    pub fn pop(&self) -> Self {
        Self {
            top: self.top.as_ref().and_then(|scope| scope.parent.clone()),
        }
    }

    /// Number of scopes.
    pub fn depth(&self) -> usize {
        self.scopes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Scope values, innermost first.
    pub fn scopes(&self) -> impl Iterator<Item = &Value> {
        std::iter::successors(self.top.as_deref(), |scope| scope.parent.as_deref())
            .map(|scope| &scope.value)
    }
}

impl Context for ContextStack {
    fn lookup(&self, identifier: &str) -> Value {
        self.scopes()
            .map(|value| value.get(identifier))
            .find(|value| !value.is_none())
            .unwrap_or_default()
    }

    fn top(&self) -> Value {
        self.scopes().next().cloned().unwrap_or_default()
    }
}

impl fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.scopes()).finish()
    }
}

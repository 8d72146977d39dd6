//! The filter capability and the closure-backed filter helper.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::value::{Cluster, Value};

/// Outcome of applying a filter.
///
/// `Ok(None)` means the filter produced neither a value nor an error; the
/// evaluator renders that as `Value::None`.
pub type FilterResult = Result<Option<Value>, FilterError>;

/// A value transformation invoked from a template expression.
pub trait Filter: Send + Sync {
    /// Transform `argument`.
    fn apply(&self, argument: Value) -> FilterResult;

    /// Bind `argument` and return a filter awaiting the remaining ones.
    ///
    /// Returns `None` when the filter takes no further arguments.
    fn curry(&self, _argument: Value) -> Option<Arc<dyn Filter>> {
        None
    }

    fn name(&self) -> &str {
        "filter"
    }
}

/// Error reported by a filter implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FilterError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FilterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable through `source()`.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type FilterFn = dyn Fn(&[Value]) -> FilterResult + Send + Sync;

/// A filter of fixed arity backed by a closure.
///
/// Arguments arrive one at a time: each curry binds one more, and the
/// final `apply` calls the closure with all of them in order.
#[derive(Clone)]
pub struct FnFilter {
    name: Arc<str>,
    arity: usize,
    bound: Vec<Value>,
    func: Arc<FilterFn>,
}

impl FnFilter {
    /// `arity` is clamped to at least one.
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> FilterResult + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            arity: arity.max(1),
            bound: Vec::new(),
            func: Arc::new(func),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Arguments bound so far by currying.
    pub fn bound(&self) -> &[Value] {
        &self.bound
    }

    fn remaining(&self) -> usize {
        self.arity - self.bound.len()
    }
}

impl Filter for FnFilter {
    fn apply(&self, argument: Value) -> FilterResult {
        if self.remaining() != 1 {
            return Err(FilterError::new(format!(
                "filter `{}` expects {} arguments, got {}",
                self.name,
                self.arity,
                self.bound.len() + 1
            )));
        }
        let mut args = Vec::with_capacity(self.arity);
        args.extend(self.bound.iter().cloned());
        args.push(argument);
        (self.func)(&args)
    }

    fn curry(&self, argument: Value) -> Option<Arc<dyn Filter>> {
        if self.remaining() <= 1 {
            return None;
        }
        let mut next = self.clone();
        next.bound.push(argument);
        Some(Arc::new(next))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("bound", &self.bound)
            .finish()
    }
}

/// Cluster exposing nothing but a filter. Curried filters are wrapped in
/// one before they are handed back as values.
pub(crate) struct FilterCluster {
    filter: Arc<dyn Filter>,
}

impl FilterCluster {
    pub(crate) fn new(filter: Arc<dyn Filter>) -> Self {
        Self { filter }
    }
}

impl Cluster for FilterCluster {
    fn name(&self) -> &str {
        self.filter.name()
    }

    fn filter(&self) -> Option<&dyn Filter> {
        Some(self.filter.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn concat() -> FnFilter {
        FnFilter::new("concat", 3, |args| {
            let joined: String = args.iter().filter_map(Value::as_str).collect();
            Ok(Some(Value::from(joined)))
        })
    }

    #[test]
    fn test_curry_binds_in_order() {
        let f = concat();
        let g = f.curry(Value::from("a")).unwrap();
        let h = g.curry(Value::from("b")).unwrap();
        assert_eq!(h.apply(Value::from("c")).unwrap(), Some(Value::from("abc")));
        // The original is untouched.
        assert!(f.bound().is_empty());
    }

    #[test]
    fn test_curry_past_arity() {
        let f = concat();
        let g = f.curry(Value::None).unwrap();
        let h = g.curry(Value::None).unwrap();
        assert!(h.curry(Value::None).is_none());

        let unary = FnFilter::new("id", 1, |args| Ok(Some(args[0].clone())));
        assert!(unary.curry(Value::None).is_none());
    }

    #[test]
    fn test_apply_too_early() {
        let err = concat().apply(Value::from("a")).unwrap_err();
        assert_eq!(err.to_string(), "filter `concat` expects 3 arguments, got 1");
    }

    #[test]
    fn test_zero_arity_clamped() {
        let f = FnFilter::new("const", 0, |_| Ok(Some(Value::int(1))));
        assert_eq!(f.arity(), 1);
        assert_eq!(f.apply(Value::None).unwrap(), Some(Value::int(1)));
    }

    #[test]
    fn test_error_source() {
        let parse = "x".parse::<i64>().unwrap_err();
        let err = FilterError::with_source("not a number", parse);
        assert_eq!(err.message(), "not a number");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_filter_cluster_name() {
        let value = Value::filter(concat());
        assert_eq!(format!("{:?}", value), "<cluster:concat>");
    }
}

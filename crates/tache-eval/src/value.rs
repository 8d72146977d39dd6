//! Runtime values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::filter::{Filter, FilterCluster, FilterError, FnFilter};

/// A runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// No value. Undefined names and missing keys resolve to this.
    #[default]
    None,
    /// Boolean, number or text.
    Scalar(Scalar),
    /// Ordered collection
    Sequence(Arc<Vec<Value>>),
    /// Key-value mapping
    Mapping(Arc<HashMap<String, Value>>),
    /// Extension point, see [`Cluster`].
    Cluster(Arc<dyn Cluster>),
}

/// Scalar payload of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

/// Capabilities a host object exposes to templates.
///
/// Every method has a default, so a cluster only implements what it
/// supports: a filter, keyed access, or both.
pub trait Cluster: Send + Sync {
    /// Name used in diagnostics and `Debug` output.
    fn name(&self) -> &str;

    /// The filter capability, if any.
    fn filter(&self) -> Option<&dyn Filter> {
        None
    }

    /// Keyed subscript used by `cluster.key` and context lookups.
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Whether sections render for this value. Consumed by the renderer.
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Value {
    pub fn bool(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }

    pub fn int(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }

    pub fn float(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    pub fn sequence<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Sequence(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn mapping<K: Into<String>, V: Into<Value>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Value::Mapping(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn cluster(cluster: impl Cluster + 'static) -> Self {
        Value::Cluster(Arc::new(cluster))
    }

    /// Wrap a filter into a value that exposes only the filter capability.
    pub fn filter(filter: impl Filter + 'static) -> Self {
        Self::from_filter(Arc::new(filter))
    }

    pub fn from_filter(filter: Arc<dyn Filter>) -> Self {
        Value::Cluster(Arc::new(FilterCluster::new(filter)))
    }

    /// A one-argument filter backed by a closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Option<Value>, FilterError> + Send + Sync + 'static,
    {
        Self::filter(FnFilter::new(name, 1, move |args: &[Value]| f(&args[0])))
    }

    /// An `arity`-argument filter; all but the last argument are curried.
    pub fn from_fn_n<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Option<Value>, FilterError> + Send + Sync + 'static,
    {
        Self::filter(FnFilter::new(name, arity, f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Scalar(Scalar::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_cluster(&self) -> Option<&dyn Cluster> {
        match self {
            Value::Cluster(c) => Some(c.as_ref()),
            _ => None,
        }
    }

    /// The filter capability. Only clusters can carry one.
    pub fn as_filter(&self) -> Option<&dyn Filter> {
        self.as_cluster().and_then(|c| c.filter())
    }

    /// Key into this value. Missing keys and values without keyed access
    /// give `Value::None`.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Mapping(map) => map.get(key).cloned().unwrap_or_default(),
            Value::Cluster(c) => c.get(key).unwrap_or_default(),
            Value::None | Value::Scalar(_) | Value::Sequence(_) => Value::None,
        }
    }

    /// Short variant description for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Int(_)) => "int",
            Value::Scalar(Scalar::Float(_)) => "float",
            Value::Scalar(Scalar::Str(_)) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Cluster(_) => "cluster",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Scalar(Scalar::Str(s)) => write!(f, "{:?}", s),
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                // Sorted so output is stable across runs.
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                write!(f, "{{")?;
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Cluster(c) => write!(f, "<cluster:{}>", c.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            // Clusters are opaque, only identity is meaningful.
            (Value::Cluster(a), Value::Cluster(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(Arc::new(items))
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Mapping(Arc::new(map))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Person;

    impl Cluster for Person {
        fn name(&self) -> &str {
            "Person"
        }

        fn get(&self, key: &str) -> Option<Value> {
            (key == "name").then(|| Value::from("Ada"))
        }
    }

    #[test]
    fn test_get_mapping() {
        let value = Value::mapping([("name", "World")]);
        assert_eq!(value.get("name"), Value::from("World"));
        assert_eq!(value.get("missing"), Value::None);
    }

    #[test]
    fn test_get_cluster() {
        let value = Value::cluster(Person);
        assert_eq!(value.get("name"), Value::from("Ada"));
        assert_eq!(value.get("age"), Value::None);
    }

    #[test]
    fn test_get_non_keyable() {
        assert_eq!(Value::None.get("x"), Value::None);
        assert_eq!(Value::int(3).get("x"), Value::None);
        assert_eq!(Value::sequence([1i64, 2]).get("first"), Value::None);
    }

    #[test]
    fn test_cluster_identity() {
        let a = Value::cluster(Person);
        let b = Value::cluster(Person);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_none_is_not_a_scalar() {
        assert_ne!(Value::None, Value::from(""));
        assert_ne!(Value::None, Value::bool(false));
        assert_ne!(Value::None, Value::int(0));
    }

    #[test]
    fn test_as_filter() {
        assert!(Value::cluster(Person).as_filter().is_none());
        assert!(Value::from("upper").as_filter().is_none());
        let upper = Value::from_fn("upper", |v| {
            Ok(v.as_str().map(|s| Value::from(s.to_uppercase())))
        });
        assert!(upper.as_filter().is_some());
    }

    #[test]
    fn test_debug() {
        let value = Value::mapping([
            ("b", Value::sequence([Value::int(1), Value::None])),
            ("a", Value::from("x")),
        ]);
        assert_eq!(format!("{:?}", value), r#"{a: "x", b: [1, None]}"#);
        assert_eq!(format!("{:?}", Value::cluster(Person)), "<cluster:Person>");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}

//! Expression evaluator for Tache.
//!
//! This crate resolves expression trees against a context stack:
//! identifiers, the implicit iterator `.`, scoped keys and (curried) filter
//! applications. It is the only part of template rendering that can fail
//! on an expression; see [`EvalError`] for the failure kinds.
//!
//! ```
//! use tache_eval::{evaluate, ContextStack, Value};
//! use tache_syntax::Expr;
//!
//! let context = ContextStack::with_value(Value::mapping([
//!     ("name", Value::from("World")),
//!     ("upper", Value::from_fn("upper", |v| {
//!         Ok(v.as_str().map(|s| Value::from(s.to_uppercase())))
//!     })),
//! ]));
//!
//! let expr = Expr::call(Expr::identifier("upper"), [Expr::identifier("name")]).unwrap();
//! assert_eq!(evaluate(&expr, &context).unwrap(), Value::from("WORLD"));
//! ```

mod context;
mod eval;
pub mod filter;
pub mod value;

pub use context::{Context, ContextStack};
pub use eval::{EvalError, EvalErrorKind, Evaluator, evaluate};
pub use filter::{Filter, FilterError, FilterResult, FnFilter};
pub use value::{Cluster, Scalar, Value};

//! Expression evaluation.

use tache_common::Span;
use tache_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use tache_syntax::{Expr, ExprKind};
use thiserror::Error;

use crate::filter::{Filter, FilterError};
use crate::{Context, Value};

/// Evaluation errors.
///
/// Every variant carries the span of the filtered expression that failed.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Missing filter")]
    MissingFilter { filter: String, span: Span },

    #[error("Not a filter")]
    NotAFilter {
        filter: String,
        found: &'static str,
        span: Span,
    },

    #[error("Too many arguments")]
    TooManyArguments { filter: String, span: Span },

    #[error("{source}")]
    FilterExecution {
        #[source]
        source: FilterError,
        span: Span,
    },
}

/// Discriminant of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    MissingFilter,
    NotAFilter,
    TooManyArguments,
    FilterExecution,
}

impl EvalError {
    pub fn kind(&self) -> EvalErrorKind {
        match self {
            EvalError::MissingFilter { .. } => EvalErrorKind::MissingFilter,
            EvalError::NotAFilter { .. } => EvalErrorKind::NotAFilter,
            EvalError::TooManyArguments { .. } => EvalErrorKind::TooManyArguments,
            EvalError::FilterExecution { .. } => EvalErrorKind::FilterExecution,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            EvalError::MissingFilter { span, .. }
            | EvalError::NotAFilter { span, .. }
            | EvalError::TooManyArguments { span, .. }
            | EvalError::FilterExecution { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind() {
            EvalErrorKind::MissingFilter => ErrorCode::MissingFilter,
            EvalErrorKind::NotAFilter => ErrorCode::NotAFilter,
            EvalErrorKind::TooManyArguments => ErrorCode::TooManyArguments,
            EvalErrorKind::FilterExecution => ErrorCode::FilterFailed,
        }
    }

    /// Build a diagnostic pointing at the failing expression.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (kind, label) = match self {
            EvalError::MissingFilter { filter, .. } => {
                (DiagnosticKind::Eval, format!("`{}` is not defined", filter))
            }
            EvalError::NotAFilter { filter, found, .. } => (
                DiagnosticKind::Eval,
                format!("`{}` is not a filter (found {})", filter, found),
            ),
            EvalError::TooManyArguments { filter, .. } => (
                DiagnosticKind::Eval,
                format!("`{}` takes no further arguments", filter),
            ),
            EvalError::FilterExecution { .. } => {
                (DiagnosticKind::Filter, "filter failed here".to_string())
            }
        };

        let mut diag = Diagnostic::error(kind, self.span(), self.to_string())
            .with_code(self.code())
            .with_label(Label::new(self.span(), label));

        if let EvalError::FilterExecution { source, .. } = self {
            let mut cause = std::error::Error::source(source);
            while let Some(err) = cause {
                diag = diag.with_note(format!("caused by: {}", err));
                cause = std::error::Error::source(err);
            }
        }

        diag
    }
}

/// The expression evaluator.
///
/// Holds no state: the context is passed to every call and each node
/// returns its own result, so one evaluator can serve any number of
/// evaluations, on any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `expr` against `context`.
    #[tracing::instrument(level = "trace", skip_all, fields(expr = %expr))]
    pub fn evaluate<C: Context + ?Sized>(
        &self,
        expr: &Expr,
        context: &C,
    ) -> Result<Value, EvalError> {
        let result = self.eval(expr, context);
        if let Err(err) = &result {
            tracing::debug!(kind = ?err.kind(), span = ?err.span(), "evaluation failed: {}", err);
        }
        result
    }

    fn eval<C: Context + ?Sized>(&self, expr: &Expr, context: &C) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Identifier(ident) => Ok(context.lookup(&ident.name)),

            ExprKind::ImplicitIterator => Ok(context.top()),

            ExprKind::Scoped { base, name } => {
                let base_val = self.eval(base, context)?;
                Ok(base_val.get(&name.name))
            }

            ExprKind::Filtered {
                filter,
                argument,
                curried,
            } => {
                // Filter side first, then the argument.
                let filter_val = self.eval(filter, context)?;
                let argument_val = self.eval(argument, context)?;

                match filter_val.as_filter() {
                    Some(f) => self.invoke(f, argument_val, *curried, filter, expr.span),
                    None if filter_val.is_none() => Err(EvalError::MissingFilter {
                        filter: filter.to_string(),
                        span: expr.span,
                    }),
                    None => Err(EvalError::NotAFilter {
                        filter: filter.to_string(),
                        found: filter_val.kind_name(),
                        span: expr.span,
                    }),
                }
            }
        }
    }

    fn invoke(
        &self,
        filter: &dyn Filter,
        argument: Value,
        curried: bool,
        filter_expr: &Expr,
        span: Span,
    ) -> Result<Value, EvalError> {
        if curried {
            return filter
                .curry(argument)
                .map(Value::from_filter)
                .ok_or_else(|| EvalError::TooManyArguments {
                    filter: filter_expr.to_string(),
                    span,
                });
        }

        match filter.apply(argument) {
            Ok(Some(value)) => Ok(value),
            Err(source) => Err(EvalError::FilterExecution { source, span }),
            Ok(None) => {
                tracing::debug!(filter = filter.name(), "filter returned no value and no error");
                Ok(Value::None)
            }
        }
    }
}

/// Evaluate `expr` against `context` with a fresh [`Evaluator`].
pub fn evaluate<C: Context + ?Sized>(expr: &Expr, context: &C) -> Result<Value, EvalError> {
    Evaluator::new().evaluate(expr, context)
}

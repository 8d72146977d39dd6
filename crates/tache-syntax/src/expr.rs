//! Expression AST nodes.

use std::fmt;

use crate::Ident;
use tache_common::Span;

/// An expression found inside a template tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Plain name `user`, resolved through the context stack.
    Identifier(Ident),

    /// Implicit iterator `.`, the innermost context value.
    ImplicitIterator,

    /// Scoped access `user.name` or `.name`.
    Scoped { base: Box<Expr>, name: Ident },

    /// Filter application `f(x)`.
    ///
    /// When `curried` is set the argument is bound without invoking the
    /// filter, which is how the parser lowers every argument but the last
    /// of `f(a, b)`.
    Filtered {
        filter: Box<Expr>,
        argument: Box<Expr>,
        curried: bool,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::identifier_at(name, Span::DUMMY)
    }

    pub fn identifier_at(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Identifier(Ident::new(name, span)), span)
    }

    pub fn implicit_iterator() -> Self {
        Self::implicit_iterator_at(Span::DUMMY)
    }

    pub fn implicit_iterator_at(span: Span) -> Self {
        Self::new(ExprKind::ImplicitIterator, span)
    }

    /// `base.name`. The span covers the base and the key.
    pub fn scoped(base: Expr, name: impl Into<Ident>) -> Self {
        let name = name.into();
        let span = base.span.merge(name.span);
        Self::new(
            ExprKind::Scoped {
                base: Box::new(base),
                name,
            },
            span,
        )
    }

    /// `filter(argument)`, curried or applied.
    pub fn filtered(filter: Expr, argument: Expr, curried: bool) -> Self {
        let span = filter.span.merge(argument.span);
        Self::new(
            ExprKind::Filtered {
                filter: Box::new(filter),
                argument: Box::new(argument),
                curried,
            },
            span,
        )
    }

    /// Lower `filter(a1, ..., an)`: every argument but the last is curried,
    /// the last one is applied.
    ///
    /// Returns `None` for an empty argument list, which has no tree form.
    pub fn call(filter: Expr, args: impl IntoIterator<Item = Expr>) -> Option<Self> {
        let mut args = args.into_iter().peekable();
        let mut expr = filter;
        let mut any = false;
        while let Some(arg) = args.next() {
            let curried = args.peek().is_some();
            expr = Self::filtered(expr, arg, curried);
            any = true;
        }
        any.then_some(expr)
    }

    /// Number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Identifier(_) | ExprKind::ImplicitIterator => 1,
            ExprKind::Scoped { base, .. } => 1 + base.node_count(),
            ExprKind::Filtered {
                filter, argument, ..
            } => 1 + filter.node_count() + argument.node_count(),
        }
    }

    /// Depth of this tree, which bounds evaluation recursion.
    pub fn depth(&self) -> usize {
        match &self.kind {
            ExprKind::Identifier(_) | ExprKind::ImplicitIterator => 1,
            ExprKind::Scoped { base, .. } => 1 + base.depth(),
            ExprKind::Filtered {
                filter, argument, ..
            } => 1 + filter.depth().max(argument.depth()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Identifier(ident) => write!(f, "{}", ident),
            ExprKind::ImplicitIterator => write!(f, "."),
            ExprKind::Scoped { base, name } => {
                if matches!(base.kind, ExprKind::ImplicitIterator) {
                    write!(f, ".{}", name)
                } else {
                    write!(f, "{}.{}", base, name)
                }
            }
            ExprKind::Filtered {
                argument, curried, ..
            } => {
                // Walk down the curried chain to recover `f(a, b, c)`.
                let mut args = vec![argument.as_ref()];
                let mut head = self.filter_head();
                while let ExprKind::Filtered {
                    argument,
                    curried: true,
                    ..
                } = &head.kind
                {
                    args.push(argument.as_ref());
                    head = head.filter_head();
                }
                write!(f, "{}(", head)?;
                for (i, arg) in args.iter().rev().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                if *curried {
                    write!(f, ", ...")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Expr {
    fn filter_head(&self) -> &Expr {
        match &self.kind {
            ExprKind::Filtered { filter, .. } => filter,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_call_lowering() {
        let expr = Expr::call(
            Expr::identifier("f"),
            vec![Expr::identifier("a"), Expr::identifier("b")],
        )
        .unwrap();

        let expected = Expr::filtered(
            Expr::filtered(Expr::identifier("f"), Expr::identifier("a"), true),
            Expr::identifier("b"),
            false,
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_call_without_arguments() {
        assert!(Expr::call(Expr::identifier("f"), Vec::new()).is_none());
    }

    #[test]
    fn test_display() {
        let scoped = Expr::scoped(Expr::scoped(Expr::identifier("a"), "b"), "c");
        assert_eq!(scoped.to_string(), "a.b.c");

        let dotted = Expr::scoped(Expr::implicit_iterator(), "name");
        assert_eq!(dotted.to_string(), ".name");

        let call = Expr::call(
            Expr::identifier("format"),
            vec![Expr::identifier("date"), Expr::implicit_iterator()],
        )
        .unwrap();
        assert_eq!(call.to_string(), "format(date, .)");

        let nested = Expr::call(
            Expr::identifier("upper"),
            vec![Expr::call(Expr::identifier("trim"), vec![dotted]).unwrap()],
        )
        .unwrap();
        assert_eq!(nested.to_string(), "upper(trim(.name))");
    }

    #[test]
    fn test_display_dangling_curry() {
        let expr = Expr::filtered(Expr::identifier("f"), Expr::identifier("a"), true);
        assert_eq!(expr.to_string(), "f(a, ...)");
    }

    #[test]
    fn test_filtered_span_covers_children() {
        let filter = Expr::identifier_at("upper", Span::from_usize(3, 8));
        let arg = Expr::identifier_at("name", Span::from_usize(9, 13));
        let expr = Expr::filtered(filter, arg, false);
        assert_eq!(expr.span, Span::from_usize(3, 13));
    }

    #[test]
    fn test_depth_and_count() {
        let expr = Expr::call(
            Expr::scoped(Expr::identifier("filters"), "upper"),
            vec![Expr::identifier("name")],
        )
        .unwrap();
        assert_eq!(expr.node_count(), 4);
        assert_eq!(expr.depth(), 3);
    }
}

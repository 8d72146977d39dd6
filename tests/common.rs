//! Integration tests for tache-common and tache-syntax.

use pretty_assertions::assert_eq;
use tache_common::{BytePos, Span};
use tache_syntax::{Expr, ExprKind, Ident};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_len() {
    let span = Span::from_usize(5, 15);
    assert_eq!(span.len(), 10);
    assert!(Span::from_usize(5, 5).is_empty());
    assert!(Span::DUMMY.is_dummy());
}

#[test]
fn test_byte_pos_offset() {
    let pos = BytePos(10);
    assert_eq!(pos.offset(5), BytePos(15));
}

#[test]
fn test_spanned_tree() {
    // {{ format(user.birthday, "short") }} as the parser would build it,
    // with the second argument bound to an identifier.
    let source = "{{ format(user.birthday, style) }}";
    let format = Expr::identifier_at("format", Span::from_usize(3, 9));
    let user = Expr::identifier_at("user", Span::from_usize(10, 14));
    let birthday = Ident::new("birthday", Span::from_usize(15, 23));
    let style = Expr::identifier_at("style", Span::from_usize(25, 30));

    let expr = Expr::call(format, vec![Expr::scoped(user, birthday), style]).unwrap();
    assert_eq!(expr.span.text(source), Some("format(user.birthday, style"));
    assert_eq!(expr.to_string(), "format(user.birthday, style)");

    match &expr.kind {
        ExprKind::Filtered {
            filter, curried, ..
        } => {
            assert!(!curried);
            assert!(matches!(filter.kind, ExprKind::Filtered { curried: true, .. }));
            assert_eq!(filter.span.text(source), Some("format(user.birthday"));
        }
        other => panic!("expected filtered expression, got {:?}", other),
    }
}

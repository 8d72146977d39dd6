//! Expression trees for Tache.
//!
//! The template parser produces these trees from tag contents such as
//! `person.name`, `.` or `format(date, "short")`; the evaluator consumes
//! them. Trees are immutable once built.

mod ast;
mod expr;

pub use ast::*;
pub use expr::*;

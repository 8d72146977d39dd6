//! Common data structures for Tache.
//!
//! The parser attaches a `Span` to every expression node so that evaluation
//! failures can point back into the template source.

mod span;

pub use span::{BytePos, Span};

//! Graph properties: structural predicates, global
//! invariants and the query facade dispatching to them.
//! All checks borrow the graph read-only and keep no state.

mod invariants;
mod planarity;
mod query;
mod structure;

pub use query::{query, query_all, Property, PropertyValue};

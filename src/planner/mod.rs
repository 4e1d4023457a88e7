//! Predicate compiler
//!
//! Turns a criteria value into a single [`Condition`] over the target
//! entity's query space.
//!
//! # Properties
//!
//! - Total: every structurally valid criteria value compiles
//! - Pure: no I/O, no shared state; safe to run concurrently
//! - Optional filters: an absent or empty filter adds no condition
//! - Commutative: field order changes the tree shape, never the result set
//! - Joins: each relation filter gets its own existential join scope, so a
//!   many-to-many match never duplicates result rows

mod ast;
mod compiler;
mod explain;

pub use ast::{CompareOp, Condition, SortDirection, SortSpec, ID_FIELD};
pub use compiler::PredicateCompiler;
pub use explain::ExplainCondition;

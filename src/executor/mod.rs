//! In-memory query execution
//!
//! Evaluates compiled conditions against stored rows and orders the
//! results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter rows strictly according to the condition
//! 2. Sort by the requested keys, then by identifier
//! 3. Slice the requested page
//!
//! # Properties
//!
//! - NULL never satisfies a comparison, set or substring predicate
//! - Each relation condition is an existential test, so rows never repeat
//! - Counting and listing see the same filtered set

mod evaluator;
mod result;
mod sorter;

pub use evaluator::{ConditionEvaluator, NullRecord, RelationResolver};
pub use result::{Page, PageRequest};
pub use sorter::ResultSorter;

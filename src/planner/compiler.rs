//! Criteria to condition compilation
//!
//! Compilation is a single fold over the criteria sequence:
//!
//! 1. Start from [`Condition::All`]
//! 2. Translate each scalar filter into the AND of its operators
//! 3. Wrap each relation filter in its own [`Condition::Related`] scope,
//!    constraining the joined entity's identifier
//! 4. AND everything together
//!
//! Absent and empty filters contribute nothing. The function is total.

use crate::criteria::{Criteria, Criterion};
use crate::filter::{Constraint, FieldFilter};

use super::ast::{CompareOp, Condition, ID_FIELD};

/// Compiles criteria into store conditions
pub struct PredicateCompiler;

impl PredicateCompiler {
    /// Compiles a criteria value; `None` means no filtering
    pub fn compile<C: Criteria>(criteria: Option<&C>) -> Condition {
        let Some(criteria) = criteria else {
            return Condition::All;
        };

        criteria
            .criteria()
            .iter()
            .map(Self::compile_criterion)
            .fold(Condition::All, Condition::and)
    }

    /// Compiles one criteria field
    pub fn compile_criterion(criterion: &Criterion<'_>) -> Condition {
        match *criterion {
            Criterion::Scalar { field, filter } => Self::compile_filter(field, filter),
            Criterion::Relation { relation, filter } => {
                let condition = Self::compile_filter(ID_FIELD, filter);
                if condition.is_all() {
                    return Condition::All;
                }
                Condition::Related {
                    relation,
                    condition: Box::new(condition),
                }
            }
        }
    }

    /// Compiles a filter against one column: the AND of its operators
    pub fn compile_filter(field: &'static str, filter: &dyn FieldFilter) -> Condition {
        filter
            .constraints()
            .into_iter()
            .map(|constraint| Self::translate(field, constraint))
            .fold(Condition::All, Condition::and)
    }

    fn translate(field: &'static str, constraint: Constraint) -> Condition {
        let compare = |op, value| Condition::Compare { field, op, value };

        match constraint {
            Constraint::Equals(v) => compare(CompareOp::Eq, v),
            Constraint::NotEquals(v) => compare(CompareOp::Ne, v),
            Constraint::GreaterThan(v) => compare(CompareOp::Gt, v),
            Constraint::GreaterThanOrEqual(v) => compare(CompareOp::Ge, v),
            Constraint::LessThan(v) => compare(CompareOp::Lt, v),
            Constraint::LessThanOrEqual(v) => compare(CompareOp::Le, v),
            Constraint::In(values) => Condition::InSet {
                field,
                values,
                negated: false,
            },
            Constraint::NotIn(values) => Condition::InSet {
                field,
                values,
                negated: true,
            },
            Constraint::Specified(specified) => Condition::IsNull {
                field,
                negated: specified,
            },
            Constraint::Contains(needle) => Condition::Contains {
                field,
                needle,
                negated: false,
            },
            Constraint::DoesNotContain(needle) => Condition::Contains {
                field,
                needle,
                negated: true,
            },
        }
    }
}

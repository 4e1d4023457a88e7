//! Type-erased operator lists

use std::collections::BTreeSet;
use std::fmt;

use super::value::Value;

/// One populated operator of a filter, with its operand widened to [`Value`].
///
/// The compiler consumes these instead of the typed filters so that every
/// field of every entity compiles through the same translation table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Equals(Value),
    NotEquals(Value),
    In(BTreeSet<Value>),
    NotIn(BTreeSet<Value>),
    Specified(bool),
    GreaterThan(Value),
    GreaterThanOrEqual(Value),
    LessThan(Value),
    LessThanOrEqual(Value),
    Contains(String),
    DoesNotContain(String),
}

impl Constraint {
    /// Returns the operator name as it appears in query parameters
    pub fn op_name(&self) -> &'static str {
        match self {
            Constraint::Equals(_) => "equals",
            Constraint::NotEquals(_) => "notEquals",
            Constraint::In(_) => "in",
            Constraint::NotIn(_) => "notIn",
            Constraint::Specified(_) => "specified",
            Constraint::GreaterThan(_) => "greaterThan",
            Constraint::GreaterThanOrEqual(_) => "greaterThanOrEqual",
            Constraint::LessThan(_) => "lessThan",
            Constraint::LessThanOrEqual(_) => "lessThanOrEqual",
            Constraint::Contains(_) => "contains",
            Constraint::DoesNotContain(_) => "doesNotContain",
        }
    }
}

/// A filter that can be lowered to its populated operators.
///
/// Implementations list operators in a fixed order: equals, notEquals,
/// in, notIn, specified, then the domain extension.
pub trait FieldFilter: fmt::Debug + Send + Sync {
    /// Returns the populated operators; empty means "no constraint"
    fn constraints(&self) -> Vec<Constraint>;

    /// Returns true if no operator is populated
    fn is_empty(&self) -> bool {
        self.constraints().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        assert_eq!(Constraint::Equals(Value::Long(1)).op_name(), "equals");
        assert_eq!(Constraint::NotIn(BTreeSet::new()).op_name(), "notIn");
        assert_eq!(
            Constraint::DoesNotContain("x".into()).op_name(),
            "doesNotContain"
        );
    }
}

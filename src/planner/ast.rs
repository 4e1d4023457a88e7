//! Compiled condition tree and sort specification
//!
//! A [`Condition`] is the opaque value handed to the backing store. It is
//! built once per request by the compiler and never mutated afterwards.

use std::collections::BTreeSet;

use crate::domain::Relation;
use crate::filter::Value;

/// Column holding the identifier of every entity
pub const ID_FIELD: &str = "id";

/// Ordering comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    /// Returns the infix symbol used in explain output
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    /// Returns true if this is a range comparison
    pub fn is_range(&self) -> bool {
        matches!(self, CompareOp::Gt | CompareOp::Ge | CompareOp::Lt | CompareOp::Le)
    }
}

/// A boolean condition over one entity's query space.
///
/// NULL handling follows SQL: a NULL column never satisfies a comparison,
/// set membership or substring test, negated or not. Only [`Condition::IsNull`]
/// observes NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Matches every row
    All,
    /// Conjunction; never nested directly inside another `And`
    And(Vec<Condition>),
    Compare {
        field: &'static str,
        op: CompareOp,
        value: Value,
    },
    InSet {
        field: &'static str,
        values: BTreeSet<Value>,
        negated: bool,
    },
    IsNull {
        field: &'static str,
        negated: bool,
    },
    /// Case-sensitive substring match
    Contains {
        field: &'static str,
        needle: String,
        negated: bool,
    },
    /// Holds if some row reached through `relation` satisfies `condition`.
    ///
    /// A row with no related rows is tested once against an all-NULL
    /// related row, which gives LEFT JOIN semantics without multiplying
    /// result rows.
    Related {
        relation: Relation,
        condition: Box<Condition>,
    },
}

impl Condition {
    /// Combines two conditions with AND.
    ///
    /// `All` is the identity and nested conjunctions are flattened, so the
    /// tree shape depends only on the order of the operands.
    pub fn and(self, other: Condition) -> Condition {
        match (self, other) {
            (Condition::All, c) | (c, Condition::All) => c,
            (Condition::And(mut left), Condition::And(right)) => {
                left.extend(right);
                Condition::And(left)
            }
            (Condition::And(mut left), c) => {
                left.push(c);
                Condition::And(left)
            }
            (c, Condition::And(mut right)) => {
                right.insert(0, c);
                Condition::And(right)
            }
            (a, b) => Condition::And(vec![a, b]),
        }
    }

    /// Folds conditions into a single conjunction
    pub fn all_of(conditions: impl IntoIterator<Item = Condition>) -> Condition {
        conditions.into_iter().fold(Condition::All, Condition::and)
    }

    /// Returns true if this condition matches everything
    pub fn is_all(&self) -> bool {
        matches!(self, Condition::All)
    }

    /// Counts leaf predicates, including those inside joins
    pub fn predicate_count(&self) -> usize {
        match self {
            Condition::All => 0,
            Condition::And(parts) => parts.iter().map(Condition::predicate_count).sum(),
            Condition::Related { condition, .. } => condition.predicate_count(),
            _ => 1,
        }
    }

    /// Lists the joins this condition introduces, in tree order
    pub fn joins(&self) -> Vec<Relation> {
        let mut out = Vec::new();
        self.collect_joins(&mut out);
        out
    }

    fn collect_joins(&self, out: &mut Vec<Relation>) {
        match self {
            Condition::And(parts) => parts.iter().for_each(|p| p.collect_joins(out)),
            Condition::Related {
                relation,
                condition,
            } => {
                out.push(*relation);
                condition.collect_joins(out);
            }
            _ => {}
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification for one column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Column to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

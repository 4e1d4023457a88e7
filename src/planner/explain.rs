//! Deterministic rendering of compiled conditions
//!
//! Used in query logs so that two equal criteria always log the same text.

use std::fmt;

use serde::Serialize;

use super::ast::Condition;

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::All => write!(f, "TRUE"),
            Condition::And(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    match part {
                        Condition::And(_) => write!(f, "({})", part)?,
                        _ => write!(f, "{}", part)?,
                    }
                }
                Ok(())
            }
            Condition::Compare { field, op, value } => {
                write!(f, "{} {} {}", field, op.symbol(), value)
            }
            Condition::InSet {
                field,
                values,
                negated,
            } => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                write!(f, "{} {} ({})", field, op, list.join(", "))
            }
            Condition::IsNull { field, negated } => {
                let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
                write!(f, "{} {}", field, op)
            }
            Condition::Contains {
                field,
                needle,
                negated,
            } => {
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                write!(f, "{} {} '%{}%'", field, op, needle.replace('\'', "''"))
            }
            Condition::Related {
                relation,
                condition,
            } => write!(f, "EXISTS {} ({})", relation, condition),
        }
    }
}

/// Summary of a compiled condition for logs and diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainCondition {
    /// Infix rendering of the condition
    pub condition: String,
    /// Number of leaf predicates
    pub predicates: usize,
    /// Joins introduced, as `source.association`
    pub joins: Vec<String>,
}

impl ExplainCondition {
    pub fn from_condition(condition: &Condition) -> Self {
        Self {
            condition: condition.to_string(),
            predicates: condition.predicate_count(),
            joins: condition.joins().iter().map(ToString::to_string).collect(),
        }
    }
}

//! Condition evaluation against in-memory records
//!
//! Implements the store-side semantics of a compiled [`Condition`]:
//! SQL-style NULL handling and existential joins.

use std::cmp::Ordering;

use crate::domain::{Record, Relation};
use crate::filter::Value;
use crate::planner::{CompareOp, Condition, ID_FIELD};

/// Resolves association targets for join evaluation
pub trait RelationResolver {
    /// Returns the rows reached from the owner row `owner_id` through
    /// `relation`. Empty when the owner has no related rows.
    fn related(&self, relation: Relation, owner_id: i64) -> Vec<&dyn Record>;
}

/// The all-NULL row an outer join produces for an owner without matches
pub struct NullRecord;

impl Record for NullRecord {
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Evaluates conditions against records
pub struct ConditionEvaluator<'a, R: RelationResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: RelationResolver + ?Sized> ConditionEvaluator<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Checks if a record satisfies a condition
    pub fn matches(&self, record: &dyn Record, condition: &Condition) -> bool {
        match condition {
            Condition::All => true,
            Condition::And(parts) => parts.iter().all(|part| self.matches(record, part)),
            Condition::Compare { field, op, value } => match record.field(field) {
                Some(actual) => Self::compare_match(&actual, *op, value),
                None => false,
            },
            Condition::InSet {
                field,
                values,
                negated,
            } => match record.field(field) {
                Some(actual) => values.contains(&actual) != *negated,
                None => false,
            },
            Condition::IsNull { field, negated } => record.field(field).is_some() == *negated,
            Condition::Contains {
                field,
                needle,
                negated,
            } => match record.field(field) {
                Some(Value::Text(text)) => text.contains(needle.as_str()) != *negated,
                _ => false,
            },
            Condition::Related {
                relation,
                condition,
            } => self.matches_related(record, *relation, condition),
        }
    }

    fn matches_related(&self, owner: &dyn Record, relation: Relation, condition: &Condition) -> bool {
        let related = owner
            .field(ID_FIELD)
            .and_then(|id| id.as_long())
            .map(|id| self.resolver.related(relation, id))
            .unwrap_or_default();

        if related.is_empty() {
            return self.matches(&NullRecord, condition);
        }
        related.into_iter().any(|row| self.matches(row, condition))
    }

    fn compare_match(actual: &Value, op: CompareOp, expected: &Value) -> bool {
        let Some(ordering) = actual.compare(expected) else {
            return false;
        };
        match op {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Photo, Tag};
    use std::collections::HashMap;

    /// Resolver over a fixed photo -> tags mapping
    struct MockResolver {
        tags: HashMap<i64, Vec<Tag>>,
    }

    impl RelationResolver for MockResolver {
        fn related(&self, _relation: Relation, owner_id: i64) -> Vec<&dyn Record> {
            self.tags
                .get(&owner_id)
                .map(|tags| tags.iter().map(|t| t as &dyn Record).collect())
                .unwrap_or_default()
        }
    }

    fn no_relations() -> MockResolver {
        MockResolver {
            tags: HashMap::new(),
        }
    }

    fn photo(id: i64) -> Photo {
        let mut p = Photo::new(format!("photo {}", id));
        p.id = Some(id);
        p
    }

    fn tag(id: i64) -> Tag {
        let mut t = Tag::new(format!("tag {}", id));
        t.id = Some(id);
        t
    }

    fn cmp(field: &'static str, op: CompareOp, value: Value) -> Condition {
        Condition::Compare { field, op, value }
    }

    #[test]
    fn test_null_never_matches_comparisons() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);
        let p = photo(1);

        assert!(!eval.matches(&p, &cmp("height", CompareOp::Eq, Value::Long(1))));
        assert!(!eval.matches(&p, &cmp("height", CompareOp::Ne, Value::Long(1))));
        assert!(!eval.matches(&p, &cmp("height", CompareOp::Lt, Value::Long(1))));
        assert!(!eval.matches(
            &p,
            &Condition::InSet {
                field: "height",
                values: [Value::Long(1)].into(),
                negated: true
            }
        ));
        assert!(!eval.matches(
            &p,
            &Condition::Contains {
                field: "description",
                needle: "x".into(),
                negated: true
            }
        ));
    }

    #[test]
    fn test_is_null() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);
        let bare = photo(1);
        let described = photo(2).with_description("lake");

        let is_null = Condition::IsNull {
            field: "description",
            negated: false,
        };
        assert!(eval.matches(&bare, &is_null));
        assert!(!eval.matches(&described, &is_null));
    }

    #[test]
    fn test_comparisons() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);
        let p = photo(1).with_dimensions(10, 20);

        assert!(eval.matches(&p, &cmp("height", CompareOp::Eq, Value::Long(10))));
        assert!(eval.matches(&p, &cmp("height", CompareOp::Ne, Value::Long(11))));
        assert!(eval.matches(&p, &cmp("width", CompareOp::Ge, Value::Long(20))));
        assert!(!eval.matches(&p, &cmp("width", CompareOp::Gt, Value::Long(20))));
        assert!(eval.matches(&p, &cmp("width", CompareOp::Le, Value::Long(20))));
    }

    #[test]
    fn test_type_mismatch_never_matches() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);
        let p = photo(1).with_dimensions(10, 20);

        assert!(!eval.matches(&p, &cmp("height", CompareOp::Eq, Value::from("10"))));
        assert!(!eval.matches(&p, &cmp("height", CompareOp::Ne, Value::from("10"))));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);
        let p = Photo {
            id: Some(1),
            ..Photo::new("Seaside")
        };

        let contains = |needle: &str| Condition::Contains {
            field: "title",
            needle: needle.into(),
            negated: false,
        };
        assert!(eval.matches(&p, &contains("Sea")));
        assert!(!eval.matches(&p, &contains("sea")));
    }

    #[test]
    fn test_related_any_match() {
        let mut tags = HashMap::new();
        tags.insert(1, vec![tag(7), tag(8)]);
        let resolver = MockResolver { tags };
        let eval = ConditionEvaluator::new(&resolver);

        let related = |id: i64| Condition::Related {
            relation: Relation::PhotoTags,
            condition: Box::new(cmp(ID_FIELD, CompareOp::Eq, Value::Long(id))),
        };
        assert!(eval.matches(&photo(1), &related(7)));
        assert!(eval.matches(&photo(1), &related(8)));
        assert!(!eval.matches(&photo(1), &related(9)));
        assert!(!eval.matches(&photo(2), &related(7)));
    }

    #[test]
    fn test_related_without_rows_sees_null_row() {
        let resolver = no_relations();
        let eval = ConditionEvaluator::new(&resolver);

        let unlinked = Condition::Related {
            relation: Relation::PhotoTags,
            condition: Box::new(Condition::IsNull {
                field: ID_FIELD,
                negated: false,
            }),
        };
        assert!(eval.matches(&photo(1), &unlinked));
    }
}

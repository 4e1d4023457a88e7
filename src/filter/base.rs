//! Base filter with the operators every domain supports

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::constraint::{Constraint, FieldFilter};
use super::value::FilterValue;

/// Equality, set membership and null-check constraint on one field.
///
/// All populated operators must hold (AND). Equality and hashing are
/// structural over the populated slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter<T: FilterValue> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,

    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub in_set: Option<BTreeSet<T>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in: Option<BTreeSet<T>>,

    /// true: field must be non-null; false: field must be null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

/// Filter over boolean fields
pub type BooleanFilter = Filter<bool>;

impl<T: FilterValue> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_set: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<T: FilterValue> Filter<T> {
    /// Creates an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `equals` operand
    pub fn with_equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    /// Sets the `notEquals` operand
    pub fn with_not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    /// Sets the `in` operand
    pub fn with_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.in_set = Some(values.into_iter().collect());
        self
    }

    /// Sets the `notIn` operand
    pub fn with_not_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.not_in = Some(values.into_iter().collect());
        self
    }

    /// Sets the `specified` operand
    pub fn with_specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    /// Returns a deep copy of this filter
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub(crate) fn base_constraints(&self) -> Vec<Constraint> {
        let mut out = Vec::new();
        if let Some(v) = &self.equals {
            out.push(Constraint::Equals(v.to_value()));
        }
        if let Some(v) = &self.not_equals {
            out.push(Constraint::NotEquals(v.to_value()));
        }
        if let Some(set) = &self.in_set {
            out.push(Constraint::In(set.iter().map(FilterValue::to_value).collect()));
        }
        if let Some(set) = &self.not_in {
            out.push(Constraint::NotIn(set.iter().map(FilterValue::to_value).collect()));
        }
        if let Some(specified) = self.specified {
            out.push(Constraint::Specified(specified));
        }
        out
    }
}

impl<T: FilterValue> FieldFilter for Filter<T> {
    fn constraints(&self) -> Vec<Constraint> {
        self.base_constraints()
    }

    fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_set.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
    }
}

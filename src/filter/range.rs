//! Filters over ordered domains (identifiers, integers, instants)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::Filter;
use super::constraint::{Constraint, FieldFilter};
use super::value::FilterValue;

/// [`Filter`] extended with ordering comparisons
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T: FilterValue> {
    #[serde(flatten)]
    pub base: Filter<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

/// Filter over identifier fields
pub type LongFilter = RangeFilter<i64>;

/// Filter over 32-bit integer fields
pub type IntegerFilter = RangeFilter<i32>;

/// Filter over timestamp fields
pub type InstantFilter = RangeFilter<DateTime<Utc>>;

impl<T: FilterValue> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T: FilterValue> RangeFilter<T> {
    /// Creates an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    base_builders!(T);

    pub fn with_greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    pub fn with_greater_than_or_equal(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    pub fn with_less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    pub fn with_less_than_or_equal(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }

    /// Returns a deep copy of this filter
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl<T: FilterValue> FieldFilter for RangeFilter<T> {
    fn constraints(&self) -> Vec<Constraint> {
        let mut out = self.base.base_constraints();
        if let Some(v) = &self.greater_than {
            out.push(Constraint::GreaterThan(v.to_value()));
        }
        if let Some(v) = &self.greater_than_or_equal {
            out.push(Constraint::GreaterThanOrEqual(v.to_value()));
        }
        if let Some(v) = &self.less_than {
            out.push(Constraint::LessThan(v.to_value()));
        }
        if let Some(v) = &self.less_than_or_equal {
            out.push(Constraint::LessThanOrEqual(v.to_value()));
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && self.greater_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal.is_none()
    }
}

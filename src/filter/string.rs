//! Filter over text fields

use serde::{Deserialize, Serialize};

use super::base::Filter;
use super::constraint::{Constraint, FieldFilter};

/// [`Filter`] extended with case-sensitive substring matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    #[serde(flatten)]
    pub base: Filter<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    /// Creates an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    base_builders!(String);

    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    pub fn with_does_not_contain(mut self, needle: impl Into<String>) -> Self {
        self.does_not_contain = Some(needle.into());
        self
    }

    /// Returns a deep copy of this filter
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl FieldFilter for StringFilter {
    fn constraints(&self) -> Vec<Constraint> {
        let mut out = self.base.base_constraints();
        if let Some(needle) = &self.contains {
            out.push(Constraint::Contains(needle.clone()));
        }
        if let Some(needle) = &self.does_not_contain {
            out.push(Constraint::DoesNotContain(needle.clone()));
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }
}

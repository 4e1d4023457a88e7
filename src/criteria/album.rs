use serde::{Deserialize, Serialize};

use super::{push_relation, push_scalar, Criteria, Criterion};
use crate::domain::{Album, Relation};
use crate::filter::{InstantFilter, LongFilter, StringFilter};

/// Filters accepted by album queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<InstantFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<LongFilter>,
}

impl AlbumCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, filter: LongFilter) -> Self {
        self.id = Some(filter);
        self
    }

    pub fn with_title(mut self, filter: StringFilter) -> Self {
        self.title = Some(filter);
        self
    }

    pub fn with_description(mut self, filter: StringFilter) -> Self {
        self.description = Some(filter);
        self
    }

    pub fn with_created(mut self, filter: InstantFilter) -> Self {
        self.created = Some(filter);
        self
    }

    pub fn with_user_id(mut self, filter: LongFilter) -> Self {
        self.user_id = Some(filter);
        self
    }
}

impl Criteria for AlbumCriteria {
    type Entity = Album;

    fn criteria(&self) -> Vec<Criterion<'_>> {
        let mut out = Vec::new();
        push_scalar(&mut out, "id", &self.id);
        push_scalar(&mut out, "title", &self.title);
        push_scalar(&mut out, "description", &self.description);
        push_scalar(&mut out, "created", &self.created);
        push_relation(&mut out, Relation::AlbumUser, &self.user_id);
        out
    }
}

use serde::{Deserialize, Serialize};

use super::{push_relation, push_scalar, Criteria, Criterion};
use crate::domain::{Relation, Tag};
use crate::filter::{LongFilter, StringFilter};

/// Filters accepted by tag queries; `photo_id` joins the inverse side of
/// the photo/tag link
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<LongFilter>,
}

impl TagCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, filter: LongFilter) -> Self {
        self.id = Some(filter);
        self
    }

    pub fn with_name(mut self, filter: StringFilter) -> Self {
        self.name = Some(filter);
        self
    }

    pub fn with_photo_id(mut self, filter: LongFilter) -> Self {
        self.photo_id = Some(filter);
        self
    }
}

impl Criteria for TagCriteria {
    type Entity = Tag;

    fn criteria(&self) -> Vec<Criterion<'_>> {
        let mut out = Vec::new();
        push_scalar(&mut out, "id", &self.id);
        push_scalar(&mut out, "name", &self.name);
        push_relation(&mut out, Relation::TagPhotos, &self.photo_id);
        out
    }
}

use serde::{Deserialize, Serialize};

use super::{push_relation, push_scalar, Criteria, Criterion};
use crate::domain::{Photo, Relation};
use crate::filter::{InstantFilter, IntegerFilter, LongFilter, StringFilter};

/// Filters accepted by photo queries.
///
/// `album_id` joins through the many-to-one album reference and `tag_id`
/// through the photo/tag link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<IntegerFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<IntegerFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken: Option<InstantFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<InstantFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<LongFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<LongFilter>,
}

impl PhotoCriteria {
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

    pub fn with_height(mut self, filter: IntegerFilter) -> Self {
        self.height = Some(filter);
        self
    }

    pub fn with_width(mut self, filter: IntegerFilter) -> Self {
        self.width = Some(filter);
        self
    }

    pub fn with_taken(mut self, filter: InstantFilter) -> Self {
        self.taken = Some(filter);
        self
    }

    pub fn with_uploaded(mut self, filter: InstantFilter) -> Self {
        self.uploaded = Some(filter);
        self
    }

    pub fn with_album_id(mut self, filter: LongFilter) -> Self {
        self.album_id = Some(filter);
        self
    }

    pub fn with_tag_id(mut self, filter: LongFilter) -> Self {
        self.tag_id = Some(filter);
        self
    }
}

impl Criteria for PhotoCriteria {
    type Entity = Photo;

    fn criteria(&self) -> Vec<Criterion<'_>> {
        let mut out = Vec::new();
        push_scalar(&mut out, "id", &self.id);
        push_scalar(&mut out, "title", &self.title);
        push_scalar(&mut out, "description", &self.description);
        push_scalar(&mut out, "height", &self.height);
        push_scalar(&mut out, "width", &self.width);
        push_scalar(&mut out, "taken", &self.taken);
        push_scalar(&mut out, "uploaded", &self.uploaded);
        push_relation(&mut out, Relation::PhotoAlbum, &self.album_id);
        push_relation(&mut out, Relation::PhotoTags, &self.tag_id);
        out
    }
}

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::filter::Value;

/// An uploaded image with its capture metadata.
///
/// `album_id` is the many-to-one album reference. `tag_ids` is the owning
/// side of the photo/tag link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "base64_bytes")]
    pub image: Vec<u8>,
    #[serde(default)]
    pub image_content_type: String,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub taken: Option<DateTime<Utc>>,
    #[serde(default)]
    pub uploaded: Option<DateTime<Utc>>,
    #[serde(default)]
    pub album_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: BTreeSet<i64>,
}

impl Photo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dimensions(mut self, height: i32, width: i32) -> Self {
        self.height = Some(height);
        self.width = Some(width);
        self
    }

    pub fn with_taken(mut self, taken: DateTime<Utc>) -> Self {
        self.taken = Some(taken);
        self
    }

    pub fn with_album(mut self, album_id: i64) -> Self {
        self.album_id = Some(album_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids.extend(tag_ids);
        self
    }

    pub fn with_image(mut self, content_type: impl Into<String>, image: Vec<u8>) -> Self {
        self.image_content_type = content_type.into();
        self.image = image;
        self
    }
}

impl Record for Photo {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "title" => Some(Value::from(self.title.as_str())),
            "description" => self.description.clone().map(Value::from),
            "imageContentType" => Some(Value::from(self.image_content_type.as_str())),
            "height" => self.height.map(Value::from),
            "width" => self.width.map(Value::from),
            "taken" => self.taken.map(Value::from),
            "uploaded" => self.uploaded.map(Value::from),
            "albumId" => self.album_id.map(Value::from),
            _ => None,
        }
    }
}

impl Entity for Photo {
    const KIND: EntityKind = EntityKind::Photo;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Stamps the upload time; a photo without capture time counts as taken now
    fn on_create(&mut self, now: DateTime<Utc>) {
        self.uploaded = Some(now);
        if self.taken.is_none() {
            self.taken = Some(now);
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("photo title must not be empty".to_string());
        }
        Ok(())
    }
}

/// Serializes image bytes as standard base64 text
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}

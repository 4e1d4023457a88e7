use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::filter::Value;

/// Minimum tag name length, in characters
pub const TAG_NAME_MIN_LEN: usize = 2;

/// A label attached to photos through the photo/tag link
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Record for Tag {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "name" => Some(Value::from(self.name.as_str())),
            _ => None,
        }
    }
}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.chars().count() < TAG_NAME_MIN_LEN {
            return Err(format!(
                "tag name must have at least {} characters",
                TAG_NAME_MIN_LEN
            ));
        }
        Ok(())
    }
}

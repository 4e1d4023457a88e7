use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::filter::Value;

/// A named collection of photos, optionally owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl Album {
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

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl Record for Album {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "title" => Some(Value::from(self.title.as_str())),
            "description" => self.description.clone().map(Value::from),
            "created" => self.created.map(Value::from),
            "userId" => self.user_id.map(Value::from),
            _ => None,
        }
    }
}

impl Entity for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("album title must not be empty".to_string());
        }
        Ok(())
    }
}

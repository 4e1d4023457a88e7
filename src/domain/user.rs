use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::filter::Value;

/// Gallery account that owns albums
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub login: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub activated: bool,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Default::default()
        }
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "login" => Some(Value::from(self.login.as_str())),
            "firstName" => self.first_name.clone().map(Value::from),
            "lastName" => self.last_name.clone().map(Value::from),
            "email" => self.email.clone().map(Value::from),
            "activated" => Some(Value::from(self.activated)),
            _ => None,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), String> {
        let valid_login = !self.login.is_empty()
            && self.login.len() <= 50
            && self
                .login
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_.@-".contains(c));
        if !valid_login {
            return Err(format!("invalid login '{}'", self.login));
        }
        Ok(())
    }
}

//! Session identifiers, records and the token they carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque session identifier taken from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access token read from a session. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Key/value contents of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Map<String, Value>);

impl SessionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding `[token]` under `key`, the shape an OAuth login leaves.
    pub fn with_token(key: &str, token: &str) -> Self {
        let mut record = Self::new();
        record.insert(key, Value::Array(vec![Value::String(token.to_string())]));
        record
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }

    /// The access token stored under `key`.
    ///
    /// Accepts a list whose first element is a string, or a bare string.
    /// Empty strings count as absent.
    pub fn token(&self, key: &str) -> Option<SessionToken> {
        let raw = match self.0.get(key)? {
            Value::Array(items) => items.first()?.as_str()?,
            Value::String(s) => s.as_str(),
            _ => return None,
        };
        if raw.is_empty() {
            return None;
        }
        Some(SessionToken::new(raw))
    }
}

impl From<Map<String, Value>> for SessionRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

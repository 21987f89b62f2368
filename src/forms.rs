use std::collections::HashMap;

use uuid::Uuid;

pub const RATING_MESSAGE: &str = "Rating must be a whole number between 1 and 5.";
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A user-facing rejection raised before anything touches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

impl ValidationError {
    pub fn message(&self) -> &'static str {
        self.0
    }
}

/// A submitted form: a flat map of field name to raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn text(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn required(&self, key: &str, missing: &'static str) -> Result<String, ValidationError> {
        self.text(key).ok_or(ValidationError(missing))
    }

    /// Free text that may legitimately be empty; kept verbatim.
    pub fn optional(&self, key: &str) -> String {
        self.raw(key).unwrap_or_default().to_string()
    }

    pub fn rating(&self, key: &str, missing: &'static str) -> Result<i32, ValidationError> {
        let raw = self.required(key, missing)?;
        match raw.parse::<i32>() {
            Ok(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => Ok(rating),
            _ => Err(ValidationError(RATING_MESSAGE)),
        }
    }

    pub fn id(&self, key: &str, missing: &'static str) -> Result<Uuid, ValidationError> {
        self.text(key)
            .and_then(|raw| Uuid::parse_str(&raw).ok())
            .ok_or(ValidationError(missing))
    }

    /// Checkbox semantics: `true`/`on` are set, everything else is not.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.text(key).as_deref(), Some("true" | "on"))
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

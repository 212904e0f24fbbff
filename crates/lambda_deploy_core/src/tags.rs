use serde_json::Value;

use crate::contract::{Tags, ValidationError};

/// Parses a tag document: a single JSON object mapping tag keys to string values.
pub fn parse_tags(text: &str) -> Result<Tags, ValidationError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|error| ValidationError::new(format!("Malformed tag document: {error}")))?;

    let Some(object) = value.as_object() else {
        return Err(ValidationError::new("Tag document must be a JSON object"));
    };

    let mut tags = Tags::new();
    for (key, value) in object {
        if key.trim().is_empty() {
            return Err(ValidationError::new("tag keys must be non-empty strings"));
        }
        let Some(text) = value.as_str() else {
            return Err(ValidationError::new(format!(
                "Tag '{key}' must have a string value"
            )));
        };
        tags.insert(key.clone(), text.to_string());
    }

    Ok(tags)
}

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Webhook message body with a single rich attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub pretext: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    /// A full-width field
    pub fn wide(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}

impl NotificationPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Field titles of every attachment, in order
    #[must_use]
    pub fn field_titles(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .flat_map(|a| a.fields.iter().map(|f| f.title.as_str()))
            .collect()
    }

    /// Value of the first field with the given title
    #[must_use]
    pub fn field(&self, title: &str) -> Option<&str> {
        self.attachments
            .iter()
            .flat_map(|a| a.fields.iter())
            .find(|f| f.title == title)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let payload = NotificationPayload {
            text: "A release is published.".to_string(),
            attachments: vec![Attachment {
                fallback: "fb".to_string(),
                color: "#00ff00".to_string(),
                pretext: "pre".to_string(),
                fields: vec![Field::wide("Changes", "- a")],
            }],
        };

        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "A release is published.",
                "attachments": [{
                    "fallback": "fb",
                    "color": "#00ff00",
                    "pretext": "pre",
                    "fields": [{ "title": "Changes", "value": "- a", "short": false }]
                }]
            })
        );
        assert_eq!(payload.field("Changes"), Some("- a"));
        assert_eq!(payload.field("Missing"), None);
    }
}

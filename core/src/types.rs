//! DTOs exchanged with the ChatWork API.

use serde::{Deserialize, Serialize};

/// Form payload of `POST /v1/rooms/{room_id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessage<'a> {
    pub body: &'a str,
}

/// Decoded response of a send-message call.
///
/// Both fields are filled from whatever keys the response carries; a
/// success normally has `message_id`, a rejection normally has `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    #[serde(
        default,
        deserialize_with = "message_id::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SendResult {
    /// True when the service reported at least one error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// `message_id` arrives as a number from some API versions and as a numeric
/// string from others.
mod message_id {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(id)) => Ok(Some(id)),
            Some(Raw::Text(text)) => text.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

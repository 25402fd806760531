//! Decoding of feed payloads into wire records
//!
//! The only accepted payload is a JSON object of the form
//! `{"items": [{"id": <uuid>, "image": <url>, "description"?: <string>, "location"?: <string>}, ...]}`.
//! Decoding is all-or-nothing: one bad item rejects the whole payload.

use crate::error::LoadError;
use crate::http_client::HttpResponse;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// The only status code accepted as a successful feed response
pub const OK_200: u16 = 200;

/// A feed item as it appears on the wire
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteFeedImage {
    /// Item identifier, hyphenated form only
    #[serde(deserialize_with = "deserialize_hyphenated_uuid")]
    pub id: Uuid,
    /// Optional caption
    pub description: Option<String>,
    /// Optional location
    pub location: Option<String>,
    /// Absolute image URL
    pub image: Url,
}

/// Length of the canonical `8-4-4-4-12` textual form
const HYPHENATED_UUID_LEN: usize = 36;

/// Accept only `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`; uuid's own serde impl
/// also takes the simple, braced and `urn:uuid:` forms
fn deserialize_hyphenated_uuid<'de, D>(
    deserializer: D,
) -> std::result::Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if text.len() != HYPHENATED_UUID_LEN {
        return Err(serde::de::Error::custom(format!(
            "expected hyphenated UUID, got {text:?}"
        )));
    }
    Uuid::parse_str(&text).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedImage>,
}

/// Decode a feed response body into its items, in payload order
///
/// The status code is checked before the body is looked at, so a non-200
/// response is rejected even when its body happens to be a valid feed.
///
/// # Errors
/// Returns [`LoadError::InvalidData`] if the status is not 200 or the body
/// does not match the feed schema.
pub fn map(
    data: &[u8],
    response: &HttpResponse,
) -> std::result::Result<Vec<RemoteFeedImage>, LoadError> {
    if response.status != OK_200 {
        warn!(
            "Feed response from {} rejected: HTTP {}",
            response.url, response.status
        );
        return Err(LoadError::InvalidData);
    }

    let value: Value = serde_json::from_slice(data).map_err(|e| {
        warn!("Feed response from {} is not valid JSON: {}", response.url, e);
        LoadError::InvalidData
    })?;

    // serde accepts JSON arrays for structs, so the object shape is checked by hand
    if !has_envelope_shape(&value) {
        warn!(
            "Feed response from {} rejected: unexpected JSON shape",
            response.url
        );
        return Err(LoadError::InvalidData);
    }

    let root = Root::deserialize(value).map_err(|e| {
        warn!("Feed response from {} failed to decode: {}", response.url, e);
        LoadError::InvalidData
    })?;

    debug!("Decoded {} feed items from {}", root.items.len(), response.url);
    Ok(root.items)
}

/// Top level must be an object whose `items` is an array of objects
fn has_envelope_shape(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|root| root.get("items"))
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().all(Value::is_object))
}

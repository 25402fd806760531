//! Common test utilities for feed-loader integration tests

use feed_loader::FeedImage;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock feed is served under
pub const FEED_PATH: &str = "/feed.json";

/// Build a feed item and the JSON the server would send for it
pub fn make_item(
    description: Option<&str>,
    location: Option<&str>,
    image_url: &str,
) -> (FeedImage, Value) {
    let id = Uuid::new_v4();
    let model = FeedImage {
        id,
        description: description.map(str::to_string),
        location: location.map(str::to_string),
        url: Url::parse(image_url).unwrap(),
    };
    let json = json!({
        "id": id.to_string(),
        "description": description,
        "location": location,
        "image": image_url,
    });
    (model, json)
}

/// Wrap items in the feed envelope
pub fn make_items_json(items: &[Value]) -> Vec<u8> {
    serde_json::to_vec(&json!({ "items": items })).unwrap()
}

/// Answer GET requests for [`FEED_PATH`] with `template`
pub async fn serve_feed(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Absolute URL of the feed on `server`
pub fn feed_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), FEED_PATH)).unwrap()
}

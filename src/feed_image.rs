//! Feed image domain model

use crate::feed_items_mapper::RemoteFeedImage;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// An image entry in a feed
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedImage {
    /// Unique identifier
    pub id: Uuid,

    /// Optional caption
    pub description: Option<String>,

    /// Optional place the image was taken
    pub location: Option<String>,

    /// Where the image itself can be fetched
    pub url: Url,
}

impl From<RemoteFeedImage> for FeedImage {
    fn from(remote: RemoteFeedImage) -> Self {
        Self {
            id: remote.id,
            description: remote.description,
            location: remote.location,
            url: remote.image,
        }
    }
}

/// Map decoded wire records to domain models, preserving order
pub fn to_models(items: Vec<RemoteFeedImage>) -> Vec<FeedImage> {
    items.into_iter().map(FeedImage::from).collect()
}

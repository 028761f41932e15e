use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved short URL, as kept in the local slot.
///
/// `id` is assigned locally at append time (position in the collection);
/// everything else is echoed from the backend's create response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrlRecord {
    pub id: u32,
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by the create proxy and forwarded to the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShortUrl {
    pub url: String,
}

/// Successful create response from the backend.
#[derive(Debug, Deserialize)]
pub struct BackendShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

use serde::{Deserialize, Serialize};

/// Configuration for PlaceAndPlayClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceAndPlayClientConfig {
    /// Base URL for API endpoints, e.g. "http://host:8080/PlaceAndPlay/api"
    pub base_url: String,
    /// Value of the `language` header attached to every request
    pub language: String,
}

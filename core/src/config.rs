//! Client configuration.

use serde::{Deserialize, Serialize};

/// Settings for `TwitterClient`.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root (default: https://api.twitter.com). Trailing slashes are
    /// stripped by the client.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `user-agent` on every built request when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    "https://api.twitter.com".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

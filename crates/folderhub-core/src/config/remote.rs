//! Backend connection configuration.

use serde::{Deserialize, Serialize};

/// Default location of the image folder API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/cms/images/custom-api/";

/// Where and how to reach the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// CSRF token sent as `X-CSRFToken`; obtaining it is up to the caller.
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("folderhub/{}", env!("CARGO_PKG_VERSION"))
}

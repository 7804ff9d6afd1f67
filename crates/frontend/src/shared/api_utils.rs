//! API utilities for plugin-backend communication
//!
//! The host serves every plugin under `{api_root}/{plugin_name}/...`.

use crate::config::ClientConfig;

/// Base URL of the plugin backend, e.g. `/plugin-io/api/order_tracking`
pub fn plugin_api_base(config: &ClientConfig) -> String {
    format!(
        "{}/{}",
        config.api_root.trim_end_matches('/'),
        config.plugin_name.trim_matches('/')
    )
}

/// Build a full API URL from an endpoint path
///
/// # Example
/// ```rust,ignore
/// let url = plugin_api_url(&config, "orders");
/// ```
pub fn plugin_api_url(config: &ClientConfig, path: &str) -> String {
    format!("{}/{}", plugin_api_base(config), path.trim_start_matches('/'))
}

/// Append an encoded query string, skipping the `?` when it is empty
pub fn with_query(url: String, query: &str) -> String {
    if query.is_empty() {
        url
    } else {
        format!("{}?{}", url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(
            plugin_api_url(&config, "orders"),
            "/plugin-io/api/order_tracking/orders"
        );
        assert_eq!(
            plugin_api_url(&config, "/task-comments"),
            "/plugin-io/api/order_tracking/task-comments"
        );
    }

    #[test]
    fn test_trailing_slash_in_root() {
        let config = ClientConfig {
            api_root: "https://ehr.example.org/plugin-io/api/".into(),
            ..Default::default()
        };
        assert_eq!(
            plugin_api_base(&config),
            "https://ehr.example.org/plugin-io/api/order_tracking"
        );
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/x".into(), ""), "/x");
        assert_eq!(with_query("/x".into(), "page=1"), "/x?page=1");
    }
}

use serde::{Deserialize, Serialize};

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyGroupType {
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "url-test")]
    URLTest,
}

/// A proxy group in the generated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxyGroup {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group
    #[serde(rename = "type")]
    pub group_type: ProxyGroupType,
    /// Tags of the members, in display order
    pub proxies: Vec<String>,
    /// URL probed for latency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Interval in seconds between probes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Latency difference in ms before switching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

impl ClashProxyGroup {
    /// Create a manual selector over the given tags
    pub fn select(name: impl Into<String>, proxies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            group_type: ProxyGroupType::Select,
            proxies,
            url: None,
            interval: None,
            tolerance: None,
            lazy: None,
        }
    }

    /// Create a latency-probed group over the given tags
    pub fn url_test(
        name: impl Into<String>,
        proxies: Vec<String>,
        url: &str,
        interval: u32,
        tolerance: u32,
    ) -> Self {
        Self {
            name: name.into(),
            group_type: ProxyGroupType::URLTest,
            proxies,
            url: Some(url.to_string()),
            interval: Some(interval),
            tolerance: Some(tolerance),
            lazy: Some(true),
        }
    }
}

/// A collection of proxy groups
pub type ClashProxyGroups = Vec<ClashProxyGroup>;

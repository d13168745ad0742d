//! DNS sub-document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::routing::{enabled_rule_sets, RuleAction, RuleBehavior};
use crate::constants::SELECTOR_GROUP_NAME;
use crate::settings::Settings;
use crate::utils::is_domain;

const DNS_LISTEN: &str = "0.0.0.0:1053";
const WARP_REMOTE_DNS: &str = "1.1.1.1";
const FAKE_IP_RANGE: &str = "198.18.0.1/16";

/// Domains the client itself needs before any proxy is usable
const BOOTSTRAP_DOMAINS: [&str; 2] = ["raw.githubusercontent.com", "time.cloudflare.com"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDns {
    pub enable: bool,
    pub listen: String,
    pub ipv6: bool,
    pub respect_rules: bool,
    pub use_system_hosts: bool,
    pub nameserver: Vec<String>,
    pub proxy_server_nameserver: Vec<String>,
    pub nameserver_policy: BTreeMap<String, String>,
    pub enhanced_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fake_ip_filter: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_h3: Option<bool>,
}

/// Build the DNS block
///
/// # Arguments
/// * `settings` - Settings providing resolvers and bypass toggles
/// * `chain_server` - Server of the chain proxy, when chaining is active
/// * `warp` - Whether the document is a WARP document
/// * `pro` - Whether enhanced WARP options are in use
pub fn build_dns(
    settings: &Settings,
    chain_server: Option<&str>,
    warp: bool,
    pro: bool,
) -> ClashDns {
    let remote = if warp {
        WARP_REMOTE_DNS
    } else {
        settings.remote_dns.as_str()
    };
    let remote_via_selector = format!("{}#{}", remote, SELECTOR_GROUP_NAME);

    let mut policy: BTreeMap<String, String> = BOOTSTRAP_DOMAINS
        .iter()
        .map(|domain| (domain.to_string(), settings.local_dns.clone()))
        .collect();

    for set in enabled_rule_sets(settings)
        .filter(|set| set.action == RuleAction::Direct && set.behavior == RuleBehavior::Domain)
    {
        policy.insert(format!("rule-set:{}", set.name), settings.local_dns.clone());
    }

    if let Some(server) = chain_server.filter(|server| !warp && is_domain(server)) {
        policy.insert(server.to_string(), remote_via_selector.clone());
    }

    let (enhanced_mode, fake_ip_range, fake_ip_filter) = if settings.fake_dns {
        (
            "fake-ip",
            Some(FAKE_IP_RANGE.to_string()),
            vec!["geosite:private".to_string()],
        )
    } else {
        ("redir-host", None, Vec::new())
    };

    ClashDns {
        enable: true,
        listen: DNS_LISTEN.to_string(),
        ipv6: settings.enable_ipv6,
        respect_rules: true,
        use_system_hosts: false,
        nameserver: vec![remote_via_selector],
        proxy_server_nameserver: vec![settings.local_dns.clone()],
        nameserver_policy: policy,
        enhanced_mode: enhanced_mode.to_string(),
        fake_ip_range,
        fake_ip_filter,
        prefer_h3: if warp && pro { Some(true) } else { None },
    }
}

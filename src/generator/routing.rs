//! Routing rules and remote rule sets
//!
//! Rule order matters to the client: first match wins. Rejections are placed
//! ahead of bypasses so a blocked domain cannot leak through a direct rule,
//! and the selector catch-all is always last.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::constants::SELECTOR_GROUP_NAME;
use crate::settings::Settings;
use crate::utils::is_domain;

const RULE_SET_BASE: &str = "https://github.com/MetaCubeX/meta-rules-dat/raw/refs/heads/meta";
const RULE_SET_INTERVAL: u32 = 86400;

/// A remote rule set entry under `rule-providers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub format: String,
    pub behavior: String,
    pub url: String,
    pub path: String,
    pub interval: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBehavior {
    Domain,
    IpCidr,
}

impl RuleBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleBehavior::Domain => "domain",
            RuleBehavior::IpCidr => "ipcidr",
        }
    }

    fn folder(&self) -> &'static str {
        match self {
            RuleBehavior::Domain => "geosite",
            RuleBehavior::IpCidr => "geoip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Direct,
    Reject,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Direct => "DIRECT",
            RuleAction::Reject => "REJECT",
        }
    }
}

/// One entry of the built-in rule set table
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub file: &'static str,
    pub behavior: RuleBehavior,
    pub action: RuleAction,
    enabled: fn(&Settings) -> bool,
}

impl RuleSet {
    pub fn is_enabled(&self, settings: &Settings) -> bool {
        (self.enabled)(settings)
    }

    pub fn provider(&self) -> RuleProvider {
        RuleProvider {
            provider_type: "http".to_string(),
            format: "mrs".to_string(),
            behavior: self.behavior.as_str().to_string(),
            url: format!(
                "{}/geo/{}/{}.mrs",
                RULE_SET_BASE,
                self.behavior.folder(),
                self.file
            ),
            path: format!("./ruleset/{}.mrs", self.name),
            interval: RULE_SET_INTERVAL,
        }
    }

    fn rule(&self) -> String {
        match self.behavior {
            RuleBehavior::Domain => format!("RULE-SET,{},{}", self.name, self.action.as_str()),
            RuleBehavior::IpCidr => format!(
                "RULE-SET,{},{},no-resolve",
                self.name,
                self.action.as_str()
            ),
        }
    }
}

pub static RULE_SETS: [RuleSet; 8] = [
    RuleSet {
        name: "ads",
        file: "category-ads-all",
        behavior: RuleBehavior::Domain,
        action: RuleAction::Reject,
        enabled: |settings| settings.block_ads,
    },
    RuleSet {
        name: "porn",
        file: "category-porn",
        behavior: RuleBehavior::Domain,
        action: RuleAction::Reject,
        enabled: |settings| settings.block_porn,
    },
    RuleSet {
        name: "iran",
        file: "category-ir",
        behavior: RuleBehavior::Domain,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_iran,
    },
    RuleSet {
        name: "iran-ip",
        file: "ir",
        behavior: RuleBehavior::IpCidr,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_iran,
    },
    RuleSet {
        name: "china",
        file: "cn",
        behavior: RuleBehavior::Domain,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_china,
    },
    RuleSet {
        name: "china-ip",
        file: "cn",
        behavior: RuleBehavior::IpCidr,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_china,
    },
    RuleSet {
        name: "russia",
        file: "category-ru",
        behavior: RuleBehavior::Domain,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_russia,
    },
    RuleSet {
        name: "russia-ip",
        file: "ru",
        behavior: RuleBehavior::IpCidr,
        action: RuleAction::Direct,
        enabled: |settings| settings.bypass_russia,
    },
];

/// Rule sets switched on by `settings`, in table order
pub fn enabled_rule_sets(settings: &Settings) -> impl Iterator<Item = &'static RuleSet> + '_ {
    RULE_SETS.iter().filter(move |set| set.is_enabled(settings))
}

/// Rule providers for every enabled rule set, keyed by name
pub fn build_rule_providers(settings: &Settings) -> BTreeMap<String, RuleProvider> {
    enabled_rule_sets(settings)
        .map(|set| (set.name.to_string(), set.provider()))
        .collect()
}

/// Turn one user-supplied entry into a rule, `None` when it is neither an IP,
/// a CIDR nor a domain
pub fn custom_rule(entry: &str, action: RuleAction) -> Option<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }

    let (address, prefix) = match entry.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (entry, None),
    };
    if let Ok(ip) = address.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
        let max_prefix = if ip.is_ipv4() { 32 } else { 128 };
        let prefix = match prefix {
            Some(prefix) => prefix.parse::<u8>().ok().filter(|p| *p <= max_prefix)?,
            None => max_prefix,
        };
        let kind = if ip.is_ipv4() { "IP-CIDR" } else { "IP-CIDR6" };
        return Some(format!(
            "{},{}/{},{},no-resolve",
            kind,
            ip,
            prefix,
            action.as_str()
        ));
    }

    if prefix.is_none() && is_domain(entry) {
        return Some(format!("DOMAIN-SUFFIX,{},{}", entry, action.as_str()));
    }
    None
}

fn rule_sets_for(settings: &Settings, action: RuleAction) -> impl Iterator<Item = String> + '_ {
    enabled_rule_sets(settings)
        .filter(move |set| set.action == action)
        .map(RuleSet::rule)
}

fn custom_rules<'a>(
    entries: &'a [String],
    action: RuleAction,
) -> impl Iterator<Item = String> + 'a {
    entries
        .iter()
        .filter_map(move |entry| custom_rule(entry, action))
}

/// Build the ordered rule list
pub fn build_routing_rules(settings: &Settings, warp: bool) -> Vec<String> {
    let mut rules = Vec::new();
    if settings.bypass_lan {
        rules.push("GEOIP,lan,DIRECT,no-resolve".to_string());
    }

    rules.extend(rule_sets_for(settings, RuleAction::Reject));
    rules.extend(custom_rules(&settings.custom_block_rules, RuleAction::Reject));
    rules.extend(rule_sets_for(settings, RuleAction::Direct));
    rules.extend(custom_rules(&settings.custom_bypass_rules, RuleAction::Direct));

    if !warp && settings.block_udp_443 {
        rules.push("AND,((NETWORK,udp),(DST-PORT,443)),REJECT".to_string());
    }
    rules.push(format!("MATCH,{}", SELECTOR_GROUP_NAME));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_rule_kinds() {
        assert_eq!(
            custom_rule("10.0.0.1", RuleAction::Direct).as_deref(),
            Some("IP-CIDR,10.0.0.1/32,DIRECT,no-resolve")
        );
        assert_eq!(
            custom_rule("10.0.0.0/8", RuleAction::Reject).as_deref(),
            Some("IP-CIDR,10.0.0.0/8,REJECT,no-resolve")
        );
        assert_eq!(
            custom_rule("2001:db8::/32", RuleAction::Direct).as_deref(),
            Some("IP-CIDR6,2001:db8::/32,DIRECT,no-resolve")
        );
        assert_eq!(
            custom_rule("example.com", RuleAction::Direct).as_deref(),
            Some("DOMAIN-SUFFIX,example.com,DIRECT")
        );
        assert_eq!(custom_rule("10.0.0.0/40", RuleAction::Direct), None);
        assert_eq!(custom_rule("  ", RuleAction::Direct), None);
    }

    #[test]
    fn test_rule_order() {
        let mut settings = Settings::new();
        settings.bypass_lan = true;
        settings.bypass_iran = true;
        settings.block_ads = true;
        settings.block_udp_443 = true;
        settings.custom_block_rules = vec!["bad.example".to_string()];
        settings.custom_bypass_rules = vec!["192.168.1.0/24".to_string()];

        let rules = build_routing_rules(&settings, false);
        assert_eq!(
            rules,
            vec![
                "GEOIP,lan,DIRECT,no-resolve",
                "RULE-SET,ads,REJECT",
                "DOMAIN-SUFFIX,bad.example,REJECT",
                "RULE-SET,iran,DIRECT",
                "RULE-SET,iran-ip,DIRECT,no-resolve",
                "IP-CIDR,192.168.1.0/24,DIRECT,no-resolve",
                "AND,((NETWORK,udp),(DST-PORT,443)),REJECT",
                "MATCH,✅ Selector",
            ]
        );

        let warp_rules = build_routing_rules(&settings, true);
        assert!(!warp_rules.iter().any(|rule| rule.starts_with("AND,")));
    }

    #[test]
    fn test_providers_follow_toggles() {
        let mut settings = Settings::new();
        assert!(build_rule_providers(&settings).is_empty());

        settings.bypass_china = true;
        let providers = build_rule_providers(&settings);
        assert_eq!(providers.len(), 2);
        assert_eq!(providers["china-ip"].behavior, "ipcidr");
        assert!(providers["china"].url.ends_with("/geo/geosite/cn.mrs"));
    }
}

//! Group generation
//!
//! Groups are appended in a fixed order: the manual selector, the primary
//! latency group, then the variant-specific secondary latency group. The
//! selector lists the latency groups it sits next to before every outbound.

use super::expand::Expansion;
use super::outbounds::build_url_test;
use super::remark::{
    best_ping_name, chain_best_ping_name, warp_best_ping_name, wow_best_ping_name,
};
use super::Variant;
use crate::constants::SELECTOR_GROUP_NAME;
use crate::models::{ClashProxyGroup, ClashProxyGroups};
use crate::settings::Settings;

/// Build the proxy groups for an expansion
///
/// # Arguments
/// * `settings` - Settings providing the probe intervals
/// * `expansion` - Outbound tags produced by the expander
/// * `variant` - Generation path the expansion came from
pub fn build_proxy_groups(
    settings: &Settings,
    expansion: &Expansion,
    variant: Variant,
) -> ClashProxyGroups {
    let mut auto_groups = Vec::new();
    match variant {
        Variant::Standard { chain } => {
            auto_groups.push(build_url_test(
                settings,
                best_ping_name(),
                &expansion.proxy_tags,
                false,
            ));
            if chain {
                auto_groups.push(build_url_test(
                    settings,
                    chain_best_ping_name(),
                    &expansion.chain_tags,
                    false,
                ));
            }
        }
        Variant::Warp { pro } => {
            auto_groups.push(build_url_test(
                settings,
                warp_best_ping_name(pro),
                &expansion.proxy_tags,
                true,
            ));
            auto_groups.push(build_url_test(
                settings,
                wow_best_ping_name(pro),
                &expansion.chain_tags,
                true,
            ));
        }
    }

    let selector_tags = auto_groups
        .iter()
        .map(|group| group.name.clone())
        .chain(expansion.selector_tags.iter().cloned())
        .collect();

    let mut groups = vec![ClashProxyGroup::select(SELECTOR_GROUP_NAME, selector_tags)];
    groups.extend(auto_groups);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyGroupType;

    fn expansion() -> Expansion {
        Expansion {
            outbounds: Vec::new(),
            proxy_tags: vec!["a".to_string()],
            chain_tags: vec!["a-chain".to_string()],
            selector_tags: vec!["a".to_string(), "a-chain".to_string()],
        }
    }

    #[test]
    fn test_standard_without_chain() {
        let mut expansion = expansion();
        expansion.chain_tags.clear();
        expansion.selector_tags.truncate(1);

        let groups =
            build_proxy_groups(&Settings::new(), &expansion, Variant::Standard { chain: false });
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_type, ProxyGroupType::Select);
        assert_eq!(groups[0].proxies, vec![best_ping_name(), "a".to_string()]);
        assert_eq!(groups[1].name, best_ping_name());
        assert_eq!(groups[1].proxies, vec!["a".to_string()]);
        assert_eq!(groups[1].tolerance, Some(30));

        let value = serde_json::to_value(&groups).unwrap();
        assert_eq!(value[0]["type"], "select");
        assert_eq!(value[1]["type"], "url-test");
        assert!(value[0].get("url").is_none());
    }

    #[test]
    fn test_group_order_with_chain() {
        let groups =
            build_proxy_groups(&Settings::new(), &expansion(), Variant::Standard { chain: true });
        let names: Vec<String> = groups.iter().map(|group| group.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                SELECTOR_GROUP_NAME.to_string(),
                best_ping_name(),
                chain_best_ping_name()
            ]
        );
        assert_eq!(groups[2].proxies, vec!["a-chain".to_string()]);
        assert_eq!(
            groups[0].proxies,
            vec![
                best_ping_name(),
                chain_best_ping_name(),
                "a".to_string(),
                "a-chain".to_string()
            ]
        );
    }

    #[test]
    fn test_warp_groups() {
        let groups =
            build_proxy_groups(&Settings::new(), &expansion(), Variant::Warp { pro: true });
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].name, warp_best_ping_name(true));
        assert_eq!(groups[2].name, wow_best_ping_name(true));
        assert_eq!(groups[2].proxies, vec!["a-chain".to_string()]);
        assert_eq!(groups[1].tolerance, Some(300));
    }
}

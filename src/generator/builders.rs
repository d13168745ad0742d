use std::collections::BTreeMap;

use log::debug;

use super::chain::build_chain_outbound;
use super::dns::{build_dns, ClashDns};
use super::inbounds::{sniffer, tun, ClashSniffer, ClashTun};
use super::outbounds::{build_warp_outbound, build_websocket_outbound};
use super::routing::{build_routing_rules, build_rule_providers, RuleProvider};
use super::{GenerateError, SubDocumentBuilder};
use crate::models::{ClashProxy, Protocol, WarpAccount};
use crate::settings::Settings;

/// Address always probed alongside the worker host
const SPEEDTEST_HOST: &str = "www.speedtest.net";

/// Sub-document producers backed by the loaded settings
#[derive(Debug, Clone, Copy)]
pub struct ClashBuilders<'a> {
    settings: &'a Settings,
}

impl<'a> ClashBuilders<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

impl SubDocumentBuilder for ClashBuilders<'_> {
    fn resolve_addresses(&self, fragment: bool) -> Vec<String> {
        let settings = self.settings;
        let clean_ips = if fragment {
            &[][..]
        } else {
            settings.clean_ips.as_slice()
        };

        let mut addresses: Vec<String> = Vec::new();
        let candidates = std::iter::once(settings.host_name.as_str())
            .chain(std::iter::once(SPEEDTEST_HOST))
            .chain(settings.addresses.iter().map(String::as_str))
            .chain(clean_ips.iter().map(String::as_str));
        for address in candidates.map(str::trim) {
            if !address.is_empty() && !addresses.iter().any(|known| known == address) {
                addresses.push(address.to_string());
            }
        }
        debug!("Resolved {} addresses", addresses.len());
        addresses
    }

    fn build_dns(&self, chain_server: Option<&str>, warp: bool, pro: bool) -> ClashDns {
        build_dns(self.settings, chain_server, warp, pro)
    }

    fn build_routing_rules(&self, warp: bool) -> Vec<String> {
        build_routing_rules(self.settings, warp)
    }

    fn build_rule_providers(&self) -> BTreeMap<String, RuleProvider> {
        build_rule_providers(self.settings)
    }

    fn build_outbound(
        &self,
        protocol: Protocol,
        tag: &str,
        address: &str,
        port: u16,
        proxy_ip: Option<&str>,
    ) -> Option<ClashProxy> {
        build_websocket_outbound(self.settings, protocol, tag, address, port, proxy_ip)
    }

    fn build_chain_template(&self) -> Result<Option<ClashProxy>, GenerateError> {
        let out_proxy = self.settings.out_proxy.trim();
        if out_proxy.is_empty() {
            return Ok(None);
        }
        build_chain_outbound(out_proxy).map(Some)
    }

    fn build_warp_outbound(
        &self,
        account: &WarpAccount,
        tag: &str,
        endpoint: &str,
        dialer: Option<&str>,
        pro: bool,
    ) -> ClashProxy {
        build_warp_outbound(self.settings, account, tag, endpoint, dialer, pro)
    }

    fn sniffer(&self) -> ClashSniffer {
        sniffer()
    }

    fn tun(&self) -> ClashTun {
        tun()
    }
}

//! Document assembly
//!
//! Merges the expansion, its groups and the auxiliary sub-documents into the
//! final document. Nothing is validated here; every part arrives finished.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use super::dns::ClashDns;
use super::expand::Expansion;
use super::group::build_proxy_groups;
use super::inbounds::{ClashSniffer, ClashTun};
use super::routing::RuleProvider;
use super::{GenerateError, SubDocumentBuilder, Variant};
use crate::constants::log_level::ClashLogLevel;
use crate::models::{ClashProxy, ClashProxyCommon, ClashProxyGroups};
use crate::settings::Settings;

const MIXED_PORT: u16 = 7890;
const EXTERNAL_CONTROLLER: &str = "127.0.0.1:9090";
const EXTERNAL_UI_URL: &str =
    "https://github.com/MetaCubeX/metacubexd/archive/refs/heads/gh-pages.zip";

/// Keep-alive tuning, only emitted for standard documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TcpSettings {
    pub disable_keep_alive: bool,
    pub keep_alive_idle: u32,
    pub keep_alive_interval: u32,
    pub tcp_concurrent: bool,
}

impl Default for TcpSettings {
    fn default() -> Self {
        Self {
            disable_keep_alive: false,
            keep_alive_idle: 10,
            keep_alive_interval: 15,
            tcp_concurrent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ControllerCors {
    pub allow_origins: Vec<String>,
    pub allow_private_network: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    pub store_selected: bool,
    pub store_fake_ip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ntp {
    pub enable: bool,
    pub server: String,
    pub port: u16,
    pub interval: u32,
}

/// A complete Clash document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashConfig {
    pub mixed_port: u16,
    pub ipv6: bool,
    pub allow_lan: bool,
    pub unified_delay: bool,
    pub log_level: ClashLogLevel,
    pub mode: String,
    #[serde(flatten)]
    pub tcp: Option<TcpSettings>,
    pub geo_auto_update: bool,
    pub geo_update_interval: u32,
    pub external_controller: String,
    pub external_controller_cors: ControllerCors,
    pub external_ui: String,
    pub external_ui_url: String,
    pub profile: Profile,
    pub dns: ClashDns,
    pub tun: ClashTun,
    pub sniffer: ClashSniffer,
    pub proxies: Vec<ClashProxy>,
    pub proxy_groups: ClashProxyGroups,
    pub rule_providers: BTreeMap<String, RuleProvider>,
    pub rules: Vec<String>,
    pub ntp: Ntp,
}

impl ClashConfig {
    /// Serialize as JSON indented with four spaces
    pub fn to_pretty_json(&self) -> Result<String, GenerateError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Assemble a document from an expansion
///
/// # Arguments
/// * `settings` - Settings providing the static top-level fields
/// * `builders` - Producers of the DNS, routing and inbound blocks
/// * `expansion` - Outbounds and tags to publish
/// * `variant` - Generation path the expansion came from
/// * `chain_template` - Template the chained entries were cloned from, if any
pub fn build_config<B: SubDocumentBuilder>(
    settings: &Settings,
    builders: &B,
    expansion: Expansion,
    variant: Variant,
    chain_template: Option<&ClashProxy>,
) -> ClashConfig {
    let (warp, pro) = match variant {
        Variant::Standard { .. } => (false, false),
        Variant::Warp { pro } => (true, pro),
    };
    let chain_server = chain_template.map(|template| template.common().server.as_str());
    let proxy_groups = build_proxy_groups(settings, &expansion, variant);

    ClashConfig {
        mixed_port: MIXED_PORT,
        ipv6: true,
        allow_lan: settings.allow_lan_connection,
        unified_delay: false,
        log_level: settings.clash_log_level(),
        mode: "rule".to_string(),
        tcp: if warp { None } else { Some(TcpSettings::default()) },
        geo_auto_update: true,
        geo_update_interval: 168,
        external_controller: EXTERNAL_CONTROLLER.to_string(),
        external_controller_cors: ControllerCors {
            allow_origins: vec!["*".to_string()],
            allow_private_network: true,
        },
        external_ui: "ui".to_string(),
        external_ui_url: EXTERNAL_UI_URL.to_string(),
        profile: Profile {
            store_selected: true,
            store_fake_ip: true,
        },
        dns: builders.build_dns(chain_server, warp, pro),
        tun: builders.tun(),
        sniffer: builders.sniffer(),
        proxies: expansion.outbounds,
        proxy_groups,
        rule_providers: builders.build_rule_providers(),
        rules: builders.build_routing_rules(warp),
        ntp: Ntp {
            enable: true,
            server: "time.cloudflare.com".to_string(),
            port: 123,
            interval: 30,
        },
    }
}

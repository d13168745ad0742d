//! Clash configuration synthesis
//!
//! The pipeline runs leaves first: tags and outbounds are produced by the
//! expanders in [`expand`], grouped by [`group`], and merged with the
//! auxiliary sub-documents into a [`config::ClashConfig`].

pub mod builders;
pub mod chain;
pub mod config;
pub mod dns;
pub mod expand;
pub mod group;
pub mod inbounds;
pub mod outbounds;
pub mod remark;
pub mod routing;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::kv::DatasetError;
use crate::models::{ClashProxy, Protocol, WarpAccount};

pub use builders::ClashBuilders;
pub use config::{build_config, ClashConfig};
pub use dns::ClashDns;
pub use expand::{expand_standard, expand_warp, Expansion};
pub use group::build_proxy_groups;
pub use inbounds::{ClashSniffer, ClashTun};
pub use remark::generate_remark;
pub use routing::RuleProvider;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to load account dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Invalid chain proxy: {0}")]
    InvalidChainProxy(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which generation path produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// VLESS/Trojan over WebSocket, optionally chained through an outer proxy
    Standard { chain: bool },
    /// WARP primary entries with WoW relays dialing through them
    Warp { pro: bool },
}

/// Producers of the sub-documents the pipeline merges
///
/// [`ClashBuilders`] is the production implementation; tests substitute
/// their own to exercise expansion without the real DNS or rule tables.
pub trait SubDocumentBuilder {
    /// Addresses to generate unpaired outbounds for
    fn resolve_addresses(&self, fragment: bool) -> Vec<String>;

    /// `chain_server` is the server of the chain template when chaining is on
    fn build_dns(&self, chain_server: Option<&str>, warp: bool, pro: bool) -> ClashDns;

    fn build_routing_rules(&self, warp: bool) -> Vec<String>;

    fn build_rule_providers(&self) -> BTreeMap<String, RuleProvider>;

    /// Build one outbound, `None` when the combination is not usable
    fn build_outbound(
        &self,
        protocol: Protocol,
        tag: &str,
        address: &str,
        port: u16,
        proxy_ip: Option<&str>,
    ) -> Option<ClashProxy>;

    /// The template chained entries are cloned from, `None` when chaining is off
    fn build_chain_template(&self) -> Result<Option<ClashProxy>, GenerateError>;

    fn build_warp_outbound(
        &self,
        account: &WarpAccount,
        tag: &str,
        endpoint: &str,
        dialer: Option<&str>,
        pro: bool,
    ) -> ClashProxy;

    fn sniffer(&self) -> ClashSniffer;

    fn tun(&self) -> ClashTun;
}

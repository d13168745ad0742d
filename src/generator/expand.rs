//! Outbound expansion
//!
//! The standard path walks protocols, then ports, then address sources:
//! paired clean IP rows first, the remaining resolved addresses after. Each
//! protocol carries one ordinal across all its ports; it is only advanced
//! when the factory produced an outbound, so skipped candidates never leave
//! a gap in the visible numbering. This ordering is part of the output
//! contract.

use log::debug;

use super::chain::derive_chain_entry;
use super::remark::{generate_remark, warp_remark, wow_remark};
use super::SubDocumentBuilder;
use crate::models::{ClashProxy, Protocol, WarpAccount};
use crate::settings::Settings;

/// Outbounds and tag lists produced by one expansion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub outbounds: Vec<ClashProxy>,
    /// Tags of directly connecting entries
    pub proxy_tags: Vec<String>,
    /// Tags of entries dialing through another entry
    pub chain_tags: Vec<String>,
    /// Every tag, in the order it was produced
    pub selector_tags: Vec<String>,
}

impl Expansion {
    fn push_proxy(&mut self, tag: String, outbound: ClashProxy) {
        self.proxy_tags.push(tag.clone());
        self.selector_tags.push(tag);
        self.outbounds.push(outbound);
    }

    fn push_chain(&mut self, tag: String, outbound: ClashProxy) {
        self.chain_tags.push(tag.clone());
        self.selector_tags.push(tag);
        self.outbounds.push(outbound);
    }
}

/// One address an outbound may be generated for
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    port: u16,
    address: &'a str,
    proxy_ip: Option<&'a str>,
    row: Option<usize>,
}

/// Candidates for one port: complete clean IP rows, then resolved addresses
/// that are not clean IPs
fn port_candidates<'a>(
    settings: &'a Settings,
    addresses: &'a [String],
    port: u16,
) -> impl Iterator<Item = Candidate<'a>> + 'a {
    let paired = settings
        .clean_ips
        .iter()
        .enumerate()
        .filter_map(move |(row, clean_ip)| {
            let proxy_ip = settings.proxy_ips.get(row).map(String::as_str).unwrap_or("");
            if clean_ip.trim().is_empty() || proxy_ip.trim().is_empty() {
                debug!("Skipping incomplete clean IP row {}", row + 1);
                return None;
            }
            Some(Candidate {
                port,
                address: clean_ip.as_str(),
                proxy_ip: Some(proxy_ip),
                row: Some(row),
            })
        });

    let unpaired = addresses
        .iter()
        .filter(move |address| !settings.clean_ips.contains(*address))
        .map(move |address| Candidate {
            port,
            address: address.as_str(),
            proxy_ip: None,
            row: None,
        });

    paired.chain(unpaired)
}

/// Expand the VLESS/Trojan outbounds, with a chained twin per entry when a
/// chain template is given
pub fn expand_standard<B: SubDocumentBuilder>(
    settings: &Settings,
    builders: &B,
    addresses: &[String],
    chain_template: Option<&ClashProxy>,
) -> Expansion {
    settings
        .protocols()
        .into_iter()
        .fold(Expansion::default(), |expansion, protocol| {
            let (_, expansion) = settings
                .ports
                .iter()
                .flat_map(|&port| port_candidates(settings, addresses, port))
                .fold((1u32, expansion), |(ordinal, expansion), candidate| {
                    expand_candidate(
                        builders,
                        protocol,
                        chain_template,
                        ordinal,
                        expansion,
                        candidate,
                    )
                });
            expansion
        })
}

fn expand_candidate<B: SubDocumentBuilder>(
    builders: &B,
    protocol: Protocol,
    chain_template: Option<&ClashProxy>,
    ordinal: u32,
    mut expansion: Expansion,
    candidate: Candidate<'_>,
) -> (u32, Expansion) {
    let Candidate {
        port,
        address,
        proxy_ip,
        row,
    } = candidate;

    let tag = generate_remark(ordinal, port, address, protocol, false, false, row);
    let outbound = match builders.build_outbound(protocol, &tag, address, port, proxy_ip) {
        Some(outbound) => outbound,
        None => {
            debug!("No {} outbound for {}:{}", protocol, address, port);
            return (ordinal, expansion);
        }
    };
    expansion.push_proxy(tag.clone(), outbound);

    if let Some(template) = chain_template {
        let chain_tag = generate_remark(ordinal, port, address, protocol, false, true, row);
        let chain = derive_chain_entry(template, &chain_tag, &tag);
        expansion.push_chain(chain_tag, chain);
    }

    (ordinal + 1, expansion)
}

/// Expand one WARP entry and one WoW relay per configured endpoint
///
/// The relay uses the second account and dials through the primary entry
/// built from the first account.
pub fn expand_warp<B: SubDocumentBuilder>(
    settings: &Settings,
    builders: &B,
    primary: &WarpAccount,
    relay: &WarpAccount,
    pro: bool,
) -> Expansion {
    settings
        .warp_endpoints
        .iter()
        .enumerate()
        .fold(Expansion::default(), |mut expansion, (index, endpoint)| {
            let warp_tag = warp_remark(index, pro);
            let wow_tag = wow_remark(index, pro);

            let warp = builders.build_warp_outbound(primary, &warp_tag, endpoint, None, pro);
            let wow =
                builders.build_warp_outbound(relay, &wow_tag, endpoint, Some(&warp_tag), false);

            expansion.push_proxy(warp_tag, warp);
            expansion.push_chain(wow_tag, wow);
            expansion
        })
}

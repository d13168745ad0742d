//! Tag generation
//!
//! Tags are the join key between outbounds and proxy-group membership, so
//! every tag produced during one run has to be distinct. Standard tags embed
//! the protocol, its running ordinal and a chain marker; WARP tags embed the
//! endpoint index.

use crate::constants::CONFIG_NAME_EMOJI;
use crate::models::Protocol;
use crate::utils::classify_address;

/// Generates the tag of a standard outbound
///
/// # Arguments
/// * `ordinal` - Running per-protocol ordinal, starting at 1
/// * `port` - Port the outbound connects to
/// * `address` - Address the outbound connects to
/// * `protocol` - Protocol of the outbound
/// * `fragment` - Whether the outbound belongs to a fragment configuration
/// * `chain` - Whether the outbound is a chained twin
/// * `row` - Clean IP row the address came from, if any
pub fn generate_remark(
    ordinal: u32,
    port: u16,
    address: &str,
    protocol: Protocol,
    fragment: bool,
    chain: bool,
    row: Option<usize>,
) -> String {
    let chain_sign = if chain { "🔗 " } else { "" };
    let fragment_sign = if fragment { " F" } else { "" };
    let label = match row {
        Some(row) => format!("Clean IP {}", row + 1),
        None => classify_address(address).as_str().to_string(),
    };

    format!(
        "{} {}{} - {}{} - {} : {}",
        CONFIG_NAME_EMOJI, chain_sign, ordinal, protocol, fragment_sign, label, port
    )
}

fn pro_sign(pro: bool) -> &'static str {
    if pro {
        "Pro "
    } else {
        ""
    }
}

/// Tag of the primary WARP outbound for the endpoint at `index`
pub fn warp_remark(index: usize, pro: bool) -> String {
    format!("{} {} - Warp {}🇮🇷", CONFIG_NAME_EMOJI, index + 1, pro_sign(pro))
}

/// Tag of the WoW relay dialing through the primary at `index`
pub fn wow_remark(index: usize, pro: bool) -> String {
    format!("{} {} - WoW {}🌍", CONFIG_NAME_EMOJI, index + 1, pro_sign(pro))
}

pub fn best_ping_name() -> String {
    format!("{} Best Ping 🚀", CONFIG_NAME_EMOJI)
}

pub fn chain_best_ping_name() -> String {
    format!("{} 🔗 Best Ping 🚀", CONFIG_NAME_EMOJI)
}

pub fn warp_best_ping_name(pro: bool) -> String {
    format!("{} Warp {}- Best Ping 🚀", CONFIG_NAME_EMOJI, pro_sign(pro))
}

pub fn wow_best_ping_name(pro: bool) -> String {
    format!("{} WoW {}- Best Ping 🚀", CONFIG_NAME_EMOJI, pro_sign(pro))
}

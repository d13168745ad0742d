//! Outbound factories
//!
//! Each function maps generation parameters to one typed outbound. The
//! WebSocket factory returns `None` for combinations the client cannot use,
//! which the expander treats as a silent skip.

use log::debug;
use serde_json::{json, Value};

use crate::constants::{is_http_port, is_https_port, URL_TEST_URL};
use crate::models::{
    AmneziaOptions, ClashProxy, ClashProxyGroup, CommonProxyOptions, Protocol, WarpAccount,
};
use crate::settings::Settings;
use crate::utils::address::unbracket;
use crate::utils::{classify_address, split_endpoint, AddressKind};

const EARLY_DATA_SIZE: u32 = 2560;
const DEFAULT_WARP_PORT: u16 = 2408;
const WARP_IPV4: &str = "172.16.0.2/32";
const WARP_MTU: u32 = 1280;

/// WebSocket path the worker reads the proxy IP from
pub fn websocket_path(proxy_ip: Option<&str>) -> String {
    match proxy_ip {
        Some(proxy_ip) if !proxy_ip.is_empty() => format!(
            "/pip/{}?ed={}",
            urlencoding::encode(proxy_ip.trim()),
            EARLY_DATA_SIZE
        ),
        _ => format!("/?ed={}", EARLY_DATA_SIZE),
    }
}

/// `ws-opts` block pointing at the worker host
pub fn websocket_options(path: &str, host: &str) -> Value {
    json!({
        "path": path,
        "headers": { "Host": host },
        "max-early-data": EARLY_DATA_SIZE,
        "early-data-header-name": "Sec-WebSocket-Protocol"
    })
}

/// Build a VLESS or Trojan outbound tunnelled over WebSocket to the worker
///
/// # Arguments
/// * `settings` - Settings providing the worker host and credentials
/// * `protocol` - Protocol of the outbound
/// * `tag` - Name of the outbound
/// * `address` - Address to connect to, a clean IP or a resolved address
/// * `port` - Port to connect to
/// * `proxy_ip` - Proxy IP the worker should dial out through, if any
///
/// # Returns
/// `None` when the address, port, protocol or credentials cannot form a
/// usable outbound
pub fn build_websocket_outbound(
    settings: &Settings,
    protocol: Protocol,
    tag: &str,
    address: &str,
    port: u16,
    proxy_ip: Option<&str>,
) -> Option<ClashProxy> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }

    let tls = is_https_port(port);
    if !tls && !is_http_port(port) {
        debug!("Skipping {} on unsupported port {}", protocol, port);
        return None;
    }
    if !tls && (!protocol.allows_plaintext() || settings.host_name.ends_with(".pages.dev")) {
        debug!("Skipping {} on plaintext port {}", protocol, port);
        return None;
    }

    let kind = classify_address(address);
    if kind == AddressKind::IPv6 && !settings.enable_ipv6 {
        debug!("Skipping IPv6 address {} while IPv6 is disabled", address);
        return None;
    }

    let mut builder =
        CommonProxyOptions::builder(tag.to_string(), unbracket(address).to_string(), port)
            .udp(true);
    if kind == AddressKind::Domain && !settings.enable_ipv6 {
        builder = builder.ip_version("ipv4");
    }

    let path = websocket_path(proxy_ip);
    let ws_opts = websocket_options(&path, &settings.host_name);
    let fingerprint = Some(settings.fingerprint.clone()).filter(|fp| tls && !fp.is_empty());

    match protocol {
        Protocol::Vless => {
            if settings.uuid.is_empty() {
                return None;
            }
            let common = builder.tls(tls).client_fingerprint(fingerprint).build();
            let mut proxy = ClashProxy::new_vless(common);
            if let ClashProxy::Vless {
                uuid,
                servername,
                network,
                ws_opts: opts,
                ..
            } = &mut proxy
            {
                *uuid = settings.uuid.clone();
                if tls {
                    *servername = Some(settings.host_name.clone());
                }
                *network = Some("ws".to_string());
                *opts = Some(ws_opts);
            }
            Some(proxy)
        }
        Protocol::Trojan => {
            if settings.trojan_password.is_empty() {
                return None;
            }
            let common = builder.client_fingerprint(fingerprint).build();
            let mut proxy = ClashProxy::new_trojan(common);
            if let ClashProxy::Trojan {
                password,
                sni,
                alpn,
                network,
                ws_opts: opts,
                ..
            } = &mut proxy
            {
                *password = settings.trojan_password.clone();
                *sni = Some(settings.host_name.clone());
                *alpn = Some(vec!["http/1.1".to_string()]);
                *network = Some("ws".to_string());
                *opts = Some(ws_opts);
            }
            Some(proxy)
        }
    }
}

/// Build a WireGuard outbound for one WARP account and endpoint
///
/// `dialer` makes the entry dial through another outbound; `pro` adds the
/// Amnezia noise options configured in settings.
pub fn build_warp_outbound(
    settings: &Settings,
    account: &WarpAccount,
    tag: &str,
    endpoint: &str,
    dialer: Option<&str>,
    pro: bool,
) -> ClashProxy {
    let (server, port) = split_endpoint(endpoint)
        .unwrap_or_else(|| (endpoint.trim().to_string(), DEFAULT_WARP_PORT));

    let common = CommonProxyOptions::builder(tag.to_string(), server, port)
        .udp(true)
        .ip_version(if settings.enable_ipv6 { "dual" } else { "ipv4" })
        .dialer_proxy(dialer.map(str::to_string))
        .build();

    let mut proxy = ClashProxy::new_wireguard(common);
    if let ClashProxy::WireGuard {
        ip,
        ipv6,
        private_key,
        public_key,
        allowed_ips,
        reserved,
        mtu,
        amnezia_wg_option,
        ..
    } = &mut proxy
    {
        *ip = WARP_IPV4.to_string();
        *ipv6 = Some(account.warp_ipv6.clone());
        *private_key = account.private_key.clone();
        *public_key = account.public_key.clone();
        *allowed_ips = vec!["0.0.0.0/0".to_string(), "::/0".to_string()];
        *reserved = account.reserved.clone();
        *mtu = Some(WARP_MTU);
        if pro {
            *amnezia_wg_option = Some(AmneziaOptions {
                jc: settings.amnezia_noise_count,
                jmin: settings.amnezia_noise_size_min,
                jmax: settings.amnezia_noise_size_max,
            });
        }
    }
    proxy
}

/// Build a latency-probed group over `tags`
pub fn build_url_test(
    settings: &Settings,
    name: String,
    tags: &[String],
    warp: bool,
) -> ClashProxyGroup {
    let (interval, tolerance) = if warp {
        (settings.best_warp_interval, 300)
    } else {
        (settings.best_vl_tr_interval, 30)
    };
    ClashProxyGroup::url_test(name, tags.to_vec(), URL_TEST_URL, interval, tolerance)
}

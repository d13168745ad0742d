//! Chain proxy template
//!
//! The chain proxy is configured as a share link. It is parsed once per
//! request into a template outbound; every chained entry is a deep copy of
//! the template with its identity and dial target rewritten.

use std::collections::HashMap;

use log::debug;
use url::Url;

use super::outbounds::websocket_options;
use super::GenerateError;
use crate::models::{ClashProxy, ClashProxyCommon, CommonProxyOptions};
use crate::utils::address::unbracket;

/// Name the template carries until a clone is patched
const TEMPLATE_NAME: &str = "chain-template";

fn invalid(out_proxy: &str, reason: impl std::fmt::Display) -> GenerateError {
    GenerateError::InvalidChainProxy(format!("{}: {}", out_proxy, reason))
}

fn decode_userinfo(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string());
    Some(decoded)
}

/// Parse the chain proxy share link into a template outbound
///
/// Supported schemes are `vless`, `trojan`, `socks`/`socks5` and
/// `http`/`https`.
pub fn build_chain_outbound(out_proxy: &str) -> Result<ClashProxy, GenerateError> {
    let out_proxy = out_proxy.trim();
    let url = Url::parse(out_proxy).map_err(|e| invalid(out_proxy, e))?;
    let server = url
        .host_str()
        .map(|host| unbracket(host).to_string())
        .ok_or_else(|| invalid(out_proxy, "missing host"))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid(out_proxy, "missing port"))?;
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    let param = |key: &str| params.get(key).filter(|value| !value.is_empty()).cloned();

    let builder = CommonProxyOptions::builder(TEMPLATE_NAME.to_string(), server, port);
    let username = decode_userinfo(url.username());
    let password = url.password().and_then(decode_userinfo);

    let proxy = match url.scheme() {
        "socks" | "socks5" => {
            let mut proxy = ClashProxy::new_socks5(builder.udp(true).build());
            if let ClashProxy::Socks5 {
                username: user,
                password: pass,
                ..
            } = &mut proxy
            {
                *user = username;
                *pass = password;
            }
            proxy
        }
        "http" | "https" => {
            let common = builder.tls(url.scheme() == "https").build();
            let mut proxy = ClashProxy::new_http(common);
            if let ClashProxy::Http {
                username: user,
                password: pass,
                ..
            } = &mut proxy
            {
                *user = username;
                *pass = password;
            }
            proxy
        }
        "vless" => {
            let uuid = username.ok_or_else(|| invalid(out_proxy, "missing uuid"))?;
            let tls = matches!(param("security").as_deref(), Some("tls"));
            let common = builder
                .udp(true)
                .tls(tls)
                .client_fingerprint(param("fp"))
                .build();
            let mut proxy = ClashProxy::new_vless(common);
            if let ClashProxy::Vless {
                uuid: id,
                servername,
                flow,
                network,
                ws_opts,
                ..
            } = &mut proxy
            {
                *id = uuid;
                *servername = param("sni");
                *flow = param("flow");
                let transport = param("type").unwrap_or_else(|| "tcp".to_string());
                if transport == "ws" {
                    *ws_opts = Some(websocket_options(
                        &param("path").unwrap_or_else(|| "/".to_string()),
                        &param("host").unwrap_or_default(),
                    ));
                }
                *network = Some(transport);
            }
            proxy
        }
        "trojan" => {
            let secret = username.ok_or_else(|| invalid(out_proxy, "missing password"))?;
            let common = builder.udp(true).client_fingerprint(param("fp")).build();
            let mut proxy = ClashProxy::new_trojan(common);
            if let ClashProxy::Trojan {
                password: pass,
                sni,
                network,
                ws_opts,
                ..
            } = &mut proxy
            {
                *pass = secret;
                *sni = param("sni");
                let transport = param("type").unwrap_or_else(|| "tcp".to_string());
                if transport == "ws" {
                    *ws_opts = Some(websocket_options(
                        &param("path").unwrap_or_else(|| "/".to_string()),
                        &param("host").unwrap_or_default(),
                    ));
                }
                *network = Some(transport);
            }
            proxy
        }
        scheme => return Err(invalid(out_proxy, format!("unsupported scheme '{}'", scheme))),
    };

    debug!("Parsed chain proxy template for {}", proxy.common().server);
    Ok(proxy)
}

/// Deep-copy the template into a chained entry dialing through `base_tag`
pub fn derive_chain_entry(template: &ClashProxy, chain_tag: &str, base_tag: &str) -> ClashProxy {
    let mut chain = template.clone();
    chain.set_name(chain_tag.to_string());
    chain.set_dialer_proxy(base_tag.to_string());
    chain
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::is_empty_option_string;

/// Options shared by every Clash outbound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub client_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    /// Tag of the outbound this one dials through
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub dialer_proxy: Option<String>,
}

impl CommonProxyOptions {
    /// Create a new CommonProxyOptions with default values
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            udp: None,
            tls: None,
            client_fingerprint: None,
            ip_version: None,
            dialer_proxy: None,
        }
    }

    /// Create a builder for CommonProxyOptions
    pub fn builder(name: String, server: String, port: u16) -> CommonProxyOptionsBuilder {
        CommonProxyOptionsBuilder {
            common: Self::new(name, server, port),
        }
    }
}

/// Builder for CommonProxyOptions
pub struct CommonProxyOptionsBuilder {
    common: CommonProxyOptions,
}

impl CommonProxyOptionsBuilder {
    pub fn udp(mut self, value: bool) -> Self {
        self.common.udp = Some(value);
        self
    }

    pub fn tls(mut self, value: bool) -> Self {
        self.common.tls = Some(value);
        self
    }

    pub fn client_fingerprint(mut self, value: Option<String>) -> Self {
        self.common.client_fingerprint = value;
        self
    }

    pub fn ip_version(mut self, value: &str) -> Self {
        self.common.ip_version = Some(value.to_string());
        self
    }

    pub fn dialer_proxy(mut self, value: Option<String>) -> Self {
        self.common.dialer_proxy = value.filter(|tag| !tag.is_empty());
        self
    }

    pub fn build(self) -> CommonProxyOptions {
        self.common
    }
}

/// Amnezia-WG obfuscation knobs, emitted for enhanced WARP entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmneziaOptions {
    pub jc: u32,
    pub jmin: u32,
    pub jmax: u32,
}

/// A single outbound in the generated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClashProxy {
    #[serde(rename = "vless")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        flow: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        network: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<Value>,
    },
    #[serde(rename = "trojan")]
    Trojan {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alpn: Option<Vec<String>>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        network: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<Value>,
    },
    #[serde(rename = "http")]
    Http {
        #[serde(flatten)]
        common: CommonProxyOptions,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        username: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        password: Option<String>,
    },
    #[serde(rename = "socks5")]
    Socks5 {
        #[serde(flatten)]
        common: CommonProxyOptions,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        username: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        password: Option<String>,
    },
    #[serde(rename = "wireguard")]
    WireGuard {
        #[serde(flatten)]
        common: CommonProxyOptions,
        ip: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        ipv6: Option<String>,
        #[serde(rename = "private-key")]
        private_key: String,
        #[serde(rename = "public-key")]
        public_key: String,
        #[serde(rename = "allowed-ips", skip_serializing_if = "Vec::is_empty", default)]
        allowed_ips: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        reserved: Vec<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mtu: Option<u32>,
        #[serde(rename = "amnezia-wg-option", skip_serializing_if = "Option::is_none")]
        amnezia_wg_option: Option<AmneziaOptions>,
    },
}

impl ClashProxy {
    /// Create a new VLESS proxy
    pub fn new_vless(common: CommonProxyOptions) -> Self {
        ClashProxy::Vless {
            common,
            uuid: String::new(),
            servername: None,
            flow: None,
            network: None,
            ws_opts: None,
        }
    }

    /// Create a new Trojan proxy
    pub fn new_trojan(common: CommonProxyOptions) -> Self {
        ClashProxy::Trojan {
            common,
            password: String::new(),
            sni: None,
            alpn: None,
            network: None,
            ws_opts: None,
        }
    }

    pub fn new_http(common: CommonProxyOptions) -> Self {
        ClashProxy::Http {
            common,
            username: None,
            password: None,
        }
    }

    pub fn new_socks5(common: CommonProxyOptions) -> Self {
        ClashProxy::Socks5 {
            common,
            username: None,
            password: None,
        }
    }

    /// Create a new WireGuard proxy
    pub fn new_wireguard(common: CommonProxyOptions) -> Self {
        ClashProxy::WireGuard {
            common,
            ip: String::new(),
            ipv6: None,
            private_key: String::new(),
            public_key: String::new(),
            allowed_ips: Vec::new(),
            reserved: Vec::new(),
            mtu: None,
            amnezia_wg_option: None,
        }
    }

    /// The tag this outbound is referenced by
    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn dialer_proxy(&self) -> Option<&str> {
        self.common().dialer_proxy.as_deref()
    }
}

/// Trait for common operations on all ClashProxy variants
pub trait ClashProxyCommon {
    /// Get a reference to the common options
    fn common(&self) -> &CommonProxyOptions;

    /// Get a mutable reference to the common options
    fn common_mut(&mut self) -> &mut CommonProxyOptions;

    fn set_name(&mut self, value: String) {
        self.common_mut().name = value;
    }

    fn set_dialer_proxy(&mut self, value: String) {
        self.common_mut().dialer_proxy = Some(value);
    }
}

impl ClashProxyCommon for ClashProxy {
    fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
            ClashProxy::Http { common, .. } => common,
            ClashProxy::Socks5 { common, .. } => common,
            ClashProxy::WireGuard { common, .. } => common,
        }
    }

    fn common_mut(&mut self) -> &mut CommonProxyOptions {
        match self {
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
            ClashProxy::Http { common, .. } => common,
            ClashProxy::Socks5 { common, .. } => common,
            ClashProxy::WireGuard { common, .. } => common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_type_and_kebab_fields() {
        let common = CommonProxyOptions::builder("n1".to_string(), "1.1.1.1".to_string(), 443)
            .udp(true)
            .tls(true)
            .dialer_proxy(Some("base".to_string()))
            .build();
        let mut proxy = ClashProxy::new_trojan(common);
        if let ClashProxy::Trojan { password, .. } = &mut proxy {
            *password = "secret".to_string();
        }

        let value = serde_json::to_value(&proxy).unwrap();
        assert_eq!(value["type"], "trojan");
        assert_eq!(value["name"], "n1");
        assert_eq!(value["dialer-proxy"], "base");
        assert_eq!(value["password"], "secret");
        assert!(value.get("ws-opts").is_none());
        assert!(value.get("client-fingerprint").is_none());
    }

    #[test]
    fn test_empty_dialer_proxy_is_dropped() {
        let common = CommonProxyOptions::builder("n".to_string(), "h".to_string(), 1)
            .dialer_proxy(Some(String::new()))
            .build();
        assert_eq!(common.dialer_proxy, None);
    }

    #[test]
    fn test_common_mut_patches_identity() {
        let mut proxy = ClashProxy::new_socks5(CommonProxyOptions::new(
            "template".to_string(),
            "10.0.0.1".to_string(),
            1080,
        ));
        proxy.set_name("chain".to_string());
        proxy.set_dialer_proxy("base".to_string());
        assert_eq!(proxy.name(), "chain");
        assert_eq!(proxy.dialer_proxy(), Some("base"));
    }
}

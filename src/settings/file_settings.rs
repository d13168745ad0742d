use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warning".to_string()
}

fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    25500
}

fn default_ports() -> Vec<u16> {
    vec![443]
}

fn default_fingerprint() -> String {
    "randomized".to_string()
}

fn default_best_interval() -> u32 {
    30
}

fn default_remote_dns() -> String {
    "https://8.8.8.8/dns-query".to_string()
}

fn default_local_dns() -> String {
    "8.8.8.8".to_string()
}

fn default_warp_endpoints() -> Vec<String> {
    vec!["engage.cloudflareclient.com:2408".to_string()]
}

fn default_amnezia_noise_count() -> u32 {
    5
}

fn default_amnezia_noise_size_min() -> u32 {
    50
}

fn default_amnezia_noise_size_max() -> u32 {
    100
}

/// Common settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSection {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub allow_lan_connection: bool,
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// Host name of the worker the generated outbounds connect to
    pub host_name: String,
    pub uuid: String,
    pub trojan_password: String,
}

impl Default for CommonSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            allow_lan_connection: false,
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            host_name: String::new(),
            uuid: String::new(),
            trojan_password: String::new(),
        }
    }
}

/// VLESS/Trojan generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySection {
    #[serde(default = "default_ports")]
    pub ports: Vec<u16>,
    pub clean_ips: Vec<String>,
    pub proxy_ips: Vec<String>,
    pub addresses: Vec<String>,
    #[serde(default = "default_true")]
    pub vless_enabled: bool,
    #[serde(default = "default_true")]
    pub trojan_enabled: bool,
    #[serde(default = "default_true")]
    pub enable_ipv6: bool,
    #[serde(default = "default_fingerprint")]
    pub fingerprint: String,
    /// Chain proxy URL, every generated outbound gets a twin dialing through it
    pub out_proxy: String,
    #[serde(default = "default_best_interval")]
    pub best_vl_tr_interval: u32,
}

impl Default for ProxySection {
    fn default() -> Self {
        Self {
            ports: default_ports(),
            clean_ips: Vec::new(),
            proxy_ips: Vec::new(),
            addresses: Vec::new(),
            vless_enabled: true,
            trojan_enabled: true,
            enable_ipv6: true,
            fingerprint: default_fingerprint(),
            out_proxy: String::new(),
            best_vl_tr_interval: default_best_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsSection {
    #[serde(default = "default_remote_dns")]
    pub remote_dns: String,
    #[serde(default = "default_local_dns")]
    pub local_dns: String,
    pub fake_dns: bool,
}

impl Default for DnsSection {
    fn default() -> Self {
        Self {
            remote_dns: default_remote_dns(),
            local_dns: default_local_dns(),
            fake_dns: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSection {
    pub bypass_lan: bool,
    pub bypass_iran: bool,
    pub bypass_china: bool,
    pub bypass_russia: bool,
    pub block_ads: bool,
    pub block_porn: bool,
    pub block_udp_443: bool,
    pub custom_bypass_rules: Vec<String>,
    pub custom_block_rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpSection {
    #[serde(default = "default_warp_endpoints")]
    pub endpoints: Vec<String>,
    #[serde(default = "default_best_interval")]
    pub best_warp_interval: u32,
    #[serde(default = "default_amnezia_noise_count")]
    pub amnezia_noise_count: u32,
    #[serde(default = "default_amnezia_noise_size_min")]
    pub amnezia_noise_size_min: u32,
    #[serde(default = "default_amnezia_noise_size_max")]
    pub amnezia_noise_size_max: u32,
    /// JSON file holding the registered WARP accounts
    pub dataset_path: String,
}

impl Default for WarpSection {
    fn default() -> Self {
        Self {
            endpoints: default_warp_endpoints(),
            best_warp_interval: default_best_interval(),
            amnezia_noise_count: default_amnezia_noise_count(),
            amnezia_noise_size_min: default_amnezia_noise_size_min(),
            amnezia_noise_size_max: default_amnezia_noise_size_max(),
            dataset_path: String::new(),
        }
    }
}

/// Settings file layout, shared by the YAML and TOML forms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub common: CommonSection,
    pub proxy: ProxySection,
    pub dns: DnsSection,
    pub routing: RoutingSection,
    pub warp: WarpSection,
}

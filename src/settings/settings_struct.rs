use std::path::Path;

use log::debug;

use super::file_settings::FileSettings;
use super::SettingsError;
use crate::constants::log_level::ClashLogLevel;
use crate::models::Protocol;
use crate::utils::split_endpoint;

/// Settings the generator reads, flattened from the settings file
#[derive(Debug, Clone)]
pub struct Settings {
    pub pref_path: String,

    // Common
    pub log_level: String,
    pub allow_lan_connection: bool,
    pub listen_address: String,
    pub listen_port: u16,
    pub host_name: String,
    pub uuid: String,
    pub trojan_password: String,

    // VLESS/Trojan
    pub ports: Vec<u16>,
    pub clean_ips: Vec<String>,
    pub proxy_ips: Vec<String>,
    pub addresses: Vec<String>,
    pub vless_enabled: bool,
    pub trojan_enabled: bool,
    pub enable_ipv6: bool,
    pub fingerprint: String,
    pub out_proxy: String,
    pub best_vl_tr_interval: u32,

    // DNS
    pub remote_dns: String,
    pub local_dns: String,
    pub fake_dns: bool,

    // Routing
    pub bypass_lan: bool,
    pub bypass_iran: bool,
    pub bypass_china: bool,
    pub bypass_russia: bool,
    pub block_ads: bool,
    pub block_porn: bool,
    pub block_udp_443: bool,
    pub custom_bypass_rules: Vec<String>,
    pub custom_block_rules: Vec<String>,

    // WARP
    pub warp_endpoints: Vec<String>,
    pub best_warp_interval: u32,
    pub amnezia_noise_count: u32,
    pub amnezia_noise_size_min: u32,
    pub amnezia_noise_size_max: u32,
    pub dataset_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from(FileSettings::default())
    }
}

impl From<FileSettings> for Settings {
    fn from(file: FileSettings) -> Self {
        let FileSettings {
            common,
            proxy,
            dns,
            routing,
            warp,
        } = file;

        Settings {
            pref_path: String::new(),

            log_level: common.log_level,
            allow_lan_connection: common.allow_lan_connection,
            listen_address: common.listen_address,
            listen_port: common.listen_port,
            host_name: common.host_name,
            uuid: common.uuid,
            trojan_password: common.trojan_password,

            ports: proxy.ports,
            clean_ips: proxy.clean_ips,
            proxy_ips: proxy.proxy_ips,
            addresses: proxy.addresses,
            vless_enabled: proxy.vless_enabled,
            trojan_enabled: proxy.trojan_enabled,
            enable_ipv6: proxy.enable_ipv6,
            fingerprint: proxy.fingerprint,
            out_proxy: proxy.out_proxy,
            best_vl_tr_interval: proxy.best_vl_tr_interval,

            remote_dns: dns.remote_dns,
            local_dns: dns.local_dns,
            fake_dns: dns.fake_dns,

            bypass_lan: routing.bypass_lan,
            bypass_iran: routing.bypass_iran,
            bypass_china: routing.bypass_china,
            bypass_russia: routing.bypass_russia,
            block_ads: routing.block_ads,
            block_porn: routing.block_porn,
            block_udp_443: routing.block_udp_443,
            custom_bypass_rules: routing.custom_bypass_rules,
            custom_block_rules: routing.custom_block_rules,

            warp_endpoints: warp.endpoints,
            best_warp_interval: warp.best_warp_interval,
            amnezia_noise_count: warp.amnezia_noise_count,
            amnezia_noise_size_min: warp.amnezia_noise_size_min,
            amnezia_noise_size_max: warp.amnezia_noise_size_max,
            dataset_path: warp.dataset_path,
        }
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from YAML or TOML content
    ///
    /// Content with a `common:` section is treated as YAML, anything else as TOML.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        let file: FileSettings = if content.contains("common:") {
            debug!("Parsing settings as YAML");
            serde_yaml::from_str(content)?
        } else {
            debug!("Parsing settings as TOML");
            toml::from_str(content)?
        };

        let settings = Settings::from(file);
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file on disk
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut settings = Settings::load_from_content(&content)?;
        settings.pref_path = path.display().to_string();
        Ok(settings)
    }

    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(port) = self.ports.iter().find(|port| **port == 0) {
            return Err(SettingsError::Invalid(format!("invalid port {}", port)));
        }
        if !self.uuid.is_empty() && uuid::Uuid::parse_str(&self.uuid).is_err() {
            return Err(SettingsError::Invalid(format!("invalid uuid '{}'", self.uuid)));
        }
        if let Err(e) = self.log_level.parse::<ClashLogLevel>() {
            return Err(SettingsError::Invalid(e));
        }
        if let Some(endpoint) = self
            .warp_endpoints
            .iter()
            .find(|endpoint| split_endpoint(endpoint).is_none())
        {
            return Err(SettingsError::Invalid(format!(
                "invalid warp endpoint '{}'",
                endpoint
            )));
        }
        Ok(())
    }

    /// Enabled protocols, in generation order
    pub fn protocols(&self) -> Vec<Protocol> {
        let mut protocols = Vec::new();
        if self.vless_enabled {
            protocols.push(Protocol::Vless);
        }
        if self.trojan_enabled {
            protocols.push(Protocol::Trojan);
        }
        protocols
    }

    /// Log level in the form the client understands
    pub fn clash_log_level(&self) -> ClashLogLevel {
        self.log_level.parse().unwrap_or_default()
    }
}

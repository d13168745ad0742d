use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{HTTPS_PORTS, HTTP_PORTS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SniffPorts {
    pub ports: Vec<u16>,
}

/// Traffic sniffer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashSniffer {
    pub enable: bool,
    pub force_dns_mapping: bool,
    pub parse_pure_ip: bool,
    pub override_destination: bool,
    pub sniff: BTreeMap<String, SniffPorts>,
}

/// TUN configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashTun {
    pub enable: bool,
    pub stack: String,
    pub auto_route: bool,
    pub strict_route: bool,
    pub auto_detect_interface: bool,
    pub dns_hijack: Vec<String>,
    pub mtu: u32,
}

pub fn sniffer() -> ClashSniffer {
    let mut sniff = BTreeMap::new();
    sniff.insert(
        "HTTP".to_string(),
        SniffPorts {
            ports: HTTP_PORTS.to_vec(),
        },
    );
    sniff.insert(
        "TLS".to_string(),
        SniffPorts {
            ports: HTTPS_PORTS.to_vec(),
        },
    );

    ClashSniffer {
        enable: true,
        force_dns_mapping: true,
        parse_pure_ip: true,
        override_destination: true,
        sniff,
    }
}

pub fn tun() -> ClashTun {
    ClashTun {
        enable: true,
        stack: "mixed".to_string(),
        auto_route: true,
        strict_route: true,
        auto_detect_interface: true,
        dns_hijack: vec!["any:53".to_string()],
        mtu: 9000,
    }
}

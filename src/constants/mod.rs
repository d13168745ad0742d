pub mod log_level;

/// Prefix of every generated tag and group name
pub const CONFIG_NAME_EMOJI: &str = "💦";

pub const SELECTOR_GROUP_NAME: &str = "✅ Selector";

/// Ports Cloudflare terminates TLS on
pub const HTTPS_PORTS: [u16; 6] = [443, 8443, 2053, 2083, 2087, 2096];

/// Ports Cloudflare serves plain HTTP on
pub const HTTP_PORTS: [u16; 7] = [80, 8080, 8880, 2052, 2082, 2086, 2095];

pub const URL_TEST_URL: &str = "https://www.gstatic.com/generate_204";

pub fn is_https_port(port: u16) -> bool {
    HTTPS_PORTS.contains(&port)
}

pub fn is_http_port(port: u16) -> bool {
    HTTP_PORTS.contains(&port)
}

use std::fmt;

/// Transport protocol served by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Vless,
    Trojan,
}

impl Protocol {
    /// Display name used inside tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Vless => "VLESS",
            Protocol::Trojan => "Trojan",
        }
    }

    /// Whether the Clash outbound for this protocol can run without TLS
    pub fn allows_plaintext(&self) -> bool {
        match self {
            Protocol::Vless => true,
            Protocol::Trojan => false,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

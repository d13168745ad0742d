use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Log levels accepted by the client, the panel's `none` maps to `silent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClashLogLevel {
    Silent,
    Error,
    #[default]
    Warning,
    Info,
    Debug,
}

impl FromStr for ClashLogLevel {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.trim().to_lowercase().as_str() {
            "none" | "silent" => Ok(ClashLogLevel::Silent),
            "error" => Ok(ClashLogLevel::Error),
            "warning" | "warn" => Ok(ClashLogLevel::Warning),
            "info" => Ok(ClashLogLevel::Info),
            "debug" => Ok(ClashLogLevel::Debug),
            _ => Err(format!("unknown log level '{}'", level)),
        }
    }
}

impl ClashLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClashLogLevel::Silent => "silent",
            ClashLogLevel::Error => "error",
            ClashLogLevel::Warning => "warning",
            ClashLogLevel::Info => "info",
            ClashLogLevel::Debug => "debug",
        }
    }
}

impl Serialize for ClashLogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("none".parse::<ClashLogLevel>(), Ok(ClashLogLevel::Silent));
        assert_eq!(" WARN ".parse::<ClashLogLevel>(), Ok(ClashLogLevel::Warning));
        assert_eq!("debug".parse::<ClashLogLevel>(), Ok(ClashLogLevel::Debug));
        assert!("verbose".parse::<ClashLogLevel>().is_err());
    }
}

pub mod address;
pub mod base64;

pub use address::{classify_address, is_domain, split_endpoint, AddressKind};

pub fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, str::is_empty)
}

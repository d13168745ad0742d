//! Clash document entry points
//!
//! Both paths expand outbounds, then hand the expansion to the assembler.
//! Nothing is written anywhere until the whole document is built.

use log::{debug, info};

use crate::generator::{
    build_config, expand_standard, expand_warp, GenerateError, SubDocumentBuilder, Variant,
};
use crate::kv::{warp_account_pair, DatasetStore};
use crate::settings::Settings;

pub const CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Headers every generated document is served with
pub const RESPONSE_HEADERS: [(&str, &str); 2] = [
    ("Cache-Control", "no-store"),
    ("CDN-Cache-Control", "no-store"),
];

/// A serialized document ready to serve
#[derive(Debug, Clone, PartialEq)]
pub struct ClashDocument {
    pub content: String,
    pub headers: Vec<(String, String)>,
}

impl ClashDocument {
    fn new(content: String) -> Self {
        let mut headers = vec![("Content-Type".to_string(), CONTENT_TYPE.to_string())];
        headers.extend(
            RESPONSE_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        Self { content, headers }
    }
}

/// Generate the VLESS/Trojan document, chained through the chain proxy when
/// one is configured
pub fn get_cl_normal_config<B: SubDocumentBuilder>(
    settings: &Settings,
    builders: &B,
) -> Result<ClashDocument, GenerateError> {
    let chain_template = builders.build_chain_template()?;
    let chain = chain_template.is_some();
    let addresses = builders.resolve_addresses(false);
    debug!(
        "Expanding {} addresses over {} ports, chain: {}",
        addresses.len(),
        settings.ports.len(),
        chain
    );

    let expansion = expand_standard(settings, builders, &addresses, chain_template.as_ref());
    info!(
        "Generated {} outbounds for the normal document",
        expansion.outbounds.len()
    );

    let config = build_config(
        settings,
        builders,
        expansion,
        Variant::Standard { chain },
        chain_template.as_ref(),
    );
    Ok(ClashDocument::new(config.to_pretty_json()?))
}

/// Generate the WARP document from the first two accounts in the dataset
pub async fn get_cl_warp_config<B, S>(
    settings: &Settings,
    builders: &B,
    store: &S,
    pro: bool,
) -> Result<ClashDocument, GenerateError>
where
    B: SubDocumentBuilder,
    S: DatasetStore,
{
    let dataset = store.fetch_dataset().await?;
    let (primary, relay) = warp_account_pair(&dataset)?;

    let expansion = expand_warp(settings, builders, primary, relay, pro);
    info!(
        "Generated {} outbounds for the warp document, pro: {}",
        expansion.outbounds.len(),
        pro
    );

    let config = build_config(settings, builders, expansion, Variant::Warp { pro }, None);
    Ok(ClashDocument::new(config.to_pretty_json()?))
}

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::utils::base64::base64_decode_bytes;

/// Length of the WireGuard reserved field Cloudflare expects
pub const RESERVED_LEN: usize = 3;

/// Reserved bytes as stored in the dataset: either the bytes themselves or
/// the base64 client id Cloudflare hands out
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredReserved {
    Bytes(Vec<u8>),
    ClientId(String),
}

fn deserialize_reserved<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = match StoredReserved::deserialize(deserializer)? {
        StoredReserved::Bytes(bytes) => bytes,
        StoredReserved::ClientId(client_id) => base64_decode_bytes(&client_id).ok_or_else(|| {
            <D::Error as de::Error>::custom(format!("invalid reserved client id '{}'", client_id))
        })?,
    };
    if bytes.len() != RESERVED_LEN {
        return Err(de::Error::invalid_length(bytes.len(), &"3 reserved bytes"));
    }
    Ok(bytes)
}

/// WireGuard credentials of one registered WARP device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpAccount {
    pub private_key: String,
    /// Peer public key
    pub public_key: String,
    #[serde(rename = "warpIPv6")]
    pub warp_ipv6: String,
    #[serde(deserialize_with = "deserialize_reserved")]
    pub reserved: Vec<u8>,
}

impl WarpAccount {
    /// Name of the first credential that is blank, if any
    pub fn missing_credential(&self) -> Option<&'static str> {
        [
            ("privateKey", &self.private_key),
            ("publicKey", &self.public_key),
            ("warpIPv6", &self.warp_ipv6),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Persisted panel data the WARP generator depends on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub warp_accounts: Vec<WarpAccount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_accepts_both_reserved_forms() {
        let json = r#"{
            "warpAccounts": [
                {"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128", "reserved": [1, 2, 3]},
                {"privateKey": "c", "publicKey": "d", "warpIPv6": "2606::2/128", "reserved": "AQID"}
            ]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.warp_accounts.len(), 2);
        assert_eq!(dataset.warp_accounts[0].reserved, vec![1, 2, 3]);
        assert_eq!(dataset.warp_accounts[1].reserved, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejects_malformed_accounts() {
        let cases = [
            r#"{"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128", "reserved": "***"}"#,
            r#"{"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128", "reserved": [1, 2]}"#,
            r#"{"privateKey": "a", "publicKey": "b", "reserved": [1, 2, 3]}"#,
            r#"{"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128"}"#,
        ];
        for json in cases {
            assert!(
                serde_json::from_str::<WarpAccount>(json).is_err(),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_missing_credential() {
        let mut account = WarpAccount {
            private_key: "a".to_string(),
            public_key: "b".to_string(),
            warp_ipv6: "2606::1/128".to_string(),
            reserved: vec![0, 0, 0],
        };
        assert_eq!(account.missing_credential(), None);
        account.warp_ipv6 = " ".to_string();
        assert_eq!(account.missing_credential(), Some("warpIPv6"));
    }
}
